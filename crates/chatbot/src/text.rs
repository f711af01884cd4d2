//! Sparse text vectors used by the intent and retrieval stages.

use std::{
    collections::{HashMap, HashSet},
    sync::OnceLock,
};

use regex::Regex;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Lowercased word tokens of two or more word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: HashMap<String, f64>,
}

impl SparseVector {
    fn from_counts(weights: HashMap<String, f64>) -> Self {
        let mut vector = Self { weights };
        vector.normalize();
        vector
    }

    fn normalize(&mut self) {
        let norm = self.weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in self.weights.values_mut() {
                *weight /= norm;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Cosine similarity. Both vectors are unit length, so this is the dot product.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .filter_map(|(term, w)| large.weights.get(term).map(|o| w * o))
            .sum()
    }
}

/// TF-IDF with smoothed idf, `ln((1 + n) / (1 + df)) + 1`, and L2 normalization.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    idf: HashMap<String, f64>,
}

impl TfIdfVectorizer {
    pub fn fit<'a>(documents: impl IntoIterator<Item = &'a str>) -> Self {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut n_documents = 0usize;
        for document in documents {
            n_documents += 1;
            let unique: HashSet<String> = tokenize(document).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let n = n_documents as f64;
        let idf = document_frequency
            .into_iter()
            .map(|(term, df)| {
                let weight = ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0;
                (term, weight)
            })
            .collect();
        Self { idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// Out-of-vocabulary tokens are dropped.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<String, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(idf) = self.idf.get(&token) {
                *counts.entry(token).or_insert(0.0) += idf;
            }
        }
        SparseVector::from_counts(counts)
    }
}

/// Character trigram counts over the lowercased text padded with one space
/// on each side.
pub fn trigram_vector(text: &str) -> SparseVector {
    let padded: Vec<char> = format!(" {} ", text.trim().to_lowercase())
        .chars()
        .collect();
    let mut counts: HashMap<String, f64> = HashMap::new();
    for window in padded.windows(3) {
        let gram: String = window.iter().collect();
        *counts.entry(gram).or_insert(0.0) += 1.0;
    }
    SparseVector::from_counts(counts)
}
