use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chatbot::{ChatPipeline, KnowledgeBase};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "./data/responses.json")]
    knowledge_base: PathBuf,
    #[arg(long, default_value_t = 0.3)]
    retrieval_min_score: f64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the knowledge base and report its size.
    Check,
    /// Answer a question with the offline stages only.
    Ask { question: String },
    /// Print the normalized questions.
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let kb = KnowledgeBase::load(&cli.knowledge_base).with_context(|| {
        format!(
            "failed to load knowledge base from '{}'",
            cli.knowledge_base.display()
        )
    })?;

    match cli.command {
        Command::Check => {
            println!(
                "knowledge base ok: {} entries in {}",
                kb.len(),
                cli.knowledge_base.display()
            );
        }
        Command::Ask { question } => {
            let pipeline = ChatPipeline::offline(Arc::new(kb), cli.retrieval_min_score);
            match pipeline.answer(&question).await {
                Some(answer) => println!("[{}] {}", answer.method, answer.text),
                None => println!("no offline stage answered; the server would ask the language model"),
            }
        }
        Command::List => {
            for entry in kb.entries() {
                println!("{}", entry.question);
            }
        }
    }

    Ok(())
}
