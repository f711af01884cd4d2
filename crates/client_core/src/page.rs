//! Static configuration handed to the page's decorative libraries, plus the
//! small computations the page does around them.

use std::time::Duration;

use serde::Serialize;

pub const TYPED_TEXT_SELECTOR: &str = ".text";
pub const PARTICLES_CONTAINER_ID: &str = "particles-js";
pub const PROGRESS_FILL_DELAY: Duration = Duration::from_millis(500);

/// Options object for the typed-text animation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedTextOptions {
    pub strings: Vec<String>,
    pub type_speed: u32,
    pub back_speed: u32,
    #[serde(rename = "loop")]
    pub looped: bool,
}

impl Default for TypedTextOptions {
    fn default() -> Self {
        Self {
            strings: vec![
                "Web Developer".into(),
                "Mobile App Developer".into(),
                "Machine Learning Enthusiast".into(),
            ],
            type_speed: 100,
            back_speed: 50,
            looped: true,
        }
    }
}

/// `conic-gradient` background for a radial gauge, from the raw
/// `data-percentage` attribute.
pub fn radial_gauge_background(percentage: &str) -> String {
    let p = percentage.trim();
    format!("conic-gradient(#0ef {p}%, #333 {p}% 100%)")
}

/// Smooth-scroll target for an in-page anchor. Only `#id` hrefs qualify.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// A skill bar that starts empty and fills to its declared width after
/// [`PROGRESS_FILL_DELAY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    declared_width: String,
    current_width: String,
}

impl ProgressBar {
    pub fn new(declared_width: impl Into<String>) -> Self {
        Self {
            declared_width: declared_width.into(),
            current_width: "0".into(),
        }
    }

    pub fn width(&self) -> &str {
        &self.current_width
    }

    pub fn fill(&mut self) {
        self.current_width = self.declared_width.clone();
    }

    pub async fn fill_after_delay(&mut self) {
        tokio::time::sleep(PROGRESS_FILL_DELAY).await;
        self.fill();
    }
}

/// Mobile menu and active-link state for the navbar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavbarState {
    menu_open: bool,
    active_link: Option<String>,
}

impl NavbarState {
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Highlights `href` alone and closes the mobile menu.
    pub fn select_link(&mut self, href: impl Into<String>) {
        self.active_link = Some(href.into());
        self.menu_open = false;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn active_link(&self) -> Option<&str> {
        self.active_link.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticlesConfig {
    pub particles: Particles,
    pub interactivity: Interactivity,
    pub retina_detect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particles {
    pub number: ParticleNumber,
    pub color: ValueOf<&'static str>,
    pub shape: Shape,
    pub opacity: Animated,
    pub size: Animated,
    pub line_linked: Enabled,
    #[serde(rename = "move")]
    pub movement: Movement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueOf<T> {
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleNumber {
    pub value: u32,
    pub density: Density,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Density {
    pub enable: bool,
    pub value_area: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animated {
    pub value: f64,
    pub random: bool,
    pub anim: Animation,
}

/// `floor` serializes as `opacity_min` or `size_min` depending on the
/// property being animated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
    pub enable: bool,
    pub speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_min: Option<f64>,
    pub sync: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enabled {
    pub enable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movement {
    pub enable: bool,
    pub speed: f64,
    pub direction: &'static str,
    pub random: bool,
    pub straight: bool,
    pub out_mode: &'static str,
    pub bounce: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interactivity {
    pub detect_on: &'static str,
    pub events: InteractivityEvents,
    pub modes: InteractivityModes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractivityEvents {
    pub onhover: EventMode,
    pub onclick: EventMode,
    pub resize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventMode {
    pub enable: bool,
    pub mode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractivityModes {
    pub bubble: BubbleMode,
    pub push: PushMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleMode {
    pub distance: f64,
    pub size: f64,
    pub duration: f64,
    pub opacity: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushMode {
    pub particles_nb: u32,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            particles: Particles {
                number: ParticleNumber {
                    value: 100,
                    density: Density {
                        enable: true,
                        value_area: 800,
                    },
                },
                color: ValueOf { value: "#ffffff" },
                shape: Shape { kind: "circle" },
                opacity: Animated {
                    value: 0.7,
                    random: true,
                    anim: Animation {
                        enable: true,
                        speed: 1.0,
                        opacity_min: Some(0.1),
                        size_min: None,
                        sync: false,
                    },
                },
                size: Animated {
                    value: 3.0,
                    random: true,
                    anim: Animation {
                        enable: true,
                        speed: 2.0,
                        opacity_min: None,
                        size_min: Some(0.1),
                        sync: false,
                    },
                },
                line_linked: Enabled { enable: false },
                movement: Movement {
                    enable: true,
                    speed: 1.0,
                    direction: "none",
                    random: true,
                    straight: false,
                    out_mode: "out",
                    bounce: false,
                },
            },
            interactivity: Interactivity {
                detect_on: "canvas",
                events: InteractivityEvents {
                    onhover: EventMode {
                        enable: true,
                        mode: "bubble",
                    },
                    onclick: EventMode {
                        enable: true,
                        mode: "push",
                    },
                    resize: true,
                },
                modes: InteractivityModes {
                    bubble: BubbleMode {
                        distance: 200.0,
                        size: 6.0,
                        duration: 2.0,
                        opacity: 0.8,
                        speed: 3.0,
                    },
                    push: PushMode { particles_nb: 4 },
                },
            },
            retina_detect: true,
        }
    }
}
