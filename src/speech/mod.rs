//! Speech synthesis
//!
//! [`SpeechEngine`] is the platform boundary (voice list, playback,
//! pause/resume/cancel). [`SpeechController`] owns the single engine instance
//! and exposes the speak / pause / resume / stop / reset verbs.

use crate::config::Config;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

pub mod controller;
pub mod system;

pub use controller::{SpeechController, SpeechState};

pub const RATE_MIN: f32 = 0.5;
pub const RATE_MAX: f32 = 2.0;
pub const RATE_STEP: f32 = 0.1;
pub const DEFAULT_RATE: f32 = 1.0;

/// Languages the reader can speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeechLang {
    En,
    Es,
}

impl SpeechLang {
    /// Locale tag put on the utterance
    pub fn locale(&self) -> &'static str {
        match self {
            SpeechLang::En => "en-US",
            SpeechLang::Es => "es-ES",
        }
    }

    /// Prefix used to match voice locales
    pub fn code(&self) -> &'static str {
        match self {
            SpeechLang::En => "en",
            SpeechLang::Es => "es",
        }
    }
}

impl fmt::Display for SpeechLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SpeechLang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(SpeechLang::En),
            "es" => Ok(SpeechLang::Es),
            other => Err(format!("unsupported language '{}' (expected en or es)", other)),
        }
    }
}

/// Voice descriptor reported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// Locale, e.g. `en-US` or `es`
    pub lang: String,
}

impl Voice {
    pub fn new(name: &str, lang: &str) -> Self {
        Self {
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.lang)
    }
}

pub type UtteranceId = u64;

/// One playback request
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub lang: SpeechLang,
    pub rate: f32,
    pub voice: Option<Voice>,
}

impl Utterance {
    pub fn locale(&self) -> &'static str {
        self.lang.locale()
    }
}

/// Engine callbacks, tagged with the utterance they belong to
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Started(UtteranceId),
    Ended(UtteranceId),
    Failed(UtteranceId, String),
    VoicesChanged,
}

pub type EventSender = UnboundedSender<SpeechEvent>;

/// Platform speech-synthesis capability
pub trait SpeechEngine: Send + Sync + fmt::Debug {
    /// Every voice the platform currently offers
    fn voices(&self) -> Vec<Voice>;

    /// Start playback without blocking. Lifecycle is reported on `events`.
    /// An error means the platform refused to start.
    fn speak(&self, utterance: &Utterance, events: EventSender) -> anyhow::Result<()>;

    fn pause(&self);

    fn resume(&self);

    /// Drop whatever is playing; always safe
    fn cancel(&self);

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Keep only English and Spanish voices
pub fn filter_voices(voices: Vec<Voice>) -> Vec<Voice> {
    voices
        .into_iter()
        .filter(|v| v.lang.starts_with("en") || v.lang.starts_with("es"))
        .collect()
}

/// Clamp into `[0.5, 2.0]` and snap to the 0.1 step
pub fn normalize_rate(rate: f32) -> f32 {
    if !rate.is_finite() {
        return DEFAULT_RATE;
    }
    let steps_per_unit = (1.0 / RATE_STEP).round();
    ((rate * steps_per_unit).round() / steps_per_unit).clamp(RATE_MIN, RATE_MAX)
}

/// Factory for the configured speech engine
pub fn create_engine(config: &Config) -> Arc<dyn SpeechEngine> {
    info!("🛠️ Creating speech engine: {}", config.speech_engine);
    let engine: Arc<dyn SpeechEngine> = match config.speech_engine.as_str() {
        "espeak" | "espeak-ng" => Arc::new(system::SystemEngine::new(system::Backend::Espeak)),
        "speechd" | "spd-say" => {
            Arc::new(system::SystemEngine::new(system::Backend::SpeechDispatcher))
        }
        "auto" => Arc::new(system::SystemEngine::detect()),
        other => {
            warn!("  - Unknown engine '{}', auto-detecting", other);
            Arc::new(system::SystemEngine::detect())
        }
    };
    info!("✅ Speech engine '{}' initialized", engine.name());
    engine
}
