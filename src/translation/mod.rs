//! Translation orchestration
//!
//! [`Translator`] holds the translator's text state and issues one outbound
//! request per trigger through a [`TranslationBackend`]. Requests carry a
//! generation number: only the most recently issued one may write the result
//! or clear the loading flag.

use crate::speech::SpeechLang;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

pub mod mymemory;

pub use mymemory::MyMemoryClient;

/// Status code the translation service reports on success
pub const SUCCESS_STATUS: u16 = 200;

pub const TRANSLATE_ERROR: &str = "Error al traducir. Intenta de nuevo.";
pub const CONNECTION_ERROR: &str = "Error de conexión. Verifica tu internet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationDirection {
    #[default]
    EnEs,
    EsEn,
}

impl TranslationDirection {
    /// `langpair` query value
    pub fn lang_pair(&self) -> &'static str {
        match self {
            TranslationDirection::EnEs => "en|es",
            TranslationDirection::EsEn => "es|en",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            TranslationDirection::EnEs => TranslationDirection::EsEn,
            TranslationDirection::EsEn => TranslationDirection::EnEs,
        }
    }

    pub fn source(&self) -> SpeechLang {
        text_language(*self, false)
    }

    pub fn target(&self) -> SpeechLang {
        text_language(*self, true)
    }
}

impl fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationDirection::EnEs => f.write_str("en-es"),
            TranslationDirection::EsEn => f.write_str("es-en"),
        }
    }
}

impl FromStr for TranslationDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en-es" => Ok(TranslationDirection::EnEs),
            "es-en" => Ok(TranslationDirection::EsEn),
            other => Err(format!("unknown direction '{}' (expected en-es or es-en)", other)),
        }
    }
}

/// Language of the original text, or of the translation when `translated`
pub fn text_language(direction: TranslationDirection, translated: bool) -> SpeechLang {
    match (direction, translated) {
        (TranslationDirection::EnEs, false) | (TranslationDirection::EsEn, true) => SpeechLang::En,
        (TranslationDirection::EnEs, true) | (TranslationDirection::EsEn, false) => SpeechLang::Es,
    }
}

/// Decoded service reply
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResponse {
    /// `None` when the service sent something that is not a status code
    pub status: Option<u16>,
    pub translated_text: Option<String>,
}

/// Outbound translation service
#[async_trait]
pub trait TranslationBackend: Send + Sync + fmt::Debug {
    /// One request, no retries. `Err` means the transport failed or the body
    /// could not be decoded.
    async fn fetch(&self, text: &str, lang_pair: &str) -> anyhow::Result<TranslationResponse>;

    fn name(&self) -> &str;
}

/// A request handed out by [`Translator::begin`]
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub generation: u64,
    pub text: String,
    pub direction: TranslationDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    Translated(String),
    Rejected(Option<u16>),
    TransportFailed(String),
}

impl TranslationOutcome {
    /// Text written into `translated_text`
    pub fn display_text(&self) -> &str {
        match self {
            TranslationOutcome::Translated(text) => text,
            TranslationOutcome::Rejected(_) => TRANSLATE_ERROR,
            TranslationOutcome::TransportFailed(_) => CONNECTION_ERROR,
        }
    }
}

/// Perform the request; never fails, every error maps to an outcome
pub async fn run_request(
    backend: &dyn TranslationBackend,
    request: &TranslationRequest,
) -> TranslationOutcome {
    debug!(
        "🌐 Translating {} chars ({}) via {}",
        request.text.len(),
        request.direction.lang_pair(),
        backend.name()
    );
    match backend.fetch(&request.text, request.direction.lang_pair()).await {
        Ok(TranslationResponse {
            status: Some(SUCCESS_STATUS),
            translated_text: Some(text),
        }) => TranslationOutcome::Translated(text),
        Ok(response) => {
            warn!("⚠️ Translation rejected with status {:?}", response.status);
            TranslationOutcome::Rejected(response.status)
        }
        Err(e) => {
            warn!("❌ Translation request failed: {}", e);
            TranslationOutcome::TransportFailed(e.to_string())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Translator {
    text: String,
    translated_text: String,
    is_translating: bool,
    direction: TranslationDirection,
    generation: u64,
}

impl Translator {
    pub fn new(initial_text: &str) -> Self {
        Self {
            text: initial_text.to_string(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn is_translating(&self) -> bool {
        self.is_translating
    }

    pub fn direction(&self) -> TranslationDirection {
        self.direction
    }

    /// Changing direction discards the previous translation and any request
    /// still in flight for the old direction
    pub fn set_translation_direction(&mut self, direction: TranslationDirection) {
        if direction != self.direction {
            self.direction = direction;
            self.translated_text.clear();
            self.abandon_pending();
        }
    }

    pub fn toggle_direction(&mut self) {
        self.set_translation_direction(self.direction.toggle());
    }

    /// Clear both panes
    pub fn clear(&mut self) {
        self.text.clear();
        self.translated_text.clear();
        self.abandon_pending();
    }

    fn abandon_pending(&mut self) {
        if self.is_translating {
            debug!("Abandoning translation #{}", self.generation);
            self.generation += 1;
            self.is_translating = false;
        }
    }

    /// Start a request. `None` for blank text.
    pub fn begin(&mut self) -> Option<TranslationRequest> {
        if self.text.trim().is_empty() {
            return None;
        }
        self.generation += 1;
        self.is_translating = true;
        Some(TranslationRequest {
            generation: self.generation,
            text: self.text.clone(),
            direction: self.direction,
        })
    }

    /// Apply a finished request. Returns `false` when a newer one superseded it.
    pub fn finish(&mut self, generation: u64, outcome: &TranslationOutcome) -> bool {
        if generation != self.generation {
            debug!("Dropping superseded translation #{}", generation);
            return false;
        }
        self.translated_text = outcome.display_text().to_string();
        self.is_translating = false;
        true
    }

    /// Begin, run and finish in one go
    pub async fn translate_text(&mut self, backend: &dyn TranslationBackend) {
        let Some(request) = self.begin() else {
            return;
        };
        let outcome = run_request(backend, &request).await;
        if self.finish(request.generation, &outcome) {
            info!("✅ Translation #{} applied", request.generation);
        }
    }
}
