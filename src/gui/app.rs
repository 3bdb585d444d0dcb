//! Main application state for AEM Prep GUI
//!
//! Contains the PrepApp struct and initialization logic.

use iced::Task;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::content::{topics, Deck, Topic};
use crate::preferences::PreferenceStore;
use crate::presentation::music::MusicPlayer;
use crate::presentation::{Navigator, QueryLocation};
use crate::speech::{self, SpeechController};
use crate::translation::{MyMemoryClient, TranslationBackend, Translator};

use super::messages::Message;
use super::state::{SlideViewState, Tab};

/// Main application state
pub struct PrepApp {
    /// Current view/tab
    pub(crate) current_tab: Tab,
    /// Status message
    pub(crate) status: String,
    /// Slide position, mirrored into the location
    pub(crate) navigator: Navigator<QueryLocation>,
    pub(crate) slide_view: SlideViewState,
    pub(crate) music: MusicPlayer,
    pub(crate) prefs: PreferenceStore,
    pub(crate) topics: Vec<Topic>,
    pub(crate) selected_topic: Option<String>,
    pub(crate) translator: Translator,
    pub(crate) translation_backend: Arc<dyn TranslationBackend>,
    pub(crate) speech: SpeechController,
}

impl PrepApp {
    /// Create a new PrepApp showing `deck` from `location`
    pub fn new(deck: Arc<Deck>, location: QueryLocation) -> (Self, Task<Message>) {
        let config = Config::load().unwrap_or_default();

        let topics = topics::builtin().unwrap_or_else(|e| {
            warn!("⚠️ Topics unavailable: {}", e);
            Vec::new()
        });

        let prefs = PreferenceStore::open(config.preferences_path());
        let music = MusicPlayer::load(&prefs);

        let mut speech = SpeechController::new(speech::create_engine(&config));
        speech.set_speech_rate(config.speech_rate);
        if !config.preferred_voice.is_empty() {
            speech.set_selected_voice(&config.preferred_voice);
        }

        let navigator = Navigator::mount(deck, location);
        info!(
            "🚀 AEM Prep app initialized at slide {}/{}",
            navigator.current_slide(),
            navigator.total_slides()
        );

        let app = Self {
            current_tab: Tab::Presentation,
            status: "Ready".to_string(),
            translation_backend: Arc::new(MyMemoryClient::from_config(&config)),
            navigator,
            slide_view: SlideViewState::default(),
            music,
            prefs,
            topics,
            selected_topic: None,
            translator: Translator::default(),
            speech,
        };

        (app, Task::none())
    }

    /// Window title tracks the current location
    pub fn title(&self) -> String {
        format!(
            "AEM Prep · {} ({}/{})",
            self.navigator.current().title,
            self.navigator.current_slide(),
            self.navigator.total_slides()
        )
    }

    pub(crate) fn save_music_prefs(&mut self) {
        self.music.persist(&mut self.prefs);
        if let Err(e) = self.prefs.save() {
            warn!("⚠️ Could not save preferences: {}", e);
        }
    }
}
