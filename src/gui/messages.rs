//! Message types for the AEM Prep GUI
//!
//! All messages that can be sent to update the application state.

use crate::presentation::{NavIntent, NavKey};
use crate::translation::TranslationOutcome;

/// Messages that drive the application
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    TabSelected(super::state::Tab),

    // Presentation
    Navigate(NavIntent),
    KeyPressed(NavKey),
    ToggleSection(usize),
    ExpandCode(usize),
    OpenSlideModal(usize),
    CloseModal,
    ToggleOverview,
    DiagramHover(Option<(usize, String)>),

    // Background music
    MusicToggleMute,
    MusicVolumeChanged(f32),
    MusicTrackSelected(usize),

    // Translator
    TextChanged(String),
    ToggleDirection,
    TranslatePressed,
    TranslationFinished(u64, TranslationOutcome),
    ClearText,

    // Speech
    SpeakOriginal,
    SpeakTranslated,
    PauseSpeech,
    ResumeSpeech,
    StopSpeech,
    SpeechRateChanged(f32),
    VoiceSelected(String),
    SpeechTick,

    // Topics
    TopicSelected(String),
}
