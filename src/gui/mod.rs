//! GUI module using iced
//!
//! Desktop front end: presentation, translator and topics tabs.

use iced::keyboard::{self, key::Named, Key};
use iced::widget::{container, row};
use iced::{Element, Length, Subscription, Task, Theme};
use std::time::Duration;
use tracing::{debug, info};

use crate::content::ModalContent;
use crate::presentation::{KeyAction, NavKey};
use crate::translation::run_request;

// Sub-modules
pub mod app;
pub mod messages;
pub mod state;
pub mod tabs;

// Re-exports for convenience
pub use app::PrepApp;
pub use messages::Message;
pub use state::Tab;

/// Interval at which queued speech engine events are applied
const SPEECH_TICK: Duration = Duration::from_millis(100);

/// Map a raw key press to the presentation key set
pub fn map_key(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    let nav = match key.as_ref() {
        Key::Named(Named::ArrowLeft) => NavKey::ArrowLeft,
        Key::Named(Named::ArrowUp) => NavKey::ArrowUp,
        Key::Named(Named::ArrowRight) => NavKey::ArrowRight,
        Key::Named(Named::ArrowDown) => NavKey::ArrowDown,
        Key::Named(Named::Space) => NavKey::Space,
        Key::Named(Named::Home) => NavKey::Home,
        Key::Named(Named::End) => NavKey::End,
        Key::Named(Named::Escape) => NavKey::Escape,
        _ => return None,
    };
    Some(Message::KeyPressed(nav))
}

impl PrepApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.current_tab = tab;
            }

            // Presentation
            Message::Navigate(intent) => {
                let before = self.navigator.current_slide();
                self.navigator.apply(intent);
                self.after_navigation(before);
            }
            Message::KeyPressed(key) => {
                let before = self.navigator.current_slide();
                let outcome = self.navigator.handle_key(key);
                if let Some(KeyAction::Navigate(intent)) = outcome.action {
                    debug!("⌨️ {:?} -> {:?}", key, intent);
                }
                self.after_navigation(before);
            }
            Message::ToggleSection(index) => {
                self.slide_view.toggles.toggle(index);
            }
            Message::ExpandCode(index) => {
                let modal = self
                    .navigator
                    .current()
                    .code_examples
                    .get(index)
                    .map(ModalContent::for_code);
                if let Some(modal) = modal {
                    self.navigator.open_modal(modal);
                }
            }
            Message::OpenSlideModal(index) => {
                if let Some(modal) = self.navigator.current().modals.get(index).cloned() {
                    self.navigator.open_modal(modal);
                }
            }
            Message::CloseModal => {
                self.navigator.close_modal();
            }
            Message::ToggleOverview => {
                self.slide_view.show_overview = !self.slide_view.show_overview;
            }
            Message::DiagramHover(node) => {
                self.slide_view.hovered_node = node;
            }

            // Background music
            Message::MusicToggleMute => {
                self.music.toggle_mute();
                self.save_music_prefs();
            }
            Message::MusicVolumeChanged(volume) => {
                self.music.set_volume(volume);
                self.save_music_prefs();
            }
            Message::MusicTrackSelected(index) => {
                self.music.select_track(index);
                info!("🎵 Music track: {}", self.music.current_track().name);
                self.save_music_prefs();
            }

            // Translator
            Message::TextChanged(text) => {
                self.translator.set_text(&text);
            }
            Message::ToggleDirection => {
                self.translator.toggle_direction();
                self.status = "Ready".to_string();
            }
            Message::TranslatePressed => {
                if let Some(request) = self.translator.begin() {
                    self.status = "Translating...".to_string();
                    let backend = self.translation_backend.clone();
                    let generation = request.generation;
                    return Task::perform(
                        async move { run_request(backend.as_ref(), &request).await },
                        move |outcome| Message::TranslationFinished(generation, outcome),
                    );
                }
            }
            Message::TranslationFinished(generation, outcome) => {
                if self.translator.finish(generation, &outcome) {
                    self.status = "Ready".to_string();
                }
            }
            Message::ClearText => {
                self.translator.clear();
                self.speech.reset();
                self.status = "Ready".to_string();
            }

            // Speech
            Message::SpeakOriginal => {
                let lang = self.translator.direction().source();
                let text = self.translator.text().to_string();
                self.speech.speak(&text, lang);
            }
            Message::SpeakTranslated => {
                let lang = self.translator.direction().target();
                let text = self.translator.translated_text().to_string();
                self.speech.speak(&text, lang);
            }
            Message::PauseSpeech => self.speech.pause(),
            Message::ResumeSpeech => self.speech.resume(),
            Message::StopSpeech => self.speech.stop(),
            Message::SpeechRateChanged(rate) => self.speech.set_speech_rate(rate),
            Message::VoiceSelected(name) => self.speech.set_selected_voice(&name),
            Message::SpeechTick => {
                self.speech.drain_events();
            }

            // Topics
            Message::TopicSelected(id) => {
                self.selected_topic = if self.selected_topic.as_deref() == Some(id.as_str()) {
                    None
                } else {
                    Some(id)
                };
            }
        }

        Task::none()
    }

    /// Slide-scoped view state does not survive a slide change
    fn after_navigation(&mut self, before: u32) {
        if self.navigator.current_slide() != before {
            self.slide_view.reset();
            debug!(
                "📍 Slide {} ({})",
                self.navigator.current_slide(),
                self.navigator.location().as_str()
            );
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();

        // Keys only drive the deck while it is on screen
        if self.current_tab == Tab::Presentation {
            subscriptions.push(keyboard::on_key_press(map_key));
        }

        if self.speech.is_speaking() {
            subscriptions.push(iced::time::every(SPEECH_TICK).map(|_| Message::SpeechTick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = tabs::sidebar::view(self);

        let content = match self.current_tab {
            Tab::Presentation => tabs::presentation::view(self),
            Tab::Translator => tabs::translator::view(self),
            Tab::Topics => tabs::topics::view(self),
        };

        row![sidebar, container(content).width(Length::Fill).padding(20)].into()
    }
}
