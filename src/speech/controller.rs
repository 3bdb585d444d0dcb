//! Speech orchestration
//!
//! Exclusive owner of the speech engine. Every `speak` cancels whatever is
//! playing first, so at most one utterance is ever current. Engine events are
//! matched against the current utterance id; late events from superseded
//! utterances are dropped.

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::{
    filter_voices, normalize_rate, SpeechEngine, SpeechEvent, SpeechLang, Utterance, UtteranceId,
    Voice, DEFAULT_RATE,
};

/// Observable speech state. `is_paused` implies `is_speaking`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechState {
    pub is_speaking: bool,
    pub is_paused: bool,
    pub speech_rate: f32,
    pub selected_voice: String,
    pub voices: Vec<Voice>,
}

impl Default for SpeechState {
    fn default() -> Self {
        Self {
            is_speaking: false,
            is_paused: false,
            speech_rate: DEFAULT_RATE,
            selected_voice: String::new(),
            voices: Vec::new(),
        }
    }
}

pub struct SpeechController {
    engine: Arc<dyn SpeechEngine>,
    events_tx: UnboundedSender<SpeechEvent>,
    events_rx: UnboundedReceiver<SpeechEvent>,
    state: SpeechState,
    current: Option<UtteranceId>,
    next_id: UtteranceId,
}

impl std::fmt::Debug for SpeechController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechController")
            .field("engine", &self.engine.name())
            .field("state", &self.state)
            .field("current", &self.current)
            .finish()
    }
}

impl SpeechController {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            engine,
            events_tx,
            events_rx,
            state: SpeechState::default(),
            current: None,
            next_id: 1,
        };
        controller.refresh_voices();
        controller
    }

    pub fn state(&self) -> &SpeechState {
        &self.state
    }

    pub fn is_speaking(&self) -> bool {
        self.state.is_speaking
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    pub fn speech_rate(&self) -> f32 {
        self.state.speech_rate
    }

    pub fn selected_voice(&self) -> &str {
        &self.state.selected_voice
    }

    pub fn voices(&self) -> &[Voice] {
        &self.state.voices
    }

    /// Id of the utterance whose events are still honoured
    pub fn active_utterance(&self) -> Option<UtteranceId> {
        self.current
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Re-read the platform voice list. The default voice is picked once and
    /// never overrides an existing selection.
    pub fn refresh_voices(&mut self) {
        self.state.voices = filter_voices(self.engine.voices());
        if self.state.selected_voice.is_empty() {
            if let Some(first) = self.state.voices.first() {
                self.state.selected_voice = first.name.clone();
            }
        }
        debug!(
            "🗣️ {} en/es voices available, selected '{}'",
            self.state.voices.len(),
            self.state.selected_voice
        );
    }

    pub fn set_speech_rate(&mut self, rate: f32) {
        self.state.speech_rate = normalize_rate(rate);
    }

    pub fn set_selected_voice(&mut self, name: &str) {
        self.state.selected_voice = name.to_string();
    }

    /// Exact name match on the selection first, then the first voice for `lang`
    pub fn resolve_voice(&self, lang: SpeechLang) -> Option<Voice> {
        let voices = &self.state.voices;
        voices
            .iter()
            .find(|v| !self.state.selected_voice.is_empty() && v.name == self.state.selected_voice)
            .or_else(|| voices.iter().find(|v| v.lang.starts_with(lang.code())))
            .cloned()
    }

    /// Interrupt anything playing and start `text`. No queueing.
    pub fn speak(&mut self, text: &str, lang: SpeechLang) {
        self.engine.cancel();

        let id = self.next_id;
        self.next_id += 1;
        let utterance = Utterance {
            id,
            text: text.to_string(),
            lang,
            rate: self.state.speech_rate,
            voice: self.resolve_voice(lang),
        };
        self.current = Some(id);

        match self.engine.speak(&utterance, self.events_tx.clone()) {
            Ok(()) => {
                info!(
                    "📢 Speaking utterance {} ({}, rate {:.1}, voice {:?})",
                    id,
                    utterance.locale(),
                    utterance.rate,
                    utterance.voice.as_ref().map(|v| v.name.as_str())
                );
                self.state.is_speaking = true;
                self.state.is_paused = false;
            }
            Err(e) => {
                warn!("🔇 Speech start rejected: {}", e);
                self.current = None;
                self.state.is_speaking = false;
                self.state.is_paused = false;
            }
        }
    }

    /// Only while speaking and not already paused
    pub fn pause(&mut self) {
        if self.state.is_speaking && !self.state.is_paused {
            self.engine.pause();
            self.state.is_paused = true;
        }
    }

    /// Only while paused
    pub fn resume(&mut self) {
        if self.state.is_paused {
            self.engine.resume();
            self.state.is_paused = false;
        }
    }

    pub fn stop(&mut self) {
        self.engine.cancel();
        self.current = None;
        self.state.is_speaking = false;
        self.state.is_paused = false;
    }

    /// Same as [`stop`](Self::stop); clearing text belongs to the caller
    pub fn reset(&mut self) {
        self.stop();
    }

    pub fn handle_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::VoicesChanged => self.refresh_voices(),
            SpeechEvent::Started(id) if self.current == Some(id) => {
                self.state.is_speaking = true;
                self.state.is_paused = false;
            }
            SpeechEvent::Ended(id) if self.current == Some(id) => {
                debug!("Utterance {} finished", id);
                self.finish();
            }
            SpeechEvent::Failed(id, reason) if self.current == Some(id) => {
                warn!("Utterance {} failed: {}", id, reason);
                self.finish();
            }
            stale => debug!("Ignoring stale speech event {:?}", stale),
        }
    }

    /// Apply every pending engine event; returns how many were processed
    pub fn drain_events(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            processed += 1;
        }
        processed
    }

    fn finish(&mut self) {
        self.current = None;
        self.state.is_speaking = false;
        self.state.is_paused = false;
    }
}

impl Drop for SpeechController {
    fn drop(&mut self) {
        self.engine.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
        refuse: Mutex<bool>,
        voices: Vec<Voice>,
    }

    impl SpeechEngine for Recorder {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&self, utterance: &Utterance, _events: super::super::EventSender) -> anyhow::Result<()> {
            if *self.refuse.lock().unwrap() {
                return Err(anyhow::anyhow!("not allowed"));
            }
            self.calls.lock().unwrap().push(format!("speak:{}", utterance.text));
            Ok(())
        }

        fn pause(&self) {
            self.calls.lock().unwrap().push("pause".into());
        }

        fn resume(&self) {
            self.calls.lock().unwrap().push("resume".into());
        }

        fn cancel(&self) {
            self.calls.lock().unwrap().push("cancel".into());
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    fn engine_with_voices() -> Arc<Recorder> {
        Arc::new(Recorder {
            voices: vec![
                Voice::new("Mónica", "es-ES"),
                Voice::new("Samantha", "en-US"),
                Voice::new("Thomas", "fr-FR"),
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_default_voice_chosen_once() {
        let engine = engine_with_voices();
        let mut speech = SpeechController::new(engine);
        assert_eq!(speech.selected_voice(), "Mónica");
        assert_eq!(speech.voices().len(), 2);

        speech.set_selected_voice("Samantha");
        speech.handle_event(SpeechEvent::VoicesChanged);
        assert_eq!(speech.selected_voice(), "Samantha");
    }

    #[test]
    fn test_voice_resolution_prefers_exact_name() {
        let engine = engine_with_voices();
        let mut speech = SpeechController::new(engine);
        speech.set_selected_voice("Samantha");
        assert_eq!(speech.resolve_voice(SpeechLang::Es).unwrap().name, "Samantha");

        speech.set_selected_voice("Nobody");
        assert_eq!(speech.resolve_voice(SpeechLang::Es).unwrap().name, "Mónica");
        assert_eq!(speech.resolve_voice(SpeechLang::En).unwrap().name, "Samantha");
    }

    #[test]
    fn test_pause_resume_guards() {
        let engine = engine_with_voices();
        let mut speech = SpeechController::new(engine.clone());

        speech.pause();
        assert!(!speech.is_paused());
        speech.resume();
        assert!(engine.calls.lock().unwrap().is_empty());

        speech.speak("hola", SpeechLang::Es);
        speech.pause();
        speech.pause();
        assert!(speech.is_paused() && speech.is_speaking());
        speech.resume();
        assert!(!speech.is_paused());

        let calls = engine.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["cancel", "speak:hola", "pause", "resume"]);
    }

    #[test]
    fn test_rejected_start_rolls_back() {
        let engine = engine_with_voices();
        *engine.refuse.lock().unwrap() = true;
        let mut speech = SpeechController::new(engine);

        speech.speak("blocked", SpeechLang::En);
        assert!(!speech.is_speaking());
        assert!(speech.active_utterance().is_none());
    }

    #[test]
    fn test_stale_events_are_ignored() {
        let engine = engine_with_voices();
        let mut speech = SpeechController::new(engine);

        speech.speak("first", SpeechLang::En);
        let first = speech.active_utterance().unwrap();
        speech.speak("second", SpeechLang::En);

        speech.handle_event(SpeechEvent::Ended(first));
        assert!(speech.is_speaking());

        let second = speech.active_utterance().unwrap();
        speech.handle_event(SpeechEvent::Ended(second));
        assert!(!speech.is_speaking());
    }

    #[test]
    fn test_rate_is_clamped() {
        let mut speech = SpeechController::new(engine_with_voices());
        speech.set_speech_rate(5.0);
        assert_eq!(speech.speech_rate(), 2.0);
        speech.set_speech_rate(0.0);
        assert_eq!(speech.speech_rate(), 0.5);
    }
}
