//! Mock Speech Engine for Testing
//!
//! Records every call so tests can verify the controller's protocol, and
//! keeps the event sender of the last utterance to play platform callbacks.

use aem_prep::speech::{EventSender, SpeechEngine, SpeechEvent, Utterance, UtteranceId, Voice};
use anyhow::Result;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Speak(Utterance),
    Pause,
    Resume,
    Cancel,
}

/// Mock engine that records calls instead of producing audio
#[derive(Debug)]
pub struct MockSpeechEngine {
    pub calls: Arc<Mutex<Vec<Call>>>,
    /// Simulate the platform refusing to start
    pub should_fail: Arc<Mutex<bool>>,
    pub voices: Arc<Mutex<Vec<Voice>>>,
    events: Arc<Mutex<Option<EventSender>>>,
}

impl MockSpeechEngine {
    pub fn new() -> Self {
        Self::with_voices(vec![
            Voice::new("Samantha", "en-US"),
            Voice::new("Daniel", "en-GB"),
            Voice::new("Mónica", "es-ES"),
            Voice::new("Amélie", "fr-CA"),
        ])
    }

    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            voices: Arc::new(Mutex::new(voices)),
            events: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Speak(u) => Some(u),
                _ => None,
            })
            .collect()
    }

    /// Report a platform event for `id`, as the engine would
    pub fn emit(&self, event: SpeechEvent) {
        if let Some(tx) = self.events.lock().unwrap().as_ref() {
            tx.send(event).unwrap();
        }
    }

    pub fn finish(&self, id: UtteranceId) {
        self.emit(SpeechEvent::Ended(id));
    }
}

impl Default for MockSpeechEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for MockSpeechEngine {
    fn voices(&self) -> Vec<Voice> {
        self.voices.lock().unwrap().clone()
    }

    fn speak(&self, utterance: &Utterance, events: EventSender) -> Result<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock speech failure"));
        }
        self.calls.lock().unwrap().push(Call::Speak(utterance.clone()));
        let _ = events.send(SpeechEvent::Started(utterance.id));
        *self.events.lock().unwrap() = Some(events);
        Ok(())
    }

    fn pause(&self) {
        self.calls.lock().unwrap().push(Call::Pause);
    }

    fn resume(&self) {
        self.calls.lock().unwrap().push(Call::Resume);
    }

    fn cancel(&self) {
        self.calls.lock().unwrap().push(Call::Cancel);
    }

    fn name(&self) -> &str {
        "mock"
    }
}
