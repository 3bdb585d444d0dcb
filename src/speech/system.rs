//! System speech engine driving `espeak-ng` or `spd-say`
//!
//! One child process per utterance. A watcher thread polls the child and
//! reports `Ended`/`Failed` unless the utterance was cancelled first.

use super::{EventSender, SpeechEngine, SpeechEvent, Utterance, UtteranceId, Voice};
use anyhow::Result;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// espeak-ng words per minute at rate 1.0
const ESPEAK_BASE_WPM: f32 = 175.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Espeak,
    SpeechDispatcher,
}

impl Backend {
    fn program(&self) -> &'static str {
        match self {
            Backend::Espeak => "espeak-ng",
            Backend::SpeechDispatcher => "spd-say",
        }
    }

    fn command(&self, utterance: &Utterance) -> Command {
        let mut cmd = Command::new(self.program());
        match self {
            Backend::Espeak => {
                let voice = utterance
                    .voice
                    .as_ref()
                    .map(|v| v.lang.clone())
                    .unwrap_or_else(|| utterance.lang.code().to_string());
                let wpm = (ESPEAK_BASE_WPM * utterance.rate).round() as u32;
                cmd.arg("-v").arg(voice).arg("-s").arg(wpm.to_string());
            }
            Backend::SpeechDispatcher => {
                let rate = (((utterance.rate - 1.0) * 100.0).round() as i32).clamp(-100, 100);
                cmd.arg("-w")
                    .arg("-l")
                    .arg(utterance.lang.code())
                    .arg("-r")
                    .arg(rate.to_string());
                if let Some(voice) = &utterance.voice {
                    cmd.arg("-y").arg(&voice.name);
                }
            }
        }
        // Text may start with '-'
        cmd.arg("--").arg(&utterance.text);
        cmd
    }
}

#[derive(Debug)]
struct Running {
    id: UtteranceId,
    child: Child,
}

#[derive(Debug)]
pub struct SystemEngine {
    backend: Backend,
    running: Arc<Mutex<Option<Running>>>,
}

impl SystemEngine {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            running: Arc::new(Mutex::new(None)),
        }
    }

    /// Prefer espeak-ng, then speech-dispatcher
    pub fn detect() -> Self {
        for backend in [Backend::Espeak, Backend::SpeechDispatcher] {
            let probe = Command::new(backend.program())
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if matches!(probe, Ok(status) if status.success()) {
                info!("🔊 Found {}", backend.program());
                return Self::new(backend);
            }
        }
        warn!("⚠️ No system speech command found (tried espeak-ng, spd-say)");
        Self::new(Backend::Espeak)
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    fn signal(&self, signal: &str) {
        let Ok(guard) = self.running.lock() else {
            return;
        };
        if let Some(running) = guard.as_ref() {
            let pid = running.child.id().to_string();
            if let Err(e) = Command::new("kill").arg(signal).arg(&pid).status() {
                warn!("Failed to send {} to {}: {}", signal, pid, e);
            }
        }
    }
}

impl SpeechEngine for SystemEngine {
    fn voices(&self) -> Vec<Voice> {
        let (flag, parse): (&str, fn(&str) -> Vec<Voice>) = match self.backend {
            Backend::Espeak => ("--voices", parse_espeak_voices),
            Backend::SpeechDispatcher => ("-L", parse_spd_voices),
        };
        match Command::new(self.backend.program()).arg(flag).output() {
            Ok(output) => parse(&String::from_utf8_lossy(&output.stdout)),
            Err(e) => {
                debug!("Voice listing via {} failed: {}", self.backend.program(), e);
                Vec::new()
            }
        }
    }

    fn speak(&self, utterance: &Utterance, events: EventSender) -> Result<()> {
        self.cancel();
        debug!("System speaking: {}", utterance.text);

        let child = self
            .backend
            .command(utterance)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                error!("❌ Failed to spawn {}: {}", self.backend.program(), e);
                anyhow::anyhow!("Failed to spawn {}: {}", self.backend.program(), e)
            })?;

        let id = utterance.id;
        {
            let mut guard = self
                .running
                .lock()
                .map_err(|_| anyhow::anyhow!("speech engine lock poisoned"))?;
            *guard = Some(Running { id, child });
        }
        let _ = events.send(SpeechEvent::Started(id));

        let running = Arc::clone(&self.running);
        std::thread::spawn(move || watch(running, id, events));
        Ok(())
    }

    fn pause(&self) {
        self.signal("-STOP");
    }

    fn resume(&self) {
        self.signal("-CONT");
    }

    fn cancel(&self) {
        let Ok(mut guard) = self.running.lock() else {
            return;
        };
        if let Some(mut running) = guard.take() {
            debug!("Cancelling utterance {}", running.id);
            // A stopped process must be continued before it can die cleanly
            let _ = Command::new("kill")
                .arg("-CONT")
                .arg(running.child.id().to_string())
                .status();
            let _ = running.child.kill();
            let _ = running.child.wait();
        }
    }

    fn name(&self) -> &str {
        self.backend.program()
    }
}

fn watch(running: Arc<Mutex<Option<Running>>>, id: UtteranceId, events: EventSender) {
    loop {
        {
            let Ok(mut guard) = running.lock() else {
                return;
            };
            match guard.as_mut() {
                Some(current) if current.id == id => match current.child.try_wait() {
                    Ok(Some(status)) => {
                        guard.take();
                        let event = if status.success() {
                            SpeechEvent::Ended(id)
                        } else {
                            SpeechEvent::Failed(id, format!("exited with {}", status))
                        };
                        let _ = events.send(event);
                        return;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        guard.take();
                        let _ = events.send(SpeechEvent::Failed(id, e.to_string()));
                        return;
                    }
                },
                // Cancelled or superseded
                _ => return,
            }
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Parse `espeak-ng --voices`: `Pty Language Age/Gender VoiceName File ...`
pub fn parse_espeak_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return None;
            }
            Some(Voice::new(fields[3], fields[1]))
        })
        .collect()
}

/// Parse `spd-say -L`: `NAME LANGUAGE VARIANT`, names may contain spaces
pub fn parse_spd_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.len() {
                0 | 1 => None,
                2 => Some(Voice::new(fields[0], fields[1])),
                n => Some(Voice::new(&fields[..n - 2].join(" "), fields[n - 2])),
            }
        })
        .collect()
}
