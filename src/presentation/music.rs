//! Background music preferences
//!
//! Volume, mute and track choice survive restarts through the
//! [`PreferenceStore`].

use crate::preferences::PreferenceStore;
use tracing::debug;

pub const VOLUME_KEY: &str = "presentation-music-volume";
pub const MUTED_KEY: &str = "presentation-music-muted";
pub const TRACK_KEY: &str = "presentation-music-track";

pub const DEFAULT_VOLUME: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub id: &'static str,
    pub name: &'static str,
}

pub const TRACKS: [Track; 3] = [
    Track {
        id: "1",
        name: "Ambient Focus",
    },
    Track {
        id: "2",
        name: "Calm Study",
    },
    Track {
        id: "3",
        name: "Soft Background",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct MusicPlayer {
    volume: f32,
    muted: bool,
    track_index: usize,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
            track_index: 0,
        }
    }
}

impl MusicPlayer {
    /// Restore saved preferences; unparsable values keep their defaults
    pub fn load(prefs: &PreferenceStore) -> Self {
        let mut player = Self::default();

        if let Some(volume) = prefs
            .get(VOLUME_KEY)
            .and_then(|v| v.parse::<f32>().ok())
            .filter(|v| v.is_finite())
        {
            player.volume = volume.clamp(0.0, 1.0);
        }
        if let Some(muted) = prefs.get(MUTED_KEY) {
            player.muted = muted == "true";
        }
        if let Some(track) = prefs.get(TRACK_KEY).and_then(|v| v.parse::<usize>().ok()) {
            if track < TRACKS.len() {
                player.track_index = track;
            }
        }

        debug!(
            "Music prefs: volume={} muted={} track={}",
            player.volume, player.muted, player.track_index
        );
        player
    }

    pub fn persist(&self, prefs: &mut PreferenceStore) {
        prefs.set(VOLUME_KEY, self.volume);
        prefs.set(MUTED_KEY, self.muted);
        prefs.set(TRACK_KEY, self.track_index);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn current_track(&self) -> &'static Track {
        &TRACKS[self.track_index]
    }

    /// Volume actually applied to the output
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Moving the slider above zero unmutes
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        if self.volume > 0.0 {
            self.muted = false;
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn select_track(&mut self, index: usize) {
        if index < TRACKS.len() {
            self.track_index = index;
        }
    }
}
