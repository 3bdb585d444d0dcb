//! Slide deck loading and validation

use super::Slide;
use crate::error::{PrepError, PrepResult};
use tracing::debug;

const BUILTIN_SLIDES: &str = include_str!("../../content/slides.json");

/// Ordered, validated slide sequence. Never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    /// Load the deck bundled with the application
    pub fn builtin() -> PrepResult<Self> {
        Self::from_json(BUILTIN_SLIDES)
    }

    pub fn from_json(json: &str) -> PrepResult<Self> {
        let slides: Vec<Slide> = serde_json::from_str(json)?;
        Self::from_slides(slides)
    }

    /// Validate that ids are contiguous from 1 and every slide has a duration
    pub fn from_slides(slides: Vec<Slide>) -> PrepResult<Self> {
        if slides.is_empty() {
            return Err(PrepError::Content("deck has no slides".to_string()));
        }

        for (idx, slide) in slides.iter().enumerate() {
            let expected = idx as u32 + 1;
            if slide.id != expected {
                return Err(PrepError::Content(format!(
                    "slide at position {} has id {}",
                    expected, slide.id
                )));
            }
            if slide.estimated_time == 0 {
                return Err(PrepError::Content(format!(
                    "slide {} has no estimated time",
                    slide.id
                )));
            }
        }

        debug!("Loaded deck with {} slides", slides.len());
        Ok(Self { slides })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Total slide count (N)
    pub fn total_slides(&self) -> u32 {
        self.slides.len() as u32
    }

    pub fn get(&self, id: u32) -> Option<&Slide> {
        let idx = id.checked_sub(1)? as usize;
        self.slides.get(idx)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.title.as_str()).collect()
    }

    /// Sum of every slide's estimated minutes
    pub fn total_duration(&self) -> u32 {
        self.slides.iter().map(|s| s.estimated_time).sum()
    }

    /// Minutes left once `current` has been presented
    pub fn time_after(&self, current: u32) -> u32 {
        self.slides
            .iter()
            .skip(current as usize)
            .map(|s| s.estimated_time)
            .sum()
    }
}
