//! State types for the AEM Prep GUI
//!
//! Enums and small structs for view state.

/// Current tab/view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Presentation,
    Translator,
    Topics,
}

/// Presentation-only view state that resets with the slide
#[derive(Debug, Clone, Default)]
pub struct SlideViewState {
    pub toggles: crate::presentation::SectionToggles,
    /// Diagram index and node id under the pointer
    pub hovered_node: Option<(usize, String)>,
    /// Slide overview sheet open
    pub show_overview: bool,
}

impl SlideViewState {
    pub fn reset(&mut self) {
        self.toggles.clear();
        self.hovered_node = None;
    }

    /// Hovered node id, if it belongs to diagram `index`
    pub fn hovered_in(&self, index: usize) -> Option<&str> {
        match &self.hovered_node {
            Some((i, id)) if *i == index => Some(id.as_str()),
            _ => None,
        }
    }
}
