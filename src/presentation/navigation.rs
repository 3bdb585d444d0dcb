//! Slide navigation state machine
//!
//! Holds the current slide (always within `[1, N]`) and the transient modal.
//! Every index change is mirrored into the [`Location`] with replace
//! semantics; out-of-range requests are ignored rather than clamped.

use std::sync::Arc;
use tracing::debug;

use super::location::{resolve_initial_slide, Location};
use crate::content::{Deck, ModalContent, Slide};

/// A request to move through the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Previous,
    Next,
    Jump(u32),
    First,
    Last,
}

pub struct Navigator<L: Location> {
    deck: Arc<Deck>,
    current: u32,
    open_modal: Option<ModalContent>,
    location: L,
}

impl<L: Location> Navigator<L> {
    /// Resolve the starting slide from the location and sync it back
    pub fn mount(deck: Arc<Deck>, mut location: L) -> Self {
        let raw = location.slide_param();
        let current = resolve_initial_slide(raw.as_deref(), deck.total_slides());
        debug!("Mounted presentation at slide {} (param {:?})", current, raw);
        location.replace_slide_param(current);

        Self {
            deck,
            current,
            open_modal: None,
            location,
        }
    }

    pub fn deck(&self) -> &Arc<Deck> {
        &self.deck
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn current_slide(&self) -> u32 {
        self.current
    }

    pub fn total_slides(&self) -> u32 {
        self.deck.total_slides()
    }

    /// Content of the current slide
    pub fn current(&self) -> &Slide {
        // Deck ids are contiguous and `current` stays in range
        &self.deck.slides()[(self.current - 1) as usize]
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.total_slides()
    }

    /// Returns true when the slide changed
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.set_current(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.set_current(self.current - 1)
    }

    /// Go to slide `k`; ignored unless `1 <= k <= N`
    pub fn jump(&mut self, k: u32) -> bool {
        if k < 1 || k > self.total_slides() {
            debug!("Ignoring jump to slide {}", k);
            return false;
        }
        self.set_current(k)
    }

    pub fn apply(&mut self, intent: NavIntent) -> bool {
        match intent {
            NavIntent::Previous => self.previous(),
            NavIntent::Next => self.next(),
            NavIntent::Jump(k) => self.jump(k),
            NavIntent::First => self.jump(1),
            NavIntent::Last => self.jump(self.total_slides()),
        }
    }

    pub fn progress_percent(&self) -> f64 {
        100.0 * f64::from(self.current) / f64::from(self.total_slides())
    }

    /// Minutes of the slides strictly after the current one
    pub fn estimated_time_remaining(&self) -> u32 {
        self.deck.time_after(self.current)
    }

    pub fn open_modal(&mut self, modal: ModalContent) {
        debug!("Opening modal '{}'", modal.title);
        self.open_modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.open_modal = None;
    }

    pub fn active_modal(&self) -> Option<&ModalContent> {
        self.open_modal.as_ref()
    }

    pub fn modal_open(&self) -> bool {
        self.open_modal.is_some()
    }

    fn set_current(&mut self, k: u32) -> bool {
        if k == self.current {
            return false;
        }
        self.current = k;
        self.location.replace_slide_param(k);
        debug!("Slide {}/{}", k, self.total_slides());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::location::QueryLocation;

    fn navigator(url: &str) -> Navigator<QueryLocation> {
        let deck = Arc::new(Deck::builtin().unwrap());
        Navigator::mount(deck, QueryLocation::parse(url).unwrap())
    }

    #[test]
    fn test_mount_reads_and_writes_param() {
        let nav = navigator("app://aem-prep/intro?slide=4");
        assert_eq!(nav.current_slide(), 4);

        let nav = navigator("app://aem-prep/intro?slide=banana");
        assert_eq!(nav.current_slide(), 1);
        assert_eq!(nav.location().slide_param().as_deref(), Some("1"));
    }

    #[test]
    fn test_boundaries_are_idempotent() {
        let mut nav = navigator("app://aem-prep/intro");
        assert!(!nav.previous());
        assert_eq!(nav.current_slide(), 1);

        assert!(nav.jump(18));
        assert!(!nav.next());
        assert!(!nav.next());
        assert_eq!(nav.current_slide(), 18);
    }

    #[test]
    fn test_jump_range() {
        let mut nav = navigator("app://aem-prep/intro");
        for k in 1..=18 {
            nav.jump(k);
            assert_eq!(nav.current_slide(), k);
        }
        nav.jump(6);
        assert!(!nav.jump(0));
        assert!(!nav.jump(19));
        assert_eq!(nav.current_slide(), 6);
    }

    #[test]
    fn test_progress_and_remaining() {
        let mut nav = navigator("app://aem-prep/intro");
        assert!((nav.progress_percent() - 100.0 / 18.0).abs() < 1e-9);
        assert_eq!(nav.estimated_time_remaining(), 44);

        nav.apply(NavIntent::Last);
        assert_eq!(nav.progress_percent(), 100.0);
        assert_eq!(nav.estimated_time_remaining(), 0);
    }

    #[test]
    fn test_modal_is_independent_of_slide() {
        let mut nav = navigator("app://aem-prep/intro?slide=3");
        let modal = nav.current().modals.first().cloned().unwrap_or_else(|| ModalContent {
            title: "T".into(),
            content: "C".into(),
            kind: crate::content::ModalKind::Text,
            data: None,
        });
        nav.open_modal(modal);
        assert!(nav.modal_open());
        nav.next();
        assert!(nav.modal_open());
        nav.close_modal();
        assert!(nav.active_modal().is_none());
    }
}
