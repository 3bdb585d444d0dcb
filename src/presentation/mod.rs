//! Interactive slide presentation
//!
//! Navigation state machine, keyboard contract, URL persistence, rendering
//! and the background music state.

pub mod keyboard;
pub mod location;
pub mod music;
pub mod navigation;
pub mod render;

pub use keyboard::{handle_key, KeyAction, KeyOutcome, NavKey};
pub use location::{Location, QueryLocation, SLIDE_PARAM};
pub use navigation::{NavIntent, Navigator};
pub use render::{Block, SectionToggles};
