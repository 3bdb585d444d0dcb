//! AEM Prep Library
//!
//! Core modules for the AEM certification study application: slide deck,
//! presentation state, speech and translation.

pub mod config;
pub mod content;
pub mod error;
pub mod gui;
pub mod preferences;
pub mod presentation;
pub mod speech;
pub mod translation;
