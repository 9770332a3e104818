//! Support Wizard
//!
//! Headless core of a social support application wizard: step forms with
//! debounced local persistence, restore/discard of an earlier session,
//! submission and AI writing assistance.

pub mod bootstrap;

pub use bootstrap::{start, Settings, WizardSession};
