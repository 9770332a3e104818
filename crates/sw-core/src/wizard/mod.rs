//! Wizard domain module.
//!
//! This module defines the step enum and the pure navigation state machine.

pub mod state_machine;
pub mod step;

pub use state_machine::{WizardAction, WizardEvent, WizardState, WizardStateMachine};
pub use step::WizardStep;
