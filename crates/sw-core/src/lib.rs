//! # sw-core
//!
//! Core domain models and business rules for the social support application wizard.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod application;
pub mod assist;
pub mod config;
pub mod persistence;
pub mod ports;
pub mod submission;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use application::{
    ApplicationData, FamilyFinancialInfo, FieldError, FieldErrors, PersonalInfo,
    SituationDescriptions, StepRecord,
};
pub use assist::{AiAssistanceState, SuggestionError, SuggestionField};
pub use config::AppConfig;
pub use persistence::StorageNamespace;
pub use submission::{SubmissionError, SubmissionFailurePolicy, SubmissionReceipt};
pub use wizard::{WizardAction, WizardEvent, WizardState, WizardStateMachine, WizardStep};
