//! Step form state: values, visible errors, dirty/touched tracking and
//! debounced persistence of every change.

mod controller;
mod persistence_adapter;

pub use controller::{FormError, StepForm, StepFormController};
pub use persistence_adapter::{PersistenceAdapter, DEFAULT_DEBOUNCE};
