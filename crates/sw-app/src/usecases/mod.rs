//! Business logic use cases
//!
//! form → one controller per wizard step, each backed by a debounced
//! persistence adapter.
//! wizard → navigation and the restore / discard decision across the steps.
//! submission / assist → network operations that read from (and write back
//! into) the wizard.

pub mod assist;
pub mod form;
pub mod submission;
pub mod wizard;
