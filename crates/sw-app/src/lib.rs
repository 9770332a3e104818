//! Support Wizard Application Layer
//!
//! Form controllers, the wizard coordinator and the submission / writing
//! assistance use cases. Everything here talks to the outside world through
//! the ports declared in `sw-core`.

pub mod debounce;
pub mod usecases;

pub use usecases::assist::{AcceptedSuggestion, AiSuggestionCoordinator};
pub use usecases::form::{FormError, PersistenceAdapter, StepForm, StepFormController};
pub use usecases::submission::{SubmitApplication, SubmitError};
pub use usecases::wizard::{WizardCoordinator, WizardOptions};
