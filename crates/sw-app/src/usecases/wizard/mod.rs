mod coordinator;

pub use coordinator::{WizardCoordinator, WizardOptions};
