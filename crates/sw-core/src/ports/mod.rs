//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the wizard's state logic to remain independent of
//! the browser store, HTTP client and clock it runs against.

mod clock;
pub mod storage;
pub mod submission;
pub mod suggestion;

pub use clock::*;
pub use storage::KeyValueStorePort;
pub use submission::ApplicationSubmissionPort;
pub use suggestion::SuggestionPort;
