pub mod http;
pub mod storage;
pub mod time;

pub use http::{HttpSubmissionClient, HttpSuggestionClient};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;
