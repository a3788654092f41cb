//! Forwards selection reports to a remote inference endpoint and parses the
//! structured critique it answers with.
pub mod client;
pub mod extract;
pub mod prompt;
pub mod providers;
pub mod service;
pub mod types;

pub use service::Reviewer;
pub use types::ReviewOutcome;
