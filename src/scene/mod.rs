pub mod snapshot;
pub mod traits;
pub mod types;
