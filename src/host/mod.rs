//! Message-passing glue between the host UI and the describe/review pipeline.
pub mod messages;
pub mod session;

pub use messages::{HostEvent, HostRequest};
pub use session::{Session, SessionHandle};
