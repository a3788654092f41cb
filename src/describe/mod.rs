//! Textual description of a host selection.
//!
//! Every function here is a pure function of its input tree: no I/O and no
//! hidden state, so reports are deterministic for a given snapshot.
pub mod element;
pub mod format;
pub mod hierarchy;
pub mod selection;

pub use element::describe_element;
pub use hierarchy::describe_hierarchy;
pub use selection::{describe_selection, Report, EMPTY_SELECTION};
