//! In-memory configuration tree
//!
//! Holds the node type plus the two algorithms that operate on whole trees:
//! deep merge (override semantics) and dotted-path resolution/assignment.

pub mod merge;
pub mod path;
pub mod value;

pub use merge::merge;
pub use path::{assign, resolve};
pub use value::{ConfigValue, Mapping};
