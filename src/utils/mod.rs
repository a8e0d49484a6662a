//! Utility functions

pub mod encoding;
pub mod paths;

pub use encoding::normalize_bom;
pub use paths::format_from_path;
