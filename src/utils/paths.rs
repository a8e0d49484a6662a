//! Path helpers

use std::path::Path;

use crate::codec::normalize_format;

/// Format identifier for a file, derived from its extension.
///
/// The match is case-insensitive and `.yml` maps to `yaml`. Files without
/// an extension use `fallback`.
pub fn format_from_path(path: &Path, fallback: &str) -> String {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    if ext.is_empty() {
        return normalize_format(fallback).to_string();
    }
    normalize_format(&ext).to_string()
}
