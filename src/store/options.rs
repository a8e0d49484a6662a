//! Store options

use serde::Deserialize;

use crate::codec::{normalize_format, JSON};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Expand `${NAME}` / `${NAME|default}` markers in string values.
    pub parse_env: bool,
    /// Reject `set` calls.
    pub readonly: bool,
    /// Format used by `write_to`.
    pub dump_format: String,
    /// Format assumed for files without an extension.
    pub read_format: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parse_env: false,
            readonly: false,
            dump_format: JSON.to_string(),
            read_format: JSON.to_string(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_env(mut self, enabled: bool) -> Self {
        self.parse_env = enabled;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn dump_format(mut self, format: impl Into<String>) -> Self {
        self.dump_format = format.into();
        self
    }

    pub fn read_format(mut self, format: impl Into<String>) -> Self {
        self.read_format = format.into();
        self
    }

    /// Empty formats fall back to JSON; `yml` is stored as `yaml`.
    pub(crate) fn normalized(mut self) -> Self {
        self.dump_format = normalize_or_json(&self.dump_format);
        self.read_format = normalize_or_json(&self.read_format);
        self
    }
}

fn normalize_or_json(format: &str) -> String {
    let format = format.trim();
    if format.is_empty() {
        JSON.to_string()
    } else {
        normalize_format(format).to_string()
    }
}
