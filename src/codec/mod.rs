//! Format codecs
//!
//! A registry maps a format identifier to a decoder (bytes to tree) and an
//! encoder (tree to bytes). `yml` and `yaml` always share one slot.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::tree::ConfigValue;

pub mod formats;

pub use formats::{json_decode, json_encode, toml_decode, toml_encode, yaml_decode, yaml_encode};

pub const JSON: &str = "json";
pub const YAML: &str = "yaml";
pub const YML: &str = "yml";
pub const TOML: &str = "toml";

pub type Decoder = Arc<dyn Fn(&[u8]) -> Result<ConfigValue> + Send + Sync>;
pub type Encoder = Arc<dyn Fn(&ConfigValue) -> Result<Vec<u8>> + Send + Sync>;

/// Canonical name of a format: `yml` becomes `yaml`, everything else is kept as-is.
pub fn normalize_format(format: &str) -> &str {
    if format == YML {
        YAML
    } else {
        format
    }
}

#[derive(Clone)]
pub struct CodecRegistry {
    decoders: HashMap<String, Decoder>,
    encoders: HashMap<String, Encoder>,
}

impl CodecRegistry {
    /// A registry with only the JSON codec registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_decoder(JSON, json_decode);
        registry.register_encoder(JSON, json_encode);
        registry
    }

    pub fn empty() -> Self {
        Self { decoders: HashMap::new(), encoders: HashMap::new() }
    }

    /// JSON, YAML and TOML all registered.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register_decoder(YAML, yaml_decode);
        registry.register_encoder(YAML, yaml_encode);
        registry.register_decoder(TOML, toml_decode);
        registry.register_encoder(TOML, toml_encode);
        registry
    }

    pub fn register_decoder<F>(&mut self, format: &str, decoder: F)
    where
        F: Fn(&[u8]) -> Result<ConfigValue> + Send + Sync + 'static,
    {
        self.insert_decoder(format, Arc::new(decoder));
    }

    /// Register an already shared decoder.
    pub fn insert_decoder(&mut self, format: &str, decoder: Decoder) {
        self.decoders.insert(normalize_format(format).to_string(), decoder);
    }

    pub fn register_encoder<F>(&mut self, format: &str, encoder: F)
    where
        F: Fn(&ConfigValue) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        self.insert_encoder(format, Arc::new(encoder));
    }

    pub fn insert_encoder(&mut self, format: &str, encoder: Encoder) {
        self.encoders.insert(normalize_format(format).to_string(), encoder);
    }

    pub fn has_decoder(&self, format: &str) -> bool {
        self.decoders.contains_key(normalize_format(format))
    }

    pub fn has_encoder(&self, format: &str) -> bool {
        self.encoders.contains_key(normalize_format(format))
    }

    pub fn decoder(&self, format: &str) -> Option<Decoder> {
        self.decoders.get(normalize_format(format)).cloned()
    }

    pub fn encoder(&self, format: &str) -> Option<Encoder> {
        self.encoders.get(normalize_format(format)).cloned()
    }

    /// Registered decoder formats, sorted.
    pub fn decoder_formats(&self) -> Vec<String> {
        let mut formats: Vec<String> = self.decoders.keys().cloned().collect();
        formats.sort();
        formats
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut encoders: Vec<&String> = self.encoders.keys().collect();
        encoders.sort();
        f.debug_struct("CodecRegistry")
            .field("decoders", &self.decoder_formats())
            .field("encoders", &encoders)
            .finish()
    }
}
