//! The configuration store
//!
//! A `Store` owns the merged tree, the codec registry, the typed caches and
//! the options. One readers-writer lock guards all of it: typed reads share
//! the lock, every mutation (load, set, clear, option change) takes it
//! exclusively and drops the caches.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::access::TypedCaches;
use crate::codec::{CodecRegistry, Decoder, Encoder};
use crate::error::{Error, Result};
use crate::tree::{self, ConfigValue};

mod load;
pub mod options;
mod read;

pub use options::Options;

#[derive(Debug)]
pub struct Store {
    name: String,
    state: RwLock<State>,
}

#[derive(Debug)]
struct State {
    data: ConfigValue,
    options: Options,
    codecs: CodecRegistry,
    caches: Mutex<TypedCaches>,
    loaded_files: Vec<PathBuf>,
}

impl State {
    fn caches(&self) -> MutexGuard<'_, TypedCaches> {
        self.caches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn invalidate_caches(&mut self) {
        let caches = self.caches.get_mut().unwrap_or_else(PoisonError::into_inner);
        if !caches.is_empty() {
            tracing::debug!(entries = caches.len(), "invalidating typed caches");
        }
        caches.clear();
    }
}

impl Store {
    /// An empty store with only the JSON codec registered.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_codecs(name, CodecRegistry::new())
    }

    /// An empty store with JSON, YAML and TOML registered.
    pub fn with_standard_codecs(name: impl Into<String>) -> Self {
        Self::with_codecs(name, CodecRegistry::standard())
    }

    pub fn with_codecs(name: impl Into<String>, codecs: CodecRegistry) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(State {
                data: ConfigValue::empty_mapping(),
                options: Options::default(),
                codecs,
                caches: Mutex::new(TypedCaches::default()),
                loaded_files: Vec::new(),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> Options {
        self.read().options.clone()
    }

    /// Replace the options. Cached strings depend on `parse_env`, so the
    /// caches are dropped.
    pub fn set_options(&self, options: Options) {
        let mut state = self.write();
        state.options = options.normalized();
        state.invalidate_caches();
    }

    pub fn set_readonly(&self, readonly: bool) {
        self.write().options.readonly = readonly;
    }

    /// A snapshot of the whole tree.
    pub fn data(&self) -> ConfigValue {
        self.read().data.clone()
    }

    /// Files merged so far, in load order.
    pub fn loaded_files(&self) -> Vec<PathBuf> {
        self.read().loaded_files.clone()
    }

    pub fn set_decoder<F>(&self, format: &str, decoder: F)
    where
        F: Fn(&[u8]) -> Result<ConfigValue> + Send + Sync + 'static,
    {
        self.write().codecs.register_decoder(format, decoder);
    }

    pub fn set_encoder<F>(&self, format: &str, encoder: F)
    where
        F: Fn(&ConfigValue) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        self.write().codecs.register_encoder(format, encoder);
    }

    /// Register a decoder and an encoder for one format.
    pub fn set_driver<D, E>(&self, format: &str, decoder: D, encoder: E)
    where
        D: Fn(&[u8]) -> Result<ConfigValue> + Send + Sync + 'static,
        E: Fn(&ConfigValue) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        let mut state = self.write();
        state.codecs.register_decoder(format, decoder);
        state.codecs.register_encoder(format, encoder);
    }

    /// Register several decoders at once; each `yml` entry lands in the `yaml` slot.
    pub fn set_decoders<I, K>(&self, decoders: I)
    where
        I: IntoIterator<Item = (K, Decoder)>,
        K: AsRef<str>,
    {
        let mut state = self.write();
        for (format, decoder) in decoders {
            state.codecs.insert_decoder(format.as_ref(), decoder);
        }
    }

    pub fn set_encoders<I, K>(&self, encoders: I)
    where
        I: IntoIterator<Item = (K, Encoder)>,
        K: AsRef<str>,
    {
        let mut state = self.write();
        for (format, encoder) in encoders {
            state.codecs.insert_encoder(format.as_ref(), encoder);
        }
    }

    pub fn has_decoder(&self, format: &str) -> bool {
        self.read().codecs.has_decoder(format)
    }

    pub fn has_encoder(&self, format: &str) -> bool {
        self.read().codecs.has_encoder(format)
    }

    fn decoder(&self, format: &str) -> Result<Decoder> {
        self.read().codecs.decoder(format).ok_or_else(|| {
            tracing::error!(store = %self.name, format, "no decoder registered");
            Error::UnsupportedFormat(format.to_string())
        })
    }

    fn encoder(&self, format: &str) -> Result<Encoder> {
        self.read()
            .codecs
            .encoder(format)
            .ok_or_else(|| Error::UnsupportedFormat(format.to_string()))
    }

    /// Write `value` at `path`, creating intermediate mappings.
    pub fn set(&self, path: &str, value: impl Into<ConfigValue>) -> Result<()> {
        let mut state = self.write();
        if state.options.readonly {
            return Err(Error::Readonly(self.name.clone()));
        }

        tree::assign(&mut state.data, path, value.into())?;
        state.invalidate_caches();
        tracing::debug!(store = %self.name, path, "value set");
        Ok(())
    }

    /// Encode the tree with the configured dump format.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> Result<usize> {
        let format = self.read().options.dump_format.clone();
        self.dump_to(out, &format)
    }

    /// Encode the tree as `format` and write it followed by a newline.
    /// Returns the number of bytes written.
    pub fn dump_to<W: Write + ?Sized>(&self, out: &mut W, format: &str) -> Result<usize> {
        let encoder = self.encoder(format)?;
        let mut encoded = {
            let state = self.read();
            encoder(&state.data)?
        };
        encoded.push(b'\n');

        out.write_all(&encoded)?;
        Ok(encoded.len())
    }

    /// Encode the tree as `format` into a string.
    pub fn dump_string(&self, format: &str) -> Result<String> {
        let mut buf = Vec::new();
        self.dump_to(&mut buf, format)?;
        String::from_utf8(buf).map_err(|e| Error::encode(format, e))
    }

    /// Reset the tree, the caches and the loaded-file list.
    pub fn clear_all(&self) {
        let mut state = self.write();
        state.data = ConfigValue::empty_mapping();
        state.invalidate_caches();
        state.loaded_files.clear();
    }

    /// Reset the tree only. Caches are dropped too since they derive from it.
    pub fn clear_data(&self) {
        let mut state = self.write();
        state.data = ConfigValue::empty_mapping();
        state.invalidate_caches();
    }

    pub fn clear_caches(&self) {
        self.write().invalidate_caches();
    }

    /// Number of entries across all typed caches.
    pub fn cached_entries(&self) -> usize {
        self.read().caches().len()
    }
}
