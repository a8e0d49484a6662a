//! Loading sources into the store
//!
//! Bytes are read and decoded without holding the store lock; only the
//! merge into the tree runs under the write lock.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::Store;
use crate::error::{Error, Result};
use crate::tree::{self, path::top_level_keys, ConfigValue};
use crate::utils::{format_from_path, normalize_bom};

impl Store {
    /// Load files in order, inferring each format from the file extension.
    /// A missing file is an error.
    pub fn load_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        for path in paths {
            self.load_file(path.as_ref(), false)?;
        }
        Ok(())
    }

    /// Like `load_files`, but missing files are skipped.
    pub fn load_exists<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        for path in paths {
            self.load_file(path.as_ref(), true)?;
        }
        Ok(())
    }

    fn load_file(&self, path: &Path, only_existing: bool) -> Result<()> {
        let content = match fs::read(path) {
            Ok(content) => normalize_bom(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if only_existing {
                    tracing::warn!(store = %self.name, path = %path.display(), "skipping missing config file");
                    return Ok(());
                }
                return Err(Error::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let format = format_from_path(path, &self.read().options.read_format);
        let incoming = self.decode(&format, &content)?;
        self.merge_in(incoming, Some(path.to_path_buf()), &format)
    }

    /// Decode and merge in-memory sources of one format, in order.
    pub fn load_sources<B: AsRef<[u8]>>(&self, format: &str, sources: &[B]) -> Result<()> {
        for source in sources {
            let incoming = self.decode(format, source.as_ref())?;
            self.merge_in(incoming, None, format)?;
        }
        Ok(())
    }

    /// Merge already-structured data, e.g. a serializable struct or map.
    pub fn load_data<T: Serialize + ?Sized>(&self, data: &T) -> Result<()> {
        let incoming = ConfigValue::from_serializable(data)
            .map_err(|e| Error::Merge(format!("data is not representable as a tree: {e}")))?;
        self.merge_in(incoming, None, "data")
    }

    /// Merge a tree node directly.
    pub fn load_value(&self, value: ConfigValue) -> Result<()> {
        self.merge_in(value, None, "data")
    }

    fn decode(&self, format: &str, blob: &[u8]) -> Result<ConfigValue> {
        let decoder = self.decoder(format)?;
        let decoded = decoder(blob)?;
        // An empty document decodes to null; treat it as an empty mapping.
        if decoded == ConfigValue::Null {
            return Ok(ConfigValue::empty_mapping());
        }
        Ok(decoded)
    }

    fn merge_in(&self, incoming: ConfigValue, file: Option<PathBuf>, source: &str) -> Result<()> {
        let keys = top_level_keys(&incoming);
        let mut state = self.write();
        tree::merge(&mut state.data, incoming)?;
        state.invalidate_caches();

        match file {
            Some(file) => {
                tracing::debug!(store = %self.name, format = source, path = %file.display(), keys, "loaded config file");
                state.loaded_files.push(file);
            }
            None => tracing::debug!(store = %self.name, source, keys, "merged config source"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_sources_merges_in_order() {
        let store = Store::new("load");
        store
            .load_sources("json", &[r#"{"a": {"x": 1}, "k": 1}"#, r#"{"a": {"y": 2}, "k": 2}"#])
            .unwrap();
        assert_eq!(store.data(), ConfigValue::from(json!({"a": {"x": 1, "y": 2}, "k": 2})));
    }

    #[test]
    fn test_load_sources_unregistered_format() {
        let store = Store::new("load");
        let err = store.load_sources("toml", &["a = 1"]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref f) if f == "toml"));
    }

    #[test]
    fn test_load_sources_malformed_keeps_previous_data() {
        let store = Store::new("load");
        store.load_sources("json", &[r#"{"a": 1}"#]).unwrap();
        let err = store.load_sources("json", &["{not json"]).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(store.get_int("a"), Some(1));
    }

    #[test]
    fn test_load_sources_non_mapping_root_is_merge_error() {
        let store = Store::with_standard_codecs("load");
        store.load_sources("yaml", &["a: 1"]).unwrap();
        let err = store.load_sources("yaml", &["- 1\n- 2\n"]).unwrap_err();
        assert!(matches!(err, Error::Merge(_)));
        assert_eq!(store.get_int("a"), Some(1));
    }

    #[test]
    fn test_empty_document_is_empty_mapping() {
        let store = Store::with_standard_codecs("load");
        store.load_sources("yml", &[""]).unwrap();
        assert_eq!(store.data(), ConfigValue::empty_mapping());
    }

    #[test]
    fn test_load_data_struct_and_scalar() {
        #[derive(Serialize)]
        struct Server {
            host: &'static str,
            port: u16,
        }

        #[derive(Serialize)]
        struct Overrides {
            server: Server,
        }

        let store = Store::new("load");
        store.load_data(&json!({"server": {"host": "a", "tls": true}})).unwrap();
        store.load_data(&Overrides { server: Server { host: "b", port: 80 } }).unwrap();
        assert_eq!(store.get_string("server.host"), Some("b".to_string()));
        assert_eq!(store.get_int("server.port"), Some(80));
        assert_eq!(store.get_bool("server.tls"), Some(true));

        assert!(matches!(store.load_data(&42), Err(Error::Merge(_))));
    }

    #[test]
    fn test_load_value_merges_mapping_and_rejects_non_mapping() {
        let store = Store::new("load");
        store.load_value(ConfigValue::from(json!({"db": {"host": "a"}}))).unwrap();
        store.load_value(ConfigValue::from(json!({"db": {"port": 5432}}))).unwrap();
        assert_eq!(store.get("db"), Some(ConfigValue::from(json!({"host": "a", "port": 5432}))));

        assert!(matches!(store.load_value(ConfigValue::Null), Err(Error::Merge(_))));
        assert!(matches!(store.load_value(ConfigValue::from(vec![1, 2])), Err(Error::Merge(_))));
        assert_eq!(store.get_string("db.host"), Some("a".to_string()));
        assert_eq!(store.get_int("db.port"), Some(5432));
    }

    #[test]
    fn test_load_invalidates_caches() {
        let store = Store::new("load");
        store.load_sources("json", &[r#"{"k": 1}"#]).unwrap();
        assert_eq!(store.get_int("k"), Some(1));
        store.load_sources("json", &[r#"{"k": 2}"#]).unwrap();
        assert_eq!(store.get_int("k"), Some(2));
    }
}
