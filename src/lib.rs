//! config-store: layered runtime configuration
//!
//! Loads JSON, YAML and TOML sources, deep-merges them into one tree and
//! serves typed, cached reads by dotted path, with optional `${ENV}`
//! interpolation of string values.
//!
//! ```
//! use config_store::Store;
//!
//! let store = Store::with_standard_codecs("app");
//! store.load_sources("yaml", &["db:\n  hosts: [a, b]\n  port: 5432\n"]).unwrap();
//! store.load_sources("json", &[r#"{"db": {"port": "6432"}}"#]).unwrap();
//!
//! assert_eq!(store.get_int("db.port"), Some(6432));
//! assert_eq!(store.string_or("db.hosts.1", "none"), "b");
//! ```

pub mod access;
pub mod codec;
pub mod error;
pub mod store;
pub mod tree;
pub mod utils;

pub use codec::CodecRegistry;
pub use error::{Error, Result};
pub use store::{Options, Store};
pub use tree::ConfigValue;
