//! Typed, cached reads
//!
//! Every `get_*` accessor returns `None` both for a missing path and for a
//! value that cannot be converted; the `*_or` variants substitute a default.

use std::collections::{BTreeMap, HashMap};

use super::{State, Store};
use crate::access::{coerce, interpolate_env, TypedCaches};
use crate::tree::{self, ConfigValue};

impl Store {
    /// Raw node at `path`. The empty path returns the whole tree.
    pub fn get(&self, path: &str) -> Option<ConfigValue> {
        tree::resolve(&self.read().data, path).cloned()
    }

    pub fn exists(&self, path: &str) -> bool {
        tree::resolve(&self.read().data, path).is_some()
    }

    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.cached(path, |c| &mut c.ints, |_, value| coerce::to_int(value))
    }

    pub fn int_or(&self, path: &str, default: i64) -> i64 {
        self.get_int(path).unwrap_or(default)
    }

    /// String value at `path`, with env markers expanded when `parse_env` is on.
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.cached(path, |c| &mut c.strings, |state, value| {
            let text = coerce::to_string(value)?;
            if state.options.parse_env {
                Some(interpolate_env(&text))
            } else {
                Some(text)
            }
        })
    }

    pub fn string_or(&self, path: &str, default: &str) -> String {
        self.get_string(path).unwrap_or_else(|| default.to_string())
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        tree::resolve(&self.read().data, path).and_then(coerce::to_bool)
    }

    pub fn bool_or(&self, path: &str, default: bool) -> bool {
        self.get_bool(path).unwrap_or(default)
    }

    pub fn get_strings(&self, path: &str) -> Option<Vec<String>> {
        self.cached(path, |c| &mut c.string_lists, |_, value| coerce::to_strings(value))
    }

    pub fn strings_or(&self, path: &str, default: &[&str]) -> Vec<String> {
        self.get_strings(path)
            .unwrap_or_else(|| default.iter().map(|s| (*s).to_string()).collect())
    }

    pub fn get_string_map(&self, path: &str) -> Option<BTreeMap<String, String>> {
        self.cached(path, |c| &mut c.string_maps, |_, value| coerce::to_string_map(value))
    }

    pub fn string_map_or(
        &self,
        path: &str,
        default: BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        self.get_string_map(path).unwrap_or(default)
    }

    /// Read-through lookup in one typed cache.
    ///
    /// The state read lock is held for the whole lookup, so a concurrent
    /// mutation (which needs the write lock and clears the caches) can never
    /// interleave between resolving a value and caching it.
    fn cached<T, S, C>(&self, path: &str, select: S, convert: C) -> Option<T>
    where
        T: Clone,
        S: Fn(&mut TypedCaches) -> &mut HashMap<String, T>,
        C: FnOnce(&State, &ConfigValue) -> Option<T>,
    {
        let state = self.read();
        if let Some(hit) = select(&mut state.caches()).get(path) {
            return Some(hit.clone());
        }

        let raw = tree::resolve(&state.data, path)?;
        let value = convert(&*state, raw)?;
        select(&mut state.caches()).insert(path.to_string(), value.clone());
        Some(value)
    }
}
