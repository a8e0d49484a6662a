//! Type-segregated read caches keyed by dotted path

use std::collections::{BTreeMap, HashMap};

/// One cache per accessor type. Requesting the same path as an int and as
/// a string produces two independent entries.
#[derive(Debug, Default)]
pub struct TypedCaches {
    pub ints: HashMap<String, i64>,
    pub strings: HashMap<String, String>,
    pub string_lists: HashMap<String, Vec<String>>,
    pub string_maps: HashMap<String, BTreeMap<String, String>>,
}

impl TypedCaches {
    pub fn clear(&mut self) {
        self.ints.clear();
        self.strings.clear();
        self.string_lists.clear();
        self.string_maps.clear();
    }

    pub fn len(&self) -> usize {
        self.ints.len() + self.strings.len() + self.string_lists.len() + self.string_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
