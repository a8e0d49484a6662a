//! Tree merge logic
//!
//! Override semantics:
//! - Mappings: deep-merge by key
//! - Sequences: REPLACE (last wins)
//! - Scalars: override (last wins)

use super::value::{ConfigValue, Mapping};
use crate::error::{Error, Result};

/// Merge `incoming` into `tree` in place.
///
/// An empty tree simply becomes `incoming`. Otherwise both roots must be
/// mappings; below the root the incoming side always wins except where
/// both sides hold a mapping.
pub fn merge(tree: &mut ConfigValue, incoming: ConfigValue) -> Result<()> {
    if tree.is_empty_tree() && incoming.is_mapping() {
        *tree = incoming;
        return Ok(());
    }

    match (tree, incoming) {
        (ConfigValue::Mapping(base), ConfigValue::Mapping(overlay)) => {
            merge_mappings(base, overlay);
            Ok(())
        }
        (tree, incoming) => Err(Error::Merge(format!(
            "incompatible shapes: cannot merge a {} into a {}",
            incoming.kind(),
            tree.kind()
        ))),
    }
}

fn merge_mappings(base: &mut Mapping, overlay: Mapping) {
    for (key, overlay_value) in overlay {
        // Both mappings: deep merge
        if let ConfigValue::Mapping(overlay_map) = overlay_value {
            if let Some(ConfigValue::Mapping(base_map)) = base.get_mut(&key) {
                merge_mappings(base_map, overlay_map);
                continue;
            }
            base.insert(key, ConfigValue::Mapping(overlay_map));
            continue;
        }

        // Sequences, scalars and shape changes: overlay wins
        base.insert(key, overlay_value);
    }
}
