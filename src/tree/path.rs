//! Dotted-path resolution and assignment

use super::value::{ConfigValue, Mapping};
use crate::error::{Error, Result};

/// Split a dotted path into segments. The empty path has no segments.
pub fn segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('.').collect()
}

/// Resolve `path` against `tree`.
///
/// Mapping nodes are indexed by key, sequence nodes by a non-negative
/// integer segment. Any miss (absent key, bad index, descending into a
/// scalar) yields `None`; a missing key is never an error.
pub fn resolve<'a>(tree: &'a ConfigValue, path: &str) -> Option<&'a ConfigValue> {
    let mut current = tree;
    for segment in segments(path) {
        current = step(current, segment)?;
    }
    Some(current)
}

fn step<'a>(node: &'a ConfigValue, segment: &str) -> Option<&'a ConfigValue> {
    match node {
        ConfigValue::Mapping(map) => map.get(segment),
        ConfigValue::Sequence(items) => items.get(parse_index(segment)?),
        _ => None,
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Write `value` at `path`, creating intermediate mappings as needed.
///
/// A numeric segment against a sequence replaces an in-range element or
/// appends when it equals the length. Anything else that cannot be walked
/// is a `PathConflict` and leaves the tree untouched.
pub fn assign(tree: &mut ConfigValue, path: &str, value: ConfigValue) -> Result<()> {
    let parts = segments(path);
    let Some((last, parents)) = parts.split_last() else {
        if !value.is_mapping() {
            return Err(conflict(path, format!("the root must be a mapping, got a {}", value.kind())));
        }
        *tree = value;
        return Ok(());
    };

    // Validate the whole walk before mutating anything.
    check_assignable(tree, path, parents, last)?;

    let mut current = tree;
    for segment in parents {
        current = match current {
            ConfigValue::Mapping(map) => {
                map.entry((*segment).to_string()).or_insert_with(ConfigValue::empty_mapping)
            }
            ConfigValue::Sequence(items) => {
                let index = parse_index(segment).unwrap_or(items.len());
                if index == items.len() {
                    items.push(ConfigValue::empty_mapping());
                }
                &mut items[index]
            }
            other => {
                return Err(conflict(path, format!("'{segment}' descends into a {}", other.kind())))
            }
        };
    }

    match current {
        ConfigValue::Mapping(map) => {
            map.insert((*last).to_string(), value);
        }
        ConfigValue::Sequence(items) => {
            let index = parse_index(last).unwrap_or(items.len());
            if index == items.len() {
                items.push(value);
            } else {
                items[index] = value;
            }
        }
        other => return Err(conflict(path, format!("'{last}' descends into a {}", other.kind()))),
    }
    Ok(())
}

fn check_assignable(tree: &ConfigValue, path: &str, parents: &[&str], last: &str) -> Result<()> {
    let mut current = Some(tree);
    for segment in parents.iter().copied().chain(std::iter::once(last)) {
        let Some(node) = current else {
            // Below a node that will be created; always a fresh mapping.
            return Ok(());
        };
        current = match node {
            ConfigValue::Mapping(map) => map.get(segment),
            ConfigValue::Sequence(items) => match parse_index(segment) {
                Some(index) if index < items.len() => items.get(index),
                Some(index) if index == items.len() => None,
                _ => {
                    return Err(conflict(
                        path,
                        format!("'{segment}' is not a valid index for a sequence of {}", items.len()),
                    ))
                }
            },
            other => {
                return Err(conflict(path, format!("'{segment}' descends into a {}", other.kind())))
            }
        };
    }
    Ok(())
}

fn conflict(path: &str, reason: String) -> Error {
    Error::PathConflict { path: path.to_string(), reason }
}

/// Shallow view of the top-level keys, used for load diagnostics.
pub fn top_level_keys(tree: &ConfigValue) -> usize {
    tree.as_mapping().map(Mapping::len).unwrap_or(0)
}
