//! Conversion of raw tree nodes into the typed accessor results
//!
//! A failed conversion is `None`, never an error: callers fall back to a
//! default just like for a missing key.

use std::collections::BTreeMap;

use crate::tree::ConfigValue;

pub fn to_int(value: &ConfigValue) -> Option<i64> {
    match value {
        ConfigValue::Int(i) => Some(*i),
        ConfigValue::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Some(*f as i64)
        }
        ConfigValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Scalars render as text; containers and null have no string form.
pub fn to_string(value: &ConfigValue) -> Option<String> {
    match value {
        ConfigValue::String(s) => Some(s.clone()),
        ConfigValue::Int(i) => Some(i.to_string()),
        ConfigValue::Float(f) => Some(f.to_string()),
        ConfigValue::Bool(b) => Some(b.to_string()),
        ConfigValue::Null | ConfigValue::Sequence(_) | ConfigValue::Mapping(_) => None,
    }
}

pub fn to_bool(value: &ConfigValue) -> Option<bool> {
    match value {
        ConfigValue::Bool(b) => Some(*b),
        ConfigValue::String(s) => parse_bool(s.trim()),
        _ => None,
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// A sequence whose every element is a scalar.
pub fn to_strings(value: &ConfigValue) -> Option<Vec<String>> {
    match value {
        ConfigValue::Sequence(items) => items.iter().map(to_string).collect(),
        _ => None,
    }
}

/// A mapping whose every value is a scalar.
pub fn to_string_map(value: &ConfigValue) -> Option<BTreeMap<String, String>> {
    match value {
        ConfigValue::Mapping(map) => {
            map.iter().map(|(k, v)| to_string(v).map(|s| (k.clone(), s))).collect()
        }
        _ => None,
    }
}
