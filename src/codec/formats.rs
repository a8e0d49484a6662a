//! JSON, YAML and TOML codec plugins

use crate::error::{Error, Result};
use crate::tree::ConfigValue;

use super::{JSON, TOML, YAML};

/// Decode JSON, tolerating `//` and `/* */` comments outside of strings.
pub fn json_decode(blob: &[u8]) -> Result<ConfigValue> {
    let stripped = strip_json_comments(blob);
    let raw: serde_json::Value =
        serde_json::from_slice(&stripped).map_err(|e| Error::decode(JSON, e))?;
    Ok(ConfigValue::from(raw))
}

pub fn json_encode(tree: &ConfigValue) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(tree).map_err(|e| Error::encode(JSON, e))
}

pub fn yaml_decode(blob: &[u8]) -> Result<ConfigValue> {
    let raw: serde_yaml::Value = serde_yaml::from_slice(blob).map_err(|e| Error::decode(YAML, e))?;
    Ok(ConfigValue::from(raw))
}

pub fn yaml_encode(tree: &ConfigValue) -> Result<Vec<u8>> {
    let text = serde_yaml::to_string(tree).map_err(|e| Error::encode(YAML, e))?;
    Ok(text.trim_end().as_bytes().to_vec())
}

pub fn toml_decode(blob: &[u8]) -> Result<ConfigValue> {
    let text = std::str::from_utf8(blob)
        .map_err(|e| Error::decode(TOML, format!("invalid UTF-8: {e}")))?;
    let raw: toml::Value = toml::from_str(text).map_err(|e| Error::decode(TOML, e))?;
    Ok(ConfigValue::from(raw))
}

/// TOML has no null; a tree holding one cannot be encoded.
pub fn toml_encode(tree: &ConfigValue) -> Result<Vec<u8>> {
    let text = toml::to_string(tree).map_err(|e| Error::encode(TOML, e))?;
    Ok(text.trim_end().as_bytes().to_vec())
}

/// Remove `//` line comments and `/* */` block comments, leaving string
/// literals untouched. Newlines inside comments are kept so parse errors
/// still point at the right line.
fn strip_json_comments(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    let mut in_string = false;

    while i < input.len() {
        let b = input[i];

        if in_string {
            out.push(b);
            if b == b'\\' && i + 1 < input.len() {
                out.push(input[i + 1]);
                i += 2;
                continue;
            }
            if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (b, input.get(i + 1).copied()) {
            (b'"', _) => {
                in_string = true;
                out.push(b);
                i += 1;
            }
            (b'/', Some(b'/')) => {
                while i < input.len() && input[i] != b'\n' {
                    i += 1;
                }
            }
            (b'/', Some(b'*')) => {
                i += 2;
                while i < input.len() && !(input[i] == b'*' && input.get(i + 1) == Some(&b'/')) {
                    if input[i] == b'\n' {
                        out.push(b'\n');
                    }
                    i += 1;
                }
                i += 2;
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::resolve;

    #[test]
    fn test_json_comments_are_ignored() {
        let src = br#"{
            // service name
            "name": "blog", /* inline */
            "url": "http://example.com/a//b"
        }"#;
        let tree = json_decode(src).unwrap();
        assert_eq!(resolve(&tree, "name"), Some(&ConfigValue::from("blog")));
        assert_eq!(resolve(&tree, "url"), Some(&ConfigValue::from("http://example.com/a//b")));
    }

    #[test]
    fn test_json_escaped_quote_in_string() {
        let tree = json_decode(br#"{"q": "say \"hi\" // not a comment"}"#).unwrap();
        assert_eq!(resolve(&tree, "q"), Some(&ConfigValue::from(r#"say "hi" // not a comment"#)));
    }

    #[test]
    fn test_json_malformed_is_decode_error() {
        let err = json_decode(b"{\"name\": ").unwrap_err();
        assert!(matches!(err, Error::Decode { ref format, .. } if format == "json"));
    }

    #[test]
    fn test_yaml_decode() {
        let tree = yaml_decode(b"name: blog\narr:\n  key: val\nlist: [1, 2]\n").unwrap();
        assert_eq!(resolve(&tree, "arr.key"), Some(&ConfigValue::from("val")));
        assert_eq!(resolve(&tree, "list.1"), Some(&ConfigValue::Int(2)));
    }

    #[test]
    fn test_toml_decode() {
        let tree = toml_decode(b"title = \"x\"\n[db]\nport = 5432\n").unwrap();
        assert_eq!(resolve(&tree, "db.port"), Some(&ConfigValue::Int(5432)));
    }

    #[test]
    fn test_toml_rejects_null() {
        let tree = ConfigValue::from(serde_json::json!({"a": null}));
        assert!(matches!(toml_encode(&tree), Err(Error::Encode { .. })));
    }

    #[test]
    fn test_round_trip_per_format() {
        let tree = ConfigValue::from(serde_json::json!({
            "name": "app",
            "debug": true,
            "ratio": 1.5,
            "db": {"hosts": ["a", "b"], "port": 5432}
        }));

        assert_eq!(json_decode(&json_encode(&tree).unwrap()).unwrap(), tree);
        assert_eq!(yaml_decode(&yaml_encode(&tree).unwrap()).unwrap(), tree);
        assert_eq!(toml_decode(&toml_encode(&tree).unwrap()).unwrap(), tree);
    }
}
