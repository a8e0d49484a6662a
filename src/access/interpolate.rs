//! Environment variable interpolation for string values
//!
//! `${NAME}` is replaced by the value of `NAME`, or by the empty string
//! when unset. `${NAME|default}` falls back to `default` instead.
//! Substituted text is not scanned again. Names are matched exactly:
//! a marker with whitespace in the name, like `${ NAME }`, is left as-is.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ENV_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}|\s]+)(?:\|([^}]*))?\}").expect("valid regex"));

pub fn interpolate_env(text: &str) -> String {
    interpolate_with(text, |name| std::env::var(name).ok())
}

pub fn interpolate_with<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !text.contains("${") {
        return text.to_string();
    }

    ENV_MARKER
        .replace_all(text, |caps: &Captures<'_>| {
            lookup(&caps[1])
                .or_else(|| caps.get(2).map(|default| default.as_str().to_string()))
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "ENVKEY" => Some("hello".to_string()),
            "NESTED" => Some("${ENVKEY}".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_present_variable() {
        assert_eq!(interpolate_with("${ENVKEY}", lookup), "hello");
        assert_eq!(interpolate_with("say ${ENVKEY}!", lookup), "say hello!");
    }

    #[test]
    fn test_default_used_when_missing() {
        assert_eq!(interpolate_with("${MISSING|fallback}", lookup), "fallback");
        assert_eq!(interpolate_with("${ENVKEY|fallback}", lookup), "hello");
        assert_eq!(interpolate_with("${MISSING|}", lookup), "");
    }

    #[test]
    fn test_missing_without_default_is_empty() {
        assert_eq!(interpolate_with("${MISSING}", lookup), "");
        assert_eq!(interpolate_with("a-${MISSING}-b", lookup), "a--b");
    }

    #[test]
    fn test_substitution_is_not_rescanned() {
        assert_eq!(interpolate_with("${NESTED}", lookup), "${ENVKEY}");
    }

    #[test]
    fn test_whitespace_in_name_is_not_a_marker() {
        assert_eq!(interpolate_with("${ ENVKEY }", lookup), "${ ENVKEY }");
        assert_eq!(interpolate_with("${ENVKEY |x}", lookup), "${ENVKEY |x}");
        assert_eq!(interpolate_with("${MISSING| spaced default }", lookup), " spaced default ");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(interpolate_with("no markers $HOME {x}", lookup), "no markers $HOME {x}");
    }

    #[test]
    fn test_process_environment() {
        std::env::set_var("CONFIG_STORE_INTERPOLATE_TEST", "from-env");
        assert_eq!(interpolate_env("${CONFIG_STORE_INTERPOLATE_TEST}"), "from-env");
    }
}
