//! Set command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::utils::SourceArgs;
use config_store::ConfigValue;

#[derive(Args)]
pub struct SetArgs {
    /// Dotted path to write
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Value to write; parsed as JSON when possible, otherwise kept as a string
    #[arg(value_name = "VALUE")]
    pub value: String,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output format (json, yaml, toml)
    #[arg(long, value_name = "FORMAT", env = "CONFIG_STORE_FORMAT", default_value = "json")]
    pub format: String,
}

pub fn run(args: SetArgs) -> Result<()> {
    let store = args.sources.open_store()?;
    store
        .set(&args.path, parse_value(&args.value))
        .with_context(|| format!("Failed setting {}", args.path))?;

    let mut stdout = std::io::stdout().lock();
    store
        .dump_to(&mut stdout, &args.format)
        .with_context(|| format!("Failed dumping config as {}", args.format))?;
    Ok(())
}

fn parse_value(raw: &str) -> ConfigValue {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(ConfigValue::from)
        .unwrap_or_else(|_| ConfigValue::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), ConfigValue::Int(42));
        assert_eq!(parse_value("true"), ConfigValue::Bool(true));
        assert_eq!(parse_value("[1]"), ConfigValue::from(vec![1]));
        assert_eq!(parse_value("plain text"), ConfigValue::from("plain text"));
    }
}
