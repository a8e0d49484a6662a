//! Get command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::utils::SourceArgs;
use config_store::Store;

#[derive(Args)]
pub struct GetArgs {
    /// Dotted path of the value, e.g. db.hosts.0.port
    #[arg(value_name = "PATH")]
    pub path: String,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Type to read the value as
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::Raw)]
    pub value_type: ValueType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    Raw,
    String,
    Int,
    Bool,
    Strings,
    Map,
}

pub fn run(args: GetArgs) -> Result<()> {
    let store = args.sources.open_store()?;
    let Some(lines) = read_value(&store, &args.path, args.value_type) else {
        anyhow::bail!("Key not found or not a {:?}: {}", args.value_type, args.path);
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn read_value(store: &Store, path: &str, value_type: ValueType) -> Option<Vec<String>> {
    match value_type {
        ValueType::Raw => store.get(path).map(|v| vec![v.to_string()]),
        ValueType::String => store.get_string(path).map(|s| vec![s]),
        ValueType::Int => store.get_int(path).map(|i| vec![i.to_string()]),
        ValueType::Bool => store.get_bool(path).map(|b| vec![b.to_string()]),
        ValueType::Strings => store.get_strings(path),
        ValueType::Map => store
            .get_string_map(path)
            .map(|map| map.into_iter().map(|(k, v)| format!("{k}={v}")).collect()),
    }
}
