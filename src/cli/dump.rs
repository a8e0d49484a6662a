//! Dump command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::utils::SourceArgs;

#[derive(Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output format (json, yaml, toml)
    #[arg(long, value_name = "FORMAT", env = "CONFIG_STORE_FORMAT", default_value = "json")]
    pub format: String,
}

pub fn run(args: DumpArgs) -> Result<()> {
    let store = args.sources.open_store()?;
    let mut stdout = std::io::stdout().lock();
    store
        .dump_to(&mut stdout, &args.format)
        .with_context(|| format!("Failed dumping config as {}", args.format))?;
    Ok(())
}
