//! Shared CLI arguments and store construction.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use config_store::{Options, Store};

#[derive(Args)]
pub struct SourceArgs {
    /// Config file to load (repeatable, later files win)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Config file to load only if it exists (repeatable)
    #[arg(long = "optional", value_name = "FILE")]
    pub optional: Vec<PathBuf>,

    /// Expand ${NAME} and ${NAME|default} in string values
    #[arg(long)]
    pub env: bool,
}

impl SourceArgs {
    /// Build a store with every standard codec and load the requested files.
    pub fn open_store(&self) -> Result<Store> {
        let store = Store::with_standard_codecs("cli");
        store.set_options(Options::new().parse_env(self.env));

        store.load_files(self.files.as_slice()).context("Failed loading config files")?;
        store.load_exists(self.optional.as_slice()).context("Failed loading optional config files")?;
        Ok(store)
    }
}
