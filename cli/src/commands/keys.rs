use anyhow::{Result, bail};
use clap::Args;

use super::SourceArgs;
use crate::output;

#[derive(Args)]
pub struct KeysArgs {
    #[command(flatten)]
    pub source: SourceArgs
}

pub fn run(args: KeysArgs) -> Result<()> {
    let mnemosyne = args.source.open()?;
    let keys = mnemosyne.store().keys();
    output::diagnostics(mnemosyne.errors());

    if !mnemosyne.errors().is_empty() {
        bail!("Defaults could not be loaded");
    }
    for key in keys {
        println!("{key}");
    }
    Ok(())
}
