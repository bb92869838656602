use anyhow::{Result, bail};
use clap::Args;

use super::SourceArgs;
use crate::output;

#[derive(Args)]
pub struct DefaultArgs {
    /// Key to look up
    pub key: String,

    #[command(flatten)]
    pub source: SourceArgs
}

pub fn run(args: DefaultArgs) -> Result<()> {
    let mnemosyne = args.source.open()?;
    let value = mnemosyne.get_default(&args.key);
    output::diagnostics(mnemosyne.errors());

    let Some(value) = value else {
        bail!("No default for `{}`", args.key);
    };
    println!("{}", output::render(&value)?);
    Ok(())
}
