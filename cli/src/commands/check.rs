//! Check command - defaults file validation
//!
//! Loads the defaults file and reports every entry a lookup would reject:
//! keys outside `[A-Za-z0-9_]+` and values that are not strings, integers,
//! booleans or collections.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use utils::{is_valid_key, is_valid_value, type_name};

use super::SourceArgs;
use crate::output;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs
}

pub fn run(args: CheckArgs) -> Result<()> {
    let mnemosyne = args.source.open()?;
    let mapping = mnemosyne.store().mapping();

    output::header("Defaults Check");
    println!(
        "  {} {}",
        "File:".dimmed(),
        mnemosyne.settings().storage_file.cyan()
    );
    println!();

    let mut problems = 0usize;
    for (key, value) in mapping.keys().into_iter().filter_map(|k| Some((k, mapping.get(k)?))) {
        if !is_valid_key(key) {
            output::error(&format!(
                "`{key}` is not a valid key (only alphanumeric and underscores allowed)"
            ));
            problems += 1;
        }
        if !is_valid_value(value) {
            output::error(&format!(
                "`{key}` has a default of type `{}`",
                type_name(value)
            ));
            problems += 1;
        }
    }

    output::diagnostics(mnemosyne.errors());
    let failures = problems + mnemosyne.errors().len();
    if failures > 0 {
        bail!("{failures} problem(s) found");
    }

    output::success(&format!("{} keys, all valid", mapping.len()));
    Ok(())
}
