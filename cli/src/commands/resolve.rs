//! Resolve command - what a template would receive for a key

use anyhow::{Context, Result, bail};
use clap::Args;
use mnemosyne::{OverrideValidator, Value};

use super::SourceArgs;
use crate::output;

#[derive(Args)]
pub struct ResolveArgs {
    /// Key to resolve
    pub key: String,

    /// Override value, parsed as YAML (e.g. `false`, `12`, `[a, b]`)
    #[arg(long = "override", value_name = "YAML")]
    pub override_value: Option<String>,

    /// Let falsy overrides (false, 0, "", []) count as overrides
    #[arg(long)]
    pub keep_falsy: bool,

    #[command(flatten)]
    pub source: SourceArgs
}

pub fn run(args: ResolveArgs) -> Result<()> {
    let mnemosyne = args.source.open()?;
    let override_value = parse_override(args.override_value.as_deref())?;

    let accept_any = |_: &Value, _: &str| true;
    let validator = args
        .keep_falsy
        .then_some(&accept_any as &OverrideValidator);

    let resolved = mnemosyne.remember(&Value::from(args.key.as_str()), &override_value, validator)?;
    output::diagnostics(mnemosyne.errors());

    match resolved {
        Some(value) => {
            println!("{}", output::render(&value)?);
            Ok(())
        }
        None => bail!("No value resolved for `{}`", args.key)
    }
}

/// No override behaves like `false`; an empty argument is the empty string.
fn parse_override(raw: Option<&str>) -> Result<Value> {
    match raw {
        None => Ok(Value::Bool(false)),
        Some("") => Ok(Value::from("")),
        Some(text) => serde_yaml::from_str(text)
            .with_context(|| format!("Override `{text}` is not valid YAML"))
    }
}
