pub mod check;
pub mod completion;
pub mod default;
pub mod keys;
pub mod resolve;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::Settings;
use mnemosyne::{Mnemosyne, TemplateLocator};

#[derive(Parser)]
#[command(
    name = "mnemosyne",
    author,
    version,
    about = "Mnemosyne - theme defaults with caller overrides",
    long_about = "Resolve theme values the way templates do: an override wins when it counts, \
                  otherwise the default from the theme's defaults file is used.\n\nThe defaults \
                  file is searched for under every --root, child theme first."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Resolve a key against an optional override")]
    Resolve(resolve::ResolveArgs),

    #[command(about = "Print the default for a key")]
    Default(default::DefaultArgs),

    #[command(about = "Validate every entry of the defaults file")]
    Check(check::CheckArgs),

    #[command(about = "List the keys of the defaults file")]
    Keys(keys::KeysArgs),

    #[command(about = "Generate shell completions")]
    Completion(completion::CompletionArgs)
}

/// Where the defaults file lives and how failures are treated.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Template root to search, child theme first (defaults to current directory)
    #[arg(long = "root", value_name = "DIR", env = "MNEMOSYNE_ROOTS", value_delimiter = ',')]
    pub roots: Vec<PathBuf>,

    /// Settings file (.toml, .yaml or .yml)
    #[arg(long, value_name = "FILE", env = "MNEMOSYNE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Fail on the first error instead of reporting it afterwards
    #[arg(long)]
    pub strict: bool
}

impl SourceArgs {
    pub fn settings(&self) -> Result<Settings> {
        let settings = match &self.settings {
            Some(path) => config::load_from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::default()
        };
        Ok(if self.strict {
            settings.with_emit_exceptions(true)
        } else {
            settings
        })
    }

    pub fn locator(&self) -> Result<TemplateLocator> {
        if self.roots.is_empty() {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            return Ok(TemplateLocator::new([cwd]));
        }
        Ok(TemplateLocator::new(self.roots.iter().cloned()))
    }

    pub fn open(&self) -> Result<Mnemosyne> {
        let settings = self.settings()?;
        let locator = self.locator()?;
        tracing::debug!(
            roots = ?locator.roots(),
            settings_file = ?self.settings,
            storage_file = %settings.storage_file,
            strict = settings.emit_exceptions,
            "Opening defaults"
        );

        Mnemosyne::new(settings, Arc::new(locator)).map_err(|err| {
            if err.is_storage_error() {
                anyhow::Error::new(err).context("Defaults could not be loaded")
            } else {
                err.into()
            }
        })
    }
}
