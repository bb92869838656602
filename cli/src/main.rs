use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Default(args) => commands::default::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Keys(args) => commands::keys::run(args),
        Commands::Completion(args) => commands::completion::run(args)
    }
}
