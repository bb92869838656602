use anyhow::Result;
use colored::Colorize;
use mnemosyne::helpers::printable;
use mnemosyne::{ErrorLog, Value};

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print every handled failure recorded during the command.
pub fn diagnostics(errors: &ErrorLog) {
    for message in errors.messages() {
        warn(&message);
    }
}

/// Strings and integers as-is, anything else as YAML.
pub fn render(value: &Value) -> Result<String> {
    if let Some(text) = printable(value) {
        return Ok(text);
    }
    let yaml = serde_yaml::to_string(value)?;
    Ok(yaml.trim_end().to_string())
}
