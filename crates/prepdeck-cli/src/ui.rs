//! Interactive prompt helpers using dialoguer.
//!
//! Themed, consistent prompts and status lines shared by all commands.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Confirm yes/no with default
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&theme())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Get text input
pub fn input(prompt: &str, default: Option<&str>) -> Result<String> {
    let theme = theme();
    let mut input = Input::with_theme(&theme).with_prompt(prompt);
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    Ok(input.interact_text()?)
}

/// Print a styled header
pub fn header(text: &str) {
    println!();
    println!("{}", style(text).bold().cyan());
    println!();
}

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

/// Print an info message
pub fn info(text: &str) {
    println!("{} {}", style("ℹ").blue(), text);
}
