//! Show or change client settings.

use anyhow::Result;
use console::style;
use prepdeck_core::{AuthStore, Settings, list_input_devices};

use crate::ui;

pub fn run(
    backend_url: Option<String>,
    microphone: Option<String>,
    prep_seconds: Option<u32>,
    answer_seconds: Option<u32>,
    list_microphones: bool,
) -> Result<()> {
    if list_microphones {
        for device in list_input_devices()? {
            if device.is_default {
                println!("{} {}", device.name, style("(default)").dim());
            } else {
                println!("{}", device.name);
            }
        }
        return Ok(());
    }

    let mut settings = Settings::load();
    let mut changed = false;

    if let Some(url) = backend_url {
        settings.backend_url = url.trim_end_matches('/').to_string();
        changed = true;
    }
    if let Some(device) = microphone {
        settings.microphone_device = if device.is_empty() { None } else { Some(device) };
        changed = true;
    }
    if let Some(secs) = prep_seconds {
        settings.prep_seconds = secs;
        changed = true;
    }
    if let Some(secs) = answer_seconds {
        settings.answer_seconds = secs;
        changed = true;
    }

    if changed {
        settings.save()?;
        ui::success("Settings saved");
        println!();
    }

    println!("{} {}", style("Backend URL:").bold(), settings.backend_url);
    println!(
        "{} {}",
        style("Microphone:").bold(),
        settings
            .microphone_device
            .as_deref()
            .unwrap_or("system default")
    );
    println!("{} {}s", style("Prep time:").bold(), settings.prep_seconds);
    println!(
        "{} {}s",
        style("Answer time:").bold(),
        settings.answer_seconds
    );

    let auth = AuthStore::load()?;
    match auth.username() {
        Some(name) if auth.is_logged_in() => {
            println!("{} logged in as {name}", style("Auth:").bold());
        }
        _ if auth.is_logged_in() => println!("{} logged in", style("Auth:").bold()),
        _ => println!("{} not logged in", style("Auth:").bold()),
    }
    Ok(())
}
