//! GitHub OAuth login in the terminal: the browser does the dance, the
//! redirect URL comes back by paste.

use anyhow::Result;
use prepdeck_core::{AuthStore, Settings, login_url, parse_callback};

use crate::ui;

pub fn run() -> Result<()> {
    let settings = Settings::load();

    ui::header("GitHub login");
    println!("Open this URL in your browser and authorize the app:");
    println!("  {}", login_url(&settings.backend_url));
    println!();
    println!("After authorizing you will be redirected; copy the full redirect URL");
    println!("(it carries the tokens) and paste it here.");
    println!();

    let pasted = ui::input("Redirect URL", None)?;
    let state = parse_callback(&pasted)?;

    let mut store = AuthStore::load()?;
    store.store_callback(state)?;

    match store.username() {
        Some(name) => ui::success(&format!("Logged in as {name}")),
        None => ui::success("Logged in"),
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut store = AuthStore::load()?;
    if !store.is_logged_in() {
        ui::info("Not logged in");
        return Ok(());
    }
    store.clear()?;
    ui::success("Logged out");
    Ok(())
}
