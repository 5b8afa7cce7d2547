//! Persisted authentication context.
//!
//! The backend issues tokens through its GitHub OAuth entry point. In the
//! terminal flow the user opens the entry URL in a browser and pastes the
//! redirected URL back; the tokens ride in its query string. Credentials are
//! stored as JSON in the user config directory, injected into [`ApiClient`]
//! by the caller, and cleared on logout.
//!
//! [`ApiClient`]: crate::http::ApiClient

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Credentials delivered by the OAuth redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// File-backed credential store.
#[derive(Debug)]
pub struct AuthStore {
    path: PathBuf,
    state: AuthState,
}

impl AuthStore {
    /// Load credentials from the default location; a missing file means
    /// logged out, not an error.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(default_path()?))
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, state }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.state.access_token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.state.username.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.access_token.is_some()
    }

    /// Replace the stored credentials with the ones from an OAuth redirect.
    pub fn store_callback(&mut self, state: AuthState) -> Result<()> {
        self.state = state;
        self.save()
    }

    /// Forget all credentials.
    pub fn clear(&mut self) -> Result<()> {
        self.state = AuthState::default();
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

fn default_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("prepdeck").join("auth.json"))
}

/// Build the backend's GitHub OAuth entry URL.
pub fn login_url(base_url: &str) -> String {
    format!(
        "{}/oauth2/authorization/github",
        base_url.trim_end_matches('/')
    )
}

/// Parse the OAuth redirect the user pasted back (a full URL or just the
/// query string). Both tokens must be present; anything less is a failed
/// login.
pub fn parse_callback(input: &str) -> Result<AuthState> {
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };
    let query = query.split('#').next().unwrap_or(query);

    let mut state = AuthState::default();
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = decode_component(value);
        if value.is_empty() {
            continue;
        }
        match key {
            "accessToken" => state.access_token = Some(value),
            "refreshToken" => state.refresh_token = Some(value),
            "username" => state.username = Some(value),
            "email" => state.email = Some(value),
            _ => {}
        }
    }

    if state.access_token.is_none() || state.refresh_token.is_none() {
        anyhow::bail!("login failed: the redirect did not carry both tokens");
    }
    Ok(state)
}

/// Decode one form-encoded query value (`+` is a space).
fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_redirect_url() {
        let state = parse_callback(
            "https://app.example/callback?accessToken=at-1&refreshToken=rt-1&username=jane&email=jane%40example.com",
        )
        .unwrap();
        assert_eq!(state.access_token.as_deref(), Some("at-1"));
        assert_eq!(state.refresh_token.as_deref(), Some("rt-1"));
        assert_eq!(state.username.as_deref(), Some("jane"));
        assert_eq!(state.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn multibyte_and_plus_sequences_decode() {
        let state = parse_callback(
            "accessToken=a&refreshToken=b&username=jane+doe&email=j%C3%A9%40example.com",
        )
        .unwrap();
        assert_eq!(state.username.as_deref(), Some("jane doe"));
        assert_eq!(state.email.as_deref(), Some("jé@example.com"));
    }

    #[test]
    fn bare_query_string_works_too() {
        let state = parse_callback("accessToken=a&refreshToken=b").unwrap();
        assert_eq!(state.access_token.as_deref(), Some("a"));
        assert!(state.username.is_none());
    }

    #[test]
    fn missing_refresh_token_is_a_failed_login() {
        assert!(parse_callback("accessToken=a&username=jane").is_err());
    }

    #[test]
    fn store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");

        let mut store = AuthStore::load_from(&path);
        assert!(!store.is_logged_in());

        store
            .store_callback(AuthState {
                access_token: Some("tok".into()),
                refresh_token: Some("ref".into()),
                username: Some("jane".into()),
                email: None,
            })
            .unwrap();

        let reloaded = AuthStore::load_from(&path);
        assert_eq!(reloaded.access_token(), Some("tok"));
        assert_eq!(reloaded.username(), Some("jane"));

        store.clear().unwrap();
        assert!(!AuthStore::load_from(&path).is_logged_in());
    }
}
