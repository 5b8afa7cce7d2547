pub mod coding;
pub mod config;
pub mod interview;
pub mod login;
pub mod review;

use anyhow::Result;
use prepdeck_core::{ApiClient, AuthStore, Settings};

/// Build an API client from the stored settings and credentials.
pub fn api_client(settings: &Settings) -> Result<(ApiClient, AuthStore)> {
    let auth = AuthStore::load()?;
    let client = ApiClient::new(
        &settings.backend_url,
        auth.access_token().map(str::to_string),
    )?;
    Ok((client, auth))
}
