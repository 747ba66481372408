//! First-run token acquisition.
//!
//! The board service hands out user tokens through a browser page. When the
//! configuration has no token, the user is sent to that page, pastes the token
//! back, and the token is written into the configuration file for later runs.

use crate::config::toml_config::BoardConfig;
use crate::utils::error::{Result, UpkeepError};
use std::io::{self, BufRead, Write};
use std::path::Path;
use url::Url;

pub const AUTHORIZE_URL: &str = "https://trello.com/1/authorize";
pub const APP_NAME: &str = "Timeboxer";
pub const TOKEN_EXPIRATION: &str = "30days";

pub fn authorize_url(app_key: &str, app_name: &str, expiration: &str) -> Result<Url> {
    Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("expiration", expiration),
            ("name", app_name),
            ("scope", "read,write"),
            ("response_type", "token"),
            ("key", app_key),
        ],
    )
    .map_err(|e| UpkeepError::ConfigError {
        message: format!("Cannot build authorization URL: {}", e),
    })
}

/// Obtains a token from the user for the given authorization page.
pub trait TokenPrompt {
    fn request_token(&self, authorize_url: &Url) -> Result<String>;
}

#[derive(Debug, Default)]
pub struct StdinTokenPrompt;

impl TokenPrompt for StdinTokenPrompt {
    fn request_token(&self, authorize_url: &Url) -> Result<String> {
        println!("{}", authorize_url);
        println!("Use the URL above to get a token, then paste it here.");
        print!("Paste token: ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Makes sure `config` carries a token, prompting for one and persisting it to
/// `path` if needed. Returns `true` when a new token was stored.
pub fn ensure_token<P: AsRef<Path>>(
    config: &mut BoardConfig,
    path: P,
    prompt: &dyn TokenPrompt,
) -> Result<bool> {
    if config.has_token() {
        return Ok(false);
    }

    tracing::info!("No token configured, starting authorization");
    let url = authorize_url(&config.app_key, APP_NAME, TOKEN_EXPIRATION)?;
    let token = prompt.request_token(&url)?;
    let token = token.trim();
    if token.is_empty() {
        return Err(UpkeepError::AuthError {
            message: "no token was provided".to_string(),
        });
    }

    config.token = Some(token.to_string());
    config.save(&path)?;
    tracing::info!("Token saved to {}", path.as_ref().display());
    Ok(true)
}
