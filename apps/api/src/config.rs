use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the secrets file location.
pub const SECRETS_FILE_ENV: &str = "SECRETS_FILE";

/// Default secrets file, read only when the environment variable is absent.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

/// The OpenAI API key. Resolved once at startup and never re-read.
///
/// `Debug` is redacted so the key cannot leak through error chains or
/// `{:?}` logging of [`Config`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        ApiKey(key)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(redacted)")
    }
}

/// Application configuration loaded from environment variables.
///
/// Unlike most settings, a missing API key is NOT a startup error: the
/// service boots without it and every dispatch answers with the fixed
/// remediation message until the operator configures a key and restarts.
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Option<ApiKey>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let secrets_path = std::env::var(SECRETS_FILE_ENV)
            .unwrap_or_else(|_| DEFAULT_SECRETS_FILE.to_string());
        let secrets = load_secret_store(Path::new(&secrets_path));
        let credential =
            resolve_credential(std::env::var(API_KEY_ENV).ok(), secrets.as_ref());

        Ok(Config {
            credential,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Flat secrets file in the hosted-deployment style: top-level keys named
/// exactly like their environment-variable counterparts.
///
/// ```toml
/// OPENAI_API_KEY = "sk-..."
/// ```
#[derive(Debug, Deserialize)]
pub struct SecretStore {
    #[serde(default, rename = "OPENAI_API_KEY")]
    openai_api_key: Option<String>,
}

/// Picks the credential. The environment variable takes precedence over
/// the secrets file; when neither yields a non-blank value the credential
/// is absent.
pub fn resolve_credential(
    env_value: Option<String>,
    secrets: Option<&SecretStore>,
) -> Option<ApiKey> {
    non_blank(env_value)
        .or_else(|| non_blank(secrets.and_then(|s| s.openai_api_key.clone())))
        .map(ApiKey)
}

/// Blank keys count as absent, so an empty `OPENAI_API_KEY=` line in `.env`
/// still falls through to the secrets file.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reads and parses the secrets file. A missing or unparseable file is
/// treated as an empty store; the caller falls back to "absent".
fn load_secret_store(path: &Path) -> Option<SecretStore> {
    let text = std::fs::read_to_string(path).ok()?;
    parse_secret_store(&text)
}

fn parse_secret_store(text: &str) -> Option<SecretStore> {
    toml::from_str(text).ok()
}
