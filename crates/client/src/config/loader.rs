//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Probe the working directory for a config file (`tado.toml`, then
//!    `tado.json`)
//! 2. Overlay `TADO_*` environment variables, which take precedence
//!
//! ## Environment Variables
//! - `TADO_BASE_URL`: API base URL (must end in `/`)
//! - `TADO_USER_AGENT`: `User-Agent` header
//! - `TADO_TIMEOUT_SECS`: HTTP request timeout in seconds
//! - `TADO_CLIENT_ID`, `TADO_CLIENT_SECRET`: OAuth client credentials
//! - `TADO_TOKEN_URL`, `TADO_DEVICE_AUTH_URL`: OAuth endpoints
//! - `TADO_USERNAME`, `TADO_PASSWORD`: password grant credentials

use std::path::{Path, PathBuf};

use super::{AuthSettings, ClientConfig};
use crate::api::ApiError;

/// Load configuration from a probed file, overridden by the environment
///
/// A missing file is not an error; the environment alone is used.
///
/// # Errors
/// Returns [`ApiError::Config`] if a found file is invalid or an environment
/// variable has an invalid value
pub fn load() -> Result<ClientConfig, ApiError> {
    let file = match probe_config_paths() {
        Some(path) => load_from_file(&path)?,
        None => {
            tracing::debug!("No config file found, using environment only");
            ClientConfig::default()
        }
    };

    Ok(file.merge(load_from_env()?))
}

/// Load configuration from `TADO_*` environment variables
///
/// # Errors
/// Returns [`ApiError::Config`] if `TADO_TIMEOUT_SECS` is not a number
pub fn load_from_env() -> Result<ClientConfig, ApiError> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through `lookup`, which maps variable names to values
///
/// Empty values count as unset.
///
/// # Errors
/// Returns [`ApiError::Config`] if `TADO_TIMEOUT_SECS` is not a number
pub fn load_from_lookup<F>(lookup: F) -> Result<ClientConfig, ApiError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

    let timeout_secs = var("TADO_TIMEOUT_SECS")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| ApiError::Config(format!("Invalid TADO_TIMEOUT_SECS {raw:?}: {e}")))
        })
        .transpose()?;

    Ok(ClientConfig {
        base_url: var("TADO_BASE_URL"),
        user_agent: var("TADO_USER_AGENT"),
        timeout_secs,
        auth: AuthSettings {
            client_id: var("TADO_CLIENT_ID"),
            client_secret: var("TADO_CLIENT_SECRET"),
            token_url: var("TADO_TOKEN_URL"),
            device_authorization_url: var("TADO_DEVICE_AUTH_URL"),
            username: var("TADO_USERNAME"),
            password: var("TADO_PASSWORD"),
        },
    })
}

/// Load configuration from a TOML or JSON file (by extension)
///
/// # Errors
/// Returns [`ApiError::Config`] if the file cannot be read, has an unsupported
/// extension, or does not parse
pub fn load_from_file(path: &Path) -> Result<ClientConfig, ApiError> {
    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path).map_err(|e| {
        ApiError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig, ApiError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ApiError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ApiError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ApiError::Config(format!("Unsupported config format: {extension:?}"))),
    }
}

/// First of `./tado.toml` and `./tado.json` that exists
#[must_use]
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_in(&cwd)
}

fn probe_in(dir: &Path) -> Option<PathBuf> {
    ["tado.toml", "tado.json"].into_iter().map(|name| dir.join(name)).find(|path| path.is_file())
}
