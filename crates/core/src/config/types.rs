use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::autostream::SelectionDefaults;
use crate::external_catalog::CinemetaConfig;

/// Root configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cinemeta: CinemetaConfig,
    /// Service-wide defaults for the selection policy; per-request options
    /// override them.
    #[serde(default)]
    pub selection: SelectionDefaults,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    7000
}

/// Sanitized config for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub cinemeta: SanitizedCinemetaConfig,
    pub selection: SelectionDefaults,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCinemetaConfig {
    /// Scheme and host only; any path or query is dropped.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            cinemeta: SanitizedCinemetaConfig {
                base_url: origin_of(&config.cinemeta.base_url),
                timeout_secs: config.cinemeta.timeout_secs,
            },
            selection: config.selection.clone(),
        }
    }
}

fn origin_of(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    // Strip credentials, path and query
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = host.rsplit('@').next().unwrap_or_default();
    match scheme {
        Some(scheme) => format!("{}://{}", scheme, host),
        None => host.to_string(),
    }
}
