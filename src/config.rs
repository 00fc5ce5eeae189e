//! Content Studio configuration management
//!
//! All configuration is read from the process environment at startup.
//! The backend root for every outbound request is assembled as
//! `base_url + root_path + endpoint_path`, which keeps the console working
//! when the agent service is deployed behind a reverse proxy that mounts it
//! under a path prefix.

use serde::{Deserialize, Serialize};

/// Environment variable naming the agent backend base URL.
pub const AGENT_API_URL_VAR: &str = "AGENT_API_URL";

/// Environment variable naming the optional reverse-proxy path prefix.
pub const SERVICE_ROOT_PATH_VAR: &str = "SERVICE_ROOT_PATH";

/// Main Content Studio configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Agent backend configuration
    pub backend: BackendConfig,

    /// Console server configuration
    pub server: ServerConfig,
}

impl StudioConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            backend: BackendConfig::from_env(),
            server: ServerConfig::default(),
        }
    }
}

/// Agent backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the agent service (no trailing slash)
    pub base_url: String,

    /// Optional path prefix when deployed behind a gateway (no trailing slash)
    pub root_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            root_path: String::new(),
        }
    }
}

impl BackendConfig {
    /// Read `AGENT_API_URL` and `SERVICE_ROOT_PATH` from the environment,
    /// falling back to the local loopback default.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(AGENT_API_URL_VAR).ok(),
            std::env::var(SERVICE_ROOT_PATH_VAR).ok(),
        )
    }

    fn from_values(base_url: Option<String>, root_path: Option<String>) -> Self {
        let base_url = base_url
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::default().base_url);
        let root_path = root_path.unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            root_path: root_path.trim_end_matches('/').to_string(),
        }
    }

    /// Build a full URL to a backend endpoint, honoring the path prefix.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.root_path, path)
    }

    /// Build a URL to an artifact served from the backend file store.
    ///
    /// The relative path is used as-is; the file store expects the exact
    /// path the agent wrote, forward slashes and all.
    pub fn file_url(&self, rel_path: &str) -> String {
        self.endpoint_url(&format!("/files/{}", rel_path))
    }

    /// The backend root shown read-only in the console sidebar.
    pub fn display_url(&self) -> String {
        self.endpoint_url("")
    }
}

/// Console server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}
