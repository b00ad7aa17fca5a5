//! Harness configuration
//!
//! Loaded from an optional TOML file; the test runner binary's flags and
//! environment variables override individual values on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::browser::Browser;
use crate::error::E2eResult;

/// Complete harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub browser: BrowserConfig,
    pub paths: PathsConfig,
}

impl HarnessConfig {
    /// Parse a configuration file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load from a file when one is given, defaults otherwise
    pub fn load(path: Option<&Path>) -> E2eResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Where the application under test lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of a running client (attach mode)
    pub base_url: Option<String>,

    /// Web client binary to spawn when no base URL is given
    pub binary_path: Option<PathBuf>,

    /// Port for a spawned client (None = find a free one)
    pub port: Option<u16>,

    /// Readiness endpoint polled before tests start
    pub health_path: String,

    /// How long the client gets to become ready
    pub startup_timeout_secs: u64,
}

impl AppConfig {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: Some("http://localhost:3000".to_string()),
            binary_path: None,
            port: None,
            health_path: "/health".to_string(),
            startup_timeout_secs: 30,
        }
    }
}

/// Login credentials for the web client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub user: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user: "demo".to_string(),
            password: "demo".to_string(),
        }
    }
}

/// Browser session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub engine: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            engine: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

/// Filesystem locations the harness reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Fixture directory tree
    pub fixtures_dir: PathBuf,

    /// Reports and screenshots land here
    pub artifact_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from("fixtures"),
            artifact_dir: PathBuf::from("test-results"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_attach_to_local_client() {
        let config = HarnessConfig::default();
        assert_eq!(config.app.base_url.as_deref(), Some("http://localhost:3000"));
        assert!(config.browser.headless);
        assert_eq!(config.paths.fixtures_dir, PathBuf::from("fixtures"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let config: HarnessConfig = toml::from_str(
            r#"
[app]
base_url = "https://erp.example.test"

[auth]
user = "qa"
password = "qa-secret"

[browser]
engine = "firefox"
"#,
        )
        .unwrap();

        assert_eq!(config.app.base_url.as_deref(), Some("https://erp.example.test"));
        assert_eq!(config.app.health_path, "/health");
        assert_eq!(config.auth.user, "qa");
        assert_eq!(config.browser.engine, Browser::Firefox);
        assert_eq!(config.browser.viewport_width, 1280);
    }
}
