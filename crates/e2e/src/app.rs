//! Application under test - attaching to or spawning the web client
//!
//! The normal case is attaching to an already-running erpweb instance by
//! base URL. For local development the harness can also spawn the web
//! client binary itself; either way it polls a readiness endpoint before
//! any browser session starts.

use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{E2eError, E2eResult};

/// Handle to the application under test
#[derive(Debug)]
pub struct AppHandle {
    base_url: String,
    child: Option<Child>,
}

impl AppHandle {
    /// Attach to a running client or spawn one, then wait for readiness
    pub async fn connect(config: &AppConfig) -> E2eResult<Self> {
        let handle = if let Some(base_url) = &config.base_url {
            info!("Attaching to running client at {}", base_url);
            Self {
                base_url: base_url.trim_end_matches('/').to_string(),
                child: None,
            }
        } else if let Some(binary_path) = &config.binary_path {
            let port = config.port.unwrap_or_else(find_free_port);
            let base_url = format!("http://127.0.0.1:{}", port);

            info!("Spawning web client on port {}", port);

            let child = Command::new(binary_path)
                .env("ERPWEB_PORT", port.to_string())
                .env("ERPWEB_HOST", "127.0.0.1")
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| {
                    E2eError::AppStartup(format!(
                        "Failed to spawn {}: {}",
                        binary_path.display(),
                        e
                    ))
                })?;

            Self {
                base_url,
                child: Some(child),
            }
        } else {
            return Err(E2eError::AppUnconfigured);
        };

        handle
            .wait_until_ready(&config.health_path, config.startup_timeout())
            .await?;

        info!("Client is ready at {}", handle.base_url);
        Ok(handle)
    }

    /// Poll the readiness endpoint until it answers or the deadline hits
    async fn wait_until_ready(&self, health_path: &str, deadline: Duration) -> E2eResult<()> {
        let health_url = format!("{}{}", self.base_url, health_path);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < deadline {
            attempts += 1;

            match client.get(&health_url).send().await {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                Ok(resp) => warn!("Readiness check returned {}", resp.status()),
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for the client to come up...");
                    }
                    // Connection refused is expected while it starts
                    if !e.is_connect() {
                        warn!("Readiness check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(250)).await;
        }

        Err(E2eError::AppNotReady(attempts))
    }

    /// Base URL of the application under test
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop a spawned client; a no-op in attach mode
    pub fn stop(&mut self) -> E2eResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        info!("Stopping web client (pid: {})", child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        let _ = child.kill();
        let _ = child.wait();

        Ok(())
    }
}

impl Drop for AppHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Find a free port to spawn on
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn find_free_port_returns_unprivileged_ports() {
        assert!(find_free_port() > 1024);
        assert!(find_free_port() > 1024);
    }

    #[tokio::test]
    async fn connect_requires_a_target() {
        let config = AppConfig {
            base_url: None,
            binary_path: None,
            ..Default::default()
        };
        let err = AppHandle::connect(&config).await.unwrap_err();
        assert!(matches!(err, E2eError::AppUnconfigured));
    }
}
