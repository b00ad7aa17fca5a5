//! Scenario orchestration
//!
//! Ensures the application under test is reachable, prefixes the login
//! step, hands the composed step list to the Playwright bridge, and turns
//! the bridge's marker outcomes into a persisted report.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{error, info};

use crate::app::AppHandle;
use crate::browser::{BridgeConfig, PlaywrightBridge};
use crate::config::HarnessConfig;
use crate::error::E2eResult;
use crate::scenario::{Scenario, ScenarioReport, ScenarioStep};
use crate::session;

/// Main harness runner
pub struct HarnessRunner {
    config: HarnessConfig,
    app: Option<AppHandle>,
}

impl HarnessRunner {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config, app: None }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Attach to or spawn the application under test
    pub async fn ensure_app(&mut self) -> E2eResult<&AppHandle> {
        if self.app.is_none() {
            self.app = Some(AppHandle::connect(&self.config.app).await?);
        }
        Ok(self.app.as_ref().expect("app just connected"))
    }

    /// Stop a spawned application; no-op in attach mode
    pub fn stop_app(&mut self) -> E2eResult<()> {
        if let Some(mut app) = self.app.take() {
            app.stop()?;
        }
        Ok(())
    }

    /// The full step list a scenario run executes: login comes first,
    /// since document windows require an authenticated session.
    fn compose(&self, scenario: &Scenario) -> Vec<ScenarioStep> {
        let mut executed = Vec::with_capacity(scenario.len() + 1);
        executed.push(ScenarioStep {
            name: format!("login as \"{}\"", self.config.auth.user),
            steps: session::login(&self.config.auth.user, &self.config.auth.password),
        });
        executed.extend(scenario.steps.iter().cloned());
        executed
    }

    /// Run one scenario end to end
    pub async fn run(&mut self, scenario: &Scenario) -> E2eResult<ScenarioReport> {
        let start = Instant::now();

        let base_url = self.ensure_app().await?.base_url().to_string();

        let bridge = PlaywrightBridge::new(BridgeConfig {
            base_url,
            artifact_dir: self.config.paths.artifact_dir.clone(),
            viewport_width: self.config.browser.viewport_width,
            viewport_height: self.config.browser.viewport_height,
            browser: self.config.browser.engine,
            headless: self.config.browser.headless,
        })?;

        info!("Running scenario: {} ({} steps)", scenario.name, scenario.len());

        let executed = self.compose(scenario);
        let outcomes = bridge.run(&executed).await?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let report =
            ScenarioReport::collect(scenario.name.clone(), &executed, &outcomes, duration_ms);

        for step in &report.steps {
            if step.ok {
                info!("✓ {} ({} ms)", step.name, step.duration_ms);
            } else if step.skipped {
                info!("- {} (skipped)", step.name);
            } else {
                error!(
                    "✗ {} - {}",
                    step.name,
                    step.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        info!(
            "Scenario {}: {} ({} ms)",
            report.name,
            if report.ok { "passed" } else { "FAILED" },
            report.duration_ms
        );

        self.write_report(&report)?;
        Ok(report)
    }

    /// Persist the report as JSON under the artifact directory
    pub fn write_report(&self, report: &ScenarioReport) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.paths.artifact_dir)?;

        let path = self
            .config
            .paths
            .artifact_dir
            .join(format!("{}.json", report.name));
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        info!("Report written to: {}", path.display());
        Ok(path)
    }
}

impl Drop for HarnessRunner {
    fn drop(&mut self) {
        let _ = self.stop_app();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::UiStep;

    #[test]
    fn composed_run_logs_in_first() {
        let runner = HarnessRunner::new(HarnessConfig::default());
        let mut scenario = Scenario::new("s");
        scenario.push("create product", vec![]);

        let executed = runner.compose(&scenario);
        assert_eq!(executed.len(), 2);
        assert!(executed[0].name.starts_with("login"));
        assert!(matches!(&executed[0].steps[0], UiStep::Navigate { path, .. }
            if path == "/login"));
        assert_eq!(executed[1].name, "create product");
    }
}
