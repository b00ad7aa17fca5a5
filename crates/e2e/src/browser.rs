//! Playwright browser automation
//!
//! Drives Playwright through a generated Node.js script executed via
//! `node`. A whole scenario compiles into ONE script so that the login
//! session survives across steps; the script prints one JSON marker line
//! per scenario step, which the bridge parses back into step reports.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::scenario::ScenarioStep;

/// Playwright browser engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::InvalidConfig(format!("unknown browser: {other}"))),
        }
    }
}

/// A single browser interaction
///
/// This is the vocabulary the masterdata builders speak; each variant
/// maps to one Playwright page call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiStep {
    /// Navigate to a path relative to the base URL
    Navigate {
        path: String,
        #[serde(default)]
        wait_for: Option<String>,
    },

    /// Wait for an element to become visible
    WaitFor {
        selector: String,
        timeout_ms: u64,
    },

    /// Fill an input field
    Fill {
        selector: String,
        value: String,
    },

    /// Click an element
    Click {
        selector: String,
        timeout_ms: u64,
    },

    /// Force a checkbox into a known state
    SetChecked {
        selector: String,
        checked: bool,
    },

    /// Press a key on the focused element
    Press {
        key: String,
    },

    /// Take a screenshot into the artifact directory
    Screenshot {
        name: String,
    },
}

/// Outcome of one scenario step as reported by the generated script
#[derive(Debug, Clone, Deserialize)]
struct Marker {
    step: usize,
    ok: bool,
    #[serde(default)]
    duration_ms: u64,
    #[serde(default)]
    error: Option<String>,
}

/// Raw per-step outcome produced by a bridge run
#[derive(Debug, Clone)]
pub struct BridgeOutcome {
    pub step: usize,
    pub ok: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Escape a string for inclusion in single-quoted JS source
fn js_str(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

/// Configuration for the Playwright bridge
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: String,
    pub artifact_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            artifact_dir: PathBuf::from("test-results"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }
}

/// Playwright bridge handle
pub struct PlaywrightBridge {
    config: BridgeConfig,
}

impl PlaywrightBridge {
    /// Create a bridge, verifying Playwright is installed
    pub fn new(config: BridgeConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        std::fs::create_dir_all(&config.artifact_dir)?;
        Ok(Self { config })
    }

    /// Create a bridge without the installation preflight (tests)
    #[doc(hidden)]
    pub fn unchecked(config: BridgeConfig) -> Self {
        Self { config }
    }

    fn check_playwright_installed() -> E2eResult<()> {
        let status = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Render one scenario step into Playwright page calls
    fn step_to_js(&self, step: &UiStep) -> String {
        match step {
            UiStep::Navigate { path, wait_for } => {
                let wait = wait_for
                    .as_ref()
                    .map(|s| format!("\n    await page.waitForSelector('{}');", js_str(s)))
                    .unwrap_or_default();
                format!("    await page.goto(baseUrl + '{}');{}", js_str(path), wait)
            }
            UiStep::WaitFor { selector, timeout_ms } => format!(
                "    await page.waitForSelector('{}', {{ state: 'visible', timeout: {} }});",
                js_str(selector),
                timeout_ms
            ),
            UiStep::Fill { selector, value } => format!(
                "    await page.fill('{}', '{}');",
                js_str(selector),
                js_str(value)
            ),
            UiStep::Click { selector, timeout_ms } => format!(
                "    await page.click('{}', {{ timeout: {} }});",
                js_str(selector),
                timeout_ms
            ),
            UiStep::SetChecked { selector, checked } => format!(
                "    await page.setChecked('{}', {});",
                js_str(selector),
                checked
            ),
            UiStep::Press { key } => format!("    await page.keyboard.press('{}');", js_str(key)),
            UiStep::Screenshot { name } => {
                let path = self.config.artifact_dir.join(format!("{}.png", name));
                format!(
                    "    await page.screenshot({{ path: '{}', fullPage: true }});",
                    js_str(&path.to_string_lossy())
                )
            }
        }
    }

    /// Build the complete Node.js program for a scenario
    ///
    /// Steps share one browser context; a marker line is printed after
    /// each scenario step so the bridge can attribute failures.
    pub fn build_script(&self, steps: &[ScenarioStep]) -> String {
        let failure_shot = self.config.artifact_dir.join("failure.png");

        let mut script = format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';
  let step = 0;
  let t0 = Date.now();
  const mark = (extra) => console.log(JSON.stringify(Object.assign({{ step }}, extra)));

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            base_url = js_str(&self.config.base_url),
        );

        for (i, scenario_step) in steps.iter().enumerate() {
            script.push_str(&format!(
                "\n    // Step {}: {}\n    step = {}; t0 = Date.now();\n",
                i, scenario_step.name, i
            ));
            for ui_step in &scenario_step.steps {
                script.push_str(&self.step_to_js(ui_step));
                script.push('\n');
            }
            script.push_str("    mark({ ok: true, duration_ms: Date.now() - t0 });\n");
        }

        script.push_str(&format!(
            r#"  }} catch (error) {{
    await page.screenshot({{ path: '{failure_shot}', fullPage: true }}).catch(() => {{}});
    mark({{ ok: false, duration_ms: Date.now() - t0, error: error.message }});
    process.exitCode = 1;
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            failure_shot = js_str(&failure_shot.to_string_lossy()),
        ));

        script
    }

    /// Execute a scenario's steps and collect per-step outcomes
    pub async fn run(&self, steps: &[ScenarioStep]) -> E2eResult<Vec<BridgeOutcome>> {
        let script = self.build_script(steps);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running Playwright script: {}", script_path.display());

        // The script lives in a tempdir, so point module resolution back
        // at the harness's own node_modules.
        let output = TokioCommand::new("node")
            .arg(&script_path)
            .env("NODE_PATH", "node_modules")
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let outcomes = Self::parse_markers(&stdout);

        // A run with no markers at all means the script never got going
        // (missing playwright module, syntax error in an interpolated
        // value, browser launch failure).
        if outcomes.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(E2eError::Playwright(format!(
                "script produced no step markers:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        Ok(outcomes)
    }

    /// Extract marker lines from script stdout
    ///
    /// The page under test may log arbitrary lines; only lines that are
    /// a whole JSON object with a `step` field count as markers.
    pub fn parse_markers(stdout: &str) -> Vec<BridgeOutcome> {
        let marker_line = Regex::new(r#"^\{"step":.*\}$"#).expect("static regex");

        stdout
            .lines()
            .map(str::trim)
            .filter(|line| marker_line.is_match(line))
            .filter_map(|line| serde_json::from_str::<Marker>(line).ok())
            .map(|m| BridgeOutcome {
                step: m.step,
                ok: m.ok,
                duration_ms: m.duration_ms,
                error: m.error,
            })
            .collect()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
