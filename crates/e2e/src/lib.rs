//! erpweb E2E Test Harness
//!
//! This crate drives the erpweb client through real browser sessions:
//! - Attaches to (or spawns) the web client and waits for it to be ready
//! - Assembles masterdata records from JSON fixtures with per-run stamps
//! - Compiles a scenario into a single Playwright script run via `node`
//! - Reports per-step results and captures a screenshot on failure
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    HarnessRunner (Rust)                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  flows::create_bill_of_material(fixtures, stamp)             │
//! │    ├── ProductCategory ── apply() ──┐                        │
//! │    ├── Product ───────── apply() ───┤                        │
//! │    ├── Product (component) apply() ─┼─> Scenario             │
//! │    ├── BillOfMaterial ── apply() ───┤     (ordered steps)    │
//! │    └── visit product window ────────┘                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  AppHandle                 PlaywrightBridge                  │
//! │    ├── attach / spawn        ├── login + steps -> one script │
//! │    └── wait_until_ready      ├── node <script>               │
//! │                              └── marker lines -> StepReport  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod flows;
pub mod masterdata;
pub mod runner;
pub mod scenario;
pub mod session;

pub use config::HarnessConfig;
pub use error::{E2eError, E2eResult};
pub use masterdata::Masterdata;
pub use runner::HarnessRunner;
pub use scenario::{Scenario, ScenarioReport, ScenarioStep, StepReport};
