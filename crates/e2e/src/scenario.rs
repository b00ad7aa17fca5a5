//! Scenarios and their reports
//!
//! A scenario is a named, strictly ordered sequence of steps. Steps run
//! fail-fast: the first failure aborts the rest, which are reported as
//! skipped rather than silently dropped.

use serde::{Deserialize, Serialize};

use crate::browser::{BridgeOutcome, UiStep};

/// One named step of a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub name: String,
    pub steps: Vec<UiStep>,
}

/// An ordered user journey through the web client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a named step
    pub fn push(&mut self, name: impl Into<String>, steps: Vec<UiStep>) {
        self.steps.push(ScenarioStep {
            name: name.into(),
            steps,
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Outcome of one scenario step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub name: String,
    pub ok: bool,
    pub skipped: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Outcome of a whole scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub ok: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    /// Join executed steps with the bridge's marker outcomes
    ///
    /// Steps after the first failure produce no markers; they are
    /// reported as skipped.
    pub fn collect(
        name: impl Into<String>,
        executed: &[ScenarioStep],
        outcomes: &[BridgeOutcome],
        duration_ms: u64,
    ) -> Self {
        let mut steps = Vec::with_capacity(executed.len());
        let mut failed = false;

        for (i, step) in executed.iter().enumerate() {
            match outcomes.iter().find(|o| o.step == i) {
                Some(outcome) => {
                    if !outcome.ok {
                        failed = true;
                    }
                    steps.push(StepReport {
                        name: step.name.clone(),
                        ok: outcome.ok,
                        skipped: false,
                        duration_ms: outcome.duration_ms,
                        error: outcome.error.clone(),
                    });
                }
                None => steps.push(StepReport {
                    name: step.name.clone(),
                    ok: false,
                    skipped: true,
                    duration_ms: 0,
                    error: None,
                }),
            }
        }

        Self {
            name: name.into(),
            ok: !failed && steps.iter().all(|s| !s.skipped),
            duration_ms,
            steps,
        }
    }

    /// The step that sank the run, if any
    pub fn failed_step(&self) -> Option<&StepReport> {
        self.steps.iter().find(|s| !s.ok && !s.skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str) -> ScenarioStep {
        ScenarioStep {
            name: name.to_string(),
            steps: vec![],
        }
    }

    fn outcome(step: usize, ok: bool) -> BridgeOutcome {
        BridgeOutcome {
            step,
            ok,
            duration_ms: 100,
            error: if ok { None } else { Some("boom".to_string()) },
        }
    }

    #[test]
    fn all_green_run_is_ok() {
        let executed = [step("a"), step("b")];
        let outcomes = [outcome(0, true), outcome(1, true)];
        let report = ScenarioReport::collect("s", &executed, &outcomes, 250);
        assert!(report.ok);
        assert!(report.failed_step().is_none());
        assert_eq!(report.steps.len(), 2);
    }

    #[test]
    fn failure_marks_later_steps_skipped() {
        let executed = [step("login"), step("create category"), step("create product")];
        let outcomes = [outcome(0, true), outcome(1, false)];
        let report = ScenarioReport::collect("s", &executed, &outcomes, 250);

        assert!(!report.ok);
        assert_eq!(report.failed_step().unwrap().name, "create category");
        let last = &report.steps[2];
        assert!(last.skipped);
        assert!(!last.ok);
    }

    #[test]
    fn scenario_preserves_push_order() {
        let mut scenario = Scenario::new("ordered");
        scenario.push("first", vec![]);
        scenario.push("second", vec![]);
        assert_eq!(scenario.len(), 2);
        assert_eq!(scenario.steps[0].name, "first");
        assert_eq!(scenario.steps[1].name, "second");
    }
}
