//! Sweep plans: the on-disk form of a [SweepScenario](crate::sweep::SweepScenario),
//! readable from JSON or YAML. Omitted fields fall back to the reference
//! grid (50 applicants, 10 seats, 1000 repetitions).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sweep::SweepScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPlan {
    #[serde(default = "default_applicants")]
    pub applicants: usize,
    #[serde(default = "default_seats")]
    pub seats: usize,
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_quota_fractions")]
    pub quota_fractions: Vec<f64>,
    #[serde(default = "default_bias_factors")]
    pub bias_factors: Vec<f64>,
}

fn default_applicants() -> usize {
    50
}

fn default_seats() -> usize {
    10
}

fn default_repetitions() -> usize {
    1000
}

fn default_quota_fractions() -> Vec<f64> {
    vec![0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
}

fn default_bias_factors() -> Vec<f64> {
    vec![0.01, 0.33, 0.67, 0.9, 1.0]
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            applicants: default_applicants(),
            seats: default_seats(),
            repetitions: default_repetitions(),
            seed: 0,
            quota_fractions: default_quota_fractions(),
            bias_factors: default_bias_factors(),
        }
    }
}

impl SweepPlan {
    pub fn to_scenario(&self) -> SweepScenario {
        SweepScenario {
            applicants: self.applicants,
            seats: self.seats,
            repetitions: self.repetitions,
            seed: self.seed,
            quota_fractions: self.quota_fractions.clone(),
            bias_factors: self.bias_factors.clone(),
        }
    }
}

/// Load a plan from disk. `.yaml`/`.yml` parse as YAML, anything else as JSON.
pub fn load_plan(path: &str) -> Result<SweepPlan, String> {
    let raw =
        fs::read_to_string(path).map_err(|err| format!("unable to read '{path}': {err}"))?;
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml") {
        serde_yaml::from_str(&raw).map_err(|err| format!("unable to parse yaml '{path}': {err}"))
    } else {
        serde_json::from_str(&raw).map_err(|err| format!("unable to parse json '{path}': {err}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlanSeverity {
    Error,
    Warning,
    Info,
}

impl PlanSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for PlanSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDiagnostic {
    pub severity: PlanSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for PlanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanReport {
    pub diagnostics: Vec<PlanDiagnostic>,
}

impl PlanReport {
    pub fn push(
        &mut self,
        severity: PlanSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(PlanDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == PlanSeverity::Error)
    }
}

/// Semantic checks beyond what serde can express. Range violations are
/// errors (they would fail selector construction anyway); shapes that run
/// but produce dubious numbers are warnings.
pub fn validate_plan(plan: &SweepPlan) -> PlanReport {
    let mut report = PlanReport::default();

    if plan.applicants == 0 {
        report.push(PlanSeverity::Error, "applicants", "must be at least 1");
    }
    if plan.seats == 0 {
        report.push(PlanSeverity::Error, "seats", "must be at least 1");
    }
    if plan.repetitions == 0 {
        report.push(PlanSeverity::Error, "repetitions", "must be at least 1");
    }
    if plan.seats > plan.applicants {
        report.push(
            PlanSeverity::Warning,
            "seats",
            format!(
                "{} seats for {} applicants: every selection will be short",
                plan.seats, plan.applicants
            ),
        );
    }
    if plan.repetitions > 0 && plan.repetitions < 30 {
        report.push(
            PlanSeverity::Warning,
            "repetitions",
            format!("mean over {} repetitions is noisy", plan.repetitions),
        );
    }

    if plan.quota_fractions.is_empty() {
        report.push(PlanSeverity::Error, "quota_fractions", "must not be empty");
    }
    for (index, &fraction) in plan.quota_fractions.iter().enumerate() {
        let context = format!("quota_fractions[{index}]");
        if !(fraction > 0.0 && fraction <= 1.0) {
            report.push(
                PlanSeverity::Error,
                context,
                format!("must be within (0, 1], got {fraction}"),
            );
        } else if fraction < 0.5 {
            // Two groups share the cap: below 0.5 a full selection is
            // impossible by construction.
            report.push(
                PlanSeverity::Warning,
                context,
                format!("cap below half the seats ({fraction}) cannot fill every seat"),
            );
        }
    }

    if plan.bias_factors.is_empty() {
        report.push(PlanSeverity::Error, "bias_factors", "must not be empty");
    }
    for (index, &bias) in plan.bias_factors.iter().enumerate() {
        let context = format!("bias_factors[{index}]");
        if !(0.0..=1.0).contains(&bias) {
            report.push(
                PlanSeverity::Error,
                context,
                format!("must be within [0, 1], got {bias}"),
            );
        } else if bias == 0.0 {
            report.push(
                PlanSeverity::Info,
                context,
                "bias 0 ranks every open-group applicant equally (tie order decides)",
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_matches_reference_grid() {
        let plan = SweepPlan::default();
        assert_eq!(plan.applicants, 50);
        assert_eq!(plan.seats, 10);
        assert_eq!(plan.repetitions, 1000);
        assert_eq!(plan.quota_fractions.len(), 6);
        assert_eq!(plan.bias_factors.len(), 5);
        assert!(!validate_plan(&plan).has_errors());
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let plan: SweepPlan = serde_json::from_str("{\"seats\": 4}").expect("minimal plan parses");
        assert_eq!(plan.seats, 4);
        assert_eq!(plan.applicants, 50);
        assert_eq!(plan.repetitions, 1000);
    }

    #[test]
    fn out_of_range_values_are_errors() {
        let plan = SweepPlan {
            bias_factors: vec![-0.2, 0.5],
            quota_fractions: vec![0.0, 0.8],
            ..SweepPlan::default()
        };
        let report = validate_plan(&plan);
        assert!(report.has_errors());
        let contexts: Vec<&str> = report
            .diagnostics
            .iter()
            .filter(|diag| diag.severity == PlanSeverity::Error)
            .map(|diag| diag.context.as_str())
            .collect();
        assert_eq!(contexts, vec!["quota_fractions[0]", "bias_factors[0]"]);
    }

    #[test]
    fn dubious_shapes_warn_but_do_not_error() {
        let plan = SweepPlan {
            applicants: 5,
            seats: 10,
            repetitions: 10,
            quota_fractions: vec![0.4, 0.8],
            ..SweepPlan::default()
        };
        let report = validate_plan(&plan);
        assert!(!report.has_errors());
        let warnings = report
            .diagnostics
            .iter()
            .filter(|diag| diag.severity == PlanSeverity::Warning)
            .count();
        assert_eq!(warnings, 3, "seats, repetitions, quota_fractions[0]");
    }

    #[test]
    fn zero_bias_gets_an_info_note() {
        let plan = SweepPlan {
            bias_factors: vec![0.0],
            ..SweepPlan::default()
        };
        let report = validate_plan(&plan);
        assert!(!report.has_errors());
        assert!(report
            .diagnostics
            .iter()
            .any(|diag| diag.severity == PlanSeverity::Info));
    }
}
