//! Shift-schedule optimization core (spec §1). Wires the Symbol Codec
//! (`shared`), Input Normalizer, Employment Calendar, Variable Builder,
//! Constraint Compiler, Solver Adapter and Solution Extractor into the
//! single [`optimize_schedule`] entry point (spec §6). Everything past the
//! entry point is a plain library call — no transport layer, no
//! persistence (spec §1 Out of scope).

pub mod calendar;
pub mod compiler;
pub mod config;
pub mod demo_data;
pub mod extractor;
pub mod holiday;
pub mod input;
pub mod solver;
pub mod variables;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use shared::{OptimizeError, OptimizeResult, PenaltyWeights, Staff};

use compiler::CompileInput;
use holiday::{HolidayOracle, NetworkHolidayOracle};
use solver::{Model, SolveParams, Solver};
use variables::VariableSet;

#[cfg(test)]
use holiday::StaticHolidayOracle;

#[derive(Debug, Clone, Serialize)]
pub struct ViolationEntry {
    pub description: String,
    pub count: i64,
    pub penalty: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeStats {
    pub num_conflicts: u64,
    pub num_branches: u64,
    pub wall_time: u64,
    pub total_off_days: i64,
    pub staff_count: usize,
    pub date_count: usize,
    pub total_violations: usize,
    pub total_violation_penalty: i64,
    pub prefilled_cells: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeConfig {
    pub penalty_weights: PenaltyWeights,
    pub timeout: u32,
    pub num_workers: u32,
}

/// The single return shape of [`optimize_schedule`] (spec §6 "Return
/// value"): one struct covers both success and failure so every caller
/// sees the same `success` discriminant rather than a Rust `Result` that
/// would need unwrapping for the documented non-throwing failure bands.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeResponse {
    pub success: bool,
    pub schedule: HashMap<String, HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solve_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_optimal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<OptimizeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<ViolationEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<OptimizeConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OptimizeResponse {
    fn failure(error: impl Into<String>, status: Option<&str>) -> Self {
        Self {
            success: false,
            schedule: HashMap::new(),
            solve_time: None,
            is_optimal: None,
            status: status.map(str::to_string),
            stats: None,
            violations: None,
            config: None,
            error: Some(error.into()),
        }
    }
}

/// Entry point (spec §6): build and solve one schedule. Never panics out —
/// band-4 internal exceptions (spec §7.4) are caught here and folded into
/// the same `{success: false, error}` shape that band-3 solver non-success
/// already produces, so every caller handles one response type.
pub fn optimize_schedule(
    staff: Vec<Staff>,
    dates: Vec<String>,
    raw_constraints: Value,
    timeout_seconds: u32,
) -> OptimizeResponse {
    let settings = config::Settings::load().unwrap_or_default();
    let oracle = NetworkHolidayOracle::new(settings.holiday.base_url, settings.holiday.country_code);
    optimize_schedule_with_oracle(staff, dates, raw_constraints, timeout_seconds, &oracle)
}

/// Same as [`optimize_schedule`] with an injected [`HolidayOracle`] — the
/// seam tests use to swap in a [`holiday::StaticHolidayOracle`] instead of
/// hitting the network (spec §9 "External holiday lookup").
pub fn optimize_schedule_with_oracle(
    staff: Vec<Staff>,
    dates: Vec<String>,
    raw_constraints: Value,
    timeout_seconds: u32,
    oracle: &dyn HolidayOracle,
) -> OptimizeResponse {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        run(&staff, &dates, &raw_constraints, timeout_seconds, oracle)
    })) {
        Ok(Ok(resp)) => resp,
        Ok(Err(err)) => OptimizeResponse::failure(err.to_string(), None),
        Err(_) => OptimizeResponse::failure("internal error: optimizer panicked", None),
    }
}

/// A fresh seed per call (spec §4.6 "Idempotence"): wall-clock milliseconds
/// modulo `2^31 - 1`, so repeated calls on identical input can land on
/// different equally-optimal solutions instead of always retracing the same
/// local-search trajectory.
fn fresh_random_seed() -> u64 {
    const MERSENNE_31: u64 = (1u64 << 31) - 1;
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    millis % MERSENNE_31
}

fn run(
    staff: &[Staff],
    dates: &[String],
    raw_constraints: &Value,
    timeout_seconds: u32,
    oracle: &dyn HolidayOracle,
) -> OptimizeResult<OptimizeResponse> {
    let parsed_dates = calendar::parse_horizon(dates);
    if parsed_dates.is_empty() {
        return Err(OptimizeError::InvalidInput(
            "no valid horizon dates supplied".into(),
        ));
    }

    let normalized = input::normalize(staff, dates, raw_constraints, timeout_seconds);
    let constraints = normalized.constraints;

    let holidays = oracle.holidays_in(
        *parsed_dates.first().unwrap(),
        *parsed_dates.last().unwrap(),
    );

    let mut model = Model::new();
    let vars = VariableSet::build(staff, &parsed_dates, |key| {
        model.new_bool(&format!("x_{}_{}_{:?}", key.staff_idx, key.date_idx, key.kind))
    });

    let compile_input = CompileInput {
        staff,
        dates: &parsed_dates,
        constraints: &constraints,
        holidays: &holidays,
    };
    let ctx = compiler::compile(&mut model, &vars, &compile_input);

    let params = SolveParams {
        timeout_seconds: constraints.solver_settings.timeout_seconds,
        num_workers: constraints.solver_settings.num_workers,
        random_seed: fresh_random_seed(),
    };
    let outcome = model.solve(params);

    if !outcome.status.is_success() {
        return Ok(OptimizeResponse::failure(
            format!("solver returned {}", outcome.status.as_str()),
            Some(outcome.status.as_str()),
        ));
    }

    let extraction = extractor::extract(
        &model,
        &vars,
        staff,
        &parsed_dates,
        &constraints,
        &ctx,
        outcome,
    );

    Ok(OptimizeResponse {
        success: true,
        schedule: extraction.schedule,
        solve_time: Some(extraction.stats.wall_time_ms as f64 / 1000.0),
        is_optimal: Some(outcome.status == solver::SolveStatus::Optimal),
        status: Some(outcome.status.as_str().to_string()),
        stats: Some(OptimizeStats {
            num_conflicts: extraction.stats.num_conflicts,
            num_branches: extraction.stats.num_branches,
            wall_time: extraction.stats.wall_time_ms,
            total_off_days: extraction.stats.total_off_days,
            staff_count: extraction.stats.staff_count,
            date_count: extraction.stats.date_count,
            total_violations: extraction.stats.total_violations,
            total_violation_penalty: extraction.stats.total_violation_penalty,
            prefilled_cells: extraction.stats.prefilled_cells,
        }),
        violations: Some(
            extraction
                .violations
                .into_iter()
                .map(|v| ViolationEntry {
                    description: v.description,
                    count: v.count,
                    penalty: v.penalty,
                })
                .collect(),
        ),
        config: Some(OptimizeConfig {
            penalty_weights: constraints.penalty_weights.clone(),
            timeout: constraints.solver_settings.timeout_seconds,
            num_workers: constraints.solver_settings.num_workers,
        }),
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    mockall::mock! {
        pub Oracle {}

        impl HolidayOracle for Oracle {
            fn holidays_in(&self, start: chrono::NaiveDate, end: chrono::NaiveDate) -> HashSet<chrono::NaiveDate>;
        }
    }

    fn staff(id: &str) -> Staff {
        Staff {
            id: id.into(),
            name: id.into(),
            status: "regular".into(),
            start_period: None,
            end_period: None,
            is_backup: false,
        }
    }

    #[test]
    fn rejects_empty_horizon() {
        let oracle = StaticHolidayOracle::default();
        let resp = optimize_schedule_with_oracle(vec![staff("a")], vec![], Value::Null, 1, &oracle);
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("horizon"));
    }

    #[test]
    fn solves_a_tiny_horizon() {
        let oracle = StaticHolidayOracle::default();
        let staff = vec![staff("a"), staff("b")];
        let dates = vec!["2026-01-01".to_string(), "2026-01-02".to_string()];
        let resp = optimize_schedule_with_oracle(staff, dates, Value::Null, 1, &oracle);
        assert!(resp.success);
        assert_eq!(resp.schedule.len(), 2);
    }

    #[test]
    fn queries_the_oracle_for_the_parsed_horizon_bounds() {
        let mut oracle = MockOracle::new();
        oracle
            .expect_holidays_in()
            .withf(|start, end| {
                *start == chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                    && *end == chrono::NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()
            })
            .times(1)
            .returning(|_, _| HashSet::new());

        let staff = vec![staff("a")];
        let dates = vec![
            "2026-01-01".to_string(),
            "2026-01-02".to_string(),
            "2026-01-03".to_string(),
        ];
        let resp = optimize_schedule_with_oracle(staff, dates, Value::Null, 1, &oracle);
        assert!(resp.success);
    }
}
