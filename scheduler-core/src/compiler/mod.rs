//! Constraint Compiler (spec §4.4): the ordered-pass pipeline that lowers
//! the canonical [`Constraints`](crate::input::Constraints) into the
//! [`Solver`] model. Passes run in the fixed order listed in the module
//! doc of each submodule; later passes consult [`CompileContext`] state
//! populated by earlier ones (spec §9 "Pass ordering as an invariant").

pub mod adjacent;
pub mod backup_coverage;
pub mod calendar_rules;
pub mod context;
pub mod daily_limits;
pub mod early_cap;
pub mod exactly_one;
pub mod monthly_limits;
pub mod monthly_prep;
pub mod objective;
pub mod post_period;
pub mod prefilled;
pub mod priority_rest_guarantee;
pub mod priority_rules;
pub mod rest_window;
pub mod staff_group;
pub mod staff_status;
pub mod staff_type_limits;

use std::collections::HashSet;

use chrono::NaiveDate;
use shared::Staff;

pub use context::{BackupSlot, CompileContext, Violation};

use crate::input::Constraints;
use crate::solver::{Solver, VarId};
use crate::variables::VariableSet;

/// Add `weight * var` as a penalty (negative contribution) to the
/// maximized objective, and record it for the violation report.
pub(crate) fn penalize(
    solver: &mut impl Solver,
    ctx: &mut CompileContext,
    var: VarId,
    weight: i64,
    description: impl Into<String>,
) {
    solver.add_objective_term(var, -weight);
    ctx.add_violation(description, var, weight);
}

/// Add `weight * var` as a preference (positive contribution); not a
/// violation, so nothing is recorded in the report.
pub(crate) fn reward(solver: &mut impl Solver, var: VarId, weight: i64) {
    solver.add_objective_term(var, weight);
}

/// Allocates an integer indicator bounded to `[0, cap]` equal to the
/// positive part of `sum(terms) - threshold`, penalized at `weight` (spec
/// §4.4.7's "penalty integers for the positive parts" pattern, reused by
/// every linear-bound SOFT pass).
pub(crate) fn overflow_indicator(
    solver: &mut impl Solver,
    ctx: &mut CompileContext,
    name: &str,
    terms: &[(VarId, i64)],
    threshold: i64,
    cap: i64,
    weight: i64,
    description: impl Into<String>,
) -> VarId {
    let indicator = solver.new_int(0, cap, name);
    let mut ge_terms: Vec<(VarId, i64)> = vec![(indicator, 1)];
    ge_terms.extend(terms.iter().map(|(v, c)| (*v, -c)));
    solver.linear_ge(&ge_terms, -threshold);
    penalize(solver, ctx, indicator, weight, description);
    indicator
}

/// Allocates a boolean `indicator >= a + b - 1`, i.e. forced to 1 whenever
/// both `a` and `b` are 1 (the standard AND-lower-bound encoding). The
/// search drives it back down to 0 whenever the objective penalizes it,
/// since nothing else forces it upward.
pub(crate) fn and_indicator(solver: &mut impl Solver, name: &str, a: VarId, b: VarId) -> VarId {
    let indicator = solver.new_bool(name);
    solver.linear_ge(&[(indicator, 1), (a, -1), (b, -1)], -1);
    indicator
}

/// Mirror of [`overflow_indicator`] for the positive part of
/// `threshold - sum(terms)` (a SOFT lower bound / deficit penalty).
pub(crate) fn deficit_indicator(
    solver: &mut impl Solver,
    ctx: &mut CompileContext,
    name: &str,
    terms: &[(VarId, i64)],
    threshold: i64,
    cap: i64,
    weight: i64,
    description: impl Into<String>,
) -> VarId {
    let indicator = solver.new_int(0, cap, name);
    let mut ge_terms: Vec<(VarId, i64)> = vec![(indicator, 1)];
    ge_terms.extend(terms.iter().cloned());
    solver.linear_ge(&ge_terms, threshold);
    penalize(solver, ctx, indicator, weight, description);
    indicator
}

/// Everything one compiler pass needs to read the horizon and roster.
pub struct CompileInput<'a> {
    pub staff: &'a [Staff],
    pub dates: &'a [NaiveDate],
    pub constraints: &'a Constraints,
    pub holidays: &'a HashSet<NaiveDate>,
}

/// A staff member counts as backup if flagged directly on the record or
/// named as an active backup assignment (spec §3 "Backup assignment",
/// SPEC_FULL.md §3 backup-flag union).
pub(crate) fn is_backup_staff(staff_id: &str, constraints: &Constraints) -> bool {
    constraints
        .backup_assignments
        .iter()
        .any(|b| b.staff_id == staff_id && b.is_active)
}

pub fn compile(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput) -> CompileContext {
    let mut ctx = CompileContext::default();

    exactly_one::run(solver, vars, input, &mut ctx);
    prefilled::run(solver, vars, input, &mut ctx);
    calendar_rules::run(solver, vars, input, &mut ctx);
    backup_coverage::run(solver, vars, input, &mut ctx);
    staff_status::run(solver, vars, input, &mut ctx);
    staff_group::run(solver, vars, input, &mut ctx);
    daily_limits::run(solver, vars, input, &mut ctx);
    staff_type_limits::run(solver, vars, input, &mut ctx);
    monthly_prep::run(vars, input, &mut ctx);
    monthly_limits::run(solver, vars, input, &mut ctx);
    early_cap::run(solver, vars, input, &mut ctx);
    adjacent::run(solver, vars, input, &mut ctx);
    rest_window::run(solver, vars, input, &mut ctx);
    post_period::run(solver, vars, input, &mut ctx);
    priority_rules::run(solver, vars, input, &mut ctx);
    priority_rest_guarantee::run(solver, vars, input, &mut ctx);
    objective::run(solver, vars, input, &ctx);

    ctx
}
