//! Pass 7 (spec §4.4.7): daily `Off` headcount bounds over non-backup
//! staff on non-calendar-off dates. Skipped entirely when disabled.

use shared::ShiftKind;

use super::{deficit_indicator, is_backup_staff, overflow_indicator, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    let limits = &input.constraints.daily_limits;
    if !limits.enabled {
        return;
    }

    let non_backup_idxs: Vec<usize> = input
        .staff
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_backup && !is_backup_staff(&s.id, input.constraints))
        .map(|(i, _)| i)
        .collect();

    for date_idx in 0..vars.num_dates() {
        if ctx.calendar_off_dates.contains(&date_idx) {
            continue;
        }
        let off_vars: Vec<_> = non_backup_idxs
            .iter()
            .filter(|&&s| vars.is_employed(s, date_idx))
            .filter_map(|&s| vars.var(s, date_idx, ShiftKind::Off))
            .collect();
        if off_vars.is_empty() {
            continue;
        }
        let terms: Vec<_> = off_vars.iter().map(|&v| (v, 1)).collect();
        let cap = off_vars.len() as i64;

        // Sanity clamp (ported from the original's `_add_daily_limits`):
        // at least one employed non-backup staffer must stay on, so neither
        // bound may exceed `cap - 1`; if that pulls min above max, lower min
        // rather than raise max.
        let ceiling = (cap - 1).max(0);
        let max_off = limits.max_off_per_day.min(ceiling);
        let min_off = limits.min_off_per_day.min(ceiling).min(max_off);

        if limits.is_hard {
            solver.linear_ge(&terms, min_off);
            solver.linear_le(&terms, max_off);
        } else {
            deficit_indicator(
                solver,
                ctx,
                "daily_min_shortfall",
                &terms,
                min_off,
                cap,
                input.constraints.penalty_weights.daily_limit,
                "Daily off count below minimum",
            );
            overflow_indicator(
                solver,
                ctx,
                "daily_max_overflow",
                &terms,
                max_off,
                cap,
                input.constraints.penalty_weights.daily_limit_max,
                "Daily off count above maximum",
            );
        }
    }
}
