//! Pass 8 (spec §4.4.8): per-status-cohort daily limits. Always compiled
//! SOFT internally — a requested HARD mode is upgraded to a 3× penalty
//! multiplier rather than a genuine hard bound (spec §9 open question 1),
//! to keep the model always feasible.

use shared::ShiftKind;

use super::{deficit_indicator, is_backup_staff, overflow_indicator, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

const UNLIMITED: i64 = 999;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    let base_weight = input.constraints.penalty_weights.staff_type_limit;

    for (status, limit) in &input.constraints.staff_type_limits {
        let multiplier = if limit.is_hard { 3 } else { 1 };
        let max_off = limit.max_off.unwrap_or(UNLIMITED);
        let max_early = limit.max_early.unwrap_or(UNLIMITED);

        let member_idxs: Vec<usize> = input
            .staff
            .iter()
            .enumerate()
            .filter(|(_, s)| &s.status == status && !s.is_backup && !is_backup_staff(&s.id, input.constraints))
            .map(|(i, _)| i)
            .collect();
        if member_idxs.is_empty() {
            continue;
        }

        for date_idx in 0..vars.num_dates() {
            let off_vars: Vec<_> = member_idxs
                .iter()
                .filter(|&&s| vars.is_employed(s, date_idx))
                .filter_map(|&s| vars.var(s, date_idx, ShiftKind::Off))
                .collect();
            let early_vars: Vec<_> = member_idxs
                .iter()
                .filter(|&&s| vars.is_employed(s, date_idx))
                .filter_map(|&s| vars.var(s, date_idx, ShiftKind::Early))
                .collect();
            if off_vars.is_empty() && early_vars.is_empty() {
                continue;
            }

            let mut terms: Vec<_> = off_vars.iter().map(|&v| (v, 2)).collect();
            terms.extend(early_vars.iter().map(|&v| (v, 1)));
            let cap = member_idxs.len() as i64 * 2;

            overflow_indicator(
                solver,
                ctx,
                "staff_type_overflow",
                &terms,
                2 * max_off + max_early,
                cap,
                base_weight * multiplier,
                format!("Status {status} off/early over limit"),
            );

            if let Some(min_off) = limit.min_off {
                let off_terms: Vec<_> = off_vars.iter().map(|&v| (v, 1)).collect();
                if !off_terms.is_empty() {
                    deficit_indicator(
                        solver,
                        ctx,
                        "staff_type_deficit",
                        &off_terms,
                        min_off,
                        off_vars.len() as i64,
                        base_weight * 2 * multiplier,
                        format!("Status {status} off below minimum"),
                    );
                }
            }
        }
    }
}
