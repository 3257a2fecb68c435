//! Pass 10 (spec §4.4.10): monthly off-equivalent bounds per staff. Backup
//! staff receive relaxed limits (`min=0, max=⌈1.5·max⌉`); staff with a
//! partial employment window have their bounds prorated to the portion of
//! the horizon they actually worked.

use shared::ShiftKind;

use super::{deficit_indicator, is_backup_staff, overflow_indicator, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    let Some(limit) = &input.constraints.monthly_limit else {
        return;
    };
    let weight = input.constraints.penalty_weights.monthly_limit;
    let total_days = vars.num_dates() as f64;

    for (staff_idx, staff) in input.staff.iter().enumerate() {
        let is_backup = staff.is_backup || is_backup_staff(&staff.id, input.constraints);

        let effective_dates: Vec<usize> = (0..vars.num_dates())
            .filter(|&d| {
                if limit.exclude_calendar_rules {
                    !ctx.calendar_off_dates.contains(&d)
                } else {
                    true
                }
            })
            .filter(|&d| vars.is_employed(staff_idx, d))
            .collect();
        if effective_dates.is_empty() {
            continue;
        }

        let (min_count, max_count) = if is_backup {
            (0, (1.5 * limit.max_count as f64).ceil() as i64)
        } else if staff.has_partial_window() {
            let working_days = effective_dates.len() as f64;
            let ratio = working_days / total_days.max(1.0);
            let min = (working_days / 4.25).floor() as i64;
            let max = ((min + 1) as f64).max((ratio * limit.max_count as f64).floor());
            (min, max as i64)
        } else {
            (limit.min_count, limit.max_count)
        };

        // Sanity clamp (ported from the original's `_add_monthly_limits`):
        // neither bound may exceed the number of flexible days actually
        // available to this staff member; if that pulls min above max,
        // lower min rather than raise max.
        let num_flexible_days = effective_dates.len() as i64;
        let max_count = max_count.min(num_flexible_days);
        let min_count = min_count.min(num_flexible_days).min(max_count);

        let off_vars: Vec<_> = effective_dates
            .iter()
            .filter_map(|&d| vars.var(staff_idx, d, ShiftKind::Off))
            .collect();
        let early_vars: Vec<_> = effective_dates
            .iter()
            .filter_map(|&d| vars.var(staff_idx, d, ShiftKind::Early))
            .collect();

        let mut terms: Vec<_> = off_vars.iter().map(|&v| (v, 2)).collect();
        terms.extend(early_vars.iter().map(|&v| (v, 1)));
        if terms.is_empty() {
            continue;
        }

        let star_equiv = ctx
            .prefilled_star_equiv_by_staff
            .get(&staff.id)
            .copied()
            .unwrap_or(0);
        let adjusted_min = 2 * min_count - star_equiv;
        let adjusted_max = 2 * max_count - star_equiv;
        let cap = effective_dates.len() as i64 * 2;

        if limit.is_hard {
            solver.linear_ge(&terms, adjusted_min);
            solver.linear_le(&terms, adjusted_max);
        } else {
            deficit_indicator(
                solver,
                ctx,
                "monthly_min_deficit",
                &terms,
                adjusted_min,
                cap,
                weight,
                format!("{} monthly off-equivalent below minimum", staff.id),
            );
            overflow_indicator(
                solver,
                ctx,
                "monthly_max_overflow",
                &terms,
                adjusted_max,
                cap,
                weight,
                format!("{} monthly off-equivalent above maximum", staff.id),
            );
        }
    }
}
