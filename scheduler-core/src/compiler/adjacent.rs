//! Pass 12 (spec §4.4.12): adjacent-pair prevention. Penalizes `Off`/`Early`
//! landing on both of two consecutive employed dates, and separately
//! protects a pre-filled non-off day from having its neighbor pushed to
//! `Off`.

use shared::{decode, ShiftKind};

use super::{and_indicator, penalize, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

fn prefilled_non_off(input: &CompileInput, staff_id: &str, date_idx: usize) -> bool {
    let date_str = input.dates[date_idx].format("%Y-%m-%d").to_string();
    input
        .constraints
        .prefilled_schedule
        .get(staff_id)
        .and_then(|cells| cells.get(&date_str))
        .and_then(|glyph| decode(glyph))
        .is_some_and(|kind| kind != ShiftKind::Off)
}

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    let weight = input.constraints.penalty_weights.adjacent_conflict;
    let prefilled_weight = input.constraints.penalty_weights.prefilled_adjacent;

    for (staff_idx, staff) in input.staff.iter().enumerate() {
        for d1 in 0..vars.num_dates().saturating_sub(1) {
            let d2 = d1 + 1;
            if !vars.is_employed(staff_idx, d1) || !vars.is_employed(staff_idx, d2) {
                continue;
            }
            if ctx.calendar_off_dates.contains(&d1) && ctx.calendar_off_dates.contains(&d2) {
                continue;
            }

            let off1 = vars.var(staff_idx, d1, ShiftKind::Off);
            let off2 = vars.var(staff_idx, d2, ShiftKind::Off);
            let early1 = vars.var(staff_idx, d1, ShiftKind::Early);
            let early2 = vars.var(staff_idx, d2, ShiftKind::Early);

            let patterns: [(&str, Option<_>, Option<_>); 4] = [
                ("Off-Off", off1, off2),
                ("Early-Off", early1, off2),
                ("Off-Early", off1, early2),
                ("Early-Early", early1, early2),
            ];
            for (label, a, b) in patterns {
                if let (Some(a), Some(b)) = (a, b) {
                    let indicator = and_indicator(solver, "adjacent_pattern", a, b);
                    penalize(solver, ctx, indicator, weight, format!("{} adjacent pattern for {}", label, staff.id));
                }
            }

            if prefilled_non_off(input, &staff.id, d1) {
                if let Some(off2) = off2 {
                    penalize(solver, ctx, off2, prefilled_weight, format!("{} off after pre-filled day", staff.id));
                }
            }
            if prefilled_non_off(input, &staff.id, d2) {
                if let Some(off1) = off1 {
                    penalize(solver, ctx, off1, prefilled_weight, format!("{} off before pre-filled day", staff.id));
                }
            }
        }
    }
}
