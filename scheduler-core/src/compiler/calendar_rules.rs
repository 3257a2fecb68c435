//! Pass 3 (spec §4.4.3): calendar overrides. `must_day_off` dates force
//! `Off` unless the staff has an early-shift preference for that date, in
//! which case a high-weight SOFT incentive toward `Early` is used instead.
//! `must_work` dates force `Work` for every employed staff.

use shared::ShiftKind;

use super::{reward, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

fn has_early_preference(input: &CompileInput, staff_id: &str, date_str: &str) -> bool {
    let Some(pref) = input.constraints.early_shift_preferences.get(staff_id) else {
        return false;
    };
    pref.by_date.get(date_str).copied().unwrap_or(pref.default.unwrap_or(false))
}

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    for (date_idx, date) in input.dates.iter().enumerate() {
        let date_str = date.format("%Y-%m-%d").to_string();
        let Some(rule) = input.constraints.calendar_rules.get(&date_str) else {
            continue;
        };

        if rule.must_day_off {
            ctx.calendar_off_dates.insert(date_idx);
            for (staff_idx, staff) in input.staff.iter().enumerate() {
                if !vars.is_employed(staff_idx, date_idx) {
                    continue;
                }
                if has_early_preference(input, &staff.id, &date_str) {
                    if let Some(early_var) = vars.var(staff_idx, date_idx, ShiftKind::Early) {
                        reward(
                            solver,
                            early_var,
                            input.constraints.penalty_weights.early_pref_on_must_off,
                        );
                    }
                } else if let Some(off_var) = vars.var(staff_idx, date_idx, ShiftKind::Off) {
                    solver.fix(off_var, 1);
                }
            }
        }

        if rule.must_work {
            ctx.calendar_work_dates.insert(date_idx);
            for staff_idx in 0..vars.num_staff() {
                if !vars.is_employed(staff_idx, date_idx) {
                    continue;
                }
                if let Some(work_var) = vars.var(staff_idx, date_idx, ShiftKind::Work) {
                    solver.fix(work_var, 1);
                }
            }
        }
    }
}
