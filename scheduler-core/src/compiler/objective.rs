//! Final objective term (spec §4.5, last bullet): a flat rest bonus for
//! every non-backup employed cell. Every other objective term (preference
//! bonuses, SOFT violation penalties) is added inline by the pass that
//! creates the corresponding indicator — see `DESIGN.md`.

use shared::ShiftKind;

use super::{is_backup_staff, reward, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, _ctx: &CompileContext) {
    let dayoff_bonus = input.constraints.penalty_weights.dayoff_bonus;
    let early_bonus = dayoff_bonus / 2;

    for (staff_idx, staff) in input.staff.iter().enumerate() {
        if staff.is_backup || is_backup_staff(&staff.id, input.constraints) {
            continue;
        }
        for date_idx in 0..vars.num_dates() {
            if !vars.is_employed(staff_idx, date_idx) {
                continue;
            }
            if let Some(off_var) = vars.var(staff_idx, date_idx, ShiftKind::Off) {
                reward(solver, off_var, dayoff_bonus);
            }
            if let Some(early_var) = vars.var(staff_idx, date_idx, ShiftKind::Early) {
                reward(solver, early_var, early_bonus);
            }
        }
    }
}
