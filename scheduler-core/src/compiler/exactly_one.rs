//! Pass 1 (spec §4.4.1): exactly one kind-boolean true per employed cell.

use shared::ShiftKind;

use super::{CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, _ctx: &mut CompileContext) {
    for staff_idx in 0..vars.num_staff() {
        for date_idx in 0..vars.num_dates() {
            if !vars.is_employed(staff_idx, date_idx) {
                continue;
            }
            let cell: Vec<_> = ShiftKind::ALL
                .iter()
                .filter_map(|&k| vars.var(staff_idx, date_idx, k))
                .collect();
            solver.exactly_one(&cell);
        }
    }
    let _ = input;
}
