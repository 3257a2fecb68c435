//! Pass 11 (spec §4.4.11): regular-cohort monthly early-shift cap — a
//! fixed policy constant, not configurable through the input envelope.

use shared::ShiftKind;

use crate::input::{REGULAR_COHORT_STATUS, REGULAR_MONTHLY_EARLY_CAP};
use crate::solver::Solver;
use crate::variables::VariableSet;

use super::{CompileContext, CompileInput};

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, _ctx: &mut CompileContext) {
    for (staff_idx, staff) in input.staff.iter().enumerate() {
        if staff.status.to_lowercase() != REGULAR_COHORT_STATUS {
            continue;
        }
        let early_vars: Vec<_> = (0..vars.num_dates())
            .filter(|&d| vars.is_employed(staff_idx, d))
            .filter_map(|d| vars.var(staff_idx, d, ShiftKind::Early))
            .collect();
        if early_vars.is_empty() {
            continue;
        }
        let terms: Vec<_> = early_vars.iter().map(|&v| (v, 1)).collect();
        solver.linear_le(&terms, REGULAR_MONTHLY_EARLY_CAP);
    }
}
