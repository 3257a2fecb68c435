//! Pass 13 (spec §4.4.13): rolling 6-day rest window. Labor-law style
//! compliance — `five_day_rest` carries a deliberately high default
//! weight (200) even in SOFT mode.

use shared::ShiftKind;

use super::{deficit_indicator, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

const WINDOW: usize = 6;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    if vars.num_dates() < WINDOW {
        return;
    }
    let hard = input.constraints.hard_constraints.rest_window;
    let weight = input.constraints.penalty_weights.five_day_rest;

    for staff_idx in 0..vars.num_staff() {
        for start in 0..=(vars.num_dates() - WINDOW) {
            let window: Vec<usize> = (start..start + WINDOW).collect();
            if !window.iter().all(|&d| vars.is_employed(staff_idx, d)) {
                continue;
            }
            let off_vars: Vec<_> = window
                .iter()
                .filter_map(|&d| vars.var(staff_idx, d, ShiftKind::Off))
                .collect();
            if off_vars.is_empty() {
                continue;
            }
            let terms: Vec<_> = off_vars.iter().map(|&v| (v, 1)).collect();
            if hard {
                solver.linear_ge(&terms, 1);
            } else {
                deficit_indicator(
                    solver,
                    ctx,
                    "rest_window_deficit",
                    &terms,
                    1,
                    1,
                    weight,
                    format!("{} has no rest day in a 6-day window", input.staff[staff_idx].id),
                );
            }
        }
    }
}
