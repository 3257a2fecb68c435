//! Pass 6 (spec §4.4.6): staff-group coverage. HARD mode is a hybrid
//! encoding — a genuine HARD cap of 1 on simultaneous `Off`, plus a SOFT
//! (double-weight) cap on simultaneous `Early`. SOFT mode penalizes the
//! combined `Off + Early` count exceeding 1.

use std::collections::HashMap;

use shared::ShiftKind;

use super::{overflow_indicator, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    let staff_index: HashMap<&str, usize> = input
        .staff
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.as_str(), i))
        .collect();
    let weight = input.constraints.penalty_weights.staff_group;
    let hard = input.constraints.hard_constraints.staff_groups;

    for group in &input.constraints.staff_groups {
        if group.members.len() < 2 {
            continue;
        }
        let member_idxs: Vec<usize> = group
            .members
            .iter()
            .filter_map(|m| staff_index.get(m.as_str()).copied())
            .collect();

        for date_idx in 0..vars.num_dates() {
            if ctx.calendar_off_dates.contains(&date_idx) {
                continue;
            }
            let off_vars: Vec<_> = member_idxs
                .iter()
                .filter(|&&m| vars.is_employed(m, date_idx))
                .filter_map(|&m| vars.var(m, date_idx, ShiftKind::Off))
                .collect();
            let early_vars: Vec<_> = member_idxs
                .iter()
                .filter(|&&m| vars.is_employed(m, date_idx))
                .filter_map(|&m| vars.var(m, date_idx, ShiftKind::Early))
                .collect();

            if hard {
                if off_vars.len() >= 2 {
                    let terms: Vec<_> = off_vars.iter().map(|&v| (v, 1)).collect();
                    solver.linear_le(&terms, 1);
                }
                if !early_vars.is_empty() {
                    let terms: Vec<_> = early_vars.iter().map(|&v| (v, 1)).collect();
                    overflow_indicator(
                        solver,
                        ctx,
                        "group_early_overflow",
                        &terms,
                        1,
                        member_idxs.len() as i64,
                        weight * 2,
                        format!("Group {} multiple early", group.name),
                    );
                }
            } else {
                let mut terms: Vec<_> = off_vars.iter().map(|&v| (v, 1)).collect();
                terms.extend(early_vars.iter().map(|&v| (v, 1)));
                if !terms.is_empty() {
                    overflow_indicator(
                        solver,
                        ctx,
                        "group_off_early_overflow",
                        &terms,
                        1,
                        member_idxs.len() as i64 * 2,
                        weight,
                        format!("Group {} coverage overlap", group.name),
                    );
                }
            }
        }
    }
}
