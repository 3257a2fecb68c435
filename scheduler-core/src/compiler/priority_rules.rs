//! Pass 15 (spec §4.4.15): named priority rules. Nominally-HARD rules
//! compile to a very-high-weight SOFT penalty rather than a genuine hard
//! constraint — the design always prefers a feasible answer over an
//! infeasibility error (spec §9 "HARD-as-SOFT upgrading").

use shared::ShiftKind;

use super::{penalize, reward, CompileContext, CompileInput};
use crate::input::PriorityRuleEffect;
use crate::solver::Solver;
use crate::variables::VariableSet;

fn weight_for(input: &CompileInput, is_hard: bool, priority_level: i64) -> i64 {
    if is_hard {
        input.constraints.penalty_weights.hard_priority_as_soft
    } else {
        priority_level
    }
}

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    for rule in &input.constraints.priority_rules {
        if !rule.is_active {
            continue;
        }
        let weight = weight_for(input, rule.is_hard, rule.priority_level);
        let exception_weight = input.constraints.penalty_weights.priority_exception;

        for staff_id in &rule.staff_ids {
            let Some(staff_idx) = input.staff.iter().position(|s| &s.id == staff_id) else {
                continue;
            };

            for (date_idx, date) in input.dates.iter().enumerate() {
                if ctx.calendar_off_dates.contains(&date_idx) || ctx.calendar_work_dates.contains(&date_idx) {
                    continue;
                }
                if !vars.is_employed(staff_idx, date_idx) {
                    continue;
                }
                use chrono::Datelike;
                let dow = date.weekday().num_days_from_sunday() as u8;
                if !rule.days_of_week.is_empty() && !rule.days_of_week.contains(&dow) {
                    continue;
                }

                match rule.effect {
                    PriorityRuleEffect::Avoid(kind) => {
                        if let Some(var) = vars.var(staff_idx, date_idx, kind) {
                            penalize(solver, ctx, var, weight, format!("{staff_id} avoid {kind:?} rule {}", rule.id));
                        }
                    }
                    PriorityRuleEffect::AvoidWithExceptions(kind, exceptions) => {
                        if let Some(var) = vars.var(staff_idx, date_idx, kind) {
                            penalize(solver, ctx, var, weight, format!("{staff_id} avoid {kind:?} rule {}", rule.id));
                        }
                        for exception in exceptions.into_iter().flatten() {
                            if let Some(var) = vars.var(staff_idx, date_idx, exception) {
                                reward(solver, var, exception_weight);
                            }
                        }
                    }
                    PriorityRuleEffect::Prefer(kind) => {
                        if rule.is_hard {
                            for &complement in ShiftKind::ALL.iter().filter(|&&k| k != kind) {
                                if let Some(var) = vars.var(staff_idx, date_idx, complement) {
                                    penalize(
                                        solver,
                                        ctx,
                                        var,
                                        weight,
                                        format!("{staff_id} prefer {kind:?} rule {}", rule.id),
                                    );
                                }
                            }
                        } else if let Some(var) = vars.var(staff_idx, date_idx, kind) {
                            reward(solver, var, rule.priority_level);
                        }
                    }
                }
            }
        }
    }
}
