//! Pass 16 (spec §4.4.16): rest guarantee for staff holding an "avoid
//! day-off, early allowed" priority rule (`AvoidWithExceptions(Off, ..)`
//! with `Early` among the exceptions). Splits the horizon into
//! rule-applicable and free dates and nudges both toward healthy targets
//! without ever forbidding anything outright.

use std::collections::HashSet;

use chrono::Datelike;
use shared::ShiftKind;

use super::{deficit_indicator, CompileContext, CompileInput};
use crate::input::PriorityRuleEffect;
use crate::solver::Solver;
use crate::variables::VariableSet;

fn applicable_days_of_week(input: &CompileInput, staff_id: &str) -> Option<HashSet<u8>> {
    let mut days = HashSet::new();
    let mut found = false;
    for rule in &input.constraints.priority_rules {
        if !rule.is_active || !rule.staff_ids.iter().any(|s| s == staff_id) {
            continue;
        }
        if let PriorityRuleEffect::AvoidWithExceptions(ShiftKind::Off, exceptions) = rule.effect {
            if exceptions.into_iter().flatten().any(|k| k == ShiftKind::Early) {
                found = true;
                days.extend(&rule.days_of_week);
            }
        }
    }
    found.then_some(days)
}

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    let weights = &input.constraints.penalty_weights;

    for (staff_idx, staff) in input.staff.iter().enumerate() {
        let Some(days) = applicable_days_of_week(input, &staff.id) else {
            continue;
        };

        let mut applicable_dates = Vec::new();
        let mut free_dates = Vec::new();
        let mut active_dates = Vec::new();

        for (date_idx, date) in input.dates.iter().enumerate() {
            if !vars.is_employed(staff_idx, date_idx) {
                continue;
            }
            active_dates.push(date_idx);
            if ctx.calendar_off_dates.contains(&date_idx) || ctx.calendar_work_dates.contains(&date_idx) {
                continue;
            }
            let dow = date.weekday().num_days_from_sunday() as u8;
            if days.is_empty() || days.contains(&dow) {
                applicable_dates.push(date_idx);
            } else {
                free_dates.push(date_idx);
            }
        }

        let max_off = input
            .constraints
            .monthly_limit
            .as_ref()
            .map(|m| m.max_count)
            .unwrap_or(free_dates.len() as i64);
        let free_off_terms: Vec<_> = free_dates
            .iter()
            .filter_map(|&d| vars.var(staff_idx, d, ShiftKind::Off))
            .map(|v| (v, 1))
            .collect();
        if !free_off_terms.is_empty() {
            deficit_indicator(
                solver,
                ctx,
                "rest_guarantee_free_dayoffs",
                &free_off_terms,
                max_off,
                free_dates.len() as i64,
                weights.below_target_dayoffs,
                format!("{} below target day-offs on free dates", staff.id),
            );
        }

        let applicable_early_terms: Vec<_> = applicable_dates
            .iter()
            .filter_map(|&d| vars.var(staff_idx, d, ShiftKind::Early))
            .map(|v| (v, 1))
            .collect();
        if !applicable_early_terms.is_empty() {
            deficit_indicator(
                solver,
                ctx,
                "rest_guarantee_applicable_early",
                &applicable_early_terms,
                2,
                applicable_dates.len() as i64,
                weights.below_target_early,
                format!("{} below target early shifts on applicable dates", staff.id),
            );
        }

        let mut rest_terms: Vec<_> = active_dates
            .iter()
            .filter_map(|&d| vars.var(staff_idx, d, ShiftKind::Off))
            .map(|v| (v, 2))
            .collect();
        rest_terms.extend(
            active_dates
                .iter()
                .filter_map(|&d| vars.var(staff_idx, d, ShiftKind::Early))
                .map(|v| (v, 1)),
        );
        if !rest_terms.is_empty() {
            let threshold = (4i64).max(active_dates.len() as i64 / 6);
            deficit_indicator(
                solver,
                ctx,
                "rest_guarantee_minimum",
                &rest_terms,
                threshold,
                active_dates.len() as i64 * 2,
                weights.rest_guarantee,
                format!("{} below minimum rest-equivalent", staff.id),
            );
        }
    }
}
