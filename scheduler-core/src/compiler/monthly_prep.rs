//! Pass 9 (spec §4.4.9): monthly-limit preparation. Logs the off-equivalent
//! units that active HARD priority rules force onto each staff member.
//! Informational only — per spec §9 open question 2, this is **not**
//! subtracted from the monthly bounds computed by the next pass.

use chrono::Datelike;
use shared::ShiftKind;

use crate::input::PriorityRuleEffect;

use super::{CompileContext, CompileInput};
use crate::variables::VariableSet;

pub fn run(vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    for rule in &input.constraints.priority_rules {
        if !rule.is_active || !rule.is_hard {
            continue;
        }
        let forced_kind = match rule.effect {
            PriorityRuleEffect::Prefer(ShiftKind::Off) => 2,
            PriorityRuleEffect::Prefer(ShiftKind::Early) => 1,
            _ => continue,
        };

        for staff_id in &rule.staff_ids {
            let Some(staff_idx) = input.staff.iter().position(|s| &s.id == staff_id) else {
                continue;
            };
            for (date_idx, date) in input.dates.iter().enumerate() {
                if ctx.calendar_off_dates.contains(&date_idx) {
                    continue;
                }
                if !vars.is_employed(staff_idx, date_idx) {
                    continue;
                }
                let dow = date.weekday().num_days_from_sunday() as u8;
                if !rule.days_of_week.is_empty() && !rule.days_of_week.contains(&dow) {
                    continue;
                }
                *ctx.priority_forced_off_equiv.entry(staff_id.clone()).or_insert(0) += forced_kind;
            }
        }
    }
}
