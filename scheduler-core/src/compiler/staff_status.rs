//! Pass 5 (spec §4.4.5): per-status shift restrictions. Forbidden kinds are
//! SOFT-penalized at `staff_status_shift` (default 150). Default policy
//! absent explicit configuration: dispatch and part-time cohorts may not
//! receive `Early` or `Late`.

use super::{is_backup_staff, penalize, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

const DEFAULT_RESTRICTED_STATUSES: [&str; 2] = ["dispatch", "part-time"];

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    if input.constraints.disable_staff_status_shift_restrictions {
        return;
    }
    let weight = input.constraints.penalty_weights.staff_status_shift;

    for (staff_idx, staff) in input.staff.iter().enumerate() {
        if staff.is_backup || is_backup_staff(&staff.id, input.constraints) {
            continue;
        }
        let status_key = staff.status.to_lowercase();
        let forbidden = if let Some(restriction) = input.constraints.staff_status_shift_restrictions.get(&staff.status)
        {
            restriction.forbidden_shifts.clone()
        } else if DEFAULT_RESTRICTED_STATUSES.contains(&status_key.as_str()) {
            vec![shared::ShiftKind::Early, shared::ShiftKind::Late]
        } else {
            continue;
        };

        for (date_idx, _) in input.dates.iter().enumerate() {
            if !vars.is_employed(staff_idx, date_idx) {
                continue;
            }
            for &kind in &forbidden {
                if let Some(var) = vars.var(staff_idx, date_idx, kind) {
                    penalize(
                        solver,
                        ctx,
                        var,
                        weight,
                        format!("{} forbidden for status {}", kind_label(kind), staff.status),
                    );
                }
            }
        }
    }
}

fn kind_label(kind: shared::ShiftKind) -> &'static str {
    match kind {
        shared::ShiftKind::Work => "Work",
        shared::ShiftKind::Off => "Off",
        shared::ShiftKind::Early => "Early",
        shared::ShiftKind::Late => "Late",
    }
}
