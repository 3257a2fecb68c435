//! Pass 4 (spec §4.4.4): a backup's schedule is derived from the
//! off-status of the group it covers rather than from quotas. Also
//! populates the backup-id set subsequent passes use to exempt backups.

use std::collections::HashMap;

use shared::ShiftKind;

use super::{and_indicator, penalize, BackupSlot, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    let staff_index: HashMap<&str, usize> = input
        .staff
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.as_str(), i))
        .collect();

    for assignment in &input.constraints.backup_assignments {
        if !assignment.is_active {
            continue;
        }
        ctx.backup_staff_ids.insert(assignment.staff_id.clone());

        let Some(&backup_idx) = staff_index.get(assignment.staff_id.as_str()) else {
            continue;
        };
        let Some(group) = input
            .constraints
            .staff_groups
            .iter()
            .find(|g| g.id == assignment.group_id)
        else {
            continue;
        };
        let valid_members: Vec<usize> = group
            .members
            .iter()
            .filter_map(|m| staff_index.get(m.as_str()).copied())
            .filter(|&idx| idx != backup_idx)
            .collect();
        if valid_members.is_empty() {
            continue;
        }

        let hard = input.constraints.hard_constraints.backup_coverage;
        let weight = input.constraints.penalty_weights.backup_coverage;

        for (date_idx, date) in input.dates.iter().enumerate() {
            if ctx.calendar_off_dates.contains(&date_idx) {
                continue;
            }
            if !vars.is_employed(backup_idx, date_idx) {
                continue;
            }
            let off_var = vars.var(backup_idx, date_idx, ShiftKind::Off);

            // Forced off on an external holiday regardless of whether the
            // group needed coverage that day (spec §4.4.4) — must run before
            // the coverage-only `off_vars.is_empty()` bail below, or a
            // holiday with no employed group members leaves the backup
            // unconstrained.
            if input.holidays.contains(date) {
                if let Some(off_var) = off_var {
                    solver.fix(off_var, 1);
                }
                ctx.backup_slots.insert((backup_idx, date_idx), BackupSlot::Holiday);
                continue;
            }

            let off_vars: Vec<_> = valid_members
                .iter()
                .filter(|&&m| vars.is_employed(m, date_idx))
                .filter_map(|&m| vars.var(m, date_idx, ShiftKind::Off))
                .collect();
            if off_vars.is_empty() {
                continue;
            }

            let Some(work_var) = vars.var(backup_idx, date_idx, ShiftKind::Work) else {
                continue;
            };
            let early_var = vars.var(backup_idx, date_idx, ShiftKind::Early);
            let late_var = vars.var(backup_idx, date_idx, ShiftKind::Late);

            let any_member_off = solver.new_bool("backup_any_member_off");
            solver.max_equality(any_member_off, &off_vars);
            ctx.backup_slots.insert((backup_idx, date_idx), BackupSlot::Coverage);

            if hard {
                solver.implies(any_member_off, work_var);
                if let Some(early_var) = early_var {
                    solver.forbids(any_member_off, early_var);
                }
                if let Some(late_var) = late_var {
                    solver.forbids(any_member_off, late_var);
                }
            } else {
                let no_work = solver.new_bool("backup_no_work_when_needed");
                solver.linear_ge(&[(no_work, 1), (any_member_off, -1), (work_var, 1)], 0);
                penalize(solver, ctx, no_work, weight, format!("Backup {} not covering", assignment.staff_id));

                if let Some(early_var) = early_var {
                    let early_violation = and_indicator(solver, "backup_early_when_needed", any_member_off, early_var);
                    penalize(
                        solver,
                        ctx,
                        early_violation,
                        weight / 2,
                        format!("Backup {} early while coverage needed", assignment.staff_id),
                    );
                }
                if let Some(late_var) = late_var {
                    let late_violation = and_indicator(solver, "backup_late_when_needed", any_member_off, late_var);
                    penalize(
                        solver,
                        ctx,
                        late_violation,
                        weight / 2,
                        format!("Backup {} late while coverage needed", assignment.staff_id),
                    );
                }
            }
        }
    }
}
