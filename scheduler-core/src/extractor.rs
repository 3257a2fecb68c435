//! Solution Extractor (spec §4.7): reconstructs the symbol grid, honoring
//! pre-filled glyphs and backup-slot precedence, and summarizes the
//! solver's soft-violation indicators into a report.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::{default_glyph, ShiftKind, Staff, GLYPH_UNAVAILABLE, GLYPH_WORK_BACKUP};

use crate::compiler::{BackupSlot, CompileContext};
use crate::input::Constraints;
use crate::solver::{SolveOutcome, Solver};
use crate::variables::VariableSet;

pub struct ViolationReport {
    pub description: String,
    pub count: i64,
    pub penalty: i64,
}

pub struct Stats {
    pub num_conflicts: u64,
    pub num_branches: u64,
    pub wall_time_ms: u64,
    pub total_off_days: i64,
    pub staff_count: usize,
    pub date_count: usize,
    pub total_violations: usize,
    pub total_violation_penalty: i64,
    pub prefilled_cells: usize,
}

pub struct Extraction {
    pub schedule: HashMap<String, HashMap<String, String>>,
    pub violations: Vec<ViolationReport>,
    pub stats: Stats,
}

const TOP_VIOLATIONS: usize = 20;

pub fn extract(
    solver: &impl Solver,
    vars: &VariableSet,
    staff: &[Staff],
    dates: &[NaiveDate],
    constraints: &Constraints,
    ctx: &CompileContext,
    outcome: SolveOutcome,
) -> Extraction {
    let mut schedule: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut total_off_days = 0i64;
    let mut prefilled_cells = 0usize;

    for (staff_idx, s) in staff.iter().enumerate() {
        let mut row = HashMap::new();
        let prefilled = constraints.prefilled_schedule.get(&s.id);

        for (date_idx, date) in dates.iter().enumerate() {
            if !vars.is_employed(staff_idx, date_idx) {
                continue;
            }
            let date_str = date.format("%Y-%m-%d").to_string();

            if let Some(glyph) = prefilled.and_then(|p| p.get(&date_str)) {
                prefilled_cells += 1;
                if shared::decode(glyph) == Some(ShiftKind::Off) {
                    total_off_days += 1;
                }
                row.insert(date_str, glyph.clone());
                continue;
            }

            let chosen = chosen_kind(solver, vars, staff_idx, date_idx);
            if chosen == ShiftKind::Off {
                total_off_days += 1;
            }

            let glyph = match ctx.backup_slots.get(&(staff_idx, date_idx)) {
                Some(BackupSlot::Holiday) => GLYPH_UNAVAILABLE.to_string(),
                Some(BackupSlot::Coverage) => {
                    if chosen == ShiftKind::Work {
                        GLYPH_WORK_BACKUP.to_string()
                    } else {
                        default_glyph(chosen).to_string()
                    }
                }
                None => default_glyph(chosen).to_string(),
            };
            row.insert(date_str, glyph);
        }

        schedule.insert(s.id.clone(), row);
    }

    let mut scored: Vec<ViolationReport> = ctx
        .violations
        .iter()
        .filter_map(|v| {
            let value = solver.value(v.var);
            if value <= 0 {
                return None;
            }
            Some(ViolationReport {
                description: v.description.clone(),
                count: value,
                penalty: value * v.weight,
            })
        })
        .collect();
    scored.sort_by(|a, b| b.penalty.cmp(&a.penalty));

    let total_violations = scored.len();
    let total_violation_penalty = scored.iter().map(|v| v.penalty).sum();
    scored.truncate(TOP_VIOLATIONS);

    Extraction {
        schedule,
        violations: scored,
        stats: Stats {
            num_conflicts: outcome.num_conflicts,
            num_branches: outcome.num_branches,
            wall_time_ms: outcome.wall_time_ms,
            total_off_days,
            staff_count: staff.len(),
            date_count: dates.len(),
            total_violations,
            total_violation_penalty,
            prefilled_cells,
        },
    }
}

fn chosen_kind(solver: &impl Solver, vars: &VariableSet, staff_idx: usize, date_idx: usize) -> ShiftKind {
    for &kind in ShiftKind::ALL.iter() {
        if let Some(var) = vars.var(staff_idx, date_idx, kind) {
            if solver.value(var) == 1 {
                return kind;
            }
        }
    }
    ShiftKind::Work
}
