//! Pass 2 (spec §4.4.2): pre-filled cells become HARD equalities. Backup
//! staff pre-fills are ignored — their schedule is coverage-driven (pass
//! [`super::backup_coverage`]). Star-family glyphs additionally feed the
//! per-staff star-off-equivalent counter consumed by monthly limits.

use shared::{decode, is_star_glyph, ShiftKind};

use super::{is_backup_staff, CompileContext, CompileInput};
use crate::solver::Solver;
use crate::variables::VariableSet;

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    for (staff_idx, staff) in input.staff.iter().enumerate() {
        if staff.is_backup || is_backup_staff(&staff.id, input.constraints) {
            continue;
        }
        let Some(cells) = input.constraints.prefilled_schedule.get(&staff.id) else {
            continue;
        };
        for (date_idx, date) in input.dates.iter().enumerate() {
            if !vars.is_employed(staff_idx, date_idx) {
                continue;
            }
            let date_str = date.format("%Y-%m-%d").to_string();
            let Some(glyph) = cells.get(&date_str) else {
                continue;
            };
            let kind = decode(glyph).unwrap_or(ShiftKind::Work);
            if let Some(var) = vars.var(staff_idx, date_idx, kind) {
                solver.fix(var, 1);
            }
            if is_star_glyph(glyph) {
                *ctx.prefilled_star_equiv_by_staff.entry(staff.id.clone()).or_insert(0) += 2;
            }
        }
    }
}
