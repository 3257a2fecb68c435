//! Pass 14 (spec §4.4.14): post-period constraint. After a long enough
//! maximal run of `must_day_off` dates, the following `post_period_days`
//! dates attract an anti-day-off constraint for configured cohorts
//! ("shain" = regular full-time staff, "haken" = dispatch/temp staff).

use shared::ShiftKind;

use super::{penalize, reward, CompileContext, CompileInput};
use crate::input::REGULAR_COHORT_STATUS;
use crate::solver::Solver;
use crate::variables::VariableSet;

const HAKEN_STATUS: &str = "dispatch";
const ALLOW_EARLY_BONUS: i64 = 20;

fn maximal_off_runs(ctx: &CompileContext, num_dates: usize) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start = None;
    for d in 0..num_dates {
        if ctx.calendar_off_dates.contains(&d) {
            run_start.get_or_insert(d);
        } else if let Some(start) = run_start.take() {
            runs.push((start, d - 1));
        }
    }
    if let Some(start) = run_start {
        runs.push((start, num_dates - 1));
    }
    runs
}

pub fn run(solver: &mut impl Solver, vars: &VariableSet, input: &CompileInput, ctx: &mut CompileContext) {
    let config = &input.constraints.post_period_constraint;
    if !config.enabled {
        return;
    }

    let runs = maximal_off_runs(ctx, vars.num_dates());
    let eligible_runs: Vec<(usize, usize)> = runs
        .into_iter()
        .filter(|(start, end)| end + 1 - start >= config.min_period_length as usize)
        .collect();
    if eligible_runs.is_empty() {
        return;
    }

    let post_dates: Vec<usize> = eligible_runs
        .iter()
        .flat_map(|&(_, end)| (end + 1)..=(end + config.post_period_days as usize))
        .filter(|&d| d < vars.num_dates())
        .collect();
    if post_dates.is_empty() {
        return;
    }

    for (staff_idx, staff) in input.staff.iter().enumerate() {
        let status = staff.status.to_lowercase();
        let applies = (status == REGULAR_COHORT_STATUS && config.avoid_day_off_for_shain)
            || (status == HAKEN_STATUS && config.avoid_day_off_for_haken);
        if !applies {
            continue;
        }

        for &date_idx in &post_dates {
            if !vars.is_employed(staff_idx, date_idx) {
                continue;
            }
            let Some(off_var) = vars.var(staff_idx, date_idx, ShiftKind::Off) else {
                continue;
            };

            if config.is_hard {
                let escape = solver.new_bool("post_period_escape");
                solver.implies(off_var, escape);
                penalize(
                    solver,
                    ctx,
                    escape,
                    input.constraints.penalty_weights.post_period_hard_escape,
                    format!("{} off in post-period window (escape used)", staff.id),
                );
            } else {
                penalize(
                    solver,
                    ctx,
                    off_var,
                    input.constraints.penalty_weights.post_period_soft,
                    format!("{} off in post-period window", staff.id),
                );
            }

            if status == REGULAR_COHORT_STATUS && config.allow_early_for_shain {
                if let Some(early_var) = vars.var(staff_idx, date_idx, ShiftKind::Early) {
                    reward(solver, early_var, ALLOW_EARLY_BONUS);
                }
            }
        }
    }
}
