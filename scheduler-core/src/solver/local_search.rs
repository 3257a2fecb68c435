//! Default solver backend: greedy construction followed by simulated
//! annealing over the constraint graph recorded in [`Model`]. This stands
//! in for the CP-SAT-style backend the spec explicitly keeps out of scope
//! (spec §1, §9 "Solver abstraction") — the [`Solver`](super::Solver) trait
//! is the real boundary; swapping in a vendored MILP/CP-SAT engine later
//! only means writing another trait impl.

use std::collections::HashMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::{Constraint, Model};
use super::{SolveOutcome, SolveParams, SolveStatus, VarId};

/// Dominates any realistic sum of soft penalty weights so the search always
/// prefers removing a hard violation over improving the objective.
const HARD_PENALTY: i64 = 1_000_000;
const STALL_LIMIT: u64 = 4_000;

struct Site {
    /// Members of an `ExactlyOne` group, or a single free variable.
    vars: Vec<VarId>,
    is_group: bool,
}

pub fn solve(model: &mut Model, params: SolveParams) -> SolveOutcome {
    let start = Instant::now();
    let deadline = std::time::Duration::from_secs(params.timeout_seconds.max(1) as u64);
    let mut rng = StdRng::seed_from_u64(params.random_seed);

    let mut fixed: HashMap<VarId, i64> = HashMap::new();
    for c in &model.constraints {
        if let Constraint::Fix { var, value } = c {
            if let Some(prev) = fixed.insert(*var, *value) {
                if prev != *value {
                    return SolveOutcome {
                        status: SolveStatus::ModelInvalid,
                        wall_time_ms: start.elapsed().as_millis() as u64,
                        num_conflicts: 0,
                        num_branches: 0,
                    };
                }
            }
        }
    }

    let mut in_group: HashMap<VarId, bool> = HashMap::new();
    let mut sites: Vec<Site> = Vec::new();
    for c in &model.constraints {
        if let Constraint::ExactlyOne { vars } = c {
            for v in vars {
                in_group.insert(*v, true);
            }
            sites.push(Site { vars: vars.clone(), is_group: true });
        }
    }
    for idx in 0..model.num_vars() {
        let v = VarId(idx as u32);
        if !in_group.contains_key(&v) && !fixed.contains_key(&v) {
            sites.push(Site { vars: vec![v], is_group: false });
        }
    }

    let mut values = vec![0i64; model.num_vars()];
    for (v, val) in &fixed {
        values[v.0 as usize] = *val;
    }
    for site in &sites {
        if !site.is_group {
            let v = site.vars[0];
            if !fixed.contains_key(&v) {
                let d = model.domains[v.0 as usize];
                values[v.0 as usize] = d.lb;
            }
            continue;
        }
        let forced: Vec<VarId> = site
            .vars
            .iter()
            .filter(|v| fixed.get(v) == Some(&1))
            .copied()
            .collect();
        if forced.len() > 1 {
            return SolveOutcome {
                status: SolveStatus::ModelInvalid,
                wall_time_ms: start.elapsed().as_millis() as u64,
                num_conflicts: 0,
                num_branches: 0,
            };
        }
        let active = if let Some(f) = forced.first() {
            *f
        } else {
            let candidates: Vec<VarId> = site
                .vars
                .iter()
                .filter(|v| fixed.get(v) != Some(&0))
                .copied()
                .collect();
            if candidates.is_empty() {
                return SolveOutcome {
                    status: SolveStatus::ModelInvalid,
                    wall_time_ms: start.elapsed().as_millis() as u64,
                    num_conflicts: 0,
                    num_branches: 0,
                };
            }
            candidates[rng.gen_range(0..candidates.len())]
        };
        for v in &site.vars {
            if !fixed.contains_key(v) {
                values[v.0 as usize] = if *v == active { 1 } else { 0 };
            }
        }
    }

    let mut constraints_by_var: HashMap<VarId, Vec<usize>> = HashMap::new();
    for (idx, c) in model.constraints.iter().enumerate() {
        for v in constraint_vars(c) {
            constraints_by_var.entry(v).or_default().push(idx);
        }
    }
    let mut objective_by_var: HashMap<VarId, i64> = HashMap::new();
    for (v, w) in &model.objective {
        *objective_by_var.entry(*v).or_insert(0) += w;
    }

    let mut cost = total_cost(model, &values);
    let mut best_values = values.clone();
    let mut best_cost = cost;
    let mut stall = 0u64;
    let mut branches = 0u64;
    let mut conflicts = 0u64;

    while stall < STALL_LIMIT {
        if branches % 256 == 0 && start.elapsed() >= deadline {
            break;
        }
        if sites.is_empty() {
            break;
        }
        branches += 1;
        let site = &sites[rng.gen_range(0..sites.len())];

        let touched: Vec<VarId> = site.vars.clone();
        let before: Vec<i64> = touched.iter().map(|v| values[v.0 as usize]).collect();
        let before_delta = local_cost(model, &values, &touched, &constraints_by_var, &objective_by_var);

        if site.is_group {
            let choices: Vec<VarId> = site
                .vars
                .iter()
                .filter(|v| fixed.get(v) != Some(&0))
                .copied()
                .collect();
            if choices.len() < 2 {
                continue;
            }
            let pick = choices[rng.gen_range(0..choices.len())];
            for v in &site.vars {
                if !fixed.contains_key(v) {
                    values[v.0 as usize] = if *v == pick { 1 } else { 0 };
                }
            }
        } else {
            let v = site.vars[0];
            let d = model.domains[v.0 as usize];
            if d.ub <= d.lb {
                continue;
            }
            let span = (d.ub - d.lb).min(1_000);
            let new_val = if span <= 20 {
                d.lb + rng.gen_range(0..=span)
            } else {
                let step = rng.gen_range(-3i64..=3);
                (values[v.0 as usize] + step).clamp(d.lb, d.ub)
            };
            values[v.0 as usize] = new_val;
        }

        let after_delta = local_cost(model, &values, &touched, &constraints_by_var, &objective_by_var);
        let delta = after_delta - before_delta;
        let new_cost = cost + delta;

        let remaining = 1.0
            - (start.elapsed().as_secs_f64() / deadline.as_secs_f64()).min(1.0);
        let temperature = 50.0 * remaining.max(0.0) + 0.01;
        let accept = delta <= 0 || rng.gen::<f64>() < (-(delta as f64) / temperature).exp();

        if accept {
            cost = new_cost;
            if cost < best_cost {
                best_cost = cost;
                best_values = values.clone();
                stall = 0;
            } else {
                stall += 1;
            }
        } else {
            conflicts += 1;
            stall += 1;
            for (v, old) in touched.iter().zip(before.iter()) {
                values[v.0 as usize] = *old;
            }
        }
    }

    model.values = best_values.clone();
    let hard_violations = hard_violation_count(model, &best_values);

    let status = if hard_violations > 0 {
        SolveStatus::Infeasible
    } else if start.elapsed() >= deadline {
        SolveStatus::Feasible
    } else {
        SolveStatus::Optimal
    };

    SolveOutcome {
        status,
        wall_time_ms: start.elapsed().as_millis() as u64,
        num_conflicts: conflicts,
        num_branches: branches,
    }
}

fn constraint_vars(c: &Constraint) -> Vec<VarId> {
    match c {
        Constraint::Fix { var, .. } => vec![*var],
        Constraint::LinearLe { terms, .. } | Constraint::LinearGe { terms, .. } => {
            terms.iter().map(|(v, _)| *v).collect()
        }
        Constraint::ExactlyOne { vars } | Constraint::AtMostOne { vars } => vars.clone(),
        Constraint::Implies { a, b } | Constraint::Forbids { a, b } => vec![*a, *b],
        Constraint::MaxEquality { target, vars } => {
            let mut v = vars.clone();
            v.push(*target);
            v
        }
    }
}

fn constraint_cost(c: &Constraint, values: &[i64]) -> i64 {
    match c {
        Constraint::Fix { var, value } => {
            if values[var.0 as usize] != *value {
                HARD_PENALTY
            } else {
                0
            }
        }
        Constraint::LinearLe { terms, rhs } => {
            let lhs: i64 = terms.iter().map(|(v, coef)| coef * values[v.0 as usize]).sum();
            if lhs > *rhs {
                HARD_PENALTY * (lhs - rhs)
            } else {
                0
            }
        }
        Constraint::LinearGe { terms, rhs } => {
            let lhs: i64 = terms.iter().map(|(v, coef)| coef * values[v.0 as usize]).sum();
            if lhs < *rhs {
                HARD_PENALTY * (rhs - lhs)
            } else {
                0
            }
        }
        Constraint::ExactlyOne { vars } => {
            let count = vars.iter().filter(|v| values[v.0 as usize] == 1).count() as i64;
            HARD_PENALTY * (count - 1).abs()
        }
        Constraint::AtMostOne { vars } => {
            let count = vars.iter().filter(|v| values[v.0 as usize] == 1).count() as i64;
            HARD_PENALTY * (count - 1).max(0)
        }
        Constraint::Implies { a, b } => {
            if values[a.0 as usize] == 1 && values[b.0 as usize] != 1 {
                HARD_PENALTY
            } else {
                0
            }
        }
        Constraint::Forbids { a, b } => {
            if values[a.0 as usize] == 1 && values[b.0 as usize] != 0 {
                HARD_PENALTY
            } else {
                0
            }
        }
        Constraint::MaxEquality { target, vars } => {
            let m = vars.iter().map(|v| values[v.0 as usize]).max().unwrap_or(0);
            HARD_PENALTY * (values[target.0 as usize] - m).abs()
        }
    }
}

fn hard_violation_count(model: &Model, values: &[i64]) -> i64 {
    model
        .constraints
        .iter()
        .map(|c| constraint_cost(c, values))
        .sum::<i64>()
        / HARD_PENALTY.max(1)
}

fn total_cost(model: &Model, values: &[i64]) -> i64 {
    let hard: i64 = model.constraints.iter().map(|c| constraint_cost(c, values)).sum();
    let objective: i64 = model.objective.iter().map(|(v, w)| w * values[v.0 as usize]).sum();
    hard - objective
}

/// Cost contribution of every constraint/objective term that mentions any
/// variable in `touched`, used to evaluate a move without rescanning the
/// whole model.
fn local_cost(
    model: &Model,
    values: &[i64],
    touched: &[VarId],
    constraints_by_var: &HashMap<VarId, Vec<usize>>,
    objective_by_var: &HashMap<VarId, i64>,
) -> i64 {
    let mut indices: Vec<usize> = touched
        .iter()
        .filter_map(|v| constraints_by_var.get(v))
        .flatten()
        .copied()
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let hard: i64 = indices.iter().map(|&i| constraint_cost(&model.constraints[i], values)).sum();
    let objective: i64 = touched
        .iter()
        .filter_map(|v| objective_by_var.get(v).map(|w| w * values[v.0 as usize]))
        .sum();
    hard - objective
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Solver;

    #[test]
    fn satisfies_exactly_one_and_fix() {
        let mut model = Model::new();
        let a = model.new_bool("a");
        let b = model.new_bool("b");
        model.exactly_one(&[a, b]);
        model.fix(a, 1);

        let outcome = model.solve(SolveParams {
            timeout_seconds: 1,
            num_workers: 1,
            random_seed: 42,
        });

        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(model.value(a), 1);
        assert_eq!(model.value(b), 0);
    }

    #[test]
    fn detects_conflicting_fixes_as_model_invalid() {
        let mut model = Model::new();
        let a = model.new_bool("a");
        let b = model.new_bool("b");
        model.exactly_one(&[a, b]);
        model.fix(a, 1);
        model.fix(b, 1);

        let outcome = model.solve(SolveParams {
            timeout_seconds: 1,
            num_workers: 1,
            random_seed: 1,
        });

        assert_eq!(outcome.status, SolveStatus::ModelInvalid);
    }

    #[test]
    fn respects_max_equality() {
        let mut model = Model::new();
        let m1 = model.new_bool("m1");
        let m2 = model.new_bool("m2");
        let target = model.new_bool("target");
        model.fix(m1, 1);
        model.fix(m2, 0);
        model.max_equality(target, &[m1, m2]);

        let outcome = model.solve(SolveParams {
            timeout_seconds: 1,
            num_workers: 1,
            random_seed: 7,
        });

        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(model.value(target), 1);
    }
}
