//! Concrete constraint model built up through the [`Solver`](super::Solver)
//! trait. Owns variable domains and the constraint list; [`Model::solve`]
//! hands both to [`super::local_search`].

use super::{local_search, SolveOutcome, SolveParams, Solver, VarId};

#[derive(Debug, Clone)]
pub enum Constraint {
    Fix { var: VarId, value: i64 },
    LinearLe { terms: Vec<(VarId, i64)>, rhs: i64 },
    LinearGe { terms: Vec<(VarId, i64)>, rhs: i64 },
    ExactlyOne { vars: Vec<VarId> },
    AtMostOne { vars: Vec<VarId> },
    Implies { a: VarId, b: VarId },
    Forbids { a: VarId, b: VarId },
    MaxEquality { target: VarId, vars: Vec<VarId> },
}

#[derive(Debug, Clone, Copy)]
pub struct VarDomain {
    pub lb: i64,
    pub ub: i64,
}

#[derive(Default)]
pub struct Model {
    pub(crate) domains: Vec<VarDomain>,
    pub(crate) names: Vec<String>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Vec<(VarId, i64)>,
    pub(crate) values: Vec<i64>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_vars(&self) -> usize {
        self.domains.len()
    }

    fn push_var(&mut self, lb: i64, ub: i64, name: &str) -> VarId {
        let id = VarId(self.domains.len() as u32);
        self.domains.push(VarDomain { lb, ub });
        self.names.push(name.to_string());
        self.values.push(lb);
        id
    }
}

impl Solver for Model {
    fn new_bool(&mut self, name: &str) -> VarId {
        self.push_var(0, 1, name)
    }

    fn new_int(&mut self, lb: i64, ub: i64, name: &str) -> VarId {
        self.push_var(lb, ub, name)
    }

    fn fix(&mut self, var: VarId, value: i64) {
        self.constraints.push(Constraint::Fix { var, value });
    }

    fn linear_le(&mut self, terms: &[(VarId, i64)], rhs: i64) {
        self.constraints.push(Constraint::LinearLe {
            terms: terms.to_vec(),
            rhs,
        });
    }

    fn linear_ge(&mut self, terms: &[(VarId, i64)], rhs: i64) {
        self.constraints.push(Constraint::LinearGe {
            terms: terms.to_vec(),
            rhs,
        });
    }

    fn exactly_one(&mut self, vars: &[VarId]) {
        self.constraints.push(Constraint::ExactlyOne {
            vars: vars.to_vec(),
        });
    }

    fn at_most_one(&mut self, vars: &[VarId]) {
        self.constraints.push(Constraint::AtMostOne {
            vars: vars.to_vec(),
        });
    }

    fn implies(&mut self, a: VarId, b: VarId) {
        self.constraints.push(Constraint::Implies { a, b });
    }

    fn forbids(&mut self, a: VarId, b: VarId) {
        self.constraints.push(Constraint::Forbids { a, b });
    }

    fn max_equality(&mut self, target: VarId, vars: &[VarId]) {
        self.constraints.push(Constraint::MaxEquality {
            target,
            vars: vars.to_vec(),
        });
    }

    fn add_objective_term(&mut self, var: VarId, weight: i64) {
        self.objective.push((var, weight));
    }

    fn solve(&mut self, params: SolveParams) -> SolveOutcome {
        local_search::solve(self, params)
    }

    fn value(&self, var: VarId) -> i64 {
        self.values[var.0 as usize]
    }
}
