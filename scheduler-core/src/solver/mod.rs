//! Solver Adapter (spec §4.6, §9 "Solver abstraction"). The compiler builds
//! a model exclusively through the [`Solver`] trait; any CP-SAT-style
//! backend implementation itself is explicitly out of scope (spec §1), so
//! this crate ships one concrete backend — [`model::Model`] plus
//! [`local_search`] — rather than binding to a vendored solver library.

pub mod local_search;
pub mod model;
pub mod status;

pub use model::Model;
pub use status::SolveStatus;

/// Handle to a variable allocated through [`Solver`]. Opaque outside this
/// module; compiler passes thread it around but never inspect its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

#[derive(Debug, Clone, Copy)]
pub struct SolveParams {
    pub timeout_seconds: u32,
    pub num_workers: u32,
    pub random_seed: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub wall_time_ms: u64,
    pub num_conflicts: u64,
    pub num_branches: u64,
}

/// Thin trait covering the primitives a CP-SAT-style backend needs to
/// expose (spec §9): allocate boolean/int, linear inequality, indicator
/// constraint, implication, at-most-one, set objective, solve with params,
/// read value.
pub trait Solver {
    fn new_bool(&mut self, name: &str) -> VarId;
    fn new_int(&mut self, lb: i64, ub: i64, name: &str) -> VarId;

    /// HARD equality `var == value` (pre-fills, calendar forcing).
    fn fix(&mut self, var: VarId, value: i64);

    /// HARD `sum(coef * var) <= rhs`.
    fn linear_le(&mut self, terms: &[(VarId, i64)], rhs: i64);
    /// HARD `sum(coef * var) >= rhs`.
    fn linear_ge(&mut self, terms: &[(VarId, i64)], rhs: i64);

    /// HARD: exactly one of `vars` is true. Used for the per-cell
    /// kind-exclusivity pass (§4.4.1).
    fn exactly_one(&mut self, vars: &[VarId]);
    /// HARD: at most one of `vars` is true.
    fn at_most_one(&mut self, vars: &[VarId]);

    /// HARD implication `a == 1 => b == 1`.
    fn implies(&mut self, a: VarId, b: VarId);
    /// HARD implication `a == 1 => b == 0`.
    fn forbids(&mut self, a: VarId, b: VarId);

    /// HARD indicator constraint `target = max(vars)` (boolean OR).
    fn max_equality(&mut self, target: VarId, vars: &[VarId]);

    /// Add `weight * var` to the maximized objective.
    fn add_objective_term(&mut self, var: VarId, weight: i64);

    fn solve(&mut self, params: SolveParams) -> SolveOutcome;
    fn value(&self, var: VarId) -> i64;
}
