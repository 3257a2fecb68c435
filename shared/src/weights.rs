//! Default penalty weights and solver settings (spec §6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    pub staff_group: i64,
    pub daily_limit: i64,
    pub daily_limit_max: i64,
    pub monthly_limit: i64,
    pub adjacent_conflict: i64,
    pub five_day_rest: i64,
    pub staff_type_limit: i64,
    pub backup_coverage: i64,
    pub staff_status_shift: i64,
    pub post_period_soft: i64,
    pub post_period_hard_escape: i64,
    pub prefilled_adjacent: i64,
    pub hard_priority_as_soft: i64,
    pub early_pref_on_must_off: i64,
    pub rest_guarantee: i64,
    pub below_target_dayoffs: i64,
    pub below_target_early: i64,
    pub dayoff_bonus: i64,
    pub priority_exception: i64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            staff_group: 100,
            daily_limit: 50,
            daily_limit_max: 50,
            monthly_limit: 80,
            adjacent_conflict: 30,
            five_day_rest: 200,
            staff_type_limit: 60,
            backup_coverage: 500,
            staff_status_shift: 150,
            post_period_soft: 500,
            post_period_hard_escape: 10_000,
            prefilled_adjacent: 500,
            hard_priority_as_soft: 500,
            early_pref_on_must_off: 1_000,
            rest_guarantee: 300,
            below_target_dayoffs: 200,
            below_target_early: 100,
            dayoff_bonus: 30,
            priority_exception: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub timeout_seconds: u32,
    pub num_workers: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            num_workers: 4,
        }
    }
}
