//! Canonical, typed constraint model. Nothing past the Normalizer (see
//! `normalize.rs`) ever sees the loosely-typed input again (spec §9
//! "Never carry the raw input past the Normalizer").

use shared::{PenaltyWeights, ShiftKind, SolverSettings};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarRule {
    pub must_day_off: bool,
    pub must_work: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EarlyShiftPreference {
    /// Per-date overrides, consulted first.
    pub by_date: HashMap<String, bool>,
    /// Fallback when a date has no explicit entry. `None` means "absent" —
    /// per spec §9 open question 4, only a literal `true`/`false` counts;
    /// a JS-truthy-but-not-boolean value is treated as absent upstream in
    /// the normalizer, never reaching this type as `Some`.
    pub default: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct StaffGroup {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BackupAssignment {
    pub staff_id: String,
    pub group_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityRuleEffect {
    /// "prefer shift kind K" / "required-off" — bonus on K, penalty on the complement.
    Prefer(ShiftKind),
    /// "avoid shift kind K" — penalty on K.
    Avoid(ShiftKind),
    /// "avoid K with allowed exceptions {K'...}" — penalty on K, small
    /// preference on each exception.
    AvoidWithExceptions(ShiftKind, [Option<ShiftKind>; 3]),
}

#[derive(Debug, Clone)]
pub struct PriorityRule {
    pub id: String,
    pub staff_ids: Vec<String>,
    /// `0 = Sunday .. 6 = Saturday`, spec §4.1.
    pub days_of_week: Vec<u8>,
    pub effect: PriorityRuleEffect,
    pub is_active: bool,
    pub priority_level: i64,
    pub is_hard: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DailyLimits {
    pub enabled: bool,
    pub min_off_per_day: i64,
    pub max_off_per_day: i64,
    pub is_hard: bool,
}

#[derive(Debug, Clone)]
pub struct MonthlyLimit {
    pub min_count: i64,
    pub max_count: i64,
    pub exclude_calendar_rules: bool,
    pub is_hard: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaffTypeLimit {
    pub min_off: Option<i64>,
    pub max_off: Option<i64>,
    pub max_early: Option<i64>,
    pub is_hard: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StaffStatusShiftRestriction {
    pub allowed_shifts: Vec<ShiftKind>,
    pub forbidden_shifts: Vec<ShiftKind>,
}

#[derive(Debug, Clone, Copy)]
pub struct PostPeriodConfig {
    pub enabled: bool,
    pub is_hard: bool,
    pub min_period_length: u32,
    pub post_period_days: u32,
    pub avoid_day_off_for_shain: bool,
    pub avoid_day_off_for_haken: bool,
    pub allow_early_for_shain: bool,
}

impl Default for PostPeriodConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            is_hard: false,
            min_period_length: 2,
            post_period_days: 1,
            avoid_day_off_for_shain: true,
            avoid_day_off_for_haken: true,
            allow_early_for_shain: false,
        }
    }
}

/// Per-family HARD/SOFT toggles (`ortoolsConfig.hardConstraints`).
#[derive(Debug, Clone, Default)]
pub struct HardConstraintToggles {
    pub staff_groups: bool,
    pub monthly_limits: bool,
    pub daily_limits: bool,
    pub backup_coverage: bool,
    pub rest_window: bool,
}

#[derive(Debug, Clone)]
pub struct Constraints {
    pub calendar_rules: HashMap<String, CalendarRule>,
    pub early_shift_preferences: HashMap<String, EarlyShiftPreference>,
    pub staff_groups: Vec<StaffGroup>,
    pub backup_assignments: Vec<BackupAssignment>,
    pub priority_rules: Vec<PriorityRule>,
    pub daily_limits: DailyLimits,
    pub monthly_limit: Option<MonthlyLimit>,
    pub staff_type_limits: HashMap<String, StaffTypeLimit>,
    pub staff_status_shift_restrictions: HashMap<String, StaffStatusShiftRestriction>,
    pub disable_staff_status_shift_restrictions: bool,
    pub prefilled_schedule: HashMap<String, HashMap<String, String>>,
    pub post_period_constraint: PostPeriodConfig,
    pub penalty_weights: PenaltyWeights,
    pub solver_settings: SolverSettings,
    pub hard_constraints: HardConstraintToggles,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            calendar_rules: HashMap::new(),
            early_shift_preferences: HashMap::new(),
            staff_groups: Vec::new(),
            backup_assignments: Vec::new(),
            priority_rules: Vec::new(),
            daily_limits: DailyLimits::default(),
            monthly_limit: None,
            staff_type_limits: HashMap::new(),
            staff_status_shift_restrictions: HashMap::new(),
            disable_staff_status_shift_restrictions: false,
            prefilled_schedule: HashMap::new(),
            post_period_constraint: PostPeriodConfig::default(),
            penalty_weights: PenaltyWeights::default(),
            solver_settings: SolverSettings::default(),
            hard_constraints: HardConstraintToggles::default(),
        }
    }
}

/// Cohort name the monthly early-shift cap (§4.4.11) and the "allow early for
/// regular" post-period relief (§4.4.14) apply to.
pub const REGULAR_COHORT_STATUS: &str = "regular";
pub const REGULAR_MONTHLY_EARLY_CAP: i64 = 3;
