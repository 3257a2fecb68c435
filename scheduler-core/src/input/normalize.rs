//! Input Normalizer (pipeline component 2, spec §4.1): turns the loosely
//! typed `constraints` envelope into the canonical [`Constraints`] model,
//! tolerating missing/misshapen sections and collecting warnings instead of
//! failing (spec §7 band 1).

use serde_json::Value;
use shared::{decode, PenaltyWeights, ShiftKind, SolverSettings, Staff};
use std::collections::{HashMap, HashSet};

use super::model::*;
use super::raw;

pub struct NormalizeOutput {
    pub constraints: Constraints,
    pub warnings: Vec<String>,
}

pub fn normalize(
    staff: &[Staff],
    dates: &[String],
    raw_constraints: &Value,
    timeout_seconds: u32,
) -> NormalizeOutput {
    let mut warnings = Vec::new();
    let valid_staff: HashSet<&str> = staff.iter().map(|s| s.id.as_str()).collect();
    let valid_dates: HashSet<&str> = dates.iter().map(String::as_str).collect();

    let mut out = Constraints::default();
    out.solver_settings.timeout_seconds = timeout_seconds;

    normalize_calendar_rules(raw_constraints, &valid_dates, &mut out, &mut warnings);
    normalize_early_shift_preferences(raw_constraints, &valid_staff, &mut out, &mut warnings);
    normalize_staff_groups(raw_constraints, &valid_staff, &mut out, &mut warnings);
    normalize_backup_assignments(raw_constraints, &valid_staff, &mut out, &mut warnings);
    normalize_priority_rules(raw_constraints, &valid_staff, &mut out, &mut warnings);
    normalize_daily_limits(raw_constraints, &mut out);
    normalize_monthly_limit(raw_constraints, &mut out);
    normalize_staff_type_limits(raw_constraints, &mut out, &mut warnings);
    normalize_staff_status_restrictions(raw_constraints, &mut out);
    normalize_prefilled_schedule(raw_constraints, &valid_staff, &valid_dates, &mut out, &mut warnings);
    normalize_post_period_config(raw_constraints, &mut out);
    normalize_ortools_config(raw_constraints, &mut out, &mut warnings);

    for w in &warnings {
        tracing::warn!(target: "normalizer", "{w}");
    }

    NormalizeOutput {
        constraints: out,
        warnings,
    }
}

fn as_bool(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::Bool(true)))
}

fn normalize_calendar_rules(
    raw: &Value,
    valid_dates: &HashSet<&str>,
    out: &mut Constraints,
    warnings: &mut Vec<String>,
) {
    let Some(obj) = raw.get("calendarRules").and_then(Value::as_object) else {
        return;
    };
    for (date, entry) in obj {
        if !valid_dates.contains(date.as_str()) {
            warnings.push(format!("calendarRules: date {date} outside horizon, dropped"));
            continue;
        }
        let rule = CalendarRule {
            must_day_off: as_bool(entry.get("must_day_off")) || as_bool(entry.get("mustDayOff")),
            must_work: as_bool(entry.get("must_work")) || as_bool(entry.get("mustWork")),
        };
        out.calendar_rules.insert(date.clone(), rule);
    }
}

fn normalize_early_shift_preferences(
    raw: &Value,
    valid_staff: &HashSet<&str>,
    out: &mut Constraints,
    warnings: &mut Vec<String>,
) {
    let Some(obj) = raw.get("earlyShiftPreferences").and_then(Value::as_object) else {
        return;
    };
    for (staff_id, entry) in obj {
        if !valid_staff.contains(staff_id.as_str()) {
            warnings.push(format!("earlyShiftPreferences: unknown staff {staff_id}, dropped"));
            continue;
        }
        let Some(entry_obj) = entry.as_object() else {
            continue;
        };
        let mut pref = EarlyShiftPreference::default();
        for (key, value) in entry_obj {
            // spec §9 open question 4: strict `== True`, truthy-but-not-bool is absent.
            let Value::Bool(b) = value else { continue };
            if key == "default" {
                pref.default = Some(*b);
            } else {
                pref.by_date.insert(key.clone(), *b);
            }
        }
        out.early_shift_preferences.insert(staff_id.clone(), pref);
    }
}

fn normalize_staff_groups(
    raw: &Value,
    valid_staff: &HashSet<&str>,
    out: &mut Constraints,
    warnings: &mut Vec<String>,
) {
    let Some(arr) = raw.get("staffGroups").and_then(Value::as_array) else {
        return;
    };
    for g in arr {
        let Some(id) = g.get("id").and_then(Value::as_str) else {
            warnings.push("staffGroups: entry missing id, dropped".to_string());
            continue;
        };
        let name = g
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
        let members: Vec<String> = g
            .get("members")
            .and_then(Value::as_array)
            .map(|a| {
                a.iter()
                    .filter_map(Value::as_str)
                    .filter(|m| valid_staff.contains(m))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        out.staff_groups.push(StaffGroup {
            id: id.to_string(),
            name,
            members,
        });
    }
}

fn normalize_backup_assignments(
    raw: &Value,
    valid_staff: &HashSet<&str>,
    out: &mut Constraints,
    warnings: &mut Vec<String>,
) {
    let Some(arr) = raw.get("backupAssignments").and_then(Value::as_array) else {
        return;
    };
    for entry in arr {
        let staff_id = entry.get("staffId").and_then(Value::as_str);
        let group_id = entry.get("groupId").and_then(Value::as_str);
        let (Some(staff_id), Some(group_id)) = (staff_id, group_id) else {
            warnings.push("backupAssignments: entry missing staffId/groupId, dropped".to_string());
            continue;
        };
        if !valid_staff.contains(staff_id) {
            warnings.push(format!("backupAssignments: unknown staff {staff_id}, dropped"));
            continue;
        }
        let is_active = entry
            .get("isActive")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        out.backup_assignments.push(BackupAssignment {
            staff_id: staff_id.to_string(),
            group_id: group_id.to_string(),
            is_active,
        });
    }
}

fn shift_kind_from_str(s: &str) -> Option<ShiftKind> {
    match s.to_lowercase().as_str() {
        "off" => Some(ShiftKind::Off),
        "early" => Some(ShiftKind::Early),
        "late" => Some(ShiftKind::Late),
        "work" | "normal" => Some(ShiftKind::Work),
        _ => None,
    }
}

fn normalize_priority_rules(
    raw: &Value,
    valid_staff: &HashSet<&str>,
    out: &mut Constraints,
    warnings: &mut Vec<String>,
) {
    let Some(arr) = raw.get("priorityRules").and_then(Value::as_array) else {
        return;
    };

    let mut seen_ids = HashSet::new();

    for (idx, rule) in arr.iter().enumerate() {
        let id = rule
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("rule-{idx}"));
        if !seen_ids.insert(id.clone()) {
            warnings.push(format!("priorityRules: duplicate id {id}, skipped"));
            continue;
        }

        let mut staff_ids: Vec<String> = Vec::new();
        if let Some(list) = raw::first_non_empty_list(rule, &raw::staff_ids_chain()) {
            staff_ids = list;
        } else if let Some(single) = raw::first_non_empty_string(rule, &raw::staff_id_chain()) {
            staff_ids = vec![single];
        }
        staff_ids.retain(|s| valid_staff.contains(s.as_str()));
        if staff_ids.is_empty() {
            warnings.push(format!("priorityRules: rule {id} has no resolvable staff, dropped"));
            continue;
        }

        let shift_type = raw::extract_shift_type(rule);
        let Some(kind) = shift_kind_from_str(&shift_type) else {
            warnings.push(format!("priorityRules: rule {id} unknown shiftType {shift_type}, dropped"));
            continue;
        };

        let days_of_week = raw::extract_days_of_week(rule);

        let variant = rule
            .get("ruleType")
            .or_else(|| rule.get("rule_type"))
            .or_else(|| rule.get("type"))
            .and_then(Value::as_str)
            .unwrap_or("avoid")
            .to_lowercase();

        let effect = match variant.as_str() {
            "prefer" | "required_off" | "requiredoff" => PriorityRuleEffect::Prefer(kind),
            "avoid_with_exceptions" | "avoidwithexceptions" => {
                let mut exceptions = [None; 3];
                if let Some(arr) = rule
                    .get("exceptions")
                    .or_else(|| rule.get("allowedExceptions"))
                    .and_then(Value::as_array)
                {
                    for (i, v) in arr.iter().take(3).enumerate() {
                        if let Some(s) = v.as_str() {
                            exceptions[i] = shift_kind_from_str(s);
                        }
                    }
                }
                PriorityRuleEffect::AvoidWithExceptions(kind, exceptions)
            }
            _ => PriorityRuleEffect::Avoid(kind),
        };

        let is_active = rule.get("isActive").and_then(Value::as_bool).unwrap_or(true);
        let priority_level = rule
            .get("priorityLevel")
            .or_else(|| rule.get("priority_level"))
            .and_then(Value::as_i64)
            .unwrap_or(100);
        let is_hard = rule.get("isHard").and_then(Value::as_bool).unwrap_or(false);

        out.priority_rules.push(PriorityRule {
            id,
            staff_ids,
            days_of_week,
            effect,
            is_active,
            priority_level,
            is_hard,
        });
    }
}

fn normalize_daily_limits(raw: &Value, out: &mut Constraints) {
    let Some(obj) = raw.get("dailyLimitsRaw").and_then(Value::as_object) else {
        return;
    };
    out.daily_limits.enabled = obj.get("enabled").and_then(Value::as_bool).unwrap_or(false);
    out.daily_limits.min_off_per_day = obj.get("minOffPerDay").and_then(Value::as_i64).unwrap_or(0);
    out.daily_limits.max_off_per_day = obj
        .get("maxOffPerDay")
        .and_then(Value::as_i64)
        .unwrap_or(i64::MAX);
    out.daily_limits.is_hard = obj
        .get("isHardConstraint")
        .and_then(Value::as_bool)
        .unwrap_or(false);
}

fn normalize_monthly_limit(raw: &Value, out: &mut Constraints) {
    let Some(obj) = raw.get("monthlyLimit").and_then(Value::as_object) else {
        return;
    };
    out.monthly_limit = Some(MonthlyLimit {
        min_count: obj.get("minCount").and_then(Value::as_i64).unwrap_or(0),
        max_count: obj.get("maxCount").and_then(Value::as_i64).unwrap_or(i64::MAX),
        exclude_calendar_rules: obj
            .get("excludeCalendarRules")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        is_hard: obj
            .get("isHardConstraint")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    });
}

fn normalize_staff_type_limits(raw: &Value, out: &mut Constraints, warnings: &mut Vec<String>) {
    let Some(obj) = raw.get("staffTypeLimits").and_then(Value::as_object) else {
        return;
    };
    for (status, entry) in obj {
        let min_off = entry.get("minOff").and_then(Value::as_i64);
        let max_off = entry.get("maxOff").and_then(Value::as_i64);
        let max_early = entry.get("maxEarly").and_then(Value::as_i64);
        let is_hard = entry.get("isHard").and_then(Value::as_bool).unwrap_or(true);

        if min_off.is_some_and(|v| v < 0) || max_off.is_some_and(|v| v < 0) || max_early.is_some_and(|v| v < 0) {
            warnings.push(format!("staffTypeLimits[{status}]: negative limit, skipped"));
            continue;
        }
        if let (Some(min), Some(max)) = (min_off, max_off) {
            if min > max {
                warnings.push(format!("staffTypeLimits[{status}]: min_off > max_off, skipped"));
                continue;
            }
        }

        out.staff_type_limits.insert(
            status.clone(),
            StaffTypeLimit {
                min_off,
                max_off,
                max_early,
                is_hard,
            },
        );
    }
}

fn normalize_staff_status_restrictions(raw: &Value, out: &mut Constraints) {
    out.disable_staff_status_shift_restrictions = raw
        .get("disableStaffStatusShiftRestrictions")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let Some(obj) = raw.get("staffStatusShiftRestrictions").and_then(Value::as_object) else {
        return;
    };
    for (status, entry) in obj {
        let parse_list = |key: &str| -> Vec<ShiftKind> {
            entry
                .get(key)
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(Value::as_str).filter_map(shift_kind_from_str).collect())
                .unwrap_or_default()
        };
        out.staff_status_shift_restrictions.insert(
            status.clone(),
            StaffStatusShiftRestriction {
                allowed_shifts: parse_list("allowedShifts"),
                forbidden_shifts: parse_list("forbiddenShifts"),
            },
        );
    }
}

fn normalize_prefilled_schedule(
    raw: &Value,
    valid_staff: &HashSet<&str>,
    valid_dates: &HashSet<&str>,
    out: &mut Constraints,
    warnings: &mut Vec<String>,
) {
    let Some(obj) = raw.get("prefilledSchedule").and_then(Value::as_object) else {
        return;
    };
    let mut dropped = 0usize;
    for (staff_id, dates) in obj {
        if !valid_staff.contains(staff_id.as_str()) {
            dropped += 1;
            continue;
        }
        let Some(dates_obj) = dates.as_object() else {
            continue;
        };
        let mut accepted: HashMap<String, String> = HashMap::new();
        for (date, glyph) in dates_obj {
            if !valid_dates.contains(date.as_str()) {
                dropped += 1;
                continue;
            }
            let Some(glyph) = glyph.as_str() else {
                dropped += 1;
                continue;
            };
            let trimmed = glyph.trim();
            if trimmed.is_empty() {
                dropped += 1;
                continue;
            }
            if decode(trimmed).is_none() {
                warnings.push(format!(
                    "prefilledSchedule: unknown glyph '{trimmed}' for {staff_id}/{date}, treated as Work"
                ));
            }
            accepted.insert(date.clone(), trimmed.to_string());
        }
        if !accepted.is_empty() {
            out.prefilled_schedule.insert(staff_id.clone(), accepted);
        }
    }
    if dropped > 0 {
        warnings.push(format!("prefilledSchedule: dropped {dropped} invalid cell(s)"));
    }
}

fn normalize_post_period_config(raw: &Value, out: &mut Constraints) {
    let Some(obj) = raw
        .get("earlyShiftConfig")
        .and_then(|v| v.get("postPeriodConstraint"))
        .and_then(Value::as_object)
    else {
        return;
    };
    let d = PostPeriodConfig::default();
    out.post_period_constraint = PostPeriodConfig {
        enabled: obj.get("enabled").and_then(Value::as_bool).unwrap_or(d.enabled),
        is_hard: obj
            .get("isHardConstraint")
            .and_then(Value::as_bool)
            .unwrap_or(d.is_hard),
        min_period_length: obj
            .get("minPeriodLength")
            .and_then(Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(d.min_period_length),
        post_period_days: obj
            .get("postPeriodDays")
            .and_then(Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(d.post_period_days),
        avoid_day_off_for_shain: obj
            .get("avoidDayOffForShain")
            .and_then(Value::as_bool)
            .unwrap_or(d.avoid_day_off_for_shain),
        avoid_day_off_for_haken: obj
            .get("avoidDayOffForHaken")
            .and_then(Value::as_bool)
            .unwrap_or(d.avoid_day_off_for_haken),
        allow_early_for_shain: obj
            .get("allowEarlyForShain")
            .and_then(Value::as_bool)
            .unwrap_or(d.allow_early_for_shain),
    };
}

fn normalize_ortools_config(raw: &Value, out: &mut Constraints, warnings: &mut Vec<String>) {
    let Some(cfg) = raw.get("ortoolsConfig") else {
        return;
    };

    if let Some(weights) = cfg.get("penaltyWeights").and_then(Value::as_object) {
        let defaults = PenaltyWeights::default();
        let get = |key: &str, fallback: i64| weights.get(key).and_then(Value::as_i64).unwrap_or(fallback);
        out.penalty_weights = PenaltyWeights {
            staff_group: get("staffGroup", defaults.staff_group),
            daily_limit: get("dailyLimitMin", defaults.daily_limit),
            daily_limit_max: get("dailyLimitMax", defaults.daily_limit_max),
            monthly_limit: get("monthlyLimit", defaults.monthly_limit),
            adjacent_conflict: get("adjacentConflict", defaults.adjacent_conflict),
            five_day_rest: get("fiveDayRest", defaults.five_day_rest),
            staff_type_limit: get("staffTypeLimit", defaults.staff_type_limit),
            backup_coverage: get("backupCoverage", defaults.backup_coverage),
            staff_status_shift: get("staffStatusShift", defaults.staff_status_shift),
            post_period_soft: get("postPeriodSoft", defaults.post_period_soft),
            post_period_hard_escape: get("postPeriodHardEscape", defaults.post_period_hard_escape),
            prefilled_adjacent: get("prefilledAdjacent", defaults.prefilled_adjacent),
            hard_priority_as_soft: get("hardPriorityAsSoft", defaults.hard_priority_as_soft),
            early_pref_on_must_off: get("earlyPrefOnMustOff", defaults.early_pref_on_must_off),
            rest_guarantee: get("restGuarantee", defaults.rest_guarantee),
            below_target_dayoffs: get("belowTargetDayoffs", defaults.below_target_dayoffs),
            below_target_early: get("belowTargetEarly", defaults.below_target_early),
            dayoff_bonus: get("dayoffBonus", defaults.dayoff_bonus),
            priority_exception: get("priorityException", defaults.priority_exception),
        };
    }

    if let Some(settings) = cfg.get("solverSettings").and_then(Value::as_object) {
        if let Some(t) = settings.get("timeout").and_then(Value::as_u64) {
            out.solver_settings.timeout_seconds = t as u32;
        }
        if let Some(w) = settings.get("numWorkers").and_then(Value::as_u64) {
            out.solver_settings.num_workers = w as u32;
        }
    }

    if let Some(hard) = cfg.get("hardConstraints").and_then(Value::as_object) {
        let get = |key: &str| hard.get(key).and_then(Value::as_bool).unwrap_or(false);
        out.hard_constraints = HardConstraintToggles {
            staff_groups: get("staffGroups"),
            monthly_limits: get("monthlyLimits"),
            daily_limits: get("dailyLimits"),
            backup_coverage: get("backupCoverage"),
            rest_window: get("restWindow"),
        };
    }

    let _ = warnings;
}
