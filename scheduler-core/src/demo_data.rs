//! Demo data generator (grounded on the SolverForge employee-scheduling
//! quickstart's `demo_data.rs`): synthetic staff roster, horizon and raw
//! constraints payload for the `demo` binary and for exercising the full
//! pipeline without a real client payload.

use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use shared::{PeriodBoundary, Staff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSize {
    Small,
    Large,
}

impl std::str::FromStr for DemoSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoSize::Small),
            "LARGE" => Ok(DemoSize::Large),
            _ => Err(()),
        }
    }
}

impl DemoSize {
    fn staff_count(self) -> usize {
        match self {
            DemoSize::Small => 8,
            DemoSize::Large => 30,
        }
    }

    fn horizon_days(self) -> i64 {
        match self {
            DemoSize::Small => 14,
            DemoSize::Large => 30,
        }
    }
}

pub struct DemoScenario {
    pub staff: Vec<Staff>,
    pub dates: Vec<String>,
    pub constraints: Value,
}

const FIRST_NAMES: &[&str] = &["Aiko", "Ren", "Yui", "Sora", "Haruto", "Mei", "Koji", "Nao"];
const LAST_NAMES: &[&str] = &["Sato", "Suzuki", "Tanaka", "Watanabe", "Ito", "Kato"];
const STATUSES: &[&str] = &["regular", "regular", "regular", "part-time", "dispatch"];

pub fn generate(size: DemoSize) -> DemoScenario {
    let mut rng = StdRng::seed_from_u64(0);
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let dates: Vec<String> = (0..size.horizon_days())
        .map(|d| (start + Duration::days(d)).format("%Y-%m-%d").to_string())
        .collect();

    let mut names = Vec::with_capacity(FIRST_NAMES.len() * LAST_NAMES.len());
    for first in FIRST_NAMES {
        for last in LAST_NAMES {
            names.push(format!("{first} {last}"));
        }
    }
    names.shuffle(&mut rng);

    let mut staff = Vec::with_capacity(size.staff_count());
    for i in 0..size.staff_count() {
        let name = names[i % names.len()].clone();
        let status = STATUSES[i % STATUSES.len()].to_string();
        let is_backup = i == size.staff_count() - 1;
        staff.push(Staff {
            id: format!("staff-{i}"),
            name,
            status,
            start_period: None,
            end_period: None,
            is_backup,
        });
    }

    // One staff member joins mid-horizon, grounded in the Employment
    // Calendar's partial-window support (spec §4.2).
    if let Some(partial) = staff.get_mut(size.staff_count() / 2) {
        partial.start_period = Some(PeriodBoundary {
            year: start.year(),
            month: start.month(),
            day: Some(start.day() + 5),
        });
    }

    let constraints = build_constraints(&staff, &dates, &mut rng);

    DemoScenario {
        staff,
        dates,
        constraints,
    }
}

fn build_constraints(staff: &[Staff], dates: &[String], rng: &mut StdRng) -> Value {
    let backup = staff.iter().find(|s| s.is_backup);
    let regulars: Vec<&Staff> = staff.iter().filter(|s| !s.is_backup).collect();

    let group_members: Vec<&str> = regulars.iter().take(3).map(|s| s.id.as_str()).collect();

    let mut priority_rules = Vec::new();
    if let Some(first) = regulars.first() {
        priority_rules.push(json!({
            "id": "prefer-off-sunday",
            "staffIds": [first.id],
            "daysOfWeek": [0],
            "shiftType": "off",
            "ruleType": "prefer",
            "isActive": true,
            "priorityLevel": 200,
            "isHard": false,
        }));
    }

    let mut prefilled = serde_json::Map::new();
    if let (Some(s), Some(d)) = (regulars.first(), dates.first()) {
        let mut row = serde_json::Map::new();
        row.insert(d.clone(), json!("x"));
        prefilled.insert(s.id.clone(), Value::Object(row));
    }

    let sample_date = dates[rng.gen_range(0..dates.len())].clone();

    json!({
        "calendarRules": {
            sample_date: { "mustWork": true },
        },
        "earlyShiftPreferences": {},
        "staffGroups": [
            { "id": "group-a", "name": "Group A", "members": group_members },
        ],
        "backupAssignments": backup.map(|b| vec![json!({
            "staffId": b.id,
            "groupId": "group-a",
            "isActive": true,
        })]).unwrap_or_default(),
        "priorityRules": priority_rules,
        "dailyLimitsRaw": { "enabled": true, "minOffPerDay": 1, "maxOffPerDay": 3, "isHardConstraint": false },
        "monthlyLimit": { "minCount": 4, "maxCount": 10, "excludeCalendarRules": true, "isHardConstraint": false },
        "staffTypeLimits": {
            "part-time": { "maxOff": 6, "isHard": false },
            "dispatch": { "maxOff": 4, "isHard": false },
        },
        "staffStatusShiftRestrictions": {},
        "prefilledSchedule": prefilled,
        "earlyShiftConfig": {
            "postPeriodConstraint": {
                "enabled": true,
                "isHardConstraint": false,
                "minPeriodLength": 2,
                "postPeriodDays": 1,
            },
        },
        "ortoolsConfig": {
            "solverSettings": { "timeout": 5, "numWorkers": 2 },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_scenario_has_expected_shape() {
        let scenario = generate(DemoSize::Small);
        assert_eq!(scenario.staff.len(), 8);
        assert_eq!(scenario.dates.len(), 14);
        assert!(scenario.staff.iter().any(|s| s.is_backup));
        assert!(scenario.constraints.get("staffGroups").is_some());
    }

    #[test]
    fn demo_size_from_str() {
        assert_eq!("small".parse::<DemoSize>(), Ok(DemoSize::Small));
        assert_eq!("LARGE".parse::<DemoSize>(), Ok(DemoSize::Large));
        assert!("huge".parse::<DemoSize>().is_err());
    }
}
