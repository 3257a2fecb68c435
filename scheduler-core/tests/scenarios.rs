//! End-to-end scenarios, one test per literal scenario in the schedule
//! optimizer's specification. Each builds a small roster and raw
//! constraints payload and checks literal properties of the result,
//! exercising the full normalize → compile → solve → extract pipeline.

use serde_json::json;
use shared::shift::GLYPH_OFF;
use shared::Staff;

use scheduler_core::holiday::StaticHolidayOracle;
use scheduler_core::optimize_schedule_with_oracle;

fn plain_staff(id: &str, status: &str) -> Staff {
    Staff {
        id: id.to_string(),
        name: id.to_string(),
        status: status.to_string(),
        start_period: None,
        end_period: None,
        is_backup: false,
    }
}

fn dates(range: &[&str]) -> Vec<String> {
    range.iter().map(|s| s.to_string()).collect()
}

#[test]
fn scenario_a_calendar_override_with_early_preference() {
    let staff = vec![
        plain_staff("A", "R"),
        plain_staff("B", "R"),
        plain_staff("C", "R"),
    ];
    let horizon = dates(&["2025-12-24", "2025-12-25", "2025-12-26"]);
    let constraints = json!({
        "calendarRules": { "2025-12-25": { "mustDayOff": true } },
        "earlyShiftPreferences": { "A": { "2025-12-25": true } },
        "dailyLimitsRaw": { "enabled": true, "minOffPerDay": 1, "maxOffPerDay": 2 },
    });

    let oracle = StaticHolidayOracle::default();
    let resp = optimize_schedule_with_oracle(staff, horizon, constraints, 5, &oracle);
    assert!(resp.success, "expected success, got {:?}", resp.error);

    assert_eq!(resp.schedule["A"]["2025-12-25"], "\u{25b3}");
    assert_eq!(resp.schedule["B"]["2025-12-25"], "\u{00d7}");
    assert_eq!(resp.schedule["C"]["2025-12-25"], "\u{00d7}");
}

#[test]
fn scenario_b_backup_coverage_hard() {
    let staff = vec![plain_staff("ryo", "R"), plain_staff("nak", "R")];
    let horizon = dates(&[
        "2024-01-24",
        "2024-01-25",
        "2024-01-26",
        "2024-01-27",
        "2024-01-28",
        "2024-01-29",
        "2024-01-30",
    ]);
    let constraints = json!({
        "staffGroups": [ { "id": "G", "name": "G", "members": ["ryo"] } ],
        "backupAssignments": [ { "staffId": "nak", "groupId": "G", "isActive": true } ],
        "prefilledSchedule": {
            "ryo": { "2024-01-24": "x", "2024-01-30": "x" },
        },
        "ortoolsConfig": { "hardConstraints": { "backupCoverage": true } },
    });

    let oracle = StaticHolidayOracle::default();
    let resp = optimize_schedule_with_oracle(staff, horizon, constraints, 2, &oracle);
    assert!(resp.success, "expected success, got {:?}", resp.error);

    assert_eq!(resp.schedule["nak"]["2024-01-24"], "\u{25cb}");
    assert_eq!(resp.schedule["nak"]["2024-01-30"], "\u{25cb}");
    assert!(resp
        .violations
        .unwrap_or_default()
        .iter()
        .all(|v| !v.description.contains("not covering")));
}

#[test]
fn scenario_c_backup_unavailable_on_holiday() {
    let staff = vec![plain_staff("ryo", "R"), plain_staff("nak", "R")];
    let holiday = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let horizon = dates(&["2024-12-30", "2024-12-31", "2025-01-01", "2025-01-02"]);
    let constraints = json!({
        "staffGroups": [ { "id": "G", "name": "G", "members": ["ryo"] } ],
        "backupAssignments": [ { "staffId": "nak", "groupId": "G", "isActive": true } ],
    });

    let oracle = StaticHolidayOracle::new([holiday]);
    let resp = optimize_schedule_with_oracle(staff, horizon, constraints, 2, &oracle);
    assert!(resp.success, "expected success, got {:?}", resp.error);

    assert_eq!(resp.schedule["nak"]["2025-01-01"], "\u{2298}");
}

#[test]
fn scenario_d_six_day_rest_hard() {
    let staff = vec![plain_staff("s", "R")];
    let horizon = dates(&[
        "2026-02-01",
        "2026-02-02",
        "2026-02-03",
        "2026-02-04",
        "2026-02-05",
        "2026-02-06",
        "2026-02-07",
    ]);
    let constraints = json!({
        "ortoolsConfig": { "hardConstraints": { "restWindow": true } },
    });

    let oracle = StaticHolidayOracle::default();
    let resp = optimize_schedule_with_oracle(staff, horizon.clone(), constraints, 2, &oracle);
    assert!(resp.success, "expected success, got {:?}", resp.error);

    let row = &resp.schedule["s"];
    let has_off = |range: &[&str]| range.iter().any(|d| row[*d] == GLYPH_OFF);
    assert!(has_off(&horizon[0..6].iter().map(String::as_str).collect::<Vec<_>>()));
    assert!(has_off(&horizon[1..7].iter().map(String::as_str).collect::<Vec<_>>()));
}

#[test]
fn scenario_e_prefill_monthly_accounting() {
    let staff = vec![plain_staff("A", "R")];
    let horizon = dates(&[
        "2026-03-01",
        "2026-03-02",
        "2026-03-03",
        "2026-03-04",
        "2026-03-05",
        "2026-03-06",
        "2026-03-07",
        "2026-03-08",
        "2026-03-09",
        "2026-03-10",
    ]);
    let constraints = json!({
        "monthlyLimit": { "minCount": 2, "maxCount": 3, "isHardConstraint": true },
        "prefilledSchedule": {
            "A": { "2026-03-01": "x", "2026-03-02": "x" },
        },
    });

    let oracle = StaticHolidayOracle::default();
    let resp = optimize_schedule_with_oracle(staff, horizon, constraints, 2, &oracle);
    assert!(resp.success, "expected success, got {:?}", resp.error);

    let off_count = resp.schedule["A"].values().filter(|g| g.as_str() == GLYPH_OFF).count();
    assert!(off_count <= 3, "expected at most 3 off days, got {off_count}");
}

#[test]
fn scenario_f_post_period_hard() {
    let staff = vec![plain_staff("r1", "regular"), plain_staff("r2", "regular")];
    let horizon = dates(&[
        "2026-03-01",
        "2026-03-02",
        "2026-03-03",
        "2026-03-04",
        "2026-03-05",
        "2026-03-06",
        "2026-03-07",
        "2026-03-08",
    ]);
    let constraints = json!({
        "calendarRules": {
            "2026-03-03": { "mustDayOff": true },
            "2026-03-04": { "mustDayOff": true },
            "2026-03-05": { "mustDayOff": true },
        },
        "earlyShiftConfig": {
            "postPeriodConstraint": {
                "enabled": true,
                "isHardConstraint": true,
                "minPeriodLength": 2,
                "postPeriodDays": 2,
            },
        },
    });

    let oracle = StaticHolidayOracle::default();
    let resp = optimize_schedule_with_oracle(staff, horizon, constraints, 2, &oracle);
    assert!(resp.success, "expected success, got {:?}", resp.error);

    let violations = resp.violations.unwrap_or_default();
    for staff_id in ["r1", "r2"] {
        for date in ["2026-03-06", "2026-03-07"] {
            let glyph = &resp.schedule[staff_id][date];
            if glyph == GLYPH_OFF {
                let escaped = violations.iter().any(|v| {
                    v.description.contains(staff_id) && v.penalty >= 10_000
                });
                assert!(escaped, "{staff_id} off on {date} without an escape penalty");
            }
        }
    }
}
