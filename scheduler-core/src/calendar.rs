//! Employment Calendar (spec §4.2): the single gate deciding whether a
//! `(staff, date)` pair gets a decision variable at all.

use chrono::NaiveDate;
use shared::Staff;

pub fn employed(staff: &Staff, date: NaiveDate) -> bool {
    staff.employed_on(date)
}

/// Parses the horizon's date strings (`YYYY-MM-DD`) once, skipping anything
/// malformed rather than failing the whole call (spec §7.1).
pub fn parse_horizon(dates: &[String]) -> Vec<NaiveDate> {
    dates
        .iter()
        .filter_map(|d| match NaiveDate::parse_from_str(d, "%Y-%m-%d") {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!(target: "calendar", "unparseable horizon date '{d}', dropped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PeriodBoundary;

    fn staff(start: Option<PeriodBoundary>, end: Option<PeriodBoundary>) -> Staff {
        Staff {
            id: "s1".into(),
            name: "Test".into(),
            status: "Unknown".into(),
            start_period: start,
            end_period: end,
            is_backup: false,
        }
    }

    #[test]
    fn unbounded_staff_is_always_employed() {
        let s = staff(None, None);
        assert!(employed(&s, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }

    #[test]
    fn respects_start_boundary() {
        let s = staff(
            Some(PeriodBoundary { year: 2026, month: 3, day: Some(10) }),
            None,
        );
        assert!(!employed(&s, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()));
        assert!(employed(&s, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()));
    }

    #[test]
    fn respects_end_boundary() {
        let s = staff(
            None,
            Some(PeriodBoundary { year: 2026, month: 3, day: None }),
        );
        assert!(employed(&s, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!employed(&s, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    }

    #[test]
    fn drops_unparseable_horizon_dates() {
        let dates = vec!["2026-01-01".to_string(), "not-a-date".to_string()];
        assert_eq!(parse_horizon(&dates).len(), 1);
    }
}
