//! Holiday Oracle (spec §4.4.4 consumer, §9 "External holiday lookup"): a
//! pluggable capability returning the set of external-calendar holidays
//! within the horizon. Fetch failures degrade to an empty set rather than
//! failing compilation.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::Deserialize;

pub trait HolidayOracle: Send + Sync {
    fn holidays_in(&self, start: NaiveDate, end: NaiveDate) -> HashSet<NaiveDate>;
}

/// Static-set fake used by tests (spec §9).
#[derive(Debug, Clone, Default)]
pub struct StaticHolidayOracle {
    dates: HashSet<NaiveDate>,
}

impl StaticHolidayOracle {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

impl HolidayOracle for StaticHolidayOracle {
    fn holidays_in(&self, start: NaiveDate, end: NaiveDate) -> HashSet<NaiveDate> {
        self.dates.iter().filter(|&&d| d >= start && d <= end).copied().collect()
    }
}

#[derive(Debug, Deserialize)]
struct NagerHoliday {
    date: NaiveDate,
}

/// Network-backed default, targeting a Nager.Date-shaped public holiday
/// API (`GET {base_url}/{year}/{country_code}` returning a JSON array of
/// `{date, ...}`). Results are memoized per calendar year for the process
/// lifetime; any request failure yields an empty set for that year rather
/// than propagating.
pub struct NetworkHolidayOracle {
    base_url: String,
    country_code: String,
    client: reqwest::blocking::Client,
    cache: RwLock<HashMap<i32, HashSet<NaiveDate>>>,
}

impl NetworkHolidayOracle {
    pub fn new(base_url: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            country_code: country_code.into(),
            client: reqwest::blocking::Client::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn fetch_year(&self, year: i32) -> HashSet<NaiveDate> {
        if let Some(cached) = self.cache.read().unwrap().get(&year) {
            return cached.clone();
        }

        let url = format!("{}/{}/{}", self.base_url, year, self.country_code);
        let result = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<Vec<NagerHoliday>>());

        let dates = match result {
            Ok(holidays) => holidays.into_iter().map(|h| h.date).collect(),
            Err(err) => {
                tracing::warn!(target: "holiday_oracle", year, %err, "holiday lookup failed, treating year as holiday-free");
                HashSet::new()
            }
        };

        self.cache.write().unwrap().insert(year, dates.clone());
        dates
    }
}

impl HolidayOracle for NetworkHolidayOracle {
    fn holidays_in(&self, start: NaiveDate, end: NaiveDate) -> HashSet<NaiveDate> {
        use chrono::Datelike;
        let mut out = HashSet::new();
        for year in start.year()..=end.year() {
            out.extend(self.fetch_year(year).into_iter().filter(|d| *d >= start && *d <= end));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_oracle_filters_to_range() {
        let oracle = StaticHolidayOracle::new([
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
        ]);
        let result = oracle.holidays_in(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        );
        assert_eq!(result.len(), 1);
    }
}
