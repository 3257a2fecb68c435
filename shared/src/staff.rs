//! Staff record and employment window (spec §3 "Staff member").

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Year/month/optional-day employment boundary. `day` defaults to 1 when
/// absent, matching spec §6's `{year, month, day?}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBoundary {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub day: Option<u32>,
}

impl PeriodBoundary {
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day.unwrap_or(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub status: String,
    pub start_period: Option<PeriodBoundary>,
    pub end_period: Option<PeriodBoundary>,
    /// Union of every ad hoc "this is a backup" signal the original system
    /// accepted on the staff record itself (`isBackupOnly`, `is_backup_only`,
    /// `type == "backup"`, `staffType`/`staff_type == "backup"`) — see
    /// SPEC_FULL.md §3. Independent of, and additive with, backup
    /// assignments.
    pub is_backup: bool,
}

fn default_status() -> String {
    "Unknown".to_string()
}

/// Mirrors `Staff`'s wire shape plus every ad hoc backup-flag alias the
/// original system accepted, so the real `Deserialize` impl below can fold
/// them into one `is_backup` bool (spec §4.1-style fallback chain, applied
/// here at the leaf-type level rather than normalize.rs's `Value` chains).
#[derive(Debug, Deserialize)]
struct RawStaff {
    id: String,
    name: String,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default)]
    start_period: Option<PeriodBoundary>,
    #[serde(default)]
    end_period: Option<PeriodBoundary>,
    #[serde(default)]
    is_backup: bool,
    #[serde(default, rename = "isBackupOnly")]
    is_backup_only_camel: bool,
    #[serde(default)]
    is_backup_only: bool,
    #[serde(default, rename = "type")]
    type_field: Option<String>,
    #[serde(default, rename = "staffType")]
    staff_type_camel: Option<String>,
    #[serde(default)]
    staff_type: Option<String>,
}

impl<'de> Deserialize<'de> for Staff {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawStaff::deserialize(deserializer)?;
        let says_backup = |field: &Option<String>| {
            field.as_deref().map(|s| s.eq_ignore_ascii_case("backup")).unwrap_or(false)
        };
        let is_backup = raw.is_backup
            || raw.is_backup_only_camel
            || raw.is_backup_only
            || says_backup(&raw.type_field)
            || says_backup(&raw.staff_type_camel)
            || says_backup(&raw.staff_type);

        Ok(Staff {
            id: raw.id,
            name: raw.name,
            status: raw.status,
            start_period: raw.start_period,
            end_period: raw.end_period,
            is_backup,
        })
    }
}

impl Staff {
    /// Employment Calendar contract (spec §4.2):
    /// `employed(s, d) = (start == ⊥ ∨ d ≥ start) ∧ (end == ⊥ ∨ d ≤ end)`.
    pub fn employed_on(&self, date: NaiveDate) -> bool {
        let after_start = match self.start_period.and_then(PeriodBoundary::to_date) {
            Some(start) => date >= start,
            None => true,
        };
        let before_end = match self.end_period.and_then(PeriodBoundary::to_date) {
            Some(end) => date <= end,
            None => true,
        };
        after_start && before_end
    }

    /// `true` when the staff member has a partial employment window that
    /// intersects the horizon, used by the monthly-limit proration (§4.4.10).
    pub fn has_partial_window(&self) -> bool {
        self.start_period.is_some() || self.end_period.is_some()
    }
}
