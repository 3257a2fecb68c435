//! Variable Builder (spec §4.3): allocates one boolean decision variable per
//! `(staff, date, kind)` triple, restricted to employed pairs only.

use chrono::NaiveDate;
use shared::{Staff, ShiftKind};
use std::collections::HashMap;

use crate::calendar;
use crate::solver::VarId;

/// Identifies a single boolean decision variable `x[staff, date, kind]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarKey {
    pub staff_idx: usize,
    pub date_idx: usize,
    pub kind: ShiftKind,
}

/// The full variable universe for one optimization call: every employed
/// `(staff, date, kind)` triple mapped to a solver-allocated boolean id.
pub struct VariableSet {
    pub staff_ids: Vec<String>,
    pub dates: Vec<NaiveDate>,
    ids: HashMap<VarKey, VarId>,
    /// `(staff_idx, date_idx)` pairs skipped because the staff member was not
    /// employed that day — no variable exists for them (spec §4.2/§4.3).
    pub unemployed: Vec<(usize, usize)>,
}

impl VariableSet {
    pub fn build(
        staff: &[Staff],
        dates: &[NaiveDate],
        mut allocate: impl FnMut(&VarKey) -> VarId,
    ) -> Self {
        let mut ids = HashMap::new();
        let mut unemployed = Vec::new();

        for (staff_idx, s) in staff.iter().enumerate() {
            for (date_idx, &date) in dates.iter().enumerate() {
                if !calendar::employed(s, date) {
                    unemployed.push((staff_idx, date_idx));
                    continue;
                }
                for &kind in ShiftKind::ALL.iter() {
                    let key = VarKey { staff_idx, date_idx, kind };
                    let id = allocate(&key);
                    ids.insert(key, id);
                }
            }
        }

        Self {
            staff_ids: staff.iter().map(|s| s.id.clone()).collect(),
            dates: dates.to_vec(),
            ids,
            unemployed,
        }
    }

    pub fn var(&self, staff_idx: usize, date_idx: usize, kind: ShiftKind) -> Option<VarId> {
        self.ids.get(&VarKey { staff_idx, date_idx, kind }).copied()
    }

    pub fn is_employed(&self, staff_idx: usize, date_idx: usize) -> bool {
        self.ids
            .contains_key(&VarKey { staff_idx, date_idx, kind: ShiftKind::Work })
    }

    pub fn num_staff(&self) -> usize {
        self.staff_ids.len()
    }

    pub fn num_dates(&self) -> usize {
        self.dates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Staff;

    fn plain_staff(id: &str) -> Staff {
        Staff {
            id: id.into(),
            name: id.into(),
            status: "Unknown".into(),
            start_period: None,
            end_period: None,
            is_backup: false,
        }
    }

    #[test]
    fn allocates_one_var_per_kind_per_employed_pair() {
        let staff = vec![plain_staff("a")];
        let dates = vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()];
        let mut next = 0u32;
        let vs = VariableSet::build(&staff, &dates, |_| {
            let id = VarId(next);
            next += 1;
            id
        });
        assert_eq!(next as usize, ShiftKind::ALL.len());
        assert!(vs.var(0, 0, ShiftKind::Work).is_some());
        assert!(vs.unemployed.is_empty());
    }

    #[test]
    fn skips_unemployed_pairs() {
        let mut s = plain_staff("a");
        s.start_period = Some(shared::PeriodBoundary { year: 2026, month: 2, day: None });
        let staff = vec![s];
        let dates = vec![NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()];
        let vs = VariableSet::build(&staff, &dates, |_| VarId(0));
        assert_eq!(vs.unemployed, vec![(0, 0)]);
        assert!(vs.var(0, 0, ShiftKind::Work).is_none());
    }
}
