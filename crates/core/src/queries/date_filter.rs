//! Year/month filtering of visits.

use serde::{Deserialize, Serialize};

use crate::patients::{PatientId, PatientStore};
use crate::visits::Visit;

/// Year and month to match. Unset parts match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl DateFilter {
    pub fn new(year: Option<i32>, month: Option<u32>) -> Self {
        Self { year, month }
    }

    fn matches(&self, date: &str) -> bool {
        let Some((year, month)) = split_date(date) else {
            return false;
        };
        self.year.map_or(true, |y| y == year) && self.month.map_or(true, |m| m == month)
    }
}

/// Year and month of a `YYYY-MM-DD` date whose three parts are all integers.
fn split_date(date: &str) -> Option<(i32, u32)> {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };
    let year = year.trim().parse::<i32>().ok()?;
    let month = month.trim().parse::<u32>().ok()?;
    day.trim().parse::<u32>().ok()?;
    Some((year, month))
}

/// Visits whose date matches the filter, in store order. Visits with
/// malformed dates never match.
pub fn find_visits_by_date(store: &PatientStore, filter: DateFilter) -> Vec<(PatientId, &Visit)> {
    store
        .iter_visits()
        .filter(|(_, visit)| filter.matches(visit.date()))
        .collect()
}
