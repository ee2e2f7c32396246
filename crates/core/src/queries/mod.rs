//! Queries module - read-only operations over a patient store.

mod date_filter;
mod follow_up;
mod listing;
mod statistics;

pub use date_filter::{find_visits_by_date, DateFilter};
pub use follow_up::find_follow_up_candidates;
pub use listing::{list_all, list_by_patient};
pub use statistics::{compute_statistics, VitalStatistics};
