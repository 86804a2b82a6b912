use crate::models::ExpenseRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recency window used to scope an analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    All,
    Today,
    ThisWeek,
    ThisMonth,
    ThisQuarter,
}

impl TimeWindow {
    /// Maximum age in calendar days, or None for the unbounded window.
    fn day_span(&self) -> Option<i64> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Today => Some(0),
            TimeWindow::ThisWeek => Some(7),
            TimeWindow::ThisMonth => Some(30),
            TimeWindow::ThisQuarter => Some(90),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeWindow::All => "all time",
            TimeWindow::Today => "today",
            TimeWindow::ThisWeek => "this week",
            TimeWindow::ThisMonth => "this month",
            TimeWindow::ThisQuarter => "this quarter",
        };
        f.write_str(label)
    }
}

/// Select the records falling inside `window`, measured back from `now`.
///
/// Pure function of its inputs: `now` is injected so reports are reproducible.
/// `Today` matches the calendar date of `now` exactly; the other bounded
/// windows compare the signed calendar-day difference against the span, so a
/// record time-stamped ahead of `now` stays inside every non-today window.
pub fn filter_records(
    records: &[ExpenseRecord],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<ExpenseRecord> {
    let span = match window.day_span() {
        Some(span) => span,
        None => return records.to_vec(),
    };

    let today = now.date_naive();
    records
        .iter()
        .filter(|record| {
            let record_date = record.timestamp.date_naive();
            if span == 0 {
                record_date == today
            } else {
                (today - record_date).num_days() <= span
            }
        })
        .cloned()
        .collect()
}
