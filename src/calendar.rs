use crate::error::{EmolyticsError, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A named calendar date: a festival or a known stressful event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub name: String,
    pub date: NaiveDate,
}

/// Source of festival dates and known stressful events.
///
/// Implementations answer from already-materialized data; both methods may
/// return an empty list. The alert rule engine treats a failure here as a
/// per-rule failure, never a pass failure.
pub trait CalendarProvider {
    /// Festivals strictly after `now`, nearest first.
    fn upcoming_festivals(&self, now: DateTime<Utc>) -> Result<Vec<CalendarEvent>>;

    /// Stressful events inside the provider's lookahead horizon.
    fn stressful_events(&self, now: DateTime<Utc>) -> Result<Vec<CalendarEvent>>;
}

/// Calendar provider backed by static tables, typically loaded from the
/// configuration file.
#[derive(Debug, Clone)]
pub struct StaticCalendar {
    festivals: Vec<CalendarEvent>,
    stressful: Vec<CalendarEvent>,
    lookahead_days: i64,
}

impl Default for StaticCalendar {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl StaticCalendar {
    pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 30;

    pub fn new(festivals: Vec<CalendarEvent>, stressful: Vec<CalendarEvent>) -> Self {
        Self {
            festivals,
            stressful,
            lookahead_days: Self::DEFAULT_LOOKAHEAD_DAYS,
        }
    }

    pub fn with_lookahead_days(mut self, days: i64) -> Self {
        self.lookahead_days = days;
        self
    }
}

impl CalendarProvider for StaticCalendar {
    fn upcoming_festivals(&self, now: DateTime<Utc>) -> Result<Vec<CalendarEvent>> {
        let today = now.date_naive();
        let mut upcoming: Vec<CalendarEvent> = self
            .festivals
            .iter()
            .filter(|event| event.date > today)
            .cloned()
            .collect();
        upcoming.sort_by_key(|event| event.date);
        Ok(upcoming)
    }

    fn stressful_events(&self, now: DateTime<Utc>) -> Result<Vec<CalendarEvent>> {
        if self.lookahead_days < 0 {
            return Err(EmolyticsError::calendar_error(
                "lookahead_days must not be negative",
            ));
        }

        let today = now.date_naive();
        let horizon = today + Duration::days(self.lookahead_days);
        let mut events: Vec<CalendarEvent> = self
            .stressful
            .iter()
            .filter(|event| event.date > today && event.date <= horizon)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.date);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    fn event(name: &str, date: &str) -> CalendarEvent {
        CalendarEvent {
            name: name.to_string(),
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn test_upcoming_festivals_sorted_nearest_first() {
        let calendar = StaticCalendar::new(
            vec![
                event("harvest", "2026-09-20"),
                event("new year", "2026-08-10"),
                event("past festival", "2026-08-01"),
            ],
            vec![],
        );

        let upcoming = calendar.upcoming_festivals(fixed_now()).unwrap();
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].name, "new year");
        assert_eq!(upcoming[1].name, "harvest");
    }

    #[test]
    fn test_today_is_not_upcoming() {
        let calendar = StaticCalendar::new(vec![event("today", "2026-08-05")], vec![]);
        assert!(calendar.upcoming_festivals(fixed_now()).unwrap().is_empty());
    }

    #[test]
    fn test_stressful_events_respect_lookahead() {
        let calendar = StaticCalendar::new(
            vec![],
            vec![
                event("exam", "2026-08-12"),
                event("far away review", "2026-12-01"),
            ],
        );

        let events = calendar.stressful_events(fixed_now()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "exam");
    }

    #[test]
    fn test_empty_tables_yield_empty_lists() {
        let calendar = StaticCalendar::default();
        assert!(calendar.upcoming_festivals(fixed_now()).unwrap().is_empty());
        assert!(calendar.stressful_events(fixed_now()).unwrap().is_empty());
    }

    #[test]
    fn test_negative_lookahead_is_rejected() {
        let calendar = StaticCalendar::default().with_lookahead_days(-1);
        assert!(calendar.stressful_events(fixed_now()).is_err());
    }
}
