use crate::aggregation::{AggregationResult, aggregate};
use crate::alert_center::AlertCenter;
use crate::alerts::{Alert, evaluate_alerts};
use crate::calendar::CalendarProvider;
use crate::insights::{Insight, InsightGenerator, InsightThresholds};
use crate::models::ExpenseRecord;
use crate::window::{TimeWindow, filter_records};
use chrono::{DateTime, Utc};

/// Output of one full analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub window: TimeWindow,
    pub aggregation: AggregationResult,
    pub insights: Vec<Insight>,
    /// Every alert the rule battery produced, dismissed flags applied.
    pub alerts: Vec<Alert>,
}

impl AnalysisReport {
    /// The alerts the presentation layer should show, order preserved.
    pub fn visible_alerts(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|alert| !alert.dismissed).collect()
    }
}

/// Orchestrates one analysis pass and owns the session's dismissal state.
///
/// The engine holds no record storage: every pass recomputes from the record
/// set it is handed, and `now` is always injected by the caller so passes
/// are deterministic.
pub struct AnalyticsEngine<C: CalendarProvider> {
    calendar: C,
    thresholds: InsightThresholds,
    alert_center: AlertCenter,
}

impl<C: CalendarProvider> AnalyticsEngine<C> {
    pub fn new(calendar: C) -> Self {
        Self {
            calendar,
            thresholds: InsightThresholds::default(),
            alert_center: AlertCenter::new(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: InsightThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Run one analysis pass: window filter, aggregation, insights, and the
    /// predictive rule battery (which applies its own seven-day recency
    /// filter to the full record set, independent of `window`).
    pub fn analyze(
        &self,
        records: &[ExpenseRecord],
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> AnalysisReport {
        let windowed = filter_records(records, window, now);
        let aggregation = aggregate(&windowed);
        let insights = InsightGenerator::new(self.thresholds.clone()).generate(&aggregation);

        let mut alerts = evaluate_alerts(records, &self.calendar, now);
        self.alert_center.mark(&mut alerts);

        AnalysisReport {
            window,
            aggregation,
            insights,
            alerts,
        }
    }

    /// Fresh predictive-rule pass. Previously dismissed rule ids stay
    /// dismissed.
    pub fn regenerate(&self, records: &[ExpenseRecord], now: DateTime<Utc>) -> Vec<Alert> {
        let mut alerts = evaluate_alerts(records, &self.calendar, now);
        self.alert_center.mark(&mut alerts);
        alerts
    }

    pub fn dismiss(&mut self, id: &str) {
        self.alert_center.dismiss(id);
    }

    pub fn dismiss_all(&mut self, alerts: &[Alert]) {
        self.alert_center.dismiss_all(alerts);
    }

    pub fn clear_dismissed(&mut self) {
        self.alert_center.clear();
    }

    pub fn alert_center(&self) -> &AlertCenter {
        &self.alert_center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::StaticCalendar;
    use crate::insights::InsightKind;
    use crate::models::{Category, Emotion};
    use chrono::Duration;

    fn fixed_now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    fn record(
        amount: u64,
        category: Category,
        emotion: Emotion,
        timestamp: DateTime<Utc>,
    ) -> ExpenseRecord {
        ExpenseRecord::new(amount, category, emotion, timestamp)
    }

    fn stressed_week(now: DateTime<Utc>) -> Vec<ExpenseRecord> {
        vec![
            record(1000, Category::Family, Emotion::Stressed, now - Duration::days(1)),
            record(2000, Category::Family, Emotion::Stressed, now - Duration::days(2)),
            record(5000, Category::Shopping, Emotion::Stressed, now - Duration::days(3)),
            record(500, Category::Food, Emotion::Happy, now - Duration::days(4)),
        ]
    }

    #[test]
    fn test_full_pass_produces_all_sections() {
        let now = fixed_now();
        let engine = AnalyticsEngine::new(StaticCalendar::default());
        let report = engine.analyze(&stressed_week(now), TimeWindow::ThisWeek, now);

        assert_eq!(report.aggregation.total_spend, 8500);
        assert_eq!(report.aggregation.emotional_spend, 8000);
        assert!(
            report
                .insights
                .iter()
                .any(|i| i.kind == InsightKind::HighEmotionalSpending)
        );
        assert!(report.alerts.iter().any(|a| a.id == "emotional_pattern"));
        assert!(report.alerts.iter().any(|a| a.id == "family_pressure"));
    }

    #[test]
    fn test_alert_window_is_independent_of_caller_window() {
        // A `today` analysis still sees the seven-day alert pattern.
        let now = fixed_now();
        let engine = AnalyticsEngine::new(StaticCalendar::default());
        let report = engine.analyze(&stressed_week(now), TimeWindow::Today, now);

        assert_eq!(report.aggregation.record_count, 0);
        assert!(report.alerts.iter().any(|a| a.id == "emotional_pattern"));
    }

    #[test]
    fn test_dismissed_alert_stays_hidden_after_regenerate() {
        let now = fixed_now();
        let records = stressed_week(now);
        let mut engine = AnalyticsEngine::new(StaticCalendar::default());

        let report = engine.analyze(&records, TimeWindow::All, now);
        assert!(
            report
                .visible_alerts()
                .iter()
                .any(|a| a.id == "emotional_pattern")
        );

        engine.dismiss("emotional_pattern");
        let regenerated = engine.regenerate(&records, now);
        let visible = engine.alert_center().visible(&regenerated);
        assert!(visible.iter().all(|a| a.id != "emotional_pattern"));
        assert!(visible.iter().any(|a| a.id == "family_pressure"));

        engine.clear_dismissed();
        let restored = engine.regenerate(&records, now);
        assert!(
            engine
                .alert_center()
                .visible(&restored)
                .iter()
                .any(|a| a.id == "emotional_pattern")
        );
    }

    #[test]
    fn test_dismiss_all_hides_everything() {
        let now = fixed_now();
        let records = stressed_week(now);
        let mut engine = AnalyticsEngine::new(StaticCalendar::default());

        let report = engine.analyze(&records, TimeWindow::All, now);
        let alerts = report.alerts.clone();
        engine.dismiss_all(&alerts);

        let report = engine.analyze(&records, TimeWindow::All, now);
        assert!(report.visible_alerts().is_empty());
        assert!(!report.alerts.is_empty());
    }

    #[test]
    fn test_empty_records_degrade_to_empty_outputs() {
        let engine = AnalyticsEngine::new(StaticCalendar::default());
        let report = engine.analyze(&[], TimeWindow::All, fixed_now());

        assert_eq!(report.aggregation.total_spend, 0);
        assert!(report.insights.is_empty());
        assert!(report.alerts.is_empty());
        assert!(report.visible_alerts().is_empty());
    }
}
