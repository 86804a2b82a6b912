use crate::aggregation::AggregationResult;
use crate::models::Emotion;
use serde::Serialize;

/// Classification of a generated insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    HighEmotionalSpending,
    DominantEmotion,
    TriggerPattern,
}

/// How urgently the presentation layer should surface an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
    Tip,
}

/// A human-readable observation derived from aggregated statistics.
///
/// Stateless and regenerated on every pass; `icon_hint` is a token the
/// presentation layer maps to whatever iconography it has.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(rename = "iconHint")]
    pub icon_hint: String,
}

/// Tunable cut-offs for insight generation.
#[derive(Debug, Clone)]
pub struct InsightThresholds {
    /// Emotional share of spending above which the warning fires.
    pub emotional_spend_warning_ratio: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            emotional_spend_warning_ratio: 0.40,
        }
    }
}

/// Generates ranked insights from one aggregation pass.
pub struct InsightGenerator {
    thresholds: InsightThresholds,
}

impl InsightGenerator {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate the three insight rules in their fixed order.
    ///
    /// Each rule emits at most one insight and the output preserves rule
    /// order regardless of which subset fires.
    pub fn generate(&self, aggregation: &AggregationResult) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(insight) = self.high_emotional_spending(aggregation) {
            insights.push(insight);
        }
        if let Some(insight) = self.dominant_emotion(aggregation) {
            insights.push(insight);
        }
        if let Some(insight) = self.trigger_pattern(aggregation) {
            insights.push(insight);
        }

        insights
    }

    fn high_emotional_spending(&self, aggregation: &AggregationResult) -> Option<Insight> {
        if aggregation.emotional_spend_ratio <= self.thresholds.emotional_spend_warning_ratio {
            return None;
        }

        Some(Insight {
            kind: InsightKind::HighEmotionalSpending,
            severity: Severity::Warning,
            title: "High emotional spending".to_string(),
            description: format!(
                "{:.0}% of your spending happened while stressed, anxious, sad, or angry ({} of {} total).",
                aggregation.emotional_spend_ratio * 100.0,
                aggregation.emotional_spend,
                aggregation.total_spend
            ),
            icon_hint: "alert-triangle".to_string(),
        })
    }

    fn dominant_emotion(&self, aggregation: &AggregationResult) -> Option<Insight> {
        let emotion = aggregation.dominant_emotion?;
        if emotion == Emotion::Calm {
            return None;
        }

        let total = aggregation.emotion_totals.get(&emotion).copied().unwrap_or(0);
        Some(Insight {
            kind: InsightKind::DominantEmotion,
            severity: Severity::Info,
            title: format!("Most spending while {}", emotion),
            description: format!(
                "Your largest spending total ({}) was recorded while feeling {}.",
                total, emotion
            ),
            icon_hint: "trending-up".to_string(),
        })
    }

    fn trigger_pattern(&self, aggregation: &AggregationResult) -> Option<Insight> {
        let (emotion, category) = aggregation.dominant_trigger?;
        let count = aggregation
            .trigger_counts
            .get(&(emotion, category))
            .copied()
            .unwrap_or(0);

        Some(Insight {
            kind: InsightKind::TriggerPattern,
            severity: Severity::Tip,
            title: "Spending trigger detected".to_string(),
            description: format!(
                "{} {} purchases while feeling {}. This pair recurs often enough to look like a habit.",
                count, category, emotion
            ),
            icon_hint: "lightbulb".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::models::{Category, Emotion, ExpenseRecord};
    use chrono::{DateTime, Utc};

    fn fixed_now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    fn record(amount: u64, category: Category, emotion: Emotion) -> ExpenseRecord {
        ExpenseRecord::new(amount, category, emotion, fixed_now())
    }

    fn generator() -> InsightGenerator {
        InsightGenerator::new(InsightThresholds::default())
    }

    #[test]
    fn test_high_emotional_spending_fires_once() {
        // 55% emotional share produces exactly one warning.
        let records = vec![
            record(5500, Category::Shopping, Emotion::Stressed),
            record(4500, Category::Food, Emotion::Happy),
        ];
        let insights = generator().generate(&aggregate(&records));

        let warnings: Vec<_> = insights
            .iter()
            .filter(|i| i.kind == InsightKind::HighEmotionalSpending)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_no_warning_at_or_below_threshold() {
        // Exactly 40% does not cross the strict threshold.
        let records = vec![
            record(4000, Category::Shopping, Emotion::Stressed),
            record(6000, Category::Food, Emotion::Happy),
        ];
        let insights = generator().generate(&aggregate(&records));
        assert!(
            insights
                .iter()
                .all(|i| i.kind != InsightKind::HighEmotionalSpending)
        );
    }

    #[test]
    fn test_no_emotional_insight_for_positive_spending() {
        let records = vec![
            record(2500, Category::Food, Emotion::Happy),
            record(15000, Category::Festival, Emotion::Excited),
        ];
        let insights = generator().generate(&aggregate(&records));
        assert!(
            insights
                .iter()
                .all(|i| i.kind != InsightKind::HighEmotionalSpending)
        );
    }

    #[test]
    fn test_calm_dominant_emotion_is_silent() {
        let records = vec![record(5000, Category::Utilities, Emotion::Calm)];
        let insights = generator().generate(&aggregate(&records));
        assert!(insights.iter().all(|i| i.kind != InsightKind::DominantEmotion));
    }

    #[test]
    fn test_trigger_pattern_names_the_pair() {
        let records = vec![
            record(100, Category::Shopping, Emotion::Stressed),
            record(200, Category::Shopping, Emotion::Stressed),
            record(300, Category::Food, Emotion::Sad),
        ];
        let insights = generator().generate(&aggregate(&records));

        let tip = insights
            .iter()
            .find(|i| i.kind == InsightKind::TriggerPattern)
            .expect("trigger insight");
        assert_eq!(tip.severity, Severity::Tip);
        assert!(tip.description.contains("shopping"));
        assert!(tip.description.contains("stressed"));
    }

    #[test]
    fn test_output_preserves_rule_order() {
        let records = vec![
            record(6000, Category::Shopping, Emotion::Stressed),
            record(6000, Category::Shopping, Emotion::Stressed),
            record(1000, Category::Food, Emotion::Happy),
        ];
        let insights = generator().generate(&aggregate(&records));

        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].kind, InsightKind::HighEmotionalSpending);
        assert_eq!(insights[1].kind, InsightKind::DominantEmotion);
        assert_eq!(insights[2].kind, InsightKind::TriggerPattern);
    }

    #[test]
    fn test_empty_aggregation_yields_no_insights() {
        let insights = generator().generate(&aggregate(&[]));
        assert!(insights.is_empty());
    }
}
