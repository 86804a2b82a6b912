use crate::aggregation::{AggregationResult, aggregate};
use crate::calendar::CalendarProvider;
use crate::error::Result;
use crate::models::{Category, Emotion, ExpenseRecord};
use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::Serialize;
use std::fmt;

/// Days of recent activity the pattern rules look back over.
const RECENT_DAYS: i64 = 7;
/// Lookback for the weekend spending rule.
const WEEKEND_LOOKBACK_DAYS: i64 = 30;
/// Negative-emotion records needed for the emotional pattern rule.
const EMOTIONAL_PATTERN_MIN_RECORDS: usize = 3;
/// Stressed family records needed for the family pressure rule.
const FAMILY_PRESSURE_MIN_RECORDS: usize = 2;
/// Festival preparation fires between 1 and this many days ahead.
const FESTIVAL_MAX_DAYS_AHEAD: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    EmotionalPattern,
    FestivalPreparation,
    StressPrediction,
    WeekendSpending,
    FamilyPressure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertPriority::High => "high",
            AlertPriority::Medium => "medium",
            AlertPriority::Low => "low",
        };
        f.write_str(label)
    }
}

/// Follow-up action token forwarded, uninterpreted, to the presentation
/// layer when the user acts on an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Breathing,
    Budget,
    StressManagement,
    SetLimit,
    FamilyDiscussion,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionType::Breathing => "breathing",
            ActionType::Budget => "budget",
            ActionType::StressManagement => "stress_management",
            ActionType::SetLimit => "set_limit",
            ActionType::FamilyDiscussion => "family_discussion",
        };
        f.write_str(label)
    }
}

/// A proactively generated, actionable notice.
///
/// `id` equals the firing rule's name, so re-evaluation without dismissal
/// yields the same id and dismiss state can be keyed on it.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub priority: AlertPriority,
    pub title: String,
    pub description: String,
    pub suggestion: String,
    pub action: ActionType,
    pub dismissed: bool,
}

/// Shared inputs one rule evaluation pass reads from.
pub struct RuleContext<'a> {
    /// The full record set, unfiltered.
    pub records: &'a [ExpenseRecord],
    /// Records from the last seven days.
    pub recent: &'a [ExpenseRecord],
    /// Aggregation over the seven-day subset.
    pub aggregation: &'a AggregationResult,
    pub calendar: &'a dyn CalendarProvider,
    pub now: DateTime<Utc>,
}

/// One independent predicate+constructor pair.
///
/// Rules are declared in a fixed table and evaluated unconditionally every
/// pass; one rule firing or failing never affects another.
struct AlertRule {
    id: &'static str,
    eval: fn(&RuleContext) -> Result<Option<Alert>>,
}

static RULES: [AlertRule; 5] = [
    AlertRule {
        id: "emotional_pattern",
        eval: emotional_pattern,
    },
    AlertRule {
        id: "festival_preparation",
        eval: festival_preparation,
    },
    AlertRule {
        id: "stress_prediction",
        eval: stress_prediction,
    },
    AlertRule {
        id: "weekend_spending",
        eval: weekend_spending,
    },
    AlertRule {
        id: "family_pressure",
        eval: family_pressure,
    },
];

/// Run the full rule battery against the record set and calendar.
///
/// Performs its own seven-day recency filter, independent of whatever window
/// the caller analyzed. A rule returning an error is reported and dropped
/// for this pass only.
pub fn evaluate_alerts(
    records: &[ExpenseRecord],
    calendar: &dyn CalendarProvider,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let today = now.date_naive();
    let recent: Vec<ExpenseRecord> = records
        .iter()
        .filter(|record| {
            let days = (today - record.timestamp.date_naive()).num_days();
            (0..=RECENT_DAYS).contains(&days)
        })
        .cloned()
        .collect();
    let aggregation = aggregate(&recent);

    let ctx = RuleContext {
        records,
        recent: &recent,
        aggregation: &aggregation,
        calendar,
        now,
    };

    let mut alerts = Vec::new();
    for rule in &RULES {
        match (rule.eval)(&ctx) {
            Ok(Some(alert)) => alerts.push(alert),
            Ok(None) => {}
            Err(err) => {
                eprintln!("Warning: alert rule '{}' failed: {}", rule.id, err);
            }
        }
    }
    alerts
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Fri | Weekday::Sat)
}

fn emotional_pattern(ctx: &RuleContext) -> Result<Option<Alert>> {
    let negative_count = ctx
        .recent
        .iter()
        .filter(|record| record.emotion.is_negative())
        .count();
    if negative_count < EMOTIONAL_PATTERN_MIN_RECORDS {
        return Ok(None);
    }

    Ok(Some(Alert {
        id: "emotional_pattern".to_string(),
        kind: AlertKind::EmotionalPattern,
        priority: AlertPriority::High,
        title: "Emotional spending pattern".to_string(),
        description: format!(
            "{} purchases in the last {} days were made while stressed, anxious, sad, or angry.",
            negative_count, RECENT_DAYS
        ),
        suggestion: "Pause before the next purchase and take a short breathing break.".to_string(),
        action: ActionType::Breathing,
        dismissed: false,
    }))
}

fn festival_preparation(ctx: &RuleContext) -> Result<Option<Alert>> {
    let today = ctx.now.date_naive();
    // Only the two nearest upcoming festivals are considered.
    let candidate = ctx
        .calendar
        .upcoming_festivals(ctx.now)?
        .into_iter()
        .take(2)
        .filter(|event| event.date > today)
        .min_by_key(|event| event.date);

    let festival = match candidate {
        Some(festival) => festival,
        None => return Ok(None),
    };

    let days_ahead = (festival.date - today).num_days();
    if !(1..=FESTIVAL_MAX_DAYS_AHEAD).contains(&days_ahead) {
        return Ok(None);
    }

    Ok(Some(Alert {
        id: "festival_preparation".to_string(),
        kind: AlertKind::FestivalPreparation,
        priority: AlertPriority::Medium,
        title: format!("{} is coming up", festival.name),
        description: format!(
            "{} is {} day{} away. Festival periods usually raise spending.",
            festival.name,
            days_ahead,
            if days_ahead == 1 { "" } else { "s" }
        ),
        suggestion: "Set a festival budget now, before the spending starts.".to_string(),
        action: ActionType::Budget,
        dismissed: false,
    }))
}

fn stress_prediction(ctx: &RuleContext) -> Result<Option<Alert>> {
    let events = ctx.calendar.stressful_events(ctx.now)?;
    let event = match events.first() {
        Some(event) => event,
        None => return Ok(None),
    };

    Ok(Some(Alert {
        id: "stress_prediction".to_string(),
        kind: AlertKind::StressPrediction,
        priority: AlertPriority::Medium,
        title: "Stressful period ahead".to_string(),
        description: format!(
            "'{}' on {} may push spending up. Stress purchases tend to cluster around events like this.",
            event.name, event.date
        ),
        suggestion: "Plan ahead for the stressful period instead of spending through it."
            .to_string(),
        action: ActionType::StressManagement,
        dismissed: false,
    }))
}

fn weekend_spending(ctx: &RuleContext) -> Result<Option<Alert>> {
    if !is_weekend(ctx.now.date_naive().weekday()) {
        return Ok(None);
    }

    let today = ctx.now.date_naive();
    let weekend_amounts: Vec<u64> = ctx
        .records
        .iter()
        .filter(|record| {
            let date = record.timestamp.date_naive();
            let days = (today - date).num_days();
            (0..=WEEKEND_LOOKBACK_DAYS).contains(&days) && is_weekend(date.weekday())
        })
        .map(|record| record.amount)
        .collect();

    if weekend_amounts.is_empty() {
        return Ok(None);
    }

    let mean =
        (weekend_amounts.iter().sum::<u64>() as f64 / weekend_amounts.len() as f64).round() as u64;

    Ok(Some(Alert {
        id: "weekend_spending".to_string(),
        kind: AlertKind::WeekendSpending,
        priority: AlertPriority::Low,
        title: "Weekend spending watch".to_string(),
        description: format!(
            "It's the weekend, and your {} weekend purchase{} over the last {} days averaged {} each.",
            weekend_amounts.len(),
            if weekend_amounts.len() == 1 { "" } else { "s" },
            WEEKEND_LOOKBACK_DAYS,
            mean
        ),
        suggestion: "Set a weekend spending limit before heading out.".to_string(),
        action: ActionType::SetLimit,
        dismissed: false,
    }))
}

fn family_pressure(ctx: &RuleContext) -> Result<Option<Alert>> {
    // Trigger counts already tally stressed family records over the
    // seven-day window.
    let stressed_family_count = ctx
        .aggregation
        .trigger_counts
        .get(&(Emotion::Stressed, Category::Family))
        .copied()
        .unwrap_or(0) as usize;
    if stressed_family_count < FAMILY_PRESSURE_MIN_RECORDS {
        return Ok(None);
    }

    Ok(Some(Alert {
        id: "family_pressure".to_string(),
        kind: AlertKind::FamilyPressure,
        priority: AlertPriority::High,
        title: "Family spending under stress".to_string(),
        description: format!(
            "{} family expenses in the last {} days were recorded while stressed.",
            stressed_family_count, RECENT_DAYS
        ),
        suggestion: "An open conversation about family finances may relieve the pressure."
            .to_string(),
        action: ActionType::FamilyDiscussion,
        dismissed: false,
    }))
}
