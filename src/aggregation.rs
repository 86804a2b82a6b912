use crate::models::{Category, Emotion, ExpenseRecord};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{HashMap, HashSet};

/// Grouped totals and summary scalars for one set of expense records.
///
/// Recomputed from scratch on every analysis pass; nothing in here outlives
/// the pass that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationResult {
    pub emotion_totals: HashMap<Emotion, u64>,
    pub category_emotion_totals: HashMap<Category, HashMap<Emotion, u64>>,
    pub weekday_totals: HashMap<Weekday, u64>,
    pub daily_totals: HashMap<NaiveDate, u64>,
    /// Occurrence counts per (emotion, category) pair, negative emotions only.
    pub trigger_counts: HashMap<(Emotion, Category), u64>,
    pub total_spend: u64,
    pub emotional_spend: u64,
    pub emotional_spend_ratio: f64,
    pub dominant_emotion: Option<Emotion>,
    /// Most frequent (emotion, category) trigger pair, if any.
    pub dominant_trigger: Option<(Emotion, Category)>,
    pub record_count: usize,
}

/// Aggregate a record set along the emotion, category, weekday, and calendar
/// day axes in a single pass.
///
/// Dominant selections are resolved after the pass by walking the records in
/// their original order and keeping the first entry whose total is strictly
/// greater than every total seen before it, so ties always resolve to the
/// earliest-encountered value and reruns over the same records are
/// bit-identical.
pub fn aggregate(records: &[ExpenseRecord]) -> AggregationResult {
    let mut result = AggregationResult {
        record_count: records.len(),
        ..Default::default()
    };

    for record in records {
        *result.emotion_totals.entry(record.emotion).or_default() += record.amount;
        *result
            .category_emotion_totals
            .entry(record.category)
            .or_default()
            .entry(record.emotion)
            .or_default() += record.amount;

        let date = record.timestamp.date_naive();
        *result.weekday_totals.entry(date.weekday()).or_default() += record.amount;
        *result.daily_totals.entry(date).or_default() += record.amount;

        result.total_spend += record.amount;
        if record.emotion.is_negative() {
            result.emotional_spend += record.amount;
            *result
                .trigger_counts
                .entry((record.emotion, record.category))
                .or_default() += 1;
        }
    }

    result.emotional_spend_ratio = if result.total_spend > 0 {
        result.emotional_spend as f64 / result.total_spend as f64
    } else {
        0.0
    };

    result.dominant_emotion = dominant_emotion(records, &result.emotion_totals);
    result.dominant_trigger = dominant_trigger(records, &result.trigger_counts);

    result
}

fn dominant_emotion(
    records: &[ExpenseRecord],
    totals: &HashMap<Emotion, u64>,
) -> Option<Emotion> {
    let mut seen = HashSet::new();
    let mut best: Option<(Emotion, u64)> = None;

    for record in records {
        if !seen.insert(record.emotion) {
            continue;
        }
        let total = totals[&record.emotion];
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((record.emotion, total)),
        }
    }

    best.map(|(emotion, _)| emotion)
}

fn dominant_trigger(
    records: &[ExpenseRecord],
    counts: &HashMap<(Emotion, Category), u64>,
) -> Option<(Emotion, Category)> {
    let mut seen = HashSet::new();
    let mut best: Option<((Emotion, Category), u64)> = None;

    for record in records {
        if !record.emotion.is_negative() {
            continue;
        }
        let pair = (record.emotion, record.category);
        if !seen.insert(pair) {
            continue;
        }
        let count = counts[&pair];
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((pair, count)),
        }
    }

    best.map(|(pair, _)| pair)
}
