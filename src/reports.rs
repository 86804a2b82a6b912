use crate::aggregation::AggregationResult;
use crate::models::{
    CategoryEmotionRow, DailyBreakdownRow, EmotionBreakdownRow, SummaryReport, SummaryTotals,
    WeekdayBreakdownRow,
};
use crate::window::TimeWindow;
use chrono::Weekday;

/// Flatten an aggregation pass into presentation-ready, sorted rows.
pub fn generate_summary_report(
    aggregation: &AggregationResult,
    window: TimeWindow,
) -> SummaryReport {
    let mut emotions: Vec<EmotionBreakdownRow> = aggregation
        .emotion_totals
        .iter()
        .map(|(emotion, total)| EmotionBreakdownRow {
            emotion: *emotion,
            total: *total,
            share_percent: if aggregation.total_spend > 0 {
                *total as f64 / aggregation.total_spend as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    // Highest spend first; emotion label breaks exact ties so output is stable.
    emotions.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.emotion.to_string().cmp(&b.emotion.to_string()))
    });

    // Calendar order keeps the weekday table readable.
    let weekdays: Vec<WeekdayBreakdownRow> = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .iter()
    .map(|weekday| WeekdayBreakdownRow {
        weekday: weekday_label(*weekday).to_string(),
        total: aggregation.weekday_totals.get(weekday).copied().unwrap_or(0),
    })
    .collect();

    // Most recent day first, like a ledger.
    let mut days: Vec<DailyBreakdownRow> = aggregation
        .daily_totals
        .iter()
        .map(|(date, total)| DailyBreakdownRow {
            date: date.format("%Y-%m-%d").to_string(),
            total: *total,
        })
        .collect();
    days.sort_by(|a, b| b.date.cmp(&a.date));

    let mut categories: Vec<CategoryEmotionRow> = aggregation
        .category_emotion_totals
        .iter()
        .flat_map(|(category, by_emotion)| {
            by_emotion
                .iter()
                .map(|(emotion, total)| CategoryEmotionRow {
                    category: *category,
                    emotion: *emotion,
                    total: *total,
                })
        })
        .collect();
    categories.sort_by(|a, b| {
        b.total.cmp(&a.total).then_with(|| {
            a.category
                .to_string()
                .cmp(&b.category.to_string())
                .then_with(|| a.emotion.to_string().cmp(&b.emotion.to_string()))
        })
    });

    SummaryReport {
        window: window.to_string(),
        emotions,
        weekdays,
        days,
        categories,
        totals: SummaryTotals {
            total_spend: aggregation.total_spend,
            emotional_spend: aggregation.emotional_spend,
            emotional_spend_ratio: aggregation.emotional_spend_ratio,
            dominant_emotion: aggregation.dominant_emotion,
            record_count: aggregation.record_count,
        },
    }
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
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

    #[test]
    fn test_emotion_rows_sorted_by_total() {
        let records = vec![
            record(100, Category::Food, Emotion::Happy),
            record(900, Category::Shopping, Emotion::Stressed),
        ];
        let report = generate_summary_report(&aggregate(&records), TimeWindow::All);

        assert_eq!(report.emotions[0].emotion, Emotion::Stressed);
        assert_eq!(report.emotions[0].total, 900);
        assert!((report.emotions[0].share_percent - 90.0).abs() < f64::EPSILON);
        assert_eq!(report.emotions[1].emotion, Emotion::Happy);
    }

    #[test]
    fn test_weekday_rows_cover_whole_week() {
        let report = generate_summary_report(&aggregate(&[]), TimeWindow::ThisWeek);
        assert_eq!(report.weekdays.len(), 7);
        assert_eq!(report.weekdays[0].weekday, "Monday");
        assert!(report.weekdays.iter().all(|row| row.total == 0));
    }

    #[test]
    fn test_totals_carry_over() {
        let records = vec![record(2500, Category::Food, Emotion::Happy)];
        let report = generate_summary_report(&aggregate(&records), TimeWindow::All);

        assert_eq!(report.totals.total_spend, 2500);
        assert_eq!(report.totals.emotional_spend, 0);
        assert_eq!(report.totals.dominant_emotion, Some(Emotion::Happy));
        assert_eq!(report.totals.record_count, 1);
        assert_eq!(report.window, "all time");
    }

    #[test]
    fn test_daily_rows_most_recent_first() {
        use chrono::Duration;

        let now = fixed_now();
        let mut yesterday = record(700, Category::Food, Emotion::Calm);
        yesterday.timestamp = now - Duration::days(1);
        let records = vec![record(300, Category::Food, Emotion::Calm), yesterday];
        let report = generate_summary_report(&aggregate(&records), TimeWindow::All);

        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].date, "2026-08-05");
        assert_eq!(report.days[0].total, 300);
        assert_eq!(report.days[1].date, "2026-08-04");
    }

    #[test]
    fn test_category_rows_flattened_and_sorted() {
        let records = vec![
            record(100, Category::Food, Emotion::Happy),
            record(300, Category::Food, Emotion::Stressed),
            record(200, Category::Shopping, Emotion::Sad),
        ];
        let report = generate_summary_report(&aggregate(&records), TimeWindow::All);

        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.categories[0].total, 300);
        assert_eq!(report.categories[0].category, Category::Food);
        assert_eq!(report.categories[1].total, 200);
    }
}
