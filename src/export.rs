use crate::alerts::Alert;
use crate::models::SummaryReport;
use anyhow::Result;
use csv::Writer;
use std::fs::File;
use std::path::Path;

pub fn export_emotions_to_csv(report: &SummaryReport, path: &Path) -> Result<()> {
    let mut wtr = Writer::from_writer(File::create(path)?);

    wtr.write_record(["Emotion", "Total", "Share Percent"])?;

    for row in &report.emotions {
        wtr.write_record(&[
            row.emotion.to_string(),
            row.total.to_string(),
            format!("{:.2}", row.share_percent),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_weekdays_to_csv(report: &SummaryReport, path: &Path) -> Result<()> {
    let mut wtr = Writer::from_writer(File::create(path)?);

    wtr.write_record(["Weekday", "Total"])?;

    for row in &report.weekdays {
        wtr.write_record(&[row.weekday.clone(), row.total.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_alerts_to_csv(alerts: &[Alert], path: &Path) -> Result<()> {
    let mut wtr = Writer::from_writer(File::create(path)?);

    wtr.write_record([
        "Id",
        "Priority",
        "Title",
        "Description",
        "Suggestion",
        "Action",
        "Dismissed",
    ])?;

    for alert in alerts {
        wtr.write_record(&[
            alert.id.clone(),
            alert.priority.to_string(),
            alert.title.clone(),
            alert.description.clone(),
            alert.suggestion.clone(),
            alert.action.to_string(),
            alert.dismissed.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::models::{Category, Emotion, ExpenseRecord};
    use crate::reports::generate_summary_report;
    use crate::window::TimeWindow;
    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    fn fixed_now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_export_emotions_shape() {
        let records = vec![
            ExpenseRecord::new(100, Category::Food, Emotion::Happy, fixed_now()),
            ExpenseRecord::new(900, Category::Shopping, Emotion::Stressed, fixed_now()),
        ];
        let report = generate_summary_report(&aggregate(&records), TimeWindow::All);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emotions.csv");
        export_emotions_to_csv(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Emotion"));
        assert!(lines[1].starts_with("stressed,900"));
    }

    #[test]
    fn test_export_alerts_includes_action_token() {
        use crate::alerts::evaluate_alerts;
        use crate::calendar::StaticCalendar;
        use chrono::Duration;

        let now = fixed_now();
        let records = vec![
            ExpenseRecord::new(1, Category::Food, Emotion::Sad, now - Duration::days(1)),
            ExpenseRecord::new(1, Category::Food, Emotion::Angry, now - Duration::days(1)),
            ExpenseRecord::new(1, Category::Food, Emotion::Anxious, now - Duration::days(1)),
        ];
        let alerts = evaluate_alerts(&records, &StaticCalendar::default(), now);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts.csv");
        export_alerts_to_csv(&alerts, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("emotional_pattern"));
        assert!(content.contains("breathing"));
    }
}
