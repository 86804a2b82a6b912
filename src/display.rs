use crate::alerts::{Alert, AlertPriority};
use crate::insights::{Insight, Severity};
use crate::models::SummaryReport;
use colored::*;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

pub fn display_summary_enhanced(report: &SummaryReport) {
    println!("{}", "═".repeat(80).bright_black());
    println!(
        "{}  {}",
        "💸 Emotional Spending Summary".bright_blue().bold(),
        format!("Window: {}", report.window).dimmed()
    );
    println!("{}", "═".repeat(80).bright_black());
    println!();

    display_summary_card(report);
    println!();

    if !report.emotions.is_empty() {
        println!("{}", "─".repeat(80).bright_black());
        println!("{}", "🎭 Spending by Emotion".bright_green().bold());
        println!("{}", "─".repeat(80).bright_black());
        display_emotion_table(report);
        println!();
    }

    if report.totals.total_spend > 0 {
        println!("{}", "─".repeat(80).bright_black());
        println!("{}", "📅 Spending by Day of Week".bright_green().bold());
        println!("{}", "─".repeat(80).bright_black());
        display_weekday_table(report);
        println!();
    }

    if !report.days.is_empty() {
        println!("{}", "─".repeat(80).bright_black());
        println!("{}", "🗓️ Recent Daily Spend".bright_green().bold());
        println!("{}", "─".repeat(80).bright_black());
        display_daily_table(report);
        println!();
    }

    if !report.categories.is_empty() {
        println!("{}", "─".repeat(80).bright_black());
        println!("{}", "🧾 Top Category × Emotion Pairs".bright_green().bold());
        println!("{}", "─".repeat(80).bright_black());
        display_category_table(report);
    }

    println!();
    println!("{}", "═".repeat(80).bright_black());
}

pub fn display_summary_table(report: &SummaryReport) {
    display_emotion_table(report);
    display_weekday_table(report);
}

fn display_summary_card(report: &SummaryReport) {
    let totals = &report.totals;
    let emotional_pct = totals.emotional_spend_ratio * 100.0;
    let dominant = totals
        .dominant_emotion
        .map(|emotion| emotion.to_string())
        .unwrap_or_else(|| "-".to_string());

    println!("{}", "💰 SPENDING OVERVIEW".bright_yellow().bold());
    println!("┌─────────────────────────────────────────────────────────────────────────────┐");
    println!(
        "│ 💰 Total Spend: {}  │  🧾 Records: {}  │  🎭 Dominant Emotion: {} │",
        format_amount(totals.total_spend).bright_green().bold(),
        totals.record_count.to_string().bright_blue().bold(),
        dominant.bright_magenta().bold()
    );
    println!("├─────────────────────────────────────────────────────────────────────────────┤");
    let emotional_str = format!(
        "{} ({:.1}% of total)",
        format_amount(totals.emotional_spend),
        emotional_pct
    );
    let emotional_colored = if emotional_pct > 40.0 {
        emotional_str.bright_red().bold()
    } else {
        emotional_str.green()
    };
    println!("│ 😰 Emotional Spend: {} │", emotional_colored);
    println!("└─────────────────────────────────────────────────────────────────────────────┘");
}

fn display_emotion_table(report: &SummaryReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Emotion").fg(Color::Cyan),
            Cell::new("Total").fg(Color::Cyan),
            Cell::new("Share").fg(Color::Cyan),
        ]);

    for (i, row) in report.emotions.iter().enumerate() {
        let emotion_color = if i == 0 { Color::Green } else { Color::White };
        table.add_row(vec![
            Cell::new(row.emotion.to_string()).fg(emotion_color),
            Cell::new(format_amount(row.total)).fg(Color::Magenta),
            Cell::new(format!("{:.1}%", row.share_percent)).fg(Color::Blue),
        ]);
    }

    println!("{}", table);
}

fn display_weekday_table(report: &SummaryReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Day").fg(Color::Cyan),
            Cell::new("Total").fg(Color::Cyan),
        ]);

    let peak = report.weekdays.iter().map(|row| row.total).max().unwrap_or(0);
    for row in &report.weekdays {
        let color = if row.total == peak && peak > 0 {
            Color::Green
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(&row.weekday).fg(color),
            Cell::new(format_amount(row.total)).fg(Color::Magenta),
        ]);
    }

    println!("{}", table);
}

fn display_daily_table(report: &SummaryReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Date").fg(Color::Cyan),
            Cell::new("Total").fg(Color::Cyan),
        ]);

    for (i, row) in report.days.iter().take(14).enumerate() {
        let date_color = if i == 0 { Color::Green } else { Color::White };
        table.add_row(vec![
            Cell::new(&row.date).fg(date_color),
            Cell::new(format_amount(row.total)).fg(Color::Magenta),
        ]);
    }

    println!("{}", table);
}

fn display_category_table(report: &SummaryReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Category").fg(Color::Cyan),
            Cell::new("Emotion").fg(Color::Cyan),
            Cell::new("Total").fg(Color::Cyan),
        ]);

    for row in report.categories.iter().take(10) {
        table.add_row(vec![
            Cell::new(row.category.to_string()).fg(Color::White),
            Cell::new(row.emotion.to_string()).fg(Color::Yellow),
            Cell::new(format_amount(row.total)).fg(Color::Magenta),
        ]);
    }

    println!("{}", table);
}

pub fn display_insights(insights: &[Insight]) {
    println!("{}", "💡 Insights".bright_blue().bold());
    println!("{}", "─".repeat(80).bright_black());

    if insights.is_empty() {
        println!("{}", "No insights for this window.".dimmed());
        return;
    }

    for insight in insights {
        let badge = match insight.severity {
            Severity::Warning => "⚠️ ".yellow().bold(),
            Severity::Info => "ℹ️ ".blue().bold(),
            Severity::Tip => "💡".green().bold(),
        };
        println!("{} {}", badge, insight.title.bold());
        println!("   {}", insight.description);
    }
}

pub fn display_alerts(alerts: &[&Alert]) {
    println!("{}", "🔔 Predictive Alerts".bright_blue().bold());
    println!("{}", "─".repeat(80).bright_black());

    if alerts.is_empty() {
        println!("{}", "No active alerts.".dimmed());
        return;
    }

    for alert in alerts {
        let badge = match alert.priority {
            AlertPriority::High => "🚨 HIGH  ".red().bold(),
            AlertPriority::Medium => "⚠️ MEDIUM".yellow().bold(),
            AlertPriority::Low => "ℹ️ LOW   ".blue().bold(),
        };
        println!("{} {} {}", badge, alert.title.bold(), format!("[{}]", alert.id).dimmed());
        println!("   {}", alert.description);
        println!(
            "   {} {}",
            "→".bright_black(),
            format!("{} (action: {})", alert.suggestion, alert.action).dimmed()
        );
    }
}

/// Format whole currency units with thousands separators.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
        assert_eq!(format_amount(17500), "17,500");
        assert_eq!(format_amount(1234567), "1,234,567");
    }
}
