//! Emolytics - Emotional Expense Analytics
//!
//! Analyzes expense records tagged with self-reported emotions and produces
//! spending breakdowns, ranked insights, and predictive alerts. Reads JSONL
//! record files from the expense data directory and renders reports in the
//! terminal.

// Module declarations
mod aggregation;
mod alert_center;
mod alerts;
mod calendar;
mod config;
mod display;
mod engine;
mod error;
mod export;
mod insights;
mod models;
mod parser;
mod reports;
mod window;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use display::{
    display_alerts, display_insights, display_summary_enhanced, display_summary_table,
    print_error, print_info, print_warning,
};
use engine::AnalyticsEngine;
use export::{export_alerts_to_csv, export_emotions_to_csv, export_weekdays_to_csv};
use models::ExpenseRecord;
use parser::ExpenseParser;
use reports::generate_summary_report;
use std::path::PathBuf;
use window::TimeWindow;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum WindowArg {
    /// Every record ever stored
    All,
    /// Records from today's calendar date
    Today,
    /// Records from the last 7 days
    Week,
    /// Records from the last 30 days
    Month,
    /// Records from the last 90 days
    Quarter,
}

impl From<WindowArg> for TimeWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::All => TimeWindow::All,
            WindowArg::Today => TimeWindow::Today,
            WindowArg::Week => TimeWindow::ThisWeek,
            WindowArg::Month => TimeWindow::ThisMonth,
            WindowArg::Quarter => TimeWindow::ThisQuarter,
        }
    }
}

#[derive(Parser)]
#[command(name = "emolytics")]
#[command(about = "Emotional expense analytics - spending breakdowns, insights, and predictive alerts")]
#[command(version)]
#[command(
    long_about = "Emolytics analyzes expense records tagged with self-reported emotions.

EXAMPLES:
  emolytics                          # Spending summary for the default window
  emolytics --window week summary    # This week's summary
  emolytics --json insights          # Insights as JSON
  emolytics alerts                   # Evaluate the predictive alert rules
  emolytics export -o report         # Export breakdowns to CSV
  emolytics config --show            # View current configuration

GLOBAL FLAGS:
  Global flags like --json, --window, --data work with any command:
  emolytics --json summary           # Summary as JSON
  emolytics --window today insights  # Insights over today's records"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Path to the expense data directory",
        long_help = "Custom path to the directory holding .jsonl expense record files\n(default: ~/.emolytics/expenses, or data_path from the config file)"
    )]
    data: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "WINDOW",
        help = "Analysis time window",
        long_help = "Recency window for the summary and insight reports\n(default: the config file's default_window)\nPredictive alerts always use their own 7-day recency rules."
    )]
    window: Option<WindowArg>,

    #[arg(
        short,
        long,
        help = "Output in JSON format",
        long_help = "Output data in JSON format instead of formatted tables\nUseful for scripting or piping to other tools\nExample: emolytics --json summary | jq '.totals.totalSpend'"
    )]
    json: bool,

    #[arg(
        long,
        value_name = "TIMESTAMP",
        help = "Override 'now' (RFC 3339) for reproducible reports",
        long_help = "Evaluate every window and alert rule against this instant instead of\nthe system clock. Format: RFC 3339, e.g. 2026-08-05T12:00:00Z"
    )]
    now: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show the spending summary (default)")]
    #[command(
        long_about = "Spending breakdowns by emotion, category, and day of week\nplus the summary totals for the selected window.\n\nEXAMPLES:\n  emolytics summary                 # Enhanced card format\n  emolytics summary --classic       # Plain tables\n  emolytics --json summary          # JSON output"
    )]
    Summary {
        #[arg(long, help = "Use classic table format")]
        classic: bool,
    },
    #[command(about = "Show ranked insights for the selected window")]
    Insights,
    #[command(about = "Evaluate the predictive alert rules")]
    #[command(
        long_about = "Runs the five predictive rules (emotional pattern, festival preparation,\nstress prediction, weekend spending, family pressure) over recent records\nand the configured calendar tables.\n\nEXAMPLES:\n  emolytics alerts                  # Active alerts\n  emolytics alerts --review         # Interactively dismiss alerts\n  emolytics --json alerts           # Alerts as JSON"
    )]
    Alerts {
        #[arg(
            long,
            help = "Interactively review and dismiss alerts",
            long_help = "Opens a small review session: dismiss alerts one by one, dismiss all,\nor clear earlier dismissals. Dismissals last for this session only."
        )]
        review: bool,
    },
    #[command(about = "Export breakdowns and alerts to CSV")]
    Export {
        #[arg(long, help = "Export the per-emotion breakdown")]
        emotions: bool,
        #[arg(long, help = "Export the day-of-week breakdown")]
        weekdays: bool,
        #[arg(long, help = "Export the current alerts")]
        alerts: bool,
        #[arg(
            short,
            long,
            help = "Output file base path",
            long_help = "Base path for output files (without extension)\nDefault: ./emolytics_export (creates .emotions.csv, .weekdays.csv, .alerts.csv)"
        )]
        output: Option<PathBuf>,
    },
    #[command(about = "Show or initialize the configuration")]
    Config {
        #[arg(long, help = "Show current configuration")]
        show: bool,
        #[arg(long, help = "Write the default configuration file")]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|e| {
        print_error(&format!("Failed to load config: {}", e));
        Config::default()
    });

    let now = resolve_now(cli.now.as_deref())?;
    let window: TimeWindow = cli
        .window
        .map(TimeWindow::from)
        .unwrap_or(config.default_window);

    match cli.command {
        Some(Commands::Config { show, init }) => run_config(&config, show, init),
        Some(Commands::Summary { classic }) => {
            let records = load_records(&cli, &config)?;
            run_summary(&records, &config, window, now, cli.json, classic)
        }
        Some(Commands::Insights) => {
            let records = load_records(&cli, &config)?;
            run_insights(&records, &config, window, now, cli.json)
        }
        Some(Commands::Alerts { review }) => {
            let records = load_records(&cli, &config)?;
            if review {
                run_alert_review(&records, &config, now)
            } else {
                run_alerts(&records, &config, now, cli.json)
            }
        }
        Some(Commands::Export {
            emotions,
            weekdays,
            alerts,
            ref output,
        }) => {
            let records = load_records(&cli, &config)?;
            run_export(
                &records, &config, window, now, emotions, weekdays, alerts, output.clone(),
            )
        }
        None => {
            let records = load_records(&cli, &config)?;
            run_summary(&records, &config, window, now, cli.json, false)
        }
    }
}

fn resolve_now(now_arg: Option<&str>) -> Result<DateTime<Utc>> {
    match now_arg {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid --now timestamp: {}", raw))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}

fn load_records(cli: &Cli, config: &Config) -> Result<Vec<ExpenseRecord>> {
    let data_dir = cli
        .data
        .clone()
        .unwrap_or_else(|| config.effective_data_path());
    let records = ExpenseParser::new(data_dir)
        .parse_all()
        .map_err(|e| anyhow::anyhow!(e.detailed_message()))?;
    Ok(records)
}

fn run_summary(
    records: &[ExpenseRecord],
    config: &Config,
    window: TimeWindow,
    now: DateTime<Utc>,
    json: bool,
    classic: bool,
) -> Result<()> {
    let engine =
        AnalyticsEngine::new(config.build_calendar()).with_thresholds(config.insight_thresholds());
    let analysis = engine.analyze(records, window, now);
    let report = generate_summary_report(&analysis.aggregation, analysis.window);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if classic {
        display_summary_table(&report);
    } else {
        display_summary_enhanced(&report);
        display_insights(&analysis.insights);
        println!();
        display_alerts(&analysis.visible_alerts());
    }

    Ok(())
}

fn run_insights(
    records: &[ExpenseRecord],
    config: &Config,
    window: TimeWindow,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let engine =
        AnalyticsEngine::new(config.build_calendar()).with_thresholds(config.insight_thresholds());
    let analysis = engine.analyze(records, window, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.insights)?);
    } else {
        display_insights(&analysis.insights);
    }

    Ok(())
}

fn run_alerts(
    records: &[ExpenseRecord],
    config: &Config,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let engine = AnalyticsEngine::new(config.build_calendar());
    let alerts = engine.regenerate(records, now);
    let visible = engine.alert_center().visible(&alerts);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        display_alerts(&visible.iter().collect::<Vec<_>>());
    }

    Ok(())
}

/// Small session loop over the alert lifecycle: dismissals apply for the
/// lifetime of this process only.
fn run_alert_review(
    records: &[ExpenseRecord],
    config: &Config,
    now: DateTime<Utc>,
) -> Result<()> {
    use std::io::{BufRead, Write};

    let mut engine = AnalyticsEngine::new(config.build_calendar());
    let stdin = std::io::stdin();
    let mut input = String::new();

    loop {
        let alerts = engine.regenerate(records, now);
        let visible = engine.alert_center().visible(&alerts);
        println!();
        display_alerts(&visible.iter().collect::<Vec<_>>());
        println!(
            "({} dismissed this session)",
            engine.alert_center().dismissed_count()
        );
        println!("Commands: <alert id> to dismiss, 'all', 'clear', 'quit'");
        print!("> ");
        std::io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let command = input.trim();

        match command {
            "" | "q" | "quit" => break,
            "all" => engine.dismiss_all(&alerts),
            "clear" => engine.clear_dismissed(),
            id => {
                if engine.alert_center().is_dismissed(id) {
                    print_info("Alert already dismissed");
                } else if alerts.iter().any(|alert| alert.id == id) {
                    engine.dismiss(id);
                } else {
                    print_warning(&format!("Unknown alert id: {}", id));
                }
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_export(
    records: &[ExpenseRecord],
    config: &Config,
    window: TimeWindow,
    now: DateTime<Utc>,
    emotions: bool,
    weekdays: bool,
    alerts: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let engine =
        AnalyticsEngine::new(config.build_calendar()).with_thresholds(config.insight_thresholds());
    let analysis = engine.analyze(records, window, now);
    let report = generate_summary_report(&analysis.aggregation, analysis.window);

    let base = output.unwrap_or_else(|| PathBuf::from("./emolytics_export"));
    // No specific flag selects everything.
    let export_all = !emotions && !weekdays && !alerts;

    if emotions || export_all {
        let path = base.with_extension("emotions.csv");
        export_emotions_to_csv(&report, &path)?;
        print_info(&format!("Exported emotion breakdown to {}", path.display()));
    }
    if weekdays || export_all {
        let path = base.with_extension("weekdays.csv");
        export_weekdays_to_csv(&report, &path)?;
        print_info(&format!("Exported weekday breakdown to {}", path.display()));
    }
    if alerts || export_all {
        let path = base.with_extension("alerts.csv");
        export_alerts_to_csv(&analysis.alerts, &path)?;
        print_info(&format!("Exported alerts to {}", path.display()));
    }

    Ok(())
}

fn run_config(config: &Config, show: bool, init: bool) -> Result<()> {
    if init {
        config.save()?;
        print_info("Configuration file written");
    }
    if show || !init {
        config.show()?;
    }
    Ok(())
}
