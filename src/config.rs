use crate::calendar::{CalendarEvent, StaticCalendar};
use crate::error::Result;
use crate::insights::InsightThresholds;
use crate::window::TimeWindow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration settings for emolytics
///
/// Stores user preferences that persist between runs, including:
/// - Expense data directory location
/// - Default analysis window
/// - Insight thresholds
/// - Calendar tables (festivals, stressful events) for the predictive rules
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Custom path to the expense data directory (default: ~/.emolytics/expenses)
    pub data_path: Option<PathBuf>,
    /// Default analysis window when --window is not given
    pub default_window: TimeWindow,
    /// Emotional share of spending above which the warning insight fires
    pub emotional_spend_warning_ratio: f64,
    /// Calendar tables consumed by the predictive alert rules
    pub calendar: CalendarConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CalendarConfig {
    #[serde(default)]
    pub festivals: Vec<CalendarEvent>,
    #[serde(default)]
    pub stressful_events: Vec<CalendarEvent>,
    /// How many days ahead stressful events are considered
    #[serde(default = "CalendarConfig::default_lookahead_days")]
    pub lookahead_days: i64,
}

impl CalendarConfig {
    fn default_lookahead_days() -> i64 {
        StaticCalendar::DEFAULT_LOOKAHEAD_DAYS
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            default_window: TimeWindow::ThisMonth,
            emotional_spend_warning_ratio: 0.40,
            calendar: CalendarConfig {
                festivals: Vec::new(),
                stressful_events: Vec::new(),
                lookahead_days: StaticCalendar::DEFAULT_LOOKAHEAD_DAYS,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn show(&self) -> Result<()> {
        let config_path = Self::config_path();
        println!("Configuration file: {}", config_path.display());
        println!("{}", serde_yaml::to_string(self)?);
        Ok(())
    }

    /// The directory scanned for expense record files.
    pub fn effective_data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| Self::home_dir().join(".emolytics").join("expenses"))
    }

    /// Calendar provider built from the configured tables.
    pub fn build_calendar(&self) -> StaticCalendar {
        StaticCalendar::new(
            self.calendar.festivals.clone(),
            self.calendar.stressful_events.clone(),
        )
        .with_lookahead_days(self.calendar.lookahead_days)
    }

    pub fn insight_thresholds(&self) -> InsightThresholds {
        InsightThresholds {
            emotional_spend_warning_ratio: self.emotional_spend_warning_ratio,
        }
    }

    fn config_path() -> PathBuf {
        Self::home_dir().join(".emolytics").join("config.yaml")
    }

    fn home_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}
