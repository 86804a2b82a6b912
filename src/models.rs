use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Self-reported emotion attached to an expense at entry time.
///
/// The set is closed: unknown values fail deserialization and the ingestion
/// layer drops that record instead of polluting the aggregation maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Stressed,
    Excited,
    Sad,
    Angry,
    Calm,
    Anxious,
    Guilty,
}

impl Emotion {
    /// Emotions counted toward "emotionally-driven" spending.
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Emotion::Stressed | Emotion::Anxious | Emotion::Sad | Emotion::Angry
        )
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Emotion::Happy => "happy",
            Emotion::Stressed => "stressed",
            Emotion::Excited => "excited",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Calm => "calm",
            Emotion::Anxious => "anxious",
            Emotion::Guilty => "guilty",
        };
        f.write_str(label)
    }
}

/// Spending category, mirroring the categories offered at expense entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transport,
    Festival,
    Family,
    Healthcare,
    Education,
    Traditional,
    Entertainment,
    Shopping,
    Utilities,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Festival => "festival",
            Category::Family => "family",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Traditional => "traditional",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Utilities => "utilities",
        };
        f.write_str(label)
    }
}

/// One atomic spending event as recorded by the expense-entry layer.
///
/// Records are append-only and immutable once created; the analytics engine
/// only ever reads them. Amounts are whole currency units, so negative or
/// fractional values cannot be represented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub amount: u64,
    pub category: Category,
    pub emotion: Emotion,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "voiceNote", default, skip_serializing_if = "Option::is_none")]
    pub voice_note: Option<String>,
}

impl ExpenseRecord {
    pub fn new(amount: u64, category: Category, emotion: Emotion, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            emotion,
            timestamp,
            description: None,
            voice_note: None,
        }
    }
}

/// One row of the per-emotion spending breakdown.
#[derive(Debug, Serialize, Clone)]
pub struct EmotionBreakdownRow {
    pub emotion: Emotion,
    pub total: u64,
    #[serde(rename = "sharePercent")]
    pub share_percent: f64,
}

/// One row of the day-of-week spending breakdown.
#[derive(Debug, Serialize, Clone)]
pub struct WeekdayBreakdownRow {
    pub weekday: String,
    pub total: u64,
}

/// One row of the per-calendar-day spending breakdown.
#[derive(Debug, Serialize, Clone)]
pub struct DailyBreakdownRow {
    pub date: String,
    pub total: u64,
}

/// One row of the category-by-emotion spending breakdown.
#[derive(Debug, Serialize, Clone)]
pub struct CategoryEmotionRow {
    pub category: Category,
    pub emotion: Emotion,
    pub total: u64,
}

/// Summary scalars derived from one aggregation pass.
#[derive(Debug, Serialize, Clone)]
pub struct SummaryTotals {
    #[serde(rename = "totalSpend")]
    pub total_spend: u64,
    #[serde(rename = "emotionalSpend")]
    pub emotional_spend: u64,
    #[serde(rename = "emotionalSpendRatio")]
    pub emotional_spend_ratio: f64,
    #[serde(rename = "dominantEmotion")]
    pub dominant_emotion: Option<Emotion>,
    #[serde(rename = "recordCount")]
    pub record_count: usize,
}

/// Presentation-ready spending summary for one time window.
#[derive(Debug, Serialize, Clone)]
pub struct SummaryReport {
    pub window: String,
    pub emotions: Vec<EmotionBreakdownRow>,
    pub weekdays: Vec<WeekdayBreakdownRow>,
    pub days: Vec<DailyBreakdownRow>,
    pub categories: Vec<CategoryEmotionRow>,
    pub totals: SummaryTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_emotions() {
        assert!(Emotion::Stressed.is_negative());
        assert!(Emotion::Anxious.is_negative());
        assert!(Emotion::Sad.is_negative());
        assert!(Emotion::Angry.is_negative());
        assert!(!Emotion::Happy.is_negative());
        assert!(!Emotion::Calm.is_negative());
        assert!(!Emotion::Excited.is_negative());
        assert!(!Emotion::Guilty.is_negative());
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "id": "7f2c3a9e-9c6e-4f4b-8d1a-2f9d1f6b8e21",
            "amount": 2500,
            "category": "food",
            "emotion": "happy",
            "timestamp": "2026-08-01T12:30:00Z",
            "description": "lunch",
            "voiceNote": "quick bite after the meeting"
        }"#;

        let record: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, 2500);
        assert_eq!(record.category, Category::Food);
        assert_eq!(record.emotion, Emotion::Happy);
        assert_eq!(record.description.as_deref(), Some("lunch"));
        assert!(record.voice_note.is_some());
    }

    #[test]
    fn test_record_rejects_unknown_emotion() {
        let json = r#"{
            "id": "7f2c3a9e-9c6e-4f4b-8d1a-2f9d1f6b8e21",
            "amount": 100,
            "category": "food",
            "emotion": "euphoric",
            "timestamp": "2026-08-01T12:30:00Z"
        }"#;

        assert!(serde_json::from_str::<ExpenseRecord>(json).is_err());
    }

    #[test]
    fn test_record_rejects_negative_amount() {
        let json = r#"{
            "id": "7f2c3a9e-9c6e-4f4b-8d1a-2f9d1f6b8e21",
            "amount": -50,
            "category": "food",
            "emotion": "happy",
            "timestamp": "2026-08-01T12:30:00Z"
        }"#;

        assert!(serde_json::from_str::<ExpenseRecord>(json).is_err());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "id": "7f2c3a9e-9c6e-4f4b-8d1a-2f9d1f6b8e21",
            "amount": 900,
            "category": "transport",
            "emotion": "calm",
            "timestamp": "2026-08-01T08:00:00Z"
        }"#;

        let record: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert!(record.description.is_none());
        assert!(record.voice_note.is_none());
    }
}
