use std::fmt;
use std::io;

/// Error type shared across the crate
#[derive(Debug)]
pub enum EmolyticsError {
    /// File I/O error
    Io(io::Error),
    /// JSON parse error for a record line
    JsonParse {
        file_path: String,
        line_number: usize,
        source: serde_json::Error,
    },
    /// Configuration error
    Config { message: String },
    /// Expense data directory is missing
    DataDirNotFound { path: String },
    /// Calendar provider failure
    Calendar { message: String },
}

impl fmt::Display for EmolyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmolyticsError::Io(err) => write!(f, "I/O error: {}", err),
            EmolyticsError::JsonParse {
                file_path,
                line_number,
                source,
            } => write!(
                f,
                "JSON parse error in {} at line {}: {}",
                file_path, line_number, source
            ),
            EmolyticsError::Config { message } => write!(f, "Configuration error: {}", message),
            EmolyticsError::DataDirNotFound { path } => {
                write!(f, "Expense data directory not found: {}", path)
            }
            EmolyticsError::Calendar { message } => write!(f, "Calendar error: {}", message),
        }
    }
}

impl std::error::Error for EmolyticsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmolyticsError::Io(err) => Some(err),
            EmolyticsError::JsonParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for EmolyticsError {
    fn from(err: io::Error) -> Self {
        EmolyticsError::Io(err)
    }
}

impl From<serde_yaml::Error> for EmolyticsError {
    fn from(err: serde_yaml::Error) -> Self {
        EmolyticsError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type shared across the crate
pub type Result<T> = std::result::Result<T, EmolyticsError>;

/// Helper constructors
impl EmolyticsError {
    pub fn json_parse_error(
        file_path: &str,
        line_number: usize,
        source: serde_json::Error,
    ) -> Self {
        Self::JsonParse {
            file_path: file_path.to_string(),
            line_number,
            source,
        }
    }

    pub fn data_dir_not_found(path: &str) -> Self {
        Self::DataDirNotFound {
            path: path.to_string(),
        }
    }

    pub fn calendar_error(message: &str) -> Self {
        Self::Calendar {
            message: message.to_string(),
        }
    }
}

/// Longer-form error reports for the CLI
impl EmolyticsError {
    pub fn detailed_message(&self) -> String {
        match self {
            EmolyticsError::JsonParse {
                file_path,
                line_number,
                source,
            } => format!(
                "Failed to parse JSON in file '{}' at line {}\nError: {}\nThis usually indicates a corrupted or hand-edited record file.",
                file_path, line_number, source
            ),
            EmolyticsError::DataDirNotFound { path } => format!(
                "Expense data directory not found at '{}'\nRecord at least one expense, or point --data at the directory holding your .jsonl record files.",
                path
            ),
            _ => self.to_string(),
        }
    }
}
