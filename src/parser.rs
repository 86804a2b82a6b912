use crate::error::{EmolyticsError, Result};
use crate::models::ExpenseRecord;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads the append-only expense store: a directory tree of JSONL files,
/// one expense record per line.
///
/// The parser is the enforcement point for the malformed-record policy: a
/// line that fails to parse (bad JSON, unknown category or emotion, negative
/// amount) is reported as a warning and skipped, so one bad line never
/// blanks an analysis pass.
pub struct ExpenseParser {
    data_dir: PathBuf,
}

impl ExpenseParser {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Parse every record file and return the records sorted by timestamp,
    /// then id, so downstream first-encounter tie-breaks are stable across
    /// runs.
    pub fn parse_all(&self) -> Result<Vec<ExpenseRecord>> {
        let files = self.find_record_files()?;

        if files.is_empty() {
            eprintln!(
                "Warning: no expense record files found in {}",
                self.data_dir.display()
            );
            return Ok(Vec::new());
        }

        let mut records: Vec<ExpenseRecord> = files
            .par_iter()
            .filter_map(|file_path| match parse_file(file_path) {
                Ok(records) => Some(records),
                Err(e) => {
                    eprintln!("Warning: failed to read {}: {}", file_path.display(), e);
                    None
                }
            })
            .flatten()
            .collect();

        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    fn find_record_files(&self) -> Result<Vec<PathBuf>> {
        if !self.data_dir.exists() {
            return Err(EmolyticsError::data_dir_not_found(
                &self.data_dir.display().to_string(),
            ));
        }

        let files: Vec<PathBuf> = WalkDir::new(&self.data_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext == "jsonl")
                    .unwrap_or(false)
            })
            .map(|entry| entry.path().to_path_buf())
            .collect();

        Ok(files)
    }
}

fn parse_file(file_path: &Path) -> Result<Vec<ExpenseRecord>> {
    let file = File::open(file_path).map_err(EmolyticsError::Io)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ExpenseRecord>(&line) {
            Ok(record) => records.push(record),
            Err(err) => {
                // One bad line must never blank the whole analysis.
                let err = EmolyticsError::json_parse_error(
                    &file_path.display().to_string(),
                    line_number + 1,
                    err,
                );
                eprintln!("Warning: skipping record: {}", err);
            }
        }
    }

    Ok(records)
}
