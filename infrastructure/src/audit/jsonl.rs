//! JSONL file writer for evaluation results.
//!
//! Each [`QuestionnaireResult`] is serialized as a single JSON line with a
//! `recorded_at` timestamp, appended to the file via a buffered writer.
//! The per-question detail shape inside each line is the contract the admin
//! UI and reviewer summaries read.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use warden_domain::QuestionnaireResult;

/// JSONL audit log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Each record is flushed as it
/// is written.
pub struct JsonlAuditLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditLog {
    /// Open the log for appending, creating the file (and parent
    /// directories) if they don't exist. Returns `None` if the file cannot
    /// be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create audit log directory {}: {}", parent.display(), e);
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one evaluation result as a JSON line.
    pub fn record(&self, result: &QuestionnaireResult) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let Ok(mut record) = serde_json::to_value(result) else {
            return;
        };
        if let serde_json::Value::Object(map) = &mut record {
            map.insert(
                "recorded_at".to_string(),
                serde_json::Value::String(timestamp),
            );
        }

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
            warn!("Could not write audit record to {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlAuditLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_domain::{QuestionScoreDetail, QuestionType};

    fn sample_result() -> QuestionnaireResult {
        QuestionnaireResult::new(
            60,
            vec![QuestionScoreDetail::local(
                1,
                QuestionType::SingleChoice,
                10,
                18,
                "summed",
            )],
        )
    }

    #[test]
    fn test_records_one_line_per_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = JsonlAuditLog::open(&path).unwrap();

        log.record(&sample_result());
        log.record(&sample_result());

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["score"], 10);
        assert!(parsed["recorded_at"].is_string());
        assert_eq!(parsed["details"][0]["question_id"], 1);
        assert_eq!(parsed["details"][0]["type"], "single_choice");
    }

    #[test]
    fn test_open_appends_to_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        JsonlAuditLog::open(&path).unwrap().record(&sample_result());
        JsonlAuditLog::open(&path).unwrap().record(&sample_result());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("audit.jsonl");
        assert!(JsonlAuditLog::open(&path).is_some());
        assert!(path.parent().unwrap().exists());
    }
}
