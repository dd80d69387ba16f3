//! JSONL file export for audit records.
//!
//! Each logged decision is serialized as a single JSON line and appended
//! via a buffered writer, giving a durable, grep-able trail alongside
//! the in-memory one.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use consilium_application::ports::audit_trail::AuditObserver;
use consilium_domain::DecisionRecord;
use tracing::warn;

/// Audit observer that appends one JSON object per record.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line so
/// a crash loses at most the record being written.
pub struct JsonlAuditExport {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditExport {
    /// Create an export appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit export directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit export file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Path of the export file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditObserver for JsonlAuditExport {
    fn on_record(&self, record: &DecisionRecord) {
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(e) => {
                warn!(record = %record.id, "Could not serialize audit record: {e}");
                return;
            }
        };

        let mut writer = self.writer.lock().expect("export lock poisoned");
        if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
            warn!(record = %record.id, "Could not write audit record: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use consilium_domain::{DecisionDraft, DecisionKind, DirectiveId, RecordId};

    #[test]
    fn test_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let export = JsonlAuditExport::new(&path).unwrap();

        for i in 1..=2 {
            let record = DecisionRecord::from_draft(
                RecordId(i),
                Utc::now(),
                DecisionDraft::new(
                    "finance",
                    DecisionKind::Recommendation,
                    DirectiveId::from_sequence(1),
                    "decision",
                    "rationale",
                    0.8,
                ),
            );
            export.on_record(&record);
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["worker"], "finance");
        assert!(parsed["hash"].is_string());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/audit.jsonl");
        assert!(JsonlAuditExport::new(&path).is_some());
        assert!(path.exists());
    }
}
