//! JSONL event log
//!
//! Writes each [`RunEvent`] as one JSON line with an `event` kind and a
//! UTC timestamp merged into the payload. Append-only by construction;
//! every line is flushed so an interrupted run still leaves a readable
//! record.

use plenum_application::{EventLog, RunEvent};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Event sink writing one JSON object per line.
pub struct JsonlEventLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLog {
    /// Create a log writing to the given path, creating parent
    /// directories as needed. Returns `None` (with a warning) when the
    /// file cannot be created; a run without an event log is better
    /// than no run.
    pub fn create(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("could not create event log directory {}: {e}", parent.display());
            return None;
        }

        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("could not create event log {}: {e}", path.display());
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for JsonlEventLog {
    fn record(&self, event: RunEvent) {
        let at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

        let record = match event.payload {
            serde_json::Value::Object(mut map) => {
                map.insert("event".to_string(), event.kind.into());
                map.insert("at".to_string(), at.into());
                serde_json::Value::Object(map)
            }
            other => serde_json::json!({
                "event": event.kind,
                "at": at,
                "data": other,
            }),
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlEventLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.events.jsonl");
        let log = JsonlEventLog::create(&path).unwrap();

        log.record(RunEvent::new(
            "turn",
            serde_json::json!({ "round": 2, "speaker": "Aland" }),
        ));
        log.record(RunEvent::new(
            "tally",
            serde_json::json!({ "yes": 2, "no": 1 }),
        ));
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "turn");
        assert_eq!(first["round"], 2);
        assert_eq!(first["speaker"], "Aland");
        assert!(first.get("at").is_some());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["event"], "tally");
        assert_eq!(second["yes"], 2);
    }

    #[test]
    fn test_non_object_payload_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.jsonl");
        let log = JsonlEventLog::create(&path).unwrap();

        log.record(RunEvent::new("note", serde_json::json!("plain text")));
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(value["event"], "note");
        assert_eq!(value["data"], "plain text");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("run.jsonl");
        let log = JsonlEventLog::create(&path).unwrap();
        assert_eq!(log.path(), path.as_path());
    }
}
