// Dated JSON files: raw snapshot and analyzer summary.
// File errors are logged and swallowed; this is a periodic batch job and the
// next run writes a fresh file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::models::FleetSnapshot;

/// Prefix for the raw collected snapshot.
pub const STATS_PREFIX: &str = "ec2stats";
/// Prefix for the analyzer's summary result.
pub const SUMMARY_PREFIX: &str = "ec2summary";

pub fn dated_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.json", date.format("%Y-%m-%d"))
}

/// Writes `value` to `<dir>/<prefix>-<UTC date>.json`. Empty payloads are
/// skipped entirely so a failed run cannot clobber the day's file with
/// nothing. Returns the written path, or `None` when skipped or failed.
pub fn save_dated_json<T: Serialize>(dir: &Path, prefix: &str, value: &T) -> Option<PathBuf> {
    let json = match serde_json::to_value(value) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, prefix, "failed to serialize result");
            return None;
        }
    };
    if is_empty_payload(&json) {
        return None;
    }

    let path = dir.join(dated_file_name(prefix, Utc::now().date_naive()));
    let body = match serde_json::to_string(&json) {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, prefix, "failed to serialize result");
            return None;
        }
    };
    match fs::write(&path, body) {
        Ok(()) => {
            info!(prefix, path = %path.display(), "result saved");
            Some(path)
        }
        Err(e) => {
            error!(error = %e, path = %path.display(), "failed to write result to file");
            None
        }
    }
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Loads a previously saved snapshot. A missing or malformed file is logged
/// and yields `None`; the analyze and print stages then no-op.
pub fn load_snapshot(path: &Path) -> Option<FleetSnapshot> {
    let body = match fs::read_to_string(path) {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, path = %path.display(), "failed to open stats file");
            return None;
        }
    };
    match serde_json::from_str(&body) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            error!(error = %e, path = %path.display(), "failed to parse stats file");
            None
        }
    }
}
