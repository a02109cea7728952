//! Key-log CSV loading.
//!
//! A key log has a `timestamp,key` header followed by one row per event.
//! `timestamp` is in seconds; `key` is a lane key (`d`, `f`, `j`, `k`) or a
//! quoted comma-separated list of keys for chords.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use gravbeat_types::{Lane, LaneSet};
use log::{error, info, warn};
use serde::Deserialize;

use crate::event::{Timeline, TimelineEvent};

#[derive(Debug, Deserialize)]
struct KeyLogRow {
    timestamp: f64,
    key: String,
}

/// Load a key log from disk.
pub fn load_csv(path: &Path) -> Result<Timeline> {
    let file =
        File::open(path).with_context(|| format!("key log not found: {}", path.display()))?;
    let timeline = load_csv_from_reader(file)
        .with_context(|| format!("failed to parse key log: {}", path.display()))?;
    info!(
        "Loaded {} events ({} notes) from {}",
        timeline.len(),
        timeline.note_count(),
        path.display()
    );
    Ok(timeline)
}

/// Load a key log, logging the failure and falling back to an empty
/// timeline. A session built on an empty timeline spawns nothing.
pub fn load_csv_or_empty(path: &Path) -> Timeline {
    match load_csv(path) {
        Ok(timeline) => timeline,
        Err(e) => {
            error!("{e:#}");
            Timeline::new()
        }
    }
}

/// Parse key-log rows from any reader.
///
/// Rows that fail to deserialize or carry an invalid timestamp are skipped
/// with a warning. Unknown keys are dropped individually; a row is skipped
/// only when none of its keys are valid.
pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<Timeline> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("missing key log header")?.clone();
    for required in ["timestamp", "key"] {
        if !headers.iter().any(|h| h == required) {
            bail!("key log header lacks `{required}` column");
        }
    }

    let mut events = Vec::new();
    for (i, result) in rdr.deserialize::<KeyLogRow>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping malformed key log row {line}: {e}");
                continue;
            }
        };

        if !row.timestamp.is_finite() || row.timestamp < 0.0 {
            warn!("Skipping key log row {line}: invalid timestamp {}", row.timestamp);
            continue;
        }

        let lanes = parse_key_list(&row.key);
        if lanes.is_empty() {
            warn!("Skipping key log row {line}: no valid keys in '{}'", row.key);
            continue;
        }

        let Some(time_us) = round_to_millis_us(row.timestamp) else {
            warn!("Skipping key log row {line}: timestamp {} out of range", row.timestamp);
            continue;
        };
        events.push(TimelineEvent::new(time_us, lanes));
    }

    Ok(Timeline::from_events(events))
}

/// Parse a comma-separated key list, dropping unknown identifiers.
pub fn parse_key_list(keys: &str) -> LaneSet {
    let mut lanes = LaneSet::empty();
    for key in keys.split(',') {
        match Lane::from_key(key) {
            Some(lane) => lanes.insert(lane),
            None => warn!("Invalid key '{}' in key log, skipping", key.trim()),
        }
    }
    lanes
}

/// Seconds to microseconds, rounded to whole milliseconds. `None` when the
/// result does not fit in `i64`.
fn round_to_millis_us(secs: f64) -> Option<i64> {
    let millis = (secs * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= (i64::MAX / 1000) as f64 {
        return None;
    }
    (millis as i64).checked_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_millis_rejects_out_of_range() {
        assert_eq!(round_to_millis_us(1.2344), Some(1_234_000));
        assert_eq!(round_to_millis_us(1e20), None);
        assert_eq!(round_to_millis_us(f64::MAX), None);
    }

    #[test]
    fn parse_key_list_drops_unknown_keys() {
        assert_eq!(parse_key_list("d, x ,k"), LaneSet::from_keys("dk"));
        assert_eq!(parse_key_list("q"), LaneSet::empty());
        assert_eq!(parse_key_list(""), LaneSet::empty());
    }

    #[test]
    fn rounds_to_milliseconds() {
        assert_eq!(round_to_millis_us(1.23456), 1_235_000);
        assert_eq!(round_to_millis_us(0.0), 0);
    }

    #[test]
    fn reads_rows_in_time_order() {
        let data = "timestamp,key\n2.5,f\n1.0,\"d,k\"\n";
        let timeline = load_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.events()[0].time_us, 1_000_000);
        assert_eq!(timeline.events()[0].lanes, LaneSet::from_keys("dk"));
        assert_eq!(timeline.events()[1].lanes, LaneSet::from_keys("f"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = "time,lane\n1.0,d\n";
        assert!(load_csv_from_reader(data.as_bytes()).is_err());
    }
}
