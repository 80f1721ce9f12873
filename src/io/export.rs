// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! JSON export of labels.
//!
//! Each label becomes an instantaneous event: `eventStart` and `eventEnd`
//! carry the same `mm:ss` time, and `area` the box in 1920x1080 space.

use crate::models::label::Label;
use anyhow::Result;
use serde::Serialize;

/// One exported event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub event_start: String,
    pub event_end: String,
    pub area: [i32; 4],
}

impl From<&Label> for ExportRecord {
    fn from(label: &Label) -> Self {
        let time = format_time(label.timestamp);
        Self {
            event_start: time.clone(),
            event_end: time,
            area: label.bbox.to_array(),
        }
    }
}

/// Format seconds as zero-padded `mm:ss`, truncating fractions.
///
/// Negative and non-finite inputs format as `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Convert labels to export records, preserving order.
pub fn records(labels: &[Label]) -> Vec<ExportRecord> {
    labels.iter().map(ExportRecord::from).collect()
}

/// Pretty-printed JSON array of export records.
pub fn to_json(labels: &[Label]) -> Result<String> {
    let json = serde_json::to_string_pretty(&records(labels))?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::label::{BoundingBox, LabelId};

    fn label(id: &str, timestamp: f64, area: [i32; 4]) -> Label {
        Label::new(
            LabelId::new(id),
            timestamp,
            BoundingBox {
                xmin: area[0],
                ymin: area[1],
                xmax: area[2],
                ymax: area[3],
            },
        )
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(65.999), "01:05");
        assert_eq!(format_time(599.0), "09:59");
        assert_eq!(format_time(6000.0), "100:00");
    }

    #[test]
    fn test_format_time_degenerate() {
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn test_record_repeats_time() {
        let record = ExportRecord::from(&label("a", 12.4, [200, 100, 600, 300]));
        assert_eq!(record.event_start, "00:12");
        assert_eq!(record.event_end, record.event_start);
        assert_eq!(record.area, [200, 100, 600, 300]);
    }

    #[test]
    fn test_to_json_shape() {
        let labels = vec![label("a", 65.0, [1, 2, 3, 4])];
        let json = to_json(&labels).unwrap();
        let expected = r#"[
  {
    "eventStart": "01:05",
    "eventEnd": "01:05",
    "area": [
      1,
      2,
      3,
      4
    ]
  }
]"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_keeps_store_order() {
        let labels = vec![label("a", 30.0, [0, 0, 10, 10]), label("b", 5.0, [5, 5, 20, 20])];
        let value: serde_json::Value = serde_json::from_str(&to_json(&labels).unwrap()).unwrap();
        assert_eq!(value[0]["eventStart"], "00:30");
        assert_eq!(value[1]["eventStart"], "00:05");
        assert_eq!(value[1]["area"], serde_json::json!([5, 5, 20, 20]));
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
