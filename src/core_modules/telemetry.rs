// THEORY:
// Telemetry is a flat list of labelled values produced once per frame and replaced
// wholesale by the next one. The classifier never formats or prints it; a consumer
// on another thread reads the latest list from the snapshot store and decides how
// to show it.

use crate::core_modules::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value half of a telemetry entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TelemetryValue {
    Score(f64),
    Count(u32),
    /// A region index, or `None` when no region qualifies.
    Region(Option<usize>),
    Color(Color),
}

impl fmt::Display for TelemetryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryValue::Score(score) => write!(f, "{score:.2}"),
            TelemetryValue::Count(count) => write!(f, "{count}"),
            TelemetryValue::Region(Some(index)) => write!(f, "{index}"),
            TelemetryValue::Region(None) => f.write_str("none"),
            TelemetryValue::Color(color) => write!(f, "{color}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEntry {
    pub label: String,
    pub value: TelemetryValue,
}

impl TelemetryEntry {
    pub fn new(label: impl Into<String>, value: TelemetryValue) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl fmt::Display for TelemetryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}
