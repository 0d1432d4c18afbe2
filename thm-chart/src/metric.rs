//! The temperature series a heatmap is colored by.

use crate::color::ColorScheme;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use thm_data::{MetricRanges, MonthlyAggregate, ValueRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Max,
    Min,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Max, Metric::Min];

    /// Short identifier used in element ids and file names.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Max => "max",
            Metric::Min => "min",
        }
    }

    pub fn select(&self, aggregate: &MonthlyAggregate) -> f64 {
        match self {
            Metric::Max => aggregate.avg_max_temperature,
            Metric::Min => aggregate.avg_min_temperature,
        }
    }

    pub fn range(&self, ranges: &MetricRanges) -> ValueRange {
        match self {
            Metric::Max => ranges.max_temperature,
            Metric::Min => ranges.min_temperature,
        }
    }

    pub fn scheme(&self) -> ColorScheme {
        match self {
            Metric::Max => ColorScheme::Oranges,
            Metric::Min => ColorScheme::Blues,
        }
    }

    /// "Max" or "Min".
    pub fn short_label(&self) -> &'static str {
        match self {
            Metric::Max => "Max",
            Metric::Min => "Min",
        }
    }

    /// Label of the toggle that selects this metric.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Metric::Max => "Max Temperature",
            Metric::Min => "Min Temperature",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A metric name that is neither `max` nor `min`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown metric '{0}', expected 'max' or 'min'")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "max_temperature" => Ok(Metric::Max),
            "min" | "min_temperature" => Ok(Metric::Min),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}
