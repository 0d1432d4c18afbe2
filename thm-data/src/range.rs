use crate::aggregate::MonthlyAggregate;
use serde::Serialize;
use thiserror::Error;

/// Precondition failures when deriving scale domains.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    #[error("cannot derive a value range from an empty aggregate table")]
    EmptyDataset,
}

/// Closed interval of aggregated values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range of a table that has rows but no numeric selections.
    pub const UNDEFINED: ValueRange = ValueRange {
        min: f64::NAN,
        max: f64::NAN,
    };

    /// Whether both bounds are finite numbers.
    pub fn is_defined(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Value at fraction `t` of the way from `min` to `max`.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * self.span()
    }
}

/// Extremes of `selector` across `aggregates`.
///
/// NaN selections are skipped. Only an empty table is rejected; when every
/// selection is NaN the result is [`ValueRange::UNDEFINED`], which colors
/// nothing and yields no legend ticks.
pub fn value_range<F>(aggregates: &[MonthlyAggregate], selector: F) -> Result<ValueRange, AggregateError>
where
    F: Fn(&MonthlyAggregate) -> f64,
{
    if aggregates.is_empty() {
        return Err(AggregateError::EmptyDataset);
    }
    let range = aggregates
        .iter()
        .map(selector)
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<ValueRange>, v| match acc {
            None => Some(ValueRange { min: v, max: v }),
            Some(r) => Some(ValueRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        });
    Ok(range.unwrap_or_else(|| {
        log::warn!("no numeric values among {} aggregates", aggregates.len());
        ValueRange::UNDEFINED
    }))
}

/// The two ranges every heatmap needs, computed once per table.
///
/// Each metric's range only looks at its own column, so a table whose min
/// readings are all malformed still has a usable max range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRanges {
    pub max_temperature: ValueRange,
    pub min_temperature: ValueRange,
}

impl MetricRanges {
    pub fn from_aggregates(aggregates: &[MonthlyAggregate]) -> Result<Self, AggregateError> {
        Ok(MetricRanges {
            max_temperature: value_range(aggregates, |a| a.avg_max_temperature)?,
            min_temperature: value_range(aggregates, |a| a.avg_min_temperature)?,
        })
    }
}
