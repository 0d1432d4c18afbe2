//! Monthly aggregation of daily temperature records.
//!
//! This crate turns a table of [`thm_daily::DailyRecord`]s into one
//! [`aggregate::MonthlyAggregate`] per observed (year, month) and derives the
//! [`range::ValueRange`]s that parameterize color scales and legends.
//! Everything here is a pure function of its input.

pub mod aggregate;
pub mod range;

pub use aggregate::{
    aggregate_by_month, aggregate_with, filter_by_year_range, summarize_by_month, InvalidYearRange,
    MonthKey, MonthlyAggregate, Precision, YearRange,
};
pub use range::{value_range, AggregateError, MetricRanges, ValueRange};
