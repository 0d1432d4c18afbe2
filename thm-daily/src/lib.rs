//! Core types for daily temperature records.
//!
//! A [`record::DailyRecord`] is one row of the input table: a calendar date
//! plus the day's maximum and minimum temperature in °C. Parsing is
//! permissive. A malformed temperature becomes NaN and a malformed date
//! becomes `None`, so a single bad row never aborts a load.

pub mod record;

pub use record::{DailyRecord, ParseError, RawRow};
