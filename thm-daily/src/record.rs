use chrono::{Datelike, NaiveDate};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;
use thm_utils::dates::parse_calendar_date;

/// Errors that can occur while reading a daily temperature table.
///
/// Individual malformed values are not errors; only a table that cannot be
/// framed into rows is.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read temperature CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A raw, untyped row as it appears in the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub date: String,
    pub max_temperature: String,
    pub min_temperature: String,
}

/// A single day of temperature observations.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    /// Calendar day, `None` when the source date string was malformed.
    pub date: Option<NaiveDate>,
    pub max_temperature: f64,
    pub min_temperature: f64,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, max_temperature: f64, min_temperature: f64) -> Self {
        Self {
            date: Some(date),
            max_temperature,
            min_temperature,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }

    pub fn day(&self) -> Option<u32> {
        self.date.map(|d| d.day())
    }

    /// Convert raw rows into records, one record per row.
    pub fn parse_rows<'a, I>(rows: I) -> Vec<DailyRecord>
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let records: Vec<DailyRecord> = rows.into_iter().map(DailyRecord::from).collect();
        let undated = records.iter().filter(|r| r.date.is_none()).count();
        if undated > 0 {
            log::warn!("{} of {} rows have an unparseable date", undated, records.len());
        }
        records
    }

    /// Read a headed CSV table (`date,max_temperature,min_temperature`).
    pub fn read_csv<R: Read>(reader: R) -> Result<Vec<DailyRecord>, ParseError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let rows = rdr
            .deserialize::<RawRow>()
            .collect::<Result<Vec<RawRow>, _>>()?;
        log::debug!("read {} raw temperature rows", rows.len());
        Ok(DailyRecord::parse_rows(&rows))
    }

    /// Parse a CSV string into records.
    pub fn csv_to_records(csv_data: &str) -> Result<Vec<DailyRecord>, ParseError> {
        DailyRecord::read_csv(csv_data.as_bytes())
    }
}

/// Parse a numeric field, yielding NaN for anything that is not a number.
fn parse_temperature(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(f64::NAN)
}

impl From<&RawRow> for DailyRecord {
    fn from(row: &RawRow) -> Self {
        DailyRecord {
            date: parse_calendar_date(&row.date),
            max_temperature: parse_temperature(&row.max_temperature),
            min_temperature: parse_temperature(&row.min_temperature),
        }
    }
}

impl From<RawRow> for DailyRecord {
    fn from(row: RawRow) -> Self {
        DailyRecord::from(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STR_RESULT: &str = r#"date,max_temperature,min_temperature
2015-01-05,10.0,2.0
2015-1-15,14,4
2015-02-01,0.0,-5.0
"#;

    fn row(date: &str, max: &str, min: &str) -> RawRow {
        RawRow {
            date: date.to_string(),
            max_temperature: max.to_string(),
            min_temperature: min.to_string(),
        }
    }

    #[test]
    fn test_csv_to_records() {
        let records = DailyRecord::csv_to_records(STR_RESULT).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].year(), Some(2015));
        assert_eq!(records[1].month(), Some(1));
        assert_eq!(records[1].day(), Some(15));
        assert_eq!(records[1].max_temperature, 14.0);
        assert_eq!(records[2].min_temperature, -5.0);
    }

    #[test]
    fn test_date_components_round_trip() {
        for source in ["1997-12-31", "2008-2-29", "2017-07-04", "1961-1-1"] {
            let record = DailyRecord::from(row(source, "1", "0"));
            let parts: Vec<u32> = source.split('-').map(|p| p.parse().unwrap()).collect();
            assert_eq!(record.year(), Some(parts[0] as i32));
            assert_eq!(record.month(), Some(parts[1]));
            assert_eq!(record.day(), Some(parts[2]));
        }
    }

    #[test]
    fn test_malformed_temperature_is_nan() {
        let record = DailyRecord::from(row("2015-01-05", "n/a", ""));
        assert_eq!(record.year(), Some(2015));
        assert!(record.max_temperature.is_nan());
        assert!(record.min_temperature.is_nan());
    }

    #[test]
    fn test_malformed_date_is_kept() {
        let rows = vec![row("someday", "10", "2"), row("2015-01-05", "12", "3")];
        let records = DailyRecord::parse_rows(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].max_temperature, 10.0);
        assert_eq!(records[1].day(), Some(5));
    }

    #[test]
    fn test_short_row_is_framing_error() {
        let data = "date,max_temperature,min_temperature\n2015-01-05,10.0\n";
        assert!(DailyRecord::csv_to_records(data).is_err());
    }

    #[test]
    fn test_header_only_is_empty() {
        let data = "date,max_temperature,min_temperature\n";
        assert!(DailyRecord::csv_to_records(data).unwrap().is_empty());
    }
}
