use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use thm_daily::DailyRecord;
use thm_utils::numbers::round_to_tenth;

/// Grouping key for a monthly aggregate.
///
/// Records whose date could not be parsed all share the `Undated` key, so
/// every record lands in exactly one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MonthKey {
    Month { year: i32, month: u32 },
    Undated,
}

impl MonthKey {
    pub fn of(record: &DailyRecord) -> Self {
        match (record.year(), record.month()) {
            (Some(year), Some(month)) => MonthKey::Month { year, month },
            _ => MonthKey::Undated,
        }
    }
}

/// How much of each group survives aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Full precision means, day sequence retained.
    #[default]
    Full,
    /// Means rounded to one decimal, day sequence discarded.
    Tenths,
}

/// Average temperatures for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    pub key: MonthKey,
    pub avg_max_temperature: f64,
    pub avg_min_temperature: f64,
    /// Days of the month sorted by day ascending. Empty once rounded.
    pub days: Vec<DailyRecord>,
}

impl MonthlyAggregate {
    pub fn year(&self) -> Option<i32> {
        match self.key {
            MonthKey::Month { year, .. } => Some(year),
            MonthKey::Undated => None,
        }
    }

    pub fn month(&self) -> Option<u32> {
        match self.key {
            MonthKey::Month { month, .. } => Some(month),
            MonthKey::Undated => None,
        }
    }

    /// Round both means to one decimal and drop the day sequence.
    pub fn rounded(self) -> Self {
        MonthlyAggregate {
            key: self.key,
            avg_max_temperature: round_to_tenth(self.avg_max_temperature),
            avg_min_temperature: round_to_tenth(self.avg_min_temperature),
            days: Vec::new(),
        }
    }

    fn from_group(key: MonthKey, mut days: Vec<DailyRecord>) -> Self {
        let count = days.len() as f64;
        let avg_max_temperature = days.iter().map(|d| d.max_temperature).sum::<f64>() / count;
        let avg_min_temperature = days.iter().map(|d| d.min_temperature).sum::<f64>() / count;
        days.sort_by_key(|d| d.day());
        MonthlyAggregate {
            key,
            avg_max_temperature,
            avg_min_temperature,
            days,
        }
    }
}

/// Inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[i32; 2]", into = "[i32; 2]")]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, InvalidYearRange> {
        if start > end {
            return Err(InvalidYearRange { start, end });
        }
        Ok(YearRange { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

impl Default for YearRange {
    /// The decade shown by the daily-trend view.
    fn default() -> Self {
        YearRange {
            start: 2008,
            end: 2017,
        }
    }
}

/// Rejected year range whose start comes after its end.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("year range start {start} is after end {end}")]
pub struct InvalidYearRange {
    pub start: i32,
    pub end: i32,
}

impl TryFrom<[i32; 2]> for YearRange {
    type Error = InvalidYearRange;

    fn try_from(value: [i32; 2]) -> Result<Self, Self::Error> {
        YearRange::new(value[0], value[1])
    }
}

impl From<YearRange> for [i32; 2] {
    fn from(range: YearRange) -> Self {
        [range.start, range.end]
    }
}

/// Keep the records whose year lies in `start_year..=end_year`, in input order.
///
/// Records with an unparseable date never match.
pub fn filter_by_year_range(
    records: &[DailyRecord],
    start_year: i32,
    end_year: i32,
) -> Vec<DailyRecord> {
    let filtered: Vec<DailyRecord> = records
        .iter()
        .filter(|r| {
            r.year()
                .is_some_and(|year| start_year <= year && year <= end_year)
        })
        .cloned()
        .collect();
    log::debug!(
        "kept {} of {} records for {}-{}",
        filtered.len(),
        records.len(),
        start_year,
        end_year
    );
    filtered
}

/// Group records by (year, month) and average each group.
///
/// Only observed months appear in the output. Means are full precision and the
/// day sequence is kept, sorted by day of month.
pub fn aggregate_by_month(records: &[DailyRecord]) -> Vec<MonthlyAggregate> {
    let mut groups: BTreeMap<MonthKey, Vec<DailyRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(MonthKey::of(record))
            .or_default()
            .push(record.clone());
    }
    let aggregates: Vec<MonthlyAggregate> = groups
        .into_iter()
        .map(|(key, days)| MonthlyAggregate::from_group(key, days))
        .collect();
    log::info!(
        "aggregated {} records into {} months",
        records.len(),
        aggregates.len()
    );
    aggregates
}

/// Aggregate by month, then round means to one decimal and drop the days.
pub fn summarize_by_month(records: &[DailyRecord]) -> Vec<MonthlyAggregate> {
    aggregate_by_month(records)
        .into_iter()
        .map(MonthlyAggregate::rounded)
        .collect()
}

pub fn aggregate_with(records: &[DailyRecord], precision: Precision) -> Vec<MonthlyAggregate> {
    match precision {
        Precision::Full => aggregate_by_month(records),
        Precision::Tenths => summarize_by_month(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn record(y: i32, m: u32, d: u32, max: f64, min: f64) -> DailyRecord {
        DailyRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), max, min)
    }

    fn scenario() -> Vec<DailyRecord> {
        vec![
            record(2015, 1, 5, 10.0, 2.0),
            record(2015, 1, 15, 14.0, 4.0),
            record(2015, 2, 1, 0.0, -5.0),
        ]
    }

    fn find(aggregates: &[MonthlyAggregate], year: i32, month: u32) -> &MonthlyAggregate {
        aggregates
            .iter()
            .find(|a| a.key == MonthKey::Month { year, month })
            .unwrap()
    }

    #[test]
    fn test_two_month_scenario() {
        let aggregates = aggregate_by_month(&scenario());
        assert_eq!(aggregates.len(), 2);
        let january = find(&aggregates, 2015, 1);
        assert_eq!(january.avg_max_temperature, 12.0);
        assert_eq!(january.avg_min_temperature, 3.0);
        let february = find(&aggregates, 2015, 2);
        assert_eq!(february.avg_max_temperature, 0.0);
        assert_eq!(february.avg_min_temperature, -5.0);
    }

    #[test]
    fn test_one_aggregate_per_distinct_month() {
        let records = vec![
            record(2001, 3, 1, 1.0, 0.0),
            record(2001, 3, 2, 2.0, 0.0),
            record(2002, 3, 1, 3.0, 0.0),
            record(2001, 4, 9, 4.0, 0.0),
            record(2001, 3, 2, 5.0, 0.0),
        ];
        let distinct: HashSet<MonthKey> = records.iter().map(MonthKey::of).collect();
        let aggregates = aggregate_by_month(&records);
        assert_eq!(aggregates.len(), distinct.len());
        let total_days: usize = aggregates.iter().map(|a| a.days.len()).sum();
        assert_eq!(total_days, records.len());
    }

    #[test]
    fn test_mean_matches_reconstructed_group() {
        let records: Vec<DailyRecord> = (1..=28)
            .map(|d| record(1999, 2, d, d as f64 * 0.7, -(d as f64) * 0.3))
            .chain((1..=10).map(|d| record(1999, 3, d, 20.0 + d as f64, 1.0)))
            .collect();
        for aggregate in aggregate_by_month(&records) {
            let group: Vec<&DailyRecord> = records
                .iter()
                .filter(|r| MonthKey::of(r) == aggregate.key)
                .collect();
            let expected = group.iter().map(|r| r.max_temperature).sum::<f64>() / group.len() as f64;
            assert!((aggregate.avg_max_temperature - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_days_sorted_by_day() {
        let records = vec![
            record(2010, 6, 30, 1.0, 0.0),
            record(2010, 6, 2, 2.0, 0.0),
            record(2010, 6, 15, 3.0, 0.0),
        ];
        let aggregates = aggregate_by_month(&records);
        let days: Vec<u32> = aggregates[0].days.iter().filter_map(|d| d.day()).collect();
        assert_eq!(days, vec![2, 15, 30]);
    }

    #[test]
    fn test_nan_propagates_into_mean() {
        let records = vec![
            record(2010, 6, 1, f64::NAN, 1.0),
            record(2010, 6, 2, 10.0, 3.0),
        ];
        let aggregates = aggregate_by_month(&records);
        assert!(aggregates[0].avg_max_temperature.is_nan());
        assert_eq!(aggregates[0].avg_min_temperature, 2.0);
    }

    #[test]
    fn test_undated_records_share_one_group() {
        let mut records = scenario();
        records.push(DailyRecord {
            date: None,
            max_temperature: 8.0,
            min_temperature: 1.0,
        });
        records.push(DailyRecord {
            date: None,
            max_temperature: 6.0,
            min_temperature: 3.0,
        });
        let aggregates = aggregate_by_month(&records);
        assert_eq!(aggregates.len(), 3);
        let undated = aggregates.last().unwrap();
        assert_eq!(undated.key, MonthKey::Undated);
        assert_eq!(undated.year(), None);
        assert_eq!(undated.avg_max_temperature, 7.0);
        assert_eq!(undated.days.len(), 2);
    }

    #[test]
    fn test_summarize_rounds_and_drops_days() {
        let records = vec![
            record(2000, 1, 1, 1.0, 0.1),
            record(2000, 1, 2, 1.0, 0.0),
            record(2000, 1, 3, 2.0, 0.0),
        ];
        let summary = summarize_by_month(&records);
        assert_eq!(summary[0].avg_max_temperature, 1.3);
        assert_eq!(summary[0].avg_min_temperature, 0.0);
        assert!(summary[0].days.is_empty());

        let full = aggregate_with(&records, Precision::Full);
        assert!((full[0].avg_max_temperature - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(full[0].days.len(), 3);
    }

    #[test]
    fn test_filter_by_year_range() {
        let records: Vec<DailyRecord> = (2000..2020)
            .map(|y| record(y, 1, 1, y as f64, 0.0))
            .chain(std::iter::once(DailyRecord {
                date: None,
                max_temperature: 0.0,
                min_temperature: 0.0,
            }))
            .collect();
        let filtered = filter_by_year_range(&records, 2008, 2017);
        assert_eq!(filtered.len(), 10);
        assert!(filtered
            .iter()
            .all(|r| r.year().is_some_and(|y| (2008..=2017).contains(&y))));
        let years: Vec<i32> = filtered.iter().filter_map(|r| r.year()).collect();
        assert_eq!(years, (2008..=2017).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input_yields_no_months() {
        assert!(aggregate_by_month(&[]).is_empty());
    }

    #[test]
    fn test_year_range_validation() {
        assert!(YearRange::new(2017, 2008).is_err());
        let range = YearRange::try_from([2008, 2017]).unwrap();
        assert_eq!(range, YearRange::default());
        assert!(range.contains(2008));
        assert!(range.contains(2017));
        assert!(!range.contains(2018));
    }

    #[test]
    fn test_inverted_year_range_message() {
        let err = YearRange::new(2017, 2008).unwrap_err();
        assert_eq!(err, InvalidYearRange { start: 2017, end: 2008 });
        assert_eq!(err.to_string(), "year range start 2017 is after end 2008");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }
}
