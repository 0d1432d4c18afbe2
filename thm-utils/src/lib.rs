//! Shared utility functions for the temperature heatmap crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Full English month names, January first.
    pub const MONTH_NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    /// Parse a dash separated calendar date.
    ///
    /// Accepts both zero-padded ("2015-01-05") and bare ("2015-1-5") month and
    /// day components. Returns `None` when the string does not name a real
    /// calendar day.
    pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
        let mut parts = s.trim().split('-');
        let year: i32 = parts.next()?.trim().parse().ok()?;
        let month: u32 = parts.next()?.trim().parse().ok()?;
        let day: u32 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// English name for a 1-based month number.
    pub fn month_name(month: u32) -> Option<&'static str> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        MONTH_NAMES.get(index).copied()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::Datelike;

        #[test]
        fn test_parse_padded_and_bare() {
            let padded = parse_calendar_date("2015-01-05").unwrap();
            let bare = parse_calendar_date("2015-1-5").unwrap();
            assert_eq!(padded, bare);
            assert_eq!((bare.year(), bare.month(), bare.day()), (2015, 1, 5));
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_calendar_date("").is_none());
            assert!(parse_calendar_date("2015-13-01").is_none());
            assert!(parse_calendar_date("2015-02-30").is_none());
            assert!(parse_calendar_date("2015/01/05").is_none());
            assert!(parse_calendar_date("2015-01-05-01").is_none());
            assert!(parse_calendar_date("abcd-01-05").is_none());
        }

        #[test]
        fn test_month_name() {
            assert_eq!(month_name(1), Some("January"));
            assert_eq!(month_name(12), Some("December"));
            assert_eq!(month_name(0), None);
            assert_eq!(month_name(13), None);
        }
    }
}

/// Number formatting helpers
pub mod numbers {
    /// Round to one decimal place, halves rounding toward positive infinity.
    ///
    /// `-2.25` becomes `-2.2` and `2.25` becomes `2.3`. NaN stays NaN.
    pub fn round_to_tenth(value: f64) -> f64 {
        (value * 10.0 + 0.5).floor() / 10.0
    }

}
