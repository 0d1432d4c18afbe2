//! Loading the daily temperature table from disk.

use anyhow::Context;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thm_daily::DailyRecord;

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Read `date,max_temperature,min_temperature` rows from a CSV file,
/// transparently decompressing `.gz` files.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<DailyRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader: Box<dyn Read> = if is_gzip(path) {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    let records = DailyRecord::read_csv(reader)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    log::info!("loaded {} daily records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const CSV: &str = "date,max_temperature,min_temperature\n2015-01-05,10.0,2.0\n2015-1-15,14,4\n";

    #[test]
    fn test_load_plain_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("temperature_daily.csv");
        std::fs::write(&path, CSV).unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].day(), Some(15));
    }

    #[test]
    fn test_load_gzip_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("temperature_daily.csv.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(CSV.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].max_temperature, 10.0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_records(&dir.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
