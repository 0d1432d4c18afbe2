//! SVG and HTML rendering commands.

use crate::config::ViewConfig;
use crate::input::load_records;
use anyhow::Context;
use std::path::Path;
use thm_chart::render::{render_page, render_svg};
use thm_chart::{Heatmap, Metric};

/// Page heading for the combined document.
pub const PAGE_TITLE: &str = "Daily Temperature Heatmaps";

pub(crate) fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Render the full-history heatmap for one metric.
pub fn run_monthly(input: &Path, output: &Path, metric: Metric) -> anyhow::Result<()> {
    let records = load_records(input)?;
    let heatmap = Heatmap::monthly(&records).context("cannot draw the monthly heatmap")?;
    write_output(output, &render_svg(&heatmap.scene(metric))?)
}

/// Render the year-window heatmap with daily trend lines.
pub fn run_decade(input: &Path, output: &Path, config: &ViewConfig) -> anyhow::Result<()> {
    let records = load_records(input)?;
    let heatmap = Heatmap::daily_trend(&records, config.range).with_context(|| {
        format!(
            "cannot draw the daily trend heatmap for {}-{}",
            config.range.start, config.range.end
        )
    })?;
    write_output(output, &render_svg(&heatmap.scene(config.metric))?)
}

/// Render both views into one HTML page with a max/min toggle per view.
pub fn run_page(input: &Path, output: &Path, config: &ViewConfig) -> anyhow::Result<()> {
    let records = load_records(input)?;
    let monthly = Heatmap::monthly(&records).context("cannot draw the monthly heatmap")?;
    let trend = Heatmap::daily_trend(&records, config.range).with_context(|| {
        format!(
            "cannot draw the daily trend heatmap for {}-{}",
            config.range.start, config.range.end
        )
    })?;
    write_output(output, &render_page(PAGE_TITLE, &[&monthly, &trend])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thm_data::YearRange;

    const CSV: &str = "date,max_temperature,min_temperature
2015-01-05,10.0,2.0
2015-01-15,14.0,4.0
2015-02-01,0.0,-5.0
1997-06-10,28.5,15.0
2016-07-04,bad,20.0
";

    fn fixture(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("temperature_daily.csv");
        std::fs::write(&path, CSV).unwrap();
        path
    }

    #[test]
    fn test_run_monthly() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = fixture(&dir);
        let output = dir.path().join("level1.svg");
        run_monthly(&input, &output, Metric::Min).unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("level1-min-gradient"));
        assert!(svg.contains("Date: June 1997"));
        assert!(svg.contains("Min Temperature: 3°C"));
    }

    #[test]
    fn test_run_decade_respects_range() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = fixture(&dir);
        let output = dir.path().join("level2.svg");
        let config = ViewConfig {
            range: YearRange::new(2016, 2016).unwrap(),
            metric: Metric::Max,
        };
        run_decade(&input, &output, &config).unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("Date: July 2016"));
        assert!(!svg.contains("January 2015"));
        assert!(svg.contains("cell no-data"));
    }

    #[test]
    fn test_empty_window_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = fixture(&dir);
        let output = dir.path().join("level2.svg");
        let config = ViewConfig {
            range: YearRange::new(1900, 1910).unwrap(),
            metric: Metric::Max,
        };
        let err = run_decade(&input, &output, &config).unwrap_err();
        assert!(format!("{:#}", err).contains("empty aggregate table"));
        assert!(!output.exists());
    }

    #[test]
    fn test_sample_fixtures() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
        let config = ViewConfig::load(&fixtures.join("view.json")).unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("level2.svg");
        run_decade(&fixtures.join("temperature_daily.csv"), &output, &config).unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert_eq!(svg.matches(r#"class="cell-group""#).count(), 4);
        assert!(!svg.contains(" 1997"));
    }

    #[test]
    fn test_malformed_min_column_still_renders() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("broken_min.csv");
        std::fs::write(
            &input,
            "date,max_temperature,min_temperature\n2015-01-05,10.0,n/a\n2015-01-06,12.0,\n",
        )
        .unwrap();
        let output = dir.path().join("level1.svg");
        run_monthly(&input, &output, Metric::Max).unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("Max Temperature: 11°C"));

        let page = dir.path().join("index.html");
        let config = ViewConfig {
            range: YearRange::new(2015, 2015).unwrap(),
            metric: Metric::Max,
        };
        run_page(&input, &page, &config).unwrap();
        let html = std::fs::read_to_string(&page).unwrap();
        assert_eq!(html.matches("class=\"heatmap ").count(), 4);
    }

    #[test]
    fn test_run_page() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = fixture(&dir);
        let output = dir.path().join("index.html");
        run_page(&input, &output, &ViewConfig::default()).unwrap();
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PAGE_TITLE));
        assert_eq!(html.matches("class=\"heatmap ").count(), 4);
    }
}
