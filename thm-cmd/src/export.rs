//! Export of the aggregated monthly table.

use crate::input::load_records;
use crate::render::write_output;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use thm_chart::Heatmap;
use thm_data::{MetricRanges, MonthlyAggregate, YearRange};

/// One exported month. Undated records export with empty year and month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub avg_max_temperature: f64,
    pub avg_min_temperature: f64,
    pub days: usize,
}

impl From<&MonthlyAggregate> for MonthlyRow {
    fn from(aggregate: &MonthlyAggregate) -> Self {
        MonthlyRow {
            year: aggregate.year(),
            month: aggregate.month(),
            avg_max_temperature: aggregate.avg_max_temperature,
            avg_min_temperature: aggregate.avg_min_temperature,
            days: aggregate.days.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    ranges: &'a MetricRanges,
    months: Vec<MonthlyRow>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Write the aggregated table to `output`.
///
/// With `window` set the full-precision table for those years is exported,
/// otherwise the rounded full-history table. A `.json` output also carries the
/// value ranges; anything else is written as CSV.
pub fn run_export(input: &Path, output: &Path, window: Option<YearRange>) -> anyhow::Result<()> {
    let records = load_records(input)?;
    let heatmap = match window {
        Some(years) => Heatmap::daily_trend(&records, years),
        None => Heatmap::monthly(&records),
    }
    .context("nothing to export")?;
    let rows: Vec<MonthlyRow> = heatmap.aggregates().iter().map(MonthlyRow::from).collect();

    if is_json(output) {
        let document = ExportDocument {
            ranges: heatmap.ranges(),
            months: rows,
        };
        let json = serde_json::to_string_pretty(&document)?;
        write_output(output, &json)
    } else {
        let mut writer = csv::Writer::from_path(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::info!("wrote {} monthly rows to {}", rows.len(), output.display());
        Ok(())
    }
}
