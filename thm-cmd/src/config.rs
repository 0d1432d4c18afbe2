//! View configuration.
//!
//! The year-window view reads a small JSON document:
//!
//! ```json
//! { "range": [2008, 2017], "metric": "max" }
//! ```
//!
//! Both keys are optional. Command line `--start`/`--end` flags override the
//! file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thm_chart::Metric;
use thm_data::YearRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Inclusive `[start, end]` years shown by the daily-trend view.
    pub range: YearRange,
    /// Metric selected when the view is first drawn.
    pub metric: Metric,
}

impl ViewConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid view config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = ViewConfig::from_json(&json)
            .with_context(|| format!("in config {}", path.display()))?;
        log::info!(
            "loaded view config from {}: {}-{}",
            path.display(),
            config.range.start,
            config.range.end
        );
        Ok(config)
    }

    /// Config file (or defaults) with the year flags applied on top.
    pub fn resolve(
        path: Option<&Path>,
        start: Option<i32>,
        end: Option<i32>,
    ) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => ViewConfig::load(path)?,
            None => ViewConfig::default(),
        };
        config.range = YearRange::new(
            start.unwrap_or(config.range.start),
            end.unwrap_or(config.range.end),
        )?;
        Ok(config)
    }
}
