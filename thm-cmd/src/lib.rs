//! Command implementations for the temperature heatmap CLI.
//!
//! Each subcommand loads the daily table once, builds the heatmap view it
//! needs, and writes SVG, HTML, CSV or JSON output.

use clap::Subcommand;
use std::path::PathBuf;
use thm_chart::Metric;

pub mod config;
pub mod export;
pub mod input;
pub mod render;

use config::ViewConfig;

#[derive(Subcommand)]
pub enum Command {
    /// Render the full-history monthly heatmap as SVG
    Monthly {
        /// Daily temperature CSV (`.gz` is decompressed)
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output SVG path
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Temperature series to color by
        #[arg(short = 'm', long, default_value = "max")]
        metric: Metric,
    },

    /// Render the year-window heatmap with daily trend lines as SVG
    Decade {
        #[arg(short = 'i', long)]
        input: PathBuf,

        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Overrides the metric from the config file
        #[arg(short = 'm', long)]
        metric: Option<Metric>,

        /// JSON view config, e.g. {"range": [2008, 2017]}
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// First year shown (overrides config)
        #[arg(long)]
        start: Option<i32>,

        /// Last year shown (overrides config)
        #[arg(long)]
        end: Option<i32>,
    },

    /// Render both heatmaps in both metrics into one HTML page
    Page {
        #[arg(short = 'i', long)]
        input: PathBuf,

        #[arg(short = 'o', long)]
        output: PathBuf,

        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        #[arg(long)]
        start: Option<i32>,

        #[arg(long)]
        end: Option<i32>,
    },

    /// Write the aggregated monthly table as CSV, or JSON for a `.json` output
    Export {
        #[arg(short = 'i', long)]
        input: PathBuf,

        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Export the year-window table at full precision instead of the
        /// rounded full-history table
        #[arg(long)]
        decade: bool,

        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        #[arg(long)]
        start: Option<i32>,

        #[arg(long)]
        end: Option<i32>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Monthly {
            input,
            output,
            metric,
        } => render::run_monthly(&input, &output, metric),
        Command::Decade {
            input,
            output,
            metric,
            config,
            start,
            end,
        } => {
            let mut view = ViewConfig::resolve(config.as_deref(), start, end)?;
            if let Some(metric) = metric {
                view.metric = metric;
            }
            render::run_decade(&input, &output, &view)
        }
        Command::Page {
            input,
            output,
            config,
            start,
            end,
        } => {
            let view = ViewConfig::resolve(config.as_deref(), start, end)?;
            render::run_page(&input, &output, &view)
        }
        Command::Export {
            input,
            output,
            decade,
            config,
            start,
            end,
        } => {
            let view = ViewConfig::resolve(config.as_deref(), start, end)?;
            export::run_export(&input, &output, decade.then_some(view.range))
        }
    }
}
