//! Chart construction for the temperature heatmaps.
//!
//! This crate provides:
//! - `scale`: band and linear scales with nice tick generation
//! - `color`: sequential color ramps over ColorBrewer schemes
//! - `metric`: the max/min temperature series a view is colored by
//! - `legend`: gradient and axis specs for the color legend
//! - `scene`: the pure heatmap scene built from monthly aggregates
//! - `surface`: the drawing trait a scene is rendered through
//! - `render`: SVG output through plotters, and the HTML page

pub mod color;
pub mod legend;
pub mod metric;
pub mod render;
pub mod scale;
pub mod scene;
pub mod surface;

pub use metric::{Metric, UnknownMetric};
pub use scene::{Heatmap, HeatmapScene, ViewKind};
