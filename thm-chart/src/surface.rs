//! The drawing interface a [`HeatmapScene`] is rendered through.

use crate::legend::LegendSpec;
use crate::scene::{AxisLabel, Cell, HeatmapScene, LineLegend};

/// A render target for heatmap scenes.
///
/// [`draw`] calls `begin` once, then the axis, cell and legend hooks, then
/// `finish`. Coordinates are plot-relative; the surface applies the margin.
pub trait ChartSurface {
    type Error;

    fn begin(&mut self, scene: &HeatmapScene) -> Result<(), Self::Error>;
    fn column_label(&mut self, label: &AxisLabel) -> Result<(), Self::Error>;
    fn row_label(&mut self, label: &AxisLabel) -> Result<(), Self::Error>;
    fn cell(&mut self, cell: &Cell) -> Result<(), Self::Error>;
    fn legend(&mut self, legend: &LegendSpec) -> Result<(), Self::Error>;
    fn line_legend(&mut self, position: &LineLegend) -> Result<(), Self::Error>;
    fn finish(&mut self) -> Result<(), Self::Error>;
}

pub fn draw<S: ChartSurface + ?Sized>(scene: &HeatmapScene, surface: &mut S) -> Result<(), S::Error> {
    surface.begin(scene)?;
    for label in &scene.columns {
        surface.column_label(label)?;
    }
    for label in &scene.rows {
        surface.row_label(label)?;
    }
    for cell in &scene.cells {
        surface.cell(cell)?;
    }
    surface.legend(&scene.legend)?;
    if let Some(position) = &scene.line_legend {
        surface.line_legend(position)?;
    }
    surface.finish()
}
