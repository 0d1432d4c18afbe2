//! Color legend specs.
//!
//! The legend is a vertical bar filled with a linear gradient running from the
//! range minimum (bottom) to the range maximum (top), with a tick axis on its
//! right edge. Both are pure functions of the value range and color scale.

use crate::color::{Rgb, SequentialScale};
use crate::scale::LinearScale;
use thm_data::ValueRange;

/// Number of intervals between gradient stops.
pub const GRADIENT_INTERVALS: usize = 10;

/// Requested number of legend axis ticks.
pub const LEGEND_TICKS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Fraction of the bar from the bottom, `0.0..=1.0`.
    pub offset: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    /// Document-unique identifier the legend bar references.
    pub id: String,
    pub stops: Vec<GradientStop>,
}

impl GradientSpec {
    pub fn new(id: impl Into<String>, range: ValueRange, scale: &SequentialScale) -> Self {
        let stops = (0..=GRADIENT_INTERVALS)
            .map(|i| {
                let offset = i as f64 / GRADIENT_INTERVALS as f64;
                let value = range.lerp(offset);
                GradientStop {
                    offset,
                    color: scale.scheme.interpolate(scale.normalize(value)),
                }
            })
            .collect();
        GradientSpec {
            id: id.into(),
            stops,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendTick {
    pub value: f64,
    /// Distance from the top of the bar in pixels.
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSpec {
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub gradient: GradientSpec,
    pub ticks: Vec<LegendTick>,
}

impl LegendSpec {
    pub fn new(
        title: impl Into<String>,
        origin: (f64, f64),
        size: (f64, f64),
        gradient: GradientSpec,
        range: ValueRange,
    ) -> Self {
        let (width, height) = size;
        let axis = LinearScale::new((range.min, range.max), (height, 0.0));
        let ticks = axis
            .ticks(LEGEND_TICKS)
            .into_iter()
            .map(|value| LegendTick {
                value,
                offset: axis.apply(value),
                label: format!("{:.1}°C", value),
            })
            .collect();
        LegendSpec {
            title: title.into(),
            x: origin.0,
            y: origin.1,
            width,
            height,
            gradient,
            ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorScheme;

    fn range() -> ValueRange {
        ValueRange {
            min: -10.0,
            max: 30.0,
        }
    }

    #[test]
    fn test_gradient_stops_span_range() {
        let scale = SequentialScale::new(range(), ColorScheme::Oranges);
        let gradient = GradientSpec::new("level1-max-gradient", range(), &scale);
        assert_eq!(gradient.stops.len(), GRADIENT_INTERVALS + 1);
        assert_eq!(gradient.stops[0].offset, 0.0);
        assert_eq!(gradient.stops[10].offset, 1.0);
        assert_eq!(Some(gradient.stops[0].color), scale.color(-10.0));
        assert_eq!(Some(gradient.stops[10].color), scale.color(30.0));
    }

    #[test]
    fn test_legend_ticks_inside_bar() {
        let scale = SequentialScale::new(range(), ColorScheme::Blues);
        let gradient = GradientSpec::new("g", range(), &scale);
        let legend = LegendSpec::new("Min Temp (°C)", (810.0, 0.0), (20.0, 400.0), gradient, range());
        let labels: Vec<&str> = legend.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["-10.0°C", "0.0°C", "10.0°C", "20.0°C", "30.0°C"]);
        assert_eq!(legend.ticks[0].offset, 400.0);
        assert_eq!(legend.ticks[4].offset, 0.0);
        assert!(legend.ticks.iter().all(|t| range().contains(t.value)));
    }
}
