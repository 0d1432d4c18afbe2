//! Sequential color ramps.
//!
//! Each scheme is a 9-class ColorBrewer palette sampled continuously with a
//! uniform cubic B-spline through the palette colors, light to dark.

use std::fmt;
use thm_data::ValueRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS hex notation, e.g. `#fd8d3c`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Oranges,
    Blues,
}

impl ColorScheme {
    pub fn colors(&self) -> [Rgb; 9] {
        match self {
            ColorScheme::Oranges => [
                Rgb(255, 245, 235),
                Rgb(254, 230, 206),
                Rgb(253, 208, 162),
                Rgb(253, 174, 107),
                Rgb(253, 141, 60),
                Rgb(241, 105, 19),
                Rgb(217, 72, 1),
                Rgb(166, 54, 3),
                Rgb(127, 39, 4),
            ],
            ColorScheme::Blues => [
                Rgb(247, 251, 255),
                Rgb(222, 235, 247),
                Rgb(198, 219, 239),
                Rgb(158, 202, 225),
                Rgb(107, 174, 214),
                Rgb(66, 146, 198),
                Rgb(33, 113, 181),
                Rgb(8, 81, 156),
                Rgb(8, 48, 107),
            ],
        }
    }

    /// Color at fraction `t` of the ramp; `t` is clamped to `[0, 1]`.
    pub fn interpolate(&self, t: f64) -> Rgb {
        let colors = self.colors();
        let channel = |pick: fn(&Rgb) -> u8| {
            let values: Vec<f64> = colors.iter().map(|c| pick(c) as f64).collect();
            to_channel(basis_spline(&values, t))
        };
        Rgb(
            channel(|c: &Rgb| c.0),
            channel(|c: &Rgb| c.1),
            channel(|c: &Rgb| c.2),
        )
    }
}

fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// Uniform cubic B-spline through `values`, with the end segments extended
/// by reflection so the curve starts and ends on the first and last value.
fn basis_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (t, i) = if t <= 0.0 || t.is_nan() {
        (0.0, 0)
    } else if t >= 1.0 {
        (1.0, n - 1)
    } else {
        (t, (t * n as f64).floor() as usize)
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };
    basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
}

/// Maps a value range onto a color scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    pub domain: ValueRange,
    pub scheme: ColorScheme,
}

impl SequentialScale {
    pub fn new(domain: ValueRange, scheme: ColorScheme) -> Self {
        SequentialScale { domain, scheme }
    }

    /// Position of `value` in the domain; a collapsed domain maps to 0.5.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.domain.span();
        if span == 0.0 {
            0.5
        } else {
            (value - self.domain.min) / span
        }
    }

    /// Color for `value`, `None` when the value is not a number.
    pub fn color(&self, value: f64) -> Option<Rgb> {
        if !value.is_finite() {
            return None;
        }
        Some(self.scheme.interpolate(self.normalize(value)))
    }
}
