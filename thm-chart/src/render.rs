//! SVG output for heatmap scenes, and the HTML page holding both views.
//!
//! The visible chart (cells, axis labels, trend lines, legend ticks) is drawn
//! with the plotters SVG backend. Plotters has no gradient fills and no
//! per-element tooltips, so the legend gradient and the `<title>` hit areas
//! over each cell are built as an `svg` document wrapping the plotters drawing.
//! The page switches between the max and min metric with a pair of radio
//! inputs and CSS only; both renderings are present in the document.

use crate::color::Rgb;
use crate::legend::LegendSpec;
use crate::metric::Metric;
use crate::scene::{AxisLabel, Cell, Heatmap, HeatmapScene, LineLegend};
use crate::surface::{draw, ChartSurface};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use svg::node::element::{self as el, Element};
use svg::node::{Blob, Text as TextNode};
use svg::{Document, Node};
use thiserror::Error;

/// Fill for cells whose value is not a number.
pub const NO_DATA_FILL: Rgb = Rgb(217, 217, 217);

const MAX_LINE: RGBColor = RGBColor(178, 24, 43);
const MIN_LINE: RGBColor = RGBColor(33, 102, 172);
const FONT: &str = "sans-serif";

const PAGE_STYLE: &str = "body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;padding:16px}\
.view{margin-bottom:32px}\
.view label{margin-right:12px;font-weight:bold}\
.charts .metric-min{display:none}\
.view input[value=min]:checked~.charts .metric-max{display:none}\
.view input[value=min]:checked~.charts .metric-min{display:block}";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw heatmap: {0}")]
    Plot(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Plot(err.to_string())
    }
}

/// Compact decimal rendering: at most two fractional digits, no trailing zeros.
fn num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", num(x), num(y))
}

fn text_style(size: f64, h: HPos, v: VPos) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font()).pos(Pos::new(h, v))
}

fn title(lines: &[String]) -> Element {
    let mut title = Element::new("title");
    title.append(TextNode::new(lines.join("\n")));
    title
}

fn pixel_size(scene: &HeatmapScene) -> (u32, u32) {
    (
        scene.outer_width().round() as u32,
        scene.outer_height().round() as u32,
    )
}

/// Draws a scene into a plotters SVG buffer and collects the gradient and
/// tooltip layers that go around it.
pub struct SvgSurface<'a> {
    area: DrawingArea<SVGBackend<'a>, Shift>,
    origin: (f64, f64),
    defs: el::Definitions,
    overlay: el::Group,
}

impl<'a> SvgSurface<'a> {
    pub fn new(buffer: &'a mut String, scene: &HeatmapScene) -> Self {
        let area = SVGBackend::with_string(buffer, pixel_size(scene)).into_drawing_area();
        SvgSurface {
            area,
            origin: (scene.margin.left, scene.margin.top),
            defs: el::Definitions::new(),
            overlay: el::Group::new()
                .set("class", "overlay")
                .set("transform", translate(scene.margin.left, scene.margin.top)),
        }
    }

    /// Plot coordinates to backend pixels.
    fn at(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (self.origin.0 + x).round() as i32,
            (self.origin.1 + y).round() as i32,
        )
    }

    fn line(&self, points: Vec<(i32, i32)>, color: RGBColor) -> Result<(), RenderError> {
        self.area
            .draw(&PathElement::new(points, color.stroke_width(1)))?;
        Ok(())
    }

    /// Flush the plotters drawing and hand back the svg layers.
    pub fn into_layers(self) -> Result<(el::Definitions, el::Group), RenderError> {
        self.area.present()?;
        Ok((self.defs, self.overlay))
    }
}

impl ChartSurface for SvgSurface<'_> {
    type Error = RenderError;

    fn begin(&mut self, scene: &HeatmapScene) -> Result<(), RenderError> {
        self.area.fill(&WHITE)?;
        let gradient = &scene.legend.gradient;
        let mut linear = el::LinearGradient::new()
            .set("id", gradient.id.as_str())
            .set("x1", "0%")
            .set("y1", "100%")
            .set("x2", "0%")
            .set("y2", "0%");
        for stop in &gradient.stops {
            linear = linear.add(
                el::Stop::new()
                    .set("offset", format!("{}%", num(stop.offset * 100.0)))
                    .set("stop-color", stop.color.hex()),
            );
        }
        self.defs.append(linear);
        Ok(())
    }

    fn column_label(&mut self, label: &AxisLabel) -> Result<(), RenderError> {
        self.area.draw(&Text::new(
            label.text.clone(),
            self.at(label.position, -8.0),
            text_style(11.0, HPos::Center, VPos::Bottom),
        ))?;
        Ok(())
    }

    fn row_label(&mut self, label: &AxisLabel) -> Result<(), RenderError> {
        self.area.draw(&Text::new(
            label.text.clone(),
            self.at(-8.0, label.position),
            text_style(11.0, HPos::Right, VPos::Center),
        ))?;
        Ok(())
    }

    fn cell(&mut self, cell: &Cell) -> Result<(), RenderError> {
        let fill = rgb(cell.fill.unwrap_or(NO_DATA_FILL));
        self.area.draw(&Rectangle::new(
            [
                self.at(cell.x, cell.y),
                self.at(cell.x + cell.width, cell.y + cell.height),
            ],
            fill.filled(),
        ))?;
        if let Some(trend) = &cell.trend {
            for (segments, color) in [(&trend.max_segments, MAX_LINE), (&trend.min_segments, MIN_LINE)] {
                for segment in segments.iter().filter(|s| s.len() > 1) {
                    let points = segment
                        .iter()
                        .map(|&(x, y)| self.at(cell.x + x, cell.y + y))
                        .collect();
                    self.line(points, color)?;
                }
            }
        }

        let class = if cell.fill.is_some() { "cell" } else { "cell no-data" };
        let hit = el::Rectangle::new()
            .set("class", class)
            .set("width", num(cell.width))
            .set("height", num(cell.height))
            .set("fill", "none")
            .set("pointer-events", "all")
            .add(title(&cell.tooltip));
        if cell.trend.is_some() {
            self.overlay.append(
                el::Group::new()
                    .set("class", "cell-group")
                    .set("transform", translate(cell.x, cell.y))
                    .add(hit),
            );
        } else {
            self.overlay
                .append(hit.set("x", num(cell.x)).set("y", num(cell.y)));
        }
        Ok(())
    }

    fn legend(&mut self, legend: &LegendSpec) -> Result<(), RenderError> {
        self.overlay.append(
            el::Rectangle::new()
                .set("class", "legend-bar")
                .set("x", num(legend.x))
                .set("y", num(legend.y))
                .set("width", num(legend.width))
                .set("height", num(legend.height))
                .set("fill", format!("url(#{})", legend.gradient.id)),
        );
        let edge = legend.x + legend.width;
        let tick_style = text_style(11.0, HPos::Left, VPos::Center);
        for tick in &legend.ticks {
            let y = legend.y + tick.offset;
            self.line(vec![self.at(edge, y), self.at(edge + 6.0, y)], BLACK)?;
            self.area.draw(&Text::new(
                tick.label.clone(),
                self.at(edge + 9.0, y),
                tick_style.clone(),
            ))?;
        }
        self.area.draw(&Text::new(
            legend.title.clone(),
            self.at(legend.x - 10.0, legend.y - 10.0),
            text_style(12.0, HPos::Left, VPos::Bottom),
        ))?;
        Ok(())
    }

    fn line_legend(&mut self, position: &LineLegend) -> Result<(), RenderError> {
        let style = text_style(10.0, HPos::Left, VPos::Center);
        let entries = [("Daily Max Temp", MAX_LINE), ("Daily Min Temp", MIN_LINE)];
        for (row, (label, color)) in entries.into_iter().enumerate() {
            let y = position.y + 10.0 * row as f64;
            self.line(vec![self.at(position.x, y), self.at(position.x + 20.0, y)], color)?;
            self.area
                .draw(&Text::new(label, self.at(position.x + 25.0, y), style.clone()))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Render one scene to an SVG document.
pub fn render_svg(scene: &HeatmapScene) -> Result<String, RenderError> {
    let mut plot = String::new();
    let (defs, overlay) = {
        let mut surface = SvgSurface::new(&mut plot, scene);
        draw(scene, &mut surface)?;
        surface.into_layers()?
    };
    let (width, height) = pixel_size(scene);
    let document = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", width.to_string())
        .set("height", height.to_string())
        .set("viewBox", format!("0 0 {} {}", width, height))
        .set(
            "class",
            format!("heatmap {} metric-{}", scene.view.id(), scene.metric.key()),
        )
        .add(defs)
        .add(Blob::new(plot))
        .add(overlay);
    Ok(document.to_string())
}

/// Render every view, in both metrics, into one HTML page.
pub fn render_page(title: &str, views: &[&Heatmap]) -> Result<String, RenderError> {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", PAGE_STYLE));
    html.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    for heatmap in views {
        let kind = heatmap.kind();
        let id = kind.id();
        html.push_str(&format!("<section class=\"view\" id=\"{}\">\n", id));
        html.push_str(&format!("<h2>{}</h2>\n", escape(kind.title())));
        for metric in Metric::ALL {
            let checked = if metric == Metric::default() { " checked" } else { "" };
            html.push_str(&format!(
                "<input type=\"radio\" name=\"{id}-metric\" id=\"{id}-{key}\" value=\"{key}\"{checked}><label for=\"{id}-{key}\">{label}</label>\n",
                id = id,
                key = metric.key(),
                checked = checked,
                label = metric.toggle_label()
            ));
        }
        html.push_str("<div class=\"charts\">\n");
        for metric in Metric::ALL {
            html.push_str(&format!("<div class=\"metric-{}\">\n", metric.key()));
            html.push_str(&render_svg(&heatmap.scene(metric))?);
            html.push_str("\n</div>\n");
        }
        html.push_str("</div>\n</section>\n");
    }
    html.push_str("</body>\n</html>\n");
    Ok(html)
}
