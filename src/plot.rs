use plotters::coord::{
    cartesian::Cartesian2d,
    types::{RangedCoordf64, RangedCoordu32},
    Shift,
};
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use thousands::Separable;
use tracing::{debug, info};

use crate::chart::{Figure, Line, Marker, Panel, PanelKind, Rgb};
use crate::error::ChartError;

const FONT: &str = "sans-serif";
const PLOT_WIDTH: u32 = 1400;
const PLOT_HEIGHT: u32 = 800;
const MARKER_SIZE: i32 = 5;

/// Something that can show or persist a finished figure.
pub trait FigureSink {
    fn display_or_save(&mut self, figure: &Figure) -> Result<(), ChartError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
            _ => OutputFormat::Svg,
        }
    }
}

/// Writes figures to an image file, picking SVG or PNG from the extension.
pub struct FileSink {
    path: PathBuf,
    format: OutputFormat,
    size: (u32, u32),
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = OutputFormat::from_path(&path);
        Self {
            path,
            format,
            size: (PLOT_WIDTH, PLOT_HEIGHT),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FigureSink for FileSink {
    fn display_or_save(&mut self, figure: &Figure) -> Result<(), ChartError> {
        let result = match self.format {
            OutputFormat::Svg => {
                draw_figure(SVGBackend::new(&self.path, self.size).into_drawing_area(), figure)
            }
            OutputFormat::Png => {
                draw_figure(BitMapBackend::new(&self.path, self.size).into_drawing_area(), figure)
            }
        };
        result.map_err(|e| ChartError::Backend(e.to_string()))?;

        info!(path = %self.path.display(), mix = %figure.mix, "wrote chart");
        Ok(())
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn format_value(kind: PanelKind, v: f64) -> String {
    match kind {
        PanelKind::Throughput => (v.round() as u64).separate_with_commas(),
        PanelKind::Latency => format!("{:.4}", v),
    }
}

/// Upper bounds of the x and y axes, padded so the last point is not drawn
/// on the frame. Padding is dropped where it would overflow.
fn axis_bounds(panel: &Panel) -> (u32, f64) {
    let x = panel.x_max();
    let x_max = x.saturating_add(x / 20).saturating_add(1);

    let y = panel.y_max();
    let y_max = if y <= 0.0 {
        1.0
    } else if (y * 1.1).is_finite() {
        y * 1.1
    } else {
        y
    };

    (x_max, y_max)
}

fn draw_figure<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let body = root.titled(&figure.title, (FONT, 26))?;

    let areas = body.split_evenly((1, figure.panels.len()));
    for (area, panel) in areas.iter().zip(figure.panels.iter()) {
        draw_panel(area, panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (x_max, y_max) = axis_bounds(panel);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(&panel.title, (FONT, 20))
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0u32..x_max, 0f64..y_max)?;

    let kind = panel.kind;
    let x_formatter = |v: &u32| format!("{}", v);
    let y_formatter = move |v: &f64| format_value(kind, *v);

    let mut mesh = chart.configure_mesh();
    if !panel.grid {
        mesh.disable_mesh();
    }
    mesh.x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_labels(10)
        .y_labels(10)
        .x_desc(panel.x_desc.as_str())
        .y_desc(panel.y_desc.as_str())
        .draw()?;

    for line in &panel.lines {
        debug!(
            panel = %panel.title,
            strategy = %line.strategy,
            points = line.points.len(),
            "drawing line"
        );
        let color = rgb(line.style.color);
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(2)))?
            .label(line.style.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });

        draw_markers(&mut chart, line)?;
    }

    if panel.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, 13))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

fn draw_markers<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordu32, RangedCoordf64>>,
    line: &Line,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let style = rgb(line.style.color).filled();
    let points = line.points.iter().copied();

    match line.style.marker {
        Marker::Circle => {
            chart.draw_series(points.map(|p| Circle::new(p, MARKER_SIZE, style)))?;
        }
        Marker::Square => {
            let s = MARKER_SIZE - 1;
            chart.draw_series(
                points.map(|p| EmptyElement::at(p) + Rectangle::new([(-s, -s), (s, s)], style)),
            )?;
        }
        Marker::Triangle => {
            chart.draw_series(points.map(|p| TriangleMarker::new(p, MARKER_SIZE + 1, style)))?;
        }
    }

    Ok(())
}
