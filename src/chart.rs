// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Draws the log-log comparison chart on any plotters drawing area.
//!
//! Every size in this module is in typographic points and is converted to
//! backend units with the `points_per_unit` factor given to `draw`, so the
//! raster and vector outputs share one layout.

use plotters::coord::Shift;
use plotters::element::{DashedPathElement, Drawable, PointCollection};
use plotters::prelude::*;
use plotters_backend::{BackendCoord, DrawingErrorKind};

use crate::config::{Config, LineStyle, Marker};
use crate::dataset::Dataset;
use crate::error::Error;
use crate::scales::{format_tick, LogBounds};

/// Font family every text element is drawn with.
pub const FONT: &str = "sans-serif";

const TITLE_SIZE: f64 = 14.0;
const LABEL_SIZE: f64 = 12.0;
const TICK_SIZE: f64 = 10.0;
const LEGEND_SIZE: f64 = 10.0;

const MARGIN: f64 = 12.0;
const X_LABEL_AREA: f64 = 42.0;
const Y_LABEL_AREA: f64 = 60.0;

const LINE_WIDTH: f64 = 1.5;
const MARKER_RADIUS: f64 = 3.0;
const DASH: f64 = 5.5;
const DASH_GAP: f64 = 2.4;

const GRID_WIDTH: f64 = 0.5;
const GRID_DASH: f64 = 1.85;
const GRID_GAP: f64 = 0.8;

const LEGEND_LINE: f64 = 24.0;

#[derive(Copy, Clone)]
struct Scale(f64);

impl Scale {
    /// a length in backend units, never thinner than one unit
    fn units(&self, points: f64) -> i32 {
        (points * self.0).round().max(1.0) as i32
    }

    fn font(&self, points: f64) -> f64 {
        points * self.0
    }
}

/// Resolved drawing parameters for one series.
#[derive(Copy, Clone)]
struct SeriesStyle {
    colour: RGBColor,
    line: LineStyle,
    marker: Marker,
    stroke: u32,
    radius: i32,
    dash: i32,
    gap: i32,
}

impl SeriesStyle {
    fn shape(&self) -> ShapeStyle {
        self.colour.stroke_width(self.stroke)
    }
}

/// Draw the chart for `dataset` onto `root`, filling all of it.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    config: &Config,
    points_per_unit: f64,
) -> Result<(), Error> {
    let (x_min, x_max) = dataset.x_extent().ok_or(Error::NoPlottableData)?;
    let (y_min, y_max) = dataset.y_extent().ok_or(Error::NoPlottableData)?;
    let x_bounds = LogBounds::covering(x_min, x_max);
    let y_bounds = LogBounds::covering(y_min, y_max);
    trace!(
        "axes: x {:?} y {:?}",
        x_bounds.range(),
        y_bounds.range()
    );

    let scale = Scale(points_per_unit);
    let settings = config.chart();

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(settings.title(), (FONT, scale.font(TITLE_SIZE)))
        .margin(scale.units(MARGIN))
        .x_label_area_size(scale.units(X_LABEL_AREA))
        .y_label_area_size(scale.units(Y_LABEL_AREA))
        .build_cartesian_2d(x_bounds.range().log_scale(), y_bounds.range().log_scale())?;

    let tick_format = |v: &f64| format_tick(*v);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(settings.x_label())
        .y_desc(settings.y_label())
        .axis_desc_style((FONT, scale.font(LABEL_SIZE)))
        .label_style((FONT, scale.font(TICK_SIZE)))
        .axis_style(BLACK.stroke_width(scale.units(GRID_WIDTH * 1.6) as u32))
        .x_label_formatter(&tick_format)
        .y_label_formatter(&tick_format)
        .draw()?;

    if settings.grid() {
        let style = BLACK.mix(0.3).stroke_width(scale.units(GRID_WIDTH) as u32);
        let (dash, gap) = (scale.units(GRID_DASH), scale.units(GRID_GAP));
        chart.draw_series(x_bounds.grid_lines().into_iter().map(|x| {
            DashedPathElement::new(
                vec![(x, y_bounds.lower()), (x, y_bounds.upper())],
                dash,
                gap,
                style,
            )
        }))?;
        chart.draw_series(y_bounds.grid_lines().into_iter().map(|y| {
            DashedPathElement::new(
                vec![(x_bounds.lower(), y), (x_bounds.upper(), y)],
                dash,
                gap,
                style,
            )
        }))?;
    }

    let mut plotted = 0;
    for (index, (data, series)) in dataset.series().iter().zip(config.series()).enumerate() {
        let points = dataset.plottable_points(index);
        if points.is_empty() {
            warn!("series '{}' has nothing to plot", data.column());
            continue;
        }
        debug!("plotting {} points of '{}'", points.len(), data.column());
        plotted += 1;

        let style = SeriesStyle {
            colour: series.colour(index).rgb(),
            line: series.line(),
            marker: series.marker(),
            stroke: scale.units(LINE_WIDTH) as u32,
            radius: scale.units(MARKER_RADIUS),
            dash: scale.units(DASH),
            gap: scale.units(DASH_GAP),
        };

        let anno = match style.line {
            LineStyle::Solid => {
                chart.draw_series(LineSeries::new(points.iter().copied(), style.shape()))?
            }
            LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(
                points.clone(),
                style.dash,
                style.gap,
                style.shape(),
            ))?,
        };
        let legend_width = scale.units(LEGEND_LINE);
        anno.label(series.label())
            .legend(move |at| LegendElement::new(at, legend_width, style));

        chart.draw_series(
            points
                .iter()
                .map(|point| MarkerElement::new(*point, style.marker, style.radius, style.shape())),
        )?;
    }

    if plotted == 0 {
        return Err(Error::NoPlottableData);
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .margin(scale.units(MARGIN))
        .legend_area_size(scale.units(LEGEND_LINE * 1.5))
        .label_font((FONT, scale.font(LEGEND_SIZE)))
        .background_style(WHITE.filled())
        .border_style(BLACK.mix(0.3).stroke_width(scale.units(GRID_WIDTH) as u32))
        .draw()?;

    Ok(())
}

fn draw_marker<DB: DrawingBackend>(
    backend: &mut DB,
    (x, y): BackendCoord,
    marker: Marker,
    radius: i32,
    style: &ShapeStyle,
) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
    let style = style.filled();
    match marker {
        Marker::None => Ok(()),
        Marker::Circle => backend.draw_circle((x, y), radius as u32, &style, true),
        Marker::Square => {
            backend.draw_rect((x - radius, y - radius), (x + radius, y + radius), &style, true)
        }
        Marker::Triangle => {
            let half = radius * 6 / 5;
            backend.fill_polygon(
                vec![(x, y - half), (x + half, y + half * 3 / 4), (x - half, y + half * 3 / 4)],
                &style,
            )
        }
    }
}

/// A series marker centred on one data point.
struct MarkerElement<Coord> {
    at: Coord,
    marker: Marker,
    radius: i32,
    style: ShapeStyle,
}

impl<Coord> MarkerElement<Coord> {
    fn new(at: Coord, marker: Marker, radius: i32, style: ShapeStyle) -> Self {
        Self {
            at,
            marker,
            radius,
            style,
        }
    }
}

impl<'a, Coord> PointCollection<'a, Coord> for &'a MarkerElement<Coord> {
    type Point = &'a Coord;
    type IntoIter = std::iter::Once<&'a Coord>;

    fn point_iter(self) -> Self::IntoIter {
        std::iter::once(&self.at)
    }
}

impl<Coord, DB: DrawingBackend> Drawable<DB> for MarkerElement<Coord> {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        mut pos: I,
        backend: &mut DB,
        _: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        match pos.next() {
            Some(at) => draw_marker(backend, at, self.marker, self.radius, &self.style),
            None => Ok(()),
        }
    }
}

/// Line sample with the series marker in its middle, drawn in the legend box.
struct LegendElement {
    at: BackendCoord,
    width: i32,
    style: SeriesStyle,
}

impl LegendElement {
    fn new(at: BackendCoord, width: i32, style: SeriesStyle) -> Self {
        Self { at, width, style }
    }
}

impl<'a> PointCollection<'a, BackendCoord> for &'a LegendElement {
    type Point = &'a BackendCoord;
    type IntoIter = std::iter::Once<&'a BackendCoord>;

    fn point_iter(self) -> Self::IntoIter {
        std::iter::once(&self.at)
    }
}

impl<DB: DrawingBackend> Drawable<DB> for LegendElement {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        mut pos: I,
        backend: &mut DB,
        _: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let (x, y) = match pos.next() {
            Some(at) => at,
            None => return Ok(()),
        };
        let style = self.style.shape();
        let end = x + self.width;
        match self.style.line {
            LineStyle::Solid => backend.draw_line((x, y), (end, y), &style)?,
            LineStyle::Dashed => {
                let mut start = x;
                while start < end {
                    let stop = (start + self.style.dash).min(end);
                    backend.draw_line((start, y), (stop, y), &style)?;
                    start = stop + self.style.gap;
                }
            }
        }
        draw_marker(
            backend,
            (x + self.width / 2, y),
            self.style.marker,
            self.style.radius,
            &style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = "\
Size,Vectorized Time (ms),Parallelized Time (ms)
64,0.12,0.30
128,0.95,0.41
256,7.6,1.9
";

    fn render(csv: &str, config: &Config) -> Result<Vec<u8>, Error> {
        crate::render::register_fonts()?;
        let dataset =
            Dataset::from_reader(csv.as_bytes(), config.columns().x(), &config.series_columns())?;
        let (width, height) = (320, 200);
        let mut buffer = vec![0; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            draw(&root, &dataset, config, 1.0)?;
            root.present()?;
        }
        Ok(buffer)
    }

    fn pixel(buffer: &[u8], width: usize, x: usize, y: usize) -> (u8, u8, u8) {
        let i = (y * width + x) * 3;
        (buffer[i], buffer[i + 1], buffer[i + 2])
    }

    #[test]
    fn background_is_white() {
        let buffer = render(RESULTS, &Config::default()).unwrap();
        assert_eq!(pixel(&buffer, 320, 0, 0), (255, 255, 255));
        assert_eq!(pixel(&buffer, 320, 319, 199), (255, 255, 255));
    }

    #[test]
    fn series_colours_are_drawn() {
        let buffer = render(RESULTS, &Config::default()).unwrap();
        let pixels: Vec<_> = buffer.chunks(3).collect();
        assert!(pixels.iter().any(|p| p == &[0, 0, 255]));
        assert!(pixels.iter().any(|p| p == &[255, 0, 0]));
    }

    #[test]
    fn nothing_plottable() {
        let csv = "Size,Vectorized Time (ms),Parallelized Time (ms)\n0,1,1\n-4,2,2\n";
        assert!(matches!(
            render(csv, &Config::default()),
            Err(Error::NoPlottableData)
        ));
    }

    #[test]
    fn one_empty_series_still_draws() {
        let csv = "Size,Vectorized Time (ms),Parallelized Time (ms)\n8,0,1\n16,-1,2\n";
        let buffer = render(csv, &Config::default()).unwrap();
        let pixels: Vec<_> = buffer.chunks(3).collect();
        assert!(pixels.iter().any(|p| p == &[255, 0, 0]));
    }

    #[test]
    fn single_point() {
        let csv = "Size,Vectorized Time (ms),Parallelized Time (ms)\n100,5,5\n";
        assert!(render(csv, &Config::default()).is_ok());
    }

    #[test]
    fn scale_never_collapses() {
        let scale = Scale(0.01);
        assert_eq!(scale.units(LINE_WIDTH), 1);
        let scale = Scale(300.0 / 72.0);
        assert_eq!(scale.units(MARKER_RADIUS), 13);
    }
}
