// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A plotters drawing backend which records vector operations on a single
//! PDF page, so the chart code can target PDF exactly as it targets a bitmap.

use std::convert::Infallible;
use std::io::{BufWriter, Write};

use plotters::drawing::IntoDrawingArea;
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    calculate_points_for_circle, Color, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Polygon, Pt, Rgb, TextMatrix,
};

use crate::chart;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Error;

/// Backend coordinates are integers, so each PDF point is subdivided to keep
/// thin strokes and small markers from snapping to whole points.
pub const UNITS_PER_POINT: f64 = 4.0;

const POINTS_PER_INCH: f64 = 72.0;

// Noto Sans: units per em over ascent minus descent. plotters sizes text by
// the ascent to descent height while PDF font sizes are in ems.
const EM_PER_SIZE: f64 = 2048.0 / 2789.0;

/// Render the chart as a one page PDF with the font embedded.
pub fn render<W: Write>(dataset: &Dataset, config: &Config, writer: W) -> Result<(), Error> {
    let chart = config.chart();
    let width = chart.width() * POINTS_PER_INCH;
    let height = chart.height() * POINTS_PER_INCH;

    let (doc, page, layer) = PdfDocument::new(
        chart.title(),
        Mm::from(Pt(width as f32)),
        Mm::from(Pt(height as f32)),
        "chart",
    );
    let font = doc.add_external_font(notosans::REGULAR_TTF)?;

    {
        let backend = PdfBackend::new(doc.get_page(page).get_layer(layer), font, (width, height));
        let root = backend.into_drawing_area();
        chart::draw(&root, dataset, config, UNITS_PER_POINT)?;
        root.present()?;
    }

    debug!("pdf page: {}x{} pt", width, height);
    doc.save(&mut BufWriter::new(writer))?;
    Ok(())
}

pub struct PdfBackend {
    layer: PdfLayerReference,
    font: IndirectFontRef,
    size: (u32, u32),
}

impl PdfBackend {
    /// `size` is the page size in points.
    pub fn new(layer: PdfLayerReference, font: IndirectFontRef, size: (f64, f64)) -> Self {
        Self {
            layer,
            font,
            size: (
                (size.0 * UNITS_PER_POINT).round() as u32,
                (size.1 * UNITS_PER_POINT).round() as u32,
            ),
        }
    }

    /// Backend coordinates grow down from the top left, PDF coordinates grow
    /// up from the bottom left.
    fn point(&self, (x, y): BackendCoord) -> Point {
        Point {
            x: Pt((x as f64 / UNITS_PER_POINT) as f32),
            y: Pt(((self.size.1 as i32 - y) as f64 / UNITS_PER_POINT) as f32),
        }
    }

    fn stroke<S: BackendStyle>(&self, style: &S) {
        self.layer.set_outline_color(colour(style.color()));
        self.layer
            .set_outline_thickness((style.stroke_width() as f64 / UNITS_PER_POINT) as f32);
    }

    fn polygon(&self, points: Vec<Point>, mode: PaintMode) {
        self.layer.add_polygon(Polygon {
            rings: vec![points.into_iter().map(|p| (p, false)).collect()],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }
}

// alpha is approximated by blending against the white page
fn colour(colour: BackendColor) -> Color {
    let alpha = colour.alpha.max(0.0).min(1.0);
    let channel = |c: u8| ((c as f64 * alpha + 255.0 * (1.0 - alpha)) / 255.0) as f32;
    let (r, g, b) = colour.rgb;
    Color::Rgb(Rgb::new(channel(r), channel(g), channel(b), None))
}

impl DrawingBackend for PdfBackend {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if color.alpha == 0.0 {
            return Ok(());
        }
        self.layer.set_fill_color(colour(color));
        let (x, y) = point;
        self.polygon(
            vec![
                self.point((x, y)),
                self.point((x + 1, y)),
                self.point((x + 1, y + 1)),
                self.point((x, y + 1)),
            ],
            PaintMode::Fill,
        );
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.draw_path(vec![from, to], style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let (left, top) = upper_left;
        let (right, bottom) = bottom_right;
        let corners = vec![
            self.point((left, top)),
            self.point((right, top)),
            self.point((right, bottom)),
            self.point((left, bottom)),
        ];
        if fill {
            self.layer.set_fill_color(colour(style.color()));
            self.polygon(corners, PaintMode::Fill);
        } else {
            self.stroke(style);
            self.polygon(corners, PaintMode::Stroke);
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let points: Vec<(Point, bool)> = path
            .into_iter()
            .map(|coord| (self.point(coord), false))
            .collect();
        if points.len() < 2 {
            return Ok(());
        }
        self.stroke(style);
        self.layer.add_line(Line {
            points,
            is_closed: false,
        });
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let centre = self.point(center);
        let radius = Pt((radius as f64 / UNITS_PER_POINT) as f32);
        let points = calculate_points_for_circle(radius, centre.x, centre.y);
        let mode = if fill {
            self.layer.set_fill_color(colour(style.color()));
            PaintMode::Fill
        } else {
            self.stroke(style);
            PaintMode::Stroke
        };
        self.layer.add_polygon(Polygon {
            rings: vec![points],
            mode,
            winding_order: WindingOrder::NonZero,
        });
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let points: Vec<Point> = vert.into_iter().map(|coord| self.point(coord)).collect();
        if points.len() < 3 {
            return Ok(());
        }
        self.layer.set_fill_color(colour(style.color()));
        self.polygon(points, PaintMode::Fill);
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 || text.is_empty() {
            return Ok(());
        }

        // place the baseline where the raster font renderer puts it, half
        // the text size below the top of the layout box
        let ((min_x, min_y), (max_x, max_y)) = style
            .layout_box(text)
            .map_err(|e| DrawingErrorKind::FontError(Box::new(e)))?;
        let width = max_x - min_x;
        let height = max_y - min_y;
        let dx = match style.anchor().h_pos {
            HPos::Left => 0,
            HPos::Right => -width,
            HPos::Center => -width / 2,
        };
        let dy = match style.anchor().v_pos {
            VPos::Top => 0,
            VPos::Center => -height / 2,
            VPos::Bottom => -height,
        };
        let baseline = (style.size() / 2.0).round() as i32;
        let transform = style.transform();
        let (x, y) = transform.transform(dx - min_x, dy - min_y + baseline);
        let origin = self.point((pos.0 + x, pos.1 + y));

        let angle = match transform {
            FontTransform::None => 0.0,
            FontTransform::Rotate90 => 270.0,
            FontTransform::Rotate180 => 180.0,
            FontTransform::Rotate270 => 90.0,
        };
        let font_size = (style.size() * EM_PER_SIZE / UNITS_PER_POINT) as f32;

        self.layer.begin_text_section();
        self.layer.set_fill_color(colour(color));
        self.layer.set_font(&self.font, font_size);
        self.layer
            .set_text_matrix(TextMatrix::TranslateRotate(origin.x, origin.y, angle));
        self.layer.write_text(text, &self.font);
        self.layer.end_text_section();
        Ok(())
    }
}
