// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io::Write;

use plotters::prelude::*;
use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};

use crate::chart;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Error;

const POINTS_PER_INCH: f64 = 72.0;
const METRES_PER_INCH: f64 = 0.0254;

/// Rasterise the chart and write it as an 8-bit RGB PNG tagged with the
/// configured resolution.
pub fn render<W: Write>(dataset: &Dataset, config: &Config, writer: W) -> Result<(), Error> {
    let chart = config.chart();
    let (width, height) = chart.pixels();
    let mut buffer = vec![0; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        chart::draw(&root, dataset, config, chart.dpi() as f64 / POINTS_PER_INCH)?;
        root.present()?;
    }

    debug!("png image: {}x{} px @ {} dpi", width, height, chart.dpi());
    encode(writer, &buffer, (width, height), chart.dpi())
}

fn encode<W: Write>(writer: W, rgb: &[u8], size: (u32, u32), dpi: u32) -> Result<(), Error> {
    let mut encoder = Encoder::new(writer, size.0, size.1);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let ppm = pixels_per_metre(dpi);
    encoder.set_pixel_dims(Some(PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgb)?;
    writer.finish()?;
    Ok(())
}

/// pHYs records resolution per metre
fn pixels_per_metre(dpi: u32) -> u32 {
    (dpi as f64 / METRES_PER_INCH).round() as u32
}
