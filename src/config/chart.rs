// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_derive::*;

/// Largest raster edge, in pixels, a figure may have.
pub const MAX_PIXELS: u32 = 20_000;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chart {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_x_label")]
    x_label: String,
    #[serde(default = "default_y_label")]
    y_label: String,
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
    #[serde(default = "default_dpi")]
    dpi: u32,
    #[serde(default = "default_grid")]
    grid: bool,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            title: default_title(),
            x_label: default_x_label(),
            y_label: default_y_label(),
            width: default_width(),
            height: default_height(),
            dpi: default_dpi(),
            grid: default_grid(),
        }
    }
}

impl Chart {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// figure width in inches
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// figure height in inches
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    /// resolution of raster output
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn set_dpi(&mut self, dpi: u32) {
        self.dpi = dpi;
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    pub fn set_grid(&mut self, grid: bool) {
        self.grid = grid;
    }

    /// raster size in pixels at the configured resolution
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width * self.dpi as f64).round() as u32,
            (self.height * self.dpi as f64).round() as u32,
        )
    }
}

fn default_title() -> String {
    "Benchmark Times: Vectorized vs Parallelized".to_string()
}

fn default_x_label() -> String {
    "Matrix Size (log scale)".to_string()
}

fn default_y_label() -> String {
    "Time (ms, log scale)".to_string()
}

fn default_width() -> f64 {
    10.0
}

fn default_height() -> f64 {
    6.0
}

fn default_dpi() -> u32 {
    300
}

fn default_grid() -> bool {
    true
}
