// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;
use serde_derive::*;

macro_rules! hexcolour {
    ($colour:literal) => {
        Colour {
            r: (($colour & 0xFF0000) >> 16) as u8,
            g: (($colour & 0x00FF00) >> 8) as u8,
            b: ($colour & 0x0000FF) as u8,
        }
    };
}

/// Fallback colours for series which do not name one.
const PALETTE: &[Colour] = &[
    hexcolour!(0x0000FF),
    hexcolour!(0xFF0000),
    hexcolour!(0x117733),
    hexcolour!(0xDDCC77),
    hexcolour!(0x332288),
    hexcolour!(0x888888),
    hexcolour!(0x88CCEE),
    hexcolour!(0x882255),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl Colour {
    pub fn rgb(&self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }

    pub fn palette(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }
}

impl FromStr for Colour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(format!("bad colour: '{}'", s));
            }
            let value =
                u32::from_str_radix(hex, 16).map_err(|_| format!("bad colour: '{}'", s))?;
            return Ok(Colour {
                r: (value >> 16) as u8,
                g: (value >> 8) as u8,
                b: value as u8,
            });
        }
        match s.to_lowercase().as_str() {
            "black" => Ok(hexcolour!(0x000000)),
            "blue" => Ok(hexcolour!(0x0000FF)),
            "red" => Ok(hexcolour!(0xFF0000)),
            "green" => Ok(hexcolour!(0x008000)),
            "orange" => Ok(hexcolour!(0xFFA500)),
            "purple" => Ok(hexcolour!(0x800080)),
            "gray" | "grey" => Ok(hexcolour!(0x808080)),
            _ => Err(format!("unknown colour: '{}'", s)),
        }
    }
}

impl TryFrom<String> for Colour {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::Solid
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    None,
    Circle,
    Square,
    Triangle,
}

impl Default for Marker {
    fn default() -> Self {
        Marker::Circle
    }
}

/// One timing column to plot against the size column.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Series {
    column: String,
    label: Option<String>,
    colour: Option<Colour>,
    #[serde(default)]
    line: LineStyle,
    #[serde(default)]
    marker: Marker,
}

impl Series {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            label: None,
            colour: None,
            line: LineStyle::default(),
            marker: Marker::default(),
        }
    }

    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// legend text, the column name unless overridden
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.column)
    }

    /// the configured colour, or a palette entry picked by position
    pub fn colour(&self, index: usize) -> Colour {
        self.colour.unwrap_or_else(|| Colour::palette(index))
    }

    pub fn line(&self) -> LineStyle {
        self.line
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }
}

pub(crate) fn default_series() -> Vec<Series> {
    vec![
        Series::new("Vectorized Time (ms)")
            .with_colour(hexcolour!(0x0000FF))
            .with_line(LineStyle::Solid)
            .with_marker(Marker::Circle),
        Series::new("Parallelized Time (ms)")
            .with_colour(hexcolour!(0xFF0000))
            .with_line(LineStyle::Dashed)
            .with_marker(Marker::Square),
    ]
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Columns {
    #[serde(default = "default_x")]
    x: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self { x: default_x() }
    }
}

impl Columns {
    pub fn x(&self) -> &str {
        &self.x
    }
}

fn default_x() -> String {
    "Size".to_string()
}
