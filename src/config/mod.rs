// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod chart;
mod general;
mod series;

pub use self::chart::{Chart, MAX_PIXELS};
pub use self::general::General;
pub use self::series::{Colour, Columns, LineStyle, Marker, Series};

use crate::render::Format;

use std::io::Read;
use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use log::Level;
use serde_derive::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    chart: Chart,
    #[serde(default)]
    columns: Columns,
    #[serde(default = "series::default_series")]
    series: Vec<Series>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            general: Default::default(),
            chart: Default::default(),
            columns: Default::default(),
            series: series::default_series(),
        }
    }
}

fn app() -> App<'static, 'static> {
    App::new(NAME)
        .version(VERSION)
        .author("Brian Martin <bmartin@twitter.com>")
        .about("Plot benchmark timings against input size on log-log axes")
        .arg(
            Arg::with_name("input")
                .value_name("CSV")
                .help("Benchmark results with a size column and timing columns")
                .index(1),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("STEM")
                .help("Output path without extension")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output format, may be given more than once")
                .possible_value("png")
                .possible_value("pdf")
                .multiple(true)
                .number_of_values(1)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dpi")
                .long("dpi")
                .value_name("DPI")
                .help("Resolution of the PNG output")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("Inches")
                .help("Figure width")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("Inches")
                .help("Figure height")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("title")
                .long("title")
                .value_name("TEXT")
                .help("Chart title")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no-grid")
                .long("no-grid")
                .help("Do not draw grid lines"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Config {
        let config = Self::from_matches(&app().get_matches());
        if let Err(e) = config.validate() {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
        config
    }

    /// builtin or file based config with command line overrides applied
    pub fn from_matches(matches: &ArgMatches) -> Config {
        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)
        } else {
            Default::default()
        };

        if let Some(input) = matches.value_of("input") {
            config.general.set_input(input.to_string());
        }

        if let Some(output) = matches.value_of("output") {
            config.general.set_output(output.to_string());
        }

        if let Some(formats) = matches.values_of("format") {
            let mut parsed: Vec<Format> = Vec::new();
            for format in formats {
                let format = format.parse().unwrap_or_else(|e| {
                    eprintln!("ERROR: {}", e);
                    process::exit(1);
                });
                if !parsed.contains(&format) {
                    parsed.push(format);
                }
            }
            config.general.set_formats(parsed);
        }

        if let Some(dpi) = parse_numeric_arg(matches, "dpi") {
            config.chart.set_dpi(dpi);
        }

        if let Some(width) = parse_float_arg(matches, "width") {
            config.chart.set_width(width);
        }

        if let Some(height) = parse_float_arg(matches, "height") {
            config.chart.set_height(height);
        }

        if let Some(title) = matches.value_of("title") {
            config.chart.set_title(title.to_string());
        }

        if matches.is_present("no-grid") {
            config.chart.set_grid(false);
        }

        let base = config.general.logging();
        config
            .general
            .set_logging(match (base, matches.occurrences_of("verbose")) {
                (level, 0) => level,
                (Level::Error, 1) | (Level::Warn, 1) | (Level::Info, 1) => Level::Debug,
                _ => Level::Trace,
            });

        config
    }

    pub fn load_from_str(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    fn load_from_file(filename: &str) -> Config {
        let mut content = String::new();
        if let Err(e) =
            std::fs::File::open(filename).and_then(|mut file| file.read_to_string(&mut content))
        {
            eprintln!("ERROR: failed to read config: {}: {}", filename, e);
            process::exit(1);
        }
        match Config::load_from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: failed to parse TOML config: {}", filename);
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }

    /// reject settings that cannot produce a chart
    pub fn validate(&self) -> Result<(), String> {
        if self.chart.dpi() == 0 {
            return Err("dpi must be greater than zero".to_string());
        }
        let (width, height) = (self.chart.width(), self.chart.height());
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err("figure width and height must be finite and greater than zero".to_string());
        }
        let (width_px, height_px) = self.chart.pixels();
        if width_px == 0 || height_px == 0 {
            return Err(format!(
                "figure of {}x{} in is smaller than one pixel at {} dpi",
                width,
                height,
                self.chart.dpi()
            ));
        }
        if width_px > MAX_PIXELS || height_px > MAX_PIXELS {
            return Err(format!(
                "figure of {}x{} px exceeds the {} px limit",
                width_px, height_px, MAX_PIXELS
            ));
        }
        if self.series.is_empty() {
            return Err("at least one series is required".to_string());
        }
        if self.general.formats().is_empty() {
            return Err("at least one output format is required".to_string());
        }
        Ok(())
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// column names of all series, in plotting order
    pub fn series_columns(&self) -> Vec<String> {
        self.series.iter().map(|s| s.column().to_string()).collect()
    }

    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    pub fn print(&self) {
        info!("-----");
        info!("Config: Input: {}", self.general.input());
        info!(
            "Config: Output: {} Formats: {}",
            self.general.output(),
            self.general
                .formats()
                .iter()
                .map(|f| f.extension())
                .collect::<Vec<_>>()
                .join(",")
        );
        info!(
            "Config: Figure: {}x{} in @ {} dpi Grid: {}",
            self.chart.width(),
            self.chart.height(),
            self.chart.dpi(),
            self.chart.grid()
        );
        info!("Config: X: {}", self.columns.x());
        for (i, series) in self.series.iter().enumerate() {
            info!(
                "Config: Series {}: {} Colour: {} Line: {:?} Marker: {:?}",
                i,
                series.column(),
                series.colour(i),
                series.line(),
                series.marker()
            );
        }
        info!("-----");
    }
}

/// a helper function to parse a numeric argument by name from `ArgMatches`
fn parse_numeric_arg<T: FromStr>(matches: &ArgMatches, key: &str) -> Option<T> {
    matches.value_of(key).map(|f| {
        f.parse().unwrap_or_else(|_| {
            eprintln!("ERROR: could not parse {}", key);
            process::exit(1);
        })
    })
}

/// a helper function to parse a floating point argument by name from `ArgMatches`
fn parse_float_arg(matches: &ArgMatches, key: &str) -> Option<f64> {
    matches.value_of(key).map(|f| {
        f.parse().unwrap_or_else(|_| {
            eprintln!("ERROR: could not parse {}", key);
            process::exit(1);
        })
    })
}
