// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Plot benchmark timings against input size on log-log axes and save the
//! chart as a high resolution PNG and a vector PDF.

#[macro_use]
extern crate log;

#[macro_use]
pub mod logger;

pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod render;
pub mod scales;

pub use crate::config::Config;
pub use crate::dataset::Dataset;
pub use crate::error::Error;
pub use crate::render::Format;

use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load the configured input and write the chart in every configured format.
pub fn run(config: &Config) -> Result<Vec<PathBuf>, Error> {
    let dataset = Dataset::load(
        config.general().input(),
        config.columns().x(),
        &config.series_columns(),
    )?;
    info!(
        "loaded {} rows of {} series from {}",
        dataset.len(),
        dataset.series().len(),
        config.general().input()
    );
    render::render(&dataset, config)
}
