// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod pdf;
pub mod png;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use plotters::style::{register_font, FontStyle};
use serde_derive::*;

use crate::chart::FONT;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Png,
    Pdf,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Pdf => "pdf",
        }
    }

    /// `stem` with this format's extension appended
    pub fn path(&self, stem: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", stem, self.extension()))
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Format::Png),
            "pdf" => Ok(Format::Pdf),
            _ => Err(format!("unknown output format: '{}'", s)),
        }
    }
}

static FONTS: Once = Once::new();
static FONTS_FAILED: AtomicBool = AtomicBool::new(false);

/// Make the bundled face available to plotters under the family the chart
/// uses. Safe to call any number of times; a failed registration is reported
/// on every call.
pub fn register_fonts() -> Result<(), Error> {
    register_once(
        &FONTS,
        &FONTS_FAILED,
        notosans::REGULAR_TTF,
        notosans::BOLD_TTF,
    )
}

fn register_once(
    once: &Once,
    failed: &AtomicBool,
    regular: &'static [u8],
    bold: &'static [u8],
) -> Result<(), Error> {
    once.call_once(|| {
        let registered = register_font(FONT, FontStyle::Normal, regular)
            .and_then(|_| register_font(FONT, FontStyle::Bold, bold));
        if registered.is_err() {
            error!("failed to register the bundled font");
            failed.store(true, Ordering::Release);
        }
    });
    if failed.load(Ordering::Acquire) {
        Err(Error::Font)
    } else {
        Ok(())
    }
}

/// Write the chart in every configured format next to the output stem and
/// return the paths written. Every format is rendered in memory first, so a
/// drawing or encoding failure leaves nothing on disk.
pub fn render(dataset: &Dataset, config: &Config) -> Result<Vec<PathBuf>, Error> {
    register_fonts()?;

    if dataset.x_extent().is_none() {
        return Err(Error::NoPlottableData);
    }

    let stem = config.general().output();
    let mut rendered = Vec::new();
    for format in config.general().formats() {
        let mut bytes = Vec::new();
        match format {
            Format::Png => self::png::render(dataset, config, &mut bytes)?,
            Format::Pdf => pdf::render(dataset, config, &mut bytes)?,
        }
        trace!("rendered {}: {} bytes", format.extension(), bytes.len());
        rendered.push((format.path(stem), bytes));
    }

    if let Some(parent) = Path::new(stem).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("creating output directory: {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    let mut written = Vec::new();
    for (path, bytes) in rendered {
        fs::write(&path, &bytes).map_err(|e| Error::io(&path, e))?;
        debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
