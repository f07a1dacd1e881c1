// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading benchmark results or rendering the chart.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column: '{0}'")]
    MissingColumn(String),
    #[error("line {line}: invalid value for '{column}': '{value}'")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
    #[error("no rows after the header")]
    Empty,
    #[error("no series has a point with positive size and time")]
    NoPlottableData,
    #[error("failed to draw chart: {0}")]
    Drawing(String),
    #[error("failed to encode png: {0}")]
    Png(#[from] png::EncodingError),
    #[error("failed to build pdf: {0}")]
    Pdf(#[from] printpdf::Error),
    #[error("bundled font could not be loaded")]
    Font,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

// plotters wraps every backend failure in its own generic error type, so
// drawing errors are flattened to their message at the chart boundary
impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Drawing(e.to_string())
    }
}
