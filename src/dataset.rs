// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::Error;

/// One timing column, aligned index for index with the sizes.
#[derive(Clone, Debug)]
pub struct Series {
    column: String,
    values: Vec<f64>,
}

impl Series {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Benchmark results: a size column and any number of timing columns, in
/// file order.
#[derive(Clone, Debug)]
pub struct Dataset {
    x: String,
    sizes: Vec<f64>,
    series: Vec<Series>,
}

impl Dataset {
    /// Read the named columns from the CSV file at `path`.
    pub fn load<P: AsRef<Path>>(path: P, x: &str, columns: &[String]) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        debug!("reading benchmark results from: {}", path.display());
        Self::from_reader(file, x, columns)
    }

    /// Read the named columns from CSV text. The first row is the header and
    /// any column not asked for is ignored.
    pub fn from_reader<R: Read>(reader: R, x: &str, columns: &[String]) -> Result<Self, Error> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = reader.headers()?.clone();
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        let x_index = find(x)?;
        let indices = columns
            .iter()
            .map(|c| find(c))
            .collect::<Result<Vec<usize>, Error>>()?;

        let mut sizes = Vec::new();
        let mut values = vec![Vec::new(); columns.len()];
        for record in reader.records() {
            let record = record?;
            sizes.push(parse_cell(&record, x_index, x)?);
            for ((index, column), values) in indices.iter().zip(columns).zip(values.iter_mut()) {
                values.push(parse_cell(&record, *index, column)?);
            }
        }

        if sizes.is_empty() {
            return Err(Error::Empty);
        }
        trace!("read {} rows of {} series", sizes.len(), columns.len());

        Ok(Self {
            x: x.to_string(),
            sizes,
            series: columns
                .iter()
                .zip(values)
                .map(|(column, values)| Series {
                    column: column.clone(),
                    values,
                })
                .collect(),
        })
    }

    /// number of rows
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// name of the size column
    pub fn x(&self) -> &str {
        &self.x
    }

    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// `(size, value)` pairs for one series, in file order.
    pub fn points(&self, index: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        let values = self.series.get(index).map(|s| s.values()).unwrap_or(&[]);
        self.sizes.iter().copied().zip(values.iter().copied())
    }

    /// Like `points` but only pairs a logarithmic axis can show. Every pair
    /// dropped is logged.
    pub fn plottable_points(&self, index: usize) -> Vec<(f64, f64)> {
        let column = self.series.get(index).map(|s| s.column()).unwrap_or("");
        self.points(index)
            .filter(|(x, y)| {
                let keep = plottable(*x, *y);
                if !keep {
                    warn!(
                        "skipping point ({}, {}) of '{}': not positive",
                        x, y, column
                    );
                }
                keep
            })
            .collect()
    }

    /// smallest and largest plottable size
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.all_plottable().map(|(x, _)| x))
    }

    /// smallest and largest plottable time across every series
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        extent(self.all_plottable().map(|(_, y)| y))
    }

    fn all_plottable(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..self.series.len())
            .flat_map(move |i| self.points(i))
            .filter(|(x, y)| plottable(*x, *y))
    }
}

fn plottable(x: f64, y: f64) -> bool {
    x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0
}

fn extent<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn parse_cell(record: &StringRecord, index: usize, column: &str) -> Result<f64, Error> {
    let text = record.get(index).unwrap_or("");
    text.parse().map_err(|_| Error::InvalidValue {
        line: record.position().map(|p| p.line()).unwrap_or(0),
        column: column.to_string(),
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = "\
Size,Vectorized Time (ms),Parallelized Time (ms)
64,0.12,0.30
128,0.95,0.41
256,7.6,1.9
512,61.0,9.8
";

    fn columns() -> Vec<String> {
        vec![
            "Vectorized Time (ms)".to_string(),
            "Parallelized Time (ms)".to_string(),
        ]
    }

    fn read(csv: &str) -> Result<Dataset, Error> {
        Dataset::from_reader(csv.as_bytes(), "Size", &columns())
    }

    #[test]
    fn read_results() {
        let dataset = read(RESULTS).unwrap();
        assert_eq!(dataset.len(), 4);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.x(), "Size");
        assert_eq!(dataset.sizes(), &[64.0, 128.0, 256.0, 512.0]);
        assert_eq!(dataset.series().len(), 2);
        assert_eq!(dataset.series()[1].column(), "Parallelized Time (ms)");
        assert_eq!(dataset.series()[1].values(), &[0.30, 0.41, 1.9, 9.8]);
        let points: Vec<_> = dataset.points(0).collect();
        assert_eq!(points[2], (256.0, 7.6));
    }

    #[test]
    fn whitespace_and_extra_columns() {
        let csv = "Run, Size , Vectorized Time (ms) ,Parallelized Time (ms)\n\
                   a, 10 , 1.5 , 2.5\n";
        let dataset = read(csv).unwrap();
        assert_eq!(dataset.sizes(), &[10.0]);
        assert_eq!(dataset.series()[0].values(), &[1.5]);
    }

    #[test]
    fn missing_column() {
        let csv = "Size,Vectorized Time (ms)\n1,2\n";
        match read(csv) {
            Err(Error::MissingColumn(column)) => assert_eq!(column, "Parallelized Time (ms)"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn invalid_value_names_line() {
        let csv = "Size,Vectorized Time (ms),Parallelized Time (ms)\n1,2,3\n4,fast,6\n";
        match read(csv) {
            Err(Error::InvalidValue {
                line,
                column,
                value,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "Vectorized Time (ms)");
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn ragged_row() {
        let csv = "Size,Vectorized Time (ms),Parallelized Time (ms)\n1,2\n";
        assert!(matches!(read(csv), Err(Error::Csv(_))));
    }

    #[test]
    fn header_only() {
        let csv = "Size,Vectorized Time (ms),Parallelized Time (ms)\n";
        assert!(matches!(read(csv), Err(Error::Empty)));
    }

    #[test]
    fn missing_file() {
        let result = Dataset::load("/nonexistent/results.csv", "Size", &columns());
        match result {
            Err(e @ Error::Io { .. }) => assert!(e.to_string().contains("/nonexistent/results.csv")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn skip_unplottable_points() {
        let csv = "Size,Vectorized Time (ms),Parallelized Time (ms)\n\
                   0,1,1\n\
                   2,-1,4\n\
                   8,NaN,16\n";
        let dataset = read(csv).unwrap();
        assert_eq!(dataset.len(), 3);
        assert!(dataset.plottable_points(0).is_empty());
        assert_eq!(dataset.plottable_points(1), vec![(2.0, 4.0), (8.0, 16.0)]);
        assert_eq!(dataset.x_extent(), Some((2.0, 8.0)));
        assert_eq!(dataset.y_extent(), Some((4.0, 16.0)));
    }

    #[test]
    fn extents_span_all_series() {
        let dataset = read(RESULTS).unwrap();
        assert_eq!(dataset.x_extent(), Some((64.0, 512.0)));
        assert_eq!(dataset.y_extent(), Some((0.12, 61.0)));
    }

    #[test]
    fn nothing_plottable() {
        let csv = "Size,Vectorized Time (ms),Parallelized Time (ms)\n-1,1,1\n";
        let dataset = read(csv).unwrap();
        assert_eq!(dataset.x_extent(), None);
        assert_eq!(dataset.y_extent(), None);
    }
}
