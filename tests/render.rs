// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fs;
use std::path::{Path, PathBuf};

use benchplot::{Config, Error};

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/mojo_benchmark_results.csv"
);

fn config(input: &Path, output: &Path, extra: &str) -> Config {
    let toml = format!(
        "[general]\ninput = {:?}\noutput = {:?}\n\n[chart]\nwidth = 4.0\nheight = 3.0\ndpi = 100\n{}",
        input.display().to_string(),
        output.display().to_string(),
        extra
    );
    Config::load_from_str(&toml).unwrap()
}

#[test]
fn writes_png_and_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("benchmark_times_log_scale");
    let config = config(Path::new(FIXTURE), &stem, "");

    let paths = benchplot::run(&config).unwrap();
    assert_eq!(
        paths,
        vec![
            PathBuf::from(format!("{}.png", stem.display())),
            PathBuf::from(format!("{}.pdf", stem.display())),
        ]
    );
    for path in &paths {
        assert!(fs::metadata(path).unwrap().len() > 0, "{}", path.display());
    }

    let png = fs::read(&paths[0]).unwrap();
    let reader = png::Decoder::new(png.as_slice()).read_info().unwrap();
    let info = reader.info();
    assert_eq!((info.width, info.height), (400, 300));
    let dims = info.pixel_dims.unwrap();
    assert_eq!(dims.xppu, 3937);
    assert_eq!(dims.unit, png::Unit::Meter);

    let pdf = fs::read(&paths[1]).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn creates_output_directories() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("plots").join("nested").join("run");
    let config = config(Path::new(FIXTURE), &stem, "");

    benchplot::run(&config).unwrap();
    assert!(dir.path().join("plots/nested/run.png").exists());
    assert!(dir.path().join("plots/nested/run.pdf").exists());
}

#[test]
fn single_format() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("only");
    let toml = format!(
        "[general]\ninput = {:?}\noutput = {:?}\nformats = [\"pdf\"]\n",
        FIXTURE,
        stem.display().to_string()
    );
    let config = Config::load_from_str(&toml).unwrap();

    let paths = benchplot::run(&config).unwrap();
    assert_eq!(paths.len(), 1);
    assert!(!dir.path().join("only.png").exists());
    assert!(dir.path().join("only.pdf").exists());
}

#[test]
fn missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.csv");
    let config = config(&input, &dir.path().join("out"), "");
    match benchplot::run(&config) {
        Err(Error::Io { path, .. }) => assert_eq!(path, input),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("results.csv");
    fs::write(&input, "Size,Vectorized Time (ms)\n64,0.1\n").unwrap();
    let config = config(&input, &dir.path().join("out"), "");
    match benchplot::run(&config) {
        Err(Error::MissingColumn(column)) => assert_eq!(column, "Parallelized Time (ms)"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn malformed_cell() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("results.csv");
    fs::write(
        &input,
        "Size,Vectorized Time (ms),Parallelized Time (ms)\n64,0.1,0.2\n128,n/a,0.3\n",
    )
    .unwrap();
    let config = config(&input, &dir.path().join("out"), "");
    let err = benchplot::run(&config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 3: invalid value for 'Vectorized Time (ms)': 'n/a'"
    );
}

#[test]
fn custom_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("results.csv");
    fs::write(&input, "N,Naive (ms)\n10,1.0\n100,80.0\n1000,7000.0\n").unwrap();
    let stem = dir.path().join("naive");
    let config = config(
        &input,
        &stem,
        "\n[columns]\nx = \"N\"\n\n[[series]]\ncolumn = \"Naive (ms)\"\nmarker = \"triangle\"\n",
    );

    let paths = benchplot::run(&config).unwrap();
    assert_eq!(paths.len(), 2);
}

#[test]
fn nothing_to_plot() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("results.csv");
    fs::write(
        &input,
        "Size,Vectorized Time (ms),Parallelized Time (ms)\n0,0.1,0.2\n",
    )
    .unwrap();
    let config = config(&input, &dir.path().join("out"), "");
    assert!(matches!(
        benchplot::run(&config),
        Err(Error::NoPlottableData)
    ));
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn failed_render_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("plots").join("tiny");
    let toml = format!(
        "[general]\ninput = {:?}\noutput = {:?}\nformats = [\"pdf\", \"png\"]\n\n[chart]\nwidth = 0.001\n",
        FIXTURE,
        stem.display().to_string()
    );
    let config = Config::load_from_str(&toml).unwrap();
    assert!(config.validate().is_err());

    assert!(benchplot::run(&config).is_err());
    assert!(!dir.path().join("plots/tiny.pdf").exists());
    assert!(!dir.path().join("plots/tiny.png").exists());
    assert!(!dir.path().join("plots").exists());
}
