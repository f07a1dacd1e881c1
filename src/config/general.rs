// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::render::Format;

use log::Level;
use serde_derive::*;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_input")]
    input: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_formats")]
    formats: Vec<Format>,
    #[serde(with = "LevelDef")]
    #[serde(default = "default_logging_level")]
    logging: Level,
}

impl Default for General {
    fn default() -> General {
        General {
            input: default_input(),
            output: default_output(),
            formats: default_formats(),
            logging: default_logging_level(),
        }
    }
}

impl General {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    /// output path without extension
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn set_output(&mut self, output: String) {
        self.output = output;
    }

    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    pub fn set_formats(&mut self, formats: Vec<Format>) {
        self.formats = formats;
    }

    pub fn logging(&self) -> Level {
        self.logging
    }

    pub fn set_logging(&mut self, level: Level) {
        self.logging = level;
    }
}

fn default_input() -> String {
    "mojo_benchmark_results.csv".to_string()
}

fn default_output() -> String {
    "benchmark_times_log_scale".to_string()
}

fn default_formats() -> Vec<Format> {
    vec![Format::Png, Format::Pdf]
}

#[derive(Deserialize)]
#[serde(remote = "Level")]
#[serde(rename_all = "lowercase")]
#[serde(deny_unknown_fields)]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_logging_level() -> Level {
    Level::Info
}
