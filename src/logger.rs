// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A small stdout logger for the `log` facade.
//!
//! Records at `info` and above are tagged with the program label, while
//! `debug` and `trace` records carry their module path so noisy output can be
//! traced back to its source.

use std::fmt;
use std::io::Write;

pub use log::Level;
use log::{Log, Metadata, Record, SetLoggerError};

/// Log the message at error level, flush, and terminate with exit status 1.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        $crate::logger::fatal(format_args!($($arg)*))
    };
}

pub struct Logger {
    label: &'static str,
    level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            label: env!("CARGO_PKG_NAME"),
            level: Level::Info,
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Install as the global logger. Fails if a logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let filter = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self)).map(|()| log::set_max_level(filter))
    }

    fn format(&self, record: &Record) -> String {
        let target = if record.level() >= Level::Debug {
            record.target()
        } else {
            self.label
        };
        format!(
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            target,
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", self.format(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

#[doc(hidden)]
pub fn fatal(args: fmt::Arguments) -> ! {
    error!("{}", args);
    log::logger().flush();
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_records_use_label() {
        let logger = Logger::new().label("bench");
        let line = logger.format(
            &Record::builder()
                .level(Level::Info)
                .target("benchplot::dataset")
                .args(format_args!("loaded {} rows", 3))
                .build(),
        );
        assert!(line.ends_with("INFO  [bench] loaded 3 rows"), "{}", line);
    }

    #[test]
    fn debug_records_use_target() {
        let logger = Logger::new().label("bench");
        let line = logger.format(
            &Record::builder()
                .level(Level::Debug)
                .target("benchplot::dataset")
                .args(format_args!("header parsed"))
                .build(),
        );
        assert!(line.ends_with("DEBUG [benchplot::dataset] header parsed"), "{}", line);
    }

    #[test]
    fn level_gates_records() {
        let logger = Logger::new().level(Level::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }
}
