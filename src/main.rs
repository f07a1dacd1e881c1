// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use benchplot::logger::Logger;
use benchplot::{fatal, Config, VERSION};

pub fn main() {
    let config = Config::new();

    Logger::new()
        .label("benchplot")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("benchplot {} initializing...", VERSION);

    config.print();

    match benchplot::run(&config) {
        Ok(paths) => {
            for path in paths {
                info!("saved {}", path.display());
            }
        }
        Err(e) => fatal!("{}", e),
    }
}
