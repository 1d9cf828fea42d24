// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod app;
mod cli;
mod config;
mod error;
mod export;
mod ui;

use clap::Parser;
use log::info;

use app::AnalyzerApp;
use cli::Args;
use config::AppConfig;
use error::AppError;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = AppConfig::load_or_default(args.config.as_deref());
    if let Ok(path) = AppConfig::get_config_path() {
        info!("Config file: {}", path.display());
    }

    if args.is_headless() {
        return cli::run_headless(&args, &config);
    }

    info!("Starting Coverage Analyzer...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("5G Cellular Signal Analyzer"),
        ..Default::default()
    };

    eframe::run_native(
        "Coverage Analyzer",
        options,
        Box::new(move |_cc| Ok(Box::new(AnalyzerApp::new(&config)))),
    )?;

    Ok(())
}
