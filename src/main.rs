// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Binary entry point: logging, CLI parsing, and application launch.

mod app;
mod config;
mod constant;
mod domain;
mod localize;
mod services;
mod ui;

use std::path::PathBuf;

use clap::Parser;

use crate::app::{App, Flags};

/// Command line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "erratum", about = "A friendly mistake notebook for the COSMIC desktop")]
pub struct Args {
    /// Override the data directory (records, stats, and photos).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

fn main() -> cosmic::iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    localize::localize();

    let args = Args::parse();
    let settings = cosmic::app::Settings::default();
    cosmic::app::run::<App>(settings, Flags::Args(args))
}
