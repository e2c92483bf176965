//! `timewheel`: replay pointer gestures on a time-range wheel and render it.

mod cli;
mod replay;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Args;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting timewheel");

    let args = Args::parse();
    match replay::run(&args) {
        Ok(session) => match serde_json::to_string_pretty(&session) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("failed to encode result: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
