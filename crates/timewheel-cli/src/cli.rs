//! Command line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use timewheel_core::HandleLabel;
use timewheel_core::time::parse_time;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// JSON configuration file. Missing keys fall back to defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial start time (HH:MM), overrides the configuration.
    #[arg(long)]
    pub start: Option<String>,

    /// Initial end time (HH:MM), overrides the configuration.
    #[arg(long)]
    pub end: Option<String>,

    /// JSON file holding an array of pointer events to replay.
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Drag a handle to a time, e.g. `start=06:30`. Repeatable; applied after `--events`.
    #[arg(long = "drag")]
    pub drags: Vec<DragCommand>,

    /// Write the rendered SVG to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A scripted drag of one handle to a target time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragCommand {
    pub label: HandleLabel,
    pub time: String,
}

impl FromStr for DragCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, time) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=HH:MM, got {s:?}"))?;
        let label = label
            .trim()
            .parse::<HandleLabel>()
            .map_err(|e| e.to_string())?;
        let time = time.trim();
        parse_time(time).map_err(|e| e.to_string())?;
        Ok(Self {
            label,
            time: time.to_string(),
        })
    }
}
