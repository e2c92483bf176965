//! Build a wheel from the command line, replay gestures, render the result.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;
use timewheel_core::time::{SEGMENT_ANGLE, segment_to_angle, time_string_to_segment};
use timewheel_core::{PointerEvent, TimeRangeInfo, TimeRangeWheel, WheelConfig, WheelError};
use timewheel_render::{RenderContext, RendererError, SvgRenderer};

use crate::cli::{Args, DragCommand};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid events file: {0}")]
    Events(#[from] serde_json::Error),
    #[error(transparent)]
    Wheel(#[from] WheelError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Drag of {0} was not accepted")]
    DragRejected(String),
}

pub type CliResult<T> = Result<T, CliError>;

/// Everything reported while replaying, printed as JSON.
#[derive(Debug, Serialize)]
pub struct Session {
    /// Every range reported, starting with the initial one.
    pub changes: Vec<TimeRangeInfo>,
    /// The range after the last gesture.
    pub result: TimeRangeInfo,
}

fn read(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the configuration file (if any) and apply `--start` / `--end`.
pub fn load_config(args: &Args) -> CliResult<WheelConfig> {
    let mut config = match &args.config {
        Some(path) => WheelConfig::from_json(&read(path)?)?,
        None => WheelConfig::default(),
    };
    if let Some(start) = &args.start {
        config.data.start.clone_from(start);
    }
    if let Some(end) = &args.end {
        config.data.end.clone_from(end);
    }
    Ok(config)
}

/// Load a JSON array of pointer events.
pub fn load_events(path: &Path) -> CliResult<Vec<PointerEvent>> {
    Ok(serde_json::from_str(&read(path)?)?)
}

/// Drag a handle along the track until it reaches `drag.time`.
///
/// The pointer is released in the middle of the target segment so the
/// snap lands on its lower boundary.
pub fn replay_drag(wheel: &mut TimeRangeWheel, drag: &DragCommand) -> CliResult<()> {
    if !wheel.begin_drag(drag.label) {
        return Err(CliError::DragRejected(drag.label.to_string()));
    }
    let target = segment_to_angle(time_string_to_segment(&drag.time).map_err(WheelError::from)?);
    let position = wheel.geometry().handle_center(target + SEGMENT_ANGLE / 2.0);
    wheel.pointer_move(position)?;
    wheel.pointer_up();
    Ok(())
}

/// Run a full session for `args`.
pub fn run(args: &Args) -> CliResult<Session> {
    let config = load_config(args)?;
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let mut wheel = TimeRangeWheel::with_listener(config, move |info: &TimeRangeInfo| {
        sink.borrow_mut().push(info.clone());
    })?;

    if let Some(path) = &args.events {
        let events = load_events(path)?;
        log::debug!("replaying {} pointer events", events.len());
        for event in events {
            wheel.handle_pointer_event(event)?;
        }
    }
    for drag in &args.drags {
        replay_drag(&mut wheel, drag)?;
    }

    if let Some(path) = &args.output {
        let svg = SvgRenderer::render(&RenderContext::new(&wheel)?)?;
        fs::write(path, svg).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("Wrote {}", path.display());
    }

    let result = wheel.time_info().clone();
    let changes = changes.borrow().clone();
    Ok(Session { changes, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["timewheel"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_without_config() {
        let session = run(&args(&[])).unwrap();
        assert_eq!(session.changes.len(), 1);
        assert_eq!(session.result.start, "00:00");
        assert_eq!(session.result.duration, "00:00");
    }

    #[test]
    fn test_config_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data": {{ "start": "08:00", "end": "17:00" }} }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let session = run(&args(&["--config", &path])).unwrap();
        assert_eq!(session.result.duration, "09:00");

        let session = run(&args(&["--config", &path, "--end", "20:00"])).unwrap();
        assert_eq!(session.result.end, "20:00");
        assert_eq!(session.result.duration, "12:00");
    }

    #[test]
    fn test_missing_config_file() {
        let result = run(&args(&["--config", "/nonexistent/timewheel.json"]));
        assert!(matches!(result, Err(CliError::Io { .. })));
    }

    #[test]
    fn test_bad_start_time() {
        let result = run(&args(&["--start", "7pm"]));
        assert!(matches!(result, Err(CliError::Wheel(WheelError::Parse(_)))));
    }

    #[test]
    fn test_scripted_drags() {
        let session = run(&args(&[
            "--start", "08:00", "--end", "17:00", "--drag", "start=22:00", "--drag", "end=02:00",
        ]))
        .unwrap();
        assert_eq!(session.changes.len(), 3);
        assert_eq!(session.result.start, "22:00");
        assert_eq!(session.result.end, "02:00");
        assert_eq!(session.result.duration, "04:00");
    }

    #[test]
    fn test_drag_to_current_time_reports_nothing() {
        let session =
            run(&args(&["--start", "08:00", "--end", "17:00", "--drag", "end=17:00"])).unwrap();
        assert_eq!(session.changes.len(), 1);
    }

    #[test]
    fn test_events_file() {
        // default geometry: center (160, 160), track radius 100
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "type": "down", "position": {{ "x": 160.0, "y": 60.0 }} }},
                {{ "type": "move", "position": {{ "x": 260.0, "y": 161.0 }} }},
                {{ "type": "up" }}
            ]"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let session =
            run(&args(&["--start", "00:00", "--end", "12:00", "--events", &path])).unwrap();
        assert_eq!(session.result.start, "06:00");
        assert_eq!(session.result.duration, "06:00");
    }

    #[test]
    fn test_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("wheel.svg");
        let out_str = out.to_str().unwrap().to_string();
        run(&args(&["--start", "08:00", "--end", "17:00", "-o", &out_str])).unwrap();
        let svg = fs::read_to_string(&out).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("arcindicator"));
    }
}
