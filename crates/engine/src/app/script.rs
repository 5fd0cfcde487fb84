use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::input::{ActionStates, InputAction, InputEdgeTracker};
use super::scene::InputSnapshot;
use crate::math::Vec2;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("read input script '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse input script '{path}' at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One frame of raw device state, before edge detection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawInputSample {
    pub look: [f32; 2],
    pub scroll: [f32; 2],
    #[serde(rename = "move")]
    pub move_axis: Option<[f32; 2]>,
    pub held: Vec<InputAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputScript {
    pub frames: Vec<RawInputSample>,
}

impl InputScript {
    pub fn from_json_str(raw: &str, origin: &Path) -> Result<Self, ScriptError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize::<_, InputScript>(&mut deserializer).map_err(|error| {
            let field = error.path().to_string();
            ScriptError::Parse {
                path: origin.to_path_buf(),
                field,
                source: error.into_inner(),
            }
        })
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let raw = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, path)
    }
}

/// Produces one snapshot per frame.
pub trait InputSource {
    fn next_snapshot(&mut self) -> InputSnapshot;
}

/// Replays an [`InputScript`]; frames past the end are empty samples.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    frames: Vec<RawInputSample>,
    cursor: usize,
    edges: InputEdgeTracker,
}

impl ScriptedInput {
    pub fn new(script: InputScript) -> Self {
        Self {
            frames: script.frames,
            cursor: 0,
            edges: InputEdgeTracker::new(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_snapshot(&mut self) -> InputSnapshot {
        let sample = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor = self.cursor.saturating_add(1);

        let held = ActionStates::from_held(&sample.held);
        let pressed = self.edges.advance(held);
        InputSnapshot::new(held, pressed)
            .with_look_delta(Vec2::new(sample.look[0], sample.look[1]))
            .with_scroll_delta(Vec2::new(sample.scroll[0], sample.scroll[1]))
            .with_move_axis(sample.move_axis.map(|axis| Vec2::new(axis[0], axis[1])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn script_from_value(value: serde_json::Value) -> Result<InputScript, ScriptError> {
        InputScript::from_json_str(&value.to_string(), Path::new("inline.json"))
    }

    #[test]
    fn held_use_produces_single_press_edge() {
        let script = script_from_value(json!({
            "frames": [
                { "held": ["Use"] },
                { "held": ["Use"] },
                {},
                { "held": ["Use"] }
            ]
        }))
        .expect("script");
        let mut input = ScriptedInput::new(script);
        let presses = (0..4)
            .map(|_| input.next_snapshot().pressed(InputAction::Use))
            .collect::<Vec<_>>();
        assert_eq!(presses, vec![true, false, false, true]);
    }

    #[test]
    fn frames_past_end_are_empty() {
        let script = script_from_value(json!({
            "frames": [{ "look": [3.0, 1.0], "scroll": [0.0, 120.0] }]
        }))
        .expect("script");
        let mut input = ScriptedInput::new(script);
        let first = input.next_snapshot();
        assert_eq!(first.look_delta(), Vec2::new(3.0, 1.0));
        assert_eq!(first.scroll_delta(), Vec2::new(0.0, 120.0));
        let after = input.next_snapshot();
        assert_eq!(after.look_delta(), Vec2::ZERO);
        assert_eq!(after.move_axis(), Vec2::ZERO);
    }

    #[test]
    fn parse_error_reports_field_path() {
        let err = script_from_value(json!({
            "frames": [{}, { "held": ["Jump"] }]
        }))
        .expect_err("err");
        match err {
            ScriptError::Parse { field, .. } => assert!(field.starts_with("frames[1].held")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
