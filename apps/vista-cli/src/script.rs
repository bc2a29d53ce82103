use serde::{Deserialize, Serialize};
use std::path::Path;
use vista_camera::CameraController;
use vista_common::{Clock, ManualClock, TextureMix};
use vista_input::{Action, HeldActions, InputState};

/// Errors from reading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_repeat() -> u32 {
    1
}

/// One scripted step. Presses and releases happen before the frame runs;
/// the frame then repeats `repeat` times with the same held state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub press: Vec<Action>,
    #[serde(default)]
    pub release: Vec<Action>,
    /// Relative mouse movement in pixels.
    #[serde(default)]
    pub mouse: Option<[f32; 2]>,
    /// Absolute cursor position in pixels.
    #[serde(default)]
    pub cursor: Option<[f32; 2]>,
    #[serde(default)]
    pub scroll: Option<f32>,
}

/// A sequence of input frames replayed against a fresh controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub frames: Vec<Frame>,
}

/// Final state after a script has run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub camera: CameraController,
    pub mix: TextureMix,
    pub frames: u64,
    pub elapsed: f64,
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Replay every frame through `camera` on a manual clock starting at zero.
    pub fn run(&self, mut camera: CameraController) -> Outcome {
        let mut input = InputState::new();
        let mut clock = ManualClock::new();
        let mut mix = TextureMix::default();
        let mut frames = 0u64;

        for frame in &self.frames {
            for action in &frame.release {
                input.release(*action);
            }
            for action in &frame.press {
                input.press(*action);
            }
            if let Some([dx, dy]) = frame.mouse {
                camera.apply_mouse_delta(dx, dy);
            }
            if let Some([x, y]) = frame.cursor {
                camera.apply_cursor_position(x, y);
            }
            if let Some(dy) = frame.scroll {
                camera.apply_scroll(dy);
            }

            for _ in 0..frame.repeat.max(1) {
                clock.advance(frame.dt as f64);
                if input.held(Action::MixUp) {
                    mix.adjust(TextureMix::STEP);
                }
                if input.held(Action::MixDown) {
                    mix.adjust(-TextureMix::STEP);
                }
                camera.update(&input, clock.now_seconds(), frame.dt);
                input.end_frame();
                frames += 1;
            }
        }

        tracing::debug!(frames, elapsed = clock.now_seconds(), "script finished");
        Outcome {
            camera,
            mix,
            frames,
            elapsed: clock.now_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_common::PolygonMode;

    fn parse(json: &str) -> Script {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn frame_defaults() {
        let script = parse(r#"{ "frames": [ {} ] }"#);
        let frame = &script.frames[0];
        assert_eq!(frame.repeat, 1);
        assert!((frame.dt - 1.0 / 60.0).abs() < 1e-9);
        assert!(frame.press.is_empty());
    }

    #[test]
    fn walking_forward_for_one_second() {
        let script = parse(
            r#"{ "frames": [
                { "press": ["MoveForward"], "dt": 0.1, "repeat": 10 },
                { "release": ["MoveForward"] }
            ] }"#,
        );
        let outcome = script.run(CameraController::default());
        let z = outcome.camera.position().z;
        assert!((z - 0.5).abs() < 1e-3, "z = {z}");
        assert_eq!(outcome.frames, 11);
    }

    #[test]
    fn toggle_held_across_frames_flips_once() {
        let script = parse(r#"{ "frames": [ { "press": ["TogglePolygonMode"], "repeat": 30 } ] }"#);
        let outcome = script.run(CameraController::default());
        assert_eq!(outcome.camera.polygon_mode(), PolygonMode::Wireframe);
    }

    #[test]
    fn first_mouse_sample_is_only_a_baseline() {
        let script = parse(
            r#"{ "frames": [ { "mouse": [300.0, 300.0] }, { "mouse": [10.0, -10.0] } ] }"#,
        );
        let o = script.run(CameraController::default()).camera.orientation();
        assert!((o.yaw - -89.0).abs() < 1e-4);
        assert!((o.pitch - 1.0).abs() < 1e-4);
    }

    #[test]
    fn jump_lands_within_script() {
        let script = parse(r#"{ "frames": [ { "press": ["Jump"], "dt": 0.05, "repeat": 20 } ] }"#);
        let outcome = script.run(CameraController::default());
        assert!(!outcome.camera.jump().is_active());
        assert_eq!(outcome.camera.jump_offset(), 0.0);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.json");
        std::fs::write(&path, r#"{ "frames": [ { "scroll": 10.0 } ] }"#).unwrap();
        let script = Script::load(&path).unwrap();
        let outcome = script.run(CameraController::default());
        assert_eq!(outcome.camera.fov().degrees(), 35.0);
    }

    #[test]
    fn bad_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ frames: ").unwrap();
        assert!(matches!(Script::load(&path), Err(ScriptError::Json(_))));
    }
}
