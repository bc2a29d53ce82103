use crate::jump::JumpState;
use glam::{Mat4, Vec3};
use vista_common::{ConfigError, ControllerConfig, FieldOfView, Orientation, PolygonMode};
use vista_input::{Action, ActionEdges, HeldActions, MouseTracker};

/// First-person camera with mouse look, scroll zoom, WASD movement, a sine
/// jump and a wireframe toggle.
///
/// All state is owned here and mutated only through the input methods; the
/// render step reads it through the accessors.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: ControllerConfig,
    position: Vec3,
    orientation: Orientation,
    fov: FieldOfView,
    jump: JumpState,
    mouse: MouseTracker,
    polygon_mode: PolygonMode,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl CameraController {
    /// Build a controller from a config that already passed
    /// [`ControllerConfig::validate`]. Out-of-range initial values are pulled
    /// into bounds; use [`CameraController::try_new`] for unchecked input.
    pub fn new(config: ControllerConfig) -> Self {
        let fov = FieldOfView(config.initial_fov.max(config.fov_min).min(config.fov_max));
        let limit = config.pitch_limit.abs();
        let orientation = Orientation {
            yaw: config.initial_yaw,
            pitch: config.initial_pitch.max(-limit).min(limit),
        };
        Self {
            position: config.initial_position,
            orientation,
            fov,
            jump: JumpState::new(config.jump_frequency, config.jump_amplitude),
            mouse: MouseTracker::new(),
            polygon_mode: PolygonMode::Filled,
            config,
        }
    }

    /// Validate `config`, then build the controller.
    pub fn try_new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Return to the configured starting state, including mouse baseline.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn fov(&self) -> FieldOfView {
        self.fov
    }

    pub fn jump(&self) -> &JumpState {
        &self.jump
    }

    pub fn jump_offset(&self) -> f32 {
        self.jump.offset()
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }

    /// Eye position: the walking position lifted by the jump arc.
    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::Y * self.jump.offset()
    }

    /// Unit look direction from yaw and pitch.
    pub fn direction(&self) -> Vec3 {
        let yaw = self.orientation.yaw_radians();
        let pitch = self.orientation.pitch_radians();
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.direction().cross(Vec3::Y).normalize()
    }

    /// Look direction flattened onto the ground plane, so looking up or
    /// down does not change walking speed.
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::Y.cross(self.right()).normalize()
    }

    /// Rotate by a relative mouse movement in screen pixels. The first call
    /// after construction or [`Self::reset_mouse`] only sets the baseline.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            tracing::trace!(dx, dy, "discarding non-finite mouse delta");
            return;
        }
        let delta = self.mouse.accept_delta(dx, dy);
        self.rotate(delta.x, delta.y);
    }

    /// Rotate toward an absolute cursor position. The first sample after
    /// construction or [`Self::reset_mouse`] only sets the baseline.
    pub fn apply_cursor_position(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            tracing::trace!(x, y, "discarding non-finite cursor sample");
            return;
        }
        let delta = self.mouse.sample(x, y);
        self.rotate(delta.x, delta.y);
    }

    /// Forget the mouse baseline, e.g. after the cursor is captured or released.
    pub fn reset_mouse(&mut self) {
        self.mouse.reset();
    }

    fn rotate(&mut self, dx: f32, dy: f32) {
        let s = self.config.sensitivity;
        // Screen Y grows downward.
        self.orientation.rotate(dx * s, -dy * s, self.config.pitch_limit);
    }

    /// Zoom by a scroll amount; scrolling up narrows the view.
    pub fn apply_scroll(&mut self, dy: f32) {
        if !dy.is_finite() {
            tracing::trace!(dy, "discarding non-finite scroll");
            return;
        }
        self.fov.zoom(dy, self.config.fov_min, self.config.fov_max);
    }

    /// Current movement speed in units per second.
    pub fn speed<I: HeldActions + ?Sized>(&self, input: &I) -> f32 {
        if input.held(Action::Sprint) {
            self.config.base_speed * self.config.sprint_multiplier
        } else {
            self.config.base_speed
        }
    }

    /// Walk along the ground plane for every held direction. Call once per frame.
    pub fn apply_movement<I: HeldActions + ?Sized>(&mut self, input: &I, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let step = self.speed(input) * dt;
        let forward = self.horizontal_forward();
        let right = self.right();

        if input.held(Action::MoveForward) {
            self.position += forward * step;
        }
        if input.held(Action::MoveBackward) {
            self.position -= forward * step;
        }
        if input.held(Action::StrafeLeft) {
            self.position -= right * step;
        }
        if input.held(Action::StrafeRight) {
            self.position += right * step;
        }
    }

    /// Start a jump unless one is already in flight.
    pub fn trigger_jump(&mut self, now: f64) -> bool {
        self.jump.trigger(now)
    }

    /// Advance the jump arc and return the vertical offset.
    pub fn update_jump(&mut self, now: f64) -> f32 {
        self.jump.update(now)
    }

    /// Flip filled/wireframe. Callers invoke this on a press edge only.
    pub fn toggle_polygon_mode(&mut self) -> PolygonMode {
        self.polygon_mode = self.polygon_mode.toggled();
        tracing::debug!(mode = ?self.polygon_mode, "polygon mode toggled");
        self.polygon_mode
    }

    /// Per-frame driver: movement from held actions, jump and toggle from
    /// press edges, then the jump arc.
    pub fn update<I>(&mut self, input: &I, now: f64, dt: f32)
    where
        I: HeldActions + ActionEdges + ?Sized,
    {
        self.apply_movement(input, dt);
        if input.pressed(Action::Jump) {
            self.trigger_jump(now);
        }
        if input.pressed(Action::TogglePolygonMode) {
            self.toggle_polygon_mode();
        }
        self.update_jump(now);
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye();
        Mat4::look_at_rh(eye, eye + self.direction(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.radians(), aspect, self.config.near, self.config.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
