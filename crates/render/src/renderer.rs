use glam::{Mat4, Vec3};
use vista_camera::CameraController;
use vista_common::{PolygonMode, TextureMix};

/// Per-frame snapshot of everything the draw step reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space, jump included.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Unit look direction.
    pub direction: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub polygon_mode: PolygonMode,
    pub mix: TextureMix,
    pub jump_offset: f32,
    pub view: Mat4,
    /// Projection × view for the current aspect ratio.
    pub view_proj: Mat4,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::capture(&CameraController::default(), TextureMix::default(), 4.0 / 3.0)
    }
}

impl RenderView {
    /// Read the controller once; the result is immutable for the frame.
    pub fn capture(camera: &CameraController, mix: TextureMix, aspect: f32) -> Self {
        let eye = camera.eye();
        let direction = camera.direction();
        Self {
            eye,
            target: eye + direction,
            direction,
            fov_degrees: camera.fov().degrees(),
            polygon_mode: camera.polygon_mode(),
            mix,
            jump_offset: camera.jump_offset(),
            view: camera.view_matrix(),
            view_proj: camera.view_projection(aspect),
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a captured view and produces output. It never touches
/// the controller.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given view.
    fn render(&self, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable dump of a view. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str("=== Camera ===\n");
        out.push_str(&format!(
            "eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})\n",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z
        ));
        out.push_str(&format!(
            "direction=({:.3}, {:.3}, {:.3}) fov={:.1}\n",
            view.direction.x, view.direction.y, view.direction.z, view.fov_degrees
        ));
        out.push_str(&format!(
            "jump={:.3} mode={:?} mix={:.3}\n",
            view.jump_offset,
            view.polygon_mode,
            view.mix.value()
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_reads_controller() {
        let mut camera = CameraController::default();
        camera.apply_scroll(15.0);
        camera.toggle_polygon_mode();
        let view = RenderView::capture(&camera, TextureMix::new(0.2), 1.0);

        assert_eq!(view.fov_degrees, 30.0);
        assert_eq!(view.polygon_mode, PolygonMode::Wireframe);
        assert_eq!(view.eye, camera.eye());
        assert!((view.target - (view.eye + view.direction)).length() < 1e-6);
        assert_eq!(view.view, camera.view_matrix());
    }

    #[test]
    fn debug_renderer_default_view() {
        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&RenderView::default());

        assert!(output.contains("eye=(0.00, 0.00, 3.00)"));
        assert!(output.contains("fov=45.0"));
        assert!(output.contains("mode=Filled"));
        assert!(output.contains("mix=0.500"));
    }

    #[test]
    fn debug_renderer_reports_jump() {
        let mut camera = CameraController::default();
        camera.trigger_jump(0.0);
        camera.update_jump(std::f64::consts::PI / 10.0);
        let view = RenderView::capture(&camera, TextureMix::default(), 1.0);
        let output = DebugTextRenderer::new().render(&view);
        assert!(output.contains("jump=2.000"));
    }
}
