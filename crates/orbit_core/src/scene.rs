//! Scene state: camera, light, projection, and per-drawable constant records.

use bevy_math::{Mat4, Vec4};
use tracing::debug;

use crate::camera::OrbitCamera;
use crate::constants::SceneConstants;
use crate::drawable::Drawable;
use crate::frame_loop::FrameContext;
use crate::palette::{self, LIGHT_PALETTE};

/// Light color used by drawables that do not follow the palette.
const DEFAULT_LIGHT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Everything UPDATE_SCENE recomputes and RECORD_AND_SUBMIT reads.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub camera: OrbitCamera,
    /// Point light position, world space.
    pub light_position: Vec4,
    viewport: (u32, u32),
    view: Mat4,
    projection: Mat4,
}

impl SceneState {
    pub fn new(width: u32, height: u32) -> Self {
        let camera = OrbitCamera::default();
        let view = camera.view_matrix();
        let mut state = Self {
            camera,
            light_position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            viewport: (width, height),
            view,
            projection: Mat4::IDENTITY,
        };
        state.rebuild_projection();
        state
    }

    /// Current viewport in pixels.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Accept a new surface size from the platform layer.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            // Minimized; keep the previous projection.
            return;
        }
        self.viewport = (width, height);
        self.rebuild_projection();
    }

    /// Key input is forwarded here unmodified; the orbit is fixed, so keys
    /// currently only show up in the logs.
    pub fn on_key_down(&mut self, code: u8) {
        debug!(code, "key down");
    }

    /// Per-frame recompute: camera view from the orbit parameters, palette
    /// step every 60 frames.
    pub fn advance(&mut self, ctx: &mut FrameContext) {
        self.view = self.camera.view_matrix();
        ctx.palette_index = palette::advance(ctx.palette_index, ctx.frame_count);
    }

    /// Snapshot the constant record for one drawable at the current frame.
    pub fn constants_for(&self, drawable: &Drawable, ctx: &FrameContext) -> SceneConstants {
        let light_color = if drawable.palette_light {
            LIGHT_PALETTE[ctx.palette_index]
        } else {
            DEFAULT_LIGHT_COLOR
        };
        SceneConstants::assemble(
            drawable.model_matrix(ctx.frame_count),
            self.view,
            self.projection,
            self.light_position,
            light_color,
            self.camera.eye(),
        )
    }

    fn rebuild_projection(&mut self) {
        let (width, height) = self.viewport;
        let aspect = width as f32 / height as f32;
        self.projection = Mat4::perspective_lh(45.0_f32.to_radians(), aspect, 0.1, 300.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::scene_drawables;

    #[test]
    fn palette_schedule_matches_the_sixty_frame_cycle() {
        let mut scene = SceneState::new(800, 600);
        let mut ctx = FrameContext::new();
        let [_, lit] = scene_drawables();

        // Frame 0: palette index 0.
        scene.advance(&mut ctx);
        assert_eq!(ctx.palette_index, 0);
        assert_eq!(scene.constants_for(&lit, &ctx).light_color, LIGHT_PALETTE[0]);

        for _ in 0..60 {
            ctx.frame_count += 1;
            scene.advance(&mut ctx);
        }
        // Frame 60: advanced exactly once.
        assert_eq!(ctx.frame_count, 60);
        assert_eq!(ctx.palette_index, 1);

        for _ in 0..59 {
            ctx.frame_count += 1;
            scene.advance(&mut ctx);
        }
        // Frame 119: still not at index 2.
        assert_eq!(ctx.frame_count, 119);
        assert_eq!(ctx.palette_index, 1);
    }

    #[test]
    fn only_the_second_drawable_follows_the_palette() {
        let scene = SceneState::new(800, 600);
        let mut ctx = FrameContext::new();
        ctx.palette_index = 3;
        let [plain, lit] = scene_drawables();
        assert_eq!(scene.constants_for(&plain, &ctx).light_color, DEFAULT_LIGHT_COLOR);
        assert_eq!(scene.constants_for(&lit, &ctx).light_color, LIGHT_PALETTE[3]);
    }

    #[test]
    fn resize_changes_the_projection() {
        let mut scene = SceneState::new(800, 600);
        let before = scene.projection;
        scene.set_viewport(1280, 720);
        assert_ne!(before, scene.projection);
        assert_eq!(scene.viewport(), (1280, 720));

        // A zero-sized (minimized) surface is ignored.
        scene.set_viewport(0, 0);
        assert_eq!(scene.viewport(), (1280, 720));
    }
}
