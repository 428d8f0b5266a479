//! Orthographic camera over the level, in world units.

use bevy_ecs::resource::Resource;
use glam::{Mat4, UVec2, Vec2, Vec3};

/// A 2D orthographic camera.
///
/// The camera belongs to whoever drives the level; the level only borrows it
/// for the duration of a frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Center of the view, in world units.
    pub position: Vec2,
    /// Size of the visible area at zoom 1, in world units.
    pub viewport: Vec2,
    pub zoom: f32,
    combined: Mat4,
    updates: u64,
}

impl Camera {
    /// Creates a camera whose view starts at the world origin in its bottom-left corner.
    pub fn new(viewport: Vec2) -> Self {
        let mut camera = Self {
            position: viewport / 2.0,
            viewport,
            zoom: 1.0,
            combined: Mat4::IDENTITY,
            updates: 0,
        };
        camera.update();
        camera.updates = 0;
        camera
    }

    /// Recomputes the combined projection and view matrix.
    pub fn update(&mut self) {
        let half = self.viewport * self.zoom / 2.0;
        let projection = Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0);
        let view = Mat4::from_translation(-self.position.extend(0.0));
        self.combined = projection * view;
        self.updates += 1;
    }

    /// The projection of the last [`Camera::update`].
    pub fn combined(&self) -> Mat4 {
        self.combined
    }

    /// How many times the projection has been recomputed.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// Maps a world position to a pixel on a screen of the given size, y pointing down.
    pub fn world_to_screen(&self, world: Vec2, screen: UVec2) -> Vec2 {
        let ndc = self.combined.project_point3(Vec3::new(world.x, world.y, 0.0));
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * screen.x as f32,
            (1.0 - ndc.y) / 2.0 * screen.y as f32,
        )
    }

    /// Pixels per world unit on a screen of the given width.
    pub fn screen_scale(&self, screen: UVec2) -> f32 {
        screen.x as f32 / (self.viewport.x * self.zoom)
    }

    /// Bottom-left and top-right corners of the visible area, in world units.
    pub fn visible_bounds(&self) -> (Vec2, Vec2) {
        let half = self.viewport * self.zoom / 2.0;
        (self.position - half, self.position + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_screen_center() {
        let mut camera = Camera::new(Vec2::new(20.0, 14.0));
        camera.position = Vec2::new(30.0, 7.0);
        camera.update();

        let screen = UVec2::new(640, 448);
        let center = camera.world_to_screen(camera.position, screen);
        assert!((center - Vec2::new(320.0, 224.0)).length() < 1e-3);
    }

    #[test]
    fn test_bottom_left_maps_to_screen_bottom_left() {
        let camera = Camera::new(Vec2::new(20.0, 14.0));
        let corner = camera.world_to_screen(Vec2::ZERO, UVec2::new(640, 448));
        assert!((corner - Vec2::new(0.0, 448.0)).length() < 1e-3);
    }

    #[test]
    fn test_zoom_widens_visible_bounds() {
        let mut camera = Camera::new(Vec2::new(20.0, 14.0));
        camera.zoom = 2.0;
        let (min, max) = camera.visible_bounds();
        assert_eq!(max - min, Vec2::new(40.0, 28.0));
        assert_eq!(camera.screen_scale(UVec2::new(640, 448)), 16.0);
    }
}
