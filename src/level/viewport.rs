//! Camera and the visible world rectangle.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

/// World units visible from the bottom to the top of the window.
pub const VIEW_HEIGHT: f32 = 10.0;

/// Marker for the camera whose view the level fills.
#[derive(Component)]
pub struct GameCamera;

/// Visible world rectangle, refreshed every frame from the game camera.
///
/// Absent until the camera has been spawned.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds(pub Rect);

impl ViewportBounds {
    /// Map a window cursor position (origin top-left, y down) to world space.
    pub fn cursor_to_world(&self, cursor: Vec2, window_size: Vec2) -> Option<Vec2> {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return None;
        }
        let t = cursor / window_size;
        let rect = self.0;
        Some(Vec2::new(
            rect.min.x + t.x * rect.width(),
            rect.max.y - t.y * rect.height(),
        ))
    }
}

/// Spawn the 2D camera with a fixed world-space height.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Game Camera"),
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: VIEW_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        },
        GameCamera,
    ));
}

/// Copy the camera's projected area into `ViewportBounds`.
pub fn update_viewport_bounds(
    mut commands: Commands,
    camera_query: Query<(&OrthographicProjection, &GlobalTransform), With<GameCamera>>,
    bounds: Option<Res<ViewportBounds>>,
) {
    let Ok((projection, transform)) = camera_query.get_single() else {
        return;
    };

    let offset = transform.translation().truncate();
    let area = Rect {
        min: projection.area.min + offset,
        max: projection.area.max + offset,
    };
    // Projection area is zero until the first render update
    if area.is_empty() {
        return;
    }

    if bounds.map_or(true, |b| b.0 != area) {
        commands.insert_resource(ViewportBounds(area));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn cursor_corners_map_to_view_corners() {
        let bounds = ViewportBounds(Rect::new(-3.0, -5.0, 3.0, 5.0));
        let window = Vec2::new(600.0, 1000.0);

        assert_eq!(
            bounds.cursor_to_world(Vec2::ZERO, window),
            Some(Vec2::new(-3.0, 5.0))
        );
        assert_eq!(
            bounds.cursor_to_world(window, window),
            Some(Vec2::new(3.0, -5.0))
        );
        assert_eq!(
            bounds.cursor_to_world(window / 2.0, window),
            Some(Vec2::ZERO)
        );
    }

    #[test]
    fn zero_sized_window_has_no_world_point() {
        let bounds = ViewportBounds(Rect::new(-1.0, -1.0, 1.0, 1.0));
        assert_eq!(bounds.cursor_to_world(Vec2::ZERO, Vec2::ZERO), None);
    }

    #[test]
    fn bounds_follow_the_camera() {
        let mut world = World::new();
        let mut projection = OrthographicProjection::default_2d();
        projection.area = Rect::new(-2.0, -1.0, 2.0, 1.0);
        world.spawn((
            projection,
            GlobalTransform::from_xyz(10.0, 0.0, 0.0),
            GameCamera,
        ));

        world.run_system_once(update_viewport_bounds).unwrap();

        let bounds = world.resource::<ViewportBounds>();
        assert_eq!(bounds.0, Rect::new(8.0, -1.0, 12.0, 1.0));
    }
}
