// game/collision.rs

use bevy::math::bounding::{Aabb3d, BoundingVolume, IntersectsVolume};
use bevy::prelude::*;

/// Body of the player as a box standing on the floor, centred under the camera
pub fn player_bounds(position: Vec3, radius: f32, height: f32) -> Aabb3d {
    let half_height = height * 0.5;
    Aabb3d::new(
        Vec3::new(position.x, half_height, position.z),
        Vec3::new(radius, half_height, radius),
    )
}

/// Move on the XZ plane, one axis at a time, dropping any axis that would run into
/// an obstacle. Blocked diagonal moves therefore slide along walls.
///
/// Each axis step is swept: the body at the start and at the end are merged, so a
/// long frame cannot tunnel through a thin obstacle. Obstacles the body already
/// overlaps are ignored so the player can always walk out of them.
pub fn resolve_movement(
    position: Vec3,
    delta: Vec3,
    radius: f32,
    height: f32,
    obstacles: &[Aabb3d],
) -> Vec3 {
    let blocked = |from: Vec3, to: Vec3| {
        let start = player_bounds(from, radius, height);
        let swept = start.merge(&player_bounds(to, radius, height));
        obstacles
            .iter()
            .any(|o| swept.intersects(o) && !start.intersects(o))
    };

    let mut next = position;

    let step_x = Vec3::new(delta.x, 0.0, 0.0);
    if delta.x != 0.0 && !blocked(next, next + step_x) {
        next += step_x;
    }

    let step_z = Vec3::new(0.0, 0.0, delta.z);
    if delta.z != 0.0 && !blocked(next, next + step_z) {
        next += step_z;
    }

    next
}

/// Keep the player inside a square room of the given half size
pub fn clamp_to_room(position: Vec3, half_size: f32, radius: f32) -> Vec3 {
    let limit = (half_size - radius).max(0.0);
    Vec3::new(
        position.x.clamp(-limit, limit),
        position.y,
        position.z.clamp(-limit, limit),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 0.3;
    const HEIGHT: f32 = 1.6;

    /// Right wall of a 10x10 room
    fn right_wall() -> Aabb3d {
        Aabb3d::new(Vec3::new(5.0, 1.5, 0.0), Vec3::new(0.1, 1.5, 5.0))
    }

    #[test]
    fn test_free_movement() {
        let start = Vec3::new(0.0, 1.6, 0.0);
        let delta = Vec3::new(1.0, 0.0, -0.5);
        let next = resolve_movement(start, delta, RADIUS, HEIGHT, &[right_wall()]);
        assert_eq!(next, Vec3::new(1.0, 1.6, -0.5));
    }

    #[test]
    fn test_slides_along_wall() {
        let start = Vec3::new(4.0, 1.6, 0.0);
        let delta = Vec3::new(2.0, 0.0, 1.0);
        let next = resolve_movement(start, delta, RADIUS, HEIGHT, &[right_wall()]);

        // x blocked by the wall, z still applied
        assert_eq!(next.x, 4.0);
        assert_eq!(next.z, 1.0);
    }

    #[test]
    fn test_short_of_wall_is_allowed() {
        let start = Vec3::new(4.0, 1.6, 0.0);
        let delta = Vec3::new(0.5, 0.0, 0.0);
        let next = resolve_movement(start, delta, RADIUS, HEIGHT, &[right_wall()]);
        assert_eq!(next.x, 4.5);
    }

    #[test]
    fn test_low_obstacle_still_blocks() {
        // A table top reaches 1.0 high, the body starts at the floor
        let table = Aabb3d::new(Vec3::new(-4.6, 0.5, 0.0), Vec3::new(0.4, 0.5, 0.7));
        let start = Vec3::new(-3.0, 1.6, 0.0);
        let next = resolve_movement(start, Vec3::new(-1.0, 0.0, 0.0), RADIUS, HEIGHT, &[table]);
        assert_eq!(next.x, -3.0);
    }

    #[test]
    fn test_long_step_does_not_tunnel() {
        // Thin panel well inside the room, one long frame would jump it
        let panel = Aabb3d::new(Vec3::new(2.0, 1.0, 0.0), Vec3::new(0.05, 1.0, 1.0));
        let start = Vec3::new(0.0, 1.6, 0.0);
        let next = resolve_movement(start, Vec3::new(4.0, 0.0, 0.0), RADIUS, HEIGHT, &[panel]);
        assert_eq!(next.x, 0.0);

        // Walking the other way is unaffected
        let next = resolve_movement(start, Vec3::new(-4.0, 0.0, 0.0), RADIUS, HEIGHT, &[panel]);
        assert_eq!(next.x, -4.0);
    }

    #[test]
    fn test_can_walk_out_of_an_overlap() {
        let crate_box = Aabb3d::new(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.5));
        let start = Vec3::new(0.6, 1.6, 0.0);
        let next = resolve_movement(start, Vec3::new(1.0, 0.0, 0.0), RADIUS, HEIGHT, &[crate_box]);
        assert!((next.x - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_to_room() {
        let clamped = clamp_to_room(Vec3::new(7.0, 1.6, -9.0), 5.0, RADIUS);
        assert!(clamped.abs_diff_eq(Vec3::new(4.7, 1.6, -4.7), 1e-5));
    }
}
