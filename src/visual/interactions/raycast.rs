use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;

use crate::visual::setup::scene::{BOX_HALF, HOLD_LIFT, ROOM_HALF_SIZE, WALL_THICKNESS};

/// How far the player can reach with a click
pub const PICK_DISTANCE: f32 = 15.0;

/// Closest volume the ray enters within `max_distance`
pub fn pick_nearest<T>(
    ray: Ray3d,
    max_distance: f32,
    candidates: impl IntoIterator<Item = (T, Aabb3d)>,
) -> Option<(T, f32)> {
    let cast = RayCast3d::from_ray(ray, max_distance);
    candidates
        .into_iter()
        .filter_map(|(item, bounds)| cast.aabb_intersection_at(&bounds).map(|t| (item, t)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}

/// Where the ray meets the floor plane
pub fn floor_point(ray: Ray3d) -> Option<Vec3> {
    ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y))
        .map(|distance| ray.get_point(distance))
}

/// Carry position for a held box: over the aimed floor spot, lifted, kept
/// inside the walls
pub fn hold_point(ray: Ray3d) -> Option<Vec3> {
    let floor = floor_point(ray)?;
    let limit = ROOM_HALF_SIZE - WALL_THICKNESS * 0.5 - BOX_HALF;
    Some(Vec3::new(
        floor.x.clamp(-limit, limit),
        BOX_HALF + HOLD_LIFT,
        floor.z.clamp(-limit, limit),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(direction).unwrap())
    }

    #[test]
    fn test_nearest_hit_wins() {
        let ray = ray(Vec3::ZERO, Vec3::NEG_Z);
        let near = Aabb3d::new(Vec3::new(0.0, 0.0, -2.0), Vec3::splat(0.5));
        let far = Aabb3d::new(Vec3::new(0.0, 0.0, -5.0), Vec3::splat(0.5));

        let (hit, distance) = pick_nearest(ray, 10.0, [("far", far), ("near", near)]).unwrap();
        assert_eq!(hit, "near");
        assert!((distance - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_miss_and_out_of_reach() {
        let ray = ray(Vec3::ZERO, Vec3::NEG_Z);
        let beside = Aabb3d::new(Vec3::new(3.0, 0.0, -2.0), Vec3::splat(0.5));
        let distant = Aabb3d::new(Vec3::new(0.0, 0.0, -50.0), Vec3::splat(0.5));

        assert!(pick_nearest(ray, 10.0, [(1, beside), (2, distant)]).is_none());
    }

    #[test]
    fn test_floor_point() {
        let ray = ray(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, -1.0));
        let p = floor_point(ray).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5));

        // Looking up never meets the floor
        let up = Ray3d::new(Vec3::new(0.0, 2.0, 0.0), Dir3::Y);
        assert!(floor_point(up).is_none());
    }

    #[test]
    fn test_hold_point_is_lifted_and_kept_indoors() {
        let near = ray(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, -1.0, -1.0));
        let p = hold_point(near).unwrap();
        assert_eq!(p.y, BOX_HALF + HOLD_LIFT);

        // A shallow ray meets the floor far outside the room
        let shallow = ray(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, -0.01, -1.0));
        let p = hold_point(shallow).unwrap();
        assert!(p.z > -ROOM_HALF_SIZE);
    }
}
