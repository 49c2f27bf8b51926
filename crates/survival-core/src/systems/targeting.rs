//! Targeting - what the player is looking at.
//!
//! Stands in for the physics line trace: a ray from the player's position
//! along their facing, hitting the nearest collider sphere within range.

use crate::components::{Collider, Transform, Vec3};
use hecs::{Entity, World};

/// Nearest entity whose collider the ray enters within `range`.
pub fn find_target(
    world: &World,
    origin: Vec3,
    direction: Vec3,
    range: f32,
    ignore: Option<Entity>,
) -> Option<Entity> {
    let dir = direction.normalize();
    if dir == Vec3::ZERO {
        return None;
    }

    let mut best: Option<(Entity, f32)> = None;
    for (entity, (transform, collider)) in world.query::<(&Transform, &Collider)>().iter() {
        if Some(entity) == ignore {
            continue;
        }
        let Some(hit) = ray_sphere_entry(origin, dir, transform.position, collider.radius) else {
            continue;
        };
        if hit > range {
            continue;
        }
        if best.map_or(true, |(_, d)| hit < d) {
            best = Some((entity, hit));
        }
    }
    best.map(|(entity, _)| entity)
}

/// Distance along a unit ray to where it enters the sphere; 0 when starting inside.
fn ray_sphere_entry(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let dist_sq = to_center.length_squared();
    let radius_sq = radius * radius;
    if dist_sq <= radius_sq {
        return Some(0.0);
    }

    let along = to_center.dot(&dir);
    if along < 0.0 {
        return None;
    }
    let perp_sq = dist_sq - along * along;
    if perp_sq > radius_sq {
        return None;
    }
    Some(along - (radius_sq - perp_sq).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_at(world: &mut World, x: f32, y: f32, radius: f32) -> Entity {
        world.spawn((Transform::at(x, y, 0.0), Collider { radius }))
    }

    #[test]
    fn test_hits_nearest_in_front() {
        let mut world = World::new();
        let far = spawn_at(&mut world, 180.0, 0.0, 20.0);
        let near = spawn_at(&mut world, 100.0, 0.0, 20.0);
        let _behind = spawn_at(&mut world, -50.0, 0.0, 20.0);

        let hit = find_target(&world, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 200.0, None);
        assert_eq!(hit, Some(near));

        world.despawn(near).unwrap();
        let hit = find_target(&world, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 200.0, None);
        assert_eq!(hit, Some(far));
    }

    #[test]
    fn test_out_of_range_or_off_axis_misses() {
        let mut world = World::new();
        spawn_at(&mut world, 300.0, 0.0, 20.0);
        spawn_at(&mut world, 100.0, 50.0, 20.0);

        let hit = find_target(&world, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 200.0, None);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_ignores_self() {
        let mut world = World::new();
        let me = spawn_at(&mut world, 0.0, 0.0, 30.0);
        let tree = spawn_at(&mut world, 100.0, 0.0, 20.0);

        assert_eq!(
            find_target(&world, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 200.0, None),
            Some(me)
        );
        assert_eq!(
            find_target(&world, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 200.0, Some(me)),
            Some(tree)
        );
    }

    #[test]
    fn test_ray_sphere_entry_distance() {
        let d = ray_sphere_entry(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            20.0,
        );
        assert_eq!(d, Some(80.0));
        assert_eq!(
            ray_sphere_entry(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, 5.0),
            Some(0.0)
        );
    }
}
