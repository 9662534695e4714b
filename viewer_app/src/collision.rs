//! Scene collision composition
//!
//! Composes the engine's push-out primitives in the scene's fixed order:
//! skybox bounds clamp, then the two planets, then the visible asteroids by
//! index. Each step reads the position the previous step produced, so a
//! frame with several simultaneous penetrations may resolve only some of
//! them; the next frame picks up the rest.

use crate::world::World;
use scene_engine::prelude::*;

/// Skybox containment limit per axis
pub const WORLD_LIMIT: f32 = 250.0;

/// Value an out-of-bounds axis snaps back to
pub const WORLD_SNAP: f32 = 240.0;

/// Push-out distance for asteroid penetrations
pub const ASTEROID_PUSH: f32 = 10.0;

/// Surface-proximity tolerance for the planet spheres
const PENETRATION_EPSILON: f32 = 1e-12;

/// Resolve the camera position against the world, in order: bounds clamp,
/// planets, visible asteroids.
pub fn resolve_camera_position(position: Vec3, world: &World) -> Vec3 {
    let bounds = WorldBounds::new(WORLD_LIMIT, WORLD_SNAP);
    let mut position = bounds.clamp(position);

    for planet in &world.planets {
        position = push_out_of_sphere(
            position,
            &planet.collision_sphere(&world.sphere_aabb),
            planet.push_distance,
            PENETRATION_EPSILON,
        );
    }

    for asteroid in world.asteroids.iter().filter(|a| a.visible) {
        position = push_out_of_aabb(
            position,
            &asteroid.collision_box(&world.asteroid_aabb),
            ASTEROID_PUSH,
        );
    }

    position
}

/// Test the in-flight projectile against every visible asteroid.
///
/// All hits in one pass are applied (the same projectile position is tested
/// against each box); any hit despawns the projectile and permanently hides
/// the asteroid.
pub fn resolve_projectile_hits(world: &mut World) {
    if !world.projectile.visible {
        return;
    }

    let point = world.projectile.position;
    let model_aabb = world.asteroid_aabb;
    let mut hit = false;

    for (index, asteroid) in world.asteroids.iter_mut().enumerate() {
        if asteroid.visible && asteroid.collision_box(&model_aabb).contains(point) {
            log::debug!("projectile hit asteroid {index}");
            asteroid.visible = false;
            hit = true;
        }
    }

    if hit {
        world.projectile.despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::Projectile;
    use crate::world::test_world;

    #[test]
    fn bounds_clamp_comes_first() {
        let world = test_world();
        let resolved = resolve_camera_position(Vec3::new(400.0, 0.0, -300.0), &world);
        assert!(resolved.x.abs() <= WORLD_LIMIT);
        assert!(resolved.z.abs() <= WORLD_LIMIT);
    }

    #[test]
    fn resolved_position_never_exceeds_the_world_limit() {
        let world = test_world();
        for probe in [
            Vec3::new(260.0, 260.0, 260.0),
            Vec3::new(-500.0, 100.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
        ] {
            let resolved = resolve_camera_position(probe, &world);
            assert!(resolved.x.abs() <= WORLD_LIMIT);
            assert!(resolved.y.abs() <= WORLD_LIMIT);
            assert!(resolved.z.abs() <= WORLD_LIMIT);
        }
    }

    #[test]
    fn camera_is_pushed_out_of_the_large_planet() {
        let world = test_world();
        let inside = Vec3::new(0.0, -100.0, 0.0); // 150 units into the sphere
        let resolved = resolve_camera_position(inside, &world);

        let sphere = world.planets[0].collision_sphere(&world.sphere_aabb);
        assert!((resolved - sphere.center).norm() > (inside - sphere.center).norm());
    }

    #[test]
    fn camera_is_pushed_out_of_a_penetrated_asteroid() {
        let world = test_world();
        let center = world.asteroids[3].base_position;
        let resolved = resolve_camera_position(center + Vec3::new(1.0, 0.0, 0.0), &world);

        let aabb = world.asteroids[3].collision_box(&world.asteroid_aabb);
        assert!(!aabb.contains(resolved));
    }

    #[test]
    fn hidden_asteroids_do_not_collide() {
        let mut world = test_world();
        world.asteroids[3].visible = false;

        let probe = world.asteroids[3].base_position + Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(resolve_camera_position(probe, &world), probe);
    }

    #[test]
    fn single_penetration_resolution_is_idempotent() {
        let world = test_world();
        let inside = world.asteroids[4].base_position + Vec3::new(2.0, -1.0, 0.0);

        let once = resolve_camera_position(inside, &world);
        let twice = resolve_camera_position(once, &world);
        assert_eq!(once, twice);
    }

    #[test]
    fn projectile_hit_hides_the_asteroid_and_despawns() {
        let mut world = test_world();
        world.projectile = Projectile {
            origin: Vec3::zeros(),
            position: world.asteroids[1].base_position,
            direction: Vec3::new(0.0, 0.0, 1.0),
            distance: 0.0,
            visible: true,
        };

        resolve_projectile_hits(&mut world);
        assert!(!world.asteroids[1].visible);
        assert!(!world.projectile.visible);
    }

    #[test]
    fn missed_projectiles_keep_flying() {
        let mut world = test_world();
        world.projectile = Projectile {
            origin: Vec3::zeros(),
            position: Vec3::new(5.0, 5.0, 5.0),
            direction: Vec3::new(0.0, 0.0, 1.0),
            distance: 0.0,
            visible: true,
        };

        resolve_projectile_hits(&mut world);
        assert!(world.projectile.visible);
        assert_eq!(world.visible_asteroids(), crate::world::ASTEROID_COUNT);
    }

    #[test]
    fn idle_projectiles_cannot_destroy_asteroids() {
        let mut world = test_world();
        // A stale position inside asteroid 2's box must be ignored
        world.projectile.position = world.asteroids[2].base_position;
        world.projectile.visible = false;

        resolve_projectile_hits(&mut world);
        assert_eq!(world.visible_asteroids(), crate::world::ASTEROID_COUNT);
    }

    #[test]
    fn destroyed_asteroids_are_immune_to_later_hits() {
        let mut world = test_world();
        world.asteroids[2].visible = false;
        world.projectile = Projectile {
            origin: Vec3::zeros(),
            position: world.asteroids[2].base_position,
            direction: Vec3::new(1.0, 0.0, 0.0),
            distance: 0.0,
            visible: true,
        };

        resolve_projectile_hits(&mut world);
        // no hit registered, so the projectile keeps flying
        assert!(world.projectile.visible);
    }
}
