//! The space scene: asteroids, planets, skybox, ship, and the world state
//! the frame driver owns

use scene_engine::foundation::math::constants::PI;
use scene_engine::prelude::*;

/// Object tags forwarded to the renderer for per-object shading
pub mod object_tag {
    /// Small planet sphere
    pub const SPHERE: u32 = 0;
    /// Player ship
    pub const SHIP: u32 = 1;
    /// Skybox floor
    pub const SKYBOX_BOTTOM: u32 = 2;
    /// Skybox ceiling
    pub const SKYBOX_TOP: u32 = 3;
    /// Skybox front wall
    pub const SKYBOX_FRONT: u32 = 4;
    /// Skybox back wall
    pub const SKYBOX_BACK: u32 = 5;
    /// Skybox left wall
    pub const SKYBOX_LEFT: u32 = 6;
    /// Skybox right wall
    pub const SKYBOX_RIGHT: u32 = 7;
    /// Large planet sphere
    pub const LARGE_PLANET: u32 = 8;
    /// Asteroid rock
    pub const ASTEROID: u32 = 9;
    /// Projectile sphere
    pub const PROJECTILE: u32 = 10;
}

/// Number of asteroids in the scene
pub const ASTEROID_COUNT: usize = 5;

/// Seconds per Bézier traversal of asteroid 0
pub const BEZIER_PERIOD: f64 = 25.0;

/// An asteroid entity.
///
/// `visible` flips to false permanently when a projectile hit is detected.
/// Asteroid 0 carries a Bézier track; its displacement is recomputed every
/// frame it is visible.
#[derive(Debug, Clone)]
pub struct Asteroid {
    /// Resting world position
    pub base_position: Vec3,
    /// False once destroyed (one-way)
    pub visible: bool,
    /// Scale of the rendered model
    pub render_scale: Vec3,
    /// Scale of the collision box (rotation is not applied to collision)
    pub collision_scale: Vec3,
    /// Static model rotation
    pub orientation: Mat4,
    /// Current animated offset from the base position
    pub displacement: Vec3,
    /// Bézier animation, if this asteroid moves
    pub track: Option<BezierTrack>,
}

impl Asteroid {
    /// A static asteroid with identical render and collision scale
    fn fixed(base_position: Vec3, orientation: Mat4, scale: Vec3) -> Self {
        Self {
            base_position,
            visible: true,
            render_scale: scale,
            collision_scale: scale,
            orientation,
            displacement: Vec3::zeros(),
            track: None,
        }
    }

    /// Animated world position this frame
    pub fn world_position(&self) -> Vec3 {
        self.base_position + self.displacement
    }

    /// Collision box at the current animated position.
    ///
    /// Built from translation and scale only; the static model rotation is
    /// deliberately not part of the collision volume.
    pub fn collision_box(&self, model_aabb: &Aabb) -> Aabb {
        model_aabb.transformed(self.world_position(), self.collision_scale)
    }

    /// Model matrix for rendering
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.world_position())
            * self.orientation
            * Mat4::new_nonuniform_scaling(&self.render_scale)
    }
}

/// A planet entity: a scaled reference sphere at a fixed translation
#[derive(Debug, Clone)]
pub struct Planet {
    /// World translation of the scaled sphere
    pub translation: Vec3,
    /// Uniform scale; doubles as the collision radius
    pub scale: f32,
    /// Push-out distance applied when the camera penetrates
    pub push_distance: f32,
    /// Static tilt applied before the spin
    pub tilt: Mat4,
    /// Spin about the model Y axis in radians per second
    pub spin_rate: f32,
    /// Renderer object tag
    pub object: u32,
}

impl Planet {
    /// Collision sphere derived from the reference sphere's bounding box.
    ///
    /// The center sums the scaled corners rather than averaging them; for
    /// the symmetric reference sphere both coincide, and the collision
    /// constants were tuned against this form.
    pub fn collision_sphere(&self, sphere_aabb: &Aabb) -> BoundingSphere {
        let center = (sphere_aabb.min + sphere_aabb.max) * self.scale + self.translation;
        BoundingSphere::new(center, self.scale)
    }

    /// Model matrix at `now` seconds of wall-clock time
    pub fn model_matrix(&self, now: f64) -> Mat4 {
        Mat4::new_translation(&self.translation)
            * self.tilt
            * Mat4::rotation_y(self.spin_rate * now as f32)
            * Mat4::new_nonuniform_scaling(&Vec3::new(self.scale, self.scale, self.scale))
    }
}

/// The six skybox planes with their renderer tags and model matrices
pub fn skybox_planes() -> [(u32, Mat4); 6] {
    [
        (
            object_tag::SKYBOX_BOTTOM,
            Mat4::new_translation(&Vec3::new(0.0, -1000.0, 0.0)) * Mat4::rotation_y(PI / 2.0),
        ),
        (
            object_tag::SKYBOX_TOP,
            Mat4::new_translation(&Vec3::new(0.0, 1000.0, 0.0))
                * Mat4::rotation_z(PI)
                * Mat4::rotation_y(PI / 2.0),
        ),
        (
            object_tag::SKYBOX_FRONT,
            Mat4::new_translation(&Vec3::new(1000.0, 0.0, 0.0))
                * Mat4::rotation_z(PI / 2.0)
                * Mat4::rotation_y(PI / 2.0),
        ),
        (
            object_tag::SKYBOX_BACK,
            Mat4::new_translation(&Vec3::new(-1000.0, 0.0, 0.0))
                * Mat4::rotation_z(3.0 * PI / 2.0)
                * Mat4::rotation_y(3.0 * PI / 2.0),
        ),
        (
            object_tag::SKYBOX_LEFT,
            Mat4::new_translation(&Vec3::new(0.0, 0.0, -1000.0))
                * Mat4::rotation_x(PI / 2.0)
                * Mat4::rotation_y(PI),
        ),
        (
            object_tag::SKYBOX_RIGHT,
            Mat4::new_translation(&Vec3::new(0.0, 0.0, 1000.0)) * Mat4::rotation_x(3.0 * PI / 2.0),
        ),
    ]
}

/// Ship model matrix: slightly below and ahead of the camera, pitched and
/// yawed with the spherical angles
pub fn ship_model(camera: &CameraRig) -> Mat4 {
    let direction = camera.view_vector();
    let down = (-camera.up).normalize();

    Mat4::new_translation(&(down / 20.0))
        * Mat4::new_translation(&(direction / 5.0))
        * Mat4::new_translation(&camera.position)
        * Mat4::rotation_about(camera.right_vector(), PI / 2.0 - 1.1 * camera.phi)
        * Mat4::rotation_about(camera.up, 1.1 * camera.theta)
        * Mat4::new_nonuniform_scaling(&Vec3::new(0.01, 0.01, 0.01))
}

/// Control points of asteroid 0's Bézier path
pub fn bezier_control_points() -> [Vec3; 4] {
    [
        Vec3::new(111.1, 210.4, 111.0),
        Vec3::new(211.56, 112.25, 111.0),
        Vec3::new(-50.33, 50.99, 51.0),
        Vec3::new(40.78, 92.85, 31.0),
    ]
}

/// The asteroid fleet in index order; index 0 rides the Bézier track
fn asteroid_fleet(now: f64) -> [Asteroid; ASTEROID_COUNT] {
    let mut bezier_rider = Asteroid::fixed(
        Vec3::new(-100.0, 100.0, 0.0),
        Mat4::identity(),
        Vec3::new(30.0, 30.0, 30.0),
    );
    bezier_rider.render_scale = Vec3::new(30.0, 30.0, 20.0);
    bezier_rider.track = Some(BezierTrack::new(bezier_control_points(), BEZIER_PERIOD, now));

    [
        bezier_rider,
        Asteroid::fixed(
            Vec3::new(-35.0, -50.0, -240.0),
            Mat4::rotation_y(2.3),
            Vec3::new(30.0, 30.0, 30.0),
        ),
        Asteroid::fixed(
            Vec3::new(225.0, 0.0, 180.0),
            Mat4::rotation_z(-0.4) * Mat4::rotation_x(1.5),
            Vec3::new(35.0, 20.0, 35.0),
        ),
        Asteroid::fixed(
            Vec3::new(43.0, 89.0, -25.0),
            Mat4::rotation_x(1.2),
            Vec3::new(20.0, 20.0, 20.0),
        ),
        Asteroid::fixed(
            Vec3::new(-130.0, -150.0, 230.0),
            Mat4::rotation_z(0.6),
            Vec3::new(25.0, 25.0, 25.0),
        ),
    ]
}

/// The two planets in collision order: the large one first
fn planet_pair() -> [Planet; 2] {
    [
        Planet {
            translation: Vec3::new(0.0, -250.0, 0.0),
            scale: 200.0,
            push_distance: 10.0,
            tilt: Mat4::identity(),
            spin_rate: 0.0,
            object: object_tag::LARGE_PLANET,
        },
        Planet {
            translation: Vec3::new(-245.0, 170.0, 0.0),
            scale: 10.0,
            push_distance: 3.0,
            tilt: Mat4::rotation_z(0.6) * Mat4::rotation_x(0.2),
            spin_rate: 0.1,
            object: object_tag::SPHERE,
        },
    ]
}

/// The whole mutable scene state, owned by the frame driver and threaded
/// through every update function
#[derive(Debug, Clone)]
pub struct World {
    /// Camera rig
    pub camera: CameraRig,
    /// The five asteroids, in index order
    pub asteroids: [Asteroid; ASTEROID_COUNT],
    /// The two planets, large first
    pub planets: [Planet; 2],
    /// The single projectile slot
    pub projectile: crate::projectile::Projectile,
    /// Reference sphere bounding box (planet collision)
    pub sphere_aabb: Aabb,
    /// Asteroid model bounding box (asteroid collision)
    pub asteroid_aabb: Aabb,
}

impl World {
    /// Build the scene; `now` seeds the Bézier clock
    pub fn new(sphere_aabb: Aabb, asteroid_aabb: Aabb, tuning: CameraTuning, now: f64) -> Self {
        Self {
            camera: CameraRig::new(tuning),
            asteroids: asteroid_fleet(now),
            planets: planet_pair(),
            projectile: crate::projectile::Projectile::idle(),
            sphere_aabb,
            asteroid_aabb,
        }
    }

    /// The asteroids as camera lock targets, at their animated positions
    pub fn lock_targets(&self) -> [LockTarget; ASTEROID_COUNT] {
        std::array::from_fn(|index| LockTarget {
            position: self.asteroids[index].world_position(),
            visible: self.asteroids[index].visible,
        })
    }

    /// Advance the Bézier animation for every visible tracked asteroid
    pub fn animate(&mut self, now: f64) {
        for asteroid in &mut self.asteroids {
            if asteroid.visible {
                if let Some(track) = asteroid.track.as_mut() {
                    asteroid.displacement = track.displacement(now);
                }
            }
        }
    }

    /// Number of asteroids still visible
    pub fn visible_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| a.visible).count()
    }
}

/// A world over literal reference boxes, for tests that need no asset
/// files. The boxes mirror the shipped models: a unit sphere and a rock
/// whose extents stay well under the asteroid push-out distance even after
/// per-entity scaling.
#[cfg(test)]
pub(crate) fn test_world() -> World {
    let sphere = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
    let rock = Aabb::new(Vec3::new(-0.25, -0.25, -0.25), Vec3::new(0.25, 0.25, 0.25));
    World::new(sphere, rock, CameraTuning::default(), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lock_selects_asteroid_three_from_the_origin() {
        let world = test_world();
        let mut camera = world.camera.clone();
        let mut input = InputState::default();
        input.look_lock = true;

        camera.update_orientation(&mut input, &world.lock_targets());
        assert_eq!(camera.mode, LookMode::TargetLocked { index: 3 });
    }

    #[test]
    fn lock_falls_to_the_nearest_remaining_when_three_is_hidden() {
        let mut world = test_world();
        world.asteroids[3].visible = false;

        let mut camera = world.camera.clone();
        let mut input = InputState::default();
        input.look_lock = true;

        camera.update_orientation(&mut input, &world.lock_targets());
        assert_eq!(camera.mode, LookMode::TargetLocked { index: 0 });
    }

    #[test]
    fn animated_collision_box_follows_the_displacement() {
        let mut world = test_world();
        world.animate(6.25); // quarter traversal

        let asteroid = &world.asteroids[0];
        assert!(asteroid.displacement.norm() > 0.0);

        let aabb = asteroid.collision_box(&world.asteroid_aabb);
        let expected_center = asteroid.base_position + asteroid.displacement;
        assert_relative_eq!((aabb.center() - expected_center).norm(), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn only_the_tracked_asteroid_moves() {
        let mut world = test_world();
        world.animate(10.0);

        assert!(world.asteroids[0].displacement.norm() > 0.0);
        for asteroid in &world.asteroids[1..] {
            assert_eq!(asteroid.displacement, Vec3::zeros());
        }
    }

    #[test]
    fn destroyed_asteroid_stops_animating() {
        let mut world = test_world();
        world.animate(6.25);
        let frozen = world.asteroids[0].displacement;

        world.asteroids[0].visible = false;
        world.animate(12.5);
        assert_eq!(world.asteroids[0].displacement, frozen);
    }

    #[test]
    fn planet_collision_spheres_sit_at_their_translations() {
        let world = test_world();
        // For the symmetric unit box the scaled corner sum cancels
        let large = world.planets[0].collision_sphere(&world.sphere_aabb);
        assert_eq!(large.center, Vec3::new(0.0, -250.0, 0.0));
        assert_eq!(large.radius, 200.0);

        let small = world.planets[1].collision_sphere(&world.sphere_aabb);
        assert_eq!(small.center, Vec3::new(-245.0, 170.0, 0.0));
        assert_eq!(small.radius, 10.0);
    }

    #[test]
    fn skybox_has_six_distinct_tagged_planes() {
        let planes = skybox_planes();
        assert_eq!(planes.len(), 6);
        let mut tags: Vec<u32> = planes.iter().map(|(tag, _)| *tag).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), 6);
    }
}
