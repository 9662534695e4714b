//! Projectile lifecycle
//!
//! At most one projectile exists at a time. It spawns just ahead of and
//! below the camera, flies in a straight line along the view direction
//! captured at spawn, and despawns after sixty world units or on the first
//! asteroid hit.

use scene_engine::prelude::*;

/// Maximum travel distance before the projectile despawns
pub const PROJECTILE_RANGE: f32 = 60.0;

/// Forward spawn offset along the view vector
const SPAWN_AHEAD: f32 = 3.0;

/// Downward spawn offset along the negated up vector
const SPAWN_BELOW: f32 = 0.7;

/// The single projectile slot.
///
/// Invariant: `distance` is the length of `position - origin`.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Spawn point
    pub origin: Vec3,
    /// Current position
    pub position: Vec3,
    /// Unit flight direction, fixed at spawn
    pub direction: Vec3,
    /// Distance traveled from the origin
    pub distance: f32,
    /// Whether a projectile is in flight
    pub visible: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::idle()
    }
}

impl Projectile {
    /// The idle (empty) slot
    pub fn idle() -> Self {
        Self {
            origin: Vec3::zeros(),
            position: Vec3::zeros(),
            direction: Vec3::zeros(),
            distance: 0.0,
            visible: false,
        }
    }

    /// Spawn ahead of and below the camera, flying along its view vector
    pub fn spawn(camera: &CameraRig) -> Self {
        let down = (-camera.up).normalize();
        let origin = camera.position + SPAWN_AHEAD * camera.view_vector() + SPAWN_BELOW * down;

        log::debug!("projectile fired from {origin:?}");
        Self {
            origin,
            position: origin,
            direction: camera.view_vector(),
            distance: 0.0,
            visible: true,
        }
    }

    /// Advance one frame; despawns once the range limit is reached
    pub fn advance(&mut self, base_speed: f32, dt: f32) {
        if !self.visible {
            return;
        }

        self.position += (base_speed + dt) * self.direction;
        self.distance = (self.position - self.origin).norm();

        if self.distance >= PROJECTILE_RANGE {
            log::debug!("projectile expired after {:.1} units", self.distance);
            self.visible = false;
        }
    }

    /// Remove the projectile from flight (asteroid hit)
    pub fn despawn(&mut self) {
        self.visible = false;
    }

    /// Model matrix for rendering
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * Mat4::new_nonuniform_scaling(&Vec3::new(0.1, 0.1, 0.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_offset_is_exact() {
        let camera = CameraRig::default();
        let projectile = Projectile::spawn(&camera);

        let down = (-camera.up).normalize();
        let expected = camera.position + 3.0 * camera.view_vector() + 0.7 * down;
        assert_eq!(projectile.origin, expected);
        assert_eq!(projectile.position, expected);
        assert_eq!(projectile.direction, camera.view_vector());
        assert_eq!(projectile.distance, 0.0);
        assert!(projectile.visible);
    }

    #[test]
    fn distance_is_monotone_while_in_flight() {
        let camera = CameraRig::default();
        let mut projectile = Projectile::spawn(&camera);

        let mut last = 0.0;
        while projectile.visible {
            projectile.advance(0.05, 0.95); // one unit per frame
            assert!(projectile.distance >= last);
            last = projectile.distance;
        }
    }

    #[test]
    fn despawn_happens_on_the_first_frame_at_range() {
        let camera = CameraRig::default();
        let mut projectile = Projectile::spawn(&camera);

        // 59 one-unit steps stay in flight
        for _ in 0..59 {
            projectile.advance(0.05, 0.95);
            assert!(projectile.visible);
        }

        // the sixtieth reaches the limit
        projectile.advance(0.05, 0.95);
        assert!(!projectile.visible);
        assert!(projectile.distance >= PROJECTILE_RANGE);
        // never overshooting by more than one frame's travel
        assert!(projectile.distance < PROJECTILE_RANGE + 1.0 + 1e-3);
    }

    #[test]
    fn direction_is_captured_at_spawn() {
        let mut camera = CameraRig::default();
        let mut projectile = Projectile::spawn(&camera);
        let direction = projectile.direction;

        // turn the camera after firing
        camera.on_pointer_drag(200.0, 0.0);
        let mut input = InputState::default();
        camera.update_orientation(&mut input, &[]);

        projectile.advance(0.05, 0.0);
        assert_eq!(projectile.direction, direction);
        assert_ne!(camera.view_vector(), direction);
    }

    #[test]
    fn advancing_an_idle_projectile_is_a_no_op() {
        let mut projectile = Projectile::idle();
        projectile.advance(0.05, 0.016);
        assert_eq!(projectile.position, Vec3::zeros());
        assert_eq!(projectile.distance, 0.0);
        assert!(!projectile.visible);
    }
}
