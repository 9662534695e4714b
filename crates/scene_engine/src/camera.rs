//! Camera rig state machine
//!
//! Owns the camera position, look-at target, view/up basis, and the
//! spherical angles driving free look. Two mutually exclusive look modes:
//! free look (look-at derived from the spherical angles every frame) and
//! target lock (look-at tracks the nearest visible target).
//!
//! The up vector is maintained incrementally: whenever the view vector
//! moves, the up vector is rotated by the same rotation. A full
//! re-derivation would snap visibly when the look-at target jumps (mode
//! switches), so it is never performed; the cost is slow numerical drift
//! over very long sessions.

use crate::foundation::math::{
    constants::{HALF_PI, PI},
    differs, spherical_direction, Mat4, Mat4Ext, Vec3,
};
use crate::input::InputState;
use serde::{Deserialize, Serialize};

/// Lower clamp for the polar angle (3π/32)
pub const PHI_MIN: f32 = 3.0 * PI / 32.0;

/// Upper clamp for the polar angle (29π/32)
pub const PHI_MAX: f32 = 29.0 * PI / 32.0;

/// View-space near plane position
pub const NEAR_PLANE: f32 = -0.1;

/// View-space far plane position
pub const FAR_PLANE: f32 = -2400.0;

/// Vertical field of view for perspective projection (π/3)
const FIELD_OF_VIEW: f32 = PI / 3.0;

/// Projection selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Perspective projection with a fixed field of view
    Perspective,
    /// Orthographic projection zoomed by the camera distance
    Orthographic,
}

/// Camera look mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookMode {
    /// Look-at point derived from the spherical angles
    FreeLook,
    /// Look-at point tracks the target with the given index
    TargetLocked {
        /// Index into the target slice passed to
        /// [`CameraRig::update_orientation`]
        index: usize,
    },
}

/// A point the camera can lock onto
#[derive(Debug, Clone, Copy)]
pub struct LockTarget {
    /// Animated world position this frame
    pub position: Vec3,
    /// Invisible targets are excluded from acquisition and break an
    /// existing lock
    pub visible: bool,
}

/// Tunable camera speeds, overridable from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Base translation speed in world units per frame
    pub move_speed: f32,
    /// Base roll speed in radians per frame
    pub roll_speed: f32,
    /// Pointer-drag to angle factor
    pub drag_sensitivity: f32,
    /// Scroll to distance factor
    pub zoom_sensitivity: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            move_speed: 0.05,
            roll_speed: 0.001,
            drag_sensitivity: 0.01,
            zoom_sensitivity: 0.1,
        }
    }
}

/// Camera state machine.
///
/// Invariant: `view` is the unit vector from `position` toward `look_at`,
/// recomputed after every orientation update.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub look_at: Vec3,
    /// Up vector; maintained by incremental rotation, never re-derived
    pub up: Vec3,
    /// Azimuth in the ZX plane
    pub theta: f32,
    /// Polar angle from +Y, clamped to `[PHI_MIN, PHI_MAX]`
    pub phi: f32,
    /// Distance to the free-look target, clamped above `f32::EPSILON`
    pub distance: f32,
    /// Current look mode
    pub mode: LookMode,
    /// Speed tuning
    pub tuning: CameraTuning,
    view: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraTuning::default())
    }
}

impl CameraRig {
    /// Create a rig at the origin looking along the initial spherical
    /// direction (theta 0, phi π/2, distance 3.5)
    pub fn new(tuning: CameraTuning) -> Self {
        let position = Vec3::zeros();
        let theta = 0.0;
        let phi = HALF_PI;
        let distance = 3.5;
        let look_at = position + distance * spherical_direction(theta, phi);

        Self {
            position,
            look_at,
            up: Vec3::new(0.0, 1.0, 0.0),
            theta,
            phi,
            distance,
            mode: LookMode::FreeLook,
            tuning,
            view: (look_at - position).normalize(),
        }
    }

    /// Unit view vector (derived state)
    pub fn view_vector(&self) -> Vec3 {
        self.view
    }

    /// Unit right vector, recomputed from the current view and up vectors
    pub fn right_vector(&self) -> Vec3 {
        self.view.cross(&self.up).normalize()
    }

    /// Translate and roll from the held movement keys.
    ///
    /// Every translation step is `(move_speed + dt)` along the view, right,
    /// or up vector; roll rotates the up vector about the view vector by
    /// `±(roll_speed + dt)` radians. Rolling is a rotation of the up vector
    /// only, not a camera pitch.
    pub fn apply_movement(&mut self, input: &InputState, dt: f32) {
        let step = self.tuning.move_speed + dt;
        let right = self.right_vector();

        if input.forward {
            self.position += step * self.view;
        }
        if input.backward {
            self.position -= step * self.view;
        }
        if input.strafe_left {
            self.position -= step * right;
        }
        if input.strafe_right {
            self.position += step * right;
        }

        let roll = self.tuning.roll_speed + dt;
        if input.roll_ccw {
            self.up = Mat4::rotation_about(self.view, roll).transform_vector(&self.up);
        }
        if input.roll_cw {
            self.up = Mat4::rotation_about(self.view, -roll).transform_vector(&self.up);
        }

        if input.vertical {
            if input.invert_vertical {
                self.position -= step * self.up;
            } else {
                self.position += step * self.up;
            }
        }
    }

    /// Replace the camera position (collision-corrected by the caller).
    ///
    /// The view vector is not recomputed here; the next
    /// [`CameraRig::update_orientation`] call does that.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Per-frame orientation update.
    ///
    /// With the lock toggle off the look-at point follows the spherical
    /// angles. With it on, a lock is acquired on the nearest visible target
    /// (ties to the lowest index); if none is visible, or a held lock's
    /// target disappears, the toggle is cleared and the rig reverts to free
    /// look. Afterwards the view vector is re-derived and the up vector is
    /// rotated by the old-view-to-new-view rotation.
    pub fn update_orientation(&mut self, input: &mut InputState, targets: &[LockTarget]) {
        let old_view = self.view;

        if input.look_lock {
            match self.mode {
                LookMode::FreeLook => {
                    if let Some(index) = nearest_visible(self.position, targets) {
                        log::debug!("camera locked onto target {index}");
                        self.mode = LookMode::TargetLocked { index };
                        self.look_at = targets[index].position;
                    } else {
                        log::debug!("no visible target to lock onto");
                        input.look_lock = false;
                        self.free_look_at();
                    }
                }
                LookMode::TargetLocked { index } => {
                    if targets.get(index).is_some_and(|t| t.visible) {
                        self.look_at = targets[index].position;
                    } else {
                        log::debug!("locked target {index} lost; reverting to free look");
                        self.mode = LookMode::FreeLook;
                        input.look_lock = false;
                        self.free_look_at();
                    }
                }
            }
        } else {
            self.mode = LookMode::FreeLook;
            self.free_look_at();
        }

        self.view = (self.look_at - self.position).normalize();
        self.stabilize_up(old_view);
    }

    /// Pointer-drag update of the spherical angles; ignored while locked
    pub fn on_pointer_drag(&mut self, dx: f32, dy: f32) {
        if matches!(self.mode, LookMode::TargetLocked { .. }) {
            return;
        }
        self.theta -= self.tuning.drag_sensitivity * dx;
        self.phi = (self.phi + self.tuning.drag_sensitivity * dy).clamp(PHI_MIN, PHI_MAX);
    }

    /// Scroll update of the camera distance.
    ///
    /// The distance can never reach zero: a look-at basis built from a
    /// zero-length view vector would divide by zero.
    pub fn on_scroll(&mut self, dy: f32) {
        self.distance -= self.tuning.zoom_sensitivity * dy;
        if self.distance < f32::EPSILON {
            self.distance = f32::EPSILON;
        }
    }

    /// View matrix from the current position and basis
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::camera_view(self.position, self.view, self.up)
    }

    /// Projection matrix for the given mode and aspect ratio
    pub fn projection_matrix(&self, projection: Projection, aspect: f32) -> Mat4 {
        match projection {
            Projection::Perspective => {
                Mat4::perspective(FIELD_OF_VIEW, aspect, NEAR_PLANE, FAR_PLANE)
            }
            Projection::Orthographic => {
                // Orthographic zoom follows the camera distance
                let top = 1.5 * self.distance / 2.5;
                let right = top * aspect;
                Mat4::orthographic(-right, right, -top, top, NEAR_PLANE, FAR_PLANE)
            }
        }
    }

    fn free_look_at(&mut self) {
        self.look_at = self.position + self.distance * spherical_direction(self.theta, self.phi);
    }

    /// Rotate the up vector by the rotation that carried the old view
    /// vector onto the new one, keeping the basis consistent across
    /// discontinuous look-at jumps.
    fn stabilize_up(&mut self, old_view: Vec3) {
        if !differs(self.view, old_view, f32::EPSILON) {
            return;
        }

        let denom = self.view.norm() * old_view.norm();
        let angle = (self.view.dot(&old_view) / denom).clamp(-1.0, 1.0).acos();
        let axis = old_view.cross(&self.view);
        if axis.norm() <= f32::EPSILON {
            // Antiparallel views leave no stable rotation axis
            return;
        }
        self.up = Mat4::rotation_about(axis, angle).transform_vector(&self.up);
    }
}

/// Nearest visible target by Euclidean distance; ties break to the lowest
/// index, invisible targets are excluded entirely.
fn nearest_visible(position: Vec3, targets: &[LockTarget]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, target) in targets.iter().enumerate() {
        if !target.visible {
            continue;
        }
        let distance = (target.position - position).norm();
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}
