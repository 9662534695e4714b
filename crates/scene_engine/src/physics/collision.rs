//! Primitive collision volumes and push-out correction
//!
//! Collision response here is deliberately coarse: a point found inside a
//! volume is displaced outward from the volume's center by a fixed distance
//! rather than to the exact contact surface. Callers compose the individual
//! corrections sequentially, each step reading the previous step's output.

use crate::foundation::math::Vec3;

/// An axis-aligned bounding box defined by component-wise corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Component-wise minimum corner
    pub min: Vec3,
    /// Component-wise maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    /// Closed-interval containment test
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Box transformed by a translation and a component-wise scale.
    ///
    /// Both corners are mapped through `translation + scale * corner`.
    /// Scale components must be positive so the corner ordering survives;
    /// rotation is intentionally not part of this transform.
    pub fn transformed(&self, translation: Vec3, scale: Vec3) -> Self {
        Self {
            min: translation + self.min.component_mul(&scale),
            max: translation + self.max.component_mul(&scale),
        }
    }

    /// Grow the box to contain a point
    pub fn extend(&mut self, point: Vec3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// An inverted box that any first [`Aabb::extend`] call will collapse
    /// onto the extended point. Used while accumulating mesh bounds.
    pub fn empty() -> Self {
        Self {
            min: Vec3::new(f32::MAX, f32::MAX, f32::MAX),
            max: Vec3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Cubic world bounds with an inward snap on violation.
///
/// Any axis of a point found beyond `±limit` is snapped to `±snap`; this is
/// a clamp, not a push-out, so a fast-moving point cannot tunnel through
/// the enclosing skybox.
#[derive(Debug, Clone, Copy)]
pub struct WorldBounds {
    /// Containment limit per axis
    pub limit: f32,
    /// Value an offending axis is snapped to
    pub snap: f32,
}

impl WorldBounds {
    /// Creates bounds with the given limit and snap values
    pub fn new(limit: f32, snap: f32) -> Self {
        Self { limit, snap }
    }

    /// Clamp a point into the bounds
    pub fn clamp(&self, mut point: Vec3) -> Vec3 {
        for i in 0..3 {
            if point[i] > self.limit {
                point[i] = self.snap;
            }
            if point[i] < -self.limit {
                point[i] = -self.snap;
            }
        }
        point
    }
}

/// Push a point out of a sphere.
///
/// A point within `epsilon` of the surface (or inside it) is displaced
/// outward from the center by `push` units; any other point is returned
/// unchanged.
pub fn push_out_of_sphere(point: Vec3, sphere: &BoundingSphere, push: f32, epsilon: f32) -> Vec3 {
    let offset = point - sphere.center;
    if offset.norm() - sphere.radius < epsilon {
        point + offset.normalize() * push
    } else {
        point
    }
}

/// Push a point out of an axis-aligned box.
///
/// A contained point is displaced outward from the box center by `push`
/// units; any other point is returned unchanged.
pub fn push_out_of_aabb(point: Vec3, aabb: &Aabb, push: f32) -> Vec3 {
    if aabb.contains(point) {
        point + (point - aabb.center()).normalize() * push
    } else {
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bounds_clamp_snaps_each_axis_inward() {
        let bounds = WorldBounds::new(250.0, 240.0);
        let clamped = bounds.clamp(Vec3::new(300.0, -260.0, 10.0));
        assert_eq!(clamped, Vec3::new(240.0, -240.0, 10.0));

        let inside = Vec3::new(249.0, -249.0, 0.0);
        assert_eq!(bounds.clamp(inside), inside);
    }

    #[test]
    fn sphere_push_out_moves_along_center_ray() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, -250.0, 0.0), 200.0);
        let inside = Vec3::new(0.0, -100.0, 0.0);

        let pushed = push_out_of_sphere(inside, &sphere, 10.0, 1e-12);
        assert_relative_eq!(pushed.y, -90.0, epsilon = 1e-4);
        assert_relative_eq!(pushed.x, 0.0, epsilon = 1e-4);

        let outside = Vec3::new(0.0, 0.0, 0.0);
        assert_eq!(push_out_of_sphere(outside, &sphere, 10.0, 1e-12), outside);
    }

    #[test]
    fn aabb_push_out_leaves_outside_points_alone() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let outside = Vec3::new(2.0, 0.0, 0.0);
        assert_eq!(push_out_of_aabb(outside, &aabb, 10.0), outside);

        let inside = Vec3::new(0.5, 0.0, 0.0);
        let pushed = push_out_of_aabb(inside, &aabb, 10.0);
        assert_relative_eq!(pushed.x, 10.5, epsilon = 1e-4);
        assert!(!aabb.contains(pushed));
    }

    #[test]
    fn aabb_push_out_is_idempotent_for_single_volumes() {
        let aabb = Aabb::new(Vec3::new(-3.0, -3.0, -3.0), Vec3::new(3.0, 3.0, 3.0));
        let once = push_out_of_aabb(Vec3::new(1.0, 1.0, 0.5), &aabb, 10.0);
        let twice = push_out_of_aabb(once, &aabb, 10.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn transformed_box_scales_and_translates_corners() {
        let unit = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let moved = unit.transformed(Vec3::new(10.0, 0.0, 0.0), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(moved.min, Vec3::new(8.0, -3.0, -4.0));
        assert_eq!(moved.max, Vec3::new(12.0, 3.0, 4.0));
        assert_eq!(moved.center(), Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn empty_box_collapses_onto_first_point() {
        let mut aabb = Aabb::empty();
        aabb.extend(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(aabb.min, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, -2.0, 3.0));

        aabb.extend(Vec3::new(-1.0, 4.0, 0.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
    }
}
