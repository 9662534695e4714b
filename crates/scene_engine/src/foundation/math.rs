//! Math utilities and types
//!
//! Provides the vector and matrix types used throughout the scene core,
//! plus the matrix builders the camera and draw-list code need.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Unit direction for spherical camera angles.
///
/// `theta` is the azimuth in the ZX plane measured from +Z, `phi` the polar
/// angle measured from +Y. The result is unit length for any input.
pub fn spherical_direction(theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        phi.sin() * theta.sin(),
        phi.cos(),
        phi.sin() * theta.cos(),
    )
}

/// Component-wise inequality test with an absolute tolerance.
///
/// Mirrors how the orientation code decides whether the view vector moved
/// this frame: any single component differing by more than `epsilon` counts.
pub fn differs(a: Vec3, b: Vec3, epsilon: f32) -> bool {
    (a.x - b.x).abs() > epsilon || (a.y - b.y).abs() > epsilon || (a.z - b.z).abs() > epsilon
}

/// Extension trait for Mat4 with the scene's matrix builders
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a rotation matrix around an arbitrary axis.
    ///
    /// The axis does not need to be normalized.
    fn rotation_about(axis: Vec3, angle: f32) -> Mat4;

    /// Create a view matrix from the camera position, view vector, and up
    /// vector.
    ///
    /// Built from an explicit view vector rather than a target point because
    /// the camera rig owns and maintains the view vector directly.
    fn camera_view(position: Vec3, view: Vec3, up: Vec3) -> Mat4;

    /// Create a perspective projection matrix.
    ///
    /// `near` and `far` are view-space plane positions on the negative Z
    /// axis (e.g. near = -0.1, far = -2400.0).
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create an orthographic projection matrix for the same negative-axis
    /// plane convention as [`Mat4Ext::perspective`].
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn rotation_about(axis: Vec3, angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Unit::new_normalize(axis), angle)
    }

    fn camera_view(position: Vec3, view: Vec3, up: Vec3) -> Mat4 {
        // Right-handed camera basis: w points backwards, u right, v up.
        let w = (-view).normalize();
        let u = up.cross(&w).normalize();
        let v = w.cross(&u);

        Mat4::new(
            u.x, u.y, u.z, -u.dot(&position),
            v.x, v.y, v.z, -v.dot(&position),
            w.x, w.y, w.z, -w.dot(&position),
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // Frustum-to-parallelepiped mapping followed by the orthographic
        // map; the final negation accounts for w = -z after the perspective
        // divide in this negative-plane convention.
        let top = near.abs() * (fov_y / 2.0).tan();
        let bottom = -top;
        let right = top * aspect;
        let left = -right;

        let p = Mat4::new(
            near, 0.0, 0.0, 0.0,
            0.0, near, 0.0, 0.0,
            0.0, 0.0, near + far, -far * near,
            0.0, 0.0, 1.0, 0.0,
        );

        -(Mat4::orthographic(left, right, bottom, top, near, far) * p)
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new(
            2.0 / (right - left), 0.0, 0.0, -(right + left) / (right - left),
            0.0, 2.0 / (top - bottom), 0.0, -(top + bottom) / (top - bottom),
            0.0, 0.0, 2.0 / (far - near), -(far + near) / (far - near),
            0.0, 0.0, 0.0, 1.0,
        )
    }
}
