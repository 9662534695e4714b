//! # Scene Engine
//!
//! The scene, camera, and collision core of an interactive 3D space
//! viewer. The crate owns everything with per-frame behavior — the camera
//! rig state machine, push-out collision resolution, Bézier ping-pong
//! animation, input state tracking, and draw-list assembly — plus the
//! startup-time loading of triangle meshes and their bounding boxes.
//!
//! Window creation, GPU submission, and text overlays are external
//! collaborators: they feed [`input::InputTracker`] with events and consume
//! the [`render::DrawList`] the frame produces.
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut camera = CameraRig::default();
//! let mut input = InputState::default();
//!
//! // one frame: move, then re-orient
//! camera.apply_movement(&input, 1.0 / 60.0);
//! camera.update_orientation(&mut input, &[]);
//! let view = camera.view_matrix();
//! # let _ = view;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod camera;
pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{BezierTrack, CubicBezier, PingPong, SweepDirection},
        assets::{obj_loader::ObjLoader, AabbRegistry, Mesh, Vertex},
        camera::{CameraRig, CameraTuning, LockTarget, LookMode, Projection},
        config::{Config, ConfigError},
        foundation::{
            math::{Mat4, Mat4Ext, Vec3},
            time::Timer,
        },
        input::{InputState, InputTracker, KeyCode, MouseButton},
        physics::collision::{
            push_out_of_aabb, push_out_of_sphere, Aabb, BoundingSphere, WorldBounds,
        },
        render::{DrawCommand, DrawList},
    };
}
