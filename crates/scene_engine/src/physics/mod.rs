//! Collision volumes and push-out resolution

pub mod collision;

pub use collision::{push_out_of_aabb, push_out_of_sphere, Aabb, BoundingSphere, WorldBounds};
