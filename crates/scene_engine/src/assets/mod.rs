//! Asset loading: triangle meshes and their bounding boxes

pub mod obj_loader;

use crate::physics::collision::Aabb;
use std::collections::HashMap;

/// A single mesh vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Unit normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
}

/// A loaded triangle mesh with its model-space bounding box
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Mesh name (file stem by default)
    pub name: String,
    /// Vertex data, one entry per triangle corner
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
    /// Axis-aligned bounding box over the face-referenced positions
    pub aabb: Aabb,
}

/// Name-keyed registry of mesh bounding boxes.
///
/// Read-only after loading; the collision code looks volumes up by mesh
/// name. Constructible from literal boxes so tests need no asset files.
#[derive(Debug, Default, Clone)]
pub struct AabbRegistry {
    boxes: HashMap<String, Aabb>,
}

impl AabbRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a box under a name
    pub fn insert(&mut self, name: impl Into<String>, aabb: Aabb) {
        self.boxes.insert(name.into(), aabb);
    }

    /// Register a mesh's bounding box under its name
    pub fn register_mesh(&mut self, mesh: &Mesh) {
        self.boxes.insert(mesh.name.clone(), mesh.aabb);
    }

    /// Look a box up by name
    pub fn get(&self, name: &str) -> Option<&Aabb> {
        self.boxes.get(name)
    }

    /// Number of registered boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn registry_round_trips_boxes_by_name() {
        let mut registry = AabbRegistry::new();
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        registry.insert("sphere", aabb);

        assert_eq!(registry.get("sphere"), Some(&aabb));
        assert_eq!(registry.get("missing"), None);
        assert_eq!(registry.len(), 1);
    }
}
