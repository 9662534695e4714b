//! Per-frame draw-list types
//!
//! The entire contract between the scene core and a renderer: one view and
//! one projection matrix per frame, and per drawable object a model matrix
//! plus an integer object tag the renderer uses for per-object shading.
//! GPU submission lives outside this crate.

use crate::foundation::math::Mat4;

/// A single drawable object
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand {
    /// Model-to-world transform
    pub model: Mat4,
    /// Object tag forwarded to the renderer
    pub object: u32,
}

/// All draw commands for one frame plus the camera matrices
#[derive(Debug, Clone)]
pub struct DrawList {
    /// World-to-camera transform for the frame
    pub view: Mat4,
    /// Projection transform for the frame
    pub projection: Mat4,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty list with the frame's camera matrices
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view,
            projection,
            commands: Vec::new(),
        }
    }

    /// Append a drawable
    pub fn push(&mut self, model: Mat4, object: u32) {
        self.commands.push(DrawCommand { model, object });
    }

    /// The frame's draw commands in submission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of drawables this frame
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the list holds no drawables
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
