//! OBJ file loader for 3D models
//!
//! Line-based parser for the subset of the Wavefront format the scene
//! uses: positions, normals, texture coordinates, and faces (polygons are
//! fan-triangulated). Files without normals get per-vertex normals
//! synthesized by area-weighted face averaging.

use super::{Mesh, Vertex};
use crate::physics::collision::Aabb;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading an OBJ file
#[derive(Error, Debug)]
pub enum ObjError {
    /// Underlying I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A numeric field failed to parse
    #[error("Parse error: {0}")]
    Parse(String),
    /// Structurally invalid data (bad indices, empty mesh)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// One corner of a face before vertex assembly
#[derive(Debug, Clone, Copy)]
struct Corner {
    position: usize,
    tex_coord: Option<usize>,
    normal: Option<usize>,
}

/// OBJ mesh loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file; the mesh is named after the file stem
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string());

        let file = File::open(path)?;
        Self::parse(BufReader::new(file), &name)
    }

    /// Parse OBJ data from any reader
    pub fn parse<R: BufRead>(reader: R, name: &str) -> Result<Mesh, ObjError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();
        let mut triangles: Vec<[Corner; 3]> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" if parts.len() >= 4 => {
                    positions.push([
                        parse_float(parts[1])?,
                        parse_float(parts[2])?,
                        parse_float(parts[3])?,
                    ]);
                }
                "vn" if parts.len() >= 4 => {
                    normals.push([
                        parse_float(parts[1])?,
                        parse_float(parts[2])?,
                        parse_float(parts[3])?,
                    ]);
                }
                "vt" if parts.len() >= 3 => {
                    tex_coords.push([parse_float(parts[1])?, parse_float(parts[2])?]);
                }
                "f" if parts.len() >= 4 => {
                    let corners: Vec<Corner> = parts[1..]
                        .iter()
                        .map(|part| parse_corner(part, positions.len()))
                        .collect::<Result<_, _>>()?;

                    // Fan triangulation handles quads and larger polygons
                    for i in 1..corners.len() - 1 {
                        triangles.push([corners[0], corners[i], corners[i + 1]]);
                    }
                }
                _ => {}
            }
        }

        if triangles.is_empty() {
            return Err(ObjError::InvalidFormat(format!(
                "mesh '{name}' has no faces"
            )));
        }

        let synthesized = if normals.is_empty() {
            Some(synthesize_normals(&positions, &triangles))
        } else {
            None
        };

        let mut vertices = Vec::with_capacity(triangles.len() * 3);
        let mut indices = Vec::with_capacity(triangles.len() * 3);
        let mut aabb = Aabb::empty();

        for triangle in &triangles {
            for corner in triangle {
                let position = positions[corner.position];
                aabb.extend(position.into());

                let normal = match (&synthesized, corner.normal) {
                    (Some(computed), _) => computed[corner.position],
                    (None, Some(index)) => *normals.get(index).ok_or_else(|| {
                        ObjError::InvalidFormat("normal index out of bounds".to_string())
                    })?,
                    (None, None) => [0.0, 1.0, 0.0],
                };

                let tex_coord = corner
                    .tex_coord
                    .and_then(|index| tex_coords.get(index))
                    .copied()
                    .unwrap_or([0.0, 0.0]);

                indices.push(vertices.len() as u32);
                vertices.push(Vertex {
                    position,
                    normal,
                    tex_coord,
                });
            }
        }

        log::debug!(
            "loaded mesh '{}': {} vertices, {} triangles",
            name,
            vertices.len(),
            triangles.len()
        );

        Ok(Mesh {
            name: name.to_string(),
            vertices,
            indices,
            aabb,
        })
    }
}

fn parse_float(field: &str) -> Result<f32, ObjError> {
    field
        .parse()
        .map_err(|_| ObjError::Parse(format!("invalid float '{field}'")))
}

/// Parse a `pos`, `pos/tex`, `pos//normal`, or `pos/tex/normal` face corner.
/// OBJ indices are 1-based; negative indices are not supported.
fn parse_corner(field: &str, position_count: usize) -> Result<Corner, ObjError> {
    let mut pieces = field.split('/');

    let position = pieces
        .next()
        .filter(|piece| !piece.is_empty())
        .ok_or_else(|| ObjError::Parse(format!("empty face corner '{field}'")))?
        .parse::<usize>()
        .map_err(|_| ObjError::Parse(format!("invalid position index '{field}'")))?
        .checked_sub(1)
        .ok_or_else(|| ObjError::InvalidFormat("position index 0".to_string()))?;

    if position >= position_count {
        return Err(ObjError::InvalidFormat(
            "position index out of bounds".to_string(),
        ));
    }

    let optional_index = |piece: Option<&str>| -> Result<Option<usize>, ObjError> {
        match piece {
            Some(text) if !text.is_empty() => text
                .parse::<usize>()
                .map_err(|_| ObjError::Parse(format!("invalid face index '{field}'")))?
                .checked_sub(1)
                .ok_or_else(|| ObjError::InvalidFormat("face index 0".to_string()))
                .map(Some),
            _ => Ok(None),
        }
    };

    let tex_coord = optional_index(pieces.next())?;
    let normal = optional_index(pieces.next())?;

    Ok(Corner {
        position,
        tex_coord,
        normal,
    })
}

/// Per-vertex normals by area-weighted averaging of the face normals.
///
/// The unnormalized cross product of two triangle edges weights each face
/// by its area; summing per shared vertex and normalizing at the end gives
/// the Gouraud-style smooth normal.
fn synthesize_normals(positions: &[[f32; 3]], triangles: &[[Corner; 3]]) -> Vec<[f32; 3]> {
    use crate::foundation::math::Vec3;

    let mut accumulated = vec![Vec3::zeros(); positions.len()];

    for triangle in triangles {
        let a = Vec3::from(positions[triangle[0].position]);
        let b = Vec3::from(positions[triangle[1].position]);
        let c = Vec3::from(positions[triangle[2].position]);
        let face_normal = (b - a).cross(&(c - a));

        for corner in triangle {
            accumulated[corner.position] += face_normal;
        }
    }

    accumulated
        .into_iter()
        .map(|normal| {
            let norm = normal.norm();
            if norm > 0.0 {
                (normal / norm).into()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}
