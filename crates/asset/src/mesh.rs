//! CPU-side mesh representation produced by the loaders.

use corelib::{Point, Vector};

use crate::{
    material::{MaterialId, Materials},
    texture::{TextureData, load_textures},
};

/// Per-vertex attribute arrays.
///
/// While parsing these are the working arrays, filled in declaration order;
/// in a [`MeshData`] they are the welded output arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    pub positions: Vec<Point>,
    /// Texture coordinates, `z` is always 0.
    pub texcoords: Vec<Point>,
    pub normals: Vec<Vector>,
}

/// Indexed triangle mesh with its materials, from the full loader.
///
/// Output vertex `i` has its attributes at slot `i` of each populated array.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<Point>,
    pub texcoords: Vec<Point>,
    pub normals: Vec<Vector>,
    /// Three vertex ids per triangle.
    pub indices: Vec<u32>,
    /// One material id per triangle.
    pub material_indices: Vec<MaterialId>,
    pub materials: Materials,
    /// Decoded textures, indexed by texture id. Empty until
    /// [`MeshData::load_images`] is called.
    pub images: Vec<TextureData>,
}

impl MeshData {
    pub(crate) fn from_parts(
        attributes: Attributes,
        indices: Vec<u32>,
        material_indices: Vec<MaterialId>,
        materials: Materials,
    ) -> Self {
        Self {
            positions: attributes.positions,
            texcoords: attributes.texcoords,
            normals: attributes.normals,
            indices,
            material_indices,
            materials,
            images: Vec::new(),
        }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.positions.is_empty() && !self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.material_indices.len()
    }

    /// Vertex ids of triangle `id`.
    pub fn triangle(&self, id: usize) -> Option<[u32; 3]> {
        let tri = self.indices.get(3 * id..3 * id + 3)?;
        Some([tri[0], tri[1], tri[2]])
    }

    /// Decode the textures referenced by the materials into `images`.
    pub fn load_images(&mut self) {
        self.images = load_textures(&self.materials);
    }
}

/// Positions plus an index buffer that points straight into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedPositions {
    pub positions: Vec<Point>,
    pub indices: Vec<u32>,
}

/// Per-triangle material ids and the registry they point into.
#[derive(Clone, Debug, Default)]
pub struct TriangleMaterials {
    pub materials: Materials,
    pub indices: Vec<MaterialId>,
}
