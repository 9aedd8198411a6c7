//! Vertex welding: one output vertex per distinct attribute combination.

use std::collections::HashMap;

use crate::{error::RecordError, material::MaterialId, mesh::Attributes};

/// Index buffer entry for the vertex at `index`.
pub(crate) fn vertex_id(index: usize) -> Result<u32, RecordError> {
    u32::try_from(index).map_err(|_| RecordError::TooManyVertices)
}

/// Resolved attribute indices of one face corner, tagged with its material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub material: MaterialId,
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// Maps [`VertexKey`]s to output vertex ids, assigned in first-seen order.
#[derive(Debug, Default)]
pub struct Welder {
    remap: HashMap<VertexKey, u32>,
}

impl Welder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output vertex id for `key`.
    ///
    /// On first sight the referenced attributes are copied from `working`
    /// into `out`; texcoords and normals only when the key has them, so
    /// those arrays stay aligned with positions only for meshes that give
    /// them on every corner.
    ///
    /// Indices in `key` must be valid for `working`. Fails once the next id
    /// would not fit in `u32`.
    pub fn weld(
        &mut self,
        key: VertexKey,
        working: &Attributes,
        out: &mut Attributes,
    ) -> Result<u32, RecordError> {
        if let Some(&id) = self.remap.get(&key) {
            return Ok(id);
        }
        let id = vertex_id(self.remap.len())?;
        if let Some(t) = key.texcoord {
            out.texcoords.push(working.texcoords[t]);
        }
        if let Some(n) = key.normal {
            out.normals.push(working.normals[n]);
        }
        out.positions.push(working.positions[key.position]);
        self.remap.insert(key, id);
        Ok(id)
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.remap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remap.is_empty()
    }
}
