//! Face vertex references, fan triangulation and index resolution.

use crate::error::RecordError;

/// Raw `p/t/n` indices of one face corner, as written in the file.
///
/// Indices are 1-based, negative values count back from the most recently
/// declared attribute, and 0 in `texcoord`/`normal` means "not given".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceVertexRef {
    pub position: i32,
    pub texcoord: i32,
    pub normal: i32,
}

impl FaceVertexRef {
    pub const fn new(position: i32, texcoord: i32, normal: i32) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }

    pub const fn position_only(position: i32) -> Self {
        Self::new(position, 0, 0)
    }
}

/// Corner triples of the triangle fan anchored at corner 0.
///
/// A face with `corners` vertices yields `corners - 2` triangles
/// `(0, k, k + 1)`; fewer than 3 corners yield nothing.
pub fn fan(corners: usize) -> impl Iterator<Item = [usize; 3]> {
    (1..corners.saturating_sub(1)).map(|k| [0, k, k + 1])
}

/// Fan-triangulate a face, yielding the references of each triangle.
pub fn fan_triangles(refs: &[FaceVertexRef]) -> impl Iterator<Item = [FaceVertexRef; 3]> + '_ {
    fan(refs.len()).map(move |[a, b, c]| [refs[a], refs[b], refs[c]])
}

/// Resolve a mandatory index against an array of `len` entries.
///
/// Positive indices are 1-based, negative ones are relative to `len` at the
/// time the face is read. Anything outside `0..len` is rejected.
pub fn resolve(raw: i32, len: usize, attribute: &'static str) -> Result<usize, RecordError> {
    let resolved = if raw < 0 {
        len as i64 + i64::from(raw)
    } else {
        i64::from(raw) - 1
    };
    if resolved < 0 || resolved >= len as i64 {
        return Err(RecordError::UnresolvableIndex {
            attribute,
            raw,
            len,
        });
    }
    Ok(resolved as usize)
}

/// Like [`resolve`] but 0 means the attribute is absent.
pub fn resolve_optional(
    raw: i32,
    len: usize,
    attribute: &'static str,
) -> Result<Option<usize>, RecordError> {
    if raw == 0 {
        Ok(None)
    } else {
        resolve(raw, len, attribute).map(Some)
    }
}
