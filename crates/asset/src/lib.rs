//! Asset loading: OBJ meshes, MTL material libraries and their textures.
//!
//! A mesh file is read line by line; faces are fan-triangulated, their
//! indices resolved against the attributes declared so far and welded into
//! one vertex per distinct (material, position, texcoord, normal).

pub mod decode;
pub mod error;
pub mod face;
pub mod material;
pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod path;
pub mod scan;
pub mod texture;
pub mod weld;

pub use error::{AssetError, AssetResult, RecordError};
pub use material::{Material, MaterialId, Materials, TextureId};
pub use mesh::{IndexedPositions, MeshData, TriangleMaterials};
pub use obj::{
    LoadOutcome, read_indexed_positions, read_materials, read_mesh_data, read_mesh_data_from_str,
    read_positions,
};
pub use texture::{TextureData, load_textures};
