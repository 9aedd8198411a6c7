//! Material registry: named surface descriptions and interned texture paths.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use corelib::Color;

/// Index into [`Materials`].
pub type MaterialId = u32;
/// Index into the texture path table of [`Materials`].
pub type TextureId = u32;

/// Name given to the material assigned to faces without a usable `usemtl`.
pub const DEFAULT_MATERIAL_NAME: &str = "default";

/// Surface description read from a `newmtl` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Color,
    pub specular: Color,
    pub emission: Color,
    pub transmission: Color,
    /// Blinn-Phong exponent (`Ns`).
    pub ns: f32,
    /// Index of refraction (`Ni`).
    pub ni: f32,
    pub diffuse_texture: Option<TextureId>,
    pub specular_texture: Option<TextureId>,
    pub ns_texture: Option<TextureId>,
}

impl Material {
    /// Black material with no textures.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: Color::BLACK,
            specular: Color::BLACK,
            emission: Color::BLACK,
            transmission: Color::BLACK,
            ns: 0.0,
            ni: 0.0,
            diffuse_texture: None,
            specular_texture: None,
            ns_texture: None,
        }
    }

    /// Light gray diffuse material used when nothing else applies.
    pub fn fallback() -> Self {
        Self {
            diffuse: Color::gray(0.8),
            ..Self::new(DEFAULT_MATERIAL_NAME)
        }
    }

    /// All texture ids referenced by this material.
    pub fn textures(&self) -> impl Iterator<Item = TextureId> {
        [self.diffuse_texture, self.specular_texture, self.ns_texture]
            .into_iter()
            .flatten()
    }
}

/// Materials addressed by dense ids, plus the texture files they use.
#[derive(Clone, Debug, Default)]
pub struct Materials {
    materials: Vec<Material>,
    by_name: HashMap<String, MaterialId>,
    textures: Vec<PathBuf>,
    texture_ids: HashMap<PathBuf, TextureId>,
    default_id: Option<MaterialId>,
}

impl Materials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `material` under `name` and return its id.
    ///
    /// Re-inserting an existing name replaces the material in place, the id
    /// stays the same.
    pub fn insert(&mut self, mut material: Material, name: &str) -> MaterialId {
        material.name = name.to_owned();
        if let Some(&id) = self.by_name.get(name) {
            self.materials[id as usize] = material;
            return id;
        }
        let id = self.materials.len() as MaterialId;
        self.materials.push(material);
        self.by_name.insert(name.to_owned(), id);
        id
    }

    pub fn find(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    /// Id of the fallback material, created on first use.
    pub fn default_id(&mut self) -> MaterialId {
        if let Some(id) = self.default_id {
            return id;
        }
        let id = match self.find(DEFAULT_MATERIAL_NAME) {
            Some(id) => id,
            None => self.insert(Material::fallback(), DEFAULT_MATERIAL_NAME),
        };
        self.default_id = Some(id);
        id
    }

    pub fn count(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Intern a texture path; the same path always maps to the same id.
    pub fn intern_texture(&mut self, path: impl Into<PathBuf>) -> TextureId {
        let path = path.into();
        if let Some(&id) = self.texture_ids.get(&path) {
            return id;
        }
        let id = self.textures.len() as TextureId;
        self.textures.push(path.clone());
        self.texture_ids.insert(path, id);
        id
    }

    pub fn texture_path(&self, id: TextureId) -> Option<&Path> {
        self.textures.get(id as usize).map(PathBuf::as_path)
    }

    /// Texture paths in id order.
    pub fn texture_paths(&self) -> &[PathBuf] {
        &self.textures
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl std::ops::Index<MaterialId> for Materials {
    type Output = Material;

    fn index(&self, id: MaterialId) -> &Material {
        &self.materials[id as usize]
    }
}

impl std::ops::IndexMut<MaterialId> for Materials {
    fn index_mut(&mut self, id: MaterialId) -> &mut Material {
        &mut self.materials[id as usize]
    }
}
