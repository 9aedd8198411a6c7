//! MTL material library reader.

use std::{io::BufRead, path::Path};

use crate::{
    decode::{decode_color, decode_name, decode_scalar},
    error::{AssetResult, RecordError},
    material::{Material, MaterialId, Materials},
    path::{directory_of, resolve},
    scan::{Line, LineScanner},
};

/// Load the material library at `path` into `materials`.
///
/// Texture map names are resolved against the library's own directory.
pub fn load_mtl(path: &Path, materials: &mut Materials) -> AssetResult<()> {
    log::info!("Loading materials '{}'", path.display());
    parse_mtl(LineScanner::open(path)?, materials)
}

pub(crate) fn parse_mtl<R: BufRead>(
    scanner: LineScanner<R>,
    materials: &mut Materials,
) -> AssetResult<()> {
    let base_dir = directory_of(scanner.path());
    let path = scanner.path().to_path_buf();
    let textures_before = materials.texture_count();
    let mut defined = 0usize;
    // Properties before the first `newmtl` have no target and are skipped.
    let mut current: Option<MaterialId> = None;

    for line in scanner {
        let line = line?;
        let Some((tag, operands)) = line.record() else {
            continue;
        };

        if tag == "newmtl" {
            if let Some(name) = decode_name(operands) {
                current = Some(materials.insert(Material::new(name), name));
                defined += 1;
            }
            continue;
        }

        let Some(id) = current else {
            continue;
        };

        if let "map_Kd" | "map_Ks" | "map_Ns" = tag {
            if let Some(name) = decode_name(operands) {
                let texture = Some(materials.intern_texture(resolve(&base_dir, name)));
                let material = &mut materials[id];
                match tag {
                    "map_Kd" => material.diffuse_texture = texture,
                    "map_Ks" => material.specular_texture = texture,
                    _ => material.ns_texture = texture,
                }
            }
            continue;
        }

        let material = &mut materials[id];
        let applied = match tag {
            "Kd" => decode_color("Kd", operands).map(|c| material.diffuse = c),
            "Ks" => decode_color("Ks", operands).map(|c| material.specular = c),
            "Ke" => decode_color("Ke", operands).map(|c| material.emission = c),
            "Tf" => decode_color("Tf", operands).map(|c| material.transmission = c),
            "Ns" => decode_scalar("Ns", operands).map(|x| material.ns = x),
            "Ni" => decode_scalar("Ni", operands).map(|x| material.ni = x),
            _ => Ok(()),
        };

        if let Err(err) = applied {
            warn_ignored(&path, &line, &err);
        }
    }

    log::info!(
        "Materials '{}': {} defined, {} new textures",
        path.display(),
        defined,
        materials.texture_count() - textures_before
    );
    Ok(())
}

fn warn_ignored(path: &Path, line: &Line, err: &RecordError) {
    log::warn!(
        "{}:{}: ignoring property ({}): {}",
        path.display(),
        line.number,
        err,
        line.text.trim()
    );
}
