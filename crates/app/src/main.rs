//! meshinfo: load an OBJ mesh and report what was read.
//!
//! Usage: meshinfo [--mode=flat|indexed|materials|full] [--images] <mesh.obj>

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Flat,
    Indexed,
    Materials,
    Full,
}

fn parse_mode_arg() -> Mode {
    // Accept: --mode=flat|indexed|materials|full
    let mut mode = Mode::Full;
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--mode=") {
            mode = match val.to_ascii_lowercase().as_str() {
                "flat" | "positions" => Mode::Flat,
                "indexed" => Mode::Indexed,
                "materials" | "mtl" => Mode::Materials,
                "full" | "all" => Mode::Full,
                other => {
                    log::warn!("Unknown mode '{}', falling back to full.", other);
                    Mode::Full
                }
            };
        }
    }
    mode
}

fn parse_images_arg() -> bool {
    // --images[=on|off], off by default
    for arg in std::env::args() {
        if arg == "--images" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--images=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_mesh_arg() -> Option<PathBuf> {
    std::env::args().skip(1).find(|a| !a.starts_with("--")).map(PathBuf::from)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mode = parse_mode_arg();
    let images = parse_images_arg();
    let Some(path) = parse_mesh_arg() else {
        bail!("usage: meshinfo [--mode=flat|indexed|materials|full] [--images] <mesh.obj>");
    };
    log::info!("meshinfo: mode={:?}, images={}, mesh={}", mode, images, path.display());

    match mode {
        Mode::Flat => {
            let (positions, error) = asset::read_positions(&path).into_parts();
            log::info!("{} triangles", positions.len() / 3);
            if let Some(err) = error {
                return Err(err).context("partial load");
            }
        }
        Mode::Indexed => {
            let (mesh, error) = asset::read_indexed_positions(&path).into_parts();
            log::info!(
                "{} positions, {} triangles",
                mesh.positions.len(),
                mesh.indices.len() / 3
            );
            if let Some(err) = error {
                return Err(err).context("partial load");
            }
        }
        Mode::Materials => {
            let (result, error) = asset::read_materials(&path).into_parts();
            log::info!("{} triangles", result.indices.len());
            for (id, material) in result.materials.iter().enumerate() {
                let used = result.indices.iter().filter(|&&m| m as usize == id).count();
                log::info!("  [{}] '{}': {} triangles", id, material.name, used);
            }
            if let Some(err) = error {
                return Err(err).context("partial load");
            }
        }
        Mode::Full => {
            let mut mesh = asset::read_mesh_data(&path)
                .with_context(|| format!("Failed to load mesh {}", path.display()))?;
            if images {
                mesh.load_images();
                let decoded = mesh.images.iter().filter(|img| img.is_valid()).count();
                log::info!("{} of {} images decoded", decoded, mesh.images.len());
            }
            for material in mesh.materials.iter() {
                log::info!(
                    "  '{}': diffuse={:?} textures={}",
                    material.name,
                    material.diffuse.to_array(),
                    material.textures().count()
                );
            }
            log::info!(
                "{} vertices, {} triangles",
                mesh.positions.len(),
                mesh.triangle_count()
            );
        }
    }

    log::info!("Done.");
    Ok(())
}
