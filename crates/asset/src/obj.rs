//! OBJ mesh reader.
//!
//! All entry points share one line loop (`drive`) and differ only in the
//! `MeshSink` that receives the decoded records:
//!
//! - [`read_positions`]: flat triangle soup, 3 positions per triangle.
//! - [`read_indexed_positions`]: declared positions plus an index buffer.
//! - [`read_materials`]: one material id per triangle, following `mtllib`.
//! - [`read_mesh_data`]: everything, welded on (material, p, t, n).
//!
//! The first three return what was read before a failure alongside the
//! error, the last one discards it.
//!
//! Faces are resolved as they are read, so negative indices refer to the
//! attributes declared *before* the face, not to the end of the file.

use std::{
    io::{self, BufRead},
    path::Path,
};

use corelib::{Point, Vector};

use crate::{
    decode::{decode_face, decode_name, decode_normal, decode_position, decode_texcoord},
    error::{AssetError, AssetResult, RecordError},
    face::{FaceVertexRef, fan_triangles, resolve, resolve_optional},
    material::{MaterialId, Materials},
    mesh::{Attributes, IndexedPositions, MeshData, TriangleMaterials},
    mtl::load_mtl,
    path::{directory_of, resolve as resolve_path},
    scan::LineScanner,
    weld::{VertexKey, Welder, vertex_id},
};

/// Result of a loader that keeps partial data on failure.
///
/// `value` holds everything accumulated up to the failing line; check
/// `error` rather than assuming empty data means nothing was read.
#[derive(Debug)]
#[must_use]
pub struct LoadOutcome<T> {
    pub value: T,
    pub error: Option<AssetError>,
}

impl<T> LoadOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Drop the partial data if there was an error.
    pub fn into_result(self) -> AssetResult<T> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }

    pub fn into_parts(self) -> (T, Option<AssetError>) {
        (self.value, self.error)
    }
}

/// Load flat triangle positions: triangle `i` is `positions[3i..3i + 3]`.
///
/// N-gons are fan-triangulated and shared positions are repeated.
pub fn read_positions(path: impl AsRef<Path>) -> LoadOutcome<Vec<Point>> {
    let path = path.as_ref();
    log::info!("Loading mesh '{}'", path.display());
    let (sink, error) = load_path(path, FlatPositions::default());
    if error.is_none() {
        log::info!("Mesh '{}': {} positions", path.display(), sink.positions.len());
    }
    LoadOutcome {
        value: sink.positions,
        error,
    }
}

/// Load positions in declaration order and the triangle index buffer.
pub fn read_indexed_positions(path: impl AsRef<Path>) -> LoadOutcome<IndexedPositions> {
    let path = path.as_ref();
    log::info!("Loading indexed mesh '{}'", path.display());
    let (sink, error) = load_path(path, IndexedSink::default());
    if error.is_none() {
        log::info!(
            "Indexed mesh '{}': {} positions, {} indices",
            path.display(),
            sink.mesh.positions.len(),
            sink.mesh.indices.len()
        );
    }
    LoadOutcome {
        value: sink.mesh,
        error,
    }
}

/// Load the material of every triangle of a mesh file.
///
/// Takes the `.obj` path; material libraries are found through `mtllib`.
pub fn read_materials(path: impl AsRef<Path>) -> LoadOutcome<TriangleMaterials> {
    let path = path.as_ref();
    log::info!("Loading materials of '{}'", path.display());
    let (sink, error) = load_path(path, MaterialSink::default());
    LoadOutcome {
        value: TriangleMaterials {
            materials: sink.selection.materials,
            indices: sink.indices,
        },
        error,
    }
}

/// Load attributes, triangles and materials in one pass.
///
/// Images are not decoded; call [`MeshData::load_images`] for that.
pub fn read_mesh_data(path: impl AsRef<Path>) -> AssetResult<MeshData> {
    let path = path.as_ref();
    log::info!("Loading indexed mesh '{}'", path.display());
    let scanner = LineScanner::open(path).inspect_err(|err| log::error!("{err}"))?;
    read_mesh_data_from_reader(scanner)
}

/// Full load from an already opened scanner.
///
/// The scanner's path is used to resolve `mtllib` references.
pub fn read_mesh_data_from_reader<R: BufRead>(scanner: LineScanner<R>) -> AssetResult<MeshData> {
    let path = scanner.path().to_path_buf();
    let mut assembler = MeshAssembler::default();
    if let Err(err) = drive(scanner, &mut assembler) {
        log::error!("{err}");
        return Err(err);
    }
    let data = assembler.finish();
    log::info!(
        "Mesh '{}': {} indices, {} positions, {} texcoords, {} normals",
        path.display(),
        data.indices.len(),
        data.positions.len(),
        data.texcoords.len(),
        data.normals.len()
    );
    log::info!(
        "Mesh '{}': {} materials, {} textures",
        path.display(),
        data.materials.count(),
        data.materials.texture_count()
    );
    Ok(data)
}

/// Full load of an in-memory OBJ. `mtllib` names resolve against `base_dir`.
pub fn read_mesh_data_from_str(contents: &str, base_dir: impl AsRef<Path>) -> AssetResult<MeshData> {
    let origin = base_dir.as_ref().join("<memory>.obj");
    read_mesh_data_from_reader(LineScanner::new(io::Cursor::new(contents), origin))
}

fn load_path<S: MeshSink>(path: &Path, mut sink: S) -> (S, Option<AssetError>) {
    let error = LineScanner::open(path)
        .and_then(|scanner| drive(scanner, &mut sink))
        .err();
    if let Some(err) = &error {
        log::error!("{err}");
    }
    (sink, error)
}

/// Record kinds an OBJ line can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ObjTag {
    Position,
    Texcoord,
    Normal,
    Face,
    UseMaterial,
    MaterialLibrary,
}

impl ObjTag {
    fn classify(tag: &str) -> Option<Self> {
        Some(match tag {
            "v" => Self::Position,
            "vt" => Self::Texcoord,
            "vn" => Self::Normal,
            "f" => Self::Face,
            "usemtl" => Self::UseMaterial,
            "mtllib" => Self::MaterialLibrary,
            _ => return None,
        })
    }
}

/// Receiver of decoded OBJ records.
///
/// Records whose tag is not in [`MeshSink::TAGS`] are skipped without being
/// decoded, so a variant never fails on a line it does not use.
trait MeshSink {
    const TAGS: &'static [ObjTag];

    fn position(&mut self, _p: Point) {}
    fn texcoord(&mut self, _t: Point) {}
    fn normal(&mut self, _n: Vector) {}
    fn use_material(&mut self, _name: &str) {}
    fn material_library(&mut self, _path: &Path) -> AssetResult<()> {
        Ok(())
    }
    /// A face with at least 3 corners.
    fn face(&mut self, refs: &[FaceVertexRef]) -> Result<(), RecordError>;
}

/// Feed every line of `scanner` to `sink`, stopping at the first failure.
fn drive<R: BufRead, S: MeshSink>(mut scanner: LineScanner<R>, sink: &mut S) -> AssetResult<()> {
    let base_dir = directory_of(scanner.path());
    let mut refs: Vec<FaceVertexRef> = Vec::new();

    while let Some(line) = scanner.next() {
        let line = line?;
        let Some((tag, operands)) = line.record() else {
            continue;
        };
        let Some(tag) = ObjTag::classify(tag).filter(|t| S::TAGS.contains(t)) else {
            continue;
        };

        let decoded = match tag {
            ObjTag::Position => decode_position(operands).map(|p| sink.position(p)),
            ObjTag::Texcoord => decode_texcoord(operands).map(|t| sink.texcoord(t)),
            ObjTag::Normal => decode_normal(operands).map(|n| sink.normal(n)),
            ObjTag::Face => decode_face(operands, &mut refs).and_then(|()| {
                if refs.len() < 3 {
                    log::warn!(
                        "{}:{}: face with {} vertices ignored",
                        scanner.path().display(),
                        line.number,
                        refs.len()
                    );
                    return Ok(());
                }
                sink.face(&refs)
            }),
            ObjTag::UseMaterial => {
                if let Some(name) = decode_name(operands) {
                    sink.use_material(name);
                }
                Ok(())
            }
            ObjTag::MaterialLibrary => {
                if let Some(name) = decode_name(operands) {
                    let library = resolve_path(&base_dir, name);
                    sink.material_library(&library)
                        .map_err(|source| AssetError::MaterialLibrary {
                            path: scanner.path().to_path_buf(),
                            line: line.number,
                            library,
                            source: Box::new(source),
                        })?;
                }
                Ok(())
            }
        };

        decoded.map_err(|err| scanner.record_error(&line, err))?;
    }
    Ok(())
}

#[derive(Default)]
struct FlatPositions {
    working: Vec<Point>,
    positions: Vec<Point>,
}

impl MeshSink for FlatPositions {
    const TAGS: &'static [ObjTag] = &[ObjTag::Position, ObjTag::Face];

    fn position(&mut self, p: Point) {
        self.working.push(p);
    }

    fn face(&mut self, refs: &[FaceVertexRef]) -> Result<(), RecordError> {
        for [a, b, c] in fan_triangles(refs) {
            let len = self.working.len();
            let tri = [
                resolve(a.position, len, "position")?,
                resolve(b.position, len, "position")?,
                resolve(c.position, len, "position")?,
            ];
            self.positions.extend(tri.map(|i| self.working[i]));
        }
        Ok(())
    }
}

#[derive(Default)]
struct IndexedSink {
    mesh: IndexedPositions,
}

impl MeshSink for IndexedSink {
    const TAGS: &'static [ObjTag] = &[ObjTag::Position, ObjTag::Face];

    fn position(&mut self, p: Point) {
        self.mesh.positions.push(p);
    }

    fn face(&mut self, refs: &[FaceVertexRef]) -> Result<(), RecordError> {
        for [a, b, c] in fan_triangles(refs) {
            let len = self.mesh.positions.len();
            let tri = [
                resolve(a.position, len, "position")?,
                resolve(b.position, len, "position")?,
                resolve(c.position, len, "position")?,
            ];
            for i in tri {
                self.mesh.indices.push(vertex_id(i)?);
            }
        }
        Ok(())
    }
}

/// Registry plus the material selected by the last `usemtl`.
#[derive(Default)]
struct MaterialSelection {
    materials: Materials,
    /// `None` until a known material is selected.
    current: Option<MaterialId>,
}

impl MaterialSelection {
    fn select(&mut self, name: &str) {
        self.current = self.materials.find(name);
        if self.current.is_none() {
            log::warn!("Unknown material '{}', faces will use the default material", name);
        }
    }

    /// Material for the next face, falling back to the default material.
    fn for_face(&mut self) -> MaterialId {
        match self.current {
            Some(id) => id,
            None => self.materials.default_id(),
        }
    }

    fn load_library(&mut self, path: &Path) -> AssetResult<()> {
        load_mtl(path, &mut self.materials)
    }
}

/// Per-triangle materials. Attributes are only counted, so face indices
/// are checked the same way the other loaders check them.
#[derive(Default)]
struct MaterialSink {
    selection: MaterialSelection,
    indices: Vec<MaterialId>,
    positions: usize,
    texcoords: usize,
    normals: usize,
}

impl MaterialSink {
    fn check(&self, r: FaceVertexRef) -> Result<(), RecordError> {
        resolve(r.position, self.positions, "position")?;
        resolve_optional(r.texcoord, self.texcoords, "texcoord")?;
        resolve_optional(r.normal, self.normals, "normal")?;
        Ok(())
    }
}

impl MeshSink for MaterialSink {
    const TAGS: &'static [ObjTag] = &[
        ObjTag::Position,
        ObjTag::Texcoord,
        ObjTag::Normal,
        ObjTag::Face,
        ObjTag::UseMaterial,
        ObjTag::MaterialLibrary,
    ];

    fn position(&mut self, _p: Point) {
        self.positions += 1;
    }

    fn texcoord(&mut self, _t: Point) {
        self.texcoords += 1;
    }

    fn normal(&mut self, _n: Vector) {
        self.normals += 1;
    }

    fn use_material(&mut self, name: &str) {
        self.selection.select(name);
    }

    fn material_library(&mut self, path: &Path) -> AssetResult<()> {
        self.selection.load_library(path)
    }

    fn face(&mut self, refs: &[FaceVertexRef]) -> Result<(), RecordError> {
        let material = self.selection.for_face();
        for corners in fan_triangles(refs) {
            for r in corners {
                self.check(r)?;
            }
            self.indices.push(material);
        }
        Ok(())
    }
}

/// State of a full load: working arrays, welded output and materials.
#[derive(Default)]
struct MeshAssembler {
    working: Attributes,
    out: Attributes,
    welder: Welder,
    indices: Vec<u32>,
    material_indices: Vec<MaterialId>,
    selection: MaterialSelection,
}

impl MeshAssembler {
    fn key(&self, material: MaterialId, r: FaceVertexRef) -> Result<VertexKey, RecordError> {
        let w = &self.working;
        Ok(VertexKey {
            material,
            position: resolve(r.position, w.positions.len(), "position")?,
            texcoord: resolve_optional(r.texcoord, w.texcoords.len(), "texcoord")?,
            normal: resolve_optional(r.normal, w.normals.len(), "normal")?,
        })
    }

    fn finish(self) -> MeshData {
        MeshData::from_parts(
            self.out,
            self.indices,
            self.material_indices,
            self.selection.materials,
        )
    }
}

impl MeshSink for MeshAssembler {
    const TAGS: &'static [ObjTag] = &[
        ObjTag::Position,
        ObjTag::Texcoord,
        ObjTag::Normal,
        ObjTag::Face,
        ObjTag::UseMaterial,
        ObjTag::MaterialLibrary,
    ];

    fn position(&mut self, p: Point) {
        self.working.positions.push(p);
    }

    fn texcoord(&mut self, t: Point) {
        self.working.texcoords.push(t);
    }

    fn normal(&mut self, n: Vector) {
        self.working.normals.push(n);
    }

    fn use_material(&mut self, name: &str) {
        self.selection.select(name);
    }

    fn material_library(&mut self, path: &Path) -> AssetResult<()> {
        self.selection.load_library(path)
    }

    fn face(&mut self, refs: &[FaceVertexRef]) -> Result<(), RecordError> {
        let material = self.selection.for_face();
        for [a, b, c] in fan_triangles(refs) {
            let keys = [
                self.key(material, a)?,
                self.key(material, b)?,
                self.key(material, c)?,
            ];
            for key in keys {
                let id = self.welder.weld(key, &self.working, &mut self.out)?;
                self.indices.push(id);
            }
            self.material_indices.push(material);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::vec3;
    use std::{fs, path::PathBuf};

    fn memory_path() -> PathBuf {
        PathBuf::from("mem/mesh.obj")
    }

    fn run<S: MeshSink>(src: &str, mut sink: S) -> (S, Option<AssetError>) {
        let scanner = LineScanner::new(io::Cursor::new(src), memory_path());
        let error = drive(scanner, &mut sink).err();
        (sink, error)
    }

    fn full(src: &str) -> AssetResult<MeshData> {
        read_mesh_data_from_reader(LineScanner::new(io::Cursor::new(src), memory_path()))
    }

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
    const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

    fn p(i: u32) -> Point {
        let i = i as f32;
        vec3(i, i * 10.0, i * 100.0)
    }

    #[test]
    fn single_triangle_in_flat_and_indexed_modes() {
        let (flat, err) = run(TRIANGLE, FlatPositions::default());
        assert!(err.is_none());
        assert_eq!(
            flat.positions,
            vec![vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)]
        );

        let (indexed, err) = run(TRIANGLE, IndexedSink::default());
        assert!(err.is_none());
        assert_eq!(indexed.mesh.positions, flat.positions);
        assert_eq!(indexed.mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn quad_is_fan_triangulated() {
        let (indexed, _) = run(QUAD, IndexedSink::default());
        assert_eq!(indexed.mesh.indices, vec![0, 1, 2, 0, 2, 3]);

        let mesh = full(QUAD).expect("quad");
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn flat_mode_repeats_shared_positions() {
        let (flat, _) = run(QUAD, FlatPositions::default());
        assert_eq!(flat.positions.len(), 6);
        assert_eq!(flat.positions[0], flat.positions[3]);
        assert_eq!(flat.positions[2], flat.positions[4]);
    }

    #[test]
    fn negative_indices_resolve_at_face_time() {
        let src = "v 0 0 0\nv 1 10 100\nf -1 -1 -1\nv 2 20 200\nf -3 -2 -1\n";
        let (indexed, err) = run(src, IndexedSink::default());
        assert!(err.is_none());
        assert_eq!(indexed.mesh.indices, vec![1, 1, 1, 0, 1, 2]);

        let (flat, _) = run("v 4 5 6\nf -1 -1 -1\n", FlatPositions::default());
        assert_eq!(flat.positions, vec![vec3(4.0, 5.0, 6.0); 3]);
    }

    #[test]
    fn full_load_welds_shared_corners() {
        let src = "\
            v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
            vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
            vn 0 0 1\n\
            f 1/1/1 2/2/1 3/3/1\n\
            f 1/1/1 3/3/1 4/4/1\n";
        let mesh = full(src).expect("welded quad");
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.texcoords.len(), 4);
        assert_eq!(mesh.normals.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.texcoords[3], vec3(0.0, 1.0, 0.0));
        assert_eq!(mesh.normals[0], vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn distinct_texcoords_split_vertices() {
        // same position, two different texcoords
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 1\n\
                   f 1/1 2/1 3/1\nf 1/2 3/1 2/1\n";
        let mesh = full(src).expect("seam");
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 2, 1]);
        assert_eq!(mesh.positions[3], mesh.positions[0]);
    }

    #[test]
    fn welding_matches_flat_count_without_sharing() {
        let src = "\
            v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nv 6 5 5\nv 5 6 5\n\
            f 1 2 3\nf 4 5 6\n";
        let (flat, _) = run(src, FlatPositions::default());
        let mesh = full(src).expect("disjoint");
        assert_eq!(mesh.positions.len(), flat.positions.len());
    }

    #[test]
    fn welded_output_is_first_seen_ordered() {
        let src = format!(
            "v {}\nv {}\nv {}\nv {}\nf 4 2 3\nf 4 3 1\n",
            "0 0 0", "1 10 100", "2 20 200", "3 30 300"
        );
        let mesh = full(&src).expect("ordering");
        assert_eq!(mesh.positions, vec![p(3), p(1), p(2), p(0)]);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn faces_before_usemtl_use_default_material() {
        let mesh = full(TRIANGLE).expect("no materials");
        assert_eq!(mesh.materials.count(), 1);
        let default = mesh.material_indices[0];
        assert_eq!(mesh.materials[default].name, "default");
        assert_eq!(mesh.indices.len(), 3 * mesh.material_indices.len());
    }

    #[test]
    fn unknown_usemtl_falls_back_to_default() {
        let src = format!("usemtl alpha\n{QUAD}");
        let mesh = full(&src).expect("unknown material");
        let default = mesh.materials.find("default").expect("default created");
        assert_eq!(mesh.material_indices, vec![default, default]);

        let (sink, err) = run(&src, MaterialSink::default());
        assert!(err.is_none());
        assert_eq!(sink.indices, vec![default, default]);
    }

    #[test]
    fn usemtl_missing_from_library_falls_back_to_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("lib.mtl"),
            "newmtl beta\nKd 0 1 0\nnewmtl gamma\nKd 0 0 1\n",
        )
        .expect("write mtl");
        let obj = dir.path().join("mesh.obj");
        fs::write(&obj, format!("mtllib lib.mtl\nusemtl beta\nusemtl alpha\n{QUAD}"))
            .expect("write obj");

        let mesh = read_mesh_data(&obj).expect("library loads");
        let default = mesh.materials.find("default").expect("default created");
        assert!(mesh.materials.find("alpha").is_none());
        assert_ne!(mesh.materials.find("beta"), Some(default));
        assert_eq!(mesh.material_indices, vec![default, default]);
        assert_eq!(mesh.materials.count(), 3);

        let outcome = read_materials(&obj);
        assert!(outcome.is_ok());
        assert_eq!(outcome.value.indices, vec![default, default]);
        assert_eq!(outcome.value.materials[default].name, "default");
    }

    #[test]
    fn malformed_position_reports_line() {
        let src = "v 0 0 0\nv 1 0\nv 0 1 0\n";
        let err = full(src).err().expect("bad position");
        assert_eq!(err.line(), Some(2));
        assert_eq!(
            err.record_error(),
            Some(&RecordError::OperandCount {
                tag: "v",
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn single_purpose_loaders_keep_partial_results() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 x\nf 3 2 1\n";
        let (flat, err) = run(src, FlatPositions::default());
        assert_eq!(flat.positions.len(), 3);
        assert_eq!(err.as_ref().and_then(AssetError::line), Some(5));

        let (indexed, err) = run(src, IndexedSink::default());
        assert_eq!(indexed.mesh.indices, vec![0, 1, 2]);
        assert!(err.is_some());

        let (materials, err) = run(src, MaterialSink::default());
        assert_eq!(materials.indices.len(), 1);
        assert!(err.is_some());

        assert!(full(src).is_err());
    }

    #[test]
    fn over_negative_index_is_fatal_everywhere() {
        let src = "v 0 0 0\nv 1 0 0\nf -1 -2 -3\n";
        let expected = RecordError::UnresolvableIndex {
            attribute: "position",
            raw: -3,
            len: 2,
        };
        let err = full(src).err().expect("over-negative");
        assert_eq!(err.record_error(), Some(&expected));

        let (flat, err) = run(src, FlatPositions::default());
        assert!(flat.positions.is_empty());
        assert!(err.is_some());
        let (indexed, err) = run(src, IndexedSink::default());
        assert!(indexed.mesh.indices.is_empty());
        assert!(err.is_some());
        let (materials, err) = run(src, MaterialSink::default());
        assert!(materials.indices.is_empty());
        assert_eq!(err.as_ref().and_then(AssetError::record_error), Some(&expected));
    }

    #[test]
    fn materials_loader_checks_every_attribute_index() {
        // zero position, past-the-end texcoord, normal never declared
        for face in ["f 0 1 2", "f 1/3 2/1 3/1", "f 1//1 2//1 3//1"] {
            let src = format!("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1 2 3\n{face}\n");
            let (sink, err) = run(&src, MaterialSink::default());
            assert_eq!(sink.indices.len(), 1, "{face}");
            assert!(
                matches!(
                    err.as_ref().and_then(AssetError::record_error),
                    Some(RecordError::UnresolvableIndex { .. })
                ),
                "{face}: {err:?}"
            );
            assert!(full(&src).is_err(), "{face}");
        }

        // negative normal index resolves against the declared normal
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 -1//-1\n";
        let (sink, err) = run(src, MaterialSink::default());
        assert!(err.is_none());
        assert_eq!(sink.indices.len(), 1);
    }

    #[test]
    fn missing_normal_index_is_fatal() {
        let err = full("v 0 0 0\nf 1//1 1//1 1//1\n").err().expect("no normals declared");
        assert!(matches!(
            err.record_error(),
            Some(RecordError::UnresolvableIndex { attribute: "normal", .. })
        ));
    }

    #[test]
    fn position_modes_ignore_unused_records() {
        // bad texcoord and a library that does not exist
        let src = format!("mtllib nowhere.mtl\nvt oops\nusemtl x\n{TRIANGLE}");
        let (flat, err) = run(&src, FlatPositions::default());
        assert!(err.is_none());
        assert_eq!(flat.positions.len(), 3);
        assert!(full(&src).is_err());
    }

    #[test]
    fn short_faces_are_skipped() {
        let mesh = full("v 0 0 0\nv 1 0 0\nf 1 2\n").expect("degenerate face");
        assert!(mesh.indices.is_empty());
        assert!(mesh.material_indices.is_empty());
    }

    #[test]
    fn missing_library_fails_whole_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let obj = dir.path().join("mesh.obj");
        fs::write(&obj, format!("{TRIANGLE}mtllib missing.mtl\n")).expect("write obj");

        let err = read_mesh_data(&obj).err().expect("library missing");
        match &err {
            AssetError::MaterialLibrary { line, library, .. } => {
                assert_eq!(*line, 5);
                assert_eq!(library, &dir.path().join("missing.mtl"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let outcome = read_materials(&obj);
        assert!(!outcome.is_ok());
        // the face was read before the library line
        assert_eq!(outcome.value.indices.len(), 1);
    }

    #[test]
    fn materials_from_library_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("mtl")).expect("mkdir");
        fs::write(
            dir.path().join("mtl/scene.mtl"),
            "newmtl red\nKd 1 0 0\nmap_Kd ../tex/red.png\n\
             newmtl blue\nKd 0 0 1\nmap_Kd ../tex/red.png\nmap_Ks ../tex/blue.png\n",
        )
        .expect("write mtl");
        let obj = dir.path().join("scene.obj");
        fs::write(
            &obj,
            format!(
                "mtllib mtl/scene.mtl\n{}usemtl red\nf 1 2 3\nusemtl blue\nf 1 2 3 4\nf 1 2 3\n",
                "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n"
            ),
        )
        .expect("write obj");

        let mesh = read_mesh_data(&obj).expect("scene loads");
        let red = mesh.materials.find("red").expect("red");
        let blue = mesh.materials.find("blue").expect("blue");
        assert_eq!(mesh.material_indices, vec![red, blue, blue, blue]);
        assert_eq!(mesh.indices.len(), 12);
        // same corners under another material are separate vertices
        assert_eq!(mesh.positions.len(), 3 + 4);
        assert_eq!(mesh.materials.texture_count(), 2);
        assert_eq!(
            mesh.materials.texture_path(0),
            Some(dir.path().join("tex/red.png").as_path())
        );
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));

        let outcome = read_materials(&obj);
        assert!(outcome.is_ok());
        assert_eq!(outcome.value.indices, mesh.material_indices);
    }

    #[test]
    fn public_path_entry_points() {
        let dir = tempfile::tempdir().expect("tempdir");
        let obj = dir.path().join("quad.obj");
        fs::write(&obj, QUAD).expect("write obj");

        let flat = read_positions(&obj).into_result().expect("flat");
        assert_eq!(flat.len(), 6);
        let indexed = read_indexed_positions(&obj).into_result().expect("indexed");
        assert_eq!(indexed.indices, vec![0, 1, 2, 0, 2, 3]);

        let missing = read_positions(dir.path().join("nope.obj"));
        let (positions, err) = missing.into_parts();
        assert!(positions.is_empty());
        assert!(matches!(err, Some(AssetError::Open { .. })));
    }

    #[test]
    fn from_str_resolves_against_base_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("m.mtl"), "newmtl m\nKd 0.5 0.5 0.5\n").expect("write mtl");
        let src = format!("mtllib m.mtl\nusemtl m\n{TRIANGLE}");
        let mesh = read_mesh_data_from_str(&src, dir.path()).expect("in-memory mesh");
        assert_eq!(mesh.materials.find("m"), Some(mesh.material_indices[0]));
    }
}
