//! Object-to-mesh conversion: world-space realization, material-slot
//! bucketing, smooth/flat vertex emission and quad fan triangulation.

use std::collections::HashMap;

use glam::{Mat3, Vec2, Vec3};
use smallvec::SmallVec;

use crate::core::{ExportCache, MeshCacheKey, ParamSet};
use crate::luxcore::MeshBuffers;
use crate::scene::{MeshData, MeshModifiers, ObjectData, Polygon, SceneData, UvLayer};
use crate::util::{Error, Result};

/// One material bucket of a converted object.
#[derive(Debug, Clone)]
pub struct ExportedMesh {
    /// Bucket name `<mesh>-<scene>_m<slot>` with the slot zero-padded
    /// to three digits.
    pub name: String,
    /// Material-slot index the bucket was collated under.
    pub material_index: usize,
    /// Shape kind token for the scene writer, currently always "mesh".
    pub shape_kind: &'static str,
    /// Text-protocol parameters: triindices/P/N, optional uv, then the
    /// mesh modifier settings.
    pub params: ParamSet,
    /// The same geometry in renderer buffer form.
    pub buffers: MeshBuffers,
}

/// Bit-exact merge key for smooth-face corners.
///
/// Two corners merge only when position, normal and UV agree on their
/// raw float bits. No epsilon: a tolerance here would change emitted
/// vertex counts.
#[derive(PartialEq, Eq, Hash)]
struct VertexKey {
    position: [u32; 3],
    normal: [u32; 3],
    uv: Option<[u32; 2]>,
}

impl VertexKey {
    fn new(position: Vec3, normal: Vec3, uv: Option<Vec2>) -> Self {
        Self {
            position: position.to_array().map(f32::to_bits),
            normal: normal.to_array().map(f32::to_bits),
            uv: uv.map(|uv| uv.to_array().map(f32::to_bits)),
        }
    }
}

/// Converts scene objects into per-material mesh definitions, cached by
/// (scene name, object name).
#[derive(Debug)]
pub struct GeometryExporter {
    cache: ExportCache<MeshCacheKey, Vec<ExportedMesh>>,
}

impl Default for GeometryExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryExporter {
    pub fn new() -> Self {
        Self {
            cache: ExportCache::new("exported-objects"),
        }
    }

    /// Convert one object into its non-empty material buckets.
    ///
    /// A second call with the same (scene, object) names returns the
    /// cached list without recomputation. Render-hidden objects yield no
    /// buckets. An object-level failure is logged and yields no buckets
    /// without populating the cache, so a later call retries.
    pub fn convert_object(&mut self, scene: &SceneData, obj: &ObjectData) -> Vec<ExportedMesh> {
        let key = MeshCacheKey::new(&scene.name, &obj.name);
        if self.cache.have(&key) {
            if let Ok(cached) = self.cache.get(&key) {
                return cached.clone();
            }
        }

        if obj.hide_render {
            tracing::debug!("object '{}' is hidden for render, nothing to export", obj.name);
            return Vec::new();
        }

        match build_object_meshes(scene, obj) {
            Ok(meshes) => {
                self.cache.add(key, meshes.clone());
                meshes
            }
            Err(err) => {
                tracing::warn!("object export failed, skipping object '{}': {err}", obj.name);
                Vec::new()
            }
        }
    }

    /// The per-object result cache.
    pub fn cache(&self) -> &ExportCache<MeshCacheKey, Vec<ExportedMesh>> {
        &self.cache
    }

    /// Drop every cached conversion.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

fn build_object_meshes(scene: &SceneData, obj: &ObjectData) -> Result<Vec<ExportedMesh>> {
    let mesh = realize_world_mesh(obj)?;
    let uv_layer = mesh.active_uv_layer();

    // Collate faces by material slot, remembering each face's first
    // corner position in the mesh-wide loop arrays for UV lookup.
    let mut buckets: HashMap<usize, Vec<(usize, &Polygon)>> = HashMap::new();
    let mut loop_start = 0;
    for poly in &mesh.polygons {
        buckets
            .entry(poly.material_index)
            .or_default()
            .push((loop_start, poly));
        loop_start += poly.vertices.len();
    }

    // A mesh without slots still exports its faces under implicit slot 0.
    let slot_count = obj.slots.len().max(1);

    let mut out = Vec::new();
    for slot in 0..slot_count {
        let Some(faces) = buckets.get(&slot) else {
            continue;
        };
        match build_bucket(&mesh, faces, uv_layer, &scene.name, slot) {
            Ok(exported) => out.push(exported),
            Err(err) => {
                tracing::warn!(
                    "mesh export failed, skipping slot {slot} of object '{}': {err}",
                    obj.name
                );
            }
        }
    }
    Ok(out)
}

/// World-space copy of the object's mesh.
///
/// Positions go through the full transform, normals through the
/// inverse-transpose normal matrix at their incoming length, so unit
/// inputs survive an identity transform bit-exact.
fn realize_world_mesh(obj: &ObjectData) -> Result<MeshData> {
    let normal_matrix = Mat3::from_mat4(obj.transform).inverse().transpose();
    if !normal_matrix.is_finite() {
        return Err(Error::geometry(format!(
            "singular world transform on object '{}'",
            obj.name
        )));
    }

    let mut mesh = obj.mesh.clone();
    for position in &mut mesh.vertices {
        *position = obj.transform.transform_point3(*position);
    }
    for normal in &mut mesh.normals {
        *normal = normal_matrix * *normal;
    }
    for poly in &mut mesh.polygons {
        poly.normal = normal_matrix * poly.normal;
    }
    Ok(mesh)
}

fn build_bucket(
    mesh: &MeshData,
    faces: &[(usize, &Polygon)],
    uv_layer: Option<&UvLayer>,
    scene_name: &str,
    slot: usize,
) -> Result<ExportedMesh> {
    let name = format!("{}-{}_m{:03}", mesh.name, scene_name, slot);

    let mut buffers = MeshBuffers::default();
    let mut uvs: Vec<Vec2> = Vec::new();
    let mut merged: HashMap<VertexKey, u32> = HashMap::new();

    for &(loop_start, face) in faces {
        // Quad fan anchored at corner 0.
        let fan: &[[usize; 3]] = match face.vertices.len() {
            3 => &[[0, 1, 2]],
            4 => &[[0, 1, 2], [0, 2, 3]],
            n => {
                return Err(Error::geometry(format!(
                    "face with {n} corners in mesh '{}', only triangles and quads are supported",
                    mesh.name
                )));
            }
        };

        let mut corners: SmallVec<[(usize, Vec3, Option<Vec2>); 4]> = SmallVec::new();
        for (corner, &vert) in face.vertices.iter().enumerate() {
            let vert = vert as usize;
            let position = *mesh.vertices.get(vert).ok_or_else(|| {
                Error::geometry(format!(
                    "corner references vertex {vert} beyond mesh '{}'",
                    mesh.name
                ))
            })?;
            let uv = match uv_layer {
                Some(layer) => Some(corner_uv(layer, loop_start + corner, mesh)?),
                None => None,
            };
            corners.push((vert, position, uv));
        }

        if face.use_smooth {
            let mut emitted: SmallVec<[u32; 4]> = SmallVec::new();
            for &(vert, position, uv) in &corners {
                let normal = *mesh.normals.get(vert).ok_or_else(|| {
                    Error::geometry(format!(
                        "vertex {vert} of mesh '{}' has no normal",
                        mesh.name
                    ))
                })?;
                let key = VertexKey::new(position, normal, uv);
                let index = match merged.get(&key) {
                    Some(&seen) => seen,
                    None => {
                        let fresh = push_vertex(&mut buffers, &mut uvs, position, normal, uv);
                        merged.insert(key, fresh);
                        fresh
                    }
                };
                emitted.push(index);
            }
            for tri in fan {
                buffers
                    .triangles
                    .push([emitted[tri[0]], emitted[tri[1]], emitted[tri[2]]]);
            }
        } else {
            // Flat corners never merge; every triangle corner gets a
            // fresh entry carrying the face normal, so a flat quad
            // emits six.
            for tri in fan {
                let base = buffers.vertices.len() as u32;
                for &corner in tri {
                    let (_, position, uv) = corners[corner];
                    push_vertex(&mut buffers, &mut uvs, position, face.normal, uv);
                }
                buffers.triangles.push([base, base + 1, base + 2]);
            }
        }
    }

    if uv_layer.is_some() {
        buffers.uvs = Some(uvs);
    }

    let params = bucket_paramset(&buffers, &mesh.modifiers);

    Ok(ExportedMesh {
        name,
        material_index: slot,
        shape_kind: "mesh",
        params,
        buffers,
    })
}

fn corner_uv(layer: &UvLayer, loop_index: usize, mesh: &MeshData) -> Result<Vec2> {
    layer.loops.get(loop_index).copied().ok_or_else(|| {
        Error::geometry(format!(
            "UV layer '{}' is shorter than the loops of mesh '{}'",
            layer.name, mesh.name
        ))
    })
}

fn push_vertex(
    buffers: &mut MeshBuffers,
    uvs: &mut Vec<Vec2>,
    position: Vec3,
    normal: Vec3,
    uv: Option<Vec2>,
) -> u32 {
    let index = buffers.vertices.len() as u32;
    buffers.vertices.push(position);
    buffers.normals.push(normal);
    if let Some(uv) = uv {
        uvs.push(uv);
    }
    index
}

/// Text-protocol parameters for one bucket.
fn bucket_paramset(buffers: &MeshBuffers, modifiers: &MeshModifiers) -> ParamSet {
    let mut params = ParamSet::new();

    let triindices: Vec<i32> = buffers
        .triangles
        .iter()
        .flatten()
        .map(|&i| i as i32)
        .collect();
    params.add_integers("triindices", triindices);
    params.add_point("P", &buffers.vertices);
    params.add_normal("N", &buffers.normals);

    if let Some(uvs) = &buffers.uvs {
        let flat: &[f32] = bytemuck::cast_slice(uvs);
        params.add_floats("uv", flat.to_vec());
    }

    params.update(&modifiers.to_paramset());
    params
}
