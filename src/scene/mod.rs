//! Read-only scene description consumed by the exporters.
//!
//! This is the input side of the pipeline: plain owned data with no
//! renderer concepts in it. Callers build it from whatever authoring
//! environment they have; tests build it literally.
//!
//! - [`SceneData`] - a named scene: objects, camera, film
//! - [`ObjectData`] - a placed mesh with material slots
//! - [`MeshData`] / [`Polygon`] / [`UvLayer`] - geometry datablocks
//! - [`Material`] - closed set of surface types
//! - [`CameraData`] - placement and optics

mod camera;
mod material;
mod mesh;

pub use camera::*;
pub use material::*;
pub use mesh::*;

use glam::Mat4;

/// Film (output image) settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilmSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for FilmSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// One renderable object: a mesh datablock placed by a transform.
#[derive(Debug, Clone)]
pub struct ObjectData {
    pub name: String,
    pub mesh: MeshData,
    /// Material slots referenced by [`Polygon::material_index`].
    pub slots: Vec<MaterialSlot>,
    /// Object-to-world transform.
    pub transform: Mat4,
    /// Excluded from the export entirely when set.
    pub hide_render: bool,
}

impl ObjectData {
    pub fn new(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            mesh,
            slots: Vec::new(),
            transform: Mat4::IDENTITY,
            hide_render: false,
        }
    }
}

/// A complete scene handed to the exporters.
#[derive(Debug, Clone)]
pub struct SceneData {
    pub name: String,
    pub objects: Vec<ObjectData>,
    pub camera: CameraData,
    pub film: FilmSettings,
}

impl SceneData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            camera: CameraData::default(),
            film: FilmSettings::default(),
        }
    }
}
