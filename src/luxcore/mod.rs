//! Renderer-binding facade: scene and render-configuration handles.
//!
//! Mirrors the property-driven surface of the LuxCore bindings. Geometry
//! is registered through [`Scene::define_mesh`], everything else arrives
//! as dotted-key batches folded in through [`Scene::parse`], and a
//! [`RenderConfig`] pairs the engine/film configuration with a finished
//! scene. Nothing in this module starts a render.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::core::{PropValue, Properties};
use crate::util::{Error, Result};

/// Tessellated triangle mesh in the form the renderer consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    /// Per-vertex normals, parallel to `vertices`.
    pub normals: Vec<Vec3>,
    /// Per-vertex UVs, parallel to `vertices`, present only when the
    /// source mesh had an active UV layer.
    pub uvs: Option<Vec<Vec2>>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Scene half of the renderer binding: registered meshes plus the
/// accumulated, validated scene property set.
#[derive(Debug, Default)]
pub struct Scene {
    props: Properties,
    meshes: HashMap<String, MeshBuffers>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register tessellated geometry under a renderer-side mesh name.
    pub fn define_mesh(&mut self, name: impl Into<String>, buffers: MeshBuffers) {
        self.meshes.insert(name.into(), buffers);
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshBuffers> {
        self.meshes.get(name)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Validate a property batch and fold it into the scene definition.
    ///
    /// Every key must live under the `scene.` namespace, every material,
    /// light and texture group must carry a `.type`, and object bindings
    /// must reference a material defined in this batch or earlier and a
    /// mesh already registered via [`define_mesh`](Self::define_mesh).
    /// Any violation fails the whole batch and leaves the scene
    /// untouched.
    pub fn parse(&mut self, batch: &Properties) -> Result<()> {
        let existing = &self.props;
        let defined = |key: &str| batch.has(key) || existing.has(key);

        for key in batch.keys() {
            if !key.starts_with("scene.") {
                return Err(Error::parse(format!(
                    "property '{key}' does not belong to the scene namespace"
                )));
            }

            for prefix in ["scene.materials.", "scene.lights.", "scene.textures."] {
                if let Some(rest) = key.strip_prefix(prefix) {
                    if let Some((group, _)) = rest.split_once('.') {
                        let type_key = format!("{prefix}{group}.type");
                        if !defined(&type_key) {
                            return Err(Error::parse(format!(
                                "definition '{prefix}{group}' has no type"
                            )));
                        }
                    }
                }
            }

            if let Some(rest) = key.strip_prefix("scene.objects.") {
                if rest.ends_with(".material") {
                    let material = batch.get(key).and_then(PropValue::as_str).ok_or_else(|| {
                        Error::parse(format!("binding '{key}' must name a material"))
                    })?;
                    if !defined(&format!("scene.materials.{material}.type")) {
                        return Err(Error::parse(format!(
                            "binding '{key}' references undefined material '{material}'"
                        )));
                    }
                } else if rest.ends_with(".ply") {
                    let mesh = batch.get(key).and_then(PropValue::as_str).ok_or_else(|| {
                        Error::parse(format!("binding '{key}' must name a mesh"))
                    })?;
                    if !self.meshes.contains_key(mesh) {
                        return Err(Error::parse(format!(
                            "binding '{key}' references undefined mesh '{mesh}'"
                        )));
                    }
                }
            }
        }

        self.props.update(batch);
        Ok(())
    }

    /// The scene property set accumulated by successful parses.
    pub fn props(&self) -> &Properties {
        &self.props
    }
}

/// Paired render configuration and scene handle.
///
/// Construction validates the configuration the way the renderer would
/// before a session could be created; this crate stops there.
#[derive(Debug)]
pub struct RenderConfig {
    props: Properties,
    scene: Scene,
}

impl RenderConfig {
    /// Pair a configuration property set with a parsed scene.
    ///
    /// Requires an engine selection and positive film dimensions.
    pub fn new(props: Properties, scene: Scene) -> Result<Self> {
        for key in ["renderengine.type", "film.width", "film.height"] {
            if !props.has(key) {
                return Err(Error::config(format!("missing required property '{key}'")));
            }
        }
        for key in ["film.width", "film.height"] {
            match props.get(key).and_then(PropValue::as_int) {
                Some(v) if v > 0 => {}
                _ => {
                    return Err(Error::config(format!("'{key}' must be a positive integer")));
                }
            }
        }
        Ok(Self { props, scene })
    }

    pub fn props(&self) -> &Properties {
        &self.props
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn into_parts(self) -> (Properties, Scene) {
        (self.props, self.scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_mesh() -> MeshBuffers {
        MeshBuffers {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            triangles: vec![[0, 1, 2]],
            normals: vec![Vec3::Z; 3],
            uvs: None,
        }
    }

    #[test]
    fn test_parse_accepts_valid_batch() {
        let mut scene = Scene::new();
        scene.define_mesh("Mesh-box", unit_mesh());

        let mut batch = Properties::new();
        batch.set("scene.materials.gray.type", "matte");
        batch.set("scene.materials.gray.kd", [0.5f32, 0.5, 0.5]);
        batch.set("scene.lights.skylight.type", "sky");
        batch.set("scene.objects.box.material", "gray");
        batch.set("scene.objects.box.ply", "Mesh-box");

        scene.parse(&batch).unwrap();
        assert_eq!(scene.props().len(), 5);
        assert_eq!(scene.mesh_count(), 1);
    }

    #[test]
    fn test_parse_rejects_foreign_namespace() {
        let mut scene = Scene::new();
        let mut batch = Properties::new();
        batch.set("film.width", 640u32);

        let err = scene.parse(&batch).unwrap_err();
        assert!(err.to_string().contains("film.width"));
        assert!(scene.props().is_empty());
    }

    #[test]
    fn test_parse_rejects_dangling_references() {
        let mut scene = Scene::new();

        let mut batch = Properties::new();
        batch.set("scene.objects.box.material", "nosuch");
        assert!(scene.parse(&batch).is_err());

        let mut batch = Properties::new();
        batch.set("scene.materials.gray.type", "matte");
        batch.set("scene.objects.box.material", "gray");
        batch.set("scene.objects.box.ply", "Mesh-box");
        assert!(scene.parse(&batch).is_err());
        assert!(scene.props().is_empty());
    }

    #[test]
    fn test_parse_rejects_untyped_group() {
        let mut scene = Scene::new();
        let mut batch = Properties::new();
        batch.set("scene.materials.gray.kd", [0.5f32, 0.5, 0.5]);
        assert!(scene.parse(&batch).is_err());
    }

    #[test]
    fn test_parse_sees_earlier_batches() {
        let mut scene = Scene::new();

        let mut first = Properties::new();
        first.set("scene.materials.gray.type", "matte");
        scene.parse(&first).unwrap();

        let mut second = Properties::new();
        second.set("scene.materials.gray.kd", [0.5f32, 0.5, 0.5]);
        scene.parse(&second).unwrap();
        assert_eq!(scene.props().len(), 2);
    }

    #[test]
    fn test_config_requires_engine_and_film() {
        let mut props = Properties::new();
        props.set("renderengine.type", "PATHCPU");
        props.set("film.width", 640u32);

        let err = RenderConfig::new(props.clone(), Scene::new()).unwrap_err();
        assert!(err.to_string().contains("film.height"));

        props.set("film.height", 0u32);
        let err = RenderConfig::new(props.clone(), Scene::new()).unwrap_err();
        assert!(err.to_string().contains("positive"));

        props.set("film.height", 480u32);
        let config = RenderConfig::new(props, Scene::new()).unwrap();
        let (props, _scene) = config.into_parts();
        assert!(props.has("renderengine.type"));
    }
}
