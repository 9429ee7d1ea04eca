//! Whole-scene conversion: drives the camera, geometry and material
//! converters and assembles the renderer-side scene and configuration.

use crate::core::{sanitize_name, Properties};
use crate::luxcore::{RenderConfig, Scene};
use crate::scene::SceneData;
use crate::util::Result;

use super::camera::convert_camera;
use super::config::render_config_props;
use super::geometry::GeometryExporter;
use super::material::{define_fallback, MaterialExporter};

/// Drives full scene conversions. Caches persist across calls, so the
/// same exporter re-converts an unchanged scene cheaply.
#[derive(Debug, Default)]
pub struct SceneExporter {
    geometry: GeometryExporter,
    materials: MaterialExporter,
}

impl SceneExporter {
    pub fn new() -> Self {
        Self {
            geometry: GeometryExporter::new(),
            materials: MaterialExporter::new(),
        }
    }

    /// Convert a scene into a render configuration paired with the
    /// parsed renderer scene.
    ///
    /// Per-object and per-material failures are logged and substituted
    /// with safe defaults; only a failed scene parse or an invalid
    /// configuration aborts. This function describes a render, it never
    /// starts one.
    pub fn convert(
        &mut self,
        scene: &SceneData,
        dimensions: Option<(u32, u32)>,
    ) -> Result<RenderConfig> {
        let mut lc_scene = Scene::new();
        let mut props = Properties::new();

        props.update(&convert_camera(&scene.camera, &scene.film));

        // Fixed environment light, always present.
        props.set("scene.lights.skylight.type", "sky");
        props.set("scene.lights.skylight.gain", vec![1.0, 1.0, 1.0]);

        // Clay fallback for unresolved materials.
        define_fallback(&mut props);

        tracing::info!("object conversion:");
        for obj in &scene.objects {
            if obj.hide_render {
                tracing::debug!("  {} (hidden, skipped)", obj.name);
                continue;
            }
            tracing::info!("  {}", obj.name);

            for mesh in self.geometry.convert_object(scene, obj) {
                let material = self.materials.resolve_slot(
                    &mut props,
                    &obj.name,
                    &obj.slots,
                    mesh.material_index,
                );

                let lc_name = sanitize_name(&mesh.name);
                let mesh_name = format!("Mesh-{lc_name}");
                lc_scene.define_mesh(&mesh_name, mesh.buffers.clone());

                let prefix = format!("scene.objects.{lc_name}");
                props.set(format!("{prefix}.material"), material);
                props.set(format!("{prefix}.ply"), mesh_name);
            }

            if let Some(displacement) = &obj.mesh.modifiers.displacement {
                if let Err(err) = self.materials.define_texture(&mut props, &displacement.map) {
                    tracing::warn!("texture export failed on object '{}': {err}", obj.name);
                }
            }
        }

        // From here on failures are fatal: a scene that does not parse
        // is never handed to the renderer.
        lc_scene.parse(&props)?;

        let config = render_config_props(&scene.film, dimensions);
        RenderConfig::new(config, lc_scene)
    }

    /// The geometry converter and its per-object cache.
    pub fn geometry(&self) -> &GeometryExporter {
        &self.geometry
    }

    /// The material converter and its content caches.
    pub fn materials(&self) -> &MaterialExporter {
        &self.materials
    }

    /// Drop every cache, forcing the next conversion to rebuild.
    pub fn clear_caches(&mut self) {
        self.geometry.clear();
        self.materials.clear();
    }
}
