//! Material conversion: `scene.materials.*` definitions with content
//! caching, plus the clay fallback bound wherever resolution fails.

use crate::core::{sanitize_name, ExportCache, Properties};
use crate::scene::{Material, MaterialSlot};
use crate::util::{Error, Result};

/// Name of the always-present clay material.
pub const FALLBACK_MATERIAL: &str = "dummymat";

/// Emit the clay fallback definition into a property batch.
pub fn define_fallback(props: &mut Properties) {
    props.set(format!("scene.materials.{FALLBACK_MATERIAL}.type"), "matte");
    props.set(
        format!("scene.materials.{FALLBACK_MATERIAL}.kd"),
        [0.7f32, 0.7, 0.7],
    );
}

/// A definition block held for replay into later property batches.
///
/// Every conversion builds its property stream from scratch, so a cache
/// hit must put the defining keys back into the active batch or the
/// bindings would reference names the renderer never saw.
#[derive(Debug, Clone)]
pub struct Definition {
    /// Renderer-side name, sanitized.
    pub name: String,
    /// The `scene.*` keys that define it.
    pub props: Properties,
}

/// Converts materials and textures into scene definitions.
///
/// Both caches key on the author-side name. A datablock referenced from
/// several objects converts once; its cached block replays into every
/// batch that references it.
#[derive(Debug)]
pub struct MaterialExporter {
    materials: ExportCache<String, Definition>,
    textures: ExportCache<String, Definition>,
}

impl Default for MaterialExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialExporter {
    pub fn new() -> Self {
        Self {
            materials: ExportCache::new("exported-materials"),
            textures: ExportCache::new("exported-textures"),
        }
    }

    /// Emit the definition for a named material and return its
    /// renderer-side name. A name seen before replays the cached block
    /// instead of converting again.
    pub fn convert(
        &mut self,
        props: &mut Properties,
        name: &str,
        material: &Material,
    ) -> Result<String> {
        let key = name.to_string();
        if self.materials.have(&key) {
            let cached = self.materials.get(&key)?;
            props.update(&cached.props);
            return Ok(cached.name.clone());
        }

        let lux_name = sanitize_name(name);
        if lux_name.is_empty() {
            return Err(Error::scene(format!(
                "material name '{name}' sanitizes to nothing"
            )));
        }

        let mut block = Properties::new();
        let prefix = format!("scene.materials.{lux_name}");
        block.set(format!("{prefix}.type"), material.type_name());
        match material {
            Material::Matte { kd } => {
                block.set(format!("{prefix}.kd"), *kd);
            }
            Material::Glossy { kd, ks } => {
                block.set(format!("{prefix}.kd"), *kd);
                block.set(format!("{prefix}.ks"), *ks);
            }
            Material::Mirror { kr } => {
                block.set(format!("{prefix}.kr"), *kr);
            }
            Material::Emission { color, gain } => {
                block.set(format!("{prefix}.kd"), *color);
                block.set(format!("{prefix}.emission"), *color);
                block.set(format!("{prefix}.emission.gain"), [*gain, *gain, *gain]);
            }
        }
        props.update(&block);

        self.materials.add(
            key,
            Definition {
                name: lux_name.clone(),
                props: block,
            },
        );
        Ok(lux_name)
    }

    /// Emit a float image-map texture definition and return its
    /// renderer-side name. Cached by file name, replayed on a hit.
    pub fn define_texture(&mut self, props: &mut Properties, file: &str) -> Result<String> {
        let key = file.to_string();
        if self.textures.have(&key) {
            let cached = self.textures.get(&key)?;
            props.update(&cached.props);
            return Ok(cached.name.clone());
        }

        let lux_name = sanitize_name(file);
        if lux_name.is_empty() {
            return Err(Error::scene(format!(
                "texture name '{file}' sanitizes to nothing"
            )));
        }

        let mut block = Properties::new();
        let prefix = format!("scene.textures.{lux_name}");
        block.set(format!("{prefix}.type"), "imagemap");
        block.set(format!("{prefix}.file"), file);
        props.update(&block);

        self.textures.add(
            key,
            Definition {
                name: lux_name.clone(),
                props: block,
            },
        );
        Ok(lux_name)
    }

    /// Resolve the material binding for one mesh bucket.
    ///
    /// An out-of-range or empty slot warns and binds the clay fallback,
    /// as does a failed conversion. Never aborts the export.
    pub fn resolve_slot(
        &mut self,
        props: &mut Properties,
        object_name: &str,
        slots: &[MaterialSlot],
        index: usize,
    ) -> String {
        let assigned = slots.get(index).and_then(|slot| {
            slot.material
                .as_ref()
                .map(|material| (slot.name.as_str(), material))
        });

        let Some((name, material)) = assigned else {
            tracing::warn!(
                "material slot {} on object '{}' is unassigned",
                index + 1,
                object_name
            );
            return FALLBACK_MATERIAL.to_string();
        };

        match self.convert(props, name, material) {
            Ok(lux_name) => lux_name,
            Err(err) => {
                tracing::warn!(
                    "material export failed on object '{}', substituting fallback: {err}",
                    object_name
                );
                FALLBACK_MATERIAL.to_string()
            }
        }
    }

    /// The material content cache.
    pub fn materials(&self) -> &ExportCache<String, Definition> {
        &self.materials
    }

    /// The texture content cache.
    pub fn textures(&self) -> &ExportCache<String, Definition> {
        &self.textures
    }

    /// Drop both caches.
    pub fn clear(&mut self) {
        self.materials.clear();
        self.textures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PropValue;

    #[test]
    fn test_fallback_definition() {
        let mut props = Properties::new();
        define_fallback(&mut props);
        assert_eq!(
            props
                .get("scene.materials.dummymat.type")
                .and_then(PropValue::as_str),
            Some("matte")
        );
        assert!(props.has("scene.materials.dummymat.kd"));
    }

    #[test]
    fn test_convert_emits_once() {
        let mut exporter = MaterialExporter::new();
        let mut props = Properties::new();
        let material = Material::Matte { kd: [0.2, 0.4, 0.6] };

        let first = exporter.convert(&mut props, "wall.paint", &material).unwrap();
        assert_eq!(first, "wall_paint");
        assert!(props.has("scene.materials.wall_paint.type"));
        let emitted = props.len();

        let second = exporter.convert(&mut props, "wall.paint", &material).unwrap();
        assert_eq!(second, "wall_paint");
        assert_eq!(props.len(), emitted);
        assert_eq!(exporter.materials().len(), 1);
    }

    #[test]
    fn test_cached_material_replays_into_fresh_batch() {
        let mut exporter = MaterialExporter::new();
        let material = Material::Matte { kd: [0.2, 0.4, 0.6] };

        let mut first = Properties::new();
        exporter.convert(&mut first, "wall.paint", &material).unwrap();

        let mut second = Properties::new();
        let name = exporter.convert(&mut second, "wall.paint", &material).unwrap();
        assert_eq!(name, "wall_paint");
        assert_eq!(
            second
                .get("scene.materials.wall_paint.type")
                .and_then(PropValue::as_str),
            Some("matte")
        );
        assert!(second.has("scene.materials.wall_paint.kd"));
        assert_eq!(exporter.materials().len(), 1);
    }

    #[test]
    fn test_cached_texture_replays_into_fresh_batch() {
        let mut exporter = MaterialExporter::new();

        let mut first = Properties::new();
        exporter.define_texture(&mut first, "bump.png").unwrap();

        let mut second = Properties::new();
        let name = exporter.define_texture(&mut second, "bump.png").unwrap();
        assert_eq!(name, "bump_png");
        assert_eq!(
            second
                .get("scene.textures.bump_png.file")
                .and_then(PropValue::as_str),
            Some("bump.png")
        );
        assert_eq!(exporter.textures().len(), 1);
    }

    #[test]
    fn test_material_kinds() {
        let mut exporter = MaterialExporter::new();
        let mut props = Properties::new();

        exporter
            .convert(
                &mut props,
                "chrome",
                &Material::Mirror { kr: [0.9, 0.9, 0.9] },
            )
            .unwrap();
        assert_eq!(
            props
                .get("scene.materials.chrome.type")
                .and_then(PropValue::as_str),
            Some("mirror")
        );
        assert!(props.has("scene.materials.chrome.kr"));

        exporter
            .convert(
                &mut props,
                "lamp",
                &Material::Emission {
                    color: [1.0, 0.8, 0.6],
                    gain: 20.0,
                },
            )
            .unwrap();
        assert_eq!(
            props
                .get("scene.materials.lamp.type")
                .and_then(PropValue::as_str),
            Some("matte")
        );
        assert_eq!(
            props.get("scene.materials.lamp.emission.gain"),
            Some(&PropValue::Floats(vec![20.0, 20.0, 20.0]))
        );
    }

    #[test]
    fn test_resolve_out_of_range_slot_falls_back() {
        let mut exporter = MaterialExporter::new();
        let mut props = Properties::new();
        let slots = vec![MaterialSlot::new("gray", Material::default())];

        let bound = exporter.resolve_slot(&mut props, "box", &slots, 3);
        assert_eq!(bound, FALLBACK_MATERIAL);
        assert!(props.is_empty());
    }

    #[test]
    fn test_resolve_empty_slot_falls_back() {
        let mut exporter = MaterialExporter::new();
        let mut props = Properties::new();
        let slots = vec![MaterialSlot::empty()];

        let bound = exporter.resolve_slot(&mut props, "box", &slots, 0);
        assert_eq!(bound, FALLBACK_MATERIAL);
    }

    #[test]
    fn test_resolve_bad_name_falls_back() {
        let mut exporter = MaterialExporter::new();
        let mut props = Properties::new();
        let slots = vec![MaterialSlot::new("", Material::default())];

        let bound = exporter.resolve_slot(&mut props, "box", &slots, 0);
        assert_eq!(bound, FALLBACK_MATERIAL);
        assert!(props.is_empty());
    }

    #[test]
    fn test_resolve_assigned_slot() {
        let mut exporter = MaterialExporter::new();
        let mut props = Properties::new();
        let slots = vec![MaterialSlot::new(
            "Türen & Tore",
            Material::Glossy {
                kd: [0.5, 0.1, 0.1],
                ks: [0.04, 0.04, 0.04],
            },
        )];

        let bound = exporter.resolve_slot(&mut props, "door", &slots, 0);
        assert_eq!(bound, "T_ren_Tore");
        assert_eq!(
            props
                .get("scene.materials.T_ren_Tore.type")
                .and_then(PropValue::as_str),
            Some("glossy2")
        );
    }

    #[test]
    fn test_texture_emitted_once() {
        let mut exporter = MaterialExporter::new();
        let mut props = Properties::new();

        let name = exporter
            .define_texture(&mut props, "textures/rock height.png")
            .unwrap();
        assert_eq!(name, "textures_rock_height_png");
        assert_eq!(
            props
                .get("scene.textures.textures_rock_height_png.type")
                .and_then(PropValue::as_str),
            Some("imagemap")
        );
        let emitted = props.len();

        exporter
            .define_texture(&mut props, "textures/rock height.png")
            .unwrap();
        assert_eq!(props.len(), emitted);
        assert_eq!(exporter.textures().len(), 1);
    }
}
