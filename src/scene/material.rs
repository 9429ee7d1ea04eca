//! Material model: a closed set of surface kinds plus the per-object
//! slot table binding faces to materials.

/// Surface description attached to a material slot.
///
/// The set is closed on purpose: conversion dispatches over these
/// variants with a plain `match` instead of late-bound per-type hooks.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Diffuse surface with a constant reflectance.
    Matte { kd: [f32; 3] },
    /// Glossy coat over a diffuse base.
    Glossy { kd: [f32; 3], ks: [f32; 3] },
    /// Perfect specular reflector.
    Mirror { kr: [f32; 3] },
    /// Diffuse emitter: a matte base that also radiates.
    Emission { color: [f32; 3], gain: f32 },
}

impl Material {
    /// Renderer-side type token for this surface kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Material::Matte { .. } | Material::Emission { .. } => "matte",
            Material::Glossy { .. } => "glossy2",
            Material::Mirror { .. } => "mirror",
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Matte {
            kd: [0.7, 0.7, 0.7],
        }
    }
}

/// One entry of an object's material-slot table.
///
/// A slot may be present but unassigned (`material: None`); face buckets
/// that land on such a slot fall back to the scene's clay material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialSlot {
    pub name: String,
    pub material: Option<Material>,
}

impl MaterialSlot {
    pub fn new(name: impl Into<String>, material: Material) -> Self {
        Self {
            name: name.into(),
            material: Some(material),
        }
    }

    /// Slot that exists in the table but has nothing assigned.
    pub fn empty() -> Self {
        Self::default()
    }
}
