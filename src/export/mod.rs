//! Export layer - converters from scene data to renderer properties.
//!
//! This module provides:
//! - [`SceneExporter`] - whole-scene conversion entry point
//! - [`GeometryExporter`] - per-object mesh bucketing and caching
//! - [`MaterialExporter`] - material/texture definitions with fallback
//! - [`convert_camera`] - camera property block
//! - [`render_config_props`] - fixed render configuration baseline

mod camera;
mod config;
mod geometry;
mod material;
mod scene;

pub use camera::{convert_camera, look_at, LookAt};
pub use config::render_config_props;
pub use geometry::{ExportedMesh, GeometryExporter};
pub use material::{define_fallback, Definition, MaterialExporter, FALLBACK_MATERIAL};
pub use scene::SceneExporter;
