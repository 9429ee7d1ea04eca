//! # Luxport
//!
//! Scene and geometry export pipeline targeting the LuxCore renderer
//! property format.
//!
//! Originally modeled on the LuxCore translation layer of the Blender
//! LuxRender add-on. All rights to the original belong to its authors.
//! This is an independent Rust implementation of the conversion
//! pipeline, aiming to reproduce its output key-for-key.
//!
//! ## Modules
//!
//! - [`util`] - Errors and the embedded-data codec
//! - [`core`] - ParamSet/Properties containers and export caches
//! - [`scene`] - Read-only input scene description
//! - [`export`] - Converters from scene data to renderer properties
//! - [`luxcore`] - Renderer-binding facade (scene + render config)
//!
//! ## Example
//!
//! ```
//! use luxport::export::SceneExporter;
//! use luxport::scene::SceneData;
//!
//! let scene = SceneData::new("demo");
//! let mut exporter = SceneExporter::new();
//!
//! let config = exporter.convert(&scene, None)?;
//! assert!(config.props().has("film.width"));
//! # Ok::<(), luxport::Error>(())
//! ```

pub mod core;
pub mod export;
pub mod luxcore;
pub mod scene;
pub mod util;

// Re-export commonly used types
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{sanitize_name, PropValue, Properties};
    pub use crate::core::{ExportCache, MeshCacheKey, ParamSet, ParamSetItem, ParamValue};
    pub use crate::export::{GeometryExporter, MaterialExporter, SceneExporter};
    pub use crate::luxcore::{MeshBuffers, RenderConfig, Scene};
    pub use crate::scene::*;
    pub use crate::util::{Error, Result};
}
