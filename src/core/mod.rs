//! Core layer - property containers and export bookkeeping.
//!
//! This module provides:
//! - [`ParamSet`] - Typed parameter blocks for the legacy text protocol
//! - [`Properties`] - Flat dotted-key property container for the renderer
//! - [`ExportCache`] - Keyed result cache with per-key serial numbers
//! - [`sanitize_name`] - Renderer-safe identifier mangling

mod cache;
mod paramset;
mod props;

pub use cache::{ExportCache, MeshCacheKey};
pub use paramset::{ParamSet, ParamSetItem, ParamValue};
pub use props::{sanitize_name, PropValue, Properties};
