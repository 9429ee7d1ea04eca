//! Utility types and functions for the exporter.
//!
//! This module contains fundamentals used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - [`codec`] - zlib+base64 embedding codec for binary payloads

pub mod codec;
mod error;

pub use error::*;
