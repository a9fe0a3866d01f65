// src/config/mod.rs

//! Pipeline definition loading.
//!
//! - [`model`] mirrors the TOML file shape.
//! - [`loader`] reads and deserializes the file.
//! - [`validate`] checks the shape and the dependency structure, using the
//!   core graph builder so diagnostics carry the same error taxonomy.

pub mod loader;
pub mod model;
pub mod validate;

pub use model::{ConfigFile, PipelineSection, RawConfigFile, TaskConfig};
