//! Shared utilities and traits for TFHE code generation
//!
//! This crate provides the functionality used by every stage of the generator.
//! It defines the error taxonomy, the in-memory artifact containers and the
//! traits that every artifact emitter implements.
//!
//! - **`artifact`**: Generated artifacts and the buffered, write-once artifact set
//! - **`errors`**: Stage-tagged error types (catalog, resolve, partition, emit)
//! - **`group`**: The `ArtifactGroup` trait implemented by each emitter crate
//! - **`template`**: The `SourceTemplate` trait for single-file renderers
//! - **`utils`**: Solidity/TypeScript text helpers shared by the emitters

pub mod artifact;
pub mod errors;
pub mod group;
pub mod template;
pub mod utils;

pub use artifact::{ArtifactSet, GeneratedArtifact};
pub use errors::{
    CatalogError, CodegenError, CodegenResult, EmitError, PartitionError, ResolutionError,
};
pub use group::ArtifactGroup;
pub use template::SourceTemplate;
