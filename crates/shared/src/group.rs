//! Artifact group trait for emitter implementations
//!
//! Each emitter crate (library, verifier, payment, tests, executor events)
//! exposes one or more `ArtifactGroup` implementations. The generator keeps a
//! registry of them and runs every group against the same immutable input.
//!
//! The trait is generic over its input so that this crate does not depend on
//! the catalog or the overload resolver; in practice the input is the
//! resolved `GenerationPlan`.

use crate::artifact::GeneratedArtifact;
use crate::errors::CodegenResult;

/// A named producer of one or more generated files
pub trait ArtifactGroup<Input: ?Sized>: Send + Sync {
    /// Short, unique identifier used in CLI listings and error messages
    fn name(&self) -> &'static str;

    /// One-line description of what the group generates
    fn description(&self) -> &'static str;

    /// Produce the group's artifacts
    ///
    /// Implementations must be pure: the same input yields byte-identical
    /// artifacts, and nothing is written to disk.
    fn generate(&self, input: &Input) -> CodegenResult<Vec<GeneratedArtifact>>;
}
