//! Library artifact group
//!
//! Bundles `Impl.sol` and `TFHE.sol`, which are always generated together
//! because `TFHE.sol` calls into `Impl` for every overload.

use crate::impl_sol::ImplTemplate;
use crate::tfhe_sol::TfheTemplate;
use overloads::GenerationPlan;
use shared::{ArtifactGroup, CodegenResult, GeneratedArtifact, SourceTemplate};

/// Artifact group emitting the two library sources
///
/// `Impl.sol` comes first so the file list reads in dependency order.
pub struct TfheLibrary;

impl ArtifactGroup<GenerationPlan> for TfheLibrary {
    fn name(&self) -> &'static str {
        "library"
    }

    fn description(&self) -> &'static str {
        "TFHE.sol and Impl.sol library sources"
    }

    /// Render both library files
    ///
    /// # Arguments
    ///
    /// * `plan` - The resolved plan; only its catalog and overloads are read
    ///
    /// # Returns
    ///
    /// `lib/Impl.sol` and `lib/TFHE.sol`, in that order
    fn generate(&self, plan: &GenerationPlan) -> CodegenResult<Vec<GeneratedArtifact>> {
        Ok(vec![
            ImplTemplate.to_artifact(plan)?,
            TfheTemplate.to_artifact(plan)?,
        ])
    }
}
