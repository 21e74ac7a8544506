//! Input verifier artifact group

use crate::mode::VerificationMode;
use crate::verifier::InputVerifierTemplate;
use overloads::GenerationPlan;
use shared::{ArtifactGroup, CodegenResult, GeneratedArtifact, SourceTemplate};

/// Artifact group emitting one verifier per [`VerificationMode`]
pub struct InputVerifiers;

impl ArtifactGroup<GenerationPlan> for InputVerifiers {
    fn name(&self) -> &'static str {
        "input-verifier"
    }

    fn description(&self) -> &'static str {
        "InputVerifier contracts for native and coprocessor verification"
    }

    /// Render every verification mode
    ///
    /// # Returns
    ///
    /// One artifact per entry of `VerificationMode::ALL`, in that order
    fn generate(&self, plan: &GenerationPlan) -> CodegenResult<Vec<GeneratedArtifact>> {
        VerificationMode::ALL
            .iter()
            .map(|&mode| InputVerifierTemplate::new(mode).to_artifact(plan))
            .collect()
    }
}
