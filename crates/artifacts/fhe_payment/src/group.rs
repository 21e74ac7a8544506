//! Payment artifact group

use crate::fhe_payment_sol::FhePaymentTemplate;
use crate::payment_sol::PaymentTemplate;
use overloads::GenerationPlan;
use shared::{ArtifactGroup, CodegenResult, GeneratedArtifact, SourceTemplate};

/// Artifact group emitting `lib/FHEPayment.sol` and `payment/Payment.sol`
///
/// Only the first depends on the plan: its `payFor<Op>` functions follow the
/// priced operators.
pub struct PaymentContracts;

impl ArtifactGroup<GenerationPlan> for PaymentContracts {
    fn name(&self) -> &'static str {
        "payment"
    }

    fn description(&self) -> &'static str {
        "FHEPayment.sol pricing contract and Payment.sol helper"
    }

    fn generate(&self, plan: &GenerationPlan) -> CodegenResult<Vec<GeneratedArtifact>> {
        Ok(vec![
            FhePaymentTemplate.to_artifact(plan)?,
            PaymentTemplate.to_artifact(plan)?,
        ])
    }
}
