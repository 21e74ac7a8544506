//! Test suite artifact group
//!
//! Shard contracts and split drivers come from the same plan, so an overload's
//! host test always targets the contract of the shard it was assigned to.

use crate::contract::SuiteContractTemplate;
use crate::host::{HostTestTemplate, SplitContext};
use overloads::{GenerationPlan, Shard};
use rayon::prelude::*;
use shared::{ArtifactGroup, CodegenResult, GeneratedArtifact, SourceTemplate};

/// Artifact group emitting the on-chain test contracts and host test drivers
pub struct TestSuites;

impl ArtifactGroup<GenerationPlan> for TestSuites {
    fn name(&self) -> &'static str {
        "tests"
    }

    fn description(&self) -> &'static str {
        "TFHETestSuiteN.sol contracts and tfheOperationsN.ts drivers"
    }

    /// Render every test artifact
    ///
    /// # Arguments
    ///
    /// * `plan` - The plan whose shards and splits drive the output
    ///
    /// # Returns
    ///
    /// One `TFHETestSuiteN.sol` per non-empty shard in shard order, followed
    /// by exactly `plan.splits.len()` `tfheOperationsN.ts` files
    fn generate(&self, plan: &GenerationPlan) -> CodegenResult<Vec<GeneratedArtifact>> {
        // Empty shards (only possible for an empty overload set) emit nothing
        let shards: Vec<&Shard> = plan.non_empty_shards().collect();
        let mut artifacts = shards
            .par_iter()
            .map(|shard| SuiteContractTemplate.to_artifact(shard))
            .collect::<CodegenResult<Vec<_>>>()?;
        tracing::debug!(contracts = artifacts.len(), "rendered test contracts");

        let mut first_index = 0;
        for split in &plan.splits {
            let ctx = SplitContext {
                catalog: &plan.catalog,
                split,
                first_index,
            };
            artifacts.push(HostTestTemplate.to_artifact(&ctx)?);
            first_index += split.len();
        }
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, PricingTable};
    use overloads::PlanConfig;
    use std::path::PathBuf;

    #[test]
    fn test_paths_follow_shards_and_splits() {
        let config = PlanConfig {
            shard_capacity: 90,
            num_splits: 12,
        };
        let plan = GenerationPlan::build(
            Catalog::builtin().unwrap(),
            PricingTable::builtin().unwrap(),
            config,
        )
        .unwrap();
        let artifacts = TestSuites.generate(&plan).unwrap();
        let contracts = plan.non_empty_shards().count();
        assert_eq!(artifacts.len(), contracts + 12);
        assert_eq!(artifacts[0].path, PathBuf::from("contracts/tests/TFHETestSuite1.sol"));
        assert_eq!(
            artifacts[contracts - 1].path,
            PathBuf::from(format!("contracts/tests/TFHETestSuite{contracts}.sol"))
        );
        assert_eq!(
            artifacts[contracts].path,
            PathBuf::from("test/tfheOperations/tfheOperations1.ts")
        );
        assert_eq!(
            artifacts.last().unwrap().path,
            PathBuf::from("test/tfheOperations/tfheOperations12.ts")
        );
    }

    #[test]
    fn test_split_rendering_matches_generate_test_code() {
        let plan = GenerationPlan::build(
            Catalog::builtin().unwrap(),
            PricingTable::builtin().unwrap(),
            PlanConfig {
                shard_capacity: 40,
                num_splits: 5,
            },
        )
        .unwrap();
        let artifacts = TestSuites.generate(&plan).unwrap();
        let expected = crate::host::generate_test_code(&plan.catalog, &plan.shards, 5).unwrap();
        let rendered: Vec<&str> = artifacts
            .iter()
            .filter(|a| a.path.starts_with("test"))
            .map(|a| a.content.as_str())
            .collect();
        assert_eq!(rendered, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
