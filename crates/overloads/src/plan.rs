//! The resolved generation plan
//!
//! `GenerationPlan::build` runs the whole pure core (validate pricing,
//! resolve, shard, split) and returns the immutable bundle every emitter
//! reads from. Any error here aborts the run before emission starts.

use crate::resolver::{OverloadSet, resolve};
use crate::shards::{DEFAULT_SHARD_CAPACITY, Shard, ShardPartitioner};
use crate::splits::{DEFAULT_NUM_SPLITS, TestSplit, TestSplitter};
use catalog::{Catalog, PricingTable};
use shared::errors::CodegenResult;

/// Partitioning parameters for a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanConfig {
    /// Overloads per generated test contract
    pub shard_capacity: usize,
    /// Number of generated host test files
    pub num_splits: usize,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            shard_capacity: DEFAULT_SHARD_CAPACITY,
            num_splits: DEFAULT_NUM_SPLITS,
        }
    }
}

/// Immutable input shared by all artifact emitters
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub catalog: Catalog,
    pub pricing: PricingTable,
    pub overloads: OverloadSet,
    pub shards: Vec<Shard>,
    pub splits: Vec<TestSplit>,
}

impl GenerationPlan {
    /// Run resolve -> partition -> split over a validated catalog
    pub fn build(catalog: Catalog, pricing: PricingTable, config: PlanConfig) -> CodegenResult<Self> {
        pricing.validate_against(&catalog)?;

        // Partition parameters are checked before any work is done
        let partitioner = ShardPartitioner::new(config.shard_capacity)?;
        let splitter = TestSplitter::new(config.num_splits)?;

        let overloads = resolve(&catalog)?;
        let shards = partitioner.split_overloads_to_shards(&overloads);
        let splits = splitter.generate_test_splits(&shards);

        Ok(Self {
            catalog,
            pricing,
            overloads,
            shards,
            splits,
        })
    }

    /// Shards that produce a contract (empty shards emit nothing)
    pub fn non_empty_shards(&self) -> impl Iterator<Item = &Shard> {
        self.shards.iter().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{BitWidth, Operator};
    use shared::errors::{CodegenError, PartitionError};

    #[test]
    fn test_builtin_plan() {
        let plan = GenerationPlan::build(
            Catalog::builtin().unwrap(),
            PricingTable::builtin().unwrap(),
            PlanConfig::default(),
        )
        .unwrap();

        assert_eq!(plan.splits.len(), DEFAULT_NUM_SPLITS);
        let total: usize = plan.shards.iter().map(Shard::len).sum();
        assert_eq!(total, plan.overloads.len());
        assert!(plan.shards.iter().all(|s| s.len() <= DEFAULT_SHARD_CAPACITY));

        assert_eq!(plan.overloads[0].operator, "add");
    }

    #[test]
    fn test_invalid_partition_config_rejected_before_resolution() {
        let err = GenerationPlan::build(
            Catalog::builtin().unwrap(),
            PricingTable::default(),
            PlanConfig {
                shard_capacity: 10,
                num_splits: 0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::Partition(PartitionError::ZeroSplits)));
    }

    #[test]
    fn test_resolution_error_surfaces() {
        let catalog = Catalog::new(vec![
            Operator::binary("shr", [BitWidth::W8, BitWidth::W16])
                .scalar()
                .scalar_width(BitWidth::W8),
        ])
        .unwrap();
        let err = GenerationPlan::build(catalog, PricingTable::default(), PlanConfig::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("resolve: "));
    }

    #[test]
    fn test_empty_catalog_gives_single_empty_shard() {
        let plan = GenerationPlan::build(
            Catalog::new(Vec::new()).unwrap(),
            PricingTable::default(),
            PlanConfig::default(),
        )
        .unwrap();
        assert_eq!(plan.shards.len(), 1);
        assert_eq!(plan.non_empty_shards().count(), 0);
        assert!(plan.splits.iter().all(TestSplit::is_empty));
    }
}
