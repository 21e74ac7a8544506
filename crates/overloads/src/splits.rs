//! Count-bound partitioning of the overload set into host test splits
//!
//! Independent of contract sharding: the number of test driver files is
//! chosen for test-runner parallelism, not bytecode size. Every overload keeps
//! the number of the contract shard it lives in so the driver knows which
//! test contract to call.

use crate::operand::Overload;
use crate::shards::Shard;
use shared::errors::PartitionError;

/// Number of generated host test files
pub const DEFAULT_NUM_SPLITS: usize = 12;

/// An overload together with the contract shard that exposes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitEntry {
    pub shard_number: usize,
    pub overload: Overload,
}

/// One host test file's worth of overloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSplit {
    /// 1-based split number
    pub split_number: usize,
    pub entries: Vec<SplitEntry>,
}

impl TestSplit {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Distinct shard numbers referenced by this split, ascending
    pub fn shard_numbers(&self) -> Vec<usize> {
        let mut numbers: Vec<usize> = self.entries.iter().map(|e| e.shard_number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }
}

/// Redistributes all shards' overloads into a fixed number of splits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSplitter {
    num_splits: usize,
}

impl TestSplitter {
    pub fn new(num_splits: usize) -> Result<Self, PartitionError> {
        if num_splits == 0 {
            return Err(PartitionError::ZeroSplits);
        }
        Ok(Self { num_splits })
    }

    pub fn num_splits(&self) -> usize {
        self.num_splits
    }

    /// Size of each split for `total` overloads
    ///
    /// With at least one overload per split, sizes differ by at most one and
    /// the larger splits come last. With fewer overloads than splits, each
    /// overload gets its own split and the trailing splits stay empty.
    pub fn split_sizes(&self, total: usize) -> Vec<usize> {
        let k = self.num_splits;
        if total < k {
            return (0..k).map(|i| usize::from(i < total)).collect();
        }
        let base = total / k;
        let extra = total % k;
        (0..k)
            .map(|i| base + usize::from(i >= k - extra))
            .collect()
    }

    /// Flatten the shards and cut the sequence into exactly `num_splits`
    /// contiguous groups, preserving overall order
    pub fn generate_test_splits(&self, shards: &[Shard]) -> Vec<TestSplit> {
        let mut entries = shards.iter().flat_map(|shard| {
            shard.overloads.iter().map(move |overload| SplitEntry {
                shard_number: shard.shard_number,
                overload: overload.clone(),
            })
        });

        let total = shards.iter().map(Shard::len).sum();
        let splits: Vec<TestSplit> = self
            .split_sizes(total)
            .into_iter()
            .enumerate()
            .map(|(i, size)| TestSplit {
                split_number: i + 1,
                entries: entries.by_ref().take(size).collect(),
            })
            .collect();

        tracing::debug!(
            overloads = total,
            splits = splits.len(),
            "distributed overloads into test splits"
        );
        splits
    }
}

impl Default for TestSplitter {
    fn default() -> Self {
        Self {
            num_splits: DEFAULT_NUM_SPLITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::OperandKind;
    use crate::shards::ShardPartitioner;
    use catalog::BitWidth;
    use proptest::prelude::*;

    fn overloads(n: usize) -> Vec<Overload> {
        (0..n)
            .map(|i| {
                Overload::new(
                    &format!("op{i}"),
                    vec![OperandKind::Encrypted(BitWidth::W8)],
                    OperandKind::Encrypted(BitWidth::W8),
                )
            })
            .collect()
    }

    fn flatten(splits: &[TestSplit]) -> Vec<Overload> {
        splits
            .iter()
            .flat_map(|s| s.entries.iter().map(|e| e.overload.clone()))
            .collect()
    }

    #[test]
    fn test_four_splits_over_five_overloads() {
        let ovs = overloads(5);
        let shards = ShardPartitioner::new(2)
            .unwrap()
            .split_overloads_to_shards(&ovs);
        let splits = TestSplitter::new(4).unwrap().generate_test_splits(&shards);

        assert_eq!(splits.len(), 4);
        let sizes: Vec<usize> = splits.iter().map(TestSplit::len).collect();
        assert_eq!(sizes, vec![1, 1, 1, 2]);
        assert_eq!(flatten(&splits), ovs);

        // Shard numbers travel with the overloads
        assert_eq!(splits[0].entries[0].shard_number, 1);
        assert_eq!(splits[3].shard_numbers(), vec![2, 3]);
    }

    #[test]
    fn test_more_splits_than_overloads() {
        let shards = ShardPartitioner::default().split_overloads_to_shards(&overloads(3));
        let splits = TestSplitter::new(12).unwrap().generate_test_splits(&shards);
        assert_eq!(splits.len(), 12);
        assert!(splits[..3].iter().all(|s| s.len() == 1));
        assert!(splits[3..].iter().all(TestSplit::is_empty));
        assert_eq!(
            splits.iter().map(|s| s.split_number).collect::<Vec<_>>(),
            (1..=12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_empty_shard_gives_empty_splits() {
        let shards = ShardPartitioner::default().split_overloads_to_shards(&[]);
        let splits = TestSplitter::new(3).unwrap().generate_test_splits(&shards);
        assert_eq!(splits.len(), 3);
        assert!(splits.iter().all(TestSplit::is_empty));
    }

    #[test]
    fn test_zero_splits_rejected() {
        assert_eq!(TestSplitter::new(0), Err(PartitionError::ZeroSplits));
    }

    proptest! {
        #[test]
        fn prop_split_count_and_coverage(
            n in 0usize..300,
            capacity in 1usize..40,
            num_splits in 1usize..30,
        ) {
            let ovs = overloads(n);
            let shards = ShardPartitioner::new(capacity).unwrap().split_overloads_to_shards(&ovs);
            let splits = TestSplitter::new(num_splits).unwrap().generate_test_splits(&shards);

            prop_assert_eq!(splits.len(), num_splits);
            prop_assert_eq!(flatten(&splits), ovs);

            let sizes: Vec<usize> = splits.iter().map(TestSplit::len).collect();
            let max = sizes.iter().copied().max().unwrap_or(0);
            let min = sizes.iter().copied().min().unwrap_or(0);
            prop_assert!(max - min <= 1);
            if n >= num_splits {
                prop_assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
