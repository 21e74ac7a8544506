//! Capacity-bound partitioning of the overload set into contract shards
//!
//! Each shard becomes one generated test contract, so the capacity bounds
//! the number of entry points per contract (and with it the bytecode size).

use crate::operand::Overload;
use shared::errors::PartitionError;

/// Overloads per generated test contract
pub const DEFAULT_SHARD_CAPACITY: usize = 90;

/// A numbered, ordered slice of the overload set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    /// 1-based, dense shard number
    pub shard_number: usize,
    /// Contiguous run of the overload set, in resolver order
    pub overloads: Vec<Overload>,
}

impl Shard {
    pub fn is_empty(&self) -> bool {
        self.overloads.is_empty()
    }

    /// Number of overloads in this shard, never above the partitioner capacity
    pub fn len(&self) -> usize {
        self.overloads.len()
    }
}

/// Greedy bin-fill partitioner with a fixed per-shard capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardPartitioner {
    capacity: usize,
}

impl ShardPartitioner {
    /// Create a partitioner
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of overloads per shard
    ///
    /// # Returns
    ///
    /// `PartitionError::ZeroCapacity` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self, PartitionError> {
        if capacity == 0 {
            return Err(PartitionError::ZeroCapacity);
        }
        Ok(Self { capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fill shards in order until each reaches capacity
    ///
    /// Concatenating the returned shards reproduces `overloads` exactly. An
    /// empty input yields a single empty shard.
    pub fn split_overloads_to_shards(&self, overloads: &[Overload]) -> Vec<Shard> {
        if overloads.is_empty() {
            return vec![Shard {
                shard_number: 1,
                overloads: Vec::new(),
            }];
        }

        let mut shards: Vec<Shard> = Vec::new();
        let mut current = Vec::with_capacity(self.capacity);
        for overload in overloads {
            current.push(overload.clone());
            if current.len() == self.capacity {
                shards.push(Shard {
                    shard_number: shards.len() + 1,
                    overloads: std::mem::take(&mut current),
                });
            }
        }
        if !current.is_empty() {
            shards.push(Shard {
                shard_number: shards.len() + 1,
                overloads: current,
            });
        }

        tracing::debug!(
            overloads = overloads.len(),
            shards = shards.len(),
            capacity = self.capacity,
            "partitioned overloads into contract shards"
        );
        shards
    }
}

impl Default for ShardPartitioner {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SHARD_CAPACITY,
        }
    }
}
