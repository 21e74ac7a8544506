//! Overload resolution and partitioning for TFHE code generation
//!
//! This crate holds the pure core of the generator:
//!
//! - **`operand`**: `OperandKind` and `Overload`, the resolved unit of code generation
//! - **`resolver`**: Expands the catalog into the ordered `OverloadSet`
//! - **`shards`**: Capacity-bound partitioning into contract shards
//! - **`splits`**: Count-bound partitioning into host test splits
//! - **`plan`**: `GenerationPlan`, the immutable input of every emitter
//! - **`reference`**: Plaintext reference evaluation for expected test values
//! - **`sample`**: Deterministic operand sampling
//! - **`vectors`**: Test vectors per overload
//!
//! Contract sharding and test splitting are deliberately separate types: the
//! former is bounded by bytecode size, the latter by test-runner parallelism.

pub mod operand;
pub mod plan;
pub mod reference;
pub mod resolver;
pub mod sample;
pub mod shards;
pub mod splits;
pub mod vectors;

pub use operand::{OperandKind, Overload};
pub use plan::{GenerationPlan, PlanConfig};
pub use resolver::{OverloadSet, resolve};
pub use shards::{DEFAULT_SHARD_CAPACITY, Shard, ShardPartitioner};
pub use splits::{DEFAULT_NUM_SPLITS, TestSplit, TestSplitter};
pub use vectors::{TestVector, test_vectors};
