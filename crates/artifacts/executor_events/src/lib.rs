//! TFHEExecutor event augmentation
//!
//! Reads an executor contract's source and derives `TFHEExecutorWithEvents`,
//! which overrides every public virtual state-changing entry point so that
//! each call emits an event carrying its arguments and result.
//!
//! Unlike the other emitters this pass works on text the generator does not
//! own, so it is a (deliberately small) Solidity scanner rather than a
//! template over the generation plan.
pub mod events;
pub mod group;
pub mod parser;

pub use events::add_tfhe_executor_events;
pub use group::ExecutorEvents;
pub use parser::{ExecutorContract, ExecutorFunction, Parameter, parse_executor};
