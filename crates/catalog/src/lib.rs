//! Operator catalog for TFHE code generation
//!
//! The catalog is the static configuration every later stage is derived
//! from: which operators exist, their arity, the encrypted widths they
//! support, whether they accept plaintext ("scalar") operands and how
//! mismatched widths are promoted. It is loaded once per run, validated at
//! load time and never mutated afterwards.
//!
//! - **`bitwidth`**: The supported encrypted widths and their type codes
//! - **`operator`**: Operator descriptors, promotion rules and reference semantics
//! - **`catalog`**: Loading and validating the operator list (bundled or user TOML)
//! - **`pricing`**: The per-operator price table consumed by the payment emitter

pub mod bitwidth;
pub mod catalog;
pub mod operator;
pub mod pricing;

pub use bitwidth::BitWidth;
pub use catalog::Catalog;
pub use operator::{Arity, Operator, PromotionRule, ReturnKind, Semantics};
pub use pricing::{OperatorPrice, PricingTable};
