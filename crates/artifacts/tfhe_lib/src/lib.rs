//! TFHE library emitters
//!
//! Generates the two Solidity libraries every encrypted contract links
//! against:
//!
//! - `lib/TFHE.sol`: the user-facing library with encrypted types, input
//!   conversions, casts and one function per resolved overload
//! - `lib/Impl.sol`: the thin layer forwarding each operator to its executor
//!   entry point (`fheAdd`, `fheNeg`, ...)
pub mod group;
pub mod impl_sol;
pub mod tfhe_sol;

pub use group::TfheLibrary;
pub use impl_sol::ImplTemplate;
pub use tfhe_sol::TfheTemplate;
