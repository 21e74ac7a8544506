//! Test emitters
//!
//! Two artifact families cover every resolved overload:
//!
//! - `contracts/tests/TFHETestSuiteN.sol`: one contract per non-empty shard,
//!   exposing one entry point per overload that decrypts nothing and just
//!   stores the encrypted result in a public variable
//! - `test/tfheOperations/tfheOperationsN.ts`: one host test driver per split,
//!   encrypting inputs, calling the matching contract and checking the
//!   decrypted result against the reference value
pub mod contract;
pub mod group;
pub mod host;

pub use contract::{SuiteContractTemplate, generate_smart_contract};
pub use group::TestSuites;
pub use host::{HostTestTemplate, generate_test_code};
