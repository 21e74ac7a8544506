//! InputVerifier emitters
//!
//! Both variants expose the same `verifyCiphertext` entry point. They differ
//! only in who attests an input proof: the KMS verifier contract
//! (`VerificationMode::Native`) or an off-chain coprocessor signing an
//! EIP-712 message (`VerificationMode::Coprocessor`).
pub mod group;
pub mod mode;
pub mod verifier;

pub use group::InputVerifiers;
pub use mode::VerificationMode;
pub use verifier::InputVerifierTemplate;
