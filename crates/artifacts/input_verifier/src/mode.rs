use std::fmt;

/// Backend that attests input proofs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationMode {
    Native,
    Coprocessor,
}

impl VerificationMode {
    pub const ALL: [VerificationMode; 2] = [VerificationMode::Native, VerificationMode::Coprocessor];

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationMode::Native => "native",
            VerificationMode::Coprocessor => "coprocessor",
        }
    }

    /// Output file name (`InputVerifier.native.sol`)
    pub fn file_name(self) -> String {
        format!("InputVerifier.{}.sol", self.as_str())
    }

    pub fn is_coprocessor(self) -> bool {
        matches!(self, VerificationMode::Coprocessor)
    }
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
