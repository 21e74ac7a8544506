//! Supported encrypted integer widths
//!
//! `Bool` behaves as a 1-bit integer for ordering purposes but never takes
//! part in cross-width promotion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed set of encrypted widths, ordered by size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BitWidth {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "4")]
    W4,
    #[serde(rename = "8")]
    W8,
    #[serde(rename = "16")]
    W16,
    #[serde(rename = "32")]
    W32,
    #[serde(rename = "64")]
    W64,
    #[serde(rename = "128")]
    W128,
    #[serde(rename = "256")]
    W256,
}

impl BitWidth {
    /// Every width, ascending
    pub const ALL: [BitWidth; 8] = [
        BitWidth::Bool,
        BitWidth::W4,
        BitWidth::W8,
        BitWidth::W16,
        BitWidth::W32,
        BitWidth::W64,
        BitWidth::W128,
        BitWidth::W256,
    ];

    /// Number of plaintext bits
    pub fn bits(self) -> u32 {
        match self {
            BitWidth::Bool => 1,
            BitWidth::W4 => 4,
            BitWidth::W8 => 8,
            BitWidth::W16 => 16,
            BitWidth::W32 => 32,
            BitWidth::W64 => 64,
            BitWidth::W128 => 128,
            BitWidth::W256 => 256,
        }
    }

    /// Byte identifying the type inside a ciphertext handle.
    ///
    /// Code 7 belongs to encrypted addresses, which this generator does not
    /// emit, hence the jump to 8 for 256-bit integers.
    pub fn type_code(self) -> u8 {
        match self {
            BitWidth::Bool => 0,
            BitWidth::W4 => 1,
            BitWidth::W8 => 2,
            BitWidth::W16 => 3,
            BitWidth::W32 => 4,
            BitWidth::W64 => 5,
            BitWidth::W128 => 6,
            BitWidth::W256 => 8,
        }
    }

    pub fn is_bool(self) -> bool {
        self == BitWidth::Bool
    }

    /// Configuration spelling (`"bool"`, `"8"`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            BitWidth::Bool => "bool",
            BitWidth::W4 => "4",
            BitWidth::W8 => "8",
            BitWidth::W16 => "16",
            BitWidth::W32 => "32",
            BitWidth::W64 => "64",
            BitWidth::W128 => "128",
            BitWidth::W256 => "256",
        }
    }

    /// Solidity name of the encrypted type (`ebool`, `euint8`)
    pub fn encrypted_type(self) -> String {
        match self {
            BitWidth::Bool => "ebool".to_string(),
            w => format!("euint{}", w.bits()),
        }
    }

    /// Solidity name of the plaintext type (`bool`, `uint8`)
    ///
    /// Solidity has no `uint4`, so 4-bit plaintexts travel as `uint8`.
    pub fn plaintext_type(self) -> String {
        match self {
            BitWidth::Bool => "bool".to_string(),
            BitWidth::W4 => "uint8".to_string(),
            w => format!("uint{}", w.bits()),
        }
    }

    /// Capitalized encrypted type, used in identifiers (`Ebool`, `Euint8`)
    pub fn type_suffix(self) -> String {
        match self {
            BitWidth::Bool => "Ebool".to_string(),
            w => format!("Euint{}", w.bits()),
        }
    }

    /// Name of the library conversion function into this type (`asEuint8`)
    pub fn cast_function(self) -> String {
        format!("as{}", self.type_suffix())
    }

    /// Name of the `Common` library constant holding the type code (`euint8_t`)
    pub fn type_constant(self) -> String {
        format!("{}_t", self.encrypted_type())
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BitWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BitWidth::ALL
            .into_iter()
            .find(|w| w.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                format!("Unknown bit width: {s}. Supported widths: bool, 4, 8, 16, 32, 64, 128, 256")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_by_size() {
        let mut shuffled = vec![BitWidth::W64, BitWidth::Bool, BitWidth::W256, BitWidth::W8];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![BitWidth::Bool, BitWidth::W8, BitWidth::W64, BitWidth::W256]
        );
        assert!(BitWidth::ALL.windows(2).all(|w| w[0].bits() < w[1].bits()));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(BitWidth::Bool.encrypted_type(), "ebool");
        assert_eq!(BitWidth::W16.encrypted_type(), "euint16");
        assert_eq!(BitWidth::W256.plaintext_type(), "uint256");
        assert_eq!(BitWidth::Bool.plaintext_type(), "bool");
        assert_eq!(BitWidth::W4.plaintext_type(), "uint8");
        assert_eq!(BitWidth::W4.encrypted_type(), "euint4");
        assert_eq!(BitWidth::W32.type_suffix(), "Euint32");
        assert_eq!(BitWidth::Bool.cast_function(), "asEbool");
        assert_eq!(BitWidth::W64.type_constant(), "euint64_t");
    }

    #[test]
    fn test_type_codes_are_unique() {
        let mut codes: Vec<u8> = BitWidth::ALL.iter().map(|w| w.type_code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), BitWidth::ALL.len());
        assert_eq!(BitWidth::W256.type_code(), 8);
    }

    #[test]
    fn test_parse() {
        assert_eq!("bool".parse::<BitWidth>().unwrap(), BitWidth::Bool);
        assert_eq!(" 128 ".parse::<BitWidth>().unwrap(), BitWidth::W128);
        assert!("12".parse::<BitWidth>().is_err());
    }
}
