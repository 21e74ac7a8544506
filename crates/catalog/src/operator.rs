//! Operator descriptors
//!
//! An `Operator` is a static description: identifier, arity, the widths it
//! supports and the rules that decide which operand combinations are legal.
//! The resolver turns these descriptors into concrete overloads.

use crate::bitwidth::BitWidth;
use serde::Deserialize;
use shared::errors::CatalogError;
use shared::utils::capitalize;
use std::collections::BTreeSet;

/// Number of operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub fn operand_count(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// Kind of value an overload returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    /// Encrypted integer of the (promoted) operand width
    #[default]
    Promoted,
    /// Encrypted boolean, as returned by comparisons
    Bool,
}

/// Plaintext meaning of an operator, used only to compute expected values
/// in generated host tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semantics {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Rotl,
    Rotr,
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
    Min,
    Max,
    Neg,
    Not,
}

/// How operands of different widths may be combined
///
/// The rule is always explicit configuration. A pair is written narrow-first
/// and applies to either operand position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "PromotionEntry")]
pub enum PromotionRule {
    /// Same-width operands only
    #[default]
    None,
    /// Any narrower non-boolean width promotes to any wider one
    Widening,
    /// Only the listed `(narrow, wide)` pairs
    Pairs(BTreeSet<(BitWidth, BitWidth)>),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum PromotionKeyword {
    None,
    Widening,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PromotionEntry {
    Keyword(PromotionKeyword),
    Pairs(Vec<(BitWidth, BitWidth)>),
}

impl From<PromotionEntry> for PromotionRule {
    fn from(entry: PromotionEntry) -> Self {
        match entry {
            PromotionEntry::Keyword(PromotionKeyword::None) => PromotionRule::None,
            PromotionEntry::Keyword(PromotionKeyword::Widening) => PromotionRule::Widening,
            PromotionEntry::Pairs(pairs) => PromotionRule::Pairs(pairs.into_iter().collect()),
        }
    }
}

impl PromotionRule {
    /// Whether two distinct widths may be combined, the narrower one being
    /// promoted to the wider. Booleans are never promoted.
    pub fn admits(&self, a: BitWidth, b: BitWidth) -> bool {
        let (narrow, wide) = if a <= b { (a, b) } else { (b, a) };
        if narrow == wide || narrow.is_bool() || wide.is_bool() {
            return false;
        }
        match self {
            PromotionRule::None => false,
            PromotionRule::Widening => true,
            PromotionRule::Pairs(pairs) => pairs.contains(&(narrow, wide)),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PromotionRule::None)
    }
}

fn default_true() -> bool {
    true
}

/// Static description of one operator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Operator {
    /// Unique identifier, also the Solidity function name (`add`, `shl`)
    pub name: String,
    pub arity: Arity,
    /// Supported encrypted widths
    pub widths: BTreeSet<BitWidth>,
    /// Operands may mix a plaintext value with an encrypted one
    #[serde(default)]
    pub scalar: bool,
    /// No encrypted/encrypted overloads, only scalar ones (e.g. division)
    #[serde(default)]
    pub scalar_only: bool,
    /// A scalar may appear as the left operand of a non-commutative operator
    #[serde(default = "default_true")]
    pub left_scalar: bool,
    #[serde(default)]
    pub commutative: bool,
    /// Fixed plaintext width of the scalar operand (shift amounts are `uint8`)
    #[serde(default)]
    pub scalar_width: Option<BitWidth>,
    #[serde(default)]
    pub returns: ReturnKind,
    #[serde(default)]
    pub promotion: PromotionRule,
    #[serde(default)]
    pub semantics: Option<Semantics>,
}

impl Operator {
    /// Unary operator over the given widths
    pub fn unary(name: &str, widths: impl IntoIterator<Item = BitWidth>) -> Self {
        Self::with_arity(name, Arity::Unary, widths)
    }

    /// Binary operator over the given widths, same-width only until a
    /// promotion rule is attached
    pub fn binary(name: &str, widths: impl IntoIterator<Item = BitWidth>) -> Self {
        Self::with_arity(name, Arity::Binary, widths)
    }

    fn with_arity(name: &str, arity: Arity, widths: impl IntoIterator<Item = BitWidth>) -> Self {
        Self {
            name: name.to_string(),
            arity,
            widths: widths.into_iter().collect(),
            scalar: false,
            scalar_only: false,
            left_scalar: true,
            commutative: false,
            scalar_width: None,
            returns: ReturnKind::Promoted,
            promotion: PromotionRule::None,
            semantics: None,
        }
    }

    pub fn commutative(mut self) -> Self {
        self.commutative = true;
        self
    }

    pub fn scalar(mut self) -> Self {
        self.scalar = true;
        self
    }

    pub fn scalar_only(mut self) -> Self {
        self.scalar = true;
        self.scalar_only = true;
        self
    }

    pub fn no_left_scalar(mut self) -> Self {
        self.left_scalar = false;
        self
    }

    pub fn scalar_width(mut self, width: BitWidth) -> Self {
        self.scalar_width = Some(width);
        self
    }

    pub fn returns(mut self, returns: ReturnKind) -> Self {
        self.returns = returns;
        self
    }

    pub fn promotion(mut self, rule: PromotionRule) -> Self {
        self.promotion = rule;
        self
    }

    pub fn semantics(mut self, semantics: Semantics) -> Self {
        self.semantics = Some(semantics);
        self
    }

    pub fn is_binary(&self) -> bool {
        self.arity == Arity::Binary
    }

    pub fn supports_width(&self, width: BitWidth) -> bool {
        self.widths.contains(&width)
    }

    /// Name of the executor entry point backing this operator (`fheAdd`)
    pub fn executor_function(&self) -> String {
        format!("fhe{}", capitalize(&self.name))
    }

    /// Check the descriptor for internal consistency
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.widths.is_empty() {
            return Err(CatalogError::NoSupportedWidths {
                name: self.name.clone(),
            });
        }

        let invalid_flags = |reason: &str| CatalogError::InvalidFlags {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.is_empty() || !self.name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid_flags("identifier must be non-empty and alphanumeric"));
        }
        if self.scalar_only && !self.scalar {
            return Err(invalid_flags("scalar_only requires scalar"));
        }
        if self.arity == Arity::Unary {
            if self.scalar || self.scalar_width.is_some() {
                return Err(invalid_flags("unary operators cannot mix scalars"));
            }
            if !self.promotion.is_none() {
                return Err(invalid_flags("unary operators cannot declare a promotion rule"));
            }
            if self.commutative {
                return Err(invalid_flags("unary operators cannot be commutative"));
            }
        }
        if let Some(width) = self.scalar_width {
            if !self.scalar {
                return Err(invalid_flags("scalar_width requires scalar"));
            }
            if !self.supports_width(width) {
                return Err(invalid_flags("scalar_width must be a supported width"));
            }
            // bool is never promoted, so it cannot meet a scalar of another width
            if self
                .widths
                .iter()
                .any(|&lhs| lhs != width && (lhs.is_bool() || width.is_bool()))
            {
                return Err(invalid_flags("scalar_width cannot be combined with a bool operand"));
            }
        }

        if let PromotionRule::Pairs(pairs) = &self.promotion {
            for &(narrow, wide) in pairs {
                let reason = if narrow.is_bool() || wide.is_bool() {
                    Some(format!("{narrow} -> {wide} involves bool"))
                } else if narrow >= wide {
                    Some(format!("{narrow} -> {wide} is not narrower to wider"))
                } else if !self.supports_width(narrow) || !self.supports_width(wide) {
                    Some(format!("{narrow} -> {wide} references an unsupported width"))
                } else {
                    None
                };
                if let Some(reason) = reason {
                    return Err(CatalogError::InvalidPromotion {
                        name: self.name.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(())
    }
}
