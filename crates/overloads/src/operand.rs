//! Operand kinds and resolved overloads

use catalog::BitWidth;
use itertools::Itertools;
use std::fmt;

/// An operand is either encrypted or a plaintext scalar of a given width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperandKind {
    Encrypted(BitWidth),
    Scalar(BitWidth),
}

impl OperandKind {
    pub fn width(self) -> BitWidth {
        match self {
            OperandKind::Encrypted(w) | OperandKind::Scalar(w) => w,
        }
    }

    pub fn is_scalar(self) -> bool {
        matches!(self, OperandKind::Scalar(_))
    }

    /// Solidity type name (`euint8` or `uint8`)
    pub fn solidity_type(self) -> String {
        match self {
            OperandKind::Encrypted(w) => w.encrypted_type(),
            OperandKind::Scalar(w) => w.plaintext_type(),
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.solidity_type())
    }
}

/// One concrete, type-resolved instantiation of an operator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Overload {
    /// Operator identifier from the catalog
    pub operator: String,
    /// Operand kinds, one per arity slot
    pub operands: Vec<OperandKind>,
    pub result: OperandKind,
}

impl Overload {
    pub fn new(operator: &str, operands: Vec<OperandKind>, result: OperandKind) -> Self {
        Self {
            operator: operator.to_string(),
            operands,
            result,
        }
    }

    pub fn lhs(&self) -> OperandKind {
        self.operands[0]
    }

    pub fn rhs(&self) -> Option<OperandKind> {
        self.operands.get(1).copied()
    }

    pub fn is_unary(&self) -> bool {
        self.operands.len() == 1
    }

    /// Width both operands are brought to before the operation
    pub fn promoted_width(&self) -> BitWidth {
        self.operands
            .iter()
            .map(|o| o.width())
            .max()
            .unwrap_or(self.result.width())
    }

    /// Function name used in test contracts (`add_euint8_uint8`)
    pub fn function_name(&self) -> String {
        std::iter::once(self.operator.clone())
            .chain(self.operands.iter().map(|o| o.solidity_type()))
            .join("_")
    }

    /// Human readable signature (`add(euint8, euint16) => euint16`)
    pub fn signature(&self) -> String {
        format!(
            "{}({}) => {}",
            self.operator,
            self.operands.iter().join(", "),
            self.result
        )
    }
}

impl fmt::Display for Overload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}
