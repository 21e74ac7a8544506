//! Overload resolution
//!
//! Expands every catalog operator into its legal overloads. The emitted order
//! is catalog order, then ascending left-operand width, then both-encrypted
//! before scalar-mixed. Shard and test numbering are derived from this order,
//! so it must never change for an unchanged catalog.

use crate::operand::{OperandKind, Overload};
use catalog::{Arity, BitWidth, Catalog, Operator, ReturnKind};
use shared::errors::ResolutionError;

/// The full, ordered sequence of overloads derived from a catalog
pub type OverloadSet = Vec<Overload>;

/// Resolve every operator of the catalog
pub fn resolve(catalog: &Catalog) -> Result<OverloadSet, ResolutionError> {
    let mut overloads = Vec::new();
    for op in catalog.list_operators() {
        let before = overloads.len();
        match op.arity {
            Arity::Unary => resolve_unary(op, &mut overloads),
            Arity::Binary => resolve_binary(op, &mut overloads)?,
        }
        tracing::debug!(
            operator = %op.name,
            overloads = overloads.len() - before,
            "resolved operator"
        );
    }
    Ok(overloads)
}

fn result_kind(op: &Operator, operands: &[OperandKind]) -> OperandKind {
    match op.returns {
        ReturnKind::Bool => OperandKind::Encrypted(BitWidth::Bool),
        ReturnKind::Promoted => {
            let widest = operands
                .iter()
                .map(|o| o.width())
                .max()
                .unwrap_or(BitWidth::Bool);
            OperandKind::Encrypted(widest)
        }
    }
}

fn push(op: &Operator, operands: Vec<OperandKind>, out: &mut OverloadSet) {
    let result = result_kind(op, &operands);
    out.push(Overload::new(&op.name, operands, result));
}

fn resolve_unary(op: &Operator, out: &mut OverloadSet) {
    for &width in &op.widths {
        push(op, vec![OperandKind::Encrypted(width)], out);
    }
}

fn resolve_binary(op: &Operator, out: &mut OverloadSet) -> Result<(), ResolutionError> {
    for &lhs in &op.widths {
        if !op.scalar_only {
            for &rhs in &op.widths {
                // Commutative operators cover (wide, narrow) through (narrow, wide)
                if op.commutative && rhs < lhs {
                    continue;
                }
                if lhs != rhs && !op.promotion.admits(lhs, rhs) {
                    continue;
                }
                push(
                    op,
                    vec![OperandKind::Encrypted(lhs), OperandKind::Encrypted(rhs)],
                    out,
                );
            }
        }

        if op.scalar {
            let scalar = op.scalar_width.unwrap_or(lhs);
            if scalar != lhs && !op.promotion.admits(lhs, scalar) {
                return Err(ResolutionError::MissingPromotion {
                    operator: op.name.clone(),
                    narrow: lhs.min(scalar).to_string(),
                    wide: lhs.max(scalar).to_string(),
                });
            }
            push(
                op,
                vec![OperandKind::Encrypted(lhs), OperandKind::Scalar(scalar)],
                out,
            );
            if !op.commutative && op.left_scalar {
                push(
                    op,
                    vec![OperandKind::Scalar(scalar), OperandKind::Encrypted(lhs)],
                    out,
                );
            }
        }
    }
    Ok(())
}
