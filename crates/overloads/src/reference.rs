//! Plaintext reference evaluation
//!
//! Generated host tests compare decrypted results against values computed
//! here. Arithmetic wraps modulo `2^bits` of the promoted width; shift and
//! rotate amounts are taken modulo the bit count.

use catalog::{BitWidth, Semantics};
use num_bigint::BigUint;
use num_traits::{One, Zero};

fn modulus(width: BitWidth) -> BigUint {
    BigUint::one() << width.bits()
}

fn from_bool(b: bool) -> BigUint {
    if b { BigUint::one() } else { BigUint::zero() }
}

/// Shift amount reduced modulo the bit count
fn amount(value: &BigUint, width: BitWidth) -> u32 {
    let reduced = value % BigUint::from(width.bits());
    reduced.iter_u32_digits().next().unwrap_or(0)
}

/// Evaluate `semantics` over `operands` at `width`
///
/// Returns `None` when the operand count does not match the semantics.
/// Comparisons return 0 or 1.
pub fn evaluate(semantics: Semantics, width: BitWidth, operands: &[BigUint]) -> Option<BigUint> {
    let m = modulus(width);
    let mask = &m - BigUint::one();

    let value = match (semantics, operands) {
        (Semantics::Neg, [a]) => (&m - (a % &m)) % &m,
        (Semantics::Not, [a]) => &mask ^ (a & &mask),
        (_, [a, b]) => {
            let (a, b) = (a % &m, b % &m);
            match semantics {
                Semantics::Add => (a + b) % &m,
                Semantics::Sub => (a + &m - b) % &m,
                Semantics::Mul => (a * b) % &m,
                Semantics::Div => {
                    if b.is_zero() {
                        mask
                    } else {
                        a / b
                    }
                }
                Semantics::Rem => {
                    if b.is_zero() {
                        a
                    } else {
                        a % b
                    }
                }
                Semantics::And => a & b,
                Semantics::Or => a | b,
                Semantics::Xor => a ^ b,
                Semantics::Shl => (a << amount(&b, width)) % &m,
                Semantics::Shr => a >> amount(&b, width),
                Semantics::Rotl => {
                    let s = amount(&b, width);
                    ((&a << s) | (&a >> (width.bits() - s))) & &mask
                }
                Semantics::Rotr => {
                    let s = amount(&b, width);
                    ((&a >> s) | (&a << (width.bits() - s))) & &mask
                }
                Semantics::Eq => from_bool(a == b),
                Semantics::Ne => from_bool(a != b),
                Semantics::Ge => from_bool(a >= b),
                Semantics::Gt => from_bool(a > b),
                Semantics::Le => from_bool(a <= b),
                Semantics::Lt => from_bool(a < b),
                Semantics::Min => a.min(b),
                Semantics::Max => a.max(b),
                Semantics::Neg | Semantics::Not => return None,
            }
        }
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: Semantics, w: BitWidth, ops: &[u64]) -> u64 {
        let ops: Vec<BigUint> = ops.iter().map(|&v| BigUint::from(v)).collect();
        let out = evaluate(s, w, &ops).unwrap();
        u64::try_from(out).unwrap()
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(eval(Semantics::Add, BitWidth::W8, &[200, 100]), 44);
        assert_eq!(eval(Semantics::Sub, BitWidth::W8, &[3, 4]), 255);
        assert_eq!(eval(Semantics::Mul, BitWidth::W4, &[5, 5]), 9);
        assert_eq!(eval(Semantics::Neg, BitWidth::W8, &[1]), 255);
        assert_eq!(eval(Semantics::Neg, BitWidth::W8, &[0]), 0);
    }

    #[test]
    fn test_division() {
        assert_eq!(eval(Semantics::Div, BitWidth::W8, &[17, 5]), 3);
        assert_eq!(eval(Semantics::Rem, BitWidth::W8, &[17, 5]), 2);
        assert_eq!(eval(Semantics::Div, BitWidth::W8, &[17, 0]), 255);
    }

    #[test]
    fn test_bitwise_and_not() {
        assert_eq!(eval(Semantics::Not, BitWidth::W8, &[0x0f]), 0xf0);
        assert_eq!(eval(Semantics::Not, BitWidth::Bool, &[1]), 0);
        assert_eq!(eval(Semantics::Xor, BitWidth::Bool, &[1, 1]), 0);
        assert_eq!(eval(Semantics::And, BitWidth::W8, &[0b1100, 0b1010]), 0b1000);
    }

    #[test]
    fn test_shifts_and_rotations() {
        assert_eq!(eval(Semantics::Shl, BitWidth::W8, &[0x81, 1]), 0x02);
        assert_eq!(eval(Semantics::Shl, BitWidth::W8, &[1, 9]), 2);
        assert_eq!(eval(Semantics::Shr, BitWidth::W8, &[0x80, 7]), 1);
        assert_eq!(eval(Semantics::Rotl, BitWidth::W8, &[0x81, 1]), 0x03);
        assert_eq!(eval(Semantics::Rotr, BitWidth::W8, &[0x81, 1]), 0xc0);
        assert_eq!(eval(Semantics::Rotl, BitWidth::W8, &[0x81, 8]), 0x81);
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eval(Semantics::Lt, BitWidth::W16, &[3, 300]), 1);
        assert_eq!(eval(Semantics::Ge, BitWidth::W16, &[3, 300]), 0);
        assert_eq!(eval(Semantics::Eq, BitWidth::W8, &[7, 7]), 1);
        assert_eq!(eval(Semantics::Min, BitWidth::W8, &[7, 3]), 3);
        assert_eq!(eval(Semantics::Max, BitWidth::W8, &[7, 3]), 7);
    }

    #[test]
    fn test_wide_values() {
        let max = (BigUint::one() << 256u32) - BigUint::one();
        let out = evaluate(Semantics::Add, BitWidth::W256, &[max, BigUint::one()]).unwrap();
        assert!(out.is_zero());
    }

    #[test]
    fn test_arity_mismatch() {
        assert!(evaluate(Semantics::Add, BitWidth::W8, &[BigUint::one()]).is_none());
        assert!(evaluate(Semantics::Neg, BitWidth::W8, &[BigUint::one(), BigUint::one()]).is_none());
    }
}
