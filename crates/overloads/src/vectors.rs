//! Test vectors for generated host tests
//!
//! Each overload gets a handful of input tuples and, when its operator
//! declares reference semantics, the expected result.

use crate::operand::Overload;
use crate::reference::evaluate;
use crate::sample::OperandSampler;
use catalog::{BitWidth, Semantics};
use num_bigint::BigUint;

/// One test case: inputs in operand order and the expected result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    pub inputs: Vec<BigUint>,
    pub expected: Option<BigUint>,
}

fn needs_nonzero_rhs(semantics: Option<Semantics>) -> bool {
    matches!(semantics, Some(Semantics::Div | Semantics::Rem))
}

/// Test vectors for the overload at `index` of the overload set
///
/// Unary overloads get two random inputs. Binary overloads get one random
/// pair and one pair of equal values that fit both operand widths.
pub fn test_vectors(
    overload: &Overload,
    semantics: Option<Semantics>,
    index: usize,
) -> Vec<TestVector> {
    let mut sampler = OperandSampler::for_overload(index);
    let width = overload.promoted_width();

    let input_sets: Vec<Vec<BigUint>> = match overload.rhs() {
        None => {
            let lhs = overload.lhs().width();
            vec![vec![sampler.value(lhs)], vec![sampler.value(lhs)]]
        }
        Some(rhs) => {
            let lhs = overload.lhs().width();
            let rhs = rhs.width();
            let nonzero = needs_nonzero_rhs(semantics);
            let mut sample_rhs = |w: BitWidth| {
                if nonzero {
                    sampler.nonzero(w)
                } else {
                    sampler.value(w)
                }
            };
            let b = sample_rhs(rhs);
            let shared = sample_rhs(lhs.min(rhs));
            let a = sampler.value(lhs);
            vec![vec![a, b], vec![shared.clone(), shared]]
        }
    };

    input_sets
        .into_iter()
        .map(|inputs| TestVector {
            expected: semantics.and_then(|s| evaluate(s, width, &inputs)),
            inputs,
        })
        .collect()
}
