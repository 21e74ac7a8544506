//! Deterministic operand sampling
//!
//! Every overload gets its own seeded generator so that generated test
//! values depend only on the overload's position in the overload set.

use catalog::BitWidth;
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::SeedableRng;
use rand::rngs::StdRng;

const BASE_SEED: u64 = 0x7466_6865_636f_6465;

/// Seeded sampler for operand values
pub struct OperandSampler {
    rng: StdRng,
}

impl OperandSampler {
    /// Sampler for the overload at `index` in the overload set
    pub fn for_overload(index: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(BASE_SEED.wrapping_add(index as u64)),
        }
    }

    /// Uniform value in `[0, 2^bits)`
    pub fn value(&mut self, width: BitWidth) -> BigUint {
        self.rng.gen_biguint(u64::from(width.bits()))
    }

    /// Uniform value in `[1, 2^bits)`
    pub fn nonzero(&mut self, width: BitWidth) -> BigUint {
        let upper = BigUint::one() << width.bits();
        self.rng.gen_biguint_range(&BigUint::one(), &upper)
    }
}
