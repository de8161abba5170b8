//! Process-wide seeded cryptographic randomness.
//!
//! [`init`] draws a 1024-bit seed from the operating-system entropy source,
//! conditions it through SHA-256 and instantiates a global ChaCha20 generator
//! behind a mutex. Every random quantity in this crate — primes, uniform
//! range samples, blinding values — is drawn through this single gate; there
//! is no fallback generator.

use std::sync::{Mutex, OnceLock};

use num_bigint_dig::{BigUint, RandBigInt, RandPrime};
use num_traits::{One, Zero};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use tally_types::CounterError;
use zeroize::Zeroize;

/// Bits of operating-system entropy mixed into the generator at seeding.
pub const SEED_BITS: usize = 1024;

static GLOBAL_RNG: OnceLock<Mutex<ChaCha20Rng>> = OnceLock::new();

/// Seed the process-wide generator from the operating-system entropy source.
///
/// Re-initialization is a no-op: the first successful seeding wins. Fails
/// with [`CounterError::EntropyFail`] when the entropy source is unavailable.
pub fn init() -> Result<(), CounterError> {
    if GLOBAL_RNG.get().is_some() {
        return Ok(());
    }

    let mut raw = [0u8; SEED_BITS / 8];
    getrandom::getrandom(&mut raw).map_err(|_| CounterError::EntropyFail)?;

    // Condition the raw draw down to the generator seed width.
    let mut seed: [u8; 32] = Sha256::digest(raw).into();
    raw.zeroize();

    let _ = GLOBAL_RNG.set(Mutex::new(ChaCha20Rng::from_seed(seed)));
    seed.zeroize();

    Ok(())
}

/// Run `f` against the seeded generator.
///
/// Fails with [`CounterError::RngNotSeeded`] when [`init`] has not succeeded.
pub(crate) fn with_rng<T>(f: impl FnOnce(&mut ChaCha20Rng) -> T) -> Result<T, CounterError> {
    let cell = GLOBAL_RNG.get().ok_or(CounterError::RngNotSeeded)?;
    let mut rng = cell.lock().map_err(|_| CounterError::RngNotSeeded)?;
    Ok(f(&mut rng))
}

/// Sample uniformly from `[0, bound)`.
pub(crate) fn random_below(bound: &BigUint) -> Result<BigUint, CounterError> {
    if bound.is_zero() {
        return Err(CounterError::InvalidArg);
    }
    with_rng(|rng| rng.gen_biguint_below(bound))
}

/// Sample a blinding value of exactly `bits` bits: top bit forced so the
/// value cannot be small, low bit forced so it is odd.
pub(crate) fn random_blind(bits: usize) -> Result<BigUint, CounterError> {
    if bits < 2 {
        return Err(CounterError::InvalidArg);
    }
    with_rng(|rng| {
        let mut k = rng.gen_biguint(bits);
        k |= BigUint::one() << (bits - 1);
        k |= BigUint::one();
        k
    })
}

/// Generate a random prime of exactly `bits` bits.
pub(crate) fn random_prime(bits: usize) -> Result<BigUint, CounterError> {
    with_rng(|rng| rng.gen_prime(bits))
}
