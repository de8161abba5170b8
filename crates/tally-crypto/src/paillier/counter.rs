//! The encrypted counter object and its homomorphic update operations.
//!
//! Every update multiplies the ciphertext by a factor (or raises it to an
//! exponent) and then re-randomizes it with a fresh `r^n` term. The
//! re-randomization step is mandatory: without it, repeated updates would
//! produce ciphertexts whose relationship is visible to an observer, and
//! duplicated counters would betray that they hold the same value.

use std::time::{SystemTime, UNIX_EPOCH};

use num_bigint_dig::BigUint;
use tally_types::{CounterError, CounterVersion, RANDOMIZER_SECLEVEL};
use zeroize::{Zeroize, Zeroizing};

use super::{invert, PaillierPublicKey};
use crate::rng;

/// An encrypted integer counter.
///
/// Holds a Paillier ciphertext under a borrowed public key. All update
/// operations mutate the ciphertext in place and refresh the modification
/// timestamp; the plaintext value never appears during normal operation.
pub struct Counter {
    pub(crate) version: CounterVersion,
    pub(crate) c: BigUint,
    pub(crate) last_updated: u64,
}

impl Drop for Counter {
    fn drop(&mut self) {
        self.c.zeroize();
    }
}

impl Counter {
    /// Create a counter holding an encryption of zero.
    pub fn new(public: &PaillierPublicKey) -> Result<Self, CounterError> {
        let c = public.encrypt(&BigUint::default())?;
        Ok(Self {
            version: CounterVersion::PaillierV1,
            c,
            last_updated: unix_now(),
        })
    }

    /// The wire-format version of this counter.
    pub fn version(&self) -> CounterVersion {
        self.version
    }

    /// The raw ciphertext, an element of `Z*_{n^2}`.
    pub fn ciphertext(&self) -> &BigUint {
        &self.c
    }

    /// Seconds since the Unix epoch at the last modification.
    pub fn last_updated(&self) -> u64 {
        self.last_updated
    }

    /// Re-randomize in place without changing the encrypted value.
    pub fn touch(&mut self, public: &PaillierPublicKey) -> Result<(), CounterError> {
        let mut next = self.c.clone();
        public.rerandomize(&mut next)?;
        self.commit(next);
        Ok(())
    }

    /// Duplicate this counter. The copy is re-randomized so that its bytes
    /// do not reveal that it encrypts the same value as the source.
    pub fn dup(&self, public: &PaillierPublicKey) -> Result<Self, CounterError> {
        let mut copy = Self {
            version: self.version,
            c: self.c.clone(),
            last_updated: self.last_updated,
        };
        copy.touch(public)?;
        Ok(copy)
    }

    /// Overwrite this counter with a re-randomized copy of `from`.
    pub fn copy_from(
        &mut self,
        public: &PaillierPublicKey,
        from: &Counter,
    ) -> Result<(), CounterError> {
        let mut next = from.c.clone();
        public.rerandomize(&mut next)?;
        self.version = from.version;
        self.commit(next);
        Ok(())
    }

    /// Increment the encrypted value by `amount`.
    ///
    /// The monotonic case `amount == 1` multiplies by `g` directly and skips
    /// the exponentiation.
    pub fn inc(&mut self, public: &PaillierPublicKey, amount: u64) -> Result<(), CounterError> {
        let factor = self.update_factor(public, amount);
        self.apply_factor(public, &factor)
    }

    /// Decrement the encrypted value by `amount`.
    ///
    /// Nothing prevents the value from going below zero; the plaintext
    /// wraps modulo `n`, which the caller sees at decryption time.
    pub fn dec(&mut self, public: &PaillierPublicKey, amount: u64) -> Result<(), CounterError> {
        let factor = invert(&self.update_factor(public, amount), public.nsquared())?;
        self.apply_factor(public, &factor)
    }

    /// Add another counter encrypted under the same key: `self += other`.
    pub fn add(&mut self, public: &PaillierPublicKey, other: &Counter) -> Result<(), CounterError> {
        self.apply_factor(public, &other.c)
    }

    /// Subtract another counter encrypted under the same key: `self -= other`.
    ///
    /// Underflow below zero wraps modulo `n`, exactly as with [`Counter::dec`].
    pub fn sub(&mut self, public: &PaillierPublicKey, other: &Counter) -> Result<(), CounterError> {
        let factor = invert(&other.c, public.nsquared())?;
        self.apply_factor(public, &factor)
    }

    /// Multiply the encrypted value by `amount`.
    pub fn mul(&mut self, public: &PaillierPublicKey, amount: u64) -> Result<(), CounterError> {
        self.apply_exponent(public, &BigUint::from(amount))
    }

    /// Multiply the encrypted value by a secret random factor of
    /// `RANDOMIZER_SECLEVEL + 2` bits. The factor is discarded after use.
    pub fn mul_rand(&mut self, public: &PaillierPublicKey) -> Result<(), CounterError> {
        let k = Zeroizing::new(rng::random_blind(RANDOMIZER_SECLEVEL + 2)?);
        self.apply_exponent(public, &k)
    }

    /// `g^amount mod n^2`, with the `amount == 1` fast path.
    fn update_factor(&self, public: &PaillierPublicKey, amount: u64) -> BigUint {
        if amount == 1 {
            public.g().clone()
        } else {
            public.g().modpow(&BigUint::from(amount), public.nsquared())
        }
    }

    /// `c <- c * factor mod n^2`, then re-randomize and stamp. The counter
    /// is left unmodified when any step fails.
    fn apply_factor(
        &mut self,
        public: &PaillierPublicKey,
        factor: &BigUint,
    ) -> Result<(), CounterError> {
        let mut next = &self.c * factor % public.nsquared();
        public.rerandomize(&mut next)?;
        self.commit(next);
        Ok(())
    }

    /// `c <- c^e mod n^2`, then re-randomize and stamp.
    fn apply_exponent(
        &mut self,
        public: &PaillierPublicKey,
        e: &BigUint,
    ) -> Result<(), CounterError> {
        let mut next = self.c.modpow(e, public.nsquared());
        public.rerandomize(&mut next)?;
        self.commit(next);
        Ok(())
    }

    fn commit(&mut self, next: BigUint) {
        self.c.zeroize();
        self.c = next;
        self.last_updated = unix_now();
    }

    pub(crate) fn from_ciphertext(c: BigUint) -> Self {
        Self {
            version: CounterVersion::PaillierV1,
            c,
            last_updated: unix_now(),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
