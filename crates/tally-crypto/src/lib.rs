#![forbid(unsafe_code)]
//! Paillier encrypted counters.
//!
//! A counter holds a Paillier ciphertext and never exposes its plaintext
//! during normal operation: it can be incremented, decremented, scaled,
//! added to or subtracted from another counter, duplicated, compared and
//! serialized while staying encrypted under a public key. Only the holder
//! of the matching private key can recover the integer value, via a
//! CRT-accelerated decryption path.
//!
//! Call [`init`] once at process start to seed the cryptographic RNG before
//! generating keys or touching any counter.

pub mod paillier;
pub mod rng;

pub use paillier::{Counter, PaillierKeyPair, PaillierPrivateKey, PaillierPublicKey};

use tally_types::CounterError;

/// Initialize the library: seed the process-wide cryptographic RNG from the
/// operating-system entropy source. Safe to call more than once.
pub fn init() -> Result<(), CounterError> {
    rng::init()
}
