use crate::error::CounterError;

/// Key type identifiers for the Paillier counter scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    PaillierPublic,
    PaillierPrivate,
}

/// Counter wire-format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterVersion {
    PaillierV1,
}

/// Minimum admissible prime bit-length for key generation.
pub const MIN_KEY_BITS: usize = 512;

/// Maximum admissible prime bit-length for key generation.
pub const MAX_KEY_BITS: usize = 4096;

/// Bit strength of the blinding values used by multiply-by-random and the
/// blinded comparison. Blinds are `RANDOMIZER_SECLEVEL + 2` bits wide, which
/// keeps `2 * RANDOMIZER_SECLEVEL + 2` well below the modulus bit-length for
/// every admissible key size.
pub const RANDOMIZER_SECLEVEL: usize = 128;

/// Check that a requested prime bit-length lies in the sane range.
pub fn check_key_bits(bits: usize) -> Result<(), CounterError> {
    if (MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) {
        Ok(())
    } else {
        Err(CounterError::KeySizeOutOfRange { bits })
    }
}
