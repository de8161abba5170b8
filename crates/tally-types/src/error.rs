/// Errors produced by the encrypted-counter engine.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    // Parameter errors
    #[error("null or empty input")]
    NullInput,
    #[error("invalid argument")]
    InvalidArg,
    #[error("key size out of range: {bits} bits")]
    KeySizeOutOfRange { bits: usize },
    #[error("at least one private key is required")]
    MissingKey,

    // Resource errors
    #[error("memory allocation failed")]
    MemAllocFail,

    // Randomness errors
    #[error("rng: not seeded")]
    RngNotSeeded,
    #[error("rng: failed to obtain entropy from the operating system")]
    EntropyFail,
    #[error("rng: random generation failed")]
    RandGenFail,

    // Big-number errors
    #[error("bignum: no modular inverse")]
    NoInverse,
    #[error("bignum: prime generation failed")]
    PrimeGenFail,

    // Encoding errors
    #[error("malformed hexadecimal input")]
    MalformedHex,

    // Decryption errors
    #[error("decrypted value exceeds the unsigned 64-bit range")]
    DecryptOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_simple_variants() {
        assert_eq!(CounterError::NullInput.to_string(), "null or empty input");
        assert_eq!(CounterError::InvalidArg.to_string(), "invalid argument");
        assert_eq!(
            CounterError::MissingKey.to_string(),
            "at least one private key is required"
        );
        assert_eq!(
            CounterError::MemAllocFail.to_string(),
            "memory allocation failed"
        );
    }

    #[test]
    fn test_error_display_rng_variants() {
        assert_eq!(CounterError::RngNotSeeded.to_string(), "rng: not seeded");
        assert_eq!(
            CounterError::EntropyFail.to_string(),
            "rng: failed to obtain entropy from the operating system"
        );
        assert_eq!(
            CounterError::RandGenFail.to_string(),
            "rng: random generation failed"
        );
    }

    #[test]
    fn test_error_display_structured_variants() {
        let e = CounterError::KeySizeOutOfRange { bits: 128 };
        assert_eq!(e.to_string(), "key size out of range: 128 bits");
    }

    #[test]
    fn test_error_display_bignum_and_data_variants() {
        assert_eq!(
            CounterError::NoInverse.to_string(),
            "bignum: no modular inverse"
        );
        assert_eq!(
            CounterError::PrimeGenFail.to_string(),
            "bignum: prime generation failed"
        );
        assert_eq!(
            CounterError::MalformedHex.to_string(),
            "malformed hexadecimal input"
        );
        assert_eq!(
            CounterError::DecryptOverflow.to_string(),
            "decrypted value exceeds the unsigned 64-bit range"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CounterError>();
    }
}
