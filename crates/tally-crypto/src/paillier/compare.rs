//! Comparison of encrypted counters.
//!
//! The blinded variant compares two ciphertexts without ever materializing
//! either plaintext: it decrypts only a masked difference whose magnitude is
//! hidden behind a random blind, so the comparison reveals nothing beyond
//! the sign.

use std::cmp::Ordering;

use tally_types::{CounterError, RANDOMIZER_SECLEVEL};
use zeroize::Zeroizing;

use super::{invert, Counter, PaillierPrivateKey, PaillierPublicKey};
use crate::rng;

impl Counter {
    /// Blinded private comparison of `self` against `other`, both encrypted
    /// under `public`.
    ///
    /// Computes `Enc(a + k - b)` for a secret blind `k` of
    /// `RANDOMIZER_SECLEVEL + 2` bits, decrypts it, and compares the result
    /// against `k`. Since `k` strictly dominates any value representable in
    /// 64 bits, `a + k - b` never wraps and its position relative to `k`
    /// equals the sign of `a - b`. Neither plaintext is ever decrypted.
    pub fn private_cmp2(
        &self,
        other: &Counter,
        public: &PaillierPublicKey,
        private: &PaillierPrivateKey,
    ) -> Result<Ordering, CounterError> {
        // Re-randomized working copy of a.
        let mut diff = self.dup(public)?;

        // Add the blind: diff <- diff * g^k mod n^2.
        let k = Zeroizing::new(rng::random_blind(RANDOMIZER_SECLEVEL + 2)?);
        let gk = Zeroizing::new(public.g().modpow(&k, public.nsquared()));
        diff.c = &diff.c * &*gk % public.nsquared();
        public.rerandomize(&mut diff.c)?;

        // Subtract b: diff <- diff * b^{-1} mod n^2.
        let binv = Zeroizing::new(invert(&other.c, public.nsquared())?);
        diff.c = &diff.c * &*binv % public.nsquared();
        public.rerandomize(&mut diff.c)?;

        let m = Zeroizing::new(private.decrypt_residue(&diff.c));
        Ok((*m).cmp(&k))
    }

    /// Plain comparison: decrypt both counters and compare the plaintexts.
    ///
    /// Each side is decrypted with its own private key when supplied; a
    /// single key is used for both sides otherwise. Fails with
    /// [`CounterError::MissingKey`] when neither key is given.
    pub fn cmp_with(
        &self,
        other: &Counter,
        private_a: Option<&PaillierPrivateKey>,
        private_b: Option<&PaillierPrivateKey>,
    ) -> Result<Ordering, CounterError> {
        let key_a = private_a.or(private_b).ok_or(CounterError::MissingKey)?;
        let key_b = private_b.or(private_a).ok_or(CounterError::MissingKey)?;

        let pa = Zeroizing::new(key_a.decrypt(self)?);
        let pb = Zeroizing::new(key_b.decrypt(other)?);

        Ok(pa.cmp(&pb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paillier::PaillierKeyPair;
    use num_bigint_dig::BigUint;

    // 128-bit prime fixtures: large enough for the 130-bit blind to stay
    // clear of the modulus, small enough to keep the tests quick.
    const P_HEX: &str = "D283EB3A5FBD238EC9CF158DE6E96D45";
    const Q_HEX: &str = "B24F70CA15CA716998694F58FF0197D3";

    fn keypair() -> PaillierKeyPair {
        crate::init().unwrap();
        let p = BigUint::parse_bytes(P_HEX.as_bytes(), 16).unwrap();
        let q = BigUint::parse_bytes(Q_HEX.as_bytes(), 16).unwrap();
        PaillierKeyPair::from_primes(&p, &q).unwrap()
    }

    fn encrypt(pair: &PaillierKeyPair, value: u64) -> Counter {
        let mut counter = Counter::new(pair.public()).unwrap();
        if value > 0 {
            counter.inc(pair.public(), value).unwrap();
        }
        counter
    }

    #[test]
    fn test_private_cmp2_signs() {
        let pair = keypair();
        let a = encrypt(&pair, 1_000_000);
        let b = encrypt(&pair, 999_999);

        assert_eq!(
            a.private_cmp2(&b, pair.public(), pair.private()).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            b.private_cmp2(&a, pair.public(), pair.private()).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_private_cmp2_equal_counters() {
        let pair = keypair();
        let a = encrypt(&pair, 12345);
        let a_dup = a.dup(pair.public()).unwrap();

        assert_eq!(
            a.private_cmp2(&a_dup, pair.public(), pair.private())
                .unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_private_cmp2_zero_versus_one() {
        let pair = keypair();
        let zero = encrypt(&pair, 0);
        let one = encrypt(&pair, 1);

        assert_eq!(
            zero.private_cmp2(&one, pair.public(), pair.private())
                .unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_cmp_with_single_key_for_both_sides() {
        let pair = keypair();
        let a = encrypt(&pair, 70);
        let b = encrypt(&pair, 7);

        assert_eq!(
            a.cmp_with(&b, Some(pair.private()), None).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            a.cmp_with(&b, None, Some(pair.private())).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            b.cmp_with(&a, Some(pair.private()), Some(pair.private()))
                .unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_cmp_with_no_key_fails() {
        let pair = keypair();
        let a = encrypt(&pair, 1);
        let b = encrypt(&pair, 2);

        assert!(matches!(
            a.cmp_with(&b, None, None),
            Err(CounterError::MissingKey)
        ));
    }
}
