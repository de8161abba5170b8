//! Paillier additively homomorphic encryption with CRT-accelerated
//! decryption.
//!
//! Ciphertexts live in `Z*_{n^2}` for `n = p * q`. The private side keeps
//! `p` and `q` along with precomputed constants so that decryption runs one
//! exponentiation per prime factor followed by a cheap Chinese-remainder
//! recombination:
//!
//! - `pinvmod2tow = p^{-1} mod 2^|p|` turns the division inside the `L`
//!   function into a masked multiplication,
//! - `hsubp = (L_p(g^{p-1} mod p^2))^{-1} mod p` folds the generator-order
//!   correction into a single modular multiply (likewise `hsubq`),
//! - `qinv = (q mod p)^{-1} mod p` drives the CRT recombination.

mod compare;
mod counter;
mod encoding;

pub use counter::Counter;
pub use encoding::{KeyHex, PrivateKeyHex, PublicKeyHex};

use num_bigint_dig::{BigUint, ModInverse};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use tally_types::{check_key_bits, CounterError};
use zeroize::{Zeroize, Zeroizing};

use crate::rng;

/// Cap on rejection-sampling loops before reporting a randomness failure.
const MAX_SAMPLE_ATTEMPTS: usize = 1000;

/// A Paillier public key: modulus `n`, generator `g` and cached `n^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaillierPublicKey {
    n: BigUint,
    g: BigUint,
    nsquared: BigUint,
}

/// A Paillier private key in CRT form. All fields are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct PaillierPrivateKey {
    p: BigUint,
    q: BigUint,
    psquared: BigUint,
    qsquared: BigUint,
    pinvmod2tow: BigUint,
    qinvmod2tow: BigUint,
    hsubp: BigUint,
    hsubq: BigUint,
    qinv: BigUint,
}

/// A matching Paillier public/private key pair.
pub struct PaillierKeyPair {
    public: PaillierPublicKey,
    private: PaillierPrivateKey,
}

impl PaillierKeyPair {
    /// Generate a key pair from two fresh random primes of `keysize` bits.
    ///
    /// `keysize` must lie within the sane prime bit-length range. Requires
    /// the process RNG to be seeded via [`crate::init`].
    pub fn generate(keysize: usize) -> Result<Self, CounterError> {
        check_key_bits(keysize)?;

        let p = rng::random_prime(keysize)?;
        let mut q = rng::random_prime(keysize)?;
        while q == p {
            q = rng::random_prime(keysize)?;
        }

        Self::from_primes(&p, &q)
    }

    /// Derive a key pair from two caller-supplied distinct primes.
    ///
    /// Performs every derivation of [`PaillierKeyPair::generate`] except the
    /// prime search itself. Intended for tests and benchmarks running on
    /// fixed prime fixtures; no bit-length check is applied.
    pub fn from_primes(p: &BigUint, q: &BigUint) -> Result<Self, CounterError> {
        if p == q {
            return Err(CounterError::InvalidArg);
        }

        let psquared = p * p;
        let qsquared = q * q;
        let n = p * q;
        let nsquared = &n * &n;

        let g = select_generator(p, &psquared, q, &qsquared)?;

        let pinvmod2tow = inv_mod_2w(p)?;
        let qinvmod2tow = inv_mod_2w(q)?;
        let hsubp = h_constant(&g, p, &psquared, &pinvmod2tow)?;
        let hsubq = h_constant(&g, q, &qsquared, &qinvmod2tow)?;
        let qinv = q_inv_precompute(q, p)?;

        Ok(Self {
            public: PaillierPublicKey { n, g, nsquared },
            private: PaillierPrivateKey {
                p: p.clone(),
                q: q.clone(),
                psquared,
                qsquared,
                pinvmod2tow,
                qinvmod2tow,
                hsubp,
                hsubq,
                qinv,
            },
        })
    }

    pub fn public(&self) -> &PaillierPublicKey {
        &self.public
    }

    pub fn private(&self) -> &PaillierPrivateKey {
        &self.private
    }

    pub fn into_parts(self) -> (PaillierPublicKey, PaillierPrivateKey) {
        (self.public, self.private)
    }
}

impl PaillierPublicKey {
    /// The modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// The generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// The cached `n^2`.
    pub fn nsquared(&self) -> &BigUint {
        &self.nsquared
    }

    /// Encrypt a plaintext `m` in `[0, n)`: `c = g^m * r^n mod n^2` for a
    /// fresh uniform `r` in `Z*_n`.
    pub(crate) fn encrypt(&self, m: &BigUint) -> Result<BigUint, CounterError> {
        if m >= &self.n {
            return Err(CounterError::InvalidArg);
        }

        let t1 = self.g.modpow(m, &self.nsquared);
        let r = Zeroizing::new(sample_unit(&self.n)?);
        let t2 = r.modpow(&self.n, &self.nsquared);

        Ok(t1 * t2 % &self.nsquared)
    }

    /// Refresh the randomizer coset of a ciphertext in place:
    /// `c <- c * r^n mod n^2`. Preserves the plaintext.
    pub(crate) fn rerandomize(&self, c: &mut BigUint) -> Result<(), CounterError> {
        let r = Zeroizing::new(sample_unit(&self.n)?);
        let rn = r.modpow(&self.n, &self.nsquared);
        *c = &*c * rn % &self.nsquared;
        Ok(())
    }
}

impl PaillierPrivateKey {
    /// Decrypt a counter to its plaintext value.
    ///
    /// Fails with [`CounterError::DecryptOverflow`] when the plaintext does
    /// not fit an unsigned 64-bit integer; the counter itself is left
    /// untouched and remains usable.
    pub fn decrypt(&self, counter: &Counter) -> Result<u64, CounterError> {
        let m = Zeroizing::new(self.decrypt_residue(counter.ciphertext()));
        m.to_u64().ok_or(CounterError::DecryptOverflow)
    }

    /// CRT decryption of a raw ciphertext to its residue in `[0, n)`.
    pub(crate) fn decrypt_residue(&self, c: &BigUint) -> BigUint {
        let pmin1 = &self.p - 1u32;
        let qmin1 = &self.q - 1u32;

        let tp = Zeroizing::new((c % &self.psquared).modpow(&pmin1, &self.psquared));
        let mp = Zeroizing::new(fast_l(&tp, &self.p, &self.pinvmod2tow) * &self.hsubp % &self.p);

        let tq = Zeroizing::new((c % &self.qsquared).modpow(&qmin1, &self.qsquared));
        let mq = Zeroizing::new(fast_l(&tq, &self.q, &self.qinvmod2tow) * &self.hsubq % &self.q);

        fast_crt(&mp, &self.p, &mq, &self.q, &self.qinv)
    }
}

/// Modular inverse of `a` modulo `m`, or [`CounterError::NoInverse`].
pub(crate) fn invert(a: &BigUint, m: &BigUint) -> Result<BigUint, CounterError> {
    a.mod_inverse(m)
        .and_then(|v| v.to_biguint())
        .ok_or(CounterError::NoInverse)
}

/// `n^{-1} mod 2^|n|` for odd `n`, where `|n|` is the bit-length of `n`.
fn inv_mod_2w(n: &BigUint) -> Result<BigUint, CounterError> {
    let modulus = BigUint::one() << n.bits();
    invert(n, &modulus)
}

/// `L(u) = (u - 1) / n` for `u = 1 (mod n)`, computed without division.
///
/// With `w = |n|` the quotient fits in `w` bits, so
/// `(u - 1) / n = (u - 1) * n^{-1} (mod 2^w)` and two mask-and-multiply
/// steps replace the long division.
fn fast_l(u: &BigUint, n: &BigUint, ninvmod2tow: &BigUint) -> BigUint {
    let w = n.bits();
    let mask = (BigUint::one() << w) - 1u32;
    let t = (u - 1u32) & &mask;
    t * ninvmod2tow & mask
}

/// `(L_p(g^{p-1} mod p^2))^{-1} mod p`: the per-factor decryption constant.
fn h_constant(
    g: &BigUint,
    p: &BigUint,
    psquared: &BigUint,
    pinvmod2tow: &BigUint,
) -> Result<BigUint, CounterError> {
    let pmin1 = p - 1u32;
    let t = Zeroizing::new((g % psquared).modpow(&pmin1, psquared));
    let l = Zeroizing::new(fast_l(&t, p, pinvmod2tow) % p);
    invert(&l, p)
}

/// The unique `x` in `[0, p*q)` with `x = x1 (mod p)` and `x = x2 (mod q)`,
/// given `qinv = (q mod p)^{-1} mod p`. Requires `x1 < p`.
fn fast_crt(x1: &BigUint, p: &BigUint, x2: &BigUint, q: &BigUint, qinv: &BigUint) -> BigUint {
    let x2_mod_p = x2 % p;
    let t = if x1 >= &x2_mod_p {
        x1 - &x2_mod_p
    } else {
        p - (&x2_mod_p - x1)
    };
    let h = t * qinv % p;
    x2 + q * h
}

/// `(q mod p)^{-1} mod p`, the CRT recombination constant.
fn q_inv_precompute(q: &BigUint, p: &BigUint) -> Result<BigUint, CounterError> {
    invert(&(q % p), p)
}

/// Membership in `Z*_n`: `0 <= a < n` and `gcd(a, n) = 1`.
fn is_in_zn_star(a: &BigUint, n: &BigUint) -> bool {
    a < n && a.gcd(n).is_one()
}

/// Membership in `Z*_{n^2}`: `0 <= a < n^2` and `gcd(a, n^2) = 1`.
fn is_in_zn_squared_star(a: &BigUint, nsquared: &BigUint) -> bool {
    is_in_zn_star(a, nsquared)
}

/// Sample uniformly from `Z*_n` by rejection.
pub(crate) fn sample_unit(n: &BigUint) -> Result<BigUint, CounterError> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let r = rng::random_below(n)?;
        if is_in_zn_star(&r, n) {
            return Ok(r);
        }
    }
    Err(CounterError::RandGenFail)
}

/// Sample one CRT factor for the generator: an element of `Z*_{p^2}` whose
/// order does not divide `p - 1`, so the recombined generator has order a
/// nonzero multiple of `n` in `Z*_{n^2}`.
fn generator_factor(p: &BigUint, psquared: &BigUint) -> Result<BigUint, CounterError> {
    let pmin1 = p - 1u32;
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = rng::random_below(psquared)?;
        if !is_in_zn_squared_star(&candidate, psquared) {
            continue;
        }
        if !candidate.modpow(&pmin1, psquared).is_one() {
            return Ok(candidate);
        }
    }
    Err(CounterError::RandGenFail)
}

/// Select the Paillier generator `g` by sampling one good element per prime
/// factor and recombining with the CRT. Much faster than sampling directly
/// in `Z*_{n^2}` and testing the order there.
fn select_generator(
    p: &BigUint,
    psquared: &BigUint,
    q: &BigUint,
    qsquared: &BigUint,
) -> Result<BigUint, CounterError> {
    let gp = Zeroizing::new(generator_factor(p, psquared)?);
    let gq = Zeroizing::new(generator_factor(q, qsquared)?);
    let inv = invert(&(qsquared % psquared), psquared)?;

    Ok(fast_crt(&gp, psquared, &gq, qsquared, &inv))
}
