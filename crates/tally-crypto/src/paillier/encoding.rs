//! Hexadecimal serialization of keys and counters.
//!
//! Every big-integer field becomes one uppercase big-endian hex string with
//! no `0x` prefix. Serialization is format-preserving, not validating: a
//! deserialized key is only checked by the operations that later use it.

use num_bigint_dig::BigUint;
use tally_types::{CounterError, KeyKind};
use zeroize::Zeroize;

use super::{Counter, PaillierPrivateKey, PaillierPublicKey};

/// Hex mirror of a [`PaillierPublicKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyHex {
    pub n: String,
    pub g: String,
    pub nsquared: String,
}

/// Hex mirror of a [`PaillierPrivateKey`]. All strings are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct PrivateKeyHex {
    pub p: String,
    pub q: String,
    pub psquared: String,
    pub qsquared: String,
    pub pinvmod2tow: String,
    pub qinvmod2tow: String,
    pub hsubp: String,
    pub hsubq: String,
    pub qinv: String,
}

/// A serialized key together with its type tag.
pub enum KeyHex {
    Public(PublicKeyHex),
    Private(PrivateKeyHex),
}

impl KeyHex {
    /// The key type this serialized form carries.
    pub fn kind(&self) -> KeyKind {
        match self {
            KeyHex::Public(_) => KeyKind::PaillierPublic,
            KeyHex::Private(_) => KeyKind::PaillierPrivate,
        }
    }
}

fn to_hex(v: &BigUint) -> String {
    format!("{v:X}")
}

fn from_hex(s: &str) -> Result<BigUint, CounterError> {
    if s.is_empty() {
        return Err(CounterError::NullInput);
    }
    BigUint::parse_bytes(s.as_bytes(), 16).ok_or(CounterError::MalformedHex)
}

impl PaillierPublicKey {
    /// Serialize every component to uppercase hex.
    pub fn to_hex(&self) -> PublicKeyHex {
        PublicKeyHex {
            n: to_hex(self.n()),
            g: to_hex(self.g()),
            nsquared: to_hex(self.nsquared()),
        }
    }

    /// Rebuild a public key from its hex mirror.
    pub fn from_hex(hex: &PublicKeyHex) -> Result<Self, CounterError> {
        Ok(Self {
            n: from_hex(&hex.n)?,
            g: from_hex(&hex.g)?,
            nsquared: from_hex(&hex.nsquared)?,
        })
    }
}

impl PaillierPrivateKey {
    /// Serialize every component to uppercase hex.
    pub fn to_hex(&self) -> PrivateKeyHex {
        PrivateKeyHex {
            p: to_hex(&self.p),
            q: to_hex(&self.q),
            psquared: to_hex(&self.psquared),
            qsquared: to_hex(&self.qsquared),
            pinvmod2tow: to_hex(&self.pinvmod2tow),
            qinvmod2tow: to_hex(&self.qinvmod2tow),
            hsubp: to_hex(&self.hsubp),
            hsubq: to_hex(&self.hsubq),
            qinv: to_hex(&self.qinv),
        }
    }

    /// Rebuild a private key from its hex mirror.
    pub fn from_hex(hex: &PrivateKeyHex) -> Result<Self, CounterError> {
        Ok(Self {
            p: from_hex(&hex.p)?,
            q: from_hex(&hex.q)?,
            psquared: from_hex(&hex.psquared)?,
            qsquared: from_hex(&hex.qsquared)?,
            pinvmod2tow: from_hex(&hex.pinvmod2tow)?,
            qinvmod2tow: from_hex(&hex.qinvmod2tow)?,
            hsubp: from_hex(&hex.hsubp)?,
            hsubq: from_hex(&hex.hsubq)?,
            qinv: from_hex(&hex.qinv)?,
        })
    }
}

impl Counter {
    /// Serialize the ciphertext to one uppercase hex string.
    pub fn to_hex(&self) -> String {
        to_hex(&self.c)
    }

    /// Rebuild a counter from a serialized ciphertext. The version tag is
    /// restored and the modification time is set to now.
    pub fn from_hex(s: &str) -> Result<Self, CounterError> {
        Ok(Self::from_ciphertext(from_hex(s)?))
    }
}
