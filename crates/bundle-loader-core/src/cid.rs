//! Content identifiers.
//!
//! A [`Cid`] names a block by the Blake3 digest of its bytes together with
//! the codec needed to interpret them. The binary form is
//!
//! ```text
//! 0x01 | codec | 0x1e | 0x20 | digest[32]
//! ```
//!
//! and the text form is the multibase base16 string (`'f'` + lowercase hex).
//! Two cids are equal exactly when their binary forms are equal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::hash::Blake3Hash;

/// Cid format version byte.
pub const CID_VERSION: u8 = 0x01;

/// Multihash code for Blake3-256.
pub const MULTIHASH_BLAKE3: u8 = 0x1e;

/// Multibase prefix for lowercase base16.
const MULTIBASE_BASE16: char = 'f';

/// How the bytes behind a cid are to be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Codec {
    /// Opaque bytes.
    Raw = 0x55,
    /// CBOR-encoded node that may link to other blocks.
    DagCbor = 0x71,
}

impl Codec {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0x55 => Ok(Codec::Raw),
            0x71 => Ok(Codec::DagCbor),
            other => Err(CoreError::UnknownCodec(other)),
        }
    }
}

/// A self-describing content identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cid {
    codec: Codec,
    digest: Blake3Hash,
}

impl Cid {
    /// Length of the binary encoding.
    pub const ENCODED_LEN: usize = 4 + Blake3Hash::LEN;

    /// Build a cid from its parts.
    pub const fn new(codec: Codec, digest: Blake3Hash) -> Self {
        Self { codec, digest }
    }

    /// Compute the cid of `data` under `codec`.
    pub fn of(codec: Codec, data: &[u8]) -> Self {
        Self::new(codec, Blake3Hash::hash(data))
    }

    pub const fn codec(&self) -> Codec {
        self.codec
    }

    pub const fn digest(&self) -> &Blake3Hash {
        &self.digest
    }

    /// Binary encoding.
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[0] = CID_VERSION;
        out[1] = self.codec.code();
        out[2] = MULTIHASH_BLAKE3;
        out[3] = Blake3Hash::LEN as u8;
        out[4..].copy_from_slice(self.digest.as_bytes());
        out
    }

    /// Parse the binary encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(CoreError::InvalidCid(format!(
                "expected {} bytes, got {}",
                Self::ENCODED_LEN,
                bytes.len()
            )));
        }
        if bytes[0] != CID_VERSION {
            return Err(CoreError::InvalidCid(format!(
                "unsupported cid version {}",
                bytes[0]
            )));
        }
        let codec = Codec::from_code(bytes[1])?;
        if bytes[2] != MULTIHASH_BLAKE3 || bytes[3] as usize != Blake3Hash::LEN {
            return Err(CoreError::InvalidCid(format!(
                "unsupported multihash 0x{:02x}/{}",
                bytes[2], bytes[3]
            )));
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&bytes[4..]);
        Ok(Self::new(codec, Blake3Hash(digest)))
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", MULTIBASE_BASE16, hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Skip the fixed prefix so the digest is visible in the short form.
        write!(f, "Cid({:?}:{})", self.codec, &self.digest.to_hex()[..16])
    }
}

impl FromStr for Cid {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let hex_part = s.strip_prefix(MULTIBASE_BASE16).ok_or_else(|| {
            CoreError::InvalidCid(format!("missing multibase prefix '{}'", MULTIBASE_BASE16))
        })?;
        let bytes = hex::decode(hex_part).map_err(|e| CoreError::InvalidCid(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl TryFrom<&[u8]> for Cid {
    type Error = CoreError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl Serialize for Cid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cid_text_roundtrip() {
        let cid = Cid::of(Codec::DagCbor, b"manifest");
        let text = cid.to_string();
        assert!(text.starts_with("f0171"));
        assert_eq!(text.len(), 1 + 2 * Cid::ENCODED_LEN);
        assert_eq!(text.parse::<Cid>().unwrap(), cid);
    }

    #[test]
    fn test_codec_is_part_of_identity() {
        let raw = Cid::of(Codec::Raw, b"same bytes");
        let cbor = Cid::of(Codec::DagCbor, b"same bytes");
        assert_eq!(raw.digest(), cbor.digest());
        assert_ne!(raw, cbor);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let cid = Cid::of(Codec::Raw, b"x");
        let text = cid.to_string();

        assert!("".parse::<Cid>().is_err());
        assert!(text[1..].parse::<Cid>().is_err(), "missing prefix");
        assert!(text[..text.len() - 2].parse::<Cid>().is_err(), "truncated");
        assert!(format!("{}zz", text).parse::<Cid>().is_err(), "bad hex");

        let mut bytes = cid.to_bytes();
        bytes[1] = 0x70;
        assert!(matches!(
            Cid::from_bytes(&bytes),
            Err(CoreError::UnknownCodec(0x70))
        ));

        let mut bytes = cid.to_bytes();
        bytes[0] = 0x00;
        assert!(Cid::from_bytes(&bytes).is_err());

        let mut bytes = cid.to_bytes();
        bytes[2] = 0x12;
        assert!(Cid::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_cid_serde_as_string() {
        let cid = Cid::of(Codec::DagCbor, b"root");
        let json = serde_json::to_string(&cid).unwrap();
        assert_eq!(json, format!("\"{}\"", cid));
        let back: Cid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cid);

        assert!(serde_json::from_str::<Cid>("\"not-a-cid\"").is_err());
    }

    proptest! {
        #[test]
        fn cid_equality_is_byte_equality(a in any::<Vec<u8>>(), b in any::<Vec<u8>>()) {
            let ca = Cid::of(Codec::Raw, &a);
            let cb = Cid::of(Codec::Raw, &b);
            prop_assert_eq!(ca == cb, ca.to_bytes() == cb.to_bytes());
        }
    }
}
