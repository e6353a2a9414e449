// hcelink/src/types.rs
//! Newtypes for the values that travel on the wire

use crate::Error;
use derive_more::{Display, From, Into};

/// ISO 7816 status word (SW1 SW2), the trailer of every response APDU.
#[derive(Debug, Display, From, Into, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{:04X}", _0)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusWord(u16);

impl StatusWord {
    /// 90 00
    pub const SUCCESS: Self = Self(0x9000);
    /// 6A 82: file or application not found
    pub const NOT_FOUND: Self = Self(0x6A82);
    /// 6D 00: instruction not supported
    pub const INS_NOT_SUPPORTED: Self = Self(0x6D00);

    /// Wrap a raw SW1 SW2 value
    pub const fn new(sw: u16) -> Self {
        Self(sw)
    }

    /// Build from the two trailer bytes
    pub fn from_bytes(sw1: u8, sw2: u8) -> Self {
        Self(u16::from_be_bytes([sw1, sw2]))
    }

    /// SW1 SW2 in wire order
    pub fn to_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Raw value, SW1 in the high byte
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Exactly 90 00
    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }

    /// Exactly 6A 82
    pub fn is_not_found(&self) -> bool {
        *self == Self::NOT_FOUND
    }
}

/// Application identifier - Newtype Pattern (7 bytes)
#[derive(Debug, From, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aid([u8; 7]);

impl Aid {
    /// Wrap raw AID bytes
    pub const fn from_bytes(bytes: [u8; 7]) -> Self {
        Self(bytes)
    }

    /// Raw AID bytes
    pub fn as_bytes(&self) -> &[u8; 7] {
        &self.0
    }

    /// Lowercase hex, no separators
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }

    /// Exact comparison against a raw identifier; prefixes never match.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        candidate == &self.0[..]
    }
}

impl TryFrom<&[u8]> for Aid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 7 {
            return Err(Error::InvalidLength {
                expected: 7,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 7];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl std::fmt::Display for Aid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
