//! Identity validation for the event-source path.
//!
//! An identity is either a bech32 `npub1…` string or a 64-character hex
//! public key. Validation runs before any I/O so a malformed identity
//! aborts the fetch without touching the network.

use std::fmt::Write as _;

use crate::error::FeedError;

const NPUB_PREFIX: &str = "npub1";
const NPUB_HRP: &[u8] = b"npub";
const BECH32_CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
/// 52 payload characters (32 bytes + 4 pad bits) plus a 6-character checksum.
const NPUB_DATA_LEN: usize = 58;
const CHECKSUM_LEN: usize = 6;
const PUBKEY_LEN: usize = 32;

/// A validated author identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    raw: String,
    pubkey_hex: String,
}

impl Identity {
    /// Validates `raw` as an npub or hex public key.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidIdentity`] describing what is wrong.
    pub fn parse(raw: &str) -> Result<Self, FeedError> {
        let trimmed = raw.trim();
        let invalid = |reason: &str| FeedError::InvalidIdentity {
            identity: raw.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("identity is empty"));
        }

        let pubkey_hex = if trimmed.len() == PUBKEY_LEN * 2
            && trimmed.bytes().all(|b| b.is_ascii_hexdigit())
        {
            trimmed.to_ascii_lowercase()
        } else {
            let bytes = decode_npub(trimmed).map_err(|reason| invalid(&reason))?;
            to_hex(&bytes)
        };

        Ok(Self {
            raw: trimmed.to_string(),
            pubkey_hex,
        })
    }

    /// The identity as supplied (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lower-case hex public key used to match event authors.
    #[must_use]
    pub fn pubkey_hex(&self) -> &str {
        &self.pubkey_hex
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn decode_npub(raw: &str) -> Result<[u8; PUBKEY_LEN], String> {
    let has_lower = raw.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = raw.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err("mixed-case bech32 string".to_string());
    }

    let lower = raw.to_ascii_lowercase();
    let data = lower
        .strip_prefix(NPUB_PREFIX)
        .ok_or_else(|| "expected a 64-character hex key or an npub1 string".to_string())?;
    if data.len() != NPUB_DATA_LEN {
        return Err(format!(
            "npub must have {NPUB_DATA_LEN} characters after the prefix, found {}",
            data.len()
        ));
    }

    let values = data
        .bytes()
        .map(|b| {
            BECH32_CHARSET
                .iter()
                .position(|c| *c == b)
                .and_then(|pos| u8::try_from(pos).ok())
                .ok_or_else(|| format!("invalid bech32 character '{}'", char::from(b)))
        })
        .collect::<Result<Vec<u8>, String>>()?;

    if polymod(hrp_expand(NPUB_HRP).chain(values.iter().copied())) != 1 {
        return Err("bech32 checksum mismatch".to_string());
    }

    let payload = &values[..values.len() - CHECKSUM_LEN];
    let bytes = convert_5_to_8(payload).ok_or_else(|| "non-zero bech32 padding".to_string())?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| format!("expected a {PUBKEY_LEN}-byte key, found {}", v.len()))
}

fn hrp_expand(hrp: &[u8]) -> impl Iterator<Item = u8> + '_ {
    hrp.iter()
        .map(|b| b >> 5)
        .chain(std::iter::once(0))
        .chain(hrp.iter().map(|b| b & 0x1f))
}

fn polymod(values: impl Iterator<Item = u8>) -> u32 {
    const GENERATOR: [u32; 5] = [
        0x3b6a_57b2,
        0x2650_8e6d,
        0x1ea1_19fa,
        0x3d42_33dd,
        0x2a14_62b3,
    ];
    let mut chk: u32 = 1;
    for value in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

/// Regroups 5-bit values into bytes. Leftover bits must be fewer than 5
/// and all zero.
#[allow(clippy::cast_possible_truncation)] // masked to 8 bits
fn convert_5_to_8(values: &[u8]) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(values.len() * 5 / 8);
    for value in values {
        acc = ((acc << 5) | u32::from(*value)) & 0x1fff;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 || (acc & ((1 << bits) - 1)) != 0 {
        return None;
    }
    Some(out)
}

fn to_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(hex, "{b:02x}");
    }
    hex
}
