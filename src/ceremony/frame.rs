//! Fountain frame wire format.
//!
//! ```text
//! version u8 | flags u8 | seed u32 | payload_len u32 | block_size u16
//! | index u32 | degree u16 | body[block_size] | check[4]
//! ```
//! All integers big-endian. `check` is the first four bytes of BLAKE3 over
//! everything before it, so a misread QR code is dropped instead of poisoning
//! the decoder.

use super::codec::Reader;
use super::CeremonyError;
use crate::config::{MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};

pub const FRAME_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 18;
pub const CHECK_LEN: usize = 4;

/// Set when the payload is passphrase-scrambled.
pub const FLAG_SCRAMBLED: u8 = 0x01;
const KNOWN_FLAGS: u8 = FLAG_SCRAMBLED;

/// Upper bound on source blocks per ceremony; bounds receiver memory.
pub const MAX_BLOCK_COUNT: usize = 8192;

/// Parameters shared by every frame of one ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionParams {
    pub flags: u8,
    pub seed: u32,
    pub payload_len: u32,
    pub block_size: u16,
}

impl SessionParams {
    pub fn block_count(&self) -> usize {
        (self.payload_len as usize).div_ceil(self.block_size as usize)
    }

    pub fn is_scrambled(&self) -> bool {
        self.flags & FLAG_SCRAMBLED != 0
    }

    pub fn frame_len(&self) -> usize {
        HEADER_LEN + self.block_size as usize + CHECK_LEN
    }

    pub(crate) fn validate(&self) -> Result<(), CeremonyError> {
        if self.flags & !KNOWN_FLAGS != 0 {
            return Err(CeremonyError::InvalidFrame("unknown flags"));
        }
        if !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&(self.block_size as usize)) {
            return Err(CeremonyError::InvalidFrame("block size out of range"));
        }
        if self.payload_len == 0 {
            return Err(CeremonyError::InvalidFrame("empty payload"));
        }
        if self.block_count() > MAX_BLOCK_COUNT {
            return Err(CeremonyError::InvalidFrame("too many blocks"));
        }
        Ok(())
    }
}

/// A parsed frame borrowing its body from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub session: SessionParams,
    pub index: u32,
    pub degree: u16,
    pub body: &'a [u8],
}

impl<'a> Frame<'a> {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.body.len() + CHECK_LEN);
        out.push(FRAME_VERSION);
        out.push(self.session.flags);
        out.extend_from_slice(&self.session.seed.to_be_bytes());
        out.extend_from_slice(&self.session.payload_len.to_be_bytes());
        out.extend_from_slice(&self.session.block_size.to_be_bytes());
        out.extend_from_slice(&self.index.to_be_bytes());
        out.extend_from_slice(&self.degree.to_be_bytes());
        out.extend_from_slice(self.body);
        let check = blake3::hash(&out);
        out.extend_from_slice(&check.as_bytes()[..CHECK_LEN]);
        out
    }

    /// Parses and validates a frame.
    ///
    /// # Errors
    /// Returns `CeremonyError::InvalidFrame` for any malformed input.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, CeremonyError> {
        if bytes.len() < HEADER_LEN + CHECK_LEN {
            return Err(CeremonyError::InvalidFrame("too short"));
        }
        let (signed, check) = bytes.split_at(bytes.len() - CHECK_LEN);
        if blake3::hash(signed).as_bytes()[..CHECK_LEN] != *check {
            return Err(CeremonyError::InvalidFrame("check bytes mismatch"));
        }

        let truncated = CeremonyError::InvalidFrame("header truncated");
        let mut reader = Reader::new(signed);
        if reader.u8() != Some(FRAME_VERSION) {
            return Err(CeremonyError::InvalidFrame("unsupported version"));
        }
        let session = SessionParams {
            flags: reader.u8().ok_or(truncated.clone())?,
            seed: reader.u32().ok_or(truncated.clone())?,
            payload_len: reader.u32().ok_or(truncated.clone())?,
            block_size: reader.u16().ok_or(truncated.clone())?,
        };
        let index = reader.u32().ok_or(truncated.clone())?;
        let degree = reader.u16().ok_or(truncated)?;
        session.validate()?;

        if reader.remaining() != session.block_size as usize {
            return Err(CeremonyError::InvalidFrame("body length mismatch"));
        }
        if degree == 0 || degree as usize > session.block_count() {
            return Err(CeremonyError::InvalidFrame("degree out of range"));
        }
        let body = reader
            .take(session.block_size as usize)
            .ok_or(CeremonyError::InvalidFrame("body truncated"))?;
        Ok(Self { session, index, degree, body })
    }
}
