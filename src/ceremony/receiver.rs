//! Scanning side of the ceremony.

use std::collections::HashSet;
use std::fmt;

use zeroize::Zeroizing;

use super::decoder::Decoder;
use super::frame::{Frame, SessionParams};
use super::payload::decode_payload;
use super::schedule::CodingSchedule;
use super::scramble::unscramble;
use super::{CeremonyError, CeremonyMetadata};
use crate::config::{CeremonyConfig, KdfParams};
use crate::derive::validate_passphrase;

/// Recovered ceremony contents.
#[derive(Clone)]
pub struct CeremonyResult {
    pub metadata: CeremonyMetadata,
    pub pad_bytes: Zeroizing<Vec<u8>>,
    /// Distinct frames accepted before decoding completed.
    pub frames_used: usize,
}

impl fmt::Debug for CeremonyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CeremonyResult")
            .field("metadata", &self.metadata)
            .field("pad_len", &self.pad_bytes.len())
            .field("frames_used", &self.frames_used)
            .finish()
    }
}

struct Session {
    params: SessionParams,
    schedule: CodingSchedule,
    decoder: Decoder,
}

/// Collects frames until the payload can be rebuilt.
///
/// The first valid frame fixes the session; later frames must carry the same
/// header fields. Malformed frames are rejected without touching any state.
/// If the first frame came from a stale display, [`reset`](Self::reset)
/// drops the session so the next frame can fix a new one.
pub struct FountainReceiver {
    passphrase: Option<Zeroizing<String>>,
    kdf: KdfParams,
    session: Option<Session>,
    seen: HashSet<u32>,
    frames_received: usize,
    /// Decoded (possibly still scrambled) payload, kept for passphrase retries.
    assembled: Option<Zeroizing<Vec<u8>>>,
    outcome: Option<Result<CeremonyResult, CeremonyError>>,
}

impl FountainReceiver {
    pub fn new(passphrase: Option<&str>, config: &CeremonyConfig) -> Result<Self, CeremonyError> {
        config.validate()?;
        if let Some(passphrase) = passphrase {
            validate_passphrase(passphrase)?;
        }
        Ok(Self {
            passphrase: passphrase.map(|p| Zeroizing::new(p.to_owned())),
            kdf: config.kdf,
            session: None,
            seen: HashSet::new(),
            frames_received: 0,
            assembled: None,
            outcome: None,
        })
    }

    /// Feeds one scanned frame.
    ///
    /// Returns `Ok(true)` once the payload is recovered and `Ok(false)` while
    /// more frames are needed, including for duplicates. After completion the
    /// stored outcome is returned for every further call.
    ///
    /// # Errors
    /// * `CeremonyError::InvalidFrame` for a malformed or foreign frame; drop it and continue.
    /// * `CeremonyError::PassphraseMismatch` / `ChecksumMismatch` once decoding finished but
    ///   the payload did not open.
    pub fn add_frame(&mut self, bytes: &[u8]) -> Result<bool, CeremonyError> {
        if let Some(outcome) = &self.outcome {
            return outcome.as_ref().map(|_| true).map_err(Clone::clone);
        }

        let frame = Frame::parse(bytes).map_err(|e| {
            log::debug!("dropping frame: {e}");
            e
        })?;
        let schedule = match &self.session {
            Some(active) if active.params != frame.session => {
                log::debug!("dropping frame from another session");
                return Err(CeremonyError::InvalidFrame("session mismatch"));
            }
            Some(active) => active.schedule,
            None => CodingSchedule::new(frame.session.seed, frame.session.block_count()),
        };
        let neighbors = schedule.neighbors(frame.index);
        if neighbors.len() != frame.degree as usize {
            log::debug!("dropping frame {}: degree does not match schedule", frame.index);
            return Err(CeremonyError::InvalidFrame("degree mismatch"));
        }

        let session = self.session.get_or_insert_with(|| {
            log::debug!(
                "fountain session: {} blocks of {}, scrambled={}",
                frame.session.block_count(),
                frame.session.block_size,
                frame.session.is_scrambled()
            );
            Session {
                params: frame.session,
                schedule,
                decoder: Decoder::new(schedule.block_count(), frame.session.block_size as usize),
            }
        });

        if !self.seen.insert(frame.index) {
            return Ok(false);
        }
        self.frames_received += 1;
        session.decoder.add(&neighbors, frame.body);
        if !session.decoder.is_complete() {
            return Ok(false);
        }

        let mut assembled = session.decoder.reconstruct().ok_or(CeremonyError::NotDecoded)?;
        assembled.truncate(session.params.payload_len as usize);
        self.assembled = Some(assembled);
        self.finish()
    }

    /// Forgets the current session and every frame collected for it.
    ///
    /// The passphrase and KDF parameters are kept.
    pub fn reset(&mut self) {
        if let Some(session) = &self.session {
            log::debug!(
                "resetting fountain session after {} frames (seed {:#010x})",
                self.frames_received,
                session.params.seed
            );
        }
        self.session = None;
        self.seen.clear();
        self.frames_received = 0;
        self.assembled = None;
        self.outcome = None;
    }

    /// Re-opens the decoded payload with another passphrase.
    ///
    /// Only meaningful after decoding finished; frames need not be rescanned.
    pub fn retry_passphrase(&mut self, passphrase: &str) -> Result<&CeremonyResult, CeremonyError> {
        if self.assembled.is_none() {
            return Err(CeremonyError::NotDecoded);
        }
        validate_passphrase(passphrase)?;
        self.passphrase = Some(Zeroizing::new(passphrase.to_owned()));
        self.finish()?;
        self.result().ok_or(CeremonyError::NotDecoded)
    }

    fn finish(&mut self) -> Result<bool, CeremonyError> {
        let outcome = self.open_assembled();
        match &outcome {
            Ok(result) => log::info!(
                "ceremony complete: {} pad bytes from {} frames ({} blocks)",
                result.pad_bytes.len(),
                result.frames_used,
                self.block_count().unwrap_or(0)
            ),
            Err(e) => log::warn!("ceremony payload did not open: {e}"),
        }
        let reply = outcome.as_ref().map(|_| true).map_err(Clone::clone);
        self.outcome = Some(outcome);
        reply
    }

    fn open_assembled(&self) -> Result<CeremonyResult, CeremonyError> {
        let (Some(session), Some(assembled)) = (&self.session, &self.assembled) else {
            return Err(CeremonyError::NotDecoded);
        };
        let payload = match (session.params.is_scrambled(), &self.passphrase) {
            (true, Some(passphrase)) => unscramble(assembled, passphrase, &self.kdf)?,
            (false, None) => assembled.clone(),
            // one side configured a passphrase and the other did not
            _ => return Err(CeremonyError::PassphraseMismatch),
        };
        let (metadata, pad_bytes) = decode_payload(&payload)?;
        Ok(CeremonyResult {
            metadata,
            pad_bytes,
            frames_used: self.frames_received,
        })
    }

    /// Fraction of source blocks recovered so far, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        match &self.session {
            Some(s) => s.decoder.rank() as f32 / s.decoder.block_count() as f32,
            None => 0.0,
        }
    }

    /// Distinct frames accepted so far.
    pub fn frames_received(&self) -> usize {
        self.frames_received
    }

    /// Source block count, known after the first valid frame.
    pub fn block_count(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.decoder.block_count())
    }

    /// True once the payload decoded and opened.
    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, Some(Ok(_)))
    }

    pub fn result(&self) -> Option<&CeremonyResult> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    pub fn take_result(self) -> Option<CeremonyResult> {
        self.outcome.and_then(Result::ok)
    }
}
