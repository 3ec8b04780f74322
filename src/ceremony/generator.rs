//! Displaying side of the ceremony.

use zeroize::Zeroizing;

use super::frame::{Frame, SessionParams, FLAG_SCRAMBLED, MAX_BLOCK_COUNT};
use super::payload::encode_payload;
use super::schedule::CodingSchedule;
use super::scramble::scramble;
use super::{CeremonyError, CeremonyMetadata};
use crate::config::CeremonyConfig;
use crate::core::xor::xor_in_place;
use crate::derive::validate_passphrase;
use crate::entropy::EntropySource;

/// Produces an unbounded stream of fountain frames for one payload.
///
/// Frames are a pure function of the payload, the per-ceremony seed and the
/// frame index; [`generate_frame`](Self::generate_frame) may be called for any
/// index in any order, as often as the display loop needs.
/// [`next_frame`](Self::next_frame) alternates systematic and repair frames so
/// that a scanner joining the loop at any point catches both.
pub struct FountainGenerator {
    session: SessionParams,
    schedule: CodingSchedule,
    /// Source blocks back to back, zero-padded to a whole number of blocks.
    blocks: Zeroizing<Vec<u8>>,
    step: u64,
}

impl FountainGenerator {
    /// Serializes `metadata` and `pad_bytes`, scrambles them under `passphrase`
    /// if one is given, and fixes a fresh coding seed drawn from `source`.
    pub fn new(
        metadata: &CeremonyMetadata,
        pad_bytes: &[u8],
        config: &CeremonyConfig,
        passphrase: Option<&str>,
        source: &mut dyn EntropySource,
    ) -> Result<Self, CeremonyError> {
        config.validate()?;
        if let Some(passphrase) = passphrase {
            validate_passphrase(passphrase)?;
        }

        let mut seed = [0u8; 4];
        source.fill(&mut seed)?;
        let seed = u32::from_be_bytes(seed);

        let payload = encode_payload(metadata, pad_bytes)?;
        let (payload, flags) = match passphrase {
            Some(passphrase) => (
                Zeroizing::new(scramble(&payload, passphrase, &config.kdf, source)?),
                FLAG_SCRAMBLED,
            ),
            None => (payload, 0),
        };

        let block_size = u16::try_from(config.block_size)
            .map_err(|_| CeremonyError::InvalidPayload("block size too large"))?;
        let payload_len = u32::try_from(payload.len())
            .map_err(|_| CeremonyError::InvalidPayload("payload too large"))?;
        let session = SessionParams { flags, seed, payload_len, block_size };
        let block_count = session.block_count();
        if block_count > MAX_BLOCK_COUNT {
            return Err(CeremonyError::InvalidPayload("payload too large"));
        }

        let mut blocks = Zeroizing::new(vec![0u8; block_count * config.block_size]);
        blocks[..payload.len()].copy_from_slice(&payload);

        log::debug!(
            "fountain generator: {} byte payload, {} blocks of {}, scrambled={}",
            payload_len,
            block_count,
            block_size,
            session.is_scrambled()
        );

        Ok(Self {
            session,
            schedule: CodingSchedule::new(seed, block_count),
            blocks,
            step: 0,
        })
    }

    /// Encodes frame `index`.
    pub fn generate_frame(&self, index: u32) -> Vec<u8> {
        let b = self.session.block_size as usize;
        let neighbors = self.schedule.neighbors(index);
        let mut body = Zeroizing::new(vec![0u8; b]);
        for &block in &neighbors {
            xor_in_place(&mut body, &self.blocks[block * b..(block + 1) * b]);
        }
        Frame {
            session: self.session,
            index,
            degree: neighbors.len() as u16,
            body: &body,
        }
        .encode()
    }

    /// Frame at the internal counter, which then advances.
    ///
    /// Even steps cycle through the systematic frames `0..K`; odd steps walk
    /// the repair frames `K..=u32::MAX`, wrapping back to `K`.
    pub fn next_frame(&mut self) -> Vec<u8> {
        let index = self.index_at(self.step);
        self.step = self.step.wrapping_add(1);
        self.generate_frame(index)
    }

    fn index_at(&self, step: u64) -> u32 {
        let k = self.block_count() as u64;
        let round = step / 2;
        let index = if step % 2 == 0 {
            round % k
        } else {
            // block_count <= MAX_BLOCK_COUNT, so the repair range is never empty
            k + round % (u64::from(u32::MAX) + 1 - k)
        };
        index as u32
    }

    pub fn block_count(&self) -> usize {
        self.schedule.block_count()
    }

    pub fn seed(&self) -> u32 {
        self.session.seed
    }

    pub fn is_scrambled(&self) -> bool {
        self.session.is_scrambled()
    }

    /// Encoded length of every frame of this ceremony.
    pub fn frame_len(&self) -> usize {
        self.session.frame_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KdfParams, MIN_BLOCK_SIZE};
    use crate::entropy::CustomSource;
    use crate::pad::PadSize;

    fn generator(pad: &[u8], block_size: usize) -> FountainGenerator {
        let config = CeremonyConfig { block_size, ..Default::default() };
        let mut source = CustomSource::from_bytes(&[0, 0, 0, 9]);
        FountainGenerator::new(&CeremonyMetadata::default(), pad, &config, None, &mut source)
            .unwrap()
    }

    #[test]
    fn test_frames_are_idempotent() {
        let g = generator(&[0x5A; 500], 256);
        assert_eq!(g.seed(), 9);
        for i in [0u32, 3, 100, 7_000, u32::MAX] {
            assert_eq!(g.generate_frame(i), g.generate_frame(i));
            assert_eq!(g.generate_frame(i).len(), g.frame_len());
        }
    }

    #[test]
    fn test_next_frame_interleaves_systematic_and_repair() {
        let mut g = generator(&[1; 1000], 256);
        let k = g.block_count() as u32;
        assert!(k > 2);
        for round in 0..2 * k {
            assert_eq!(g.next_frame(), g.generate_frame(round % k));
            assert_eq!(g.next_frame(), g.generate_frame(k + round));
        }
    }

    #[test]
    fn test_repair_walk_wraps_back_to_first_repair_frame() {
        let g = generator(&[1; 1000], 256);
        let k = g.block_count() as u64;
        let repair_span = u64::from(u32::MAX) + 1 - k;
        assert_eq!(g.index_at(2 * (repair_span - 1) + 1), u32::MAX);
        assert_eq!(g.index_at(2 * repair_span + 1), k as u32);
        assert_eq!(g.index_at(2 * k), 0);
    }

    #[test]
    fn test_largest_pad_fits_at_min_block_size() {
        let config = CeremonyConfig {
            block_size: MIN_BLOCK_SIZE,
            kdf: KdfParams { log_n: 4, r: 8, p: 1 },
            ..Default::default()
        };
        let metadata = CeremonyMetadata {
            relay_url: "wss://relay.example/a/rather/long/path".into(),
            ..Default::default()
        };
        let pad = vec![0x11u8; PadSize::Max.bytes()];
        let mut source = CustomSource::from_bytes(&[0x22; 20]);
        let g = FountainGenerator::new(&metadata, &pad, &config, Some("passphrase"), &mut source)
            .unwrap();
        assert!(g.block_count() <= MAX_BLOCK_COUNT);
    }

    #[test]
    fn test_systematic_frames_carry_payload() {
        let g = generator(&[0xC3; 600], 256);
        let first = Frame::parse(&g.generate_frame(0)).unwrap().body.to_vec();
        assert_eq!(&first[..4], b"EPC1");
        assert_eq!(first.as_slice(), &g.blocks[..256]);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let metadata = CeremonyMetadata::default();
        let bad_block = CeremonyConfig { block_size: 8, ..Default::default() };
        let mut source = CustomSource::from_bytes(&[0; 64]);
        assert!(matches!(
            FountainGenerator::new(&metadata, &[1; 10], &bad_block, None, &mut source),
            Err(CeremonyError::Config(_))
        ));
        assert!(matches!(
            FountainGenerator::new(
                &metadata,
                &[1; 10],
                &CeremonyConfig::default(),
                Some("abc"),
                &mut source
            ),
            Err(CeremonyError::Passphrase(_))
        ));
        let mut empty = CustomSource::new();
        assert!(matches!(
            FountainGenerator::new(&metadata, &[1; 10], &CeremonyConfig::default(), None, &mut empty),
            Err(CeremonyError::Entropy(_))
        ));
    }
}
