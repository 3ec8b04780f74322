//! Conversation settings agreed during the ceremony.
//!
//! Travels next to the pad bytes inside the fountain payload.
//! Wire layout (big-endian):
//! `version u8 | ttl u32 | disappearing u32 | prefs u8 | relay_len u16 | relay utf-8`

use super::codec::Reader;
use super::CeremonyError;

pub const METADATA_VERSION: u8 = 1;

/// Notification preferences with an embedded 3-bit color index.
///
/// Bits 0..=4 are flags, bits 5..=7 hold the conversation color (0..=7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationPrefs(u8);

impl NotificationPrefs {
    pub const NOTIFY: u8 = 1 << 0;
    pub const SHOW_SENDER: u8 = 1 << 1;
    pub const SHOW_PREVIEW: u8 = 1 << 2;
    pub const SOUND: u8 = 1 << 3;
    pub const VIBRATE: u8 = 1 << 4;

    const FLAG_MASK: u8 = 0b0001_1111;
    const COLOR_SHIFT: u8 = 5;
    pub const MAX_COLOR_INDEX: u8 = 7;

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, flag: u8) -> bool {
        self.0 & flag & Self::FLAG_MASK == flag
    }

    pub fn with_flag(self, flag: u8, enabled: bool) -> Self {
        let flag = flag & Self::FLAG_MASK;
        if enabled {
            Self(self.0 | flag)
        } else {
            Self(self.0 & !flag)
        }
    }

    pub fn color_index(self) -> u8 {
        self.0 >> Self::COLOR_SHIFT
    }

    /// Returns `None` if `index` exceeds [`Self::MAX_COLOR_INDEX`].
    pub fn with_color_index(self, index: u8) -> Option<Self> {
        if index > Self::MAX_COLOR_INDEX {
            return None;
        }
        Some(Self((self.0 & Self::FLAG_MASK) | (index << Self::COLOR_SHIFT)))
    }
}

/// Immutable settings transferred alongside the pad.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CeremonyMetadata {
    pub version: u8,
    /// Relay retention for undelivered messages.
    pub ttl_seconds: u32,
    /// Local deletion delay after reading; 0 disables.
    pub disappearing_seconds: u32,
    pub notifications: NotificationPrefs,
    pub relay_url: String,
}

impl Default for CeremonyMetadata {
    fn default() -> Self {
        Self {
            version: METADATA_VERSION,
            ttl_seconds: 7 * 24 * 60 * 60,
            disappearing_seconds: 0,
            notifications: NotificationPrefs::from_bits(NotificationPrefs::NOTIFY),
            relay_url: String::new(),
        }
    }
}

impl CeremonyMetadata {
    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CeremonyError> {
        let relay = self.relay_url.as_bytes();
        let relay_len = u16::try_from(relay.len())
            .map_err(|_| CeremonyError::InvalidPayload("relay address too long"))?;
        out.push(self.version);
        out.extend_from_slice(&self.ttl_seconds.to_be_bytes());
        out.extend_from_slice(&self.disappearing_seconds.to_be_bytes());
        out.push(self.notifications.bits());
        out.extend_from_slice(&relay_len.to_be_bytes());
        out.extend_from_slice(relay);
        Ok(())
    }

    pub(crate) fn decode_from(reader: &mut Reader<'_>) -> Result<Self, CeremonyError> {
        let truncated = CeremonyError::InvalidPayload("metadata truncated");
        let version = reader.u8().ok_or(truncated.clone())?;
        if version != METADATA_VERSION {
            return Err(CeremonyError::InvalidPayload("unsupported metadata version"));
        }
        let ttl_seconds = reader.u32().ok_or(truncated.clone())?;
        let disappearing_seconds = reader.u32().ok_or(truncated.clone())?;
        let notifications = NotificationPrefs::from_bits(reader.u8().ok_or(truncated.clone())?);
        let relay_len = reader.u16().ok_or(truncated.clone())? as usize;
        let relay = reader.take(relay_len).ok_or(truncated)?;
        let relay_url = String::from_utf8(relay.to_vec())
            .map_err(|_| CeremonyError::InvalidPayload("relay address is not utf-8"))?;
        Ok(Self {
            version,
            ttl_seconds,
            disappearing_seconds,
            notifications,
            relay_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_embedding() {
        let prefs = NotificationPrefs::default()
            .with_flag(NotificationPrefs::SOUND, true)
            .with_color_index(5)
            .unwrap();
        assert_eq!(prefs.color_index(), 5);
        assert!(prefs.contains(NotificationPrefs::SOUND));
        assert!(!prefs.contains(NotificationPrefs::VIBRATE));
        assert_eq!(prefs.bits(), 0b1010_1000);

        let recolored = prefs.with_color_index(2).unwrap();
        assert_eq!(recolored.color_index(), 2);
        assert!(recolored.contains(NotificationPrefs::SOUND));
        assert_eq!(prefs.with_color_index(8), None);
    }

    #[test]
    fn test_flags_do_not_touch_color() {
        let prefs = NotificationPrefs::from_bits(0b1110_0000).with_flag(0xFF, true);
        assert_eq!(prefs.color_index(), 7);
        assert_eq!(prefs.with_flag(0xFF, false).bits(), 0b1110_0000);
    }

    #[test]
    fn test_wire_layout() {
        let metadata = CeremonyMetadata {
            version: 1,
            ttl_seconds: 0x0102_0304,
            disappearing_seconds: 60,
            notifications: NotificationPrefs::from_bits(0x21),
            relay_url: "https://r.example".into(),
        };
        let mut out = Vec::new();
        metadata.encode_into(&mut out).unwrap();
        assert_eq!(&out[..12], &[1, 1, 2, 3, 4, 0, 0, 0, 60, 0x21, 0, 17]);

        let mut reader = Reader::new(&out);
        assert_eq!(CeremonyMetadata::decode_from(&mut reader).unwrap(), metadata);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_decode_rejects_truncation_and_version() {
        let mut out = Vec::new();
        CeremonyMetadata::default().encode_into(&mut out).unwrap();
        let mut short = Reader::new(&out[..5]);
        assert!(CeremonyMetadata::decode_from(&mut short).is_err());

        out[0] = 9;
        let mut reader = Reader::new(&out);
        assert_eq!(
            CeremonyMetadata::decode_from(&mut reader),
            Err(CeremonyError::InvalidPayload("unsupported metadata version"))
        );
    }
}
