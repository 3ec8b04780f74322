//! Custom User-Provided Entropy Source.
//!
//! Buffers caller-injected bytes and hands them out in order. Used to replay a
//! fixed byte stream (tests, reproducible ceremonies) wherever an
//! [`EntropySource`] is expected.

use super::{EntropyError, EntropySource};

/// Source that drains a buffer of injected bytes.
#[derive(Default)]
pub struct CustomSource {
    buffer: Vec<u8>,
    position: usize,
}

impl CustomSource {
    /// Creates a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source pre-loaded with `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut source = Self::new();
        source.add_bytes(bytes);
        source
    }

    /// Appends entropy bytes to the pool.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes still available.
    pub fn available(&self) -> usize {
        self.buffer.len() - self.position
    }
}

impl EntropySource for CustomSource {
    fn name(&self) -> &'static str {
        "CustomInput"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if self.available() < dest.len() {
            return Err(EntropyError::Exhausted);
        }
        let end = self.position + dest.len();
        dest.copy_from_slice(&self.buffer[self.position..end]);
        self.position = end;
        Ok(())
    }
}

impl Drop for CustomSource {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_source() {
        let mut source = CustomSource::new();
        source.add_bytes(&[0x01, 0x02, 0x03, 0x04]);

        let mut buf = [0u8; 2];
        assert!(source.fill(&mut buf).is_ok());
        assert_eq!(buf, [0x01, 0x02]);

        assert!(source.fill(&mut buf).is_ok());
        assert_eq!(buf, [0x03, 0x04]);

        assert_eq!(source.fill(&mut buf), Err(EntropyError::Exhausted));
    }
}
