use thiserror::Error;

use crate::crc::{self, Checksum};
use crate::{BODY_SIZE, CRC_SIZE, HEADER_SIZE, SCAN_SIZE};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The region has not fully arrived yet.
    #[error("scan region is incomplete")]
    Incomplete,
    /// The stored checksum does not cover the region payload.
    #[error("scan region is corrupt: stored {expected}, computed {actual}")]
    Corrupt { expected: Checksum, actual: Checksum },
}

/// Checks a region whose first two bytes store the checksum of the rest.
/// Returns the payload behind the checksum field.
pub fn verify(region: &[u8]) -> Result<&[u8], Error> {
    if region.len() < CRC_SIZE {
        return Err(Error::Incomplete);
    }
    let (stored, payload) = region.split_at(CRC_SIZE);
    let expected = Checksum::from_stored([stored[0], stored[1]]);
    let actual = crc::checksum(payload);
    if expected != actual {
        return Err(Error::Corrupt { expected, actual });
    }
    Ok(payload)
}

/// Assembles a scan image from bytes arriving in arbitrary slices and hands
/// out the checksum-verified region payloads.
#[derive(Default)]
pub struct Scan {
    buf: heapless::Vec<u8, SCAN_SIZE>,
}

impl Scan {
    pub fn with_buffer(buf: heapless::Vec<u8, SCAN_SIZE>) -> Self {
        Self { buf }
    }

    /// Appends as much of `input` as fits and returns the number of bytes
    /// taken.
    #[inline]
    pub fn fill(&mut self, input: &[u8]) -> usize {
        let copy_len = input.len().min(self.buf.capacity() - self.buf.len());
        self.buf
            .extend_from_slice(&input[..copy_len])
            .expect("never panic");
        copy_len
    }

    pub fn is_full(&self) -> bool {
        self.buf.is_full()
    }

    /// Verified payload of the header region, blocks 0x00..=0x02.
    pub fn header(&self) -> Result<&[u8], Error> {
        if self.buf.len() < HEADER_SIZE {
            return Err(Error::Incomplete);
        }
        verify(&self.buf[..HEADER_SIZE])
    }

    /// Verified payload of the body region, blocks 0x03..=0x28.
    pub fn body(&self) -> Result<&[u8], Error> {
        if self.buf.len() < HEADER_SIZE + BODY_SIZE {
            return Err(Error::Incomplete);
        }
        verify(&self.buf[HEADER_SIZE..HEADER_SIZE + BODY_SIZE])
    }
}
