use core::fmt;

/// Reversed representation of the CCITT polynomial x^16 + x^12 + x^5 + 1.
pub const POLYNOMIAL: u16 = 0x8408;
/// Initial value used for the checksums stored on the sensor.
pub const SEED: u16 = 0xffff;

const TABLE: [u16; 256] = make_table();

/// Builds the 256-entry lookup table for [`POLYNOMIAL`].
pub const fn make_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 == 1 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Finalized checksum in the bit and byte order the sensor stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum(u16);

impl Checksum {
    /// Reads the two checksum bytes in storage order, high byte first.
    pub fn from_stored(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    pub fn to_stored(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Bit-reversed value without the final byte swap. Only good for
    /// diagnostic display; never compare it against stored bytes.
    pub fn unswapped(self) -> u16 {
        self.0.swap_bytes()
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [hi, lo] = self.to_stored();
        write!(f, "{hi:02X} {lo:02X}")
    }
}

/// Running CRC-16 over a byte stream. Splitting the input into chunks of
/// any size leaves the result unchanged.
#[derive(Debug, Clone)]
pub struct Digest {
    crc: u16,
}

impl Digest {
    /// Starts a digest with the sensor's seed of [`SEED`].
    pub fn new() -> Self {
        Self::with_seed(SEED)
    }

    /// Starts a digest with an arbitrary seed; 0x0000 gives the plain
    /// table-driven checksum.
    pub fn with_seed(seed: u16) -> Self {
        Self { crc: seed }
    }

    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.crc = (self.crc >> 8) ^ TABLE[usize::from((self.crc ^ u16::from(byte)) & 0xff)];
        }
    }

    /// Reverses the 16 bits of the accumulator and swaps its bytes, which is
    /// the order the sensor stores its reference checksum in.
    pub fn finalize(self) -> Checksum {
        Checksum(self.crc.reverse_bits().swap_bytes())
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::new()
    }
}

/// Checksum of `data` as the sensor would store it.
pub fn checksum(data: &[u8]) -> Checksum {
    let mut digest = Digest::new();
    digest.update(data);
    digest.finalize()
}
