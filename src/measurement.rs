use core::fmt;

use chrono::{DateTime, Utc};

/// Default slope in (mg/dl) per raw count.
pub const SLOPE: f64 = 0.1;
/// Default glucose offset in mg/dl.
pub const OFFSET: f64 = 0.0;

/// Extracts the 12-bit raw value from a byte pair: the first byte carries
/// bits 0-7, the low nibble of the second byte carries bits 8-11. The mask
/// applies to the shifted second byte before the first byte is added.
pub fn raw_value(bytes: [u8; 2]) -> u16 {
    ((u16::from(bytes[1]) << 8) & 0x0f00) + u16::from(bytes[0])
}

/// One glucose reading decoded from a two-byte pair of sensor memory.
///
/// Everything is derived from `bytes` and the calibration at construction
/// time; the value never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// The two bytes as read from the sensor.
    pub bytes: [u8; 2],
    /// 12-bit raw value extracted from `bytes`.
    pub raw_value: u16,
    /// Slope in (mg/dl) per raw count.
    pub slope: f64,
    /// Offset in mg/dl.
    pub offset: f64,
    /// Calibrated glucose in mg/dl.
    pub glucose: f64,
    /// When the reading was taken.
    pub date: DateTime<Utc>,
}

impl Measurement {
    pub fn new(bytes: [u8; 2], slope: f64, offset: f64, date: DateTime<Utc>) -> Self {
        let raw_value = raw_value(bytes);
        Self {
            bytes,
            raw_value,
            slope,
            offset,
            glucose: offset + slope * f64::from(raw_value),
            date,
        }
    }

    /// Decodes with the default calibration of [`SLOPE`] and [`OFFSET`].
    pub fn from_bytes(bytes: [u8; 2], date: DateTime<Utc>) -> Self {
        Self::new(bytes, SLOPE, OFFSET, date)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} mg/dl at {} (raw {}, slope {}, offset {}, bytes {:02X} {:02X})",
            self.glucose,
            self.date,
            self.raw_value,
            self.slope,
            self.offset,
            self.bytes[0],
            self.bytes[1],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 6, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_mask_applies_before_addition() {
        assert_eq!(raw_value([0x00, 0x10]), 0x0000);
        assert_eq!(raw_value([0xff, 0x1f]), 0x0fff);
    }

    #[test]
    fn test_low_nibble_becomes_high_bits() {
        assert_eq!(raw_value([0x23, 0x01]), 0x0123);
        assert_eq!(raw_value([0xe8, 0x03]), 1000);
    }

    #[test]
    fn test_slope_and_offset() {
        let m = Measurement::new([0xe8, 0x03], 1.0, 5.0, date());
        assert_eq!(m.raw_value, 1000);
        assert_eq!(m.glucose, 1005.0);
    }

    #[test]
    fn test_default_calibration() {
        let m = Measurement::from_bytes([0x34, 0x12], date());
        assert_eq!(m.slope, SLOPE);
        assert_eq!(m.offset, OFFSET);
        assert_eq!(m.raw_value, 0x0234);
        assert_eq!(m.glucose, 0.1 * 564.0);
    }

    #[test]
    fn test_display() {
        let m = Measurement::from_bytes([0xe8, 0x03], date());
        let text = m.to_string();
        assert!(text.starts_with("100.0 mg/dl"));
        assert!(text.contains("raw 1000"));
        assert!(text.contains("bytes E8 03"));
    }
}
