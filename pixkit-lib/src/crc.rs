//! CRC16/CCITT-FALSE checksum used by field `63` of the payload.
//!
//! Polynomial 0x1021, initial register 0xFFFF, no input or output
//! reflection, no final XOR. This detects transcription errors in the
//! copied text; it offers no protection against tampering.

/// Stateless CRC16/CCITT-FALSE calculator.
///
/// ```
/// use pixkit_lib::ChecksumCalculator;
///
/// assert_eq!(ChecksumCalculator::compute(b"123456789"), 0x29B1);
/// assert_eq!(ChecksumCalculator::hex(b"123456789"), "29B1");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChecksumCalculator;

impl ChecksumCalculator {
    /// Generator polynomial.
    pub const POLYNOMIAL: u16 = 0x1021;
    /// Register value before the first byte.
    pub const INITIAL: u16 = 0xFFFF;

    /// Compute the 16-bit checksum of `data`.
    pub fn compute(data: &[u8]) -> u16 {
        data.iter().fold(Self::INITIAL, |crc, &byte| {
            let mut crc = crc ^ (u16::from(byte) << 8);
            for _ in 0..8 {
                crc = if crc & 0x8000 != 0 {
                    (crc << 1) ^ Self::POLYNOMIAL
                } else {
                    crc << 1
                };
            }
            crc
        })
    }

    /// Checksum as 4 uppercase hex digits, zero-padded.
    pub fn hex(data: &[u8]) -> String {
        format!("{:04X}", Self::compute(data))
    }
}
