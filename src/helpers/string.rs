//! Little-endian conversion utilities for reading ZIP record fields from byte slices.
//! Callers check slice lengths before converting.

/// Converts the first 8 bytes of a slice to a 64-bit unsigned integer.
#[inline]
pub(crate) fn to_u64(s: &[u8]) -> u64 {
    u64::from_le_bytes([s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7]])
}

/// Converts the first 4 bytes of a slice to a 32-bit unsigned integer.
#[inline]
pub(crate) fn to_u32(s: &[u8]) -> u32 {
    u32::from_le_bytes([s[0], s[1], s[2], s[3]])
}

/// Converts the first 2 bytes of a slice to a 16-bit unsigned integer.
#[inline]
pub(crate) fn to_u16(s: &[u8]) -> u16 {
    u16::from_le_bytes([s[0], s[1]])
}

/// Converts the first 2 bytes of a slice to a usize value.
#[inline]
pub(crate) fn to_usize(s: &[u8]) -> usize {
    to_u16(s) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_fields() {
        let bytes = [0x50, 0x4b, 0x05, 0x06, 0x01, 0x00, 0x00, 0x00, 0xff];
        assert_eq!(to_u32(&bytes), 0x06054b50);
        assert_eq!(to_u16(&bytes[4..]), 1);
        assert_eq!(to_usize(&bytes[2..]), 0x0605);
        assert_eq!(to_u64(&bytes[1..]), 0xff00_0000_0106_054b);
    }
}
