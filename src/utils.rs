//! Accessors for S7 data inside byte buffers.
//!
//! S7 controllers store multi-byte values big-endian. These helpers read and
//! write typed values at a byte position of a buffer filled by (or destined
//! for) a multi-variable transaction. Every accessor is bounds-checked and
//! returns `BufferTooSmall` instead of panicking.
//!
//! # Example
//!
//! ```
//! use s7_multivar::utils::{get_bit_at, get_int_at, get_real_at, set_real_at};
//!
//! let mut buf = [0x81, 0xFF, 0xFE, 0x00, 0x00, 0x00, 0x00];
//!
//! assert!(get_bit_at(&buf, 0, 7)?);
//! assert_eq!(get_int_at(&buf, 1)?, -2);
//!
//! set_real_at(&mut buf, 3, 1.5)?;
//! assert_eq!(get_real_at(&buf, 3)?, 1.5);
//! # Ok::<(), s7_multivar::S7Error>(())
//! ```

use crate::error::{Result, S7Error};

fn read_array<const N: usize>(buf: &[u8], pos: usize) -> Result<[u8; N]> {
    buf.get(pos..)
        .and_then(|rest| rest.get(..N))
        .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
        .ok_or_else(|| too_small(buf.len(), pos, N))
}

fn write_array<const N: usize>(buf: &mut [u8], pos: usize, bytes: [u8; N]) -> Result<()> {
    let len = buf.len();
    let target = buf
        .get_mut(pos..)
        .and_then(|rest| rest.get_mut(..N))
        .ok_or_else(|| too_small(len, pos, N))?;
    target.copy_from_slice(&bytes);
    Ok(())
}

fn too_small(len: usize, pos: usize, size: usize) -> S7Error {
    S7Error::BufferTooSmall {
        required: pos.saturating_add(size),
        available: len,
    }
}

fn check_bit(bit: u8) -> Result<()> {
    if bit > 7 {
        return Err(S7Error::invalid_parameter("bit", "must be 0-7"));
    }
    Ok(())
}

/// Gets bit `bit` (0 = LSB) of the byte at `pos`.
///
/// # Example
///
/// ```
/// use s7_multivar::utils::get_bit_at;
///
/// let buf = [0b0000_0100];
/// assert!(get_bit_at(&buf, 0, 2).unwrap());
/// assert!(!get_bit_at(&buf, 0, 3).unwrap());
/// ```
pub fn get_bit_at(buf: &[u8], pos: usize, bit: u8) -> Result<bool> {
    check_bit(bit)?;
    let [byte] = read_array::<1>(buf, pos)?;
    Ok(byte & (1 << bit) != 0)
}

/// Sets or clears bit `bit` of the byte at `pos`.
pub fn set_bit_at(buf: &mut [u8], pos: usize, bit: u8, value: bool) -> Result<()> {
    check_bit(bit)?;
    let [byte] = read_array::<1>(buf, pos)?;
    let byte = if value {
        byte | (1 << bit)
    } else {
        byte & !(1 << bit)
    };
    write_array(buf, pos, [byte])
}

/// Gets an unsigned 16-bit word at `pos`.
pub fn get_word_at(buf: &[u8], pos: usize) -> Result<u16> {
    read_array(buf, pos).map(u16::from_be_bytes)
}

/// Sets an unsigned 16-bit word at `pos`.
pub fn set_word_at(buf: &mut [u8], pos: usize, value: u16) -> Result<()> {
    write_array(buf, pos, value.to_be_bytes())
}

/// Gets a signed 16-bit integer at `pos`.
pub fn get_int_at(buf: &[u8], pos: usize) -> Result<i16> {
    read_array(buf, pos).map(i16::from_be_bytes)
}

/// Sets a signed 16-bit integer at `pos`.
pub fn set_int_at(buf: &mut [u8], pos: usize, value: i16) -> Result<()> {
    write_array(buf, pos, value.to_be_bytes())
}

/// Gets an unsigned 32-bit double word at `pos`.
pub fn get_dword_at(buf: &[u8], pos: usize) -> Result<u32> {
    read_array(buf, pos).map(u32::from_be_bytes)
}

/// Sets an unsigned 32-bit double word at `pos`.
pub fn set_dword_at(buf: &mut [u8], pos: usize, value: u32) -> Result<()> {
    write_array(buf, pos, value.to_be_bytes())
}

/// Gets a signed 32-bit integer at `pos`.
pub fn get_dint_at(buf: &[u8], pos: usize) -> Result<i32> {
    read_array(buf, pos).map(i32::from_be_bytes)
}

/// Sets a signed 32-bit integer at `pos`.
pub fn set_dint_at(buf: &mut [u8], pos: usize, value: i32) -> Result<()> {
    write_array(buf, pos, value.to_be_bytes())
}

/// Gets a 32-bit IEEE float at `pos`.
pub fn get_real_at(buf: &[u8], pos: usize) -> Result<f32> {
    read_array(buf, pos).map(f32::from_be_bytes)
}

/// Sets a 32-bit IEEE float at `pos`.
pub fn set_real_at(buf: &mut [u8], pos: usize, value: f32) -> Result<()> {
    write_array(buf, pos, value.to_be_bytes())
}

/// Formats bytes as space-separated uppercase hex.
///
/// # Example
///
/// ```
/// use s7_multivar::utils::format_hex;
///
/// assert_eq!(format_hex(&[0x01, 0x2C, 0xFF]), "01 2C FF");
/// assert_eq!(format_hex(&[]), "");
/// ```
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits() {
        let mut buf = [0u8; 2];
        set_bit_at(&mut buf, 1, 0, true).unwrap();
        set_bit_at(&mut buf, 1, 7, true).unwrap();
        assert_eq!(buf, [0x00, 0x81]);
        set_bit_at(&mut buf, 1, 7, false).unwrap();
        assert_eq!(buf, [0x00, 0x01]);
        assert!(get_bit_at(&buf, 1, 0).unwrap());
    }

    #[test]
    fn test_bit_index_out_of_range() {
        let buf = [0u8; 1];
        assert!(matches!(
            get_bit_at(&buf, 0, 8),
            Err(S7Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_word_is_big_endian() {
        let mut buf = [0u8; 3];
        set_word_at(&mut buf, 1, 0x1234).unwrap();
        assert_eq!(buf, [0x00, 0x12, 0x34]);
        assert_eq!(get_word_at(&buf, 1).unwrap(), 0x1234);
    }

    #[test]
    fn test_int_negative() {
        let mut buf = [0u8; 2];
        set_int_at(&mut buf, 0, -300).unwrap();
        assert_eq!(hex::encode(buf), "fed4");
        assert_eq!(get_int_at(&buf, 0).unwrap(), -300);
    }

    #[test]
    fn test_dword_and_dint() {
        let mut buf = [0u8; 8];
        set_dword_at(&mut buf, 0, 0xDEAD_BEEF).unwrap();
        set_dint_at(&mut buf, 4, -2).unwrap();
        assert_eq!(hex::encode(buf), "deadbeeffffffffe");
        assert_eq!(get_dword_at(&buf, 0).unwrap(), 0xDEAD_BEEF);
        assert_eq!(get_dint_at(&buf, 4).unwrap(), -2);
    }

    #[test]
    fn test_real() {
        let mut buf = [0u8; 4];
        set_real_at(&mut buf, 0, 25.5).unwrap();
        assert_eq!(hex::encode(buf), "41cc0000");
        assert_eq!(get_real_at(&buf, 0).unwrap(), 25.5);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut buf = [0u8; 3];
        assert!(matches!(
            get_dword_at(&buf, 0),
            Err(S7Error::BufferTooSmall {
                required: 4,
                available: 3
            })
        ));
        assert!(set_word_at(&mut buf, 2, 1).is_err());
        assert!(get_word_at(&buf, usize::MAX).is_err());
        assert_eq!(buf, [0, 0, 0]);
    }
}
