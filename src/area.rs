//! Memory area and word-length definitions for the S7 protocol.
//!
//! [`Area`] names the controller memory region an item lives in and
//! [`WordLen`] names the unit the item is transferred in.
//!
//! # Areas
//!
//! | Area | Description | Code | Block-addressed |
//! |------|-------------|:----:|:---------------:|
//! | PE | Process inputs | 0x81 | ✗ |
//! | PA | Process outputs | 0x82 | ✗ |
//! | MK | Merkers (flags) | 0x83 | ✗ |
//! | DB | Data blocks | 0x84 | ✓ |
//! | CT | Counters | 0x1C | ✗ |
//! | TM | Timers | 0x1D | ✗ |
//!
//! # Example
//!
//! ```
//! use s7_multivar::{Area, WordLen};
//!
//! assert!(Area::DB.is_block_addressed());
//! assert_eq!(Area::try_from(0x83).unwrap(), Area::MK);
//! assert_eq!(WordLen::Real.byte_size(), 4);
//! assert_eq!(WordLen::Word.to_string(), "Word");
//! ```

use crate::error::{Result, S7Error};

/// Memory areas of an S7 controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Area {
    /// Process inputs.
    PE,
    /// Process outputs.
    PA,
    /// Merkers (flag memory).
    MK,
    /// Data blocks, addressed by block number.
    DB,
    /// Counters.
    CT,
    /// Timers.
    TM,
}

impl Area {
    /// Returns the wire code of this area.
    pub fn code(self) -> u8 {
        match self {
            Area::PE => 0x81,
            Area::PA => 0x82,
            Area::MK => 0x83,
            Area::DB => 0x84,
            Area::CT => 0x1C,
            Area::TM => 0x1D,
        }
    }

    /// Returns whether items in this area need a block number.
    ///
    /// # Example
    ///
    /// ```
    /// use s7_multivar::Area;
    ///
    /// assert!(Area::DB.is_block_addressed());
    /// assert!(!Area::MK.is_block_addressed());
    /// ```
    pub fn is_block_addressed(self) -> bool {
        matches!(self, Area::DB)
    }
}

impl TryFrom<u8> for Area {
    type Error = S7Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0x81 => Ok(Area::PE),
            0x82 => Ok(Area::PA),
            0x83 => Ok(Area::MK),
            0x84 => Ok(Area::DB),
            0x1C => Ok(Area::CT),
            0x1D => Ok(Area::TM),
            _ => Err(S7Error::UnsupportedArea { code }),
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Area::PE => write!(f, "PE"),
            Area::PA => write!(f, "PA"),
            Area::MK => write!(f, "MK"),
            Area::DB => write!(f, "DB"),
            Area::CT => write!(f, "CT"),
            Area::TM => write!(f, "TM"),
        }
    }
}

/// Transfer units ("word lengths") of the S7 protocol.
///
/// Only [`Bit`](WordLen::Bit), [`Byte`](WordLen::Byte),
/// [`Counter`](WordLen::Counter) and [`Timer`](WordLen::Timer) travel on the
/// wire in a multi-variable request; the other kinds are rescaled to bytes
/// by [`normalize`](crate::normalize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordLen {
    /// Single bit.
    Bit,
    /// 8-bit byte.
    Byte,
    /// 8-bit character.
    Char,
    /// 16-bit unsigned word.
    Word,
    /// 16-bit signed integer.
    Int,
    /// 32-bit unsigned double word.
    DWord,
    /// 32-bit signed integer.
    DInt,
    /// 32-bit IEEE float.
    Real,
    /// Counter unit (2 bytes).
    Counter,
    /// Timer unit (2 bytes).
    Timer,
}

impl WordLen {
    /// Returns the wire code of this word length.
    pub fn code(self) -> u8 {
        match self {
            WordLen::Bit => 0x01,
            WordLen::Byte => 0x02,
            WordLen::Char => 0x03,
            WordLen::Word => 0x04,
            WordLen::Int => 0x05,
            WordLen::DWord => 0x06,
            WordLen::DInt => 0x07,
            WordLen::Real => 0x08,
            WordLen::Counter => 0x1C,
            WordLen::Timer => 0x1D,
        }
    }

    /// Returns the size in bytes of one element of this word length.
    pub fn byte_size(self) -> usize {
        match self {
            WordLen::Bit | WordLen::Byte | WordLen::Char => 1,
            WordLen::Word | WordLen::Int | WordLen::Counter | WordLen::Timer => 2,
            WordLen::DWord | WordLen::DInt | WordLen::Real => 4,
        }
    }
}

/// Returns the element size in bytes of a raw word-length code, or 0 if unknown.
///
/// # Example
///
/// ```
/// use s7_multivar::data_size_byte;
///
/// assert_eq!(data_size_byte(0x04), 2);
/// assert_eq!(data_size_byte(0x42), 0);
/// ```
pub fn data_size_byte(code: u8) -> usize {
    WordLen::try_from(code).map_or(0, WordLen::byte_size)
}

impl TryFrom<u8> for WordLen {
    type Error = S7Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0x01 => Ok(WordLen::Bit),
            0x02 => Ok(WordLen::Byte),
            0x03 => Ok(WordLen::Char),
            0x04 => Ok(WordLen::Word),
            0x05 => Ok(WordLen::Int),
            0x06 => Ok(WordLen::DWord),
            0x07 => Ok(WordLen::DInt),
            0x08 => Ok(WordLen::Real),
            0x1C => Ok(WordLen::Counter),
            0x1D => Ok(WordLen::Timer),
            _ => Err(S7Error::UnsupportedWordLen { code }),
        }
    }
}

impl std::fmt::Display for WordLen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WordLen::Bit => "Bit",
            WordLen::Byte => "Byte",
            WordLen::Char => "Char",
            WordLen::Word => "Word",
            WordLen::Int => "Int",
            WordLen::DWord => "DWord",
            WordLen::DInt => "DInt",
            WordLen::Real => "Real",
            WordLen::Counter => "Counter",
            WordLen::Timer => "Timer",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_AREAS: [Area; 6] = [Area::PE, Area::PA, Area::MK, Area::DB, Area::CT, Area::TM];

    #[test]
    fn test_area_codes() {
        assert_eq!(Area::PE.code(), 0x81);
        assert_eq!(Area::PA.code(), 0x82);
        assert_eq!(Area::MK.code(), 0x83);
        assert_eq!(Area::DB.code(), 0x84);
        assert_eq!(Area::CT.code(), 0x1C);
        assert_eq!(Area::TM.code(), 0x1D);
    }

    #[test]
    fn test_area_from_code() {
        for area in ALL_AREAS {
            assert_eq!(Area::try_from(area.code()).unwrap(), area);
        }
        assert!(matches!(
            Area::try_from(0x85),
            Err(S7Error::UnsupportedArea { code: 0x85 })
        ));
    }

    #[test]
    fn test_only_db_is_block_addressed() {
        let blocks: Vec<Area> = ALL_AREAS
            .into_iter()
            .filter(|a| a.is_block_addressed())
            .collect();
        assert_eq!(blocks, vec![Area::DB]);
    }

    #[test]
    fn test_word_len_sizes() {
        assert_eq!(WordLen::Bit.byte_size(), 1);
        assert_eq!(WordLen::Byte.byte_size(), 1);
        assert_eq!(WordLen::Char.byte_size(), 1);
        assert_eq!(WordLen::Word.byte_size(), 2);
        assert_eq!(WordLen::Int.byte_size(), 2);
        assert_eq!(WordLen::DWord.byte_size(), 4);
        assert_eq!(WordLen::DInt.byte_size(), 4);
        assert_eq!(WordLen::Real.byte_size(), 4);
        assert_eq!(WordLen::Counter.byte_size(), 2);
        assert_eq!(WordLen::Timer.byte_size(), 2);
    }

    #[test]
    fn test_word_len_unknown_code() {
        assert!(matches!(
            WordLen::try_from(0x09),
            Err(S7Error::UnsupportedWordLen { code: 0x09 })
        ));
        assert_eq!(data_size_byte(0x00), 0);
        assert_eq!(data_size_byte(0x1D), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Area::DB.to_string(), "DB");
        assert_eq!(Area::TM.to_string(), "TM");
        assert_eq!(WordLen::DInt.to_string(), "DInt");
        assert_eq!(WordLen::Counter.to_string(), "Counter");
    }
}
