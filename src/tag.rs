//! Packed variable descriptors.

use crate::area::{Area, WordLen};
use crate::error::Result;

/// A variable reference: where it lives and how many elements of which kind.
///
/// # Example
///
/// ```
/// use s7_multivar::{Area, Tag, WordLen};
///
/// // DB10.DBW4, two words
/// let tag = Tag::new(Area::DB, 10, 4, 2, WordLen::Word);
/// assert_eq!(tag.to_string(), "DB10 Word 4 x2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// Memory area.
    pub area: Area,
    /// Data block number, ignored outside [`Area::DB`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub db_number: u16,
    /// Start byte address (an absolute bit address for [`WordLen::Bit`], the
    /// counter or timer number in [`Area::CT`] and [`Area::TM`]).
    pub start: u32,
    /// Number of elements.
    pub elements: u32,
    /// Element kind.
    pub word_len: WordLen,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(area: Area, db_number: u16, start: u32, elements: u32, word_len: WordLen) -> Self {
        Self {
            area,
            db_number,
            start,
            elements,
            word_len,
        }
    }

    /// Creates a tag from raw wire codes.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedArea` or `UnsupportedWordLen` for unknown codes.
    ///
    /// # Example
    ///
    /// ```
    /// use s7_multivar::{Area, S7Error, Tag, WordLen};
    ///
    /// let tag = Tag::from_codes(0x84, 1, 0, 4, 0x02).unwrap();
    /// assert_eq!(tag.area, Area::DB);
    /// assert_eq!(tag.word_len, WordLen::Byte);
    ///
    /// assert!(matches!(
    ///     Tag::from_codes(0x84, 1, 0, 4, 0x42),
    ///     Err(S7Error::UnsupportedWordLen { code: 0x42 })
    /// ));
    /// ```
    pub fn from_codes(
        area: u8,
        db_number: u16,
        start: u32,
        elements: u32,
        word_len: u8,
    ) -> Result<Self> {
        Ok(Self::new(
            Area::try_from(area)?,
            db_number,
            start,
            elements,
            WordLen::try_from(word_len)?,
        ))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.area.is_block_addressed() {
            write!(f, "{}{}", self.area, self.db_number)?;
        } else {
            write!(f, "{}", self.area)?;
        }
        write!(f, " {} {} x{}", self.word_len, self.start, self.elements)
    }
}

/// Parses a JSON array of tags.
///
/// # Example
///
/// ```
/// use s7_multivar::{parse_tags, Area, WordLen};
///
/// let tags = parse_tags(r#"[
///     {"area": "DB", "db_number": 3, "start": 0, "elements": 2, "word_len": "Int"},
///     {"area": "MK", "start": 17, "elements": 1, "word_len": "Bit"}
/// ]"#).unwrap();
/// assert_eq!(tags[0].area, Area::DB);
/// assert_eq!(tags[1].word_len, WordLen::Bit);
/// assert_eq!(tags[1].db_number, 0);
/// ```
#[cfg(feature = "serde")]
pub fn parse_tags(json: &str) -> Result<Vec<Tag>> {
    serde_json::from_str(json)
        .map_err(|e| crate::error::S7Error::invalid_parameter("tags", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::S7Error;

    #[test]
    fn test_display_block_addressed() {
        let tag = Tag::new(Area::DB, 7, 12, 1, WordLen::Real);
        assert_eq!(tag.to_string(), "DB7 Real 12 x1");
    }

    #[test]
    fn test_display_plain_area() {
        let tag = Tag::new(Area::MK, 0, 35, 1, WordLen::Bit);
        assert_eq!(tag.to_string(), "MK Bit 35 x1");
    }

    #[test]
    fn test_from_codes_unknown_area() {
        assert!(matches!(
            Tag::from_codes(0x99, 0, 0, 1, 0x02),
            Err(S7Error::UnsupportedArea { code: 0x99 })
        ));
    }

    #[test]
    fn test_from_codes_counter() {
        let tag = Tag::from_codes(0x1C, 0, 5, 2, 0x1C).unwrap();
        assert_eq!(tag, Tag::new(Area::CT, 0, 5, 2, WordLen::Counter));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_tags_rejects_unknown_word_len() {
        let err = parse_tags(r#"[{"area": "DB", "start": 0, "elements": 1, "word_len": "Quad"}]"#)
            .unwrap_err();
        assert!(matches!(err, S7Error::InvalidParameter { .. }));
    }
}
