//! Conversion of logical item addresses into wire addresses.
//!
//! A multi-variable request only carries bits, bytes, counters and timers.
//! Any wider element type is expressed as a run of bytes, and the start
//! address becomes a bit address:
//!
//! | Requested | Wire word length | Wire start | Wire amount |
//! |-----------|------------------|------------|-------------|
//! | Bit | Bit | `start` | 1 |
//! | Byte/Char/Word/Int/DWord/DInt/Real | Byte | `start * 8` | `amount * size` |
//! | any kind in CT | Counter | `start` | `amount` |
//! | any kind in TM | Timer | `start` | `amount` |
//!
//! # Example
//!
//! ```
//! use s7_multivar::{normalize, Area, WordLen};
//!
//! let wire = normalize(Area::DB, WordLen::Real, 10, 3).unwrap();
//! assert_eq!(wire.word_len, WordLen::Byte);
//! assert_eq!(wire.start, 80);
//! assert_eq!(wire.amount, 12);
//! ```

use crate::area::{Area, WordLen};
use crate::error::{Result, S7Error};

/// Wire-level addressing of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireAddress {
    /// One of `Bit`, `Byte`, `Counter`, `Timer`.
    pub word_len: WordLen,
    /// Start address in wire units (a bit address for `Bit` and `Byte`).
    pub start: u32,
    /// Number of wire units.
    pub amount: u32,
}

impl WireAddress {
    /// Number of buffer bytes the item transfers.
    ///
    /// A bit item occupies one byte of the caller buffer.
    pub fn byte_len(&self) -> usize {
        match self.word_len {
            WordLen::Bit => 1,
            wl => (self.amount as usize).saturating_mul(wl.byte_size()),
        }
    }
}

/// Translates a logical request into wire addressing.
///
/// Counter and timer areas force their own word length. Bit requests always
/// transfer exactly one bit. Every other kind becomes a byte run with the
/// start rescaled to a bit address.
///
/// # Errors
///
/// Returns `InvalidParameter` if the rescaled start or the transferred byte
/// count overflows. A zero `amount` is passed through and transfers nothing.
pub fn normalize(area: Area, word_len: WordLen, start: u32, amount: u32) -> Result<WireAddress> {
    let word_len = match area {
        Area::CT => WordLen::Counter,
        Area::TM => WordLen::Timer,
        _ => word_len,
    };

    match word_len {
        // Only one bit per item on the wire.
        WordLen::Bit => Ok(WireAddress {
            word_len,
            start,
            amount: 1,
        }),
        WordLen::Counter | WordLen::Timer => {
            byte_count(amount, word_len)?;
            Ok(WireAddress {
                word_len,
                start,
                amount,
            })
        }
        _ => {
            let amount = byte_count(amount, word_len)?;
            let start = start
                .checked_mul(8)
                .ok_or_else(|| S7Error::invalid_parameter("start", "bit address overflows"))?;
            Ok(WireAddress {
                word_len: WordLen::Byte,
                start,
                amount,
            })
        }
    }
}

/// Bytes moved for `amount` elements, bounded to `u32` so it fits a `usize`.
fn byte_count(amount: u32, word_len: WordLen) -> Result<u32> {
    amount
        .checked_mul(word_len.byte_size() as u32)
        .ok_or_else(|| S7Error::invalid_parameter("amount", "byte count overflows"))
}
