//! Transport-facing item descriptors.

use crate::area::{Area, WordLen};
use crate::error::codes;
use crate::normalize::WireAddress;

/// One registered item of a multi-variable transaction.
///
/// Addressing is already normalized and `data` is the exact window of the
/// caller buffer the transport reads into or writes from. The transport sets
/// `result` for every item when the transaction succeeds.
#[derive(Debug)]
pub struct DataItem<'a> {
    /// Memory area.
    pub area: Area,
    /// Wire word length (`Bit`, `Byte`, `Counter` or `Timer`).
    pub word_len: WordLen,
    /// Data block number, meaningful only for [`Area::DB`].
    pub db_number: u16,
    /// Wire start address.
    pub start: u32,
    /// Wire amount.
    pub amount: u32,
    /// Bound window of caller storage.
    pub data: &'a mut [u8],
    /// Per-item status, [`codes::ITEM_NOT_AVAILABLE`] until the transport sets it.
    pub result: i32,
}

impl<'a> DataItem<'a> {
    pub(crate) fn new(area: Area, db_number: u16, wire: WireAddress, data: &'a mut [u8]) -> Self {
        Self {
            area,
            word_len: wire.word_len,
            db_number,
            start: wire.start,
            amount: wire.amount,
            data,
            result: codes::ITEM_NOT_AVAILABLE,
        }
    }

    /// Returns the wire addressing of this item.
    pub fn wire_address(&self) -> WireAddress {
        WireAddress {
            word_len: self.word_len,
            start: self.start,
            amount: self.amount,
        }
    }
}
