//! In-memory controller for tests and demos.
//!
//! [`SimulatedPlc`] implements [`Transport`] over plain byte regions, one per
//! area (and per data block), so batches can be exercised without a device.
//!
//! Behavior:
//! - Items in a region that was never created get [`codes::ITEM_NOT_AVAILABLE`]
//! - Items running past the end of their region get [`codes::ADDRESS_OUT_OF_RANGE`]
//! - [`SimulatedPlc::fail_next`] makes the next transaction fail as a whole
//!
//! Counters and timers are stored as 2 bytes per unit.

use std::collections::HashMap;

use tracing::trace;

use crate::area::{Area, WordLen};
use crate::error::{codes, Result, S7Error};
use crate::item::DataItem;
use crate::transport::Transport;

/// Default size of the non-block areas created by [`SimulatedPlc::new`].
pub const DEFAULT_AREA_SIZE: usize = 256;

/// An in-memory S7 controller.
#[derive(Debug, Clone)]
pub struct SimulatedPlc {
    regions: HashMap<(Area, u16), Vec<u8>>,
    fail_next: Option<i32>,
    reads: usize,
    writes: usize,
}

impl SimulatedPlc {
    /// Creates a controller with PE, PA, CT and TM regions and no data blocks.
    ///
    /// MK is left out so unknown-region handling can be observed; add it
    /// with [`add_area`](Self::add_area).
    pub fn new() -> Self {
        let mut plc = Self::empty();
        for area in [Area::PE, Area::PA, Area::CT, Area::TM] {
            plc.add_area(area, DEFAULT_AREA_SIZE);
        }
        plc
    }

    /// Creates a controller without any region.
    pub fn empty() -> Self {
        Self {
            regions: HashMap::new(),
            fail_next: None,
            reads: 0,
            writes: 0,
        }
    }

    /// Creates (or resets) a zeroed non-block area of `size` bytes.
    pub fn add_area(&mut self, area: Area, size: usize) {
        self.regions.insert((area, 0), vec![0; size]);
    }

    /// Creates (or resets) a zeroed data block of `size` bytes.
    pub fn add_db(&mut self, number: u16, size: usize) {
        self.regions.insert((Area::DB, number), vec![0; size]);
    }

    /// Copies `bytes` into a region at byte offset `offset`.
    ///
    /// Returns `false` if the region does not exist or is too short.
    pub fn write_bytes(&mut self, area: Area, db_number: u16, offset: usize, bytes: &[u8]) -> bool {
        match self
            .region_mut(area, db_number)
            .and_then(|r| r.get_mut(offset..offset + bytes.len()))
        {
            Some(target) => {
                target.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }

    /// Returns `len` bytes of a region starting at byte offset `offset`.
    pub fn read_bytes(&self, area: Area, db_number: u16, offset: usize, len: usize) -> Option<&[u8]> {
        self.regions
            .get(&region_key(area, db_number))
            .and_then(|r| r.get(offset..offset + len))
    }

    /// Makes the next read or write fail with `code` without touching memory.
    pub fn fail_next(&mut self, code: i32) {
        self.fail_next = Some(code);
    }

    /// Number of read transactions served.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Number of write transactions served.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn region_mut(&mut self, area: Area, db_number: u16) -> Option<&mut Vec<u8>> {
        self.regions.get_mut(&region_key(area, db_number))
    }

    fn take_failure(&mut self) -> Result<()> {
        match self.fail_next.take() {
            Some(code) => Err(S7Error::transport(code)),
            None => Ok(()),
        }
    }

    fn transfer(&mut self, item: &mut DataItem<'_>, write: bool) -> i32 {
        let Some(region) = self.region_mut(item.area, item.db_number) else {
            return codes::ITEM_NOT_AVAILABLE;
        };

        let (offset, len) = match item.word_len {
            WordLen::Bit | WordLen::Byte => ((item.start / 8) as usize, item.data.len()),
            _ => (item.start as usize * 2, item.data.len()),
        };
        let Some(target) = region.get_mut(offset..offset + len) else {
            return codes::ADDRESS_OUT_OF_RANGE;
        };

        match (item.word_len, write) {
            (WordLen::Bit, false) => {
                let bit = item.start % 8;
                item.data[0] = (target[0] >> bit) & 1;
            }
            (WordLen::Bit, true) => {
                let mask = 1u8 << (item.start % 8);
                if item.data[0] & 1 != 0 {
                    target[0] |= mask;
                } else {
                    target[0] &= !mask;
                }
            }
            (_, false) => item.data.copy_from_slice(target),
            (_, true) => target.copy_from_slice(item.data),
        }
        0
    }
}

impl Default for SimulatedPlc {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SimulatedPlc {
    fn read_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()> {
        self.reads += 1;
        self.take_failure()?;
        for item in items.iter_mut() {
            item.result = self.transfer(item, false);
            trace!(area = %item.area, start = item.start, result = item.result, "simulated read");
        }
        Ok(())
    }

    fn write_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()> {
        self.writes += 1;
        self.take_failure()?;
        for item in items.iter_mut() {
            item.result = self.transfer(item, true);
            trace!(area = %item.area, start = item.start, result = item.result, "simulated write");
        }
        Ok(())
    }
}

fn region_key(area: Area, db_number: u16) -> (Area, u16) {
    if area.is_block_addressed() {
        (area, db_number)
    } else {
        (area, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::WireAddress;

    fn item<'a>(area: Area, db: u16, word_len: WordLen, start: u32, data: &'a mut [u8]) -> DataItem<'a> {
        let amount = data.len() as u32 / word_len.byte_size() as u32;
        DataItem::new(
            area,
            db,
            WireAddress {
                word_len,
                start,
                amount,
            },
            data,
        )
    }

    #[test]
    fn test_byte_read() {
        let mut plc = SimulatedPlc::new();
        plc.add_db(2, 8);
        assert!(plc.write_bytes(Area::DB, 2, 3, &[0xDE, 0xAD]));

        let mut buf = [0u8; 2];
        let mut items = [item(Area::DB, 2, WordLen::Byte, 24, &mut buf)];
        plc.read_multi_vars(&mut items).unwrap();
        assert_eq!(items[0].result, 0);
        drop(items);
        assert_eq!(buf, [0xDE, 0xAD]);
        assert_eq!(plc.reads(), 1);
    }

    #[test]
    fn test_bit_write_and_read() {
        let mut plc = SimulatedPlc::new();
        let mut on = [1u8];
        let mut items = [item(Area::PA, 0, WordLen::Bit, 13, &mut on)];
        plc.write_multi_vars(&mut items).unwrap();
        assert_eq!(plc.read_bytes(Area::PA, 0, 1, 1).unwrap(), &[0b0010_0000]);

        let mut back = [0u8];
        let mut items = [item(Area::PA, 0, WordLen::Bit, 13, &mut back)];
        plc.read_multi_vars(&mut items).unwrap();
        drop(items);
        assert_eq!(back, [1]);
    }

    #[test]
    fn test_counter_addressing() {
        let mut plc = SimulatedPlc::new();
        plc.write_bytes(Area::CT, 0, 6, &[0x00, 0x42]);

        let mut buf = [0u8; 2];
        let mut items = [item(Area::CT, 0, WordLen::Counter, 3, &mut buf)];
        plc.read_multi_vars(&mut items).unwrap();
        drop(items);
        assert_eq!(buf, [0x00, 0x42]);
    }

    #[test]
    fn test_missing_region() {
        let mut plc = SimulatedPlc::new();
        let mut buf = [0u8; 1];
        let mut items = [item(Area::DB, 9, WordLen::Byte, 0, &mut buf)];
        plc.read_multi_vars(&mut items).unwrap();
        assert_eq!(items[0].result, codes::ITEM_NOT_AVAILABLE);
    }

    #[test]
    fn test_out_of_range() {
        let mut plc = SimulatedPlc::new();
        plc.add_db(1, 4);
        let mut buf = [0u8; 4];
        let mut items = [item(Area::DB, 1, WordLen::Byte, 8, &mut buf)];
        plc.read_multi_vars(&mut items).unwrap();
        assert_eq!(items[0].result, codes::ADDRESS_OUT_OF_RANGE);
    }

    #[test]
    fn test_fail_next_is_one_shot() {
        let mut plc = SimulatedPlc::new();
        plc.fail_next(codes::TCP_NOT_CONNECTED);
        let mut buf = [0u8; 1];
        let mut items = [item(Area::PE, 0, WordLen::Byte, 0, &mut buf)];

        let err = plc.read_multi_vars(&mut items).unwrap_err();
        assert_eq!(err.code(), codes::TCP_NOT_CONNECTED);
        assert_eq!(items[0].result, codes::ITEM_NOT_AVAILABLE);

        plc.read_multi_vars(&mut items).unwrap();
        assert_eq!(items[0].result, 0);
        assert_eq!(plc.reads(), 2);
    }

    #[test]
    fn test_db_number_ignored_outside_db() {
        let mut plc = SimulatedPlc::new();
        plc.write_bytes(Area::PE, 0, 0, &[0x5A]);
        let mut buf = [0u8; 1];
        let mut items = [item(Area::PE, 77, WordLen::Byte, 0, &mut buf)];
        plc.read_multi_vars(&mut items).unwrap();
        drop(items);
        assert_eq!(buf, [0x5A]);
    }
}
