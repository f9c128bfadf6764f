//! Batched multi-variable reads and writes.
//!
//! This module provides [`MultiVar`], which collects up to [`MAX_VARS`] items
//! scattered across controller memory and transfers them in a single request.
//!
//! # Overview
//!
//! A batch goes through three steps:
//! - Registration: each `add*` call normalizes the item address and binds a
//!   window of the caller's buffer to it
//! - Transaction: [`MultiVar::read`] or [`MultiVar::write`] calls the
//!   transport exactly once with every registered item
//! - Cleanup: the batch is emptied on every exit path, so each transaction
//!   starts from an empty registry
//!
//! # Example
//!
//! ```
//! use s7_multivar::mock::SimulatedPlc;
//! use s7_multivar::{Area, MultiVar, WordLen};
//!
//! let mut plc = SimulatedPlc::new();
//! plc.add_db(1, 16);
//! plc.write_bytes(Area::DB, 1, 2, &[0x01, 0x2C]);
//!
//! let mut speed = [0u8; 2];
//! let mut flags = [0u8; 1];
//!
//! let mut batch = MultiVar::new(&mut plc);
//! // DB1.DBW2
//! batch.add(Area::DB, WordLen::Word, 1, 2, 1, &mut speed)?;
//! batch.add(Area::MK, WordLen::Byte, 0, 0, 1, &mut flags)?;
//! batch.read()?;
//!
//! let results = *batch.results();
//! assert_eq!(results[0], 0);
//! assert_eq!(u16::from_be_bytes(speed), 300);
//! # Ok::<(), s7_multivar::S7Error>(())
//! ```
//!
//! # Buffer lifetime
//!
//! Registered buffers stay mutably borrowed for as long as the `MultiVar`
//! that holds them is in use, not only until the transaction ends. The
//! borrow checker guarantees they are neither moved nor freed while the
//! transport may touch them.
//!
//! To inspect the buffers and then poll again, build one `MultiVar` per
//! cycle over `&mut transport`. Creating a batch allocates a single
//! `Vec` of [`MAX_VARS`] items and nothing else:
//!
//! ```
//! use s7_multivar::mock::SimulatedPlc;
//! use s7_multivar::{Area, MultiVar, WordLen};
//!
//! let mut plc = SimulatedPlc::new();
//! let mut level = [0u8; 2];
//!
//! for _ in 0..3 {
//!     let mut batch = MultiVar::new(&mut plc);
//!     batch.add(Area::PE, WordLen::Word, 0, 0, 1, &mut level)?;
//!     batch.read()?;
//!     drop(batch);
//!     assert_eq!(level, [0, 0]);
//! }
//! assert_eq!(plc.reads(), 3);
//! # Ok::<(), s7_multivar::S7Error>(())
//! ```
//!
//! # Thread Safety
//!
//! A `MultiVar` holds `&mut` borrows of its buffers and drives its transport
//! through `&mut self`; concurrent batches need separate instances.

use std::mem::size_of;

use bytemuck::Pod;
use tracing::{debug, trace, warn};

use crate::area::{Area, WordLen};
use crate::error::{codes, Result, S7Error};
use crate::item::DataItem;
use crate::normalize::normalize;
use crate::tag::Tag;
use crate::transport::Transport;

/// Maximum number of items one multi-variable request can carry.
pub const MAX_VARS: usize = 20;

/// Configuration for a [`MultiVar`] batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Maximum number of items per transaction (1 to [`MAX_VARS`]).
    pub max_vars: usize,
}

impl BatchConfig {
    /// Creates a configuration allowing [`MAX_VARS`] items.
    pub fn new() -> Self {
        Self { max_vars: MAX_VARS }
    }

    /// Sets a lower item limit, for controllers with a small PDU.
    ///
    /// # Example
    ///
    /// ```
    /// use s7_multivar::BatchConfig;
    ///
    /// let config = BatchConfig::new().with_max_vars(8);
    /// assert_eq!(config.max_vars, 8);
    /// ```
    pub fn with_max_vars(mut self, max_vars: usize) -> Self {
        self.max_vars = max_vars;
        self
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Read,
    Write,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Read => write!(f, "read"),
            Direction::Write => write!(f, "write"),
        }
    }
}

/// Empties the registry when dropped, including during unwinding.
struct ClearGuard<'g, 'a> {
    items: &'g mut Vec<DataItem<'a>>,
}

impl Drop for ClearGuard<'_, '_> {
    fn drop(&mut self) {
        self.items.clear();
    }
}

/// A batch of variables transferred in one request.
///
/// # Example
///
/// ```
/// use s7_multivar::mock::SimulatedPlc;
/// use s7_multivar::{Area, MultiVar, Tag, WordLen};
///
/// let mut plc = SimulatedPlc::new();
/// plc.add_db(5, 8);
///
/// let setpoint = [21.5f32.to_bits().to_be()];
/// let mut out = setpoint;
///
/// let mut batch = MultiVar::new(&mut plc);
/// // DB5.DBD4
/// batch.add_tag(&Tag::new(Area::DB, 5, 4, 1, WordLen::Real), &mut out)?;
/// batch.write()?;
/// assert!(batch.is_empty());
/// # drop(batch);
/// assert_eq!(plc.read_bytes(Area::DB, 5, 4, 4).unwrap(), 21.5f32.to_be_bytes());
/// # Ok::<(), s7_multivar::S7Error>(())
/// ```
pub struct MultiVar<'a, T> {
    transport: T,
    items: Vec<DataItem<'a>>,
    max_vars: usize,
    results: [i32; MAX_VARS],
}

impl<'a, T: Transport> MultiVar<'a, T> {
    /// Creates an empty batch over `transport` with the default configuration.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            items: Vec::with_capacity(MAX_VARS),
            max_vars: MAX_VARS,
            results: [codes::ITEM_NOT_AVAILABLE; MAX_VARS],
        }
    }

    /// Creates an empty batch with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `max_vars` is 0 or exceeds [`MAX_VARS`].
    pub fn with_config(transport: T, config: BatchConfig) -> Result<Self> {
        if config.max_vars == 0 || config.max_vars > MAX_VARS {
            return Err(S7Error::invalid_parameter(
                "max_vars",
                format!("must be between 1 and {}", MAX_VARS),
            ));
        }
        let mut batch = Self::new(transport);
        batch.max_vars = config.max_vars;
        Ok(batch)
    }

    /// Registers an item backed by `buffer` from its first element.
    ///
    /// # Arguments
    ///
    /// * `area` - Memory area
    /// * `word_len` - Element kind
    /// * `db_number` - Data block number (ignored outside [`Area::DB`])
    /// * `start` - Start byte address within the area (an absolute bit address
    ///   such as `8 * byte + bit` for [`WordLen::Bit`], the counter or timer
    ///   number in [`Area::CT`] and [`Area::TM`])
    /// * `amount` - Number of elements of `word_len`
    /// * `buffer` - Storage the item is read into or written from
    ///
    /// # Errors
    ///
    /// See [`add_at`](Self::add_at).
    pub fn add<E: Pod>(
        &mut self,
        area: Area,
        word_len: WordLen,
        db_number: u16,
        start: u32,
        amount: u32,
        buffer: &'a mut [E],
    ) -> Result<()> {
        self.add_at(area, word_len, db_number, start, amount, buffer, 0)
    }

    /// Registers an item backed by `buffer` starting `offset` elements in.
    ///
    /// `start` is a controller address as in [`add`](Self::add); `offset`
    /// only selects where the data lands in `buffer`. Nothing is registered
    /// when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The batch is full (`CapacityExceeded`)
    /// - The address cannot be normalized (`InvalidParameter`)
    /// - The buffer cannot hold the transferred bytes after `offset`
    ///   (`BufferTooSmall`)
    #[allow(clippy::too_many_arguments)]
    pub fn add_at<E: Pod>(
        &mut self,
        area: Area,
        word_len: WordLen,
        db_number: u16,
        start: u32,
        amount: u32,
        buffer: &'a mut [E],
        offset: usize,
    ) -> Result<()> {
        if self.items.len() >= self.max_vars {
            return Err(S7Error::CapacityExceeded {
                capacity: self.max_vars,
            });
        }

        let wire = normalize(area, word_len, start, amount)?;
        let data = bind(buffer, offset, wire.byte_len())?;

        trace!(
            %area,
            db_number,
            word_len = %wire.word_len,
            start = wire.start,
            amount = wire.amount,
            "item registered"
        );
        self.items.push(DataItem::new(area, db_number, wire, data));
        Ok(())
    }

    /// Registers a tag backed by `buffer` from its first element.
    pub fn add_tag<E: Pod>(&mut self, tag: &Tag, buffer: &'a mut [E]) -> Result<()> {
        self.add_tag_at(tag, buffer, 0)
    }

    /// Registers a tag backed by `buffer` starting `offset` elements in.
    pub fn add_tag_at<E: Pod>(
        &mut self,
        tag: &Tag,
        buffer: &'a mut [E],
        offset: usize,
    ) -> Result<()> {
        self.add_at(
            tag.area,
            tag.word_len,
            tag.db_number,
            tag.start,
            tag.elements,
            buffer,
            offset,
        )
    }

    /// Reads every registered item in one request.
    ///
    /// On success, [`results`](Self::results) holds each item's status in
    /// registration order. The batch is empty afterwards in every case.
    ///
    /// # Errors
    ///
    /// Returns `FunctionRefused` without contacting the transport if no item
    /// is registered, or the transport's error unmodified.
    pub fn read(&mut self) -> Result<()> {
        self.transact(Direction::Read)
    }

    /// Writes every registered item in one request.
    ///
    /// Same contract as [`read`](Self::read).
    pub fn write(&mut self) -> Result<()> {
        self.transact(Direction::Write)
    }

    fn transact(&mut self, direction: Direction) -> Result<()> {
        let guard = ClearGuard {
            items: &mut self.items,
        };
        self.results = [codes::ITEM_NOT_AVAILABLE; MAX_VARS];

        if guard.items.is_empty() {
            debug!(%direction, "multi-var transaction refused: no items");
            return Err(S7Error::FunctionRefused);
        }

        debug!(%direction, items = guard.items.len(), "multi-var transaction");
        let outcome = match direction {
            Direction::Read => self.transport.read_multi_vars(guard.items.as_mut_slice()),
            Direction::Write => self.transport.write_multi_vars(guard.items.as_mut_slice()),
        };

        match outcome {
            Ok(()) => {
                for (slot, item) in self.results.iter_mut().zip(guard.items.iter()) {
                    *slot = item.result;
                }
                Ok(())
            }
            Err(e) => {
                warn!(%direction, code = e.code(), "multi-var transaction failed: {}", e);
                Err(e)
            }
        }
    }

    /// Releases every registered item. Does nothing on an empty batch.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether no item is registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the maximum number of items per transaction.
    pub fn capacity(&self) -> usize {
        self.max_vars
    }

    /// Returns the registered items.
    pub fn items(&self) -> &[DataItem<'a>] {
        &self.items
    }

    /// Returns per-item statuses of the last transaction.
    ///
    /// Slots beyond the items of the last successful transaction, and all
    /// slots after a failed one, hold [`codes::ITEM_NOT_AVAILABLE`].
    pub fn results(&self) -> &[i32; MAX_VARS] {
        &self.results
    }

    /// Returns the status of one item of the last transaction.
    pub fn result(&self, index: usize) -> Option<i32> {
        self.results.get(index).copied()
    }

    /// Returns a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the batch and returns the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T> std::fmt::Debug for MultiVar<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiVar")
            .field("items", &self.items.len())
            .field("max_vars", &self.max_vars)
            .finish()
    }
}

/// Binds `required` bytes of `buffer` starting `offset` elements in.
fn bind<E: Pod>(buffer: &mut [E], offset: usize, required: usize) -> Result<&mut [u8]> {
    let bytes: &mut [u8] = bytemuck::try_cast_slice_mut(buffer)
        .map_err(|e| S7Error::invalid_parameter("buffer", format!("{:?}", e)))?;
    let begin = offset
        .checked_mul(size_of::<E>())
        .ok_or_else(|| S7Error::invalid_parameter("offset", "byte offset overflows"))?;

    let available = bytes.len().saturating_sub(begin);
    if available < required {
        return Err(S7Error::BufferTooSmall {
            required,
            available,
        });
    }
    Ok(&mut bytes[begin..begin + required])
}
