//! Transport boundary for multi-variable transactions.
//!
//! This module defines the [`Transport`] trait which the batching layer calls
//! exactly once per transaction. The transport is completely separated from
//! the batching layer: it owns the connection, serializes the items into a
//! request PDU and parses the response. The batching layer only knows about
//! items and status codes.
//!
//! # Contract
//!
//! - Never touch more items than the slice holds.
//! - On `Ok(())`, set [`DataItem::result`] for every item (0 = success) and,
//!   for successful reads, fill [`DataItem::data`].
//! - On overall failure, return an error (usually [`S7Error::Transport`]);
//!   item results are then best-effort and callers should not rely on them.
//!
//! # Helpers
//!
//! [`item_result_from_cpu`] and [`cpu_error`] translate controller return
//! codes into client status codes.
//!
//! [`S7Error::Transport`]: crate::S7Error::Transport

use crate::error::{codes, Result};
use crate::item::DataItem;

/// Per-item return code the controller sends for a successful item.
pub const CPU_ITEM_OK: u8 = 0xFF;

/// A client able to carry a batch of items in one request.
///
/// # Example
///
/// ```
/// use s7_multivar::{DataItem, Result, Transport};
///
/// /// Answers every read with zeros.
/// struct Zeros;
///
/// impl Transport for Zeros {
///     fn read_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()> {
///         for item in items.iter_mut() {
///             item.data.fill(0);
///             item.result = 0;
///         }
///         Ok(())
///     }
///
///     fn write_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()> {
///         items.iter_mut().for_each(|item| item.result = 0);
///         Ok(())
///     }
/// }
/// ```
pub trait Transport {
    /// Reads all items in one request.
    fn read_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()>;

    /// Writes all items in one request.
    fn write_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn read_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()> {
        (**self).read_multi_vars(items)
    }

    fn write_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()> {
        (**self).write_multi_vars(items)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn read_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()> {
        (**self).read_multi_vars(items)
    }

    fn write_multi_vars(&mut self, items: &mut [DataItem<'_>]) -> Result<()> {
        (**self).write_multi_vars(items)
    }
}

/// Maps a per-item return byte from the controller to a client status code.
///
/// # Example
///
/// ```
/// use s7_multivar::{codes, item_result_from_cpu, CPU_ITEM_OK};
///
/// assert_eq!(item_result_from_cpu(CPU_ITEM_OK), 0);
/// assert_eq!(item_result_from_cpu(0x05), codes::ADDRESS_OUT_OF_RANGE);
/// ```
pub fn item_result_from_cpu(code: u8) -> i32 {
    if code == CPU_ITEM_OK {
        0
    } else {
        cpu_error(u16::from(code))
    }
}

/// Maps a controller error code to a client status code.
///
/// Unknown non-zero codes map to [`codes::FUNCTION_REFUSED`].
pub fn cpu_error(code: u16) -> i32 {
    match code {
        0 => 0,
        0x0005 => codes::ADDRESS_OUT_OF_RANGE,
        0x0006 => codes::INVALID_TRANSPORT_SIZE,
        0x0007 => codes::WRITE_DATA_SIZE_MISMATCH,
        0x000A | 0xD209 => codes::ITEM_NOT_AVAILABLE,
        0x8104 => codes::FUNCTION_NOT_AVAILABLE,
        0x8500 => codes::SIZE_OVER_PDU,
        0xDC01 => codes::INVALID_VALUE,
        0xD241 => codes::NEED_PASSWORD,
        0xD602 => codes::INVALID_PASSWORD,
        0xD604 | 0xD605 => codes::NO_PASSWORD_TO_SET_OR_CLEAR,
        _ => codes::FUNCTION_REFUSED,
    }
}
