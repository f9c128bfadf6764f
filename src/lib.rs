//! # S7 Multi-Variable Transfers
//!
//! A Rust library for reading and writing many scattered variables of a Siemens S7
//! PLC in a single request.
//!
//! Round-trip latency to a controller dominates throughput. Instead of one request
//! per variable, a [`MultiVar`] batch collects up to [`MAX_VARS`] items from
//! different memory areas and hands them to the transport in one go.
//!
//! This is a **batching-only** library: the socket layer that encodes the request
//! PDU lives behind the [`Transport`] trait. Each `read`/`write` produces exactly
//! one transport call. No automatic retries, caching, or reconnection.
//!
//! ## Features
//!
//! - **Bounded** — at most [`MAX_VARS`] items per transaction, enforced at registration
//! - **Wire-accurate** — every item address is normalized to bit, byte, counter or
//!   timer granularity before it reaches the transport
//! - **Borrow-checked buffers** — caller storage is bound for exactly the lifetime of
//!   the batch, and released on every exit path
//! - **No panics** — all errors returned as `Result<T, S7Error>`
//! - **Utility functions** — big-endian accessors for S7 data in byte buffers
//!
//! ## Quick Start
//!
//! ```
//! use s7_multivar::mock::SimulatedPlc;
//! use s7_multivar::utils::get_int_at;
//! use s7_multivar::{Area, MultiVar, WordLen};
//!
//! fn main() -> s7_multivar::Result<()> {
//!     let mut plc = SimulatedPlc::new();
//!     plc.add_db(10, 32);
//!     plc.write_bytes(Area::DB, 10, 4, &[0xFF, 0x9C]);
//!
//!     let mut motor_on = [0u8; 1];
//!     let mut temperature = [0u8; 2];
//!     let mut cycles = [0u16; 1];
//!
//!     let mut batch = MultiVar::new(&mut plc);
//!     // I0.3
//!     batch.add(Area::PE, WordLen::Bit, 0, 3, 1, &mut motor_on)?;
//!     // DB10.DBW4
//!     batch.add(Area::DB, WordLen::Int, 10, 4, 1, &mut temperature)?;
//!     // C5
//!     batch.add(Area::CT, WordLen::Counter, 0, 5, 1, &mut cycles)?;
//!     batch.read()?;
//!
//!     assert_eq!(&batch.results()[..3], &[0, 0, 0]);
//!     assert_eq!(get_int_at(&temperature, 0)?, -100);
//!     Ok(())
//! }
//! ```
//!
//! ## Memory Areas
//!
//! | Area | Description | Block-addressed |
//! |------|-------------|:---------------:|
//! | [`Area::PE`] | Process inputs | ✗ |
//! | [`Area::PA`] | Process outputs | ✗ |
//! | [`Area::MK`] | Merkers (flags) | ✗ |
//! | [`Area::DB`] | Data blocks | ✓ |
//! | [`Area::CT`] | Counters | ✗ |
//! | [`Area::TM`] | Timers | ✗ |
//!
//! ## Address Normalization
//!
//! Item start addresses are byte addresses, as in S7 notation: `DB10.DBD12`
//! is start 12 whatever the element type. Bits use an absolute bit address
//! (`M2.1` is start 17), counters and timers their number.
//!
//! A multi-variable request only carries bits, bytes, counters and timers.
//! [`normalize`] rewrites every other element type as a byte run:
//!
//! ```
//! use s7_multivar::{normalize, Area, WordLen};
//!
//! // Two REALs at DB byte 12 become 8 bytes starting at bit 96
//! let wire = normalize(Area::DB, WordLen::Real, 12, 2)?;
//! assert_eq!((wire.word_len, wire.start, wire.amount), (WordLen::Byte, 96, 8));
//!
//! // Bits always travel one at a time
//! let wire = normalize(Area::MK, WordLen::Bit, 17, 5)?;
//! assert_eq!(wire.amount, 1);
//! # Ok::<(), s7_multivar::S7Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Registration errors are reported immediately by the `add*` methods. A
//! transaction returns the transport's error unmodified, and the per-item
//! statuses in [`MultiVar::results`] are only meaningful after a successful one.
//!
//! ```
//! use s7_multivar::mock::SimulatedPlc;
//! use s7_multivar::{codes, Area, MultiVar, S7Error, WordLen};
//!
//! let mut plc = SimulatedPlc::new();
//! plc.fail_next(codes::TCP_RECEIVE_TIMEOUT);
//!
//! let mut buf = [0u8; 4];
//! let mut batch = MultiVar::new(&mut plc);
//! batch.add(Area::PA, WordLen::Byte, 0, 0, 4, &mut buf)?;
//!
//! match batch.read() {
//!     Ok(()) => println!("results: {:?}", batch.results()),
//!     Err(S7Error::FunctionRefused) => println!("nothing to read"),
//!     Err(e) => println!("error 0x{:08X}: {}", e.code(), e),
//! }
//! assert!(batch.is_empty());
//! # Ok::<(), S7Error>(())
//! ```
//!
//! ## Logging
//!
//! The library emits [`tracing`] events (`trace` per item, `debug` per
//! transaction, `warn` on transport failure). Install any subscriber to see them.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod area;
mod error;
mod item;
pub mod mock;
mod multivar;
mod normalize;
mod tag;
mod transport;
pub mod utils;

// Public re-exports
pub use area::{data_size_byte, Area, WordLen};
pub use error::{codes, error_text, status_code, Result, S7Error};
pub use item::DataItem;
pub use multivar::{BatchConfig, MultiVar, MAX_VARS};
pub use normalize::{normalize, WireAddress};
#[cfg(feature = "serde")]
pub use tag::parse_tags;
pub use tag::Tag;
pub use transport::{cpu_error, item_result_from_cpu, Transport, CPU_ITEM_OK};
