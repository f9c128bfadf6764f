//! Example: reading and writing a mixed batch in one request
//!
//! Run with: cargo run --example batch_read
//!
//! Uses the in-memory `SimulatedPlc`; swap in any `Transport` implementation
//! to talk to a real controller. Set `RUST_LOG=s7_multivar=trace` to see
//! every registered item.

use s7_multivar::mock::SimulatedPlc;
use s7_multivar::utils::{format_hex, get_bit_at, get_int_at, get_real_at, set_real_at};
use s7_multivar::{error_text, Area, MultiVar, Tag, WordLen};
use tracing_subscriber::EnvFilter;

fn main() -> s7_multivar::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut plc = SimulatedPlc::new();
    plc.add_db(100, 64);
    plc.add_area(Area::MK, 16);

    // =========================================================================
    // Write a setpoint, a status word and a flag in one request
    // =========================================================================

    let mut setpoint = [0u8; 4];
    set_real_at(&mut setpoint, 0, 72.5)?;
    let mut status = (-15i16).to_be_bytes();
    let mut flag = [1u8];

    let mut batch = MultiVar::new(&mut plc);
    batch.add(Area::DB, WordLen::Real, 100, 8, 1, &mut setpoint)?;
    batch.add(Area::DB, WordLen::Int, 100, 0, 1, &mut status)?;
    batch.add(Area::MK, WordLen::Bit, 0, 3, 1, &mut flag)?;
    batch.write()?;
    println!("write results: {:?}", &batch.results()[..3]);

    // =========================================================================
    // Read everything back, plus a few items that cannot be resolved
    // =========================================================================

    let tags = [
        Tag::new(Area::DB, 100, 0, 12, WordLen::Byte),
        Tag::new(Area::MK, 0, 3, 1, WordLen::Bit),
        Tag::new(Area::DB, 7, 0, 1, WordLen::Word),
        Tag::new(Area::DB, 100, 64, 1, WordLen::DInt),
    ];
    let mut block = [0u8; 12];
    let mut bit = [0u8; 1];
    let mut missing = [0u8; 2];
    let mut out_of_range = [0u8; 4];

    let mut batch = MultiVar::new(&mut plc);
    batch.add_tag(&tags[0], &mut block)?;
    batch.add_tag(&tags[1], &mut bit)?;
    batch.add_tag(&tags[2], &mut missing)?;
    batch.add_tag(&tags[3], &mut out_of_range)?;
    batch.read()?;

    for (tag, result) in tags.iter().zip(batch.results()) {
        println!("{:<20} -> {}", tag.to_string(), error_text(*result));
    }
    drop(batch);

    println!("\nDB100.DBB0-11: {}", format_hex(&block));
    println!("status   = {}", get_int_at(&block, 0)?);
    println!("setpoint = {}", get_real_at(&block, 8)?);
    println!("M0.3     = {}", get_bit_at(&bit, 0, 0)?);

    Ok(())
}
