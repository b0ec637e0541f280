//! # Register window access for the LPC controller
//!
//! The transaction engine in `lpc-bridge` never touches pointers; it speaks
//! to the controller through the [`RegisterBus`] trait, a minimal view of a
//! fixed-layout block of 32-bit registers. This crate provides that trait
//! and its real implementation, [`MmioSpace`], a 4 KiB memory-mapped window
//! accessed with volatile, program-ordered loads and stores.
//!
//! Keeping the seam here means the polling protocol can be exercised
//! against an in-memory simulated controller in tests, while production
//! code hands the engine a mapped hardware window.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod mmio_space;

pub use mmio_space::{MapError, MmioSpace};

/// Semantic view of the controller's register block.
///
/// Implementations must perform every access exactly as issued: the
/// hardware state machine observes each load and store as a discrete
/// event, so accesses may not be cached, merged, elided or reordered
/// relative to one another.
///
/// The methods take `&mut self` because register access mutates device
/// state even on reads (the read-data register pops a byte per load);
/// callers serialize access externally.
pub trait RegisterBus {
    /// Reads the 32-bit register at `offset` bytes from the window base.
    fn read32(&mut self, offset: usize) -> u32;

    /// Writes the 32-bit register at `offset` bytes from the window base.
    fn write32(&mut self, offset: usize, value: u32);

    /// Waits one poll interval between status polls.
    ///
    /// The default is a scheduler-free spin hint; platforms with a
    /// calibrated delay source can override this to stretch the interval.
    fn relax(&mut self) {
        core::hint::spin_loop();
    }
}
