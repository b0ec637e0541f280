//! # LPC controller register layout
//!
//! Register map and wire encodings for the memory-mapped LPC bus controller
//! driven by `lpc-bridge`. The controller exposes a 4 KiB window of 32-bit
//! registers through which a host without native port-I/O instructions runs
//! LPC bus cycles one at a time: the driver queues the command, length,
//! payload and target address, writes the start trigger, then polls for
//! completion.
//!
//! Everything in this crate is declarative: byte offsets, bitfield models of
//! the command and status registers, and the handful of magic values the
//! hardware state machine recognizes. The transaction protocol itself lives
//! in `lpc-bridge`.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod command;
mod status;

pub use command::{AddressMode, Command, CycleType};
pub use status::{IrqStatus, OpStatus};

/// Size of the controller's register window in bytes.
pub const WINDOW_SIZE: usize = 0x1000;

/// Physical base of the register window on the Hip06 SoC.
///
/// The window location is a hardware contract, not configurable; the
/// platform startup code maps `WINDOW_SIZE` bytes from here and hands the
/// mapping to the bridge.
pub const WINDOW_BASE: u64 = 0xA01B_0000;

/// Value written to [`offsets::START`] to launch the queued transaction.
pub const START_TRANSACTION: u32 = 0x1;

/// Byte offsets of the controller registers within the 4 KiB window.
///
/// All registers are 32 bits wide and naturally aligned. Core transaction
/// logic touches only `START` through `READ_DATA`; the FIFO, timeout and
/// strap/request registers are managed by platform firmware.
pub mod offsets {
    /// Transaction trigger; write [`super::START_TRANSACTION`].
    pub const START: usize = 0x00;
    /// Controller state, see [`super::OpStatus`].
    pub const OP_STATUS: usize = 0x04;
    /// Completion event latch, see [`super::IrqStatus`].
    pub const IRQ_STATUS: usize = 0x08;
    /// Number of data bytes in the pending transaction.
    pub const OP_LEN: usize = 0x10;
    /// Cycle descriptor, see [`super::Command`].
    pub const COMMAND: usize = 0x14;
    /// Firmware-Hub device id and memory size.
    pub const FWH_ID_MSIZE: usize = 0x18;
    /// Target bus address of the transaction.
    pub const ADDRESS: usize = 0x20;
    /// Sequential write-data push port (one byte per 32-bit store).
    pub const WRITE_DATA: usize = 0x24;
    /// Sequential read-data pop port (one byte per 32-bit load).
    pub const READ_DATA: usize = 0x28;
    /// Long transfer count.
    pub const LONG_COUNT: usize = 0x30;
    /// Transmit FIFO status.
    pub const TX_FIFO_STATUS: usize = 0x50;
    /// Receive FIFO status.
    pub const RX_FIFO_STATUS: usize = 0x54;
    /// Bus timeout configuration.
    pub const TIMEOUT: usize = 0x58;
    /// Strap/request control 0.
    pub const STRQ_CTRL0: usize = 0x80;
    /// Strap/request control 1.
    pub const STRQ_CTRL1: usize = 0x84;
    /// Strap/request interrupt status.
    pub const STRQ_INT: usize = 0x90;
    /// Strap/request interrupt mask.
    pub const STRQ_INT_MASK: usize = 0x94;
    /// Strap/request state.
    pub const STRQ_STAT: usize = 0xA0;
}
