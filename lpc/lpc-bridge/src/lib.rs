//! # Indirect port I/O over an LPC bus controller
//!
//! Some platforms attach legacy port-I/O peripherals behind a Low Pin Count
//! (LPC) bus controller but have no processor instructions for port access.
//! This crate bridges the gap: callers issue 1/2/4-byte reads and writes
//! against a legacy port number, and the bridge runs each request as a
//! register-driven transaction on the memory-mapped controller, returning
//! the result synchronously.
//!
//! ## Architecture
//!
//! ```text
//! caller
//!     ↓ transact(port, direction, buf)
//! provider hook (PortIoSlot)         — system-wide registration
//!     ↓
//! LpcController                      — validates size, locks the bus
//!     ↓
//! transaction engine                 — polled command/data/status protocol
//!     ↓ read32 / write32
//! RegisterBus (MmioSpace on hardware, mock controllers in tests)
//! ```
//!
//! The controller has a single transaction slot, so the dispatcher
//! serializes everything behind one mutex. Completion is polled — the
//! hardware's completion latch is read in a bounded loop and never
//! delivered as an interrupt — which keeps every call synchronous with a
//! deterministic worst case: each wait phase gives up after a fixed number
//! of polls ([`PollBudget`], default 2) and reports [`LpcError::Timeout`].
//!
//! ## Bring-up
//!
//! The platform startup code maps the controller's 4 KiB register window,
//! wraps it in an [`MmioSpace`], builds an [`LpcController`], and publishes
//! it through [`provider::register`]. From then on the system routes all
//! port I/O through [`provider::transact`].
//!
//! ```no_run
//! use lpc_bridge::{LpcController, MmioSpace, provider};
//! use lpc_sync::OnceInit;
//!
//! static CONTROLLER: OnceInit<LpcController<MmioSpace>> = OnceInit::new();
//!
//! # fn window_base() -> *mut u8 { core::ptr::null_mut() }
//! let space = unsafe { MmioSpace::new(window_base()) }.expect("bad register window");
//! CONTROLLER
//!     .set(LpcController::new(space))
//!     .ok()
//!     .expect("bridge already initialized");
//! provider::register(CONTROLLER.get().unwrap()).expect("provider already registered");
//! ```
//!
//! ## Failure model
//!
//! Errors are terminal for the call: no retry beyond the poll budget, no
//! partial success. After a post-start timeout the transaction's effect on
//! the bus is unknown and the controller may be stuck mid-transaction;
//! there is deliberately no recovery path, because the hardware offers
//! none.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod controller;
mod engine;
mod error;
#[cfg(test)]
mod mock;
pub mod provider;

pub use controller::{Direction, LpcController};
pub use engine::{PollBudget, read_cycle, write_cycle};
pub use error::LpcError;
pub use lpc_mmio::{MapError, MmioSpace, RegisterBus};
pub use lpc_regs::{AddressMode, CycleType};
