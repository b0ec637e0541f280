//! The transaction engine: drives one LPC bus cycle at a time through the
//! controller's command/status/data registers.
//!
//! Both protocol directions share the same skeleton: clear any stale
//! completion event, wait for the controller to go idle, queue the cycle
//! descriptor (and payload, for writes), pulse the start trigger, wait for
//! the completion latch, then read back whether the cycle finished on the
//! bus. Waiting is a bounded busy-poll — the completion latch is never
//! delivered as an interrupt in this design.
//!
//! The engine serializes nothing itself; it requires exclusive access to
//! the bus (`&mut B`), which [`crate::LpcController`] provides by holding
//! its transaction mutex across the whole call.

use core::num::NonZeroU32;

use lpc_mmio::RegisterBus;
use lpc_regs::{AddressMode, Command, CycleType, IrqStatus, OpStatus, START_TRANSACTION, offsets};

use crate::error::LpcError;

/// Retry budget for each of the two poll phases.
///
/// The controller is given `attempts` status reads per phase, with one
/// [`RegisterBus::relax`] interval after each unsuccessful read, before the
/// phase fails with [`LpcError::Timeout`]. The historical driver used a
/// budget of 2, which bounds the worst case tightly but is unusually short
/// for a bus transaction; it is kept as the default rather than hard-coded
/// so integrators can widen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    attempts: NonZeroU32,
}

impl PollBudget {
    /// The historical budget: 2 polls per phase.
    pub const DEFAULT: Self = Self {
        attempts: NonZeroU32::new(2).unwrap(),
    };

    #[must_use]
    pub const fn new(attempts: NonZeroU32) -> Self {
        Self { attempts }
    }

    #[must_use]
    pub const fn attempts(self) -> u32 {
        self.attempts.get()
    }
}

impl Default for PollBudget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Runs a write cycle: pushes `data` to `address` on the bus.
///
/// Multi-byte transfers target the same address or sequential addresses
/// according to `mode`. The payload is staged byte-by-byte through the
/// write-data push port before the transaction starts.
///
/// # Errors
///
/// - [`LpcError::InvalidArgument`] if `data` is empty or longer than the
///   controller's 32-bit length register can express.
/// - [`LpcError::Timeout`] if a poll phase exhausts `budget`. A timeout
///   after the start trigger leaves the cycle's effect on the bus unknown
///   and possibly the controller stuck; no recovery is attempted.
/// - [`LpcError::IoFailure`] if the controller completed without setting
///   the finished bit.
pub fn write_cycle<B: RegisterBus>(
    bus: &mut B,
    budget: PollBudget,
    mode: AddressMode,
    cycle: CycleType,
    address: u32,
    data: &[u8],
) -> Result<(), LpcError> {
    let len = transfer_len(data.len())?;

    bus.write32(offsets::IRQ_STATUS, IrqStatus::clear_completion().into_bits());
    wait_idle(bus, budget)?;

    let cmd = Command::new()
        .with_write(true)
        .with_cycle(cycle)
        .with_address_mode(mode);
    bus.write32(offsets::COMMAND, cmd.into_bits());
    bus.write32(offsets::OP_LEN, len);

    // The write-data register is a push port: one store per payload byte,
    // all at the same offset.
    for &byte in data {
        bus.write32(offsets::WRITE_DATA, u32::from(byte));
    }

    bus.write32(offsets::ADDRESS, address);
    bus.write32(offsets::START, START_TRANSACTION);

    wait_completion(bus, budget)?;
    bus.write32(offsets::IRQ_STATUS, IrqStatus::clear_completion().into_bits());

    finished(bus)
}

/// Runs a read cycle: fills `data` from `address` on the bus.
///
/// Identical to [`write_cycle`] except that no payload is staged before
/// the start trigger; on success the bytes are popped sequentially from
/// the read-data port. On any failure the contents of `data` are
/// unspecified.
///
/// # Errors
///
/// Same as [`write_cycle`].
pub fn read_cycle<B: RegisterBus>(
    bus: &mut B,
    budget: PollBudget,
    mode: AddressMode,
    cycle: CycleType,
    address: u32,
    data: &mut [u8],
) -> Result<(), LpcError> {
    let len = transfer_len(data.len())?;

    bus.write32(offsets::IRQ_STATUS, IrqStatus::clear_completion().into_bits());
    wait_idle(bus, budget)?;

    let cmd = Command::new()
        .with_write(false)
        .with_cycle(cycle)
        .with_address_mode(mode);
    bus.write32(offsets::COMMAND, cmd.into_bits());
    bus.write32(offsets::OP_LEN, len);
    bus.write32(offsets::ADDRESS, address);
    bus.write32(offsets::START, START_TRANSACTION);

    wait_completion(bus, budget)?;
    bus.write32(offsets::IRQ_STATUS, IrqStatus::clear_completion().into_bits());

    finished(bus)?;
    for byte in data {
        *byte = (bus.read32(offsets::READ_DATA) & 0xFF) as u8;
    }
    Ok(())
}

fn transfer_len(len: usize) -> Result<u32, LpcError> {
    match u32::try_from(len) {
        Ok(0) | Err(_) => Err(LpcError::InvalidArgument),
        Ok(len) => Ok(len),
    }
}

fn wait_idle<B: RegisterBus>(bus: &mut B, budget: PollBudget) -> Result<(), LpcError> {
    for _ in 0..budget.attempts() {
        if OpStatus::from_bits(bus.read32(offsets::OP_STATUS)).idle() {
            return Ok(());
        }
        bus.relax();
    }
    log::warn!("controller not idle after {} polls", budget.attempts());
    Err(LpcError::Timeout)
}

fn wait_completion<B: RegisterBus>(bus: &mut B, budget: PollBudget) -> Result<(), LpcError> {
    for _ in 0..budget.attempts() {
        if IrqStatus::from_bits(bus.read32(offsets::IRQ_STATUS)).op_complete() {
            return Ok(());
        }
        bus.relax();
    }
    log::warn!(
        "no completion after {} polls; transaction outcome unknown",
        budget.attempts()
    );
    Err(LpcError::Timeout)
}

fn finished<B: RegisterBus>(bus: &mut B) -> Result<(), LpcError> {
    if OpStatus::from_bits(bus.read32(offsets::OP_STATUS)).finished() {
        Ok(())
    } else {
        Err(LpcError::IoFailure)
    }
}
