//! The PIO dispatcher: maps logical port requests onto LPC I/O cycles and
//! serializes them against the controller's single transaction slot.

use lpc_mmio::RegisterBus;
use lpc_regs::{AddressMode, CycleType};
use lpc_sync::SpinMutex;

use crate::engine::{self, PollBudget};
use crate::error::LpcError;

/// Transfer direction of a port request, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to caller.
    Read,
    /// Caller to device.
    Write,
}

/// Handle to one LPC controller.
///
/// Owns the register bus behind a mutex: the hardware has exactly one
/// transaction slot, so all dispatch is serialized here, with the lock
/// held from validation until the engine returns on every exit path.
/// The critical section is non-reentrant — a context that can preempt the
/// holder (e.g. an interrupt handler doing port I/O) must be kept off this
/// path by the platform.
///
/// There is no process-wide instance baked in; startup code creates the
/// handle and typically publishes it through [`crate::provider`].
pub struct LpcController<B> {
    bus: SpinMutex<B>,
    budget: PollBudget,
}

impl<B: RegisterBus> LpcController<B> {
    /// Wraps `bus` with the default poll budget.
    pub const fn new(bus: B) -> Self {
        Self::with_budget(bus, PollBudget::DEFAULT)
    }

    /// Wraps `bus`, overriding the per-phase poll budget.
    pub const fn with_budget(bus: B, budget: PollBudget) -> Self {
        Self {
            bus: SpinMutex::new(bus),
            budget,
        }
    }

    /// Performs one port-I/O transaction of 1, 2 or 4 bytes.
    ///
    /// `buf.len()` is the transfer size. Port semantics are fixed here:
    /// every byte targets the same bus address (`port`), as an I/O cycle.
    /// The call blocks — busy-polling, never yielding — until the
    /// transaction completes or a poll phase times out.
    ///
    /// # Errors
    ///
    /// - [`LpcError::InvalidArgument`] if `buf.len()` is not 1, 2 or 4;
    ///   the register bus is not touched in that case.
    /// - [`LpcError::Timeout`] / [`LpcError::IoFailure`] from the engine;
    ///   on failure the buffer contents (reads) and the bus effect
    ///   (post-start write timeouts) are unspecified.
    pub fn transact(
        &self,
        port: u16,
        direction: Direction,
        buf: &mut [u8],
    ) -> Result<(), LpcError> {
        if !matches!(buf.len(), 1 | 2 | 4) {
            return Err(LpcError::InvalidArgument);
        }

        let mut bus = self.bus.lock();
        log::trace!("port {port:#x} {direction:?} {} bytes", buf.len());
        match direction {
            Direction::Write => engine::write_cycle(
                &mut *bus,
                self.budget,
                AddressMode::Fixed,
                CycleType::Io,
                u32::from(port),
                buf,
            ),
            Direction::Read => engine::read_cycle(
                &mut *bus,
                self.budget,
                AddressMode::Fixed,
                CycleType::Io,
                u32::from(port),
                buf,
            ),
        }
    }

    /// Consumes the handle and returns the bus, e.g. at teardown.
    pub fn into_bus(self) -> B {
        self.bus.into_inner()
    }
}
