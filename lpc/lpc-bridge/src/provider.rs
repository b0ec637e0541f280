//! The platform hook: publishes one controller as the system-wide port-I/O
//! handler.
//!
//! On platforms served by this bridge, port accesses from anywhere in the
//! system funnel through a single registered provider. Startup code builds
//! the [`LpcController`], registers it here once, and every later
//! [`transact`] call dispatches through it. A call made before
//! registration is a caller error, not a hardware fault, and reports
//! [`LpcError::InvalidArgument`].

use lpc_mmio::RegisterBus;
use lpc_sync::OnceInit;

use crate::controller::{Direction, LpcController};
use crate::error::LpcError;

/// A port-I/O handler that can be installed system-wide.
pub trait PortIo: Sync {
    /// Performs one 1/2/4-byte transaction against `port`.
    ///
    /// # Errors
    ///
    /// See [`LpcController::transact`].
    fn transact(&self, port: u16, direction: Direction, buf: &mut [u8]) -> Result<(), LpcError>;
}

impl<B: RegisterBus + Send> PortIo for LpcController<B> {
    fn transact(&self, port: u16, direction: Direction, buf: &mut [u8]) -> Result<(), LpcError> {
        Self::transact(self, port, direction, buf)
    }
}

/// Returned by [`PortIoSlot::register`] when a provider is already
/// installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a port I/O provider is already registered")]
pub struct AlreadyRegistered;

/// A write-once slot holding the installed provider.
///
/// The system has one global slot ([`register`] / [`transact`]); separate
/// slots only exist so the mechanism can be tested in isolation.
pub struct PortIoSlot {
    handler: OnceInit<&'static dyn PortIo>,
}

impl PortIoSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handler: OnceInit::new(),
        }
    }

    /// Installs `handler`; the first registration wins.
    ///
    /// # Errors
    ///
    /// [`AlreadyRegistered`] if a provider was installed earlier.
    pub fn register(&self, handler: &'static dyn PortIo) -> Result<(), AlreadyRegistered> {
        self.handler.set(handler).map_err(|_| AlreadyRegistered)?;
        log::info!("port I/O provider registered");
        Ok(())
    }

    /// Dispatches through the installed provider.
    ///
    /// # Errors
    ///
    /// [`LpcError::InvalidArgument`] if no provider has been registered
    /// yet; otherwise whatever the provider reports.
    pub fn transact(&self, port: u16, direction: Direction, buf: &mut [u8]) -> Result<(), LpcError> {
        self.handler
            .get()
            .ok_or(LpcError::InvalidArgument)?
            .transact(port, direction, buf)
    }
}

impl Default for PortIoSlot {
    fn default() -> Self {
        Self::new()
    }
}

static SYSTEM_PORT_IO: PortIoSlot = PortIoSlot::new();

/// Installs `handler` as the system-wide port-I/O provider.
///
/// # Errors
///
/// [`AlreadyRegistered`] if a provider was installed earlier.
pub fn register(handler: &'static dyn PortIo) -> Result<(), AlreadyRegistered> {
    SYSTEM_PORT_IO.register(handler)
}

/// Performs a port transaction through the system-wide provider.
///
/// # Errors
///
/// [`LpcError::InvalidArgument`] before registration; otherwise see
/// [`LpcController::transact`].
pub fn transact(port: u16, direction: Direction, buf: &mut [u8]) -> Result<(), LpcError> {
    SYSTEM_PORT_IO.transact(port, direction, buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockController;

    #[test]
    fn empty_slot_rejects_calls_as_caller_error() {
        let slot = PortIoSlot::new();
        let err = slot.transact(0x60, Direction::Read, &mut [0]);
        assert_eq!(err, Err(LpcError::InvalidArgument));
    }

    #[test]
    fn registered_slot_dispatches_to_the_controller() {
        let slot = PortIoSlot::new();
        let ctrl: &'static LpcController<MockController> =
            Box::leak(Box::new(LpcController::new(MockController::happy())));
        slot.register(ctrl).unwrap();

        slot.transact(0x92, Direction::Write, &mut [0x7E]).unwrap();
        let mut back = [0u8];
        slot.transact(0x92, Direction::Read, &mut back).unwrap();
        assert_eq!(back, [0x7E]);
    }

    #[test]
    fn second_registration_is_refused() {
        let slot = PortIoSlot::new();
        let first: &'static LpcController<MockController> =
            Box::leak(Box::new(LpcController::new(MockController::happy())));
        let second: &'static LpcController<MockController> =
            Box::leak(Box::new(LpcController::new(MockController::happy())));

        assert_eq!(slot.register(first), Ok(()));
        assert_eq!(slot.register(second), Err(AlreadyRegistered));
    }
}
