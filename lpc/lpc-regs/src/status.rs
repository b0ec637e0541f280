use bitfield_struct::bitfield;

/// The operation-status register.
///
/// Read before a transaction to confirm the controller is idle and after
/// completion to learn whether the cycle finished on the bus.
#[bitfield(u32)]
pub struct OpStatus {
    /// Bit 0 — controller is idle and can accept a new transaction.
    pub idle: bool,

    /// Bit 1 — the last transaction finished successfully.
    pub finished: bool,

    /// Bits 2–31 — reserved.
    #[bits(30, default = 0)]
    _reserved_2_31: u32,
}

/// The IRQ-status register.
///
/// The completion latch is set by the controller when a transaction ends.
/// This design never unmasks the interrupt line; the latch is polled, and
/// writing the bit back clears it.
#[bitfield(u32)]
pub struct IrqStatus {
    /// Bit 0 — reserved.
    #[bits(default = false)]
    _reserved_0: bool,

    /// Bit 1 — a completion event is pending; write 1 to clear.
    pub op_complete: bool,

    /// Bits 2–31 — reserved.
    #[bits(30, default = 0)]
    _reserved_2_31: u32,
}

impl IrqStatus {
    /// The write-one-to-clear value for the completion latch.
    #[must_use]
    pub const fn clear_completion() -> Self {
        Self::new().with_op_complete(true)
    }
}
