use bitfield_struct::bitfield;

/// Bus cycle type, bits 1–2 of [`Command`].
///
/// The encoding matches the controller's flag values: I/O = `0x0`,
/// Memory = `0x2`, Firmware-Hub = `0x4` once shifted into place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CycleType {
    /// Legacy port I/O cycle.
    Io = 0b00,
    /// LPC memory cycle.
    Memory = 0b01,
    /// Firmware-Hub cycle.
    FirmwareHub = 0b10,
}

impl CycleType {
    pub const fn from_bits(bits: u32) -> Self {
        match bits {
            0b01 => Self::Memory,
            0b10 => Self::FirmwareHub,
            _ => Self::Io,
        }
    }

    pub const fn into_bits(self) -> u32 {
        self as u32
    }
}

/// Addressing mode, bit 3 of [`Command`].
///
/// Controls whether a multi-byte transfer retargets the same bus address
/// for every byte (port semantics) or walks sequential addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AddressMode {
    /// Each byte goes to the next sequential address.
    Incrementing = 0,
    /// Every byte targets the same address.
    Fixed = 1,
}

impl AddressMode {
    pub const fn from_bits(bits: u32) -> Self {
        match bits {
            0 => Self::Incrementing,
            _ => Self::Fixed,
        }
    }

    pub const fn into_bits(self) -> u32 {
        self as u32
    }
}

/// The transaction command register.
///
/// Written once per transaction, before the start trigger. Direction,
/// cycle type and addressing mode are OR-combined by construction here
/// instead of by hand as the hardware manual presents them.
#[bitfield(u32)]
pub struct Command {
    /// Bit 0 — direction: `true` drives a write cycle, `false` a read.
    pub write: bool,

    /// Bits 1–2 — bus cycle type.
    #[bits(2)]
    pub cycle: CycleType,

    /// Bit 3 — addressing mode for multi-byte transfers.
    #[bits(1)]
    pub address_mode: AddressMode,

    /// Bits 4–31 — reserved (must be 0).
    #[bits(28, default = 0)]
    _reserved_4_31: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_controller_flag_values() {
        // Raw flag values from the hardware manual.
        const CMD_WRITE: u32 = 0x0000_0001;
        const CMD_TYPE_MEM: u32 = 0x0000_0002;
        const CMD_TYPE_FWH: u32 = 0x0000_0004;
        const CMD_SAMEADDR: u32 = 0x0000_0008;

        let wr = Command::new()
            .with_write(true)
            .with_cycle(CycleType::Io)
            .with_address_mode(AddressMode::Fixed);
        assert_eq!(wr.into_bits(), CMD_WRITE | CMD_SAMEADDR);

        let rd = Command::new()
            .with_write(false)
            .with_cycle(CycleType::Memory)
            .with_address_mode(AddressMode::Incrementing);
        assert_eq!(rd.into_bits(), CMD_TYPE_MEM);

        let fwh = Command::new()
            .with_write(true)
            .with_cycle(CycleType::FirmwareHub)
            .with_address_mode(AddressMode::Fixed);
        assert_eq!(fwh.into_bits(), CMD_WRITE | CMD_TYPE_FWH | CMD_SAMEADDR);
    }

    #[test]
    fn cycle_round_trips() {
        for cycle in [CycleType::Io, CycleType::Memory, CycleType::FirmwareHub] {
            assert_eq!(CycleType::from_bits(cycle.into_bits()), cycle);
        }
    }

    #[test]
    fn reserved_bits_stay_clear() {
        let cmd = Command::new()
            .with_write(true)
            .with_cycle(CycleType::FirmwareHub)
            .with_address_mode(AddressMode::Fixed);
        assert_eq!(cmd.into_bits() & !0xF, 0);
    }
}
