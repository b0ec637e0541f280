use core::ptr::{NonNull, read_volatile, write_volatile};

use lpc_regs::WINDOW_SIZE;

use crate::RegisterBus;

/// Failure to adopt a mapped register window.
///
/// Mapping itself (page tables, cache attributes) belongs to the platform
/// startup code; this only covers the handed-over pointer being unusable.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("null register window")]
    NullBase,
    #[error("register window not 4-byte aligned")]
    Misaligned,
}

/// The controller's register window, memory-mapped.
///
/// Wraps the virtual base of the 4 KiB block the platform mapped
/// (uncached, device attributes) at the controller's fixed physical
/// address. All accesses are 32-bit volatile loads/stores at fixed byte
/// offsets, so the compiler can neither elide nor reorder them — the
/// equivalent of `readl`/`writel` against an `ioremap`ped region.
///
/// `MmioSpace` is `Send` but deliberately not `Sync`: concurrent register
/// access needs external serialization, which the bridge provides by
/// keeping the space behind its transaction mutex.
#[derive(Debug)]
pub struct MmioSpace {
    base: NonNull<u32>,
}

// Safety: the mapping is valid process-wide; exclusive access is enforced
// by whoever owns the value.
unsafe impl Send for MmioSpace {}

impl MmioSpace {
    /// Adopts a mapped register window at virtual address `base`.
    ///
    /// # Errors
    ///
    /// [`MapError`] if `base` is null or not 32-bit aligned.
    ///
    /// # Safety
    ///
    /// `base` must point to a live, uncached device mapping of at least
    /// [`WINDOW_SIZE`] bytes covering the controller's register block, and
    /// must remain valid for the lifetime of the returned value.
    pub unsafe fn new(base: *mut u8) -> Result<Self, MapError> {
        let Some(base) = NonNull::new(base.cast::<u32>()) else {
            return Err(MapError::NullBase);
        };
        if base.addr().get() % align_of::<u32>() != 0 {
            return Err(MapError::Misaligned);
        }
        Ok(Self { base })
    }

    fn register(&self, offset: usize) -> *mut u32 {
        debug_assert!(offset + size_of::<u32>() <= WINDOW_SIZE);
        debug_assert!(offset % align_of::<u32>() == 0);
        // Safety: offset is in bounds of the mapped window per the
        // constructor contract and the asserts above.
        unsafe { self.base.cast::<u8>().add(offset).cast::<u32>().as_ptr() }
    }
}

impl RegisterBus for MmioSpace {
    #[inline]
    fn read32(&mut self, offset: usize) -> u32 {
        // Safety: in-bounds pointer into a live device mapping.
        unsafe { read_volatile(self.register(offset)) }
    }

    #[inline]
    fn write32(&mut self, offset: usize, value: u32) {
        // Safety: in-bounds pointer into a live device mapping.
        unsafe { write_volatile(self.register(offset), value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpc_regs::offsets;

    /// Plain memory standing in for the mapped window. Volatile accesses
    /// to ordinary RAM are well-defined, which is all these tests need.
    #[repr(align(4096))]
    struct Window([u8; WINDOW_SIZE]);

    #[test]
    fn rejects_null_window() {
        let err = unsafe { MmioSpace::new(core::ptr::null_mut()) };
        assert_eq!(err.unwrap_err(), MapError::NullBase);
    }

    #[test]
    fn rejects_misaligned_window() {
        let mut window = Window([0; WINDOW_SIZE]);
        let base = window.0.as_mut_ptr();
        let err = unsafe { MmioSpace::new(base.add(1)) };
        assert_eq!(err.unwrap_err(), MapError::Misaligned);
    }

    #[test]
    fn reads_back_written_registers() {
        let mut window = Window([0; WINDOW_SIZE]);
        let mut space = unsafe { MmioSpace::new(window.0.as_mut_ptr()) }.unwrap();

        space.write32(offsets::ADDRESS, 0xDEAD_BEEF);
        space.write32(offsets::OP_LEN, 4);
        assert_eq!(space.read32(offsets::ADDRESS), 0xDEAD_BEEF);
        assert_eq!(space.read32(offsets::OP_LEN), 4);
        assert_eq!(space.read32(offsets::COMMAND), 0);
    }

    #[test]
    fn accesses_land_at_the_byte_offset() {
        let mut window = Window([0; WINDOW_SIZE]);
        let mut space = unsafe { MmioSpace::new(window.0.as_mut_ptr()) }.unwrap();

        space.write32(offsets::IRQ_STATUS, 0x0102_0304);
        assert_eq!(
            u32::from_ne_bytes(window.0[offsets::IRQ_STATUS..][..4].try_into().unwrap()),
            0x0102_0304
        );
    }
}
