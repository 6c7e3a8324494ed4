//! Volatile register window over a raw mapping.

use core::marker::PhantomData;
use core::ptr::{self, NonNull};

use crate::bus::RegisterWindow;

/// 32-bit little-endian volatile accessor over a mapped byte range.
///
/// This is the building block for real [`RegisterWindow`] implementations: a
/// bus binding wraps the pointer its mapping primitive returns in a
/// `VolatileWindow` and adds its own unmap-on-drop on the outside. The window
/// itself does not own the mapping. Every access asserts that the offset
/// names a 4-byte aligned register inside the window.
#[derive(Debug)]
pub struct VolatileWindow<'mapping> {
    base: NonNull<u8>,
    size: usize,
    _mapping: PhantomData<&'mapping ()>,
}

impl VolatileWindow<'_> {
    /// Creates a window over `size` bytes starting at `base`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `base..base + size` stays mapped and valid
    /// for volatile reads and writes for the lifetime `'mapping`, and that no
    /// other code accesses the range outside this window.
    #[must_use]
    pub const unsafe fn new(base: NonNull<u8>, size: usize) -> Self {
        Self {
            base,
            size,
            _mapping: PhantomData,
        }
    }

    /// Panics unless `offset` names a 4-byte aligned register inside the
    /// window.
    fn check_access(&self, offset: usize) {
        assert!(
            offset.checked_add(4).is_some_and(|end| end <= self.size),
            "register access at {offset:#x} outside {:#x} byte window",
            self.size
        );
        assert!(
            (self.base.as_ptr() as usize + offset) % 4 == 0,
            "unaligned register access at {offset:#x}"
        );
    }
}

impl RegisterWindow for VolatileWindow<'_> {
    fn size(&self) -> usize {
        self.size
    }

    fn read_u32(&self, offset: usize) -> u32 {
        self.check_access(offset);
        // SAFETY: The access is aligned and in bounds per check_access, and
        // the constructor contract guarantees the mapping is valid.
        let raw = unsafe { ptr::read_volatile(self.base.as_ptr().add(offset).cast::<u32>()) };
        u32::from_le(raw)
    }

    fn write_u32(&self, offset: usize, value: u32) {
        self.check_access(offset);
        // SAFETY: Same as read_u32.
        unsafe { ptr::write_volatile(self.base.as_ptr().add(offset).cast::<u32>(), value.to_le()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_over(buf: &mut [u32]) -> VolatileWindow<'_> {
        let base = NonNull::new(buf.as_mut_ptr().cast::<u8>()).unwrap();
        // SAFETY: The buffer outlives the window and nothing else touches it.
        unsafe { VolatileWindow::new(base, buf.len() * 4) }
    }

    #[test]
    fn write_is_little_endian_in_memory() {
        let mut buf = [0u32; 4];
        let window = window_over(&mut buf);
        window.write_u32(4, 0x400);
        drop(window);
        assert_eq!(buf[1].to_ne_bytes(), 0x400u32.to_le_bytes());
    }

    #[test]
    fn read_back_round_trips() {
        let mut buf = [0u32; 4];
        let window = window_over(&mut buf);
        window.write_u32(8, 0xDEAD_BEEF);
        assert_eq!(window.read_u32(8), 0xDEAD_BEEF);
        assert_eq!(window.size(), 16);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_access_panics() {
        let mut buf = [0u32; 4];
        let window = window_over(&mut buf);
        window.read_u32(16);
    }

    #[test]
    #[should_panic(expected = "unaligned")]
    fn unaligned_access_panics() {
        let mut buf = [0u32; 4];
        let window = window_over(&mut buf);
        window.write_u32(2, 1);
    }
}
