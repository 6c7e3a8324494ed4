//! Configuration space offsets read during attach.

/// Byte offset of the first base address register dword.
pub const BASE_ADDRESS_0: u8 = 0x10;

/// Byte offset of the interrupt line byte.
pub const INTERRUPT_LINE: u8 = 0x3C;
