//! Control-register offsets and command words for the Leonardo card.
//!
//! The onboard 68HC001 is driven through a small control block at
//! [`CTRL_BASE`] inside the card's memory BAR. Offsets and command words
//! are quoted as given in the card notes; reset, halt and run all use the
//! word `0x400` and differ only in which register they target and where
//! the card is in its lifecycle.

// ---------------------------------------------------------------------------
// Control block layout
// ---------------------------------------------------------------------------

/// Byte offset of the control block inside the memory BAR.
pub const CTRL_BASE: usize = 0x8_0000;

/// Main control register, relative to [`CTRL_BASE`]. Takes the reset and
/// halt commands.
pub const MAIN_CTRL: usize = 0x3C;
/// Auxiliary control register, relative to [`CTRL_BASE`]. Takes the run
/// command.
pub const AUX_CTRL: usize = 0x38;
/// RAM control register, relative to [`CTRL_BASE`]. Reserved for memory
/// bank selection; not written by the lifecycle code.
pub const RAM_CTRL: usize = 52;

// ---------------------------------------------------------------------------
// Command words
// ---------------------------------------------------------------------------

/// Puts the 68HC001 into reset when written to [`MAIN_CTRL`].
pub const CTRL_RESET: u32 = 0x400;
/// Stops the 68HC001 when written to [`MAIN_CTRL`]. Same word as reset;
/// a halted card is a card held in reset.
pub const CTRL_HALT: u32 = 0x400;
/// Releases the 68HC001 into execution when written to [`AUX_CTRL`].
pub const CTRL_RUN: u32 = 0x400;
/// Selects the onboard memory bank via [`RAM_CTRL`]; reserved.
pub const SEL_MEM: u32 = 0;
