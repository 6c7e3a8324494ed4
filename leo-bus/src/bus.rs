//! Bus service contracts for the card driver.
//!
//! The driver reaches its host through [`CardBus`], implemented by the bus
//! framework for each discovered candidate. The framework serializes attach
//! and detach per card, so implementations need no locking for the lifecycle
//! sequence itself; distinct candidates are fully independent.

use crate::error::AttachError;
use crate::resource::{BarResource, ResourceRange};

/// Operations a bus framework provides for one card candidate.
pub trait CardBus: Send + Sync {
    /// Mapped register window returned by [`map_range`](Self::map_range).
    type Window: RegisterWindow;

    /// Enables the device, allowing it to respond to bus transactions.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::DeviceEnableFailure`] if the bus refuses the
    /// device.
    fn enable(&self) -> Result<(), AttachError>;

    /// Disables a device previously enabled with [`enable`](Self::enable).
    fn disable(&self);

    /// Reads a 32-bit dword from the device's configuration space.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::ConfigReadFailure`] if the read fails.
    fn read_config_u32(&self, offset: u8) -> Result<u32, AttachError>;

    /// Reads a byte from the device's configuration space.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::ConfigReadFailure`] if the read fails.
    fn read_config_u8(&self, offset: u8) -> Result<u8, AttachError>;

    /// Returns the decoded base address register at `index`.
    fn bar(&self, index: usize) -> BarResource;

    /// Reserves `range` exclusively for `owner`, preventing other software
    /// from mapping the same physical range.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::ResourceReservationFailure`] if the range is
    /// already claimed or the reservation is rejected.
    fn claim_range(&self, range: ResourceRange, owner: &'static str) -> Result<(), AttachError>;

    /// Releases a range previously reserved with
    /// [`claim_range`](Self::claim_range).
    fn release_range(&self, range: ResourceRange);

    /// Maps `range` into an addressable window of exactly
    /// [`range.size()`](ResourceRange::size) bytes.
    ///
    /// The returned window owns the mapping; dropping it unmaps.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::MappingFailure`] if the mapping is refused.
    fn map_range(&self, range: ResourceRange) -> Result<Self::Window, AttachError>;
}

/// 32-bit little-endian access to a mapped register window.
///
/// Accesses are synchronous and non-blocking at byte offsets from the start
/// of the window; the hardware returns no acknowledgment for writes.
pub trait RegisterWindow {
    /// Window size in bytes.
    fn size(&self) -> usize;

    /// Reads the 32-bit register at byte `offset`.
    fn read_u32(&self, offset: usize) -> u32;

    /// Writes the 32-bit register at byte `offset`.
    fn write_u32(&self, offset: usize, value: u32);
}
