//! Physical resource types and the claims that release through the bus on drop.

use crate::bus::CardBus;
use crate::error::AttachError;

/// An inclusive physical address range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRange {
    start: u64,
    end: u64,
}

impl ResourceRange {
    /// Creates a range from inclusive bounds. `start` must not exceed `end`.
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Returns the first byte address.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Returns the last byte address (inclusive).
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Returns the number of bytes covered: `end - start + 1`.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// A decoded base address register.
#[derive(Debug, Clone, Copy)]
pub enum BarResource {
    /// Memory-mapped register space.
    Memory {
        /// Physical range decoded from the register.
        range: ResourceRange,
        /// Whether the region is prefetchable.
        prefetchable: bool,
    },
    /// Legacy I/O port space.
    Io {
        /// Port range decoded from the register.
        range: ResourceRange,
    },
    /// Register slot not implemented by the device.
    Unused,
}

/// Device-enable state, held from attach until teardown.
///
/// Dropping disables the device through the bus.
pub struct EnabledDevice<'bus, B: CardBus> {
    bus: &'bus B,
}

impl<'bus, B: CardBus> EnabledDevice<'bus, B> {
    /// Enables the device on its bus.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::DeviceEnableFailure`] if the bus refuses the
    /// device.
    pub fn acquire(bus: &'bus B) -> Result<Self, AttachError> {
        bus.enable()?;
        Ok(Self { bus })
    }
}

impl<B: CardBus> Drop for EnabledDevice<'_, B> {
    fn drop(&mut self) {
        self.bus.disable();
    }
}

/// An exclusive claim on a physical resource range.
///
/// Dropping releases the range through the bus.
pub struct RegionClaim<'bus, B: CardBus> {
    bus: &'bus B,
    range: ResourceRange,
}

impl<'bus, B: CardBus> RegionClaim<'bus, B> {
    /// Reserves `range` for `owner` through the bus.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::ResourceReservationFailure`] if the range is
    /// already claimed.
    pub fn claim(
        bus: &'bus B,
        range: ResourceRange,
        owner: &'static str,
    ) -> Result<Self, AttachError> {
        bus.claim_range(range, owner)?;
        Ok(Self { bus, range })
    }

    /// Returns the claimed range.
    #[must_use]
    pub const fn range(&self) -> ResourceRange {
        self.range
    }
}

impl<B: CardBus> Drop for RegionClaim<'_, B> {
    fn drop(&mut self) {
        self.bus.release_range(self.range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BusEvent, FailPoint, MockBus};

    #[test]
    fn range_size_is_inclusive() {
        let range = ResourceRange::new(0x1000, 0x1FFF);
        assert_eq!(range.start(), 0x1000);
        assert_eq!(range.end(), 0x1FFF);
        assert_eq!(range.size(), 0x1000);
    }

    #[test]
    fn single_byte_range() {
        assert_eq!(ResourceRange::new(0x42, 0x42).size(), 1);
    }

    #[test]
    #[should_panic(expected = "start <= end")]
    fn inverted_range_is_rejected() {
        let _ = ResourceRange::new(5, 0);
    }

    #[test]
    fn enabled_device_disables_on_drop() {
        let bus = MockBus::new();
        let enabled = EnabledDevice::acquire(&bus).unwrap();
        assert_eq!(bus.events(), [BusEvent::Enable]);
        drop(enabled);
        assert_eq!(bus.events(), [BusEvent::Enable, BusEvent::Disable]);
    }

    #[test]
    fn failed_enable_acquires_nothing() {
        let bus = MockBus::new().failing_at(FailPoint::Enable);
        assert_eq!(
            EnabledDevice::acquire(&bus).err(),
            Some(AttachError::DeviceEnableFailure)
        );
        assert!(bus.events().is_empty());
    }

    #[test]
    fn region_claim_releases_on_drop() {
        let bus = MockBus::new();
        let range = ResourceRange::new(0x1000, 0x1FFF);
        let claim = RegionClaim::claim(&bus, range, "test").unwrap();
        assert_eq!(claim.range(), range);
        drop(claim);
        assert_eq!(
            bus.events(),
            [
                BusEvent::Claim {
                    start: 0x1000,
                    end: 0x1FFF,
                },
                BusEvent::Release {
                    start: 0x1000,
                    end: 0x1FFF,
                },
            ]
        );
    }

    #[test]
    fn failed_claim_releases_nothing() {
        let bus = MockBus::new().failing_at(FailPoint::Claim);
        let range = ResourceRange::new(0x1000, 0x1FFF);
        assert_eq!(
            RegionClaim::claim(&bus, range, "test").err(),
            Some(AttachError::ResourceReservationFailure)
        );
        assert!(bus.events().is_empty());
    }
}
