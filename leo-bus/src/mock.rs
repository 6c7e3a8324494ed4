//! In-memory [`CardBus`] implementation for driver tests.
//!
//! [`MockBus`] records every bus call in a shared event log and can be
//! told to refuse a single operation, so tests can walk a driver through
//! each failure point and assert on the exact acquire/release sequence
//! that follows.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use spin::Mutex;

use crate::bus::{CardBus, RegisterWindow};
use crate::error::AttachError;
use crate::resource::{BarResource, ResourceRange};

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

/// A single observed bus or register-window operation.
///
/// Only operations that succeed are recorded. A refused operation leaves
/// no event, so a log can be compared directly against the expected
/// acquire/release ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// The device was enabled.
    Enable,
    /// The device was disabled.
    Disable,
    /// A configuration-space read at `offset` completed.
    ConfigRead {
        /// Configuration-space offset that was read.
        offset: u8,
    },
    /// The range `[start, end]` was claimed.
    Claim {
        /// First address of the claimed range.
        start: u64,
        /// Last address of the claimed range.
        end: u64,
    },
    /// The range `[start, end]` was released.
    Release {
        /// First address of the released range.
        start: u64,
        /// Last address of the released range.
        end: u64,
    },
    /// A register window of `size` bytes was mapped.
    Map {
        /// Size of the mapping in bytes.
        size: usize,
    },
    /// A register window was unmapped.
    Unmap,
    /// A 32-bit register write through a mapped window.
    Write {
        /// Byte offset of the register within the window.
        offset: usize,
        /// Value that was written.
        value: u32,
    },
    /// A 32-bit register read through a mapped window.
    Read {
        /// Byte offset of the register within the window.
        offset: usize,
    },
}

/// Bus operation that [`MockBus`] can be told to refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// Refuse [`CardBus::enable`].
    Enable,
    /// Refuse [`CardBus::read_config_u32`] and [`CardBus::read_config_u8`].
    ConfigRead,
    /// Refuse [`CardBus::claim_range`].
    Claim,
    /// Refuse [`CardBus::map_range`].
    Map,
}

// ---------------------------------------------------------------------------
// Mock bus
// ---------------------------------------------------------------------------

/// Scriptable [`CardBus`] backed by an in-memory event log.
#[derive(Debug)]
pub struct MockBus {
    log: Arc<Mutex<Vec<BusEvent>>>,
    bar0: BarResource,
    irq_line: u8,
    base_register: u32,
    fail: Option<FailPoint>,
}

impl MockBus {
    /// Creates a bus presenting a 1 MiB memory BAR at `0xE000_0000`,
    /// interrupt line 10 and no scripted failure.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            bar0: BarResource::Memory {
                range: ResourceRange::new(0xE000_0000, 0xE00F_FFFF),
                prefetchable: false,
            },
            irq_line: 10,
            base_register: 0xE000_0000,
            fail: None,
        }
    }

    /// Replaces the resource reported for BAR 0.
    #[must_use]
    pub fn with_bar0(mut self, bar0: BarResource) -> Self {
        self.bar0 = bar0;
        self
    }

    /// Replaces the interrupt line returned by configuration reads.
    #[must_use]
    pub fn with_irq_line(mut self, irq_line: u8) -> Self {
        self.irq_line = irq_line;
        self
    }

    /// Replaces the raw dword returned for base-address reads.
    #[must_use]
    pub fn with_base_register(mut self, base_register: u32) -> Self {
        self.base_register = base_register;
        self
    }

    /// Scripts a single operation to be refused.
    #[must_use]
    pub fn failing_at(mut self, fail: FailPoint) -> Self {
        self.fail = Some(fail);
        self
    }

    /// Returns a snapshot of the recorded events in call order.
    #[must_use]
    pub fn events(&self) -> Vec<BusEvent> {
        self.log.lock().clone()
    }

    fn push(&self, event: BusEvent) {
        self.log.lock().push(event);
    }

    fn should_fail(&self, point: FailPoint) -> bool {
        self.fail == Some(point)
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CardBus for MockBus {
    type Window = MockWindow;

    fn enable(&self) -> Result<(), AttachError> {
        if self.should_fail(FailPoint::Enable) {
            return Err(AttachError::DeviceEnableFailure);
        }
        self.push(BusEvent::Enable);
        Ok(())
    }

    fn disable(&self) {
        self.push(BusEvent::Disable);
    }

    fn read_config_u32(&self, offset: u8) -> Result<u32, AttachError> {
        if self.should_fail(FailPoint::ConfigRead) {
            return Err(AttachError::ConfigReadFailure);
        }
        self.push(BusEvent::ConfigRead { offset });
        Ok(self.base_register)
    }

    fn read_config_u8(&self, offset: u8) -> Result<u8, AttachError> {
        if self.should_fail(FailPoint::ConfigRead) {
            return Err(AttachError::ConfigReadFailure);
        }
        self.push(BusEvent::ConfigRead { offset });
        Ok(self.irq_line)
    }

    fn bar(&self, index: usize) -> BarResource {
        if index == 0 { self.bar0 } else { BarResource::Unused }
    }

    fn claim_range(&self, range: ResourceRange, _owner: &'static str) -> Result<(), AttachError> {
        if self.should_fail(FailPoint::Claim) {
            return Err(AttachError::ResourceReservationFailure);
        }
        self.push(BusEvent::Claim {
            start: range.start(),
            end: range.end(),
        });
        Ok(())
    }

    fn release_range(&self, range: ResourceRange) {
        self.push(BusEvent::Release {
            start: range.start(),
            end: range.end(),
        });
    }

    fn map_range(&self, range: ResourceRange) -> Result<Self::Window, AttachError> {
        if self.should_fail(FailPoint::Map) {
            return Err(AttachError::MappingFailure);
        }
        let size = usize::try_from(range.size()).map_err(|_| AttachError::MappingFailure)?;
        self.push(BusEvent::Map { size });
        Ok(MockWindow {
            log: Arc::clone(&self.log),
            size,
        })
    }
}

// ---------------------------------------------------------------------------
// Mock register window
// ---------------------------------------------------------------------------

/// Register window handed out by [`MockBus::map_range`].
///
/// Reads return zero; reads and writes are appended to the owning bus
/// log, and dropping the window records [`BusEvent::Unmap`].
#[derive(Debug)]
pub struct MockWindow {
    log: Arc<Mutex<Vec<BusEvent>>>,
    size: usize,
}

impl RegisterWindow for MockWindow {
    fn size(&self) -> usize {
        self.size
    }

    fn read_u32(&self, offset: usize) -> u32 {
        self.log.lock().push(BusEvent::Read { offset });
        0
    }

    fn write_u32(&self, offset: usize, value: u32) {
        self.log.lock().push(BusEvent::Write { offset, value });
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        self.log.lock().push(BusEvent::Unmap);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_events_in_call_order() {
        let bus = MockBus::new();
        bus.enable().unwrap();
        let range = ResourceRange::new(0x1000, 0x1FFF);
        bus.claim_range(range, "test").unwrap();
        let window = bus.map_range(range).unwrap();
        window.write_u32(0x3C, 0x400);
        drop(window);
        bus.release_range(range);
        bus.disable();

        assert_eq!(
            bus.events(),
            [
                BusEvent::Enable,
                BusEvent::Claim {
                    start: 0x1000,
                    end: 0x1FFF,
                },
                BusEvent::Map { size: 0x1000 },
                BusEvent::Write {
                    offset: 0x3C,
                    value: 0x400,
                },
                BusEvent::Unmap,
                BusEvent::Release {
                    start: 0x1000,
                    end: 0x1FFF,
                },
                BusEvent::Disable,
            ]
        );
    }

    #[test]
    fn failing_op_records_nothing() {
        let bus = MockBus::new().failing_at(FailPoint::Enable);
        assert_eq!(bus.enable(), Err(AttachError::DeviceEnableFailure));
        assert!(bus.events().is_empty());
    }

    #[test]
    fn config_reads_report_scripted_values() {
        let bus = MockBus::new()
            .with_base_register(0xD000_0004)
            .with_irq_line(7);
        assert_eq!(bus.read_config_u32(0x10), Ok(0xD000_0004));
        assert_eq!(bus.read_config_u8(0x3C), Ok(7));
    }

    #[test]
    fn only_bar_zero_is_populated() {
        let bus = MockBus::new();
        assert!(matches!(bus.bar(0), BarResource::Memory { .. }));
        assert!(matches!(bus.bar(1), BarResource::Unused));
    }
}
