//! Driver metadata and registration with the host dispatcher.
//!
//! The host bus framework owns discovery and the device-to-handle side
//! table; this module only bundles what it needs to route cards at this
//! driver: the identity table and the attach/detach entry points.

use leo_bus::{AttachError, CardBus, CardId};
use log::info;

use crate::card::{self, LeoCard};
use crate::ident::ID_TABLE;

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Name the driver claims resources and logs under.
pub const DRIVER_NAME: &str = "leodrv";
/// Driver version.
pub const DRIVER_VERSION: &str = "1.0.0";
/// One-line driver description.
pub const DRIVER_DESCRIPTION: &str = "Leonardo ISDN PCI driver";

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Entry a host dispatcher uses to route matching cards at this driver.
///
/// The dispatcher matches discovered devices against `id_table` and calls
/// `attach` for each hit, keeping the association between bus device and
/// returned handle in its own side table. `detach` receives that handle
/// back on removal, or [`None`] if attach never completed for the device.
pub struct DriverRegistration<B: CardBus> {
    /// Driver name (for logging and resource ownership).
    pub name: &'static str,
    /// Identities this driver accepts.
    pub id_table: &'static [CardId],
    /// Called for each discovered matching candidate.
    pub attach: for<'bus> fn(&'bus B, CardId) -> Result<LeoCard<'bus, B>, AttachError>,
    /// Called when a device is removed.
    pub detach: for<'bus> fn(Option<LeoCard<'bus, B>>),
}

impl<B: CardBus> Drop for DriverRegistration<B> {
    fn drop(&mut self) {
        info!("Unloading {}...", DRIVER_NAME);
    }
}

/// Builds the registration handed to the host dispatcher at load time.
///
/// Deregistration is the drop of the returned value.
#[must_use]
pub fn registration<B: CardBus>() -> DriverRegistration<B> {
    info!("Loading {}...", DRIVER_NAME);
    DriverRegistration {
        name: DRIVER_NAME,
        id_table: &ID_TABLE,
        attach: card::attach,
        detach: card::detach,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::LifecycleState;
    use crate::ident::VENDOR_HERMSTEDT;
    use leo_bus::mock::MockBus;

    #[test]
    fn registration_exposes_the_identity_table() {
        let reg: DriverRegistration<MockBus> = registration();
        assert_eq!(reg.name, "leodrv");
        assert_eq!(reg.id_table.len(), 3);
        assert!(reg.id_table.iter().all(|id| id.vendor == VENDOR_HERMSTEDT));
    }

    #[test]
    fn registered_callbacks_drive_a_full_lifecycle() {
        let reg: DriverRegistration<MockBus> = registration();
        let bus = MockBus::new();

        let card = (reg.attach)(&bus, ID_TABLE[0]).unwrap();
        assert_eq!(card.state(), LifecycleState::Running);

        (reg.detach)(Some(card));
        assert_eq!(bus.events().len(), 11);
    }
}
