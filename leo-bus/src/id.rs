//! Card identity for driver-to-device matching.

/// Vendor/device identifier pair for one supported card.
///
/// The external dispatcher matches discovered devices against a driver's
/// identity table before invoking attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardId {
    /// Vendor identifier.
    pub vendor: u16,
    /// Device identifier.
    pub device: u16,
}

impl CardId {
    /// Creates an identity entry for a specific vendor/device pair.
    #[must_use]
    pub const fn new(vendor: u16, device: u16) -> Self {
        Self { vendor, device }
    }

    /// Returns `true` if this entry matches the given device identity.
    #[must_use]
    pub const fn matches(self, vendor: u16, device: u16) -> bool {
        self.vendor == vendor && self.device == device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_vendor_device_match() {
        let id = CardId::new(0x118E, 0x0042);
        assert!(id.matches(0x118E, 0x0042));
    }

    #[test]
    fn vendor_mismatch() {
        let id = CardId::new(0x118E, 0x0042);
        assert!(!id.matches(0x1234, 0x0042));
    }

    #[test]
    fn device_mismatch() {
        let id = CardId::new(0x118E, 0x0042);
        assert!(!id.matches(0x118E, 0x00A2));
    }
}
