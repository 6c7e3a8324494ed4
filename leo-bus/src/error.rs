//! Attach failure kinds.

use core::fmt;

/// Errors that can occur while attaching a card.
///
/// Bus implementations return the kind matching the operation that failed
/// (see [`CardBus`](crate::bus::CardBus)); the driver itself adds
/// [`UnsupportedResourceType`](Self::UnsupportedResourceType) at its BAR type
/// gate. Detach has no error type: teardown always runs to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// The embedding could not allocate storage for the handle record.
    AllocationFailure,
    /// The bus refused to enable the device.
    DeviceEnableFailure,
    /// A configuration space read failed.
    ConfigReadFailure,
    /// BAR0 decodes to something other than a memory resource.
    UnsupportedResourceType,
    /// The resource range is already claimed or the reservation was rejected.
    ResourceReservationFailure,
    /// The bus refused to map the claimed range.
    MappingFailure,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailure => f.write_str("handle allocation failed"),
            Self::DeviceEnableFailure => f.write_str("device enable refused by the bus"),
            Self::ConfigReadFailure => f.write_str("configuration space read failed"),
            Self::UnsupportedResourceType => f.write_str("resource is not memory mapped"),
            Self::ResourceReservationFailure => f.write_str("resource range already claimed"),
            Self::MappingFailure => f.write_str("register window mapping refused"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_all_variants() {
        assert_eq!(
            format!("{}", AttachError::AllocationFailure),
            "handle allocation failed"
        );
        assert_eq!(
            format!("{}", AttachError::DeviceEnableFailure),
            "device enable refused by the bus"
        );
        assert_eq!(
            format!("{}", AttachError::ConfigReadFailure),
            "configuration space read failed"
        );
        assert_eq!(
            format!("{}", AttachError::UnsupportedResourceType),
            "resource is not memory mapped"
        );
        assert_eq!(
            format!("{}", AttachError::ResourceReservationFailure),
            "resource range already claimed"
        );
        assert_eq!(
            format!("{}", AttachError::MappingFailure),
            "register window mapping refused"
        );
    }

    #[test]
    fn error_equality() {
        assert_eq!(AttachError::MappingFailure, AttachError::MappingFailure);
        assert_ne!(
            AttachError::MappingFailure,
            AttachError::ResourceReservationFailure
        );
    }
}
