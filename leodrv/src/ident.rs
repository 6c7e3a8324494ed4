//! Identity of the supported Leonardo adapters.
//!
//! Hermstedt shipped the Leonardo line in several variants behind the same
//! vendor ID. Only the XL mapping has been verified against real hardware;
//! the SL and SP device IDs were recovered from configuration dumps and
//! their model names are a best guess.

use leo_bus::CardId;

// ---------------------------------------------------------------------------
// PCI IDs
// ---------------------------------------------------------------------------

/// Hermstedt GmbH vendor ID.
pub const VENDOR_HERMSTEDT: u16 = 0x118E;
/// Leonardo XL device ID.
pub const LEONARDO_XL: u16 = 0x0042;
/// Leonardo SL device ID (model name unconfirmed).
pub const LEONARDO_SL: u16 = 0x00A2;
/// Leonardo SP device ID (model name unconfirmed).
pub const LEONARDO_SP: u16 = 0x00D2;

/// Device ID table for the adapters handled by this driver.
pub static ID_TABLE: [CardId; 3] = [
    CardId::new(VENDOR_HERMSTEDT, LEONARDO_XL),
    CardId::new(VENDOR_HERMSTEDT, LEONARDO_SL),
    CardId::new(VENDOR_HERMSTEDT, LEONARDO_SP),
];

// ---------------------------------------------------------------------------
// Card models
// ---------------------------------------------------------------------------

/// Adapter model recovered from a matched device ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardModel {
    /// Leonardo XL.
    Xl,
    /// Leonardo SL.
    Sl,
    /// Leonardo SP.
    Sp,
}

impl CardModel {
    /// Looks up the model for a matched identity.
    ///
    /// Returns [`None`] for identities outside [`ID_TABLE`].
    #[must_use]
    pub const fn from_id(id: CardId) -> Option<Self> {
        if id.vendor != VENDOR_HERMSTEDT {
            return None;
        }
        match id.device {
            LEONARDO_XL => Some(Self::Xl),
            LEONARDO_SL => Some(Self::Sl),
            LEONARDO_SP => Some(Self::Sp),
            _ => None,
        }
    }

    /// Model name for log output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xl => "Leonardo XL",
            Self::Sl => "Leonardo SL",
            Self::Sp => "Leonardo SP",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_resolves_to_a_model() {
        let models: [Option<CardModel>; 3] = [
            CardModel::from_id(ID_TABLE[0]),
            CardModel::from_id(ID_TABLE[1]),
            CardModel::from_id(ID_TABLE[2]),
        ];
        assert_eq!(
            models,
            [
                Some(CardModel::Xl),
                Some(CardModel::Sl),
                Some(CardModel::Sp)
            ]
        );
    }

    #[test]
    fn unknown_device_has_no_model() {
        assert_eq!(CardModel::from_id(CardId::new(VENDOR_HERMSTEDT, 0x0043)), None);
    }

    #[test]
    fn foreign_vendor_has_no_model() {
        assert_eq!(CardModel::from_id(CardId::new(0x8086, LEONARDO_XL)), None);
    }

    #[test]
    fn model_names_are_distinct() {
        assert_ne!(CardModel::Xl.name(), CardModel::Sl.name());
        assert_ne!(CardModel::Sl.name(), CardModel::Sp.name());
    }
}
