//! Bus seam for the Leonardo card driver.
//!
//! The host bus framework that enumerates cards is not part of this
//! repository; this crate defines the contract the driver is written against:
//!
//! - [`CardBus`] / [`RegisterWindow`] -- operations a framework provides for
//!   one card candidate, and access to its mapped register window.
//! - [`ResourceRange`] / [`BarResource`] -- resource vocabulary, plus the
//!   claims [`EnabledDevice`] and [`RegionClaim`] that release through the
//!   bus when dropped.
//! - [`AttachError`] -- failure kinds shared by the bus seam and the driver.
//! - [`VolatileWindow`] -- building block for real `RegisterWindow`
//!   implementations over a raw mapping.
//! - `mock` -- recording bus with failure injection for tests, compiled
//!   under the `mock` feature.

#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod config;
pub mod error;
pub mod id;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod resource;
pub mod window;

// Re-export the public types at the crate root for ergonomic imports.
pub use bus::{CardBus, RegisterWindow};
pub use error::AttachError;
pub use id::CardId;
pub use resource::{BarResource, EnabledDevice, RegionClaim, ResourceRange};
pub use window::VolatileWindow;
