//! Driver for the Hermstedt Leonardo family of ISDN PCI adapters.
//!
//! The Leonardo cards carry an onboard 68HC001 controller reachable through
//! a single memory BAR, and the host side of the driver is a pure lifecycle
//! exercise:
//!
//! - **Identity** -- [`ID_TABLE`] lists the supported vendor/device pairs and
//!   [`CardModel`] names them for diagnostics.
//! - **Registers** -- the `regs` module holds the control-register offsets and
//!   command words quoted from the card documentation.
//! - **Lifecycle** -- [`attach`] walks a candidate card from discovery to
//!   [`LifecycleState::Running`], unwinding every acquired resource in reverse
//!   order if any step refuses, and [`detach`] halts the controller and
//!   releases everything.
//! - **Registration** -- [`DriverRegistration`] bundles the identity table
//!   with the attach and detach entry points for a host framework to drive.

#![cfg_attr(not(test), no_std)]

pub mod card;
pub mod driver;
pub mod ident;
pub mod regs;

// Re-export the driver surface at the crate root for ergonomic imports.
pub use card::{LeoCard, LifecycleState, attach, detach};
pub use driver::{DRIVER_DESCRIPTION, DRIVER_NAME, DRIVER_VERSION, DriverRegistration, registration};
pub use ident::{CardModel, ID_TABLE, LEONARDO_SL, LEONARDO_SP, LEONARDO_XL, VENDOR_HERMSTEDT};
