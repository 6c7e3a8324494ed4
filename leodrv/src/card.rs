//! Attach/detach lifecycle for one Leonardo card.
//!
//! [`attach`] walks a candidate through the acquisition sequence in a fixed
//! order: device enable, configuration reads, BAR type gate, range
//! reservation, register window mapping, then the 68HC001 reset and start
//! writes. Each acquisition lives in an owning guard, so a failure at any
//! step releases exactly the resources acquired before it, in reverse
//! order, before the error reaches the caller. [`detach`] halts the
//! controller and tears the same resources down unconditionally.

use leo_bus::{
    AttachError, BarResource, CardBus, CardId, EnabledDevice, RegionClaim, RegisterWindow,
    ResourceRange, config,
};
use log::{error, info};

use crate::driver::DRIVER_NAME;
use crate::ident::CardModel;
use crate::regs;

// ---------------------------------------------------------------------------
// Lifecycle state
// ---------------------------------------------------------------------------

/// Position of a card in its attach/detach lifecycle.
///
/// State machine: `Unclaimed → Enabled → ResourcesReserved → Mapped → Reset
/// → Running → Halted` (halt only on teardown). Any forward transition's
/// failure reverses straight back to `Unclaimed`. The states before `Mapped`
/// are transient inside [`attach`]: a handle you can hold always owns its
/// register window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No resources held.
    Unclaimed,
    /// The device responds to bus transactions.
    Enabled,
    /// The register block is reserved for this driver.
    ResourcesReserved,
    /// The register window is addressable.
    Mapped,
    /// The 68HC001 is held in reset.
    Reset,
    /// The 68HC001 is executing.
    Running,
    /// The 68HC001 is stopped and teardown is underway.
    Halted,
}

// ---------------------------------------------------------------------------
// Card handle
// ---------------------------------------------------------------------------

/// One attached Leonardo card.
///
/// The handle owns every resource acquired during [`attach`] and borrows the
/// bus candidate for its whole lifetime. Dropping it quiesces a running
/// controller and then releases the window, the range reservation and the
/// enable state. Field order below is teardown order.
pub struct LeoCard<'bus, B: CardBus> {
    window: B::Window,
    claim: RegionClaim<'bus, B>,
    #[allow(dead_code, reason = "held for disable-on-drop")]
    enabled: EnabledDevice<'bus, B>,
    irq_line: u8,
    state: LifecycleState,
}

impl<B: CardBus> LeoCard<'_, B> {
    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Interrupt line read from configuration space.
    ///
    /// Stored for diagnostics; no interrupt handling is wired up.
    #[must_use]
    pub const fn irq_line(&self) -> u8 {
        self.irq_line
    }

    /// Physical range claimed for the register block.
    #[must_use]
    pub const fn resource_range(&self) -> ResourceRange {
        self.claim.range()
    }

    /// Puts the 68HC001 into reset.
    #[allow(clippy::unnecessary_wraps, reason = "kept fallible for future hardware acks")]
    fn hw_reset(&mut self) -> Result<(), AttachError> {
        info!(
            "leodrv: resetting 68HC001 (main control at {:#x})",
            regs::CTRL_BASE + regs::MAIN_CTRL
        );
        self.window
            .write_u32(regs::CTRL_BASE + regs::MAIN_CTRL, regs::CTRL_RESET);
        self.state = LifecycleState::Reset;
        Ok(())
    }

    /// Releases the 68HC001 into execution.
    #[allow(clippy::unnecessary_wraps, reason = "kept fallible for future hardware acks")]
    fn hw_start(&mut self) -> Result<(), AttachError> {
        info!(
            "leodrv: starting 68HC001 (aux control at {:#x})",
            regs::CTRL_BASE + regs::AUX_CTRL
        );
        self.window
            .write_u32(regs::CTRL_BASE + regs::AUX_CTRL, regs::CTRL_RUN);
        self.state = LifecycleState::Running;
        Ok(())
    }

    /// Stops the 68HC001 so it generates no further bus activity.
    ///
    /// The halt word is the reset word; the card acknowledges neither.
    fn halt(&mut self) {
        info!("leodrv: halting 68HC001");
        self.window
            .write_u32(regs::CTRL_BASE + regs::MAIN_CTRL, regs::CTRL_HALT);
        self.state = LifecycleState::Halted;
    }
}

impl<B: CardBus> Drop for LeoCard<'_, B> {
    fn drop(&mut self) {
        // A running controller is quiesced before its window goes away. A
        // card dropped mid-attach never started and takes no halt write.
        if self.state == LifecycleState::Running {
            self.halt();
        }
    }
}

// ---------------------------------------------------------------------------
// Attach
// ---------------------------------------------------------------------------

/// Attaches a candidate card and brings its 68HC001 up.
///
/// Acquisition order: enable the device, read the base address dword and
/// interrupt line from configuration space, gate on BAR 0 decoding to
/// memory, reserve the register block, map it, then issue the reset and
/// start writes. On success the returned handle is [`LifecycleState::Running`]
/// and owns everything acquired.
///
/// # Errors
///
/// Returns the [`AttachError`] kind of the first step that fails. Every
/// resource acquired before that step has already been released, in reverse
/// acquisition order, by the time the error returns.
pub fn attach<B: CardBus>(bus: &B, id: CardId) -> Result<LeoCard<'_, B>, AttachError> {
    match CardModel::from_id(id) {
        Some(model) => info!("leodrv: probing {}", model.name()),
        None => info!(
            "leodrv: probing unrecognized card {:04x}:{:04x}",
            id.vendor, id.device
        ),
    }

    let enabled =
        EnabledDevice::acquire(bus).inspect_err(|_| error!("leodrv: cannot enable device"))?;

    let base_register = bus
        .read_config_u32(config::BASE_ADDRESS_0)
        .inspect_err(|_| error!("leodrv: cannot read base address of card"))?;
    let irq_line = bus
        .read_config_u8(config::INTERRUPT_LINE)
        .inspect_err(|_| error!("leodrv: cannot read irq line from card config space"))?;

    // The raw base register dword is diagnostic; the decoded resource below
    // is authoritative for the claim.
    let range = match bus.bar(0) {
        BarResource::Memory { range, .. } => range,
        BarResource::Io { .. } | BarResource::Unused => {
            error!("leodrv: cannot find a proper device base address, aborting");
            return Err(AttachError::UnsupportedResourceType);
        }
    };

    info!("leodrv: leo at {:#x}, irq {}", base_register, irq_line);

    let claim = RegionClaim::claim(bus, range, DRIVER_NAME)
        .inspect_err(|_| error!("leodrv: register region request failed"))?;
    info!(
        "leodrv: enabled device and claimed registers {:#x} to {:#x}",
        range.start(),
        range.end()
    );

    let window = bus
        .map_range(claim.range())
        .inspect_err(|_| error!("leodrv: cannot map device address space"))?;
    info!("leodrv: mapped register window ({} bytes)", window.size());

    let mut card = LeoCard {
        window,
        claim,
        enabled,
        irq_line,
        state: LifecycleState::Mapped,
    };
    card.hw_reset()?;
    card.hw_start()?;

    Ok(card)
}

// ---------------------------------------------------------------------------
// Detach
// ---------------------------------------------------------------------------

/// Detaches a card, halting the 68HC001 and then releasing everything the
/// handle owns: window, range reservation, device enable state.
///
/// Accepts [`None`] so a dispatcher can forward removal notices for
/// candidates that never finished attaching; that call releases nothing.
/// Detach never fails, always runs to completion, and logs completion
/// either way.
pub fn detach<B: CardBus>(card: Option<LeoCard<'_, B>>) {
    if let Some(mut card) = card {
        card.halt();
    }
    info!("leodrv: released registers and disabled device");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
