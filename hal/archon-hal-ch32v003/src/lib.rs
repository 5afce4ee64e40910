//! CH32V003-specific support for the Archon bring-up core
//!
//! This crate binds the shared `archon-hal` behavior traits to the
//! CH32V003 memory map, plus the chip-specific pieces that have no
//! board-agnostic expression:
//!
//! - Memory-mapped register blocks for the touched peripherals
//! - `ClockControl` / `PowerControl` / `WatchdogControl` implementations
//! - The reset sequencer and trap-vector installation (`rt`, target only)
//! - Vector-table layout (slot indices, handler ABI, fail-stop default)
//! - Free-running system tick with `embedded-hal` delay support
//!
//! The interrupt-masking primitive comes from the `riscv` crate's
//! single-hart critical-section implementation.

#![no_std]

pub mod clock;
pub mod pac;
pub mod power;
#[cfg(target_arch = "riscv32")]
mod rt;
pub mod systick;
pub mod vector;
pub mod watchdog;

use clock::SystemClock;
use power::PowerController;
use systick::SysTick;
use watchdog::Iwdg;

/// One-time ownership of the chip's bring-up peripherals.
///
/// Global hardware register state is process-wide singleton state; each
/// peripheral's accessible fields live behind exactly one owner value,
/// handed out once, so components cannot alias each other's register
/// protocols by accident.
pub struct Peripherals {
    pub clock: SystemClock,
    pub power: PowerController,
    pub watchdog: Iwdg,
    pub systick: SysTick,
}

static mut PERIPHERALS_TAKEN: bool = false;

impl Peripherals {
    /// Claim the peripherals. Returns `None` after the first call.
    pub fn take() -> Option<Self> {
        critical_section::with(|_| unsafe {
            if PERIPHERALS_TAKEN {
                None
            } else {
                PERIPHERALS_TAKEN = true;
                Some(Self::steal())
            }
        })
    }

    /// Conjure the peripherals regardless of ownership.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other owner is using the register
    /// blocks concurrently. The reset sequencer uses this before `main`
    /// runs, when no other owner can exist yet.
    pub unsafe fn steal() -> Self {
        Peripherals {
            clock: SystemClock::new(),
            power: PowerController::new(),
            watchdog: Iwdg::new(),
            systick: SysTick::new(),
        }
    }
}

/// System initialization, invoked by the reset sequencer before `main`.
///
/// Brings the clock tree to the configuration selected by the build's
/// feature flags, then starts the optional system tick and GPIO port
/// clocks. Applications normally never call this themselves.
pub fn sys_init() {
    // Pre-main: the singleton is untouched, so stealing is sound.
    let mut p = unsafe { Peripherals::steal() };

    critical_section::with(|cs| {
        archon_core::clock::configure(cs, &mut p.clock, &clock::boot_config());
    });

    if cfg!(feature = "tick") {
        p.systick.start();
    }

    if cfg!(feature = "gpio") {
        p.clock.enable_port_clocks();
    }
}
