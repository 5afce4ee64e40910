//! Demo firmware for CH32V003 boards
//!
//! The reset sequencer brings the system up (clock variant selected by
//! feature flags), then this payload arms the independent watchdog and
//! dozes in standby with the automatic wake-up timer as the event
//! source, feeding the watchdog on every wake. If the loop ever wedges,
//! the watchdog forces a reset within its period.

#![no_std]
#![no_main]

use defmt::info;
use {defmt_rtt as _, panic_halt as _};

use archon_core::power::{self, WakeMode};
use archon_core::watchdog::IndependentWatchdog;
use archon_hal::power::AwuPrescaler;
use archon_hal_ch32v003 as chip;
use chip::vector::{Interrupt, RawVectorTable};

/// Hardware dispatch table. Every slot without an override here
/// fail-stops; the binding is fixed at build time.
#[used]
#[link_section = ".trap_vectors"]
static VECTORS: RawVectorTable = chip::vector::vector_table()
    .with(Interrupt::HardFault.slot(), hard_fault)
    .finalize();

/// Watchdog period; the wake-up timer fires well inside it
const WATCHDOG_PERIOD_MS: u16 = 4000;

#[no_mangle]
extern "C" fn main() -> ! {
    info!(
        "archon up, sysclk {} Hz",
        chip::clock::boot_clocks().sysclk_hz
    );

    let mut p = chip::Peripherals::take().unwrap();

    let mut watchdog = IndependentWatchdog::new();
    critical_section::with(|cs| watchdog.start(cs, &mut p.watchdog, WATCHDOG_PERIOD_MS)).unwrap();

    // low-speed clock 128 kHz / 2048, window 63: wakes about once a second
    power::enable_auto_wakeup(&mut p.power, AwuPrescaler::Div2048, 63);

    loop {
        power::standby(&mut p.power, WakeMode::Event);
        critical_section::with(|cs| watchdog.reload(cs, &mut p.watchdog, WATCHDOG_PERIOD_MS))
            .unwrap();
        info!("wake");
    }
}

/// Park on hard faults; a started watchdog brings the system back.
unsafe extern "riscv-interrupt-m" fn hard_fault() {
    loop {}
}
