//! Clock configuration state machine
//!
//! Sequences oscillator enable, ready-wait, prescaler programming and
//! source-switch confirmation for the four selectable system clock
//! configurations. Every switch keeps a previously-working oscillator
//! enabled until the replacement's ready flag is observed, so a dead or
//! slow crystal parks the system on the internal oscillator instead of
//! leaving it unclocked.
//!
//! Ready waits are unbounded on purpose: a hardware transition has no
//! meaningful partial-completion state to abort into. The independent
//! watchdog, if armed, is the recovery path for a source that never
//! stabilizes.

use archon_hal::clock::{
    AhbPrescaler, ClockControl, MuxConfig, OscillatorEnable, PllInput, SysClockMux, WaitStates,
};
use critical_section::CriticalSection;

/// Internal RC oscillator frequency
pub const INTERNAL_OSC_HZ: u32 = 24_000_000;
/// Fixed PLL multiplication factor
pub const PLL_MUL: u32 = 2;
/// Factory midpoint trim for the internal oscillator
pub const DEFAULT_TRIM: u8 = 0x10;
/// Highest frequency readable with zero flash wait-states
const ZERO_WAIT_MAX_HZ: u32 = 24_000_000;

/// Selectable system clock configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal RC oscillator, the power-on default
    InternalOsc,
    /// Internal RC oscillator through the x2 PLL
    InternalOscPll,
    /// External crystal
    ExternalXtal,
    /// External crystal through the x2 PLL
    ExternalXtalPll,
}

impl ClockSource {
    /// Mux position the hardware reports once this configuration is
    /// active
    pub const fn active_mux(self) -> SysClockMux {
        match self {
            ClockSource::InternalOsc => SysClockMux::InternalOsc,
            ClockSource::InternalOscPll => SysClockMux::Pll,
            ClockSource::ExternalXtal => SysClockMux::ExternalXtal,
            ClockSource::ExternalXtalPll => SysClockMux::Pll,
        }
    }
}

/// Requested clock configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub source: ClockSource,
    /// AHB prescaler. The external-crystal protocols switch with a fixed
    /// /1 prescaler; this field applies to the internal-oscillator
    /// variants only.
    pub prescaler: AhbPrescaler,
    /// External crystal frequency, used for frequency math only
    pub crystal_hz: u32,
    /// Internal oscillator trim
    pub trim: u8,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new(ClockSource::InternalOsc)
    }
}

impl ClockConfig {
    pub const fn new(source: ClockSource) -> Self {
        Self {
            source,
            prescaler: AhbPrescaler::Div1,
            crystal_hz: 24_000_000,
            trim: DEFAULT_TRIM,
        }
    }

    /// Resulting system clock frequency
    pub const fn sysclk_hz(&self) -> u32 {
        match self.source {
            ClockSource::InternalOsc => INTERNAL_OSC_HZ,
            ClockSource::InternalOscPll => INTERNAL_OSC_HZ * PLL_MUL,
            ClockSource::ExternalXtal => self.crystal_hz,
            ClockSource::ExternalXtalPll => self.crystal_hz * PLL_MUL,
        }
    }

    /// Resulting core/peripheral clock frequency
    pub const fn hclk_hz(&self) -> u32 {
        match self.source {
            ClockSource::InternalOsc | ClockSource::InternalOscPll => {
                self.sysclk_hz() / self.prescaler.divisor()
            }
            // the external protocols fix the prescaler at /1
            ClockSource::ExternalXtal | ClockSource::ExternalXtalPll => self.sysclk_hz(),
        }
    }

    /// Wait-states required at the resulting frequency
    pub const fn wait_states(&self) -> WaitStates {
        if self.sysclk_hz() > ZERO_WAIT_MAX_HZ {
            WaitStates::One
        } else {
            WaitStates::Zero
        }
    }

    /// Frozen view of the frequencies this configuration produces
    pub const fn clocks(&self) -> Clocks {
        Clocks {
            sysclk_hz: self.sysclk_hz(),
            hclk_hz: self.hclk_hz(),
        }
    }
}

/// Frequencies produced by a completed configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clocks {
    pub sysclk_hz: u32,
    pub hclk_hz: u32,
}

/// Run the configuration protocol for the requested source.
///
/// The critical-section token proves interrupts stay masked for the
/// whole register sequence; an interrupt handler touching the clock
/// registers mid-protocol would corrupt the multi-step state.
///
/// Does not return until the requested source is confirmed active
/// (except for the internal oscillator, which is the power-on default
/// and needs no confirmation). A source that never reports ready makes
/// this spin forever with the previous source still driving the system.
pub fn configure<C: ClockControl>(
    _cs: CriticalSection<'_>,
    regs: &mut C,
    config: &ClockConfig,
) -> Clocks {
    match config.source {
        ClockSource::InternalOsc => internal(regs, config),
        ClockSource::InternalOscPll => internal_pll(regs, config),
        ClockSource::ExternalXtal => external(regs, config),
        ClockSource::ExternalXtalPll => external_pll(regs, config),
    }
    config.clocks()
}

/// Internal oscillator, undivided path. Already the active source at
/// power-on, so there is nothing to confirm.
fn internal<C: ClockControl>(regs: &mut C, config: &ClockConfig) {
    regs.set_flash_wait_states(config.wait_states());
    regs.clear_ready_flags();
    regs.write_mux(MuxConfig {
        prescaler: config.prescaler,
        pll_input: PllInput::InternalOsc,
        select: SysClockMux::InternalOsc,
    });
    regs.write_oscillator_enable(OscillatorEnable {
        internal: true,
        external: false,
        pll: false,
        trim: config.trim,
    });
}

fn internal_pll<C: ClockControl>(regs: &mut C, config: &ClockConfig) {
    regs.set_flash_wait_states(config.wait_states());
    regs.clear_ready_flags();
    regs.write_mux(MuxConfig {
        prescaler: config.prescaler,
        pll_input: PllInput::InternalOsc,
        select: SysClockMux::InternalOsc,
    });
    regs.write_oscillator_enable(OscillatorEnable {
        internal: true,
        external: false,
        pll: true,
        trim: config.trim,
    });
    while !regs.pll_ready() {}
    regs.select_source(SysClockMux::Pll);
    while regs.active_source() != SysClockMux::Pll {}
}

fn external<C: ClockControl>(regs: &mut C, config: &ClockConfig) {
    regs.remap_crystal_pins();
    regs.set_flash_wait_states(config.wait_states());
    // keep the internal oscillator and PLL running until the crystal is
    // confirmed as the active source
    regs.write_oscillator_enable(OscillatorEnable {
        internal: true,
        external: true,
        pll: true,
        trim: config.trim,
    });
    while !regs.external_ready() {}
    regs.write_mux(MuxConfig {
        prescaler: AhbPrescaler::Div1,
        pll_input: PllInput::InternalOsc,
        select: SysClockMux::ExternalXtal,
    });
    while regs.active_source() != SysClockMux::ExternalXtal {}
    // crystal confirmed; the fallback can go
    regs.write_oscillator_enable(OscillatorEnable {
        internal: false,
        external: true,
        pll: false,
        trim: config.trim,
    });
}

fn external_pll<C: ClockControl>(regs: &mut C, config: &ClockConfig) {
    regs.remap_crystal_pins();
    regs.write_oscillator_enable(OscillatorEnable {
        internal: true,
        external: true,
        pll: true,
        trim: config.trim,
    });
    while !regs.external_ready() {}
    // transient safe state: run directly from the crystal while the PLL
    // is retargeted. The hardware takes this select without a ready
    // wait; the crystal was confirmed ready above.
    regs.write_mux(MuxConfig {
        prescaler: AhbPrescaler::Div1,
        pll_input: PllInput::InternalOsc,
        select: SysClockMux::ExternalXtal,
    });
    regs.set_flash_wait_states(config.wait_states());
    // PLL must be off while its input mux changes
    regs.write_oscillator_enable(OscillatorEnable {
        internal: false,
        external: true,
        pll: false,
        trim: config.trim,
    });
    regs.write_mux(MuxConfig {
        prescaler: AhbPrescaler::Div1,
        pll_input: PllInput::ExternalXtal,
        select: SysClockMux::ExternalXtal,
    });
    regs.write_oscillator_enable(OscillatorEnable {
        internal: false,
        external: true,
        pll: true,
        trim: config.trim,
    });
    while !regs.pll_ready() {}
    regs.write_mux(MuxConfig {
        prescaler: AhbPrescaler::Div1,
        pll_input: PllInput::ExternalXtal,
        select: SysClockMux::Pll,
    });
    while regs.active_source() != SysClockMux::Pll {}
}
