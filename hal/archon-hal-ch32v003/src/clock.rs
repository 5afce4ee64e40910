//! `ClockControl` bound to the CH32V003 RCC, flash and AFIO blocks

use archon_core::clock::{ClockConfig, ClockSource, Clocks};
use archon_hal::clock::{
    ClockControl, MuxConfig, OscillatorEnable, PllInput, SysClockMux, WaitStates,
};

use crate::pac;

// RCC_CTLR bits
const CTLR_HSION: u32 = 1 << 0;
const CTLR_HSITRIM_SHIFT: u32 = 3;
const CTLR_HSEON: u32 = 1 << 16;
const CTLR_HSERDY: u32 = 1 << 17;
const CTLR_PLLON: u32 = 1 << 24;
const CTLR_PLLRDY: u32 = 1 << 25;

// RCC_CFGR0 fields
const CFGR0_SW_MASK: u32 = 0b11;
const CFGR0_SWS_SHIFT: u32 = 2;
const CFGR0_SWS_MASK: u32 = 0b11 << CFGR0_SWS_SHIFT;
const CFGR0_HPRE_SHIFT: u32 = 4;
const CFGR0_PLLSRC_HSE: u32 = 1 << 16;

// RCC_INTR: write-one-to-clear positions of every ready flag
const INTR_CLEAR_READY: u32 = 0x009F_0000;

// RCC_APB2PCENR bits
const APB2_AFIOEN: u32 = 1 << 0;
const APB2_IOPAEN: u32 = 1 << 2;
const APB2_IOPCEN: u32 = 1 << 4;
const APB2_IOPDEN: u32 = 1 << 5;

// AFIO_PCFR1: route PA1/PA2 to the crystal
const PCFR1_XTAL_REMAP: u32 = 1 << 15;

/// Crystal frequency assumed by external-source builds
pub const CRYSTAL_HZ: u32 = 24_000_000;

/// Clock configuration selected by the build's feature flags.
///
/// Compile-time choice, not a runtime parameter: exactly what the reset
/// sequencer brings up before `main`.
pub const fn boot_config() -> ClockConfig {
    let source = if cfg!(feature = "clock-hse-pll") {
        ClockSource::ExternalXtalPll
    } else if cfg!(feature = "clock-hse") {
        ClockSource::ExternalXtal
    } else if cfg!(feature = "clock-hsi-pll") {
        ClockSource::InternalOscPll
    } else {
        ClockSource::InternalOsc
    };
    let mut config = ClockConfig::new(source);
    config.crystal_hz = CRYSTAL_HZ;
    config
}

/// Frequencies the boot configuration produces
pub const fn boot_clocks() -> Clocks {
    boot_config().clocks()
}

/// Owner of the clock-control register protocol (RCC + flash wait-state
/// field + crystal pin remap).
pub struct SystemClock {
    _private: (),
}

impl SystemClock {
    pub(crate) const fn new() -> Self {
        SystemClock { _private: () }
    }

    /// Enable the GPIO port clocks (ports A, C and D)
    pub fn enable_port_clocks(&mut self) {
        let rcc = pac::rcc();
        rcc.apb2pcenr
            .set(rcc.apb2pcenr.get() | APB2_IOPAEN | APB2_IOPCEN | APB2_IOPDEN);
    }
}

impl ClockControl for SystemClock {
    fn set_flash_wait_states(&mut self, wait_states: WaitStates) {
        let latency = match wait_states {
            WaitStates::Zero => 0,
            WaitStates::One => 1,
        };
        pac::flash().actlr.set(latency);
    }

    fn clear_ready_flags(&mut self) {
        pac::rcc().intr.set(INTR_CLEAR_READY);
    }

    fn write_oscillator_enable(&mut self, enable: OscillatorEnable) {
        let mut value = u32::from(enable.trim) << CTLR_HSITRIM_SHIFT;
        if enable.internal {
            value |= CTLR_HSION;
        }
        if enable.external {
            value |= CTLR_HSEON;
        }
        if enable.pll {
            value |= CTLR_PLLON;
        }
        pac::rcc().ctlr.set(value);
    }

    fn write_mux(&mut self, config: MuxConfig) {
        let mut value = u32::from(config.prescaler.bits()) << CFGR0_HPRE_SHIFT;
        value |= config.select as u32 & CFGR0_SW_MASK;
        if let PllInput::ExternalXtal = config.pll_input {
            value |= CFGR0_PLLSRC_HSE;
        }
        pac::rcc().cfgr0.set(value);
    }

    fn select_source(&mut self, select: SysClockMux) {
        let rcc = pac::rcc();
        let value = (rcc.cfgr0.get() & !CFGR0_SW_MASK) | (select as u32 & CFGR0_SW_MASK);
        rcc.cfgr0.set(value);
    }

    fn external_ready(&self) -> bool {
        pac::rcc().ctlr.get() & CTLR_HSERDY != 0
    }

    fn pll_ready(&self) -> bool {
        pac::rcc().ctlr.get() & CTLR_PLLRDY != 0
    }

    fn active_source(&self) -> SysClockMux {
        match (pac::rcc().cfgr0.get() & CFGR0_SWS_MASK) >> CFGR0_SWS_SHIFT {
            0b00 => SysClockMux::InternalOsc,
            0b01 => SysClockMux::ExternalXtal,
            _ => SysClockMux::Pll,
        }
    }

    fn remap_crystal_pins(&mut self) {
        let rcc = pac::rcc();
        rcc.apb2pcenr.set(rcc.apb2pcenr.get() | APB2_AFIOEN);
        let afio = pac::afio();
        afio.pcfr1.set(afio.pcfr1.get() | PCFR1_XTAL_REMAP);
    }
}
