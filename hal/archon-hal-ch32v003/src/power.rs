//! `PowerControl` bound to the CH32V003 PWR, EXTI, RCC and core-control
//! blocks

use archon_hal::power::{AwuPrescaler, PowerControl};

use crate::pac;

// PWR_CTLR bits
const CTLR_PDDS: u32 = 1 << 1;

// PWR_AWUCSR bits
const AWUCSR_AWUEN: u32 = 1 << 1;

// PFIC_SCTLR bits
const SCTLR_SLEEPDEEP: u32 = 1 << 2;
const SCTLR_WFITOWFE: u32 = 1 << 3;

// RCC_RSTSCKR bits
const RSTSCKR_LSION: u32 = 1 << 0;
const RSTSCKR_LSIRDY: u32 = 1 << 1;

// RCC_APB1PCENR bits
const APB1_PWREN: u32 = 1 << 28;

// EXTI line of the automatic wake-up timer
const AWU_EVENT_LINE: u32 = 1 << 9;

// AWU window register width
const AWUWR_MASK: u32 = 0x3F;

/// Owner of the power-control register protocol.
pub struct PowerController {
    _private: (),
}

impl PowerController {
    pub(crate) const fn new() -> Self {
        PowerController { _private: () }
    }
}

impl PowerControl for PowerController {
    fn set_standby_enable(&mut self, standby: bool) {
        let pwr = pac::pwr();
        let value = if standby {
            pwr.ctlr.get() | CTLR_PDDS
        } else {
            pwr.ctlr.get() & !CTLR_PDDS
        };
        pwr.ctlr.set(value);
    }

    fn set_deep_sleep_flag(&mut self, on: bool) {
        let pfic = pac::pfic();
        let value = if on {
            pfic.sctlr.get() | SCTLR_SLEEPDEEP
        } else {
            pfic.sctlr.get() & !SCTLR_SLEEPDEEP
        };
        pfic.sctlr.set(value);
    }

    fn wait_for_interrupt(&mut self) {
        riscv::asm::wfi();
    }

    fn wait_for_event(&mut self) {
        // the core has no discrete WFE instruction; while this flag is
        // up the next WFI waits for an event instead
        let pfic = pac::pfic();
        pfic.sctlr.set(pfic.sctlr.get() | SCTLR_WFITOWFE);
        riscv::asm::wfi();
        pfic.sctlr.set(pfic.sctlr.get() & !SCTLR_WFITOWFE);
    }

    fn enable_low_speed_clock(&mut self) {
        let rcc = pac::rcc();
        rcc.rstsckr.set(rcc.rstsckr.get() | RSTSCKR_LSION);
        while rcc.rstsckr.get() & RSTSCKR_LSIRDY == 0 {}
    }

    fn route_wakeup_event(&mut self) {
        let exti = pac::exti();
        exti.evenr.set(exti.evenr.get() | AWU_EVENT_LINE);
        exti.ftenr.set(exti.ftenr.get() | AWU_EVENT_LINE);
    }

    fn enable_power_module(&mut self) {
        let rcc = pac::rcc();
        rcc.apb1pcenr.set(rcc.apb1pcenr.get() | APB1_PWREN);
    }

    fn configure_wakeup_counter(&mut self, prescaler: AwuPrescaler, window: u8) {
        let pwr = pac::pwr();
        pwr.awupsc.set(u32::from(prescaler.bits()));
        pwr.awuwr.set(u32::from(window) & AWUWR_MASK);
    }

    fn enable_wakeup_counter(&mut self) {
        pac::pwr().awucsr.set(AWUCSR_AWUEN);
    }
}
