//! `WatchdogControl` bound to the CH32V003 independent watchdog

use archon_hal::watchdog::{WatchdogControl, WatchdogPrescaler};

use crate::pac;

// IWDG_CTLR magic values
const KEY_UNLOCK: u32 = 0x5555;
const KEY_RELOAD: u32 = 0xAAAA;
const KEY_ENABLE: u32 = 0xCCCC;

// IWDG_STATR bits
const STATR_PVU: u32 = 1 << 0;
const STATR_RVU: u32 = 1 << 1;

// IWDG_RLDR width
const RLDR_MASK: u32 = 0x0FFF;

// RCC_RSTSCKR bits (the watchdog runs from the low-speed internal clock)
const RSTSCKR_LSION: u32 = 1 << 0;
const RSTSCKR_LSIRDY: u32 = 1 << 1;

/// Owner of the independent watchdog register protocol.
pub struct Iwdg {
    _private: (),
}

impl Iwdg {
    pub(crate) const fn new() -> Self {
        Iwdg { _private: () }
    }
}

impl WatchdogControl for Iwdg {
    fn enable_low_speed_clock(&mut self) {
        let rcc = pac::rcc();
        rcc.rstsckr.set(rcc.rstsckr.get() | RSTSCKR_LSION);
        while rcc.rstsckr.get() & RSTSCKR_LSIRDY == 0 {}
    }

    fn unlock(&mut self) {
        pac::iwdg().ctlr.set(KEY_UNLOCK);
    }

    fn prescaler_busy(&self) -> bool {
        pac::iwdg().statr.get() & STATR_PVU != 0
    }

    fn reload_busy(&self) -> bool {
        pac::iwdg().statr.get() & STATR_RVU != 0
    }

    fn set_prescaler(&mut self, prescaler: WatchdogPrescaler) {
        pac::iwdg().pscr.set(u32::from(prescaler.bits()));
    }

    fn set_reload(&mut self, counts: u16) {
        pac::iwdg().rldr.set(u32::from(counts) & RLDR_MASK);
    }

    fn latch_reload(&mut self) {
        pac::iwdg().ctlr.set(KEY_RELOAD);
    }

    fn enable(&mut self) {
        pac::iwdg().ctlr.set(KEY_ENABLE);
    }
}
