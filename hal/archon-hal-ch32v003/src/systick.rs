//! Free-running system tick
//!
//! The 32-bit core counter running at the AHB clock, used for busy-wait
//! delays. The frequency is fixed at build time by the selected clock
//! variant, so the conversion factors are constants.

use embedded_hal::delay::DelayNs;

use crate::clock;
use crate::pac;

// STK_CTLR bits
const CTLR_STE: u32 = 1 << 0;
const CTLR_STCLK: u32 = 1 << 2;

/// Owner of the system tick counter.
pub struct SysTick {
    hclk_hz: u32,
}

impl SysTick {
    pub(crate) const fn new() -> Self {
        SysTick {
            hclk_hz: clock::boot_clocks().hclk_hz,
        }
    }

    /// Start the counter, clocked by the undivided AHB clock
    pub fn start(&mut self) {
        pac::stk().ctlr.set(CTLR_STE | CTLR_STCLK);
    }

    /// Current counter value
    pub fn now(&self) -> u32 {
        pac::stk().cntl.get()
    }

    /// Busy-wait for `ticks` counts, wrap-safe
    pub fn delay_ticks(&mut self, ticks: u32) {
        let end = self.now().wrapping_add(ticks);
        while (self.now().wrapping_sub(end) as i32) < 0 {}
    }

    /// Busy-wait for `us` microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delay_ticks(us.saturating_mul(self.hclk_hz / 1_000_000));
    }

    /// Busy-wait for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay_ticks(ms.saturating_mul(self.hclk_hz / 1_000));
    }
}

impl DelayNs for SysTick {
    fn delay_ns(&mut self, ns: u32) {
        let ticks = u64::from(ns) * u64::from(self.hclk_hz) / 1_000_000_000;
        self.delay_ticks(ticks as u32);
    }

    fn delay_us(&mut self, us: u32) {
        SysTick::delay_us(self, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        SysTick::delay_ms(self, ms);
    }
}
