//! Independent watchdog supervisor
//!
//! A free-running countdown timer on the low-speed internal clock.
//! Once started it can never be stopped: the only way to silence it is
//! to cut its clock source entirely (in practice, a hardware reset).
//! This type therefore offers no stop operation, and `started` is
//! monotonic for the life of the value.
//!
//! All configuration registers are unlock-gated, and every write must be
//! absorbed by the slow watchdog clock domain before the next one.

use archon_hal::watchdog::{WatchdogControl, WatchdogPrescaler};
use critical_section::CriticalSection;

/// Longest representable period. The counter holds 12 bits at 2 ms per
/// count (low-speed clock through the fixed /256 prescaler).
pub const MAX_PERIOD_MS: u16 = 8191;

/// Counter resolution with the fixed prescaler
const MS_PER_COUNT: u16 = 2;

/// Prescaler the supervisor always programs
const PRESCALER: WatchdogPrescaler = WatchdogPrescaler::Div256;

/// Rejected watchdog request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogError {
    /// Period was zero or beyond the counter's reach; it must be
    /// rejected rather than silently wrapped
    InvalidPeriod,
}

/// Counter reload value for a period in milliseconds.
pub const fn reload_counts(period_ms: u16) -> Result<u16, WatchdogError> {
    if period_ms == 0 || period_ms > MAX_PERIOD_MS {
        return Err(WatchdogError::InvalidPeriod);
    }
    Ok(period_ms / MS_PER_COUNT)
}

/// Supervisor for the independent watchdog.
#[derive(Debug)]
pub struct IndependentWatchdog {
    started: bool,
}

impl Default for IndependentWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl IndependentWatchdog {
    pub const fn new() -> Self {
        IndependentWatchdog { started: false }
    }

    /// Whether [`start`](Self::start) has run. Monotonic: there is no
    /// way back to `false`.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Start the watchdog with the given period.
    ///
    /// The unlock/write/latch sequence depends on multi-step register
    /// state; the critical-section token keeps interrupt handlers from
    /// interleaving their own watchdog accesses mid-protocol.
    pub fn start<W: WatchdogControl>(
        &mut self,
        _cs: CriticalSection<'_>,
        regs: &mut W,
        period_ms: u16,
    ) -> Result<(), WatchdogError> {
        let counts = reload_counts(period_ms)?;
        regs.enable_low_speed_clock();
        regs.unlock();
        while regs.prescaler_busy() {}
        regs.set_prescaler(PRESCALER);
        while regs.reload_busy() {}
        regs.set_reload(counts);
        regs.latch_reload();
        regs.enable();
        self.started = true;
        Ok(())
    }

    /// Reload the counter with a fresh period.
    ///
    /// Touches only the reload register; the enable state is never
    /// written again after [`start`](Self::start).
    pub fn reload<W: WatchdogControl>(
        &mut self,
        _cs: CriticalSection<'_>,
        regs: &mut W,
        period_ms: u16,
    ) -> Result<(), WatchdogError> {
        let counts = reload_counts(period_ms)?;
        regs.unlock();
        while regs.reload_busy() {}
        regs.set_reload(counts);
        regs.latch_reload();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        LowSpeedClock,
        Unlock,
        Prescaler(WatchdogPrescaler),
        Reload(u16),
        Latch,
        Enable,
    }

    /// Simulated watchdog registers; the clock-domain busy flags are
    /// never busy so the protocols run straight through.
    struct FakeWatchdog {
        ops: Vec<Op>,
        prescaler: Option<WatchdogPrescaler>,
        reload: Option<u16>,
        enable_writes: u32,
    }

    impl FakeWatchdog {
        fn new() -> Self {
            FakeWatchdog {
                ops: Vec::new(),
                prescaler: None,
                reload: None,
                enable_writes: 0,
            }
        }
    }

    impl WatchdogControl for FakeWatchdog {
        fn enable_low_speed_clock(&mut self) {
            self.ops.push(Op::LowSpeedClock);
        }

        fn unlock(&mut self) {
            self.ops.push(Op::Unlock);
        }

        fn prescaler_busy(&self) -> bool {
            false
        }

        fn reload_busy(&self) -> bool {
            false
        }

        fn set_prescaler(&mut self, prescaler: WatchdogPrescaler) {
            self.ops.push(Op::Prescaler(prescaler));
            self.prescaler = Some(prescaler);
        }

        fn set_reload(&mut self, counts: u16) {
            self.ops.push(Op::Reload(counts));
            self.reload = Some(counts);
        }

        fn latch_reload(&mut self) {
            self.ops.push(Op::Latch);
        }

        fn enable(&mut self) {
            self.ops.push(Op::Enable);
            self.enable_writes += 1;
        }
    }

    fn cs() -> CriticalSection<'static> {
        unsafe { CriticalSection::new() }
    }

    #[test]
    fn start_programs_half_period() {
        let mut regs = FakeWatchdog::new();
        let mut wd = IndependentWatchdog::new();
        wd.start(cs(), &mut regs, 4000).unwrap();

        assert_eq!(regs.reload, Some(2000));
        assert_eq!(regs.prescaler, Some(WatchdogPrescaler::Div256));
        assert_eq!(regs.enable_writes, 1);
        assert!(wd.is_started());
        assert_eq!(
            regs.ops,
            [
                Op::LowSpeedClock,
                Op::Unlock,
                Op::Prescaler(WatchdogPrescaler::Div256),
                Op::Reload(2000),
                Op::Latch,
                Op::Enable,
            ]
        );
    }

    #[test]
    fn start_accepts_boundary_period() {
        let mut regs = FakeWatchdog::new();
        let mut wd = IndependentWatchdog::new();
        wd.start(cs(), &mut regs, MAX_PERIOD_MS).unwrap();
        assert_eq!(regs.reload, Some(4095));
    }

    #[test]
    fn out_of_range_periods_are_rejected_untouched() {
        let mut regs = FakeWatchdog::new();
        let mut wd = IndependentWatchdog::new();

        assert_eq!(
            wd.start(cs(), &mut regs, 0),
            Err(WatchdogError::InvalidPeriod)
        );
        assert_eq!(
            wd.start(cs(), &mut regs, MAX_PERIOD_MS + 1),
            Err(WatchdogError::InvalidPeriod)
        );
        // nothing was written and the watchdog never started
        assert!(regs.ops.is_empty());
        assert!(!wd.is_started());
    }

    #[test]
    fn reload_never_touches_enable_state() {
        let mut regs = FakeWatchdog::new();
        let mut wd = IndependentWatchdog::new();
        wd.start(cs(), &mut regs, 4000).unwrap();
        let ops_after_start = regs.ops.len();

        wd.reload(cs(), &mut regs, 1000).unwrap();
        assert_eq!(regs.reload, Some(500));
        assert_eq!(regs.enable_writes, 1);
        assert_eq!(
            &regs.ops[ops_after_start..],
            [Op::Unlock, Op::Reload(500), Op::Latch]
        );
        // still started; nothing can unset that
        assert!(wd.is_started());
    }

    #[test]
    fn reload_validates_period_like_start() {
        let mut regs = FakeWatchdog::new();
        let mut wd = IndependentWatchdog::new();
        wd.start(cs(), &mut regs, 4000).unwrap();
        assert_eq!(
            wd.reload(cs(), &mut regs, MAX_PERIOD_MS + 1),
            Err(WatchdogError::InvalidPeriod)
        );
    }

    proptest! {
        #[test]
        fn reload_counts_halve_every_valid_period(period_ms in 1u16..=MAX_PERIOD_MS) {
            let counts = reload_counts(period_ms).unwrap();
            prop_assert_eq!(counts, period_ms / 2);
            prop_assert!(counts <= 4095);
        }
    }
}
