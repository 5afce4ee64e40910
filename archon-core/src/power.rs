//! Power state controller
//!
//! Two power-down depths: sleep (core halts, peripherals and RAM
//! retained) and standby (deep sleep, most state lost). Each can wake on
//! an interrupt or on an event, selected by which wait instruction is
//! issued. The automatic wake-up timer is an independent event source
//! running from the low-speed internal clock, typically paired with
//! standby for periodic wake.

use archon_hal::power::{AwuPrescaler, PowerControl};

/// What brings the core back out of a power-down state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeMode {
    /// Wake on an enabled interrupt (its handler runs on wake)
    Interrupt,
    /// Wake on an event (no handler is invoked)
    Event,
}

/// Halt the core until the selected wake trigger arrives. Peripherals
/// and RAM are retained.
pub fn sleep<P: PowerControl>(regs: &mut P, wake: WakeMode) {
    regs.set_standby_enable(false);
    wait(regs, wake);
}

/// Enter standby (deep sleep) until the selected wake trigger arrives.
///
/// The deep-sleep flag is raised just before the wait instruction and
/// lowered immediately after wake, so an intervening reset or a later
/// plain [`sleep`] is unaffected. Re-entry is valid immediately after
/// this returns.
pub fn standby<P: PowerControl>(regs: &mut P, wake: WakeMode) {
    regs.set_standby_enable(true);
    regs.set_deep_sleep_flag(true);
    wait(regs, wake);
    regs.set_deep_sleep_flag(false);
}

fn wait<P: PowerControl>(regs: &mut P, wake: WakeMode) {
    match wake {
        WakeMode::Interrupt => regs.wait_for_interrupt(),
        WakeMode::Event => regs.wait_for_event(),
    }
}

/// Configure and start the automatic wake-up timer as an event source.
///
/// The timer counts the low-speed internal clock through `prescaler` up
/// to `window` (6-bit), then raises its event line. Enabling it also
/// enables the power-control module's bus clock gate, which the counter
/// registers live behind.
pub fn enable_auto_wakeup<P: PowerControl>(regs: &mut P, prescaler: AwuPrescaler, window: u8) {
    regs.enable_low_speed_clock();
    regs.route_wakeup_event();
    regs.enable_power_module();
    regs.configure_wakeup_counter(prescaler, window);
    regs.enable_wakeup_counter();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Standby(bool),
        DeepSleep(bool),
        WaitInterrupt,
        WaitEvent,
        LowSpeedClock,
        RouteEvent,
        PowerModule,
        ConfigureCounter(AwuPrescaler, u8),
        EnableCounter,
    }

    /// Simulated power-control registers. The wait instructions "wake"
    /// immediately but record the deep-sleep flag state at the moment
    /// they executed.
    struct FakePower {
        ops: Vec<Op>,
        standby: bool,
        deep_sleep: bool,
        deep_sleep_at_wait: Option<bool>,
    }

    impl FakePower {
        fn new() -> Self {
            FakePower {
                ops: Vec::new(),
                standby: false,
                deep_sleep: false,
                deep_sleep_at_wait: None,
            }
        }
    }

    impl PowerControl for FakePower {
        fn set_standby_enable(&mut self, standby: bool) {
            self.ops.push(Op::Standby(standby));
            self.standby = standby;
        }

        fn set_deep_sleep_flag(&mut self, on: bool) {
            self.ops.push(Op::DeepSleep(on));
            self.deep_sleep = on;
        }

        fn wait_for_interrupt(&mut self) {
            self.ops.push(Op::WaitInterrupt);
            self.deep_sleep_at_wait = Some(self.deep_sleep);
        }

        fn wait_for_event(&mut self) {
            self.ops.push(Op::WaitEvent);
            self.deep_sleep_at_wait = Some(self.deep_sleep);
        }

        fn enable_low_speed_clock(&mut self) {
            self.ops.push(Op::LowSpeedClock);
        }

        fn route_wakeup_event(&mut self) {
            self.ops.push(Op::RouteEvent);
        }

        fn enable_power_module(&mut self) {
            self.ops.push(Op::PowerModule);
        }

        fn configure_wakeup_counter(&mut self, prescaler: AwuPrescaler, window: u8) {
            self.ops.push(Op::ConfigureCounter(prescaler, window));
        }

        fn enable_wakeup_counter(&mut self) {
            self.ops.push(Op::EnableCounter);
        }
    }

    #[test]
    fn sleep_issues_selected_wait_instruction() {
        let mut regs = FakePower::new();
        sleep(&mut regs, WakeMode::Interrupt);
        assert_eq!(regs.ops, [Op::Standby(false), Op::WaitInterrupt]);
        assert_eq!(regs.deep_sleep_at_wait, Some(false));

        let mut regs = FakePower::new();
        sleep(&mut regs, WakeMode::Event);
        assert_eq!(regs.ops, [Op::Standby(false), Op::WaitEvent]);
    }

    #[test]
    fn standby_clears_deep_sleep_after_wake() {
        for wake in [WakeMode::Interrupt, WakeMode::Event] {
            let mut regs = FakePower::new();
            standby(&mut regs, wake);
            // flag was up when the wait instruction executed...
            assert_eq!(regs.deep_sleep_at_wait, Some(true));
            // ...and is down again after wake, whatever woke us
            assert!(!regs.deep_sleep);
            assert!(regs.standby);
        }
    }

    #[test]
    fn standby_is_immediately_reenterable() {
        let mut regs = FakePower::new();
        standby(&mut regs, WakeMode::Event);
        standby(&mut regs, WakeMode::Event);
        assert_eq!(regs.deep_sleep_at_wait, Some(true));
        assert!(!regs.deep_sleep);

        // a plain sleep after standby must stay shallow
        sleep(&mut regs, WakeMode::Interrupt);
        assert_eq!(regs.deep_sleep_at_wait, Some(false));
    }

    #[test]
    fn auto_wakeup_enables_clock_and_power_module_first() {
        let mut regs = FakePower::new();
        enable_auto_wakeup(&mut regs, AwuPrescaler::Div2048, 63);
        assert_eq!(
            regs.ops,
            [
                Op::LowSpeedClock,
                Op::RouteEvent,
                Op::PowerModule,
                Op::ConfigureCounter(AwuPrescaler::Div2048, 63),
                Op::EnableCounter,
            ]
        );
    }
}
