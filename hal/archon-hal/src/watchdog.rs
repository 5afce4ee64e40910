//! Independent watchdog register behaviors
//!
//! The watchdog's configuration registers sit behind an unlock protocol
//! and each write must be accepted by the (slow) watchdog clock domain
//! before the next one, signalled by a status bit clearing.

/// Prescaler between the low-speed internal clock and the watchdog
/// counter. Raw values match the hardware field encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum WatchdogPrescaler {
    Div4 = 0b000,
    Div8 = 0b001,
    Div16 = 0b010,
    Div32 = 0b011,
    Div64 = 0b100,
    Div128 = 0b101,
    Div256 = 0b111,
}

impl WatchdogPrescaler {
    /// Raw field encoding
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Watchdog register behaviors.
///
/// The unlock/latch/enable operations are fixed magic-value writes on
/// the real hardware; the values themselves are a chip-crate detail.
pub trait WatchdogControl {
    /// Enable the watchdog's low-speed clock source and wait until it is
    /// stable
    fn enable_low_speed_clock(&mut self);

    /// Make the prescaler and reload registers writable
    fn unlock(&mut self);

    /// Prescaler write still being absorbed by the watchdog clock domain
    fn prescaler_busy(&self) -> bool;

    /// Reload write still being absorbed by the watchdog clock domain
    fn reload_busy(&self) -> bool;

    /// Program the counter prescaler
    fn set_prescaler(&mut self, prescaler: WatchdogPrescaler);

    /// Program the counter reload value (12-bit)
    fn set_reload(&mut self, counts: u16);

    /// Latch the reload value into the running counter ("feed")
    fn latch_reload(&mut self);

    /// Start the watchdog. There is no inverse operation: once running
    /// it counts until reset or until its clock source is cut.
    fn enable(&mut self);
}
