//! CH32V003 vector-table layout
//!
//! The hardware dispatches through a 39-slot table of absolute handler
//! addresses. Slot 0 is the reset entry (never fetched by interrupt
//! dispatch; execution simply starts at the flash base), the following
//! fixed slots are the core exceptions, and slots 16 onward are the
//! peripheral lines. Reserved slots keep the fail-stop default: the
//! hardware never dispatches them, and if it somehow did, spinning beats
//! jumping through address zero.
//!
//! The application owns the table: build it with [`vector_table`], bind
//! overrides, finalize, and place the result in the `.trap_vectors`
//! linker section (see `archon-firmware` for the pattern).

use archon_core::trap;

/// Interrupt handler reference.
///
/// On target, handlers use the machine-mode interrupt ABI so the
/// compiler emits the register save/restore the hardware does not do
/// for us.
#[cfg(target_arch = "riscv32")]
pub type Handler = unsafe extern "riscv-interrupt-m" fn();
/// Host stand-in for the handler type (table layout and binding logic
/// only; never dispatched here).
#[cfg(not(target_arch = "riscv32"))]
pub type Handler = unsafe extern "C" fn();

/// Hardware-fixed slot count
pub const SLOT_COUNT: usize = 39;

/// Vector table under construction, fixed to this chip's layout
pub type VectorTable = trap::VectorTable<Handler, SLOT_COUNT>;

/// Finalized table image for the `.trap_vectors` section
pub type RawVectorTable = trap::RawVectorTable<Handler, SLOT_COUNT>;

/// Hardware event sources with their fixed slot positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum Interrupt {
    /// Non-maskable fault
    NonMaskable = 2,
    /// Hard fault
    HardFault = 3,
    /// Core tick timer
    SysTick = 12,
    /// Software-triggered interrupt
    Software = 14,
    /// Window watchdog
    WindowWatchdog = 16,
    /// Supply voltage detector
    VoltageDetect = 17,
    /// Flash interface
    Flash = 18,
    /// Reset and clock control
    Rcc = 19,
    /// External interrupt lines 7..0
    Exti = 20,
    /// Automatic wake-up timer
    AutoWakeup = 21,
    Dma1Channel1 = 22,
    Dma1Channel2 = 23,
    Dma1Channel3 = 24,
    Dma1Channel4 = 25,
    Dma1Channel5 = 26,
    Dma1Channel6 = 27,
    Dma1Channel7 = 28,
    Adc = 29,
    I2c1Event = 30,
    I2c1Error = 31,
    Usart1 = 32,
    Spi1 = 33,
    Tim1Break = 34,
    Tim1Update = 35,
    Tim1TriggerCom = 36,
    Tim1CaptureCompare = 37,
    Tim2 = 38,
}

impl Interrupt {
    /// Table slot of this event source
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// The fail-stop default: an unbound slot halts forward progress here,
/// leaving a started watchdog able to force a reset.
#[cfg(target_arch = "riscv32")]
pub unsafe extern "riscv-interrupt-m" fn fault_spin() {
    loop {}
}
#[cfg(not(target_arch = "riscv32"))]
pub unsafe extern "C" fn fault_spin() {
    loop {}
}

/// Fresh table with every slot aliasing [`fault_spin`]
pub const fn vector_table() -> VectorTable {
    VectorTable::new(fault_spin as Handler)
}
