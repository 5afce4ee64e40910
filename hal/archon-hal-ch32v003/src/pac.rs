//! Memory-mapped register blocks
//!
//! Hand-bound subset of the CH32V003 map: only the peripherals the
//! bring-up core touches, with the full register layout of each so the
//! offsets stay honest. Access goes through the owner types in the
//! sibling modules; these accessors are `pub(crate)` to keep it that
//! way.

use vcell::VolatileCell;

/// Reset and clock control
#[repr(C)]
pub struct RccBlock {
    pub ctlr: VolatileCell<u32>,
    pub cfgr0: VolatileCell<u32>,
    pub intr: VolatileCell<u32>,
    pub apb2prstr: VolatileCell<u32>,
    pub apb1prstr: VolatileCell<u32>,
    pub ahbpcenr: VolatileCell<u32>,
    pub apb2pcenr: VolatileCell<u32>,
    pub apb1pcenr: VolatileCell<u32>,
    _reserved0: u32,
    pub rstsckr: VolatileCell<u32>,
}

/// Flash interface control (wait-states only at this layer)
#[repr(C)]
pub struct FlashBlock {
    pub actlr: VolatileCell<u32>,
}

/// Alternate-function pin remapping
#[repr(C)]
pub struct AfioBlock {
    _reserved0: u32,
    pub pcfr1: VolatileCell<u32>,
}

/// Power control and automatic wake-up timer
#[repr(C)]
pub struct PwrBlock {
    pub ctlr: VolatileCell<u32>,
    pub csr: VolatileCell<u32>,
    pub awucsr: VolatileCell<u32>,
    pub awuwr: VolatileCell<u32>,
    pub awupsc: VolatileCell<u32>,
}

/// External interrupt/event controller
#[repr(C)]
pub struct ExtiBlock {
    pub intenr: VolatileCell<u32>,
    pub evenr: VolatileCell<u32>,
    pub rtenr: VolatileCell<u32>,
    pub ftenr: VolatileCell<u32>,
    pub swievr: VolatileCell<u32>,
    pub intfr: VolatileCell<u32>,
}

/// Independent watchdog
#[repr(C)]
pub struct IwdgBlock {
    pub ctlr: VolatileCell<u32>,
    pub pscr: VolatileCell<u32>,
    pub rldr: VolatileCell<u32>,
    pub statr: VolatileCell<u32>,
}

/// Core interrupt controller system control (single register)
#[repr(C)]
pub struct PficSctlrBlock {
    pub sctlr: VolatileCell<u32>,
}

/// System tick counter
#[repr(C)]
pub struct StkBlock {
    pub ctlr: VolatileCell<u32>,
    pub sr: VolatileCell<u32>,
    pub cntl: VolatileCell<u32>,
    pub cmplr: VolatileCell<u32>,
}

const RCC_BASE: usize = 0x4002_1000;
const FLASH_BASE: usize = 0x4002_2000;
const AFIO_BASE: usize = 0x4001_0000;
const PWR_BASE: usize = 0x4000_7000;
const EXTI_BASE: usize = 0x4001_0400;
const IWDG_BASE: usize = 0x4000_3000;
const PFIC_SCTLR_BASE: usize = 0xE000_ED10;
const STK_BASE: usize = 0xE000_F000;

pub(crate) fn rcc() -> &'static RccBlock {
    unsafe { &*(RCC_BASE as *const RccBlock) }
}

pub(crate) fn flash() -> &'static FlashBlock {
    unsafe { &*(FLASH_BASE as *const FlashBlock) }
}

pub(crate) fn afio() -> &'static AfioBlock {
    unsafe { &*(AFIO_BASE as *const AfioBlock) }
}

pub(crate) fn pwr() -> &'static PwrBlock {
    unsafe { &*(PWR_BASE as *const PwrBlock) }
}

pub(crate) fn exti() -> &'static ExtiBlock {
    unsafe { &*(EXTI_BASE as *const ExtiBlock) }
}

pub(crate) fn iwdg() -> &'static IwdgBlock {
    unsafe { &*(IWDG_BASE as *const IwdgBlock) }
}

pub(crate) fn pfic() -> &'static PficSctlrBlock {
    unsafe { &*(PFIC_SCTLR_BASE as *const PficSctlrBlock) }
}

pub(crate) fn stk() -> &'static StkBlock {
    unsafe { &*(STK_BASE as *const StkBlock) }
}
