//! Board-agnostic bring-up logic for the Archon runtime core
//!
//! This crate contains the sequencing logic that runs between reset and
//! the application, written against the `archon-hal` behavior traits so
//! it can be exercised on the host against simulated registers:
//!
//! - Clock configuration state machine (four source variants)
//! - Power state controller (sleep, standby, automatic wake-up timer)
//! - Independent watchdog supervisor
//! - Vector-table model (build-time handler binding)
//! - Boot memory-region operations (zero/copy)
//!
//! Protocols that must not be preempted mid-sequence (clock switch,
//! watchdog unlock) take a [`critical_section::CriticalSection`] token:
//! the caller proves interrupts are off for the duration instead of this
//! crate deciding when to mask them.

#![cfg_attr(not(test), no_std)]

pub mod boot;
pub mod clock;
pub mod power;
pub mod trap;
pub mod watchdog;
