//! Archon Hardware Abstraction Layer
//!
//! This crate defines the register-behavior traits the bring-up core is
//! written against. Each trait describes one peripheral's accessible
//! control/status fields by behavior only; a chip crate binds them to the
//! target's actual memory map. This keeps the sequencing logic in
//! `archon-core` board-agnostic and host-testable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (archon-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  archon-core (protocol sequencing)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  archon-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  archon-hal-ch32v003 (register blocks)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::ClockControl`] - oscillator gates, system clock mux, flash
//!   wait-states
//! - [`power::PowerControl`] - sleep/standby entry and the automatic
//!   wake-up timer
//! - [`watchdog::WatchdogControl`] - the independent watchdog's
//!   unlock-gated registers

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod power;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use clock::ClockControl;
pub use power::PowerControl;
pub use watchdog::WatchdogControl;
