//! GPS/WSPR Beacon Firmware Core
//!
//! This library provides the hardware bring-up and interrupt-driven timing
//! core for a battery powered MSP430FR5739 beacon that pairs a GPS receiver
//! (UART) with a WSPR transmitter (I2C synthesizer plus TCXO).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                APPLICATION (external collaborator)           │
//! │  Main loop  │  WSPR encoder  │  NMEA parser  │  Settings     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     BEACON FACADE                            │
//! │  Beacon<Bus, Cpu>  │  EventFlags (shared with interrupts)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    HARDWARE CORE                             │
//! │  Clocks │ Pins/Rails │ Module lifecycle │ Timers │ Fault NMI │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         HAL                                  │
//! │  RegisterBus + Cpu traits  │  MMIO bus  │  Mock bus/CPU      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Register access behind a trait**: every hardware write goes through
//!   [`hal::RegisterBus`], so sequencing is testable on the host
//! - **Ordered steps as data**: module enable/disable sequences are fixed
//!   arrays of [`module::Step`] that can be audited without hardware
//! - **Interrupt handlers are transition functions**: they touch only their
//!   compare register and the [`events::EventFlags`]
//! - **No unsafe outside the MMIO layer**
//! - **No error codes**: register writes cannot fail, and the clock fault is
//!   waited out rather than reported

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must come first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

/// Hardware Abstraction Layer
///
/// Register bus and CPU traits, register map, MMIO and mock implementations.
pub mod hal;

/// Clock Tree Configuration
///
/// DCO, ACLK, SMCLK, MCLK setup and XT1 oscillator control.
pub mod clock;

/// Pin and power rail configuration
pub mod pins;

/// Module Lifecycle Control
///
/// Ordered enable/disable sequences for the GPS and RF links.
pub mod module;

/// Heartbeat and symbol timers
pub mod timer;

/// Clock-fault (NMI) recovery
pub mod fault;

/// Power Management
///
/// Low-power sleep, calibrated busy-wait delays, watchdog service.
pub mod power;

/// Event flags shared between interrupt handlers and the main loop
pub mod events;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Top-level board facade
pub mod board;

pub use board::Beacon;
pub use events::{EventFlags, Events};
pub use types::{Module, ModuleState};

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::board::Beacon;
    pub use crate::config::*;
    pub use crate::events::{EventFlags, Events};
    pub use crate::hal::{Cpu, RegisterBus};
    pub use crate::power::Delay;
    pub use crate::types::*;
}
