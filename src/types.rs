//! Shared types used across the beacon firmware
//!
//! Domain types for the two switchable peripheral links and their
//! lifecycle state.

use core::fmt;

/// Peripheral link with a switched power rail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Module {
    /// GPS receiver on eUSCI_A0 (UART) with 1PPS input
    Gps,
    /// RF transmitter on eUSCI_B0 (I2C) with its TCXO feeding XT1
    Rf,
}

impl Module {
    /// Both modules, in index order
    pub const ALL: [Self; 2] = [Self::Gps, Self::Rf];

    /// Slot used for per-module state tables
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Gps => 0,
            Self::Rf => 1,
        }
    }

    /// Short display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gps => "GPS",
            Self::Rf => "RF",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Module {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Gps => defmt::write!(f, "GPS"),
            Self::Rf => defmt::write!(f, "RF"),
        }
    }
}

impl TryFrom<u8> for Module {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Gps),
            1 => Ok(Self::Rf),
            other => Err(DecodeError::UnknownModule(other)),
        }
    }
}

/// Lifecycle state of a module
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModuleState {
    /// Rail off, serial interface in reset, pins parked low
    #[default]
    Disabled,
    /// Pins muxed, serial interface running, rail on
    Enabled,
}

impl ModuleState {
    /// Check if enabled
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for ModuleState {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl TryFrom<u8> for ModuleState {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::Enabled),
            other => Err(DecodeError::UnknownState(other)),
        }
    }
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Enabled => f.write_str("enabled"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ModuleState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Disabled => defmt::write!(f, "OFF"),
            Self::Enabled => defmt::write!(f, "ON"),
        }
    }
}

/// Current state of both modules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ModuleStates([ModuleState; 2]);

impl ModuleStates {
    /// Both modules disabled
    #[must_use]
    pub const fn new() -> Self {
        Self([ModuleState::Disabled; 2])
    }

    /// State of one module
    #[must_use]
    pub const fn get(&self, module: Module) -> ModuleState {
        self.0[module.index()]
    }

    /// Record a completed transition
    pub fn set(&mut self, module: Module, state: ModuleState) {
        self.0[module.index()] = state;
    }
}

/// Error decoding a module request from raw bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Module identifier outside {0 = GPS, 1 = RF}
    UnknownModule(u8),
    /// State outside {0 = disabled, 1 = enabled}
    UnknownState(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModule(id) => write!(f, "unknown module id {id}"),
            Self::UnknownState(s) => write!(f, "unknown module state {s}"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DecodeError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UnknownModule(id) => defmt::write!(f, "unknown module id {}", id),
            Self::UnknownState(s) => defmt::write!(f, "unknown module state {}", s),
        }
    }
}
