//! Pin and Power Rail Configuration
//!
//! Port-level helpers for parking, muxing and driving pin groups, the
//! module rail switches, and the one-shot startup configuration of every
//! pin the beacon does not hand to a peripheral.

use crate::config::pins;
use crate::hal::{Register, RegisterBus};

/// Digital I/O port
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    /// Port 1
    P1,
    /// Port 2
    P2,
    /// Port 3
    P3,
    /// Port J
    Pj,
}

impl Port {
    /// Output latch register
    #[must_use]
    pub const fn out(self) -> Register {
        match self {
            Self::P1 => Register::P1Out,
            Self::P2 => Register::P2Out,
            Self::P3 => Register::P3Out,
            Self::Pj => Register::PjOut,
        }
    }

    /// Direction register (1 = output)
    #[must_use]
    pub const fn dir(self) -> Register {
        match self {
            Self::P1 => Register::P1Dir,
            Self::P2 => Register::P2Dir,
            Self::P3 => Register::P3Dir,
            Self::Pj => Register::PjDir,
        }
    }

    /// Function select 0
    #[must_use]
    pub const fn sel0(self) -> Register {
        match self {
            Self::P1 => Register::P1Sel0,
            Self::P2 => Register::P2Sel0,
            Self::P3 => Register::P3Sel0,
            Self::Pj => Register::PjSel0,
        }
    }

    /// Function select 1
    #[must_use]
    pub const fn sel1(self) -> Register {
        match self {
            Self::P1 => Register::P1Sel1,
            Self::P2 => Register::P2Sel1,
            Self::P3 => Register::P3Sel1,
            Self::Pj => Register::PjSel1,
        }
    }
}

/// One or more pins on the same port
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinGroup {
    port: Port,
    mask: u8,
}

impl PinGroup {
    /// Create a group from a port and a bit mask
    #[must_use]
    pub const fn new(port: Port, mask: u8) -> Self {
        Self { port, mask }
    }

    /// Port the group lives on
    #[must_use]
    pub const fn port(self) -> Port {
        self.port
    }

    /// Bit mask within the port
    #[must_use]
    pub const fn mask(self) -> u16 {
        self.mask as u16
    }

    /// Park as low-power GPIO: output, driven low, no alternate function
    pub fn park<B: RegisterBus>(self, bus: &mut B) {
        bus.clear_bits(self.port.out(), self.mask());
        bus.set_bits(self.port.dir(), self.mask());
        bus.clear_bits(self.port.sel0(), self.mask());
        bus.clear_bits(self.port.sel1(), self.mask());
    }

    /// Make the pins GPIO inputs
    pub fn make_input<B: RegisterBus>(self, bus: &mut B) {
        bus.clear_bits(self.port.dir(), self.mask());
    }

    /// Drive the pins high
    pub fn set_high<B: RegisterBus>(self, bus: &mut B) {
        bus.set_bits(self.port.out(), self.mask());
    }

    /// Drive the pins low
    pub fn set_low<B: RegisterBus>(self, bus: &mut B) {
        bus.clear_bits(self.port.out(), self.mask());
    }

    /// Make the pins outputs
    pub fn make_output<B: RegisterBus>(self, bus: &mut B) {
        bus.set_bits(self.port.dir(), self.mask());
    }

    /// Route to the primary module function (SEL1:SEL0 = 01)
    pub fn select_primary<B: RegisterBus>(self, bus: &mut B) {
        bus.set_bits(self.port.sel0(), self.mask());
        bus.clear_bits(self.port.sel1(), self.mask());
    }

    /// Route to the secondary module function (SEL1:SEL0 = 10)
    pub fn select_secondary<B: RegisterBus>(self, bus: &mut B) {
        bus.clear_bits(self.port.sel0(), self.mask());
        bus.set_bits(self.port.sel1(), self.mask());
    }

    /// Check if every pin is a GPIO output latched low
    pub fn is_parked<B: RegisterBus>(self, bus: &mut B) -> bool {
        let m = self.mask();
        bus.read(self.port.out()) & m == 0
            && bus.read(self.port.dir()) & m == m
            && bus.read(self.port.sel0()) & m == 0
            && bus.read(self.port.sel1()) & m == 0
    }
}

/// Rail enable for a module; the switches are active low
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rail(PinGroup);

impl Rail {
    /// GPS receiver supply
    pub const GPS: Self = Self(pins::VEN_GPS);

    /// RF transmitter supply
    pub const RF: Self = Self(pins::VEN_RF);

    /// Energize the rail
    pub fn power_up<B: RegisterBus>(self, bus: &mut B) {
        self.0.set_low(bus);
    }

    /// Remove power from the rail
    pub fn power_down<B: RegisterBus>(self, bus: &mut B) {
        self.0.set_high(bus);
    }

    /// Check if the rail is energized
    pub fn is_powered<B: RegisterBus>(self, bus: &mut B) -> bool {
        let pin = self.0;
        bus.read(pin.port().out()) & pin.mask() == 0
    }
}

/// One-shot startup configuration of rails, unused pins and analog inputs
///
/// Runs after clock setup and before any module is enabled. Both rails end
/// up unpowered, every unused pin is a low output, and the voltage-sense
/// pins are handed to the ADC.
pub fn initialize_pins_and_power<B: RegisterBus>(bus: &mut B) {
    // Latch the rails off before turning the enables into outputs
    pins::VEN_ALL.set_high(bus);
    pins::VEN_ALL.make_output(bus);

    pins::UNUSED_J.set_low(bus);
    pins::UNUSED_J.make_output(bus);
    pins::UNUSED_3.set_low(bus);
    pins::UNUSED_3.make_output(bus);

    bus.set_bits(pins::ADC_VSOL.port().sel0(), pins::ADC_VSOL.mask());
    bus.set_bits(pins::ADC_VBAT.port().sel0(), pins::ADC_VBAT.mask());

    debug!("pins: rails off, unused pins parked");
}
