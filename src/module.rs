//! Module Lifecycle Control
//!
//! Moves the GPS and RF links between [`ModuleState::Disabled`] and
//! [`ModuleState::Enabled`]. Each transition is a fixed, ordered list of
//! [`Step`]s so the safety-relevant ordering can be audited on its own:
//!
//! - Disable: (RF only: stop XT1) → rail off → serial interface into reset →
//!   pins parked as low outputs. The interface never drives pins while the
//!   module loses power.
//! - Enable: pins muxed → interface held in reset → interface clock and rate
//!   configured → reset released → rail on (RF only: then start XT1 and wait
//!   for it to settle). The rail is energized only once the interface
//!   configuration is in place.
//!
//! Requests always run every step of the target sequence and every step
//! writes absolute values, so any history of requests ends in the same
//! register state as a single request for the final target.

use crate::clock;
use crate::config::{pins, GPS_UART_DIVISOR, RF_I2C_DIVISOR};
use crate::hal::regs::{i2c, uart};
use crate::hal::{Register, RegisterBus};
use crate::pins::Rail;
use crate::types::{Module, ModuleState};

/// One stage of a module transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Mask the clock-fault interrupt and stop XT1
    StopOscillator,
    /// Switch the module rail off
    RailOff,
    /// Put the serial interface into software reset with its settings cleared
    HoldInReset,
    /// Return the module pins to low-power GPIO
    ParkPins,
    /// Route the module pins to the serial interface
    MuxPins,
    /// Program clock source and bit rate (interface must be in reset)
    ConfigureInterface,
    /// Let the serial interface run
    ReleaseReset,
    /// Switch the module rail on
    RailOn,
    /// Start XT1 from the module TCXO and wait until it is fault-free
    StartOscillator,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Step {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::StopOscillator => defmt::write!(f, "StopOscillator"),
            Self::RailOff => defmt::write!(f, "RailOff"),
            Self::HoldInReset => defmt::write!(f, "HoldInReset"),
            Self::ParkPins => defmt::write!(f, "ParkPins"),
            Self::MuxPins => defmt::write!(f, "MuxPins"),
            Self::ConfigureInterface => defmt::write!(f, "ConfigureInterface"),
            Self::ReleaseReset => defmt::write!(f, "ReleaseReset"),
            Self::RailOn => defmt::write!(f, "RailOn"),
            Self::StartOscillator => defmt::write!(f, "StartOscillator"),
        }
    }
}

/// GPS link: disable sequence
pub const GPS_DISABLE: [Step; 3] = [Step::RailOff, Step::HoldInReset, Step::ParkPins];

/// GPS link: enable sequence
pub const GPS_ENABLE: [Step; 5] = [
    Step::MuxPins,
    Step::HoldInReset,
    Step::ConfigureInterface,
    Step::ReleaseReset,
    Step::RailOn,
];

/// RF link: disable sequence
pub const RF_DISABLE: [Step; 4] = [
    Step::StopOscillator,
    Step::RailOff,
    Step::HoldInReset,
    Step::ParkPins,
];

/// RF link: enable sequence
pub const RF_ENABLE: [Step; 6] = [
    Step::MuxPins,
    Step::HoldInReset,
    Step::ConfigureInterface,
    Step::ReleaseReset,
    Step::RailOn,
    Step::StartOscillator,
];

/// Ordered steps that bring `module` into `state`
#[must_use]
pub const fn sequence(module: Module, state: ModuleState) -> &'static [Step] {
    match (module, state) {
        (Module::Gps, ModuleState::Disabled) => &GPS_DISABLE,
        (Module::Gps, ModuleState::Enabled) => &GPS_ENABLE,
        (Module::Rf, ModuleState::Disabled) => &RF_DISABLE,
        (Module::Rf, ModuleState::Enabled) => &RF_ENABLE,
    }
}

/// Run the full transition of `module` into `state`
///
/// Returns once every step has completed. For the RF enable this includes
/// waiting, without a timeout, for XT1 to run fault-free.
pub fn configure_module<B: RegisterBus>(bus: &mut B, module: Module, state: ModuleState) {
    info!("{}: -> {}", module, state);
    for &step in sequence(module, state) {
        trace!("{}: {}", module, step);
        apply(bus, module, step);
    }
}

/// Execute a single step for a module
pub fn apply<B: RegisterBus>(bus: &mut B, module: Module, step: Step) {
    match module {
        Module::Gps => apply_gps(bus, step),
        Module::Rf => apply_rf(bus, step),
    }
}

fn apply_gps<B: RegisterBus>(bus: &mut B, step: Step) {
    match step {
        Step::RailOff => Rail::GPS.power_down(bus),
        Step::RailOn => Rail::GPS.power_up(bus),
        Step::HoldInReset => {
            bus.write(Register::Uca0Ctlw0, uart::UCSWRST);
            bus.write(Register::Uca0Brw, 0);
            bus.write(Register::Uca0Mctlw, 0);
        }
        Step::ParkPins => {
            pins::UART_BUS.park(bus);
            pins::GPS_1PPS.park(bus);
        }
        Step::MuxPins => {
            pins::UART_RXD.make_input(bus);
            pins::UART_BUS.select_secondary(bus);
            pins::GPS_1PPS.make_input(bus);
        }
        Step::ConfigureInterface => {
            bus.write(Register::Uca0Ctlw0, uart::UCSSEL_1 | uart::UCSWRST);
            bus.write(Register::Uca0Brw, GPS_UART_DIVISOR.br);
            bus.write(Register::Uca0Mctlw, GPS_UART_DIVISOR.mctlw());
        }
        Step::ReleaseReset => bus.clear_bits(Register::Uca0Ctlw0, uart::UCSWRST),
        // The GPS link has no oscillator of its own
        Step::StopOscillator | Step::StartOscillator => {}
    }
}

fn apply_rf<B: RegisterBus>(bus: &mut B, step: Step) {
    match step {
        Step::StopOscillator => clock::stop_xt1(bus),
        Step::RailOff => Rail::RF.power_down(bus),
        Step::RailOn => Rail::RF.power_up(bus),
        Step::HoldInReset => {
            bus.write(Register::Ucb0Ctlw0, i2c::UCSWRST);
            bus.write(Register::Ucb0Ctlw1, 0);
            bus.write(Register::Ucb0Brw, 0);
        }
        Step::ParkPins => {
            pins::I2C_BUS.park(bus);
            pins::XT1_CLKIN.park(bus);
        }
        Step::MuxPins => {
            pins::I2C_BUS.select_secondary(bus);
            pins::XT1_CLKIN.select_primary(bus);
        }
        Step::ConfigureInterface => {
            bus.write(
                Register::Ucb0Ctlw0,
                i2c::UCMODE_3 | i2c::UCMST | i2c::UCSYNC | i2c::UCSSEL_1 | i2c::UCSWRST,
            );
            bus.write(Register::Ucb0Ctlw1, i2c::UCASTP_2);
            bus.write(Register::Ucb0Brw, RF_I2C_DIVISOR);
        }
        Step::ReleaseReset => bus.clear_bits(Register::Ucb0Ctlw0, i2c::UCSWRST),
        Step::StartOscillator => {
            clock::start_xt1(bus);
        }
    }
}
