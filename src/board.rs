//! Board facade
//!
//! [`Beacon`] owns the register bus, the CPU handle and the state of both
//! modules, and exposes the operations the application's main loop uses
//! together with the entry points its interrupt vectors call.
//!
//! ```ignore
//! static EVENTS: EventFlags = EventFlags::new();
//!
//! let mut beacon = Beacon::new(bus, cpu);
//! beacon.initialize_hardware();
//! beacon.configure_module(Module::Gps, ModuleState::Enabled);
//! loop {
//!     EVENTS.request_wake();
//!     beacon.enter_low_power_sleep();
//!     if EVENTS.take(Events::HEARTBEAT).contains(Events::HEARTBEAT) {
//!         beacon.feed_watchdog();
//!     }
//! }
//! ```

use crate::events::EventFlags;
use crate::hal::{Cpu, RegisterBus};
use crate::types::{Module, ModuleState, ModuleStates};
use crate::{clock, fault, module, pins, power, timer};

/// Beacon hardware core
#[derive(Debug)]
pub struct Beacon<B, C> {
    bus: B,
    cpu: C,
    modules: ModuleStates,
}

impl<B: RegisterBus, C: Cpu> Beacon<B, C> {
    /// Wrap a register bus and CPU handle; no hardware is touched yet
    pub const fn new(bus: B, cpu: C) -> Self {
        Self {
            bus,
            cpu,
            modules: ModuleStates::new(),
        }
    }

    /// Bring the MCU into its operating configuration
    ///
    /// Must be the first call after reset, and made only once. Holds the
    /// watchdog, applies the clock tree, parks pins with both rails off,
    /// disables both modules, starts both timers and finally enables
    /// interrupts.
    pub fn initialize_hardware(&mut self) {
        power::hold_watchdog(&mut self.bus);
        clock::initialize_clocks(&mut self.bus);
        pins::initialize_pins_and_power(&mut self.bus);

        for m in Module::ALL {
            self.configure_module(m, ModuleState::Disabled);
        }

        timer::start_heartbeat(&mut self.bus);
        timer::start_symbol(&mut self.bus);

        self.cpu.enable_interrupts();
        info!("hardware initialized");
    }

    /// Service the watchdog
    pub fn feed_watchdog(&mut self) {
        power::feed_watchdog(&mut self.bus);
    }

    /// Run the full enable or disable sequence for a module
    pub fn configure_module(&mut self, module: Module, state: ModuleState) {
        module::configure_module(&mut self.bus, module, state);
        self.modules.set(module, state);
    }

    /// Last state requested for a module
    #[must_use]
    pub const fn module_state(&self, module: Module) -> ModuleState {
        self.modules.get(module)
    }

    /// Sleep in LPM3 until an interrupt requests a wake
    pub fn enter_low_power_sleep(&mut self) {
        power::enter_low_power_sleep(&mut self.cpu);
    }

    /// Busy-wait for approximately `ms` milliseconds
    pub fn delay_milliseconds(&mut self, ms: u16) {
        power::delay_milliseconds(&mut self.cpu, ms);
    }

    /// Busy-wait for approximately `us` microseconds
    pub fn delay_microseconds(&mut self, us: u16) {
        power::delay_microseconds(&mut self.cpu, us);
    }

    /// Restart symbol timing for a new transmission
    pub fn reset_symbol_timer(&mut self) {
        timer::reset_symbol_timer(&mut self.bus);
    }

    /// Timer_A0 CCR0 vector
    pub fn on_heartbeat(&mut self, events: &EventFlags) {
        timer::on_heartbeat(&mut self.bus, &mut self.cpu, events);
    }

    /// Timer_B0 CCR0 vector
    pub fn on_symbol_tick(&mut self, events: &EventFlags) {
        timer::on_symbol_tick(&mut self.bus, events);
    }

    /// User NMI vector (oscillator fault); blocks until the fault clears
    pub fn on_clock_fault(&mut self) -> u32 {
        fault::recover_clock_fault(&mut self.bus, &mut self.cpu)
    }

    /// Register bus
    pub fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// CPU handle
    pub fn cpu(&mut self) -> &mut C {
        &mut self.cpu
    }

    /// Take the bus and CPU back
    pub fn into_parts(self) -> (B, C) {
        (self.bus, self.cpu)
    }
}
