//! Power Management
//!
//! Low-power sleep, busy-wait delays and watchdog service.
//!
//! CPU is running at MCLK = DCO/4, about 1.34 MHz, so one cycle is roughly
//! 0.74 µs. The delays convert microseconds to cycles with that rate; loop
//! overhead makes them run slightly long. They are meant for hardware
//! settling times only. Anything that needs accurate timing belongs on the
//! timers.

use crate::config::{cycles_for_us, WATCHDOG_FEED, WATCHDOG_HOLD};
use crate::hal::{Cpu, Register, RegisterBus};

/// Halt the CPU in LPM3 until an interrupt handler requests a wake
///
/// Timers and serial interfaces keep running. Interrupts that do not call
/// [`Cpu::wake_on_exit`] return the CPU to sleep.
pub fn enter_low_power_sleep<C: Cpu>(cpu: &mut C) {
    cpu.enter_low_power();
}

/// Busy-wait for approximately `us` microseconds
pub fn delay_microseconds<C: Cpu>(cpu: &mut C, us: u16) {
    cpu.delay_cycles(cycles_for_us(u32::from(us)));
}

/// Busy-wait for approximately `ms` milliseconds
pub fn delay_milliseconds<C: Cpu>(cpu: &mut C, ms: u16) {
    for _ in 0..ms {
        delay_microseconds(cpu, 1000);
    }
}

/// Restart the watchdog interval (ACLK source, 2^27 cycles)
///
/// Must be called more often than [`crate::config::WATCHDOG_TIMEOUT_MS`].
pub fn feed_watchdog<B: RegisterBus>(bus: &mut B) {
    bus.write(Register::Wdtctl, WATCHDOG_FEED);
}

/// Stop the watchdog; first write after reset
pub fn hold_watchdog<B: RegisterBus>(bus: &mut B) {
    bus.write(Register::Wdtctl, WATCHDOG_HOLD);
}

/// Calibrated busy-wait delay usable by embedded-hal drivers
#[derive(Debug)]
pub struct Delay<C> {
    cpu: C,
}

impl<C: Cpu> Delay<C> {
    /// Wrap a CPU handle
    pub const fn new(cpu: C) -> Self {
        Self { cpu }
    }

    /// Give the CPU handle back
    pub fn release(self) -> C {
        self.cpu
    }
}

impl<C: Cpu> embedded_hal::delay::DelayNs for Delay<C> {
    fn delay_ns(&mut self, ns: u32) {
        // Round up so short waits never collapse to nothing
        let us = ns.div_ceil(1_000);
        self.cpu.delay_cycles(cycles_for_us(us).max(1));
    }

    fn delay_us(&mut self, us: u32) {
        // Chunked so the cycle count cannot overflow
        let mut remaining = us;
        while remaining > 0 {
            let chunk = remaining.min(1_000_000);
            self.cpu.delay_cycles(cycles_for_us(chunk));
            remaining -= chunk;
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.cpu.delay_cycles(cycles_for_us(1000));
        }
    }
}
