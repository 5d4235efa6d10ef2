//! Heartbeat and Symbol Timers
//!
//! Both timers free-run in continuous mode and fire on a CCR0 compare
//! match. Neither period divides the 16-bit count range, so instead of an
//! auto-reload the interrupt handler moves the compare register forward by
//! a fixed step on every firing:
//!
//! ```text
//! CCR0 ← CCR0 + step   (mod 2^16)
//! ```
//!
//! The step is applied no matter how late the handler runs. A late service
//! shortens the following period, but the long-run average period stays
//! exact and the compare value after N firings is always
//! `first + N * step (mod 2^16)`.
//!
//! | Timer     | Clock                  | Step                            |
//! |-----------|------------------------|---------------------------------|
//! | Timer_A0  | ACLK / 8 / 8 ≈ 42 kHz  | [`HEARTBEAT_COMPARE_STEP`] (1 s) |
//! | Timer_B0  | SMCLK / 8 ≈ 64 kHz     | [`SYMBOL_COMPARE_STEP`] (WSPR)   |

use crate::config::{FIRST_COMPARE, HEARTBEAT_COMPARE_STEP, SYMBOL_COMPARE_STEP};
use crate::events::{EventFlags, Events};
use crate::hal::regs::timer;
use crate::hal::{Cpu, Register, RegisterBus};

/// Which of the two periodic timers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodicTimer {
    /// Timer_A0, one-second heartbeat
    Heartbeat,
    /// Timer_B0, WSPR symbol clock
    Symbol,
}

impl PeriodicTimer {
    /// Control register
    #[must_use]
    pub const fn ctl(self) -> Register {
        match self {
            Self::Heartbeat => Register::Ta0Ctl,
            Self::Symbol => Register::Tb0Ctl,
        }
    }

    /// Capture/compare control register 0
    #[must_use]
    pub const fn cctl0(self) -> Register {
        match self {
            Self::Heartbeat => Register::Ta0Cctl0,
            Self::Symbol => Register::Tb0Cctl0,
        }
    }

    /// Compare register 0
    #[must_use]
    pub const fn ccr0(self) -> Register {
        match self {
            Self::Heartbeat => Register::Ta0Ccr0,
            Self::Symbol => Register::Tb0Ccr0,
        }
    }

    /// Counter register
    #[must_use]
    pub const fn counter(self) -> Register {
        match self {
            Self::Heartbeat => Register::Ta0R,
            Self::Symbol => Register::Tb0R,
        }
    }

    /// Compare advance per firing
    #[must_use]
    pub const fn step(self) -> u16 {
        match self {
            Self::Heartbeat => HEARTBEAT_COMPARE_STEP,
            Self::Symbol => SYMBOL_COMPARE_STEP,
        }
    }

    /// Event raised on every firing
    #[must_use]
    pub const fn event(self) -> Events {
        match self {
            Self::Heartbeat => Events::HEARTBEAT,
            Self::Symbol => Events::SYMBOL_TICK,
        }
    }

    /// TAxCTL value: clock source, /8, continuous mode, counter cleared
    #[must_use]
    pub const fn control_word(self) -> u16 {
        let source = match self {
            Self::Heartbeat => timer::TASSEL_1,
            Self::Symbol => timer::TASSEL_2,
        };
        source | timer::MC_2 | timer::ID_3 | timer::TACLR
    }
}

/// Compare value after `firings` interrupts
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn compare_after(timer: PeriodicTimer, firings: u32) -> u16 {
    // Only the low 16 bits of the product matter modulo the counter width
    let advance = (timer.step() as u32).wrapping_mul(firings) as u16;
    FIRST_COMPARE.wrapping_add(advance)
}

/// Configure and start the heartbeat timer (ACLK, /8, extended /8)
pub fn start_heartbeat<B: RegisterBus>(bus: &mut B) {
    let t = PeriodicTimer::Heartbeat;
    bus.write(t.ccr0(), FIRST_COMPARE);
    bus.write(t.ctl(), t.control_word());
    bus.write(Register::Ta0Ex0, timer::TAIDEX_7);
    bus.set_bits(t.cctl0(), timer::CCIE);
}

/// Configure and start the symbol timer (SMCLK, /8)
///
/// SMCLK comes from XT1, so the timer only counts while the RF module is
/// enabled.
pub fn start_symbol<B: RegisterBus>(bus: &mut B) {
    let t = PeriodicTimer::Symbol;
    bus.write(t.ccr0(), FIRST_COMPARE);
    bus.write(t.ctl(), t.control_word());
    bus.set_bits(t.cctl0(), timer::CCIE);
}

/// Re-synchronize symbol timing at the start of a transmission
///
/// Zeroes the compare register and forces the counter to its maximum, so
/// the next count wraps to zero and fires the first symbol interrupt.
pub fn reset_symbol_timer<B: RegisterBus>(bus: &mut B) {
    bus.write(Register::Tb0Ccr0, 0);
    bus.write(Register::Tb0R, u16::MAX);
}

/// Move a timer's compare register one step forward
pub fn rearm<B: RegisterBus>(bus: &mut B, timer: PeriodicTimer) {
    let step = timer.step();
    bus.modify(timer.ccr0(), |ccr| ccr.wrapping_add(step));
}

/// Timer_A0 CCR0 interrupt
///
/// Re-arms the next second, raises [`Events::HEARTBEAT`] and, if the main
/// loop asked for it with [`EventFlags::request_wake`], keeps the CPU
/// awake after the handler returns.
pub fn on_heartbeat<B: RegisterBus, C: Cpu>(bus: &mut B, cpu: &mut C, events: &EventFlags) {
    rearm(bus, PeriodicTimer::Heartbeat);
    events.raise(Events::HEARTBEAT);
    if events.is_set(Events::WAKE_CPU) {
        cpu.wake_on_exit();
    }
}

/// Timer_B0 CCR0 interrupt
///
/// Re-arms the next symbol and raises [`Events::SYMBOL_TICK`].
pub fn on_symbol_tick<B: RegisterBus>(bus: &mut B, events: &EventFlags) {
    rearm(bus, PeriodicTimer::Symbol);
    events.raise(Events::SYMBOL_TICK);
}
