//! Event flags shared between interrupt handlers and the main loop
//!
//! Interrupt handlers only ever raise flags; the main loop reads and clears
//! them. Repeated firings before a clear coalesce into a single set bit, so
//! a consumer must not assume one event per flag it takes.
//!
//! Every read-modify-write runs inside a critical section. On the
//! single-core MCU that masks interrupts for a few instructions, which is
//! what keeps a flag raised between the main loop's read and its clear
//! from being lost.

use core::cell::Cell;

use bitflags::bitflags;
use critical_section::Mutex;

bitflags! {
    /// Set of pending events
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Events: u16 {
        /// One-second heartbeat elapsed
        const HEARTBEAT = 1 << 0;
        /// WSPR symbol period elapsed
        const SYMBOL_TICK = 1 << 1;
        /// Main loop wants the next heartbeat to wake the CPU
        const WAKE_CPU = 1 << 2;
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Events {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Events({=u16:#x})", self.bits());
    }
}

/// Interrupt-safe event bitset
///
/// Intended to live in a `static` owned by the application and be passed by
/// reference to both the interrupt entry points and the main loop.
pub struct EventFlags {
    bits: Mutex<Cell<Events>>,
}

impl EventFlags {
    /// All flags clear
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bits: Mutex::new(Cell::new(Events::empty())),
        }
    }

    /// Set flags (interrupt side)
    pub fn raise(&self, events: Events) {
        critical_section::with(|cs| {
            let cell = self.bits.borrow(cs);
            cell.set(cell.get() | events);
        });
    }

    /// Atomically read the flags in `mask` and clear them
    ///
    /// Flags outside `mask` are left untouched.
    pub fn take(&self, mask: Events) -> Events {
        critical_section::with(|cs| {
            let cell = self.bits.borrow(cs);
            let current = cell.get();
            cell.set(current - mask);
            current & mask
        })
    }

    /// Clear flags without reading them
    pub fn clear(&self, mask: Events) {
        critical_section::with(|cs| {
            let cell = self.bits.borrow(cs);
            cell.set(cell.get() - mask);
        });
    }

    /// Snapshot of all flags
    #[must_use]
    pub fn pending(&self) -> Events {
        critical_section::with(|cs| self.bits.borrow(cs).get())
    }

    /// Check whether every flag in `events` is set
    #[must_use]
    pub fn is_set(&self, events: Events) -> bool {
        self.pending().contains(events)
    }

    /// Ask the heartbeat handler to wake the CPU on its next firing
    pub fn request_wake(&self) {
        self.raise(Events::WAKE_CPU);
    }

    /// Withdraw a wake request so the CPU sleeps through heartbeats
    pub fn cancel_wake(&self) {
        self.clear(Events::WAKE_CPU);
    }
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for EventFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("EventFlags").field(&self.pending()).finish()
    }
}
