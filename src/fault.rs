//! Clock-Fault Recovery
//!
//! Body of the user non-maskable interrupt raised by an oscillator fault.
//! Nothing useful can run on an unstable clock, so the handler keeps
//! clearing the fault flags until one check finds them clear. There is no
//! retry limit; if the fault never clears, the watchdog (or a power cycle)
//! is what ends it.

use crate::clock;
use crate::config::{cycles_for_us, FAULT_RETRY_DELAY_US};
use crate::hal::{Cpu, RegisterBus};

/// Wait out an oscillator fault
///
/// Each round clears XT1OFFG and OFIFG, settles for
/// [`FAULT_RETRY_DELAY_US`], then re-reads OFIFG. Returns only after a round
/// whose own check saw the flag clear, with the number of rounds taken.
pub fn recover_clock_fault<B: RegisterBus, C: Cpu>(bus: &mut B, cpu: &mut C) -> u32 {
    warn!("clock fault");

    let mut rounds: u32 = 0;
    loop {
        clock::clear_fault_flags(bus);
        cpu.delay_cycles(cycles_for_us(FAULT_RETRY_DELAY_US));
        rounds = rounds.saturating_add(1);
        if !clock::fault_pending(bus) {
            break;
        }
    }

    info!("clock fault cleared after {} rounds", rounds);
    rounds
}
