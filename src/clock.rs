//! Clock Tree Configuration
//!
//! Programs the clock system once at power-on and controls the XT1 input
//! that the RF module's TCXO drives. Every derived timing constant in
//! [`crate::config`] assumes the configuration applied here.

use crate::config::CLOCKS;
use crate::hal::regs::{cs, sfr};
use crate::hal::{Register, RegisterBus};

/// Apply the beacon clock tree
///
/// DCO at 5.37 MHz; ACLK = DCO/2, SMCLK = XT1/32, MCLK = DCO/4; both
/// crystal oscillators off until the RF module supplies XT1. Call exactly
/// once at power-on, before anything that depends on clock rates.
pub fn initialize_clocks<B: RegisterBus>(bus: &mut B) {
    unlock(bus);
    bus.write(Register::Csctl1, CLOCKS.csctl1());
    bus.write(Register::Csctl2, CLOCKS.csctl2());
    bus.write(Register::Csctl3, CLOCKS.csctl3());
    bus.write(Register::Csctl4, CLOCKS.csctl4());

    info!(
        "clocks: MCLK={} ACLK={} SMCLK={} Hz",
        CLOCKS.mclk_hz(),
        CLOCKS.aclk_hz(),
        CLOCKS.smclk_hz()
    );
}

/// Write the CS password so the control registers accept writes
fn unlock<B: RegisterBus>(bus: &mut B) {
    bus.write(Register::Csctl0, cs::CSKEY);
}

/// Clear the XT1 and global oscillator fault flags
pub fn clear_fault_flags<B: RegisterBus>(bus: &mut B) {
    bus.clear_bits(Register::Csctl5, cs::XT1OFFG);
    bus.clear_bits(Register::Sfrifg1, sfr::OFIFG);
}

/// Check the global oscillator fault flag
pub fn fault_pending<B: RegisterBus>(bus: &mut B) -> bool {
    bus.any_set(Register::Sfrifg1, sfr::OFIFG)
}

/// Start XT1 in bypass mode and wait until it runs fault-free
///
/// There is no timeout: an oscillator that never settles stalls here,
/// leaving the watchdog as the only way out. Returns the number of clear
/// attempts it took. The fault interrupt is enabled only once the flag
/// reads clear.
pub fn start_xt1<B: RegisterBus>(bus: &mut B) -> u32 {
    unlock(bus);
    bus.set_bits(Register::Csctl4, cs::XT1BYPASS | cs::XTS);
    bus.clear_bits(Register::Csctl4, cs::XT1OFF);

    let mut attempts: u32 = 0;
    loop {
        clear_fault_flags(bus);
        attempts = attempts.saturating_add(1);
        if !fault_pending(bus) {
            break;
        }
    }
    bus.set_bits(Register::Sfrie1, sfr::OFIE);

    debug!("xt1: running after {} attempts", attempts);
    attempts
}

/// Mask the fault interrupt and stop XT1
///
/// Must run before the TCXO loses power, otherwise its disappearance is
/// reported as a clock fault.
pub fn stop_xt1<B: RegisterBus>(bus: &mut B) {
    bus.clear_bits(Register::Sfrie1, sfr::OFIE);
    unlock(bus);
    bus.set_bits(Register::Csctl4, cs::XT1BYPASS | cs::XTS);
    bus.set_bits(Register::Csctl4, cs::XT1OFF);
}
