//! Mock MCU for host-side testing
//!
//! [`MockBus`] is a register file that records every write in order and
//! models the one piece of hardware behaviour the core depends on: the
//! oscillator fault flag re-asserting itself while XT1 is still unstable.
//! [`MockCpu`] counts sleeps, wake requests and delay cycles.

use heapless::Vec;

use super::regs::{cs, i2c, sfr, uart};
use super::{Cpu, Register, RegisterBus};

/// Maximum number of writes kept in the log
pub const LOG_CAPACITY: usize = 512;

/// A single recorded register write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Write {
    /// Register written
    pub reg: Register,
    /// Value written
    pub value: u16,
}

/// Register file with write log and oscillator fault model
#[derive(Clone, Debug)]
pub struct MockBus {
    regs: [u16; Register::COUNT],
    log: Vec<Write, LOG_CAPACITY>,
    dropped: usize,
    xt1_startup_faults: u32,
    faults_remaining: u32,
}

impl MockBus {
    /// Create a bus holding the power-on reset values
    #[must_use]
    pub fn new() -> Self {
        let mut regs = [0u16; Register::COUNT];
        regs[Register::Wdtctl.index()] = 0x6904;
        regs[Register::Csctl4.index()] = cs::XT1OFF | cs::XT2OFF;
        regs[Register::Uca0Ctlw0.index()] = uart::UCSWRST;
        regs[Register::Ucb0Ctlw0.index()] = 0x01C0 | i2c::UCSWRST;
        Self {
            regs,
            log: Vec::new(),
            dropped: 0,
            xt1_startup_faults: 0,
            faults_remaining: 0,
        }
    }

    /// XT1 will keep raising its fault flag for this many clear attempts
    /// every time it is started
    #[must_use]
    pub fn with_xt1_startup_faults(mut self, attempts: u32) -> Self {
        self.xt1_startup_faults = attempts;
        self
    }

    /// Raise an oscillator fault that survives `persist` clear attempts
    pub fn inject_clock_fault(&mut self, persist: u32) {
        self.faults_remaining = persist;
        self.assert_fault();
    }

    /// Register value without side effects or logging
    #[must_use]
    pub fn peek(&self, reg: Register) -> u16 {
        self.regs[reg.index()]
    }

    /// Overwrite a register without logging, e.g. to advance a counter
    pub fn poke(&mut self, reg: Register, value: u16) {
        self.regs[reg.index()] = value;
    }

    /// Writes recorded since creation or the last [`MockBus::clear_log`]
    #[must_use]
    pub fn writes(&self) -> &[Write] {
        &self.log
    }

    /// Writes that did not fit in the log
    #[must_use]
    pub const fn dropped_writes(&self) -> usize {
        self.dropped
    }

    /// Forget recorded writes
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.dropped = 0;
    }

    /// Index of the first logged write to `reg` whose value satisfies `pred`
    pub fn first_write<F>(&self, reg: Register, pred: F) -> Option<usize>
    where
        F: Fn(u16) -> bool,
    {
        self.log
            .iter()
            .position(|w| w.reg == reg && pred(w.value))
    }

    /// Index of the last logged write to `reg` whose value satisfies `pred`
    pub fn last_write<F>(&self, reg: Register, pred: F) -> Option<usize>
    where
        F: Fn(u16) -> bool,
    {
        self.log
            .iter()
            .rposition(|w| w.reg == reg && pred(w.value))
    }

    /// Whether the oscillator fault flag is currently set
    #[must_use]
    pub fn fault_pending(&self) -> bool {
        self.peek(Register::Sfrifg1) & sfr::OFIFG != 0
    }

    fn assert_fault(&mut self) {
        self.regs[Register::Sfrifg1.index()] |= sfr::OFIFG;
        self.regs[Register::Csctl5.index()] |= cs::XT1OFFG;
    }

    fn record(&mut self, reg: Register, value: u16) {
        if self.log.push(Write { reg, value }).is_err() {
            self.dropped += 1;
        }
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBus for MockBus {
    fn read(&mut self, reg: Register) -> u16 {
        self.regs[reg.index()]
    }

    fn write(&mut self, reg: Register, value: u16) {
        let value = if reg.is_byte() { value & 0x00FF } else { value };
        let old = self.regs[reg.index()];
        self.record(reg, value);
        self.regs[reg.index()] = value;

        match reg {
            // XT1 leaving the off state starts up with its fault flag set
            Register::Csctl4 if old & cs::XT1OFF != 0 && value & cs::XT1OFF == 0 => {
                self.faults_remaining = self.xt1_startup_faults;
                self.assert_fault();
            }
            // An unstable oscillator sets the flag again right after a clear
            Register::Sfrifg1
                if old & sfr::OFIFG != 0 && value & sfr::OFIFG == 0 && self.faults_remaining > 0 =>
            {
                self.faults_remaining -= 1;
                self.assert_fault();
            }
            _ => {}
        }
    }
}

/// CPU model that records status-register activity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MockCpu {
    interrupts_enabled: bool,
    low_power: bool,
    sleeps: u32,
    wakes: u32,
    cycles: u64,
}

impl MockCpu {
    /// Create a CPU that is awake with interrupts disabled
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interrupts_enabled: false,
            low_power: false,
            sleeps: 0,
            wakes: 0,
            cycles: 0,
        }
    }

    /// Whether GIE has been set
    #[must_use]
    pub const fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    /// Whether the CPU is currently in low-power mode
    #[must_use]
    pub const fn is_sleeping(&self) -> bool {
        self.low_power
    }

    /// Number of low-power entries
    #[must_use]
    pub const fn sleeps(&self) -> u32 {
        self.sleeps
    }

    /// Number of wake-on-exit requests
    #[must_use]
    pub const fn wakes(&self) -> u32 {
        self.wakes
    }

    /// Total cycles spent in busy-waits
    #[must_use]
    pub const fn delayed_cycles(&self) -> u64 {
        self.cycles
    }
}

impl Cpu for MockCpu {
    fn enable_interrupts(&mut self) {
        self.interrupts_enabled = true;
    }

    fn enter_low_power(&mut self) {
        self.sleeps += 1;
        self.low_power = true;
    }

    fn wake_on_exit(&mut self) {
        self.wakes += 1;
        self.low_power = false;
    }

    fn delay_cycles(&mut self, cycles: u32) {
        self.cycles += u64::from(cycles);
    }
}
