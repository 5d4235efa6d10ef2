//! Hardware Abstraction Layer
//!
//! Provides the two seams every other module talks to the MCU through:
//! [`RegisterBus`] for peripheral registers and [`Cpu`] for the status
//! register and cycle-counted delays. The real MCU plugs in the
//! `mmio::Mmio` bus; host tests plug in [`mock::MockBus`] and
//! [`mock::MockCpu`].

pub mod mock;
pub mod regs;

#[cfg(feature = "embedded")]
pub mod mmio;

pub use regs::Register;

/// 16-bit access to named peripheral registers
///
/// Byte-wide registers are read zero-extended and written with the low byte.
pub trait RegisterBus {
    /// Read a register
    fn read(&mut self, reg: Register) -> u16;

    /// Write a register
    fn write(&mut self, reg: Register, value: u16);

    /// Read-modify-write a register
    fn modify<F>(&mut self, reg: Register, f: F)
    where
        F: FnOnce(u16) -> u16,
    {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// Set the given bits (`reg |= bits`)
    fn set_bits(&mut self, reg: Register, bits: u16) {
        self.modify(reg, |v| v | bits);
    }

    /// Clear the given bits (`reg &= !bits`)
    fn clear_bits(&mut self, reg: Register, bits: u16) {
        self.modify(reg, |v| v & !bits);
    }

    /// Check whether any of the given bits are set
    fn any_set(&mut self, reg: Register, bits: u16) -> bool {
        self.read(reg) & bits != 0
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    fn read(&mut self, reg: Register) -> u16 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, value: u16) {
        (**self).write(reg, value);
    }
}

/// CPU core operations that live in the status register
pub trait Cpu {
    /// Set GIE so maskable interrupts are serviced
    fn enable_interrupts(&mut self);

    /// Enter LPM3. The CPU and MCLK halt while the timers and serial
    /// interfaces keep their clocks through module clock requests.
    /// Returns once an interrupt handler requests a wake.
    fn enter_low_power(&mut self);

    /// From inside an interrupt handler: clear the low-power bits in the
    /// stacked status register so the CPU stays awake after return
    fn wake_on_exit(&mut self);

    /// Burn approximately `cycles` MCLK cycles
    fn delay_cycles(&mut self, cycles: u32);
}

impl<T: Cpu + ?Sized> Cpu for &mut T {
    fn enable_interrupts(&mut self) {
        (**self).enable_interrupts();
    }

    fn enter_low_power(&mut self) {
        (**self).enter_low_power();
    }

    fn wake_on_exit(&mut self) {
        (**self).wake_on_exit();
    }

    fn delay_cycles(&mut self, cycles: u32) {
        (**self).delay_cycles(cycles);
    }
}
