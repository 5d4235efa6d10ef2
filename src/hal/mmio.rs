//! Memory-mapped register access
//!
//! The only place in the crate that dereferences raw addresses.

#![allow(unsafe_code)]

use core::ptr;

use super::{Register, RegisterBus};

/// Zero-sized handle to the MCU's peripheral address space
///
/// Copies of the handle alias the same hardware; the interrupt handlers and
/// the main loop each hold one.
#[derive(Clone, Copy, Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create a handle to the peripheral registers
    ///
    /// # Safety
    ///
    /// Must only be used on the MSP430FR5739 whose memory map
    /// [`Register::address`] describes.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    fn read(&mut self, reg: Register) -> u16 {
        let addr = usize::from(reg.address());
        // SAFETY: address comes from the device register map
        unsafe {
            if reg.is_byte() {
                u16::from(ptr::read_volatile(addr as *const u8))
            } else {
                ptr::read_volatile(addr as *const u16)
            }
        }
    }

    fn write(&mut self, reg: Register, value: u16) {
        let addr = usize::from(reg.address());
        // SAFETY: address comes from the device register map
        unsafe {
            if reg.is_byte() {
                ptr::write_volatile(addr as *mut u8, value.to_le_bytes()[0]);
            } else {
                ptr::write_volatile(addr as *mut u16, value);
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Mmio {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Mmio");
    }
}
