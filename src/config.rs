//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the beacon hardware.
//! Clock rates, derived timer and baud-rate parameters, watchdog settings and
//! pin mappings are centralized here. Everything derived is computed from
//! [`ClockConfig::BEACON`] and checked at compile time, so changing a clock
//! selection either updates every dependent constant or fails the build.

use crate::hal::regs::{cs, wdt};

/// Fixed selection of clock sources and dividers
///
/// The beacon runs one configuration for its whole life; it is applied once
/// by [`crate::clock::initialize_clocks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// DCO output frequency
    pub dco_hz: u32,
    /// XT1 input frequency (TCXO on the RF module, bypass mode)
    pub xt1_hz: u32,
    /// ACLK divider (source DCO)
    pub aclk_div: u32,
    /// SMCLK divider (source XT1)
    pub smclk_div: u32,
    /// MCLK divider (source DCO)
    pub mclk_div: u32,
}

impl ClockConfig {
    /// The beacon's clock tree
    pub const BEACON: Self = Self {
        dco_hz: 5_370_000,
        xt1_hz: 16_367_600,
        aclk_div: 2,
        smclk_div: 32,
        mclk_div: 4,
    };

    /// ACLK = DCO / 2 (heartbeat timer, UART, I2C)
    #[must_use]
    pub const fn aclk_hz(&self) -> u32 {
        self.dco_hz / self.aclk_div
    }

    /// SMCLK = XT1 / 32 (symbol timer), only valid while XT1 runs
    #[must_use]
    pub const fn smclk_hz(&self) -> u32 {
        self.xt1_hz / self.smclk_div
    }

    /// MCLK = DCO / 4 (CPU)
    #[must_use]
    pub const fn mclk_hz(&self) -> u32 {
        self.dco_hz / self.mclk_div
    }

    /// CSCTL1 value
    #[must_use]
    pub const fn csctl1(&self) -> u16 {
        cs::DCOFSEL_0
    }

    /// CSCTL2 value
    #[must_use]
    pub const fn csctl2(&self) -> u16 {
        cs::SELA_DCOCLK | cs::SELS_XT1CLK | cs::SELM_DCOCLK
    }

    /// CSCTL3 value
    #[must_use]
    pub const fn csctl3(&self) -> u16 {
        cs::DIVA_2 | cs::DIVS_32 | cs::DIVM_4
    }

    /// CSCTL4 value at startup: both crystal oscillators off
    #[must_use]
    pub const fn csctl4(&self) -> u16 {
        cs::XT1OFF | cs::XT2OFF
    }
}

/// Clock tree used for every derived constant below
pub const CLOCKS: ClockConfig = ClockConfig::BEACON;

/// CPU clock frequency
pub const MCLK_HZ: u32 = CLOCKS.mclk_hz();

/// Auxiliary clock frequency
pub const ACLK_HZ: u32 = CLOCKS.aclk_hz();

/// Sub-main clock frequency
pub const SMCLK_HZ: u32 = CLOCKS.smclk_hz();

/// Timer input divider (ID_3)
pub const TIMER_INPUT_DIVIDER: u32 = 8;

/// Timer_A extended divider (TAIDEX_7)
pub const TIMER_EXTENDED_DIVIDER: u32 = 8;

/// WSPR symbol duration numerator (seconds)
pub const SYMBOL_PERIOD_NUM: u32 = 8192;

/// WSPR symbol duration denominator (seconds)
pub const SYMBOL_PERIOD_DEN: u32 = 12_000;

/// Counts of a timer clocked at `clock_hz` in `num / den` seconds, rounded
#[must_use]
pub const fn period_ticks(clock_hz: u32, num: u32, den: u32) -> u32 {
    let counts = clock_hz as u64 * num as u64;
    ((counts + den as u64 / 2) / den as u64) as u32
}

/// Heartbeat timer clock: ACLK / 8 / 8 (about 42 kHz)
pub const HEARTBEAT_TIMER_HZ: u32 = ACLK_HZ / TIMER_INPUT_DIVIDER / TIMER_EXTENDED_DIVIDER;

/// Symbol timer clock: SMCLK / 8 (about 64 kHz)
pub const SYMBOL_TIMER_HZ: u32 = SMCLK_HZ / TIMER_INPUT_DIVIDER;

/// Compare-register advance per heartbeat (one second)
#[allow(clippy::cast_possible_truncation)]
pub const HEARTBEAT_COMPARE_STEP: u16 =
    period_ticks(ACLK_HZ, 1, TIMER_INPUT_DIVIDER * TIMER_EXTENDED_DIVIDER) as u16;

/// Compare-register advance per WSPR symbol (8192/12000 s)
#[allow(clippy::cast_possible_truncation)]
pub const SYMBOL_COMPARE_STEP: u16 =
    period_ticks(SMCLK_HZ, SYMBOL_PERIOD_NUM, TIMER_INPUT_DIVIDER * SYMBOL_PERIOD_DEN) as u16;

/// Compare value used for the very first interrupt after timer start
pub const FIRST_COMPARE: u16 = 0;

/// GPS UART baud rate
pub const GPS_BAUD: u32 = 9_600;

/// Standard-mode I2C limit for the RF synthesizer bus
pub const I2C_MAX_HZ: u32 = 100_000;

/// eUSCI_A baud-rate settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UartDivisor {
    /// Prescaler (UCBRx)
    pub br: u16,
    /// First modulation stage (UCBRFx), oversampling only
    pub brf: u8,
    /// Second modulation stage (UCBRSx)
    pub brs: u8,
    /// Oversampling mode (UCOS16)
    pub os16: bool,
}

/// UCBRSx lookup: fractional part of N (in 1/10000) to modulation pattern
const BRS_TABLE: [(u32, u8); 36] = [
    (0, 0x00),
    (529, 0x01),
    (715, 0x02),
    (835, 0x04),
    (1001, 0x08),
    (1252, 0x10),
    (1430, 0x20),
    (1670, 0x11),
    (2147, 0x21),
    (2224, 0x22),
    (2503, 0x44),
    (3000, 0x25),
    (3335, 0x49),
    (3575, 0x4A),
    (3753, 0x52),
    (4003, 0x92),
    (4286, 0x53),
    (4378, 0x55),
    (5002, 0xAA),
    (5715, 0x6B),
    (6003, 0xAD),
    (6254, 0xB5),
    (6432, 0xB6),
    (6667, 0xD6),
    (7001, 0xB7),
    (7147, 0xBB),
    (7503, 0xDD),
    (7861, 0xED),
    (8004, 0xEE),
    (8333, 0xBF),
    (8464, 0xDF),
    (8572, 0xEF),
    (8751, 0xF7),
    (9004, 0xFB),
    (9170, 0xFD),
    (9288, 0xFE),
];

impl UartDivisor {
    /// Compute the eUSCI_A settings for `baud` from a `clock_hz` BRCLK
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn compute(clock_hz: u32, baud: u32) -> Self {
        // N scaled by 10000 keeps four fractional digits
        let n_scaled = clock_hz as u64 * 10_000 / baud as u64;
        let frac = (n_scaled % 10_000) as u32;
        let brs = Self::brs_for(frac);

        if n_scaled >= 16 * 10_000 {
            // Oversampling: BR = INT(N/16), BRF = INT(frac(N/16) * 16)
            let n16 = n_scaled / 16;
            let br = (n16 / 10_000) as u16;
            let brf = ((n16 % 10_000) * 16 / 10_000) as u8;
            Self { br, brf, brs, os16: true }
        } else {
            let br = (n_scaled / 10_000) as u16;
            Self { br, brf: 0, brs, os16: false }
        }
    }

    const fn brs_for(frac: u32) -> u8 {
        let mut brs = 0;
        let mut i = 0;
        while i < BRS_TABLE.len() {
            if BRS_TABLE[i].0 <= frac {
                brs = BRS_TABLE[i].1;
            }
            i += 1;
        }
        brs
    }

    /// UCAxMCTLW register value
    #[must_use]
    pub const fn mctlw(&self) -> u16 {
        let os16 = if self.os16 { crate::hal::regs::uart::UCOS16 } else { 0 };
        ((self.brs as u16) << 8) | ((self.brf as u16) << 4) | os16
    }
}

/// GPS UART divisor (ACLK, 9600 baud)
pub const GPS_UART_DIVISOR: UartDivisor = UartDivisor::compute(ACLK_HZ, GPS_BAUD);

/// Smallest divisor that keeps `clock_hz / divisor` at or below `max_hz`
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn i2c_divisor(clock_hz: u32, max_hz: u32) -> u16 {
    clock_hz.div_ceil(max_hz) as u16
}

/// RF I2C bit-clock divisor (UCB0BRW, ACLK source)
pub const RF_I2C_DIVISOR: u16 = i2c_divisor(ACLK_HZ, I2C_MAX_HZ);

/// MCLK cycles that approximate `us` microseconds
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn cycles_for_us(us: u32) -> u32 {
    (us as u64 * MCLK_HZ as u64 / 1_000_000) as u32
}

/// Settle time between clock-fault clear attempts
pub const FAULT_RETRY_DELAY_US: u32 = 100;

/// Watchdog service word: ACLK source, 2^27 interval, counter clear
pub const WATCHDOG_FEED: u16 = wdt::WDTPW | wdt::WDTCNTCL | wdt::WDTSSEL_1 | wdt::WDTIS_1;

/// Watchdog hold word written first thing at startup
pub const WATCHDOG_HOLD: u16 = wdt::WDTPW | wdt::WDTHOLD;

/// Watchdog timeout in milliseconds: 2^27 ACLK cycles
#[allow(clippy::cast_possible_truncation)]
pub const WATCHDOG_TIMEOUT_MS: u32 = ((1u64 << 27) * 1_000 / ACLK_HZ as u64) as u32;

// Derived timing is only meaningful for the clock tree it was computed from
const _: () = assert!(HEARTBEAT_COMPARE_STEP > 0);
const _: () = assert!(SYMBOL_COMPARE_STEP > 0);
const _: () = assert!(
    period_ticks(ACLK_HZ, 1, TIMER_INPUT_DIVIDER * TIMER_EXTENDED_DIVIDER) <= u16::MAX as u32
);
const _: () = assert!(
    period_ticks(SMCLK_HZ, SYMBOL_PERIOD_NUM, TIMER_INPUT_DIVIDER * SYMBOL_PERIOD_DEN)
        <= u16::MAX as u32
);
const _: () = assert!(GPS_UART_DIVISOR.br > 0);
const _: () = assert!(RF_I2C_DIVISOR >= 4);
const _: () = assert!(ACLK_HZ / RF_I2C_DIVISOR as u32 <= I2C_MAX_HZ);
const _: () = assert!(MCLK_HZ >= 1_000_000);

/// Pin assignments
pub mod pins {
    //! GPIO pin assignments matching the schematic

    use crate::pins::{PinGroup, Port};

    /// GPS rail enable (P1.2, active low)
    pub const VEN_GPS: PinGroup = PinGroup::new(Port::P1, 1 << 2);

    /// RF rail enable (P1.3, active low)
    pub const VEN_RF: PinGroup = PinGroup::new(Port::P1, 1 << 3);

    /// Both rail enables
    pub const VEN_ALL: PinGroup = PinGroup::new(Port::P1, (1 << 2) | (1 << 3));

    /// Solar cell voltage sense (P1.0, A0)
    pub const ADC_VSOL: PinGroup = PinGroup::new(Port::P1, 1 << 0);

    /// Battery voltage sense (P1.1, A1)
    pub const ADC_VBAT: PinGroup = PinGroup::new(Port::P1, 1 << 1);

    /// GPS 1PPS input (P1.4)
    pub const GPS_1PPS: PinGroup = PinGroup::new(Port::P1, 1 << 4);

    /// I2C SDA (P1.6, UCB0SDA)
    pub const I2C_SDA: PinGroup = PinGroup::new(Port::P1, 1 << 6);

    /// I2C SCL (P1.7, UCB0SCL)
    pub const I2C_SCL: PinGroup = PinGroup::new(Port::P1, 1 << 7);

    /// Both I2C lines
    pub const I2C_BUS: PinGroup = PinGroup::new(Port::P1, (1 << 6) | (1 << 7));

    /// UART TXD (P2.0, UCA0TXD)
    pub const UART_TXD: PinGroup = PinGroup::new(Port::P2, 1 << 0);

    /// UART RXD (P2.1, UCA0RXD)
    pub const UART_RXD: PinGroup = PinGroup::new(Port::P2, 1 << 1);

    /// Both UART lines
    pub const UART_BUS: PinGroup = PinGroup::new(Port::P2, (1 << 0) | (1 << 1));

    /// XT1 clock input from the RF module TCXO (PJ.4, XIN)
    pub const XT1_CLKIN: PinGroup = PinGroup::new(Port::Pj, 1 << 4);

    /// Unused pins on port J (PJ.0, PJ.1)
    pub const UNUSED_J: PinGroup = PinGroup::new(Port::Pj, (1 << 0) | (1 << 1));

    /// Unused pins on port 3 (P3.0 to P3.4)
    pub const UNUSED_3: PinGroup = PinGroup::new(Port::P3, 0x1F);
}
