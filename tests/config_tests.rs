//! Configuration and Constants Tests
//!
//! Tests to verify the derived clock, timer and serial constants.
//! Run with: cargo test --features std --test config_tests

use beacon_firmware::config::*;

// =============================================================================
// Clock Tree Tests
// =============================================================================

#[test]
fn clock_rates_follow_dividers() {
    assert_eq!(ACLK_HZ, 2_685_000);
    assert_eq!(MCLK_HZ, 1_342_500);
    // XT1 / 32 truncates the half cycle
    assert_eq!(SMCLK_HZ, 511_487);
}

#[test]
fn clock_register_words() {
    assert_eq!(CLOCKS.csctl2(), 0x0303);
    assert_eq!(CLOCKS.csctl3(), 0x0152);
    assert_eq!(CLOCKS.csctl4(), 0x0101);
}

// =============================================================================
// Timer Step Tests
// =============================================================================

#[test]
fn heartbeat_step_is_one_second() {
    // 2.685 MHz / 64 = 41953.1
    assert_eq!(HEARTBEAT_COMPARE_STEP, 41_953);
    let period_ppm = (u64::from(HEARTBEAT_COMPARE_STEP) * 64 * 1_000_000) / u64::from(ACLK_HZ);
    assert!((999_990..=1_000_010).contains(&period_ppm));
}

#[test]
fn symbol_step_is_wspr_symbol() {
    // 511487 / 8 * 8192 / 12000 = 43647.4
    assert_eq!(SYMBOL_COMPARE_STEP, 43_647);
}

#[test]
fn period_ticks_rounds_to_nearest() {
    assert_eq!(period_ticks(10, 1, 4), 3); // 2.5 rounds up
    assert_eq!(period_ticks(9, 1, 4), 2); // 2.25 rounds down
    assert_eq!(period_ticks(64_000, 1, 1), 64_000);
}

#[test]
fn timer_clocks() {
    assert_eq!(HEARTBEAT_TIMER_HZ, 41_953);
    assert_eq!(SYMBOL_TIMER_HZ, 63_935);
}

// =============================================================================
// Serial Interface Tests
// =============================================================================

#[test]
fn gps_uart_divisor_for_9600_baud() {
    // N = 2685000 / 9600 = 279.6875
    assert_eq!(GPS_UART_DIVISOR.br, 17);
    assert_eq!(GPS_UART_DIVISOR.brf, 7);
    assert_eq!(GPS_UART_DIVISOR.brs, 0xD6);
    assert!(GPS_UART_DIVISOR.os16);
    assert_eq!(GPS_UART_DIVISOR.mctlw(), 0xD671);
}

#[test]
fn gps_uart_baud_error_is_small() {
    let div = GPS_UART_DIVISOR;
    let n16 = u32::from(div.br) * 16 + u32::from(div.brf);
    let actual = ACLK_HZ / n16;
    assert!(actual.abs_diff(GPS_BAUD) * 100 < GPS_BAUD, "actual {actual}");
}

#[test]
fn rf_i2c_stays_in_standard_mode() {
    assert_eq!(RF_I2C_DIVISOR, 27);
    assert!(ACLK_HZ / u32::from(RF_I2C_DIVISOR) <= I2C_MAX_HZ);
    assert!(ACLK_HZ / u32::from(RF_I2C_DIVISOR - 1) > I2C_MAX_HZ);
}

#[test]
fn i2c_divisor_exact_fit() {
    assert_eq!(i2c_divisor(400_000, 100_000), 4);
    assert_eq!(i2c_divisor(400_001, 100_000), 5);
}

// =============================================================================
// Delay and Watchdog Tests
// =============================================================================

#[test]
fn cycles_for_us_uses_mclk() {
    assert_eq!(cycles_for_us(0), 0);
    assert_eq!(cycles_for_us(100), 134);
    assert_eq!(cycles_for_us(1_000), 1_342);
    assert_eq!(cycles_for_us(1_000_000), MCLK_HZ);
}

#[test]
fn watchdog_words_carry_password() {
    assert_eq!(WATCHDOG_FEED & 0xFF00, 0x5A00);
    assert_eq!(WATCHDOG_HOLD & 0xFF00, 0x5A00);
    assert_eq!(WATCHDOG_FEED, 0x5A29);
    assert_eq!(WATCHDOG_HOLD, 0x5A80);
}

#[test]
fn watchdog_timeout_exceeds_heartbeat() {
    // 2^27 / 2.685 MHz, about 50 s
    assert_eq!(WATCHDOG_TIMEOUT_MS, 49_987);
    assert!(WATCHDOG_TIMEOUT_MS > 2_000);
}

// =============================================================================
// Pin Map Tests
// =============================================================================

#[test]
fn rail_enables_are_combined() {
    assert_eq!(pins::VEN_ALL.mask(), pins::VEN_GPS.mask() | pins::VEN_RF.mask());
    assert_eq!(pins::VEN_ALL.port(), pins::VEN_GPS.port());
}

#[test]
fn bus_groups_cover_their_lines() {
    assert_eq!(pins::I2C_BUS.mask(), pins::I2C_SDA.mask() | pins::I2C_SCL.mask());
    assert_eq!(pins::UART_BUS.mask(), pins::UART_TXD.mask() | pins::UART_RXD.mask());
}

#[test]
fn port1_pins_do_not_overlap() {
    let groups = [
        pins::VEN_GPS,
        pins::VEN_RF,
        pins::ADC_VSOL,
        pins::ADC_VBAT,
        pins::GPS_1PPS,
        pins::I2C_SDA,
        pins::I2C_SCL,
    ];
    let mut seen = 0u16;
    for g in groups {
        assert_eq!(seen & g.mask(), 0, "{g:?}");
        seen |= g.mask();
    }
}
