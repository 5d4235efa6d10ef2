//! Module Lifecycle Tests
//!
//! Tests for the GPS and RF enable/disable sequences, their write ordering
//! and convergence under arbitrary request histories.
//! Run with: cargo test --features std --test module_tests

use beacon_firmware::clock;
use beacon_firmware::config::{pins, GPS_UART_DIVISOR, RF_I2C_DIVISOR};
use beacon_firmware::hal::mock::{MockBus, MockCpu};
use beacon_firmware::hal::regs::{cs, i2c, sfr, uart};
use beacon_firmware::hal::Register;
use beacon_firmware::module::{self, sequence, Step};
use beacon_firmware::pins::Rail;
use beacon_firmware::types::DecodeError;
use beacon_firmware::{Beacon, Module, ModuleState};

fn initialized() -> Beacon<MockBus, MockCpu> {
    let mut beacon = Beacon::new(MockBus::new(), MockCpu::new());
    beacon.initialize_hardware();
    beacon.bus().clear_log();
    beacon
}

fn position(steps: &[Step], step: Step) -> usize {
    steps.iter().position(|&s| s == step).unwrap()
}

// =============================================================================
// Sequence Ordering
// =============================================================================

#[test]
fn disable_powers_down_before_reset_and_park() {
    for m in Module::ALL {
        let steps = sequence(m, ModuleState::Disabled);
        assert!(position(steps, Step::RailOff) < position(steps, Step::HoldInReset));
        assert!(position(steps, Step::HoldInReset) < position(steps, Step::ParkPins));
        assert!(!steps.contains(&Step::RailOn));
    }
}

#[test]
fn enable_powers_up_after_interface_is_running() {
    for m in Module::ALL {
        let steps = sequence(m, ModuleState::Enabled);
        assert_eq!(steps[0], Step::MuxPins);
        assert!(position(steps, Step::HoldInReset) < position(steps, Step::ConfigureInterface));
        assert!(position(steps, Step::ConfigureInterface) < position(steps, Step::ReleaseReset));
        assert!(position(steps, Step::ReleaseReset) < position(steps, Step::RailOn));
        assert!(!steps.contains(&Step::RailOff));
    }
}

#[test]
fn rf_oscillator_brackets_the_rail() {
    let off = sequence(Module::Rf, ModuleState::Disabled);
    assert_eq!(off[0], Step::StopOscillator);

    let on = sequence(Module::Rf, ModuleState::Enabled);
    assert_eq!(on.last(), Some(&Step::StartOscillator));
}

#[test]
fn gps_has_no_oscillator_steps() {
    for state in [ModuleState::Disabled, ModuleState::Enabled] {
        let steps = sequence(Module::Gps, state);
        assert!(!steps.contains(&Step::StartOscillator));
        assert!(!steps.contains(&Step::StopOscillator));
    }
}

// =============================================================================
// GPS Scenarios
// =============================================================================

#[test]
fn gps_enable_configures_uart_before_rail_on() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Gps, ModuleState::Enabled);
    let bus = beacon.bus();

    let rail_on = bus
        .first_write(Register::P1Out, |v| v & pins::VEN_GPS.mask() == 0)
        .unwrap();
    let baud = bus
        .first_write(Register::Uca0Brw, |v| v == GPS_UART_DIVISOR.br)
        .unwrap();
    let modulation = bus
        .first_write(Register::Uca0Mctlw, |v| v == GPS_UART_DIVISOR.mctlw())
        .unwrap();
    let released = bus
        .last_write(Register::Uca0Ctlw0, |v| v & uart::UCSWRST == 0)
        .unwrap();

    assert!(baud < released);
    assert!(modulation < released);
    assert!(released < rail_on);

    assert!(Rail::GPS.is_powered(bus));
    assert_eq!(bus.peek(Register::Uca0Ctlw0), uart::UCSSEL_1);
}

#[test]
fn gps_enable_muxes_uart_and_listens_on_1pps() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Gps, ModuleState::Enabled);
    let bus = beacon.bus();

    let uart_mask = pins::UART_BUS.mask();
    assert_eq!(bus.peek(Register::P2Sel1) & uart_mask, uart_mask);
    assert_eq!(bus.peek(Register::P2Sel0) & uart_mask, 0);
    assert_eq!(bus.peek(Register::P2Dir) & pins::UART_RXD.mask(), 0);
    assert_eq!(bus.peek(Register::P1Dir) & pins::GPS_1PPS.mask(), 0);
}

#[test]
fn gps_disable_drops_rail_before_pins_return_to_gpio() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Gps, ModuleState::Enabled);
    beacon.bus().clear_log();
    beacon.configure_module(Module::Gps, ModuleState::Disabled);
    let bus = beacon.bus();

    let rail_off = bus
        .first_write(Register::P1Out, |v| v & pins::VEN_GPS.mask() != 0)
        .unwrap();
    let reset = bus
        .first_write(Register::Uca0Ctlw0, |v| v & uart::UCSWRST != 0)
        .unwrap();
    let uart_mask = pins::UART_BUS.mask();
    let gpio_dir = bus
        .first_write(Register::P2Dir, |v| v & uart_mask == uart_mask)
        .unwrap();

    assert!(rail_off < reset);
    assert!(reset < gpio_dir);
    assert_eq!(bus.writes()[0].reg, Register::P1Out);
}

#[test]
fn gps_disable_parks_every_pin() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Gps, ModuleState::Enabled);
    beacon.configure_module(Module::Gps, ModuleState::Disabled);
    let bus = beacon.bus();

    assert!(pins::UART_BUS.is_parked(bus));
    assert!(pins::GPS_1PPS.is_parked(bus));
    assert!(!Rail::GPS.is_powered(bus));
    assert_eq!(bus.peek(Register::Uca0Ctlw0), uart::UCSWRST);
    assert_eq!(bus.peek(Register::Uca0Brw), 0);
}

#[test]
fn gps_transitions_leave_rf_untouched() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Gps, ModuleState::Enabled);
    let bus = beacon.bus();

    assert!(bus.first_write(Register::Ucb0Ctlw0, |_| true).is_none());
    assert!(bus.first_write(Register::Csctl4, |_| true).is_none());
    assert!(!Rail::RF.is_powered(bus));
}

// =============================================================================
// RF Scenarios
// =============================================================================

#[test]
fn rf_enable_runs_i2c_then_starts_oscillator() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Rf, ModuleState::Enabled);
    let bus = beacon.bus();

    let rail_on = bus
        .first_write(Register::P1Out, |v| v & pins::VEN_RF.mask() == 0)
        .unwrap();
    let released = bus
        .last_write(Register::Ucb0Ctlw0, |v| v & i2c::UCSWRST == 0)
        .unwrap();
    let xt1_on = bus
        .first_write(Register::Csctl4, |v| v & cs::XT1OFF == 0)
        .unwrap();

    assert!(released < rail_on);
    assert!(rail_on < xt1_on);

    assert_eq!(bus.peek(Register::Ucb0Brw), RF_I2C_DIVISOR);
    assert_eq!(bus.peek(Register::Ucb0Ctlw1), i2c::UCASTP_2);
    assert_eq!(
        bus.peek(Register::Ucb0Ctlw0),
        i2c::UCMODE_3 | i2c::UCMST | i2c::UCSYNC | i2c::UCSSEL_1
    );
    assert!(Rail::RF.is_powered(bus));
}

#[test]
fn rf_enable_muxes_i2c_and_clock_input() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Rf, ModuleState::Enabled);
    let bus = beacon.bus();

    let i2c_mask = pins::I2C_BUS.mask();
    assert_eq!(bus.peek(Register::P1Sel1) & i2c_mask, i2c_mask);
    assert_eq!(bus.peek(Register::P1Sel0) & i2c_mask, 0);

    let xin = pins::XT1_CLKIN.mask();
    assert_eq!(bus.peek(Register::PjSel0) & xin, xin);
    assert_eq!(bus.peek(Register::PjSel1) & xin, 0);
}

#[test]
fn rf_enable_waits_for_oscillator_to_settle() {
    let mut beacon = Beacon::new(MockBus::new().with_xt1_startup_faults(5), MockCpu::new());
    beacon.initialize_hardware();
    beacon.configure_module(Module::Rf, ModuleState::Enabled);
    let bus = beacon.bus();

    assert!(!bus.fault_pending());
    let ofie = bus
        .first_write(Register::Sfrie1, |v| v & sfr::OFIE != 0)
        .unwrap();
    let last_clear = bus
        .last_write(Register::Sfrifg1, |v| v & sfr::OFIFG == 0)
        .unwrap();
    assert!(last_clear < ofie);
}

#[test]
fn start_xt1_counts_clear_attempts() {
    let mut bus = MockBus::new().with_xt1_startup_faults(5);
    clock::initialize_clocks(&mut bus);

    let attempts = clock::start_xt1(&mut bus);
    assert_eq!(attempts, 6);
    assert_ne!(bus.peek(Register::Sfrie1) & sfr::OFIE, 0);
    assert_eq!(bus.peek(Register::Csctl4) & cs::XT1OFF, 0);
    assert_ne!(bus.peek(Register::Csctl4) & cs::XT1BYPASS, 0);
}

#[test]
fn start_xt1_settled_oscillator_needs_one_attempt() {
    let mut bus = MockBus::new();
    clock::initialize_clocks(&mut bus);
    assert_eq!(clock::start_xt1(&mut bus), 1);
}

#[test]
fn rf_disable_stops_oscillator_before_rail_off() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Rf, ModuleState::Enabled);
    beacon.bus().clear_log();
    beacon.configure_module(Module::Rf, ModuleState::Disabled);
    let bus = beacon.bus();

    let ofie_off = bus
        .first_write(Register::Sfrie1, |v| v & sfr::OFIE == 0)
        .unwrap();
    let xt1_off = bus
        .first_write(Register::Csctl4, |v| v & cs::XT1OFF != 0)
        .unwrap();
    let rail_off = bus
        .first_write(Register::P1Out, |v| v & pins::VEN_RF.mask() != 0)
        .unwrap();
    let reset = bus
        .first_write(Register::Ucb0Ctlw0, |v| v & i2c::UCSWRST != 0)
        .unwrap();

    assert!(ofie_off < xt1_off);
    assert!(xt1_off < rail_off);
    assert!(rail_off < reset);

    assert!(pins::I2C_BUS.is_parked(bus));
    assert!(pins::XT1_CLKIN.is_parked(bus));
    assert!(!Rail::RF.is_powered(bus));
}

// =============================================================================
// Idempotence and Convergence
// =============================================================================

#[test]
fn repeated_request_changes_nothing() {
    let mut beacon = initialized();
    beacon.configure_module(Module::Gps, ModuleState::Enabled);
    let snapshot: Vec<u16> = Register::ALL.iter().map(|&r| beacon.bus().peek(r)).collect();

    beacon.configure_module(Module::Gps, ModuleState::Enabled);
    let again: Vec<u16> = Register::ALL.iter().map(|&r| beacon.bus().peek(r)).collect();
    assert_eq!(snapshot, again);
}

#[test]
fn facade_records_module_state() {
    let mut beacon = initialized();
    assert_eq!(beacon.module_state(Module::Rf), ModuleState::Disabled);
    beacon.configure_module(Module::Rf, ModuleState::Enabled);
    assert_eq!(beacon.module_state(Module::Rf), ModuleState::Enabled);
    assert_eq!(beacon.module_state(Module::Gps), ModuleState::Disabled);
}

#[test]
fn single_step_can_be_applied() {
    let mut bus = MockBus::new();
    module::apply(&mut bus, Module::Gps, Step::RailOff);
    assert!(!Rail::GPS.is_powered(&mut bus));
    module::apply(&mut bus, Module::Gps, Step::RailOn);
    assert!(Rail::GPS.is_powered(&mut bus));
    assert!(bus.first_write(Register::Uca0Ctlw0, |_| true).is_none());
}

fn register_file(bus: &MockBus) -> Vec<u16> {
    Register::ALL.iter().map(|&r| bus.peek(r)).collect()
}

proptest::proptest! {
    /// Any history of requests leaves the same registers as one request per
    /// module for its final state.
    #[test]
    fn request_history_converges(history in proptest::collection::vec((0u8..2, proptest::bool::ANY), 0..24)) {
        let mut replayed = Beacon::new(MockBus::new(), MockCpu::new());
        replayed.initialize_hardware();

        let mut last = [ModuleState::Disabled; 2];
        for &(id, on) in &history {
            let m = Module::try_from(id).unwrap();
            let state = ModuleState::from(on);
            replayed.configure_module(m, state);
            last[m.index()] = state;
        }

        let mut direct = Beacon::new(MockBus::new(), MockCpu::new());
        direct.initialize_hardware();
        for m in Module::ALL {
            direct.configure_module(m, last[m.index()]);
        }

        assert_eq!(register_file(replayed.bus()), register_file(direct.bus()));
        for m in Module::ALL {
            assert_eq!(replayed.module_state(m), last[m.index()]);
        }
    }
}

// =============================================================================
// Request Decoding
// =============================================================================

#[test]
fn module_ids_decode() {
    assert_eq!(Module::try_from(0), Ok(Module::Gps));
    assert_eq!(Module::try_from(1), Ok(Module::Rf));
    assert_eq!(Module::try_from(2), Err(DecodeError::UnknownModule(2)));
}

#[test]
fn module_states_decode() {
    assert_eq!(ModuleState::try_from(0), Ok(ModuleState::Disabled));
    assert_eq!(ModuleState::try_from(1), Ok(ModuleState::Enabled));
    assert_eq!(ModuleState::try_from(7), Err(DecodeError::UnknownState(7)));
}

#[test]
fn display_names() {
    assert_eq!(Module::Gps.to_string(), "GPS");
    assert_eq!(ModuleState::Enabled.to_string(), "enabled");
    assert_eq!(DecodeError::UnknownModule(9).to_string(), "unknown module id 9");
}
