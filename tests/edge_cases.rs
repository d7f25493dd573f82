//! Edge case and boundary condition tests for the plant controller

use smart_pot::hal::{MockActuator, MockClock, MockDisplay, MockIo};
use smart_pot::traits::{Clock, OutputLine};
use smart_pot::{
    Config, ControllerError, PlantController, PumpCommand, SampleRequest, SamplingConfig,
    StepCommand, SystemState, ThresholdConfig, Ticker, TrackingConfig,
};

fn controller_with<'s>(
    state: &'s SystemState,
    io: MockIo,
    config: &Config,
) -> PlantController<'s, MockIo, MockActuator, MockDisplay> {
    let mut controller =
        PlantController::new(state, io, MockActuator::new(), MockDisplay::new(), config);
    controller.start(0).unwrap();
    controller
}

// ============================================================================
// Percentage Mapping
// ============================================================================

#[test]
fn reading_above_range_is_not_clamped() {
    let state = SystemState::new();
    let mut controller = controller_with(&state, MockIo::new(), &Config::default());
    state.on_sample_ready(1023);

    let report = controller.tick(100).unwrap();
    assert_eq!(report.status.moisture_percent, 144);
    assert_eq!(controller.display().top(), Some("Moist: 144%"));
}

#[test]
fn clamping_when_configured() {
    let state = SystemState::new();
    let config = Config::default()
        .with_thresholds(ThresholdConfig::default().with_clamp_percentage(true));
    let mut controller = controller_with(&state, MockIo::new(), &config);

    state.on_sample_ready(250);
    controller.tick(100).unwrap();
    assert_eq!(controller.display().top(), Some("Moist: 0%"));

    state.on_sample_ready(1023);
    controller.tick(200).unwrap();
    assert_eq!(controller.display().top(), Some("Moist: 100%"));
}

#[test]
fn clamping_does_not_change_irrigation() {
    let state = SystemState::new();
    let config = Config::default()
        .with_thresholds(ThresholdConfig::default().with_clamp_percentage(true));
    let mut controller = controller_with(&state, MockIo::new(), &config);
    state.on_sample_ready(250);

    assert_eq!(controller.tick(100).unwrap().pump, Some(PumpCommand::On));
}

#[test]
fn degenerate_range_shows_zero() {
    let state = SystemState::new();
    let config =
        Config::default().with_thresholds(ThresholdConfig::default().with_range(500, 500));
    let mut controller = controller_with(&state, MockIo::new(), &config);
    state.on_sample_ready(900);

    controller.tick(100).unwrap();
    assert_eq!(controller.display().top(), Some("Moist: 0%"));
}

#[test]
fn power_on_reading_is_zero() {
    let state = SystemState::new();
    let mut controller = controller_with(&state, MockIo::new(), &Config::default());

    // No conversion has completed yet
    let report = controller.tick(100).unwrap();
    assert_eq!(report.status.moisture_percent, -60);
    assert_eq!(report.pump, Some(PumpCommand::On));
}

// ============================================================================
// Tracking Boundaries
// ============================================================================

#[test]
fn dead_band_edges() {
    let state = SystemState::new();
    let mut controller = controller_with(&state, MockIo::new(), &Config::default());

    let cases = [
        (0, 100, StepCommand::None),
        (100, 0, StepCommand::None),
        (0, 101, StepCommand::Steps(50)),
        (101, 0, StepCommand::Steps(-50)),
        (0, u16::MAX, StepCommand::Steps(50)),
        (u16::MAX, 0, StepCommand::Steps(-50)),
    ];
    for (i, (left, right, expected)) in cases.into_iter().enumerate() {
        controller.io_mut().light_left = left;
        controller.io_mut().light_right = right;
        let report = controller.tick(100 * (i as u64 + 1)).unwrap();
        assert_eq!(report.step, Some(expected), "left {} right {}", left, right);
    }
}

#[test]
fn custom_tracking_config() {
    let state = SystemState::new();
    let config = Config::default().with_tracking(
        TrackingConfig::default()
            .with_light_diff_threshold(10)
            .with_step_magnitude(5)
            .with_motor_rpm(3),
    );
    let mut controller = controller_with(&state, MockIo::new().with_light(100, 120), &config);

    controller.tick(100).unwrap();
    assert_eq!(controller.actuator().rpm, Some(3));
    assert_eq!(controller.actuator().moves, vec![5]);
}

// ============================================================================
// Stale and Stuck Samples
// ============================================================================

#[test]
fn stuck_conversion_keeps_last_reading() {
    let state = SystemState::new();
    let mut controller = controller_with(&state, MockIo::new(), &Config::default());
    state.on_sample_ready(100);

    assert_eq!(controller.tick(1100).unwrap().sample, SampleRequest::Started);
    // The mock never completes this conversion
    let report = controller.tick(2200).unwrap();
    assert_eq!(report.sample, SampleRequest::InFlight);
    assert_eq!(report.pump, Some(PumpCommand::On));
    assert_eq!(state.moisture_reading(), 100);
    assert_eq!(controller.io().conversions_started, 2);
}

#[test]
fn stale_sample_stops_watering_when_age_limited() {
    let state = SystemState::new();
    let config =
        Config::default().with_sampling(SamplingConfig::default().with_max_sample_age_ms(3000));
    let mut controller = controller_with(&state, MockIo::new(), &config);
    state.on_sample_ready(100);

    assert_eq!(controller.tick(100).unwrap().pump, Some(PumpCommand::On));
    assert_eq!(controller.tick(3100).unwrap().pump, Some(PumpCommand::On));
    assert_eq!(controller.tick(3200).unwrap().pump, Some(PumpCommand::Off));
    assert!(!controller.io().output(OutputLine::Pump));
    assert_eq!(controller.sample_age_ms(3200), Some(3100));
}

#[test]
fn age_limit_refuses_before_first_sample() {
    let state = SystemState::new();
    let config =
        Config::default().with_sampling(SamplingConfig::default().with_max_sample_age_ms(3000));
    let mut controller = controller_with(&state, MockIo::new(), &config);

    // Reading 0 would water, but nothing has been measured yet
    assert_eq!(controller.tick(100).unwrap().pump, Some(PumpCommand::Off));
    assert_eq!(controller.sample_age_ms(100), None);
}

#[test]
fn stale_gate_tracks_sample_freshness() {
    let state = SystemState::new();
    let config =
        Config::default().with_sampling(SamplingConfig::default().with_max_sample_age_ms(500));
    let mut controller = controller_with(&state, MockIo::new(), &config);
    state.on_sample_ready(100);

    controller.tick(100).unwrap();
    assert!(!controller.is_stale_gated());

    for t in 7..=10 {
        controller.tick(t * 100).unwrap();
        assert!(controller.is_stale_gated());
    }

    state.on_sample_ready(100);
    controller.tick(1100).unwrap();
    assert!(!controller.is_stale_gated());
}

#[test]
fn wet_soil_is_not_stale_gated() {
    let state = SystemState::new();
    let config =
        Config::default().with_sampling(SamplingConfig::default().with_max_sample_age_ms(500));
    let mut controller = controller_with(&state, MockIo::new(), &config);
    state.on_sample_ready(700);

    controller.tick(100).unwrap();
    controller.tick(900).unwrap();
    assert!(!controller.is_stale_gated());
}

#[test]
fn fresh_sample_restores_watering() {
    let state = SystemState::new();
    let config =
        Config::default().with_sampling(SamplingConfig::default().with_max_sample_age_ms(500));
    let mut controller = controller_with(&state, MockIo::new(), &config);
    state.on_sample_ready(100);

    controller.tick(100).unwrap();
    assert_eq!(controller.tick(700).unwrap().pump, Some(PumpCommand::Off));

    state.on_sample_ready(120);
    assert_eq!(controller.tick(800).unwrap().pump, Some(PumpCommand::On));
}

// ============================================================================
// Hardware Faults
// ============================================================================

#[test]
fn conversion_start_failure_releases_converter() {
    let state = SystemState::new();
    let mut controller = controller_with(&state, MockIo::new(), &Config::default());
    controller.io_mut().complete_conversion(&state.moisture);
    controller.io_mut().fail_conversion = true;

    let report = controller.tick(1100).unwrap();
    assert_eq!(report.sample, SampleRequest::Failed);
    assert!(!state.moisture.is_converting());

    controller.io_mut().fail_conversion = false;
    assert_eq!(controller.tick(2200).unwrap().sample, SampleRequest::Started);
}

#[test]
fn failed_conversion_still_runs_the_tick() {
    let state = SystemState::new();
    let mut controller = controller_with(&state, MockIo::new(), &Config::default());
    state.on_sample_ready(100);
    controller.tick(100).unwrap();
    assert!(controller.io().output(OutputLine::Pump));
    let renders = controller.display().render_count;

    controller.io_mut().has_water = false;
    controller.io_mut().fail_conversion = true;
    let report = controller.tick(1200).unwrap();

    assert_eq!(report.sample, SampleRequest::Failed);
    assert_eq!(report.pump, Some(PumpCommand::Off));
    assert!(!controller.io().output(OutputLine::Pump));
    assert!(controller.io().output(OutputLine::FaultIndicator));
    assert_eq!(controller.display().render_count, renders + 1);
    assert_eq!(controller.display().bottom(), Some("AUTO   LOW"));
    assert_eq!(state.moisture_reading(), 100);
}

#[test]
fn actuator_failure_is_tagged() {
    let state = SystemState::new();
    let mut motor_fault = MockActuator::new();
    motor_fault.fail_step = true;
    let mut controller = PlantController::new(
        &state,
        MockIo::new().with_light(0, 500),
        motor_fault,
        MockDisplay::new(),
        &Config::default(),
    );
    controller.start(0).unwrap();
    let err = controller.tick(100).unwrap_err();
    assert_eq!(err, ControllerError::Actuator(()));
    assert_eq!(err.source_name(), "actuator");
}

#[test]
fn buzzer_is_never_driven() {
    let state = SystemState::new();
    let mut controller =
        controller_with(&state, MockIo::new().with_water(false), &Config::default());

    for t in 1..=20 {
        controller.tick(t * 100).unwrap();
    }
    assert!(!controller.io().output(OutputLine::Buzzer));
    assert!(controller
        .io()
        .output_log
        .iter()
        .all(|&(line, on)| line != OutputLine::Buzzer || !on));
}

// ============================================================================
// Loop Pacing
// ============================================================================

#[test]
fn paced_loop_samples_once_per_second() {
    let state = SystemState::new();
    let config = Config::default();
    let mut controller = controller_with(&state, MockIo::new().with_moisture(600), &config);
    let mut clock = MockClock::new();
    let mut ticker = Ticker::new(config.control_loop.tick_ms);
    ticker.advance(clock.now_ms());

    while clock.now_ms() < 10_000 {
        clock.advance(ticker.remaining_ms(clock.now_ms()));
        // Completion interrupt lands between ticks
        controller.io_mut().complete_conversion(&state.moisture);
        controller.tick(clock.now_ms()).unwrap();
        ticker.advance(clock.now_ms());
    }

    assert_eq!(ticker.ticks(), 101);
    assert_eq!(controller.io().conversions_started, 10);
    assert_eq!(state.moisture_reading(), 600);
}
