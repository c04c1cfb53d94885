use crate::config::{AzimuthMode, CommandPolicy};
use crate::pointer::Actuator;
use crate::predict::PositionSample;
use crate::tracker::types::PointerState;

#[derive(Debug, Clone, Copy)]
pub struct PointingConfig {
    pub steps_per_revolution: u32,
    pub azimuth_mode: AzimuthMode,
    pub command_policy: CommandPolicy,
}

/// Drive the pointer at a sample taken while the target is up: LED on,
/// stepper by the azimuth delta, servo to the altitude.
///
/// Actuator failures are logged and never propagate; under the
/// best-effort policy the accumulators always record the intended motion,
/// under the strict policy a failed stepper send leaves them untouched so
/// the same delta is retried next poll.
pub fn point_at<A: Actuator + ?Sized>(
    state: &mut PointerState,
    sample: &PositionSample,
    config: &PointingConfig,
    actuator: &mut A,
) {
    if let Err(err) = actuator.led(true) {
        log::warn!("LED command failed: {err}");
    }

    let delta = azimuth_delta(
        config.azimuth_mode,
        sample.azimuth_deg,
        state.last_commanded_azimuth_deg,
    );
    let steps = steps_for_delta(delta, config.steps_per_revolution);

    let mut delivered = true;
    if steps != 0 {
        if let Err(err) = actuator.stepper(steps) {
            log::warn!("stepper command for {steps} steps failed: {err}");
            delivered = false;
        }
    }

    if delivered || config.command_policy == CommandPolicy::BestEffort {
        state.last_commanded_azimuth_deg = sample.azimuth_deg;
        state.net_steps_since_reset += steps;
    }

    if let Err(err) = actuator.servo(sample.altitude_deg) {
        log::warn!("servo command failed: {err}");
    }
}

/// Signed azimuth delta between the new bearing and the last commanded
/// one. Raw mode takes the plain difference, wrapped mode the shortest
/// path across the 0°/360° boundary.
pub fn azimuth_delta(mode: AzimuthMode, new_deg: f64, last_deg: f64) -> f64 {
    let diff = new_deg - last_deg;
    match mode {
        AzimuthMode::Raw => diff,
        AzimuthMode::Wrapped => {
            // Normalize into (-180, 180].
            let d = diff.rem_euclid(360.0);
            if d > 180.0 {
                d - 360.0
            } else {
                d
            }
        }
    }
}

pub fn steps_for_delta(delta_deg: f64, steps_per_revolution: u32) -> i64 {
    (delta_deg * f64::from(steps_per_revolution) / 360.0).round() as i64
}
