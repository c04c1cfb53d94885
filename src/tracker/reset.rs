use crate::pointer::Actuator;
use crate::tracker::types::PointerState;

/// Return the pointer to rest: reverse every accumulated step back toward
/// north, level the servo, LED off. When nothing has moved since the last
/// reset the hardware is not touched at all.
///
/// The accumulators are cleared even if a send fails; the reset is the
/// recovery path and must leave the tracked state consistent with the
/// rest orientation either way.
pub fn reset_to_rest<A: Actuator + ?Sized>(state: &mut PointerState, actuator: &mut A) {
    state.last_commanded_azimuth_deg = 0.0;
    if state.net_steps_since_reset == 0 {
        return;
    }

    let steps = state.net_steps_since_reset;
    log::info!("resetting pointer to north ({steps} steps accumulated)");
    if let Err(err) = actuator.stepper(-steps) {
        log::warn!("reset stepper command failed: {err}");
    }
    state.net_steps_since_reset = 0;

    if let Err(err) = actuator.servo(0.0) {
        log::warn!("reset servo command failed: {err}");
    }
    if let Err(err) = actuator.led(false) {
        log::warn!("reset LED command failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::testing::{RecordingActuator, Sent};

    #[test]
    fn reverses_accumulated_steps_and_clears_state() {
        let mut state = PointerState::new();
        state.last_commanded_azimuth_deg = 241.5;
        state.net_steps_since_reset = 134;
        let mut actuator = RecordingActuator::new();

        reset_to_rest(&mut state, &mut actuator);

        assert_eq!(
            actuator.sent,
            vec![Sent::Stepper(-134), Sent::Servo(0.0), Sent::Led(false)]
        );
        assert_eq!(state.net_steps_since_reset, 0);
        assert_eq!(state.last_commanded_azimuth_deg, 0.0);
    }

    #[test]
    fn no_motion_means_no_hardware_contact() {
        let mut state = PointerState::new();
        state.last_commanded_azimuth_deg = 17.0;
        let mut actuator = RecordingActuator::new();

        reset_to_rest(&mut state, &mut actuator);

        assert!(actuator.sent.is_empty());
        assert_eq!(state.last_commanded_azimuth_deg, 0.0);
    }

    #[test]
    fn negative_accumulation_reverses_forward() {
        let mut state = PointerState::new();
        state.net_steps_since_reset = -42;
        let mut actuator = RecordingActuator::new();

        reset_to_rest(&mut state, &mut actuator);

        assert_eq!(actuator.stepper_calls(), vec![42]);
    }
}
