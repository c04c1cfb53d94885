//! Test doubles for the control-loop tests: a recording actuator that
//! captures every command instead of touching a network, and a no-op
//! announcer.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::alert::Announcer;
use crate::pointer::{Actuator, PointerError};
use crate::predict::Pass;
use crate::tracker::types::Visibility;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sent {
    Stepper(i64),
    Servo(f64),
    Led(bool),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failing {
    Stepper,
}

#[derive(Default)]
pub struct RecordingActuator {
    pub sent: Vec<Sent>,
    failing: Option<Failing>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedActuator {
        SharedActuator(Rc::new(RefCell::new(Self::new())))
    }

    /// Make the given command fail while still recording nothing for it.
    pub fn failing(mut self, failing: Failing) -> Self {
        self.failing = Some(failing);
        self
    }

    pub fn stepper_calls(&self) -> Vec<i64> {
        self.sent
            .iter()
            .filter_map(|s| match s {
                Sent::Stepper(steps) => Some(*steps),
                _ => None,
            })
            .collect()
    }

    fn fail() -> PointerError {
        PointerError::Status {
            endpoint: "stepper/steps".to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl Actuator for RecordingActuator {
    fn stepper(&mut self, steps: i64) -> Result<(), PointerError> {
        if steps == 0 {
            return Ok(());
        }
        if self.failing == Some(Failing::Stepper) {
            return Err(Self::fail());
        }
        self.sent.push(Sent::Stepper(steps));
        Ok(())
    }

    fn servo(&mut self, angle_deg: f64) -> Result<(), PointerError> {
        self.sent.push(Sent::Servo(angle_deg.clamp(0.0, 90.0)));
        Ok(())
    }

    fn led(&mut self, on: bool) -> Result<(), PointerError> {
        self.sent.push(Sent::Led(on));
        Ok(())
    }
}

/// Clonable handle so a test can keep inspecting the recorder after
/// handing the actuator to a `Tracker`.
#[derive(Clone)]
pub struct SharedActuator(Rc<RefCell<RecordingActuator>>);

impl SharedActuator {
    pub fn borrow(&self) -> Ref<'_, RecordingActuator> {
        self.0.borrow()
    }
}

impl Actuator for SharedActuator {
    fn stepper(&mut self, steps: i64) -> Result<(), PointerError> {
        self.0.borrow_mut().stepper(steps)
    }

    fn servo(&mut self, angle_deg: f64) -> Result<(), PointerError> {
        self.0.borrow_mut().servo(angle_deg)
    }

    fn led(&mut self, on: bool) -> Result<(), PointerError> {
        self.0.borrow_mut().led(on)
    }
}

pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn target_risen(&mut self, _visibility: Visibility, _pass: Option<&Pass>) {}
}
