use strum_macros::Display;

/// Where the target sits relative to the site's visibility bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Visibility {
    #[strum(serialize = "below horizon")]
    BelowHorizon,
    #[strum(serialize = "visible")]
    Visible,
    #[strum(serialize = "overhead")]
    Overhead,
}

impl Visibility {
    pub fn is_up(self) -> bool {
        !matches!(self, Visibility::BelowHorizon)
    }
}

/// The control loop's tracked picture of the physical pointer. Created
/// once at startup (which assumes the hardware is parked at north, level)
/// and mutated in place for the life of the process.
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Azimuth most recently commanded, degrees from north.
    pub last_commanded_azimuth_deg: f64,
    /// Signed sum of every step command issued since the last reset.
    /// Sending `-net_steps_since_reset` steps returns the pointer to
    /// north, provided every command actually reached the device.
    pub net_steps_since_reset: i64,
    /// Classification of the previous poll, used to detect band edges.
    pub visibility: Visibility,
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            last_commanded_azimuth_deg: 0.0,
            net_steps_since_reset: 0,
            visibility: Visibility::BelowHorizon,
        }
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}
