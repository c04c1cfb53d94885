use chrono::{DateTime, Utc};

/// Where the target is, as seen from the site at one instant. Produced
/// fresh every poll cycle and never persisted.
#[derive(Debug, Clone)]
pub struct PositionSample {
    pub timestamp: DateTime<Utc>,
    /// Compass bearing to the target, [0, 360).
    pub azimuth_deg: f64,
    /// Angle above the horizon, [-90, 90].
    pub altitude_deg: f64,
    /// Geodetic sub-point of the target.
    pub sub_latitude_deg: f64,
    pub sub_longitude_deg: f64,
}

/// A predicted pass over the site. Informational only; pointing decisions
/// never depend on it.
#[derive(Debug, Clone)]
pub struct Pass {
    pub rise_time: DateTime<Utc>,
    pub rise_azimuth_deg: f64,
    pub max_alt_time: DateTime<Utc>,
    pub max_altitude_deg: f64,
    pub set_time: DateTime<Utc>,
    pub set_azimuth_deg: f64,
    pub duration_seconds: i64,
}
