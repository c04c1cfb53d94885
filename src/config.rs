use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid coordinates: {0:?}")]
    InvalidCoordinates(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub station: StationConfig,
    pub pointer: PointerConfig,
    #[serde(default)]
    pub tle: TleConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub alert: AlertConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    /// "lat, lon" in decimal degrees, north and east positive.
    pub coordinates: String,
    #[serde(default)]
    pub elevation_m: f64,
    #[serde(default = "default_horizon_deg")]
    pub horizon_deg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointerConfig {
    /// Base URL of the alt/az pointer device.
    pub base_url: String,
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u32,
    #[serde(default = "default_rpm")]
    pub rpm: u32,
    #[serde(default = "default_request_timeout_s")]
    pub request_timeout_s: u64,
    /// Pause after every request so the device's inbound buffer keeps up.
    #[serde(default = "default_inter_request_delay_ms")]
    pub inter_request_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TleConfig {
    #[serde(default = "default_tle_url")]
    pub url: String,
    #[serde(default = "default_refresh_interval_s")]
    pub refresh_interval_s: u64,
    #[serde(default = "default_fetch_backoff_s")]
    pub fetch_backoff_s: u64,
    #[serde(default = "default_request_timeout_s")]
    pub request_timeout_s: u64,
}

impl Default for TleConfig {
    fn default() -> Self {
        Self {
            url: default_tle_url(),
            refresh_interval_s: default_refresh_interval_s(),
            fetch_backoff_s: default_fetch_backoff_s(),
            request_timeout_s: default_request_timeout_s(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    #[serde(default = "default_visible_poll_s")]
    pub visible_poll_s: u64,
    #[serde(default = "default_idle_poll_s")]
    pub idle_poll_s: u64,
    #[serde(default)]
    pub azimuth_mode: AzimuthMode,
    #[serde(default)]
    pub command_policy: CommandPolicy,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            visible_poll_s: default_visible_poll_s(),
            idle_poll_s: default_idle_poll_s(),
            azimuth_mode: AzimuthMode::default(),
            command_policy: CommandPolicy::default(),
        }
    }
}

/// How an azimuth delta is computed from consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AzimuthMode {
    /// Signed difference of raw bearings. A pass crossing the 0°/360°
    /// boundary rewinds nearly a full turn; this is what the pointer
    /// hardware has always been driven with.
    #[default]
    Raw,
    /// Shortest-path delta, normalized into (-180, 180].
    Wrapped,
}

/// What happens to the tracked pointer state when a stepper send fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandPolicy {
    /// Book the intended motion regardless of delivery; drift is accepted
    /// in exchange for never blocking the loop.
    #[default]
    BestEffort,
    /// Leave the accumulators untouched on a failed send so the same
    /// motion is retried on the next sample.
    Strict,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertConfig {
    /// External audio player, e.g. "/usr/bin/aplay". Sound alerts are
    /// disabled unless both player and sound_file are set.
    pub player: Option<String>,
    pub sound_file: Option<PathBuf>,
    pub quiet_hours: Option<QuietHours>,
}

/// Local-hour window during which sound alerts are muted. May wrap
/// midnight (e.g. start 22, end 8).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuietHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

fn default_horizon_deg() -> f64 {
    10.0
}

fn default_steps_per_revolution() -> u32 {
    200
}

fn default_rpm() -> u32 {
    10
}

fn default_request_timeout_s() -> u64 {
    10
}

fn default_inter_request_delay_ms() -> u64 {
    100
}

fn default_tle_url() -> String {
    "https://api.wheretheiss.at/v1/satellites/25544/tles?format=text".to_string()
}

fn default_refresh_interval_s() -> u64 {
    20 * 60
}

fn default_fetch_backoff_s() -> u64 {
    60
}

fn default_visible_poll_s() -> u64 {
    5
}

fn default_idle_poll_s() -> u64 {
    60
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
