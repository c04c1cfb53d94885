use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::alert::Announcer;
use crate::config::Config;
use crate::pointer::Actuator;
use crate::predict::{
    next_pass, propagate_sample, should_refresh, ElementProvider, ElementSet, GroundStation, Pass,
    PositionSample,
};
use crate::tracker::classify::classify;
use crate::tracker::pointing::{point_at, PointingConfig};
use crate::tracker::reset::reset_to_rest;
use crate::tracker::types::{PointerState, Visibility};

#[derive(Debug, Clone, Copy)]
pub struct TrackerSettings {
    pub pointing: PointingConfig,
    pub refresh_interval: chrono::Duration,
    pub fetch_backoff: Duration,
    pub visible_poll: Duration,
    pub idle_poll: Duration,
}

impl TrackerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pointing: PointingConfig {
                steps_per_revolution: config.pointer.steps_per_revolution,
                azimuth_mode: config.tracking.azimuth_mode,
                command_policy: config.tracking.command_policy,
            },
            refresh_interval: chrono::Duration::seconds(config.tle.refresh_interval_s as i64),
            fetch_backoff: Duration::from_secs(config.tle.fetch_backoff_s),
            visible_poll: Duration::from_secs(config.tracking.visible_poll_s),
            idle_poll: Duration::from_secs(config.tracking.idle_poll_s),
        }
    }
}

/// The pass-tracking control loop: refresh elements, sample the target,
/// classify, point or reset, sleep. One logical thread; every iteration
/// runs to completion before the next wake.
pub struct Tracker {
    site: GroundStation,
    settings: TrackerSettings,
    provider: Box<dyn ElementProvider>,
    actuator: Box<dyn Actuator>,
    announcer: Box<dyn Announcer>,
    elements: Option<ElementSet>,
    state: PointerState,
}

impl Tracker {
    pub fn new(
        site: GroundStation,
        settings: TrackerSettings,
        provider: Box<dyn ElementProvider>,
        actuator: Box<dyn Actuator>,
        announcer: Box<dyn Announcer>,
    ) -> Self {
        Self {
            site,
            settings,
            provider,
            actuator,
            announcer,
            elements: None,
            state: PointerState::new(),
        }
    }

    /// Run forever. No error is fatal; every failure path ends in a sleep
    /// and another tick.
    pub fn run(&mut self) -> ! {
        log::info!(
            "tracking started, pointer assumed at north/level (site {:.4}°, {:.4}°, horizon {}°)",
            self.site.latitude_deg,
            self.site.longitude_deg,
            self.site.horizon_deg
        );
        loop {
            let wait = self.iterate(Utc::now());
            log::debug!("sleeping {}", humantime::format_duration(wait));
            thread::sleep(wait);
        }
    }

    /// One scheduler tick. Returns how long to sleep before the next one.
    fn iterate(&mut self, now: DateTime<Utc>) -> Duration {
        let last_fetch = self.elements.as_ref().map(|set| set.fetched_at);
        if should_refresh(last_fetch, now, self.settings.refresh_interval) {
            match self.provider.fetch(now) {
                Ok(set) => {
                    log::info!("refreshed orbital elements for {}", set.name());
                    self.elements = Some(set);
                }
                Err(err) => {
                    // Keep the previous set; the unchanged fetch stamp
                    // makes the next tick retry promptly.
                    log::warn!("element refresh failed, keeping previous set: {err}");
                    return self.settings.fetch_backoff;
                }
            }
        }

        let Some(set) = &self.elements else {
            log::error!("no orbital elements available yet, skipping this cycle");
            return self.settings.idle_poll;
        };

        let pass = match next_pass(&self.site, &set.elements, &set.constants, now) {
            Ok(pass) => pass,
            Err(err) => {
                log::warn!("pass prediction failed: {err}");
                None
            }
        };
        if let Some(pass) = &pass {
            log_pass(pass);
        }

        let sample = match propagate_sample(&self.site, &set.elements, &set.constants, now) {
            Ok(sample) => sample,
            Err(err) => {
                log::error!("propagation failed: {err}");
                return self.settings.idle_poll;
            }
        };
        log::info!(
            "current position: az {:.1}° alt {:.1}° (sub-point {:.2}°, {:.2}°)",
            sample.azimuth_deg,
            sample.altitude_deg,
            sample.sub_latitude_deg,
            sample.sub_longitude_deg
        );

        self.act_on_sample(&sample, pass.as_ref())
    }

    /// Classify the sample and drive the pointer. The reset fires only on
    /// the edge into `BelowHorizon`, never again while the target stays
    /// down.
    fn act_on_sample(&mut self, sample: &PositionSample, pass: Option<&Pass>) -> Duration {
        let visibility = classify(sample.altitude_deg, self.site.horizon_deg);
        let previous = self.state.visibility;
        log::info!("target is {visibility}");

        let wait = match visibility {
            Visibility::BelowHorizon => {
                if previous.is_up() {
                    reset_to_rest(&mut self.state, self.actuator.as_mut());
                }
                self.settings.idle_poll
            }
            Visibility::Visible | Visibility::Overhead => {
                if !previous.is_up() {
                    self.announcer.target_risen(visibility, pass);
                }
                point_at(
                    &mut self.state,
                    sample,
                    &self.settings.pointing,
                    self.actuator.as_mut(),
                );
                self.settings.visible_poll
            }
        };

        self.state.visibility = visibility;
        wait
    }
}

fn log_pass(pass: &Pass) {
    let duration = Duration::from_secs(pass.duration_seconds.max(0) as u64);
    log::info!(
        "next pass: rise {} az {:.1}°, max alt {:.1}° at {}, set {} az {:.1}° ({})",
        pass.rise_time.format("%Y-%m-%d %H:%M:%S UTC"),
        pass.rise_azimuth_deg,
        pass.max_altitude_deg,
        pass.max_alt_time.format("%H:%M:%S UTC"),
        pass.set_time.format("%H:%M:%S UTC"),
        pass.set_azimuth_deg,
        humantime::format_duration(duration)
    );
}
