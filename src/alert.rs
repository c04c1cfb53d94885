use std::path::PathBuf;
use std::process::Command;

use chrono::{Local, Timelike};

use crate::config::{AlertConfig, QuietHours};
use crate::predict::Pass;
use crate::tracker::Visibility;

/// Side-effect hook fired when the target climbs above the horizon.
/// Purely presentational; never feeds back into pointing.
pub trait Announcer {
    fn target_risen(&mut self, visibility: Visibility, pass: Option<&Pass>);
}

pub fn from_config(alert: &AlertConfig) -> Box<dyn Announcer> {
    match (&alert.player, &alert.sound_file) {
        (Some(player), Some(sound_file)) => Box::new(SoundAnnouncer {
            player: player.clone(),
            sound_file: sound_file.clone(),
            quiet_hours: alert.quiet_hours,
        }),
        _ => Box::new(LogAnnouncer),
    }
}

/// Default announcer: a log line per rise event.
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn target_risen(&mut self, visibility: Visibility, pass: Option<&Pass>) {
        announce(visibility, pass);
    }
}

/// Plays a sound through an external player on each rise event, muted
/// during the configured quiet hours.
pub struct SoundAnnouncer {
    player: String,
    sound_file: PathBuf,
    quiet_hours: Option<QuietHours>,
}

impl Announcer for SoundAnnouncer {
    fn target_risen(&mut self, visibility: Visibility, pass: Option<&Pass>) {
        announce(visibility, pass);

        if let Some(quiet) = self.quiet_hours {
            if in_quiet_hours(Local::now().hour(), quiet) {
                log::debug!("quiet hours, sound alert suppressed");
                return;
            }
        }

        match Command::new(&self.player).arg(&self.sound_file).status() {
            Ok(status) if status.success() => {}
            Ok(status) => log::warn!("sound player exited with {status}"),
            Err(err) => log::warn!("could not run sound player {}: {err}", self.player),
        }
    }
}

fn announce(visibility: Visibility, pass: Option<&Pass>) {
    match pass {
        Some(pass) => log::info!(
            "target is {} (pass until {}, max altitude {:.1}°)",
            visibility,
            pass.set_time.format("%H:%M:%S UTC"),
            pass.max_altitude_deg
        ),
        None => log::info!("target is {visibility}"),
    }
}

/// Quiet window is [start_hour, end_hour) in local time and may wrap
/// midnight. An empty window (start == end) never matches.
pub fn in_quiet_hours(hour: u32, quiet: QuietHours) -> bool {
    if quiet.start_hour <= quiet.end_hour {
        hour >= quiet.start_hour && hour < quiet.end_hour
    } else {
        hour >= quiet.start_hour || hour < quiet.end_hour
    }
}
