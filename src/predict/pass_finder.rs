use chrono::{DateTime, Duration, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::propagation::propagate_sample;
use crate::predict::types::Pass;

const COARSE_STEP_SECONDS: i64 = 60; // 1 minute for initial scan
const FINE_STEP_SECONDS: i64 = 1; // 1 second for refinement
const SEARCH_WINDOW_HOURS: i64 = 24;

/// Find the next pass above the site's horizon starting at `from`. If the
/// target is already up, the pass is reported as rising at `from`. Returns
/// `None` when no pass begins within the search window.
pub fn next_pass(
    station: &GroundStation,
    elements: &Elements,
    constants: &Constants,
    from: DateTime<Utc>,
) -> Result<Option<Pass>, PredictError> {
    let end = from + Duration::hours(SEARCH_WINDOW_HOURS);
    let coarse_step = Duration::seconds(COARSE_STEP_SECONDS);
    let horizon = station.horizon_deg;

    let mut cursor = from;
    let mut rise: Option<(DateTime<Utc>, f64)> = None;
    let mut max_alt = -90.0;
    let mut max_alt_time = cursor;

    while cursor <= end {
        let sample = propagate_sample(station, elements, constants, cursor)?;
        let visible = sample.altitude_deg > horizon;

        if visible && rise.is_none() {
            let refined = if cursor == from {
                // Already up at the start of the scan.
                (cursor, sample.azimuth_deg)
            } else {
                refine_crossing(
                    station,
                    elements,
                    constants,
                    cursor - coarse_step,
                    cursor,
                    horizon,
                    true,
                )?
            };
            rise = Some(refined);
            max_alt = sample.altitude_deg;
            max_alt_time = cursor;
        } else if visible {
            if sample.altitude_deg > max_alt {
                max_alt = sample.altitude_deg;
                max_alt_time = cursor;
            }
        } else if let Some((rise_time, rise_az)) = rise {
            let (set_time, set_az) = refine_crossing(
                station,
                elements,
                constants,
                cursor - coarse_step,
                cursor,
                horizon,
                false,
            )?;
            return Ok(Some(Pass {
                rise_time,
                rise_azimuth_deg: rise_az,
                max_alt_time,
                max_altitude_deg: max_alt,
                set_time,
                set_azimuth_deg: set_az,
                duration_seconds: (set_time - rise_time).num_seconds(),
            }));
        }

        cursor += coarse_step;
    }

    // Pass still in progress at the end of the window.
    if let Some((rise_time, rise_az)) = rise {
        let sample = propagate_sample(station, elements, constants, end)?;
        return Ok(Some(Pass {
            rise_time,
            rise_azimuth_deg: rise_az,
            max_alt_time,
            max_altitude_deg: max_alt,
            set_time: end,
            set_azimuth_deg: sample.azimuth_deg,
            duration_seconds: (end - rise_time).num_seconds(),
        }));
    }

    Ok(None)
}

/// Binary search for the exact horizon crossing between two scan points.
fn refine_crossing(
    station: &GroundStation,
    elements: &Elements,
    constants: &Constants,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
    horizon_deg: f64,
    rising: bool,
) -> Result<(DateTime<Utc>, f64), PredictError> {
    let mut low = before;
    let mut high = after;

    while (high - low).num_seconds() > FINE_STEP_SECONDS {
        let mid = low + (high - low) / 2;
        let sample = propagate_sample(station, elements, constants, mid)?;

        let above = sample.altitude_deg > horizon_deg;
        if above == rising {
            high = mid;
        } else {
            low = mid;
        }
    }

    let final_sample = propagate_sample(station, elements, constants, high)?;
    Ok((high, final_sample.azimuth_deg))
}
