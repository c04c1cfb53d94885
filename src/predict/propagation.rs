use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::types::PositionSample;

/// Propagate the elements to `timestamp` and express the result as an
/// azimuth/altitude sample for the site, plus the geodetic sub-point.
pub fn propagate_sample(
    station: &GroundStation,
    elements: &Elements,
    constants: &Constants,
    timestamp: DateTime<Utc>,
) -> Result<PositionSample, PredictError> {
    let minutes = elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let prediction = constants
        .propagate(minutes)
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let sidereal =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()));

    let sat_ecef = teme_to_ecef_position(prediction.position, sidereal);
    let sta_ecef = station.position_ecef_km();

    let dr = [
        sat_ecef[0] - sta_ecef[0],
        sat_ecef[1] - sta_ecef[1],
        sat_ecef[2] - sta_ecef[2],
    ];
    let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

    let enu = ecef_to_enu(dr, station.lat_rad(), station.lon_rad());
    let azimuth = enu.0.atan2(enu.1).to_degrees().rem_euclid(360.0);
    let altitude = if range_km > 0.0 {
        (enu.2 / range_km).asin().to_degrees()
    } else {
        0.0
    };

    let (sub_lat, sub_lon) = ecef_to_geodetic_deg(sat_ecef);

    Ok(PositionSample {
        timestamp,
        azimuth_deg: round2(azimuth),
        altitude_deg: round2(altitude),
        sub_latitude_deg: round2(sub_lat),
        sub_longitude_deg: round2(sub_lon),
    })
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];

    (east, north, up)
}

/// ECEF position to geodetic latitude/longitude (WGS-84), by fixed-point
/// iteration on the latitude. Display precision only.
fn ecef_to_geodetic_deg(pos: [f64; 3]) -> (f64, f64) {
    let a = 6378.137;
    let e2 = 0.00669437999014;
    let [x, y, z] = pos;
    let p = (x * x + y * y).sqrt();
    let lon = y.atan2(x);

    let mut lat = (z / (p * (1.0 - e2))).atan();
    for _ in 0..5 {
        let sin_lat = lat.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        lat = ((z + e2 * n * sin_lat) / p).atan();
    }

    (lat.to_degrees(), lon.to_degrees())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
