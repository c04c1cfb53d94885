use crate::config::{ConfigError, StationConfig};

/// Fixed observer site. Immutable for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct GroundStation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    /// Minimum altitude angle before the target counts as visible.
    pub horizon_deg: f64,
}

impl GroundStation {
    pub fn from_config(station: &StationConfig) -> Result<Self, ConfigError> {
        Self::from_coordinates(&station.coordinates, station.elevation_m, station.horizon_deg)
            .ok_or_else(|| ConfigError::InvalidCoordinates(station.coordinates.clone()))
    }

    pub fn from_coordinates(coordinates: &str, altitude_m: f64, horizon_deg: f64) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() < 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lon: f64 = parts[1].parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self {
            latitude_deg: lat,
            longitude_deg: lon,
            altitude_m,
            horizon_deg,
        })
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        // WGS-84 constants
        let a = 6378.137;
        let e2 = 0.00669437999014;
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let sin_lon = lon.sin();
        let cos_lon = lon.cos();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let alt_km = self.altitude_m / 1000.0;
        let x = (n + alt_km) * cos_lat * cos_lon;
        let y = (n + alt_km) * cos_lat * sin_lon;
        let z = (n * (1.0 - e2) + alt_km) * sin_lat;
        [x, y, z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_string() {
        let site = GroundStation::from_coordinates("30.1, -81.8", 11.0, 10.0).unwrap();
        assert_eq!(site.latitude_deg, 30.1);
        assert_eq!(site.longitude_deg, -81.8);
        assert_eq!(site.horizon_deg, 10.0);
    }

    #[test]
    fn rejects_garbage_coordinates() {
        assert!(GroundStation::from_coordinates("52.5", 0.0, 10.0).is_none());
        assert!(GroundStation::from_coordinates("north, east", 0.0, 10.0).is_none());
        assert!(GroundStation::from_coordinates("120.0, 0.0", 0.0, 10.0).is_none());
    }

    #[test]
    fn ecef_position_at_equator_prime_meridian() {
        let site = GroundStation::from_coordinates("0.0, 0.0", 0.0, 0.0).unwrap();
        let pos = site.position_ecef_km();
        assert!((pos[0] - 6378.137).abs() < 1e-6);
        assert!(pos[1].abs() < 1e-9);
        assert!(pos[2].abs() < 1e-9);
    }
}
