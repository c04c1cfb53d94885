use crate::tracker::types::Visibility;

/// Above this altitude the target counts as overhead rather than merely
/// visible.
pub const OVERHEAD_DEG: f64 = 45.0;

/// Band the altitude against the site horizon. Both thresholds are
/// inclusive at the lower band: a target at exactly the horizon is still
/// below it, and one at exactly 45° is visible, not overhead.
pub fn classify(altitude_deg: f64, horizon_deg: f64) -> Visibility {
    if altitude_deg <= horizon_deg {
        Visibility::BelowHorizon
    } else if altitude_deg <= OVERHEAD_DEG {
        Visibility::Visible
    } else {
        Visibility::Overhead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HORIZON: f64 = 10.0;

    #[test]
    fn bands() {
        assert_eq!(classify(-30.0, HORIZON), Visibility::BelowHorizon);
        assert_eq!(classify(0.0, HORIZON), Visibility::BelowHorizon);
        assert_eq!(classify(10.1, HORIZON), Visibility::Visible);
        assert_eq!(classify(30.0, HORIZON), Visibility::Visible);
        assert_eq!(classify(45.1, HORIZON), Visibility::Overhead);
        assert_eq!(classify(89.9, HORIZON), Visibility::Overhead);
    }

    #[test]
    fn boundaries_fall_in_the_lower_band() {
        assert_eq!(classify(HORIZON, HORIZON), Visibility::BelowHorizon);
        assert_eq!(classify(OVERHEAD_DEG, HORIZON), Visibility::Visible);
    }

    #[test]
    fn respects_configured_horizon() {
        assert_eq!(classify(10.0, 5.0), Visibility::Visible);
        assert_eq!(classify(5.0, 5.0), Visibility::BelowHorizon);
    }
}
