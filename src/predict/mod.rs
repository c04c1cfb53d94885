mod error;
mod ground_station;
mod pass_finder;
mod propagation;
mod tle;
mod types;

pub use error::PredictError;
pub use ground_station::GroundStation;
pub use pass_finder::next_pass;
pub use propagation::propagate_sample;
pub use tle::{should_refresh, ElementProvider, ElementSet, TleSource};
pub use types::{Pass, PositionSample};
