mod classify;
mod pointing;
mod reset;
#[cfg(test)]
pub(crate) mod testing;
mod tracker;
mod types;

pub use pointing::PointingConfig;
pub use tracker::{Tracker, TrackerSettings};
pub use types::{PointerState, Visibility};
