mod client;
mod error;

pub use client::{Actuator, PointerClient};
pub use error::PointerError;
