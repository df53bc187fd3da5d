#![forbid(unsafe_code)]

pub mod choices;
pub mod error;
pub mod model;
pub mod pick;
pub mod rng;
pub mod templates;
pub mod time;

pub use error::Error;
pub use rng::{SeededRng, derive_seed};
pub use time::Clock;
