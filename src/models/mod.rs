pub mod direction;
pub mod instrument;

pub use direction::Direction;
pub use instrument::{Instrument, InstrumentProfile, DEFAULT_PROFILE};
