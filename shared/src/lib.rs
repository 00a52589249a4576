pub mod chess;
mod stats;
mod timeperiod;

#[cfg(feature = "client")]
pub mod chesscom;
#[cfg(feature = "client")]
pub mod discord;

pub use stats::*;
pub use timeperiod::*;

pub use strum::IntoEnumIterator;
