//! Command implementations for the consia CLI

mod analyze;
mod inspect;
mod misc;

pub use analyze::*;
pub use inspect::*;
pub use misc::*;
