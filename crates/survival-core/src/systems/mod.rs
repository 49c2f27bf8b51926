//! Systems - logic that operates on components

mod regrowth;
mod targeting;
mod vitals;

pub use regrowth::*;
pub use targeting::*;
pub use vitals::*;
