//! Sensor systems - turn frame input into completion signals

mod drag;
mod latch;
mod screw;
mod snap;

pub use drag::*;
pub use latch::*;
pub use screw::*;
pub use snap::*;
