//! Component definitions for the tutorial scene.
//!
//! Components are plain data attached to scene entities. Behavior lives in
//! the sensor systems and the orchestrator.

mod common;
mod scene;
mod sensors;

pub use common::*;
pub use scene::*;
pub use sensors::*;
