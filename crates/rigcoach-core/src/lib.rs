//! RigCoach Core - AR PC-Assembly Tutorial Engine
//!
//! Walks a learner through placing a tower and its parts on a detected
//! surface, one goal at a time. Each step of the tutorial arms a sensor on
//! the scene (a snap target, a latch, a screwdriver, a timer) and the goal
//! orchestrator advances when that sensor fires.
//!
//! # Architecture
//!
//! The scene lives in an Entity Component System via `hecs`:
//! - **Entities**: parts, their placement hints, screw holes, the screwdriver
//! - **Components**: plain data (Transform, Tag, SnapToTarget, Latch, ...)
//! - **Systems**: per-tick sensor logic that emits completion signals
//!
//! Signals flow through a [`signals::SignalBus`] to whichever handler the
//! current goal subscribed; delayed completions go through the
//! [`scheduler::Scheduler`].
//!
//! # Example
//!
//! ```rust,no_run
//! use rigcoach_core::prelude::*;
//!
//! let mut engine = TutorialEngine::default();
//! engine.start_coaching(SceneContext::Guided).unwrap();
//!
//! loop {
//!     engine.update(1.0 / 60.0, &FrameInput::idle()).unwrap();
//! }
//! ```

pub mod components;
pub mod engine;
pub mod error;
pub mod input;
pub mod lookup;
pub mod orchestrator;
pub mod persistence;
pub mod prefabs;
pub mod scheduler;
pub mod signals;
pub mod spawner;
pub mod systems;
pub mod ui;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::TutorialEngine;
    pub use crate::error::CoachError;
    pub use crate::input::FrameInput;
    pub use rigcoach_logic::goals::GoalKind;
    pub use rigcoach_logic::parts::{PartSlot, PartType};
    pub use rigcoach_logic::sequence::SceneContext;
}
