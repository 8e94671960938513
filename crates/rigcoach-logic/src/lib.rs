//! Pure tutorial logic for RigCoach.
//!
//! Everything here is independent of the scene graph and the tick loop:
//! functions take plain data and return results, so the goal tables and
//! gating rules can be tested without an ECS world.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cables`] | Cable checklist on the final guided card |
//! | [`cards`] | English/Greek step card text and the language toggle |
//! | [`config`] | Timer windows, thresholds and standoffs loaded from JSON |
//! | [`goals`] | Goal kinds, their completion bindings and the FIFO goal queue |
//! | [`parts`] | Part types (u8 IDs), spawn caps, hint names and part slots |
//! | [`screws`] | Hole lists per screwed part and screw progress |
//! | [`sequence`] | Named step tables for the guided and free-build contexts |
//! | [`spawn_gate`] | Per-part spawn counters and the place-button rule |

pub mod cables;
pub mod cards;
pub mod config;
pub mod goals;
pub mod parts;
pub mod screws;
pub mod sequence;
pub mod spawn_gate;
