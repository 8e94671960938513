//! Sensor components.
//!
//! A sensor watches one condition on its entity and reports through the
//! signal bus. A disabled sensor never reports.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use super::Axis;

/// Lets drag input translate the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DragToMove {
    pub enabled: bool,
}

/// Lets rotate input spin the entity about one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragToRotate {
    pub enabled: bool,
    pub axis: Axis,
}

/// Fires once when the entity comes within `threshold` of its target.
///
/// On firing it moves onto the target, hides the target and stops the
/// entity's drag sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapToTarget {
    pub target: Entity,
    pub threshold: f32,
    pub enabled: bool,
    pub snapped: bool,
}

/// Fires once when the entity's angle about `axis` is within `tolerance` of
/// `target_deg`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapToRotation {
    pub axis: Axis,
    pub target_deg: f32,
    pub tolerance: f32,
    pub enabled: bool,
    pub has_snapped: bool,
}

/// CPU socket latch. Touching it flips it and fires every time while enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Latch {
    pub enabled: bool,
    pub open: bool,
}

/// Screwdriver tool state. Fires once per `turns_per_hole` turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screwdriver {
    pub enabled: bool,
    pub turns: u32,
    pub turns_per_hole: u32,
}
