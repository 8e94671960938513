//! Scene-graph components: identity, visibility and hierarchy.

use hecs::Entity;
use rigcoach_logic::parts::PartSlot;
use serde::{Deserialize, Serialize};

use super::Vec3;

/// Tag carried by objects nothing looks up by tag.
pub const UNTAGGED: &str = "Untagged";

/// Object name, unique among siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

/// Lookup tag shared by objects of one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag(pub String);

impl Tag {
    pub fn untagged() -> Self {
        Self(UNTAGGED.to_string())
    }

    pub fn is(&self, tag: &str) -> bool {
        self.0 == tag
    }
}

/// Self visibility. An object is shown only if it and all its ancestors are
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Active(pub bool);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

/// Placed part occupying a slot in the part registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartInstance(pub PartSlot);

/// Placement ghost showing where a part belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint(pub PartSlot);

/// Direction the screwdriver approaches a hole from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Approach(pub Vec3);

/// Screwdriver tool spawned for a screw goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool;

/// Screw head left in a driven hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrewMarker;
