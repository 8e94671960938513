//! Per-tick input snapshot fed to the engine.

use hecs::Entity;

use crate::components::Vec3;

/// A tap that hit a detected surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    pub normal: Vec3,
}

/// A drag gesture on one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInput {
    pub target: Entity,
    pub delta: Vec3,
}

/// A rotate gesture on one entity, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateInput {
    pub target: Entity,
    pub degrees: f32,
}

/// Everything the user did during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Any pointer press, consumed by timed goals.
    pub press: bool,
    pub surface_tap: Option<SurfaceHit>,
    pub drag: Option<DragInput>,
    pub rotate: Option<RotateInput>,
    /// Entity the user tapped directly.
    pub touched: Option<Entity>,
    /// Screwdriver turns made this tick.
    pub screw_turns: u32,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn press() -> Self {
        Self {
            press: true,
            ..Self::default()
        }
    }

    pub fn tap(point: Vec3) -> Self {
        Self {
            surface_tap: Some(SurfaceHit {
                point,
                normal: Vec3::UP,
            }),
            ..Self::default()
        }
    }

    pub fn drag(target: Entity, delta: Vec3) -> Self {
        Self {
            drag: Some(DragInput { target, delta }),
            ..Self::default()
        }
    }

    pub fn rotate(target: Entity, degrees: f32) -> Self {
        Self {
            rotate: Some(RotateInput { target, degrees }),
            ..Self::default()
        }
    }

    pub fn touch(target: Entity) -> Self {
        Self {
            touched: Some(target),
            ..Self::default()
        }
    }

    pub fn screw(turns: u32) -> Self {
        Self {
            screw_turns: turns,
            ..Self::default()
        }
    }
}
