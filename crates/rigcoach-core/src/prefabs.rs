//! Prefab builders for parts, their placement ghosts and tools.
//!
//! Every part body carries the holes, latch and hints its later steps need.
//! Ghosts are full copies of the part they stand in for, so a ghost adopted
//! by a skip behaves exactly like a spawned part.

use hecs::{Entity, World};
use rigcoach_logic::cables::CABLES;
use rigcoach_logic::parts::{PartSlot, PartType};

use crate::components::{
    Active, Approach, Axis, DragToMove, Hint, Latch, Name, Parent, PartInstance, ScrewMarker,
    Screwdriver, Tag, Tool, Transform, Vec3, UNTAGGED,
};

pub const TOOL_NAME: &str = "screwdriver";
pub const TOOL_TAG: &str = "Screwdriver";
pub const MARKER_TAG: &str = "ScrewMarker";
pub const LATCH_NAME: &str = "latch";
pub const DEFAULT_TOWER: &str = "pcBuild";

/// Ghost offsets relative to their host body.
const HINT_OFFSETS: &[(PartSlot, Vec3)] = &[
    (PartSlot::first(PartType::Motherboard), Vec3::new(0.0, 0.25, 0.0)),
    (PartSlot::first(PartType::Hdd), Vec3::new(0.12, 0.05, 0.1)),
    (PartSlot::second(PartType::Hdd), Vec3::new(0.12, 0.12, 0.1)),
    (PartSlot::first(PartType::Psu), Vec3::new(0.0, 0.03, -0.12)),
    (PartSlot::first(PartType::Gpu), Vec3::new(-0.05, 0.2, 0.06)),
    (PartSlot::first(PartType::Cpu), Vec3::new(0.0, 0.02, 0.05)),
    (PartSlot::first(PartType::Cooler), Vec3::new(0.0, 0.08, 0.05)),
    (PartSlot::first(PartType::Ram), Vec3::new(0.08, 0.03, 0.0)),
    (PartSlot::second(PartType::Ram), Vec3::new(0.1, 0.03, 0.0)),
];

/// Axis a part must be rotated about before placement, if any.
pub fn rotate_axis(part: PartType) -> Option<Axis> {
    match part {
        PartType::Cpu => Some(Axis::Y),
        PartType::Ram => Some(Axis::X),
        _ => None,
    }
}

/// Orientation a freshly spawned part starts in.
fn spawn_rotation(part: PartType) -> Vec3 {
    let mut rotation = Vec3::ZERO;
    if let Some(axis) = rotate_axis(part) {
        axis.set_component(&mut rotation, 90.0);
    }
    rotation
}

/// Spawn a placeable part with its body at `position`.
pub fn spawn_part(world: &mut World, slot: PartSlot, position: Vec3, tower_name: &str) -> Entity {
    let name = match slot.part {
        PartType::Tower => tower_name.to_string(),
        _ => slot.to_string(),
    };
    let root = world.spawn((
        Name(name),
        Tag(slot.part.tag().to_string()),
        Active(true),
        Transform::at(position).with_rotation(spawn_rotation(slot.part)),
        PartInstance(slot),
        DragToMove { enabled: false },
    ));
    build_body(world, slot.part, root);
    root
}

fn build_body(world: &mut World, part: PartType, root: Entity) {
    match part {
        PartType::Tower => {
            for slot in [
                PartSlot::first(PartType::Motherboard),
                PartSlot::first(PartType::Hdd),
                PartSlot::second(PartType::Hdd),
                PartSlot::first(PartType::Psu),
                PartSlot::first(PartType::Gpu),
            ] {
                spawn_hint(world, root, slot);
            }
            for (i, cable) in CABLES.iter().enumerate() {
                let cable = spawn_child(world, root, cable, Vec3::new(-0.1, 0.05 * i as f32, 0.0));
                let _ = world.insert_one(cable, Active(false));
            }
        }
        PartType::Motherboard => {
            for slot in [
                PartSlot::first(PartType::Cpu),
                PartSlot::first(PartType::Cooler),
                PartSlot::first(PartType::Ram),
                PartSlot::second(PartType::Ram),
            ] {
                spawn_hint(world, root, slot);
            }
            for i in 0..9 {
                let (row, col) = (i / 3, i % 3);
                let offset = Vec3::new(-0.1 + 0.1 * col as f32, 0.01, -0.1 + 0.1 * row as f32);
                spawn_hole(world, root, &format!("hole{}", i + 1), offset, Vec3::UP);
            }
            let latch = spawn_child(world, root, LATCH_NAME, Vec3::new(0.03, 0.02, 0.05));
            let _ = world.insert_one(latch, Latch::default());
        }
        PartType::Cooler => spawn_square_holes(world, root, 0.04, Vec3::UP),
        PartType::Psu => spawn_square_holes(world, root, 0.05, Vec3::new(-1.0, 0.0, 0.0)),
        PartType::Gpu => {
            spawn_hole(
                world,
                root,
                "hole_gpu",
                Vec3::new(-0.08, 0.02, 0.0),
                Vec3::new(0.0, 0.0, -1.0),
            );
        }
        PartType::Cpu | PartType::Ram | PartType::Hdd => {}
    }
}

fn spawn_square_holes(world: &mut World, root: Entity, half: f32, approach: Vec3) {
    let corners = [(-half, -half), (half, -half), (half, half), (-half, half)];
    for (i, (a, b)) in corners.into_iter().enumerate() {
        spawn_hole(world, root, &format!("hole{}", i + 1), Vec3::new(a, 0.01, b), approach);
    }
}

fn spawn_hole(world: &mut World, parent: Entity, name: &str, offset: Vec3, approach: Vec3) {
    let hole = spawn_child(world, parent, name, offset);
    let _ = world.insert_one(hole, Approach(approach.normalize()));
}

fn spawn_child(world: &mut World, parent: Entity, name: &str, offset: Vec3) -> Entity {
    world.spawn((
        Name(name.to_string()),
        Tag::untagged(),
        Active(true),
        Transform::at(offset),
        Parent(parent),
    ))
}

/// Spawn a hidden, untagged ghost for `slot` under `host`.
fn spawn_hint(world: &mut World, host: Entity, slot: PartSlot) {
    let Some(name) = slot.hint_name() else {
        return;
    };
    let offset = HINT_OFFSETS
        .iter()
        .find(|(s, _)| *s == slot)
        .map(|(_, o)| *o)
        .unwrap_or(Vec3::ZERO);
    let hint = world.spawn((
        Name(name.to_string()),
        Tag(UNTAGGED.to_string()),
        Active(false),
        Transform::at(offset),
        Parent(host),
        Hint(slot),
    ));
    build_body(world, slot.part, hint);
}

/// Spawn the screwdriver tool at a world position.
pub fn spawn_tool(world: &mut World, position: Vec3, turns_per_hole: u32) -> Entity {
    world.spawn((
        Name(TOOL_NAME.to_string()),
        Tag(TOOL_TAG.to_string()),
        Active(true),
        Transform::at(position),
        Tool,
        Screwdriver {
            enabled: true,
            turns: 0,
            turns_per_hole,
        },
    ))
}

/// Leave a screw head in a driven hole.
pub fn spawn_screw_marker(world: &mut World, hole: Entity) -> Entity {
    world.spawn((
        Name("screw".to_string()),
        Tag(MARKER_TAG.to_string()),
        Active(true),
        Transform::default(),
        Parent(hole),
        ScrewMarker,
    ))
}
