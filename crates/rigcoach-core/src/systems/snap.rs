//! Snap-to-target and snap-to-rotation sensors.

use hecs::{Entity, World};

use crate::components::{delta_angle, DragToMove, DragToRotate, SnapToRotation, SnapToTarget, Transform};
use crate::lookup::{is_shown, set_active, set_world_position, world_position};
use crate::signals::{Signal, SignalBus};

/// Snap every enabled part that reached its target and emit `Snapped`.
pub fn snap_system(world: &mut World, bus: &mut SignalBus) {
    let mut hits: Vec<(Entity, Entity)> = Vec::new();

    for (entity, snap) in world.query::<&SnapToTarget>().iter() {
        if !snap.enabled || snap.snapped || !is_shown(world, entity) {
            continue;
        }
        let (Some(pos), Some(target)) = (
            world_position(world, entity),
            world_position(world, snap.target),
        ) else {
            continue;
        };
        if pos.distance(&target) < snap.threshold {
            hits.push((entity, snap.target));
        }
    }

    for (entity, target) in hits {
        if let Some(target_pos) = world_position(world, target) {
            set_world_position(world, entity, target_pos);
        }
        if let Ok(mut drag) = world.get::<&mut DragToMove>(entity) {
            drag.enabled = false;
        }
        if let Ok(mut snap) = world.get::<&mut SnapToTarget>(entity) {
            snap.snapped = true;
        }
        set_active(world, target, false);
        bus.emit(Signal::Snapped(entity));
    }
}

/// Lock every enabled part whose angle is within tolerance and emit
/// `RotationSnapped`.
pub fn rotation_snap_system(world: &mut World, bus: &mut SignalBus) {
    let mut hits: Vec<Entity> = Vec::new();

    for (entity, (snap, transform)) in world.query::<(&SnapToRotation, &Transform)>().iter() {
        if !snap.enabled || snap.has_snapped || !is_shown(world, entity) {
            continue;
        }
        let current = snap.axis.component(&transform.rotation);
        if delta_angle(current, snap.target_deg).abs() <= snap.tolerance {
            hits.push(entity);
        }
    }

    for entity in hits {
        let mut snapped_axis = None;
        if let Ok(mut snap) = world.get::<&mut SnapToRotation>(entity) {
            snap.has_snapped = true;
            snapped_axis = Some((snap.axis, snap.target_deg));
        }
        if let (Some((axis, target)), Ok(mut t)) =
            (snapped_axis, world.get::<&mut Transform>(entity))
        {
            axis.set_component(&mut t.rotation, target);
        }
        if let Ok(mut rotate) = world.get::<&mut DragToRotate>(entity) {
            rotate.enabled = false;
        }
        bus.emit(Signal::RotationSnapped(entity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Active, Axis, Vec3};
    use crate::signals::{Handler, SignalSource};

    #[test]
    fn test_snaps_once_within_threshold() {
        let mut world = World::new();
        let target = world.spawn((Transform::at(Vec3::new(0.0, 1.0, 0.0)), Active(true)));
        let part = world.spawn((Transform::at(Vec3::new(0.0, 0.5, 0.0)), Active(true)));
        world
            .insert(
                part,
                (
                    DragToMove { enabled: true },
                    SnapToTarget {
                        target,
                        threshold: 0.1,
                        enabled: true,
                        snapped: false,
                    },
                ),
            )
            .unwrap();
        let mut bus = SignalBus::new();
        bus.subscribe(SignalSource::Snap(part), Handler::CompleteOnSnap);

        snap_system(&mut world, &mut bus);
        assert_eq!(bus.pending(), 0);

        world.get::<&mut Transform>(part).unwrap().position = Vec3::new(0.0, 0.95, 0.0);
        snap_system(&mut world, &mut bus);
        snap_system(&mut world, &mut bus);
        assert_eq!(bus.pending(), 1);
        assert_eq!(world_position(&world, part), Some(Vec3::new(0.0, 1.0, 0.0)));
        assert!(!world.get::<&DragToMove>(part).unwrap().enabled);
        assert!(!world.get::<&Active>(target).unwrap().0);
    }

    #[test]
    fn test_disabled_snap_never_fires() {
        let mut world = World::new();
        let target = world.spawn((Transform::default(), Active(true)));
        let part = world.spawn((
            Transform::default(),
            SnapToTarget {
                target,
                threshold: 0.1,
                enabled: false,
                snapped: false,
            },
        ));
        let mut bus = SignalBus::new();
        bus.subscribe(SignalSource::Snap(part), Handler::CompleteOnSnap);
        snap_system(&mut world, &mut bus);
        assert_eq!(bus.pending(), 0);
        assert!(world.get::<&Active>(target).unwrap().0);
    }

    #[test]
    fn test_rotation_snaps_to_exact_angle() {
        let mut world = World::new();
        let part = world.spawn((
            Transform::default().with_rotation(Vec3::new(0.0, 357.0, 0.0)),
            DragToRotate {
                enabled: true,
                axis: Axis::Y,
            },
            SnapToRotation {
                axis: Axis::Y,
                target_deg: 0.0,
                tolerance: 5.0,
                enabled: true,
                has_snapped: false,
            },
        ));
        let mut bus = SignalBus::new();
        bus.subscribe(SignalSource::RotationSnap(part), Handler::CompleteOnRotation);
        rotation_snap_system(&mut world, &mut bus);
        rotation_snap_system(&mut world, &mut bus);
        assert_eq!(bus.pending(), 1);
        assert_eq!(world.get::<&Transform>(part).unwrap().rotation.y, 0.0);
        assert!(!world.get::<&DragToRotate>(part).unwrap().enabled);
    }
}
