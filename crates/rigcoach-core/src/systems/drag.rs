//! Drag and rotate gestures applied to enabled, visible entities.

use hecs::World;

use crate::components::{DragToMove, DragToRotate, Transform};
use crate::input::{DragInput, RotateInput};
use crate::lookup::is_shown;

/// Translate the dragged entity if its move sensor is enabled.
///
/// Returns whether the entity moved.
pub fn drag_system(world: &mut World, drag: Option<DragInput>, speed: f32) -> bool {
    let Some(drag) = drag else {
        return false;
    };
    let enabled = world
        .get::<&DragToMove>(drag.target)
        .map(|d| d.enabled)
        .unwrap_or(false);
    if !enabled || !is_shown(world, drag.target) {
        return false;
    }
    match world.get::<&mut Transform>(drag.target) {
        Ok(mut t) => {
            t.position += drag.delta * speed;
            true
        }
        Err(_) => false,
    }
}

/// Spin the target about its sensor's axis, keeping angles in [0, 360).
pub fn rotate_system(world: &mut World, rotate: Option<RotateInput>) -> bool {
    let Some(rotate) = rotate else {
        return false;
    };
    let axis = match world.get::<&DragToRotate>(rotate.target) {
        Ok(r) if r.enabled => r.axis,
        _ => return false,
    };
    if !is_shown(world, rotate.target) {
        return false;
    }
    match world.get::<&mut Transform>(rotate.target) {
        Ok(mut t) => {
            let angle = (axis.component(&t.rotation) + rotate.degrees).rem_euclid(360.0);
            axis.set_component(&mut t.rotation, angle);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Axis, Vec3};

    #[test]
    fn test_disabled_drag_ignored() {
        let mut world = World::new();
        let e = world.spawn((Transform::default(), DragToMove { enabled: false }));
        let input = Some(DragInput {
            target: e,
            delta: Vec3::new(1.0, 0.0, 0.0),
        });
        assert!(!drag_system(&mut world, input, 1.0));

        world.get::<&mut DragToMove>(e).unwrap().enabled = true;
        assert!(drag_system(&mut world, input, 0.5));
        assert_eq!(
            world.get::<&Transform>(e).unwrap().position,
            Vec3::new(0.5, 0.0, 0.0)
        );
    }

    #[test]
    fn test_rotation_wraps() {
        let mut world = World::new();
        let e = world.spawn((
            Transform::default().with_rotation(Vec3::new(0.0, 30.0, 0.0)),
            DragToRotate {
                enabled: true,
                axis: Axis::Y,
            },
        ));
        assert!(rotate_system(
            &mut world,
            Some(RotateInput {
                target: e,
                degrees: -45.0
            })
        ));
        assert_eq!(world.get::<&Transform>(e).unwrap().rotation.y, 345.0);
    }
}
