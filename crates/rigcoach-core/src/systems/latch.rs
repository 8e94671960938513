//! CPU latch sensor.

use hecs::{Entity, World};

use crate::components::Latch;
use crate::lookup::is_shown;
use crate::signals::{Signal, SignalBus};

/// Flip a touched, enabled latch and emit `Touched`.
pub fn latch_system(world: &mut World, touched: Option<Entity>, bus: &mut SignalBus) {
    let Some(entity) = touched else {
        return;
    };
    if !is_shown(world, entity) {
        return;
    }
    let fired = match world.get::<&mut Latch>(entity) {
        Ok(mut latch) if latch.enabled => {
            latch.open = !latch.open;
            true
        }
        _ => false,
    };
    if fired {
        bus.emit(Signal::Touched(entity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{Handler, SignalSource};

    #[test]
    fn test_latch_only_fires_enabled() {
        let mut world = World::new();
        let latch = world.spawn((Latch {
            enabled: false,
            open: false,
        },));
        let mut bus = SignalBus::new();
        bus.subscribe(SignalSource::Latch(latch), Handler::SettleLatch);

        latch_system(&mut world, Some(latch), &mut bus);
        assert_eq!(bus.pending(), 0);

        world.get::<&mut Latch>(latch).unwrap().enabled = true;
        latch_system(&mut world, Some(latch), &mut bus);
        assert_eq!(bus.pending(), 1);
        assert!(world.get::<&Latch>(latch).unwrap().open);
    }
}
