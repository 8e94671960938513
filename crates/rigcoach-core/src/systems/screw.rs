//! Screwdriver sensor: one signal per hole's worth of turns.

use hecs::{Entity, World};

use crate::components::Screwdriver;
use crate::signals::{Signal, SignalBus};

/// Feed turns into every enabled screwdriver and emit `Screwed` per hole.
pub fn screw_system(world: &mut World, turns: u32, bus: &mut SignalBus) {
    if turns == 0 {
        return;
    }
    let mut fired: Vec<(Entity, u32)> = Vec::new();

    for (entity, driver) in world.query_mut::<&mut Screwdriver>() {
        if !driver.enabled || driver.turns_per_hole == 0 {
            continue;
        }
        driver.turns += turns;
        let holes = driver.turns / driver.turns_per_hole;
        driver.turns %= driver.turns_per_hole;
        if holes > 0 {
            fired.push((entity, holes));
        }
    }

    for (entity, holes) in fired {
        for _ in 0..holes {
            bus.emit(Signal::Screwed(entity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{Handler, SignalSource};

    #[test]
    fn test_turns_accumulate_per_hole() {
        let mut world = World::new();
        let tool = world.spawn((Screwdriver {
            enabled: true,
            turns: 0,
            turns_per_hole: 3,
        },));
        let mut bus = SignalBus::new();
        bus.subscribe(SignalSource::Screwdriver(tool), Handler::DriveScrew);

        screw_system(&mut world, 2, &mut bus);
        assert_eq!(bus.pending(), 0);
        screw_system(&mut world, 2, &mut bus);
        assert_eq!(bus.pending(), 1);
        assert_eq!(world.get::<&Screwdriver>(tool).unwrap().turns, 1);
    }

    #[test]
    fn test_disabled_driver_silent() {
        let mut world = World::new();
        let tool = world.spawn((Screwdriver {
            enabled: false,
            turns: 0,
            turns_per_hole: 1,
        },));
        let mut bus = SignalBus::new();
        bus.subscribe(SignalSource::Screwdriver(tool), Handler::DriveScrew);
        screw_system(&mut world, 5, &mut bus);
        assert_eq!(bus.pending(), 0);
    }
}
