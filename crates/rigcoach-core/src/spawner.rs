//! Object spawner: turns surface taps into parts, gated per part type.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::Rng;
use rigcoach_logic::parts::{PartSlot, PartType};
use rigcoach_logic::spawn_gate::{SpawnDenied, SpawnGate};

use crate::components::{PartInstance, Vec3};
use crate::error::CoachError;
use crate::lookup::{set_active, SceneIndex, SceneLookup};
use crate::prefabs::{self, DEFAULT_TOWER};
use crate::ui::UiState;

#[derive(Debug)]
pub struct ObjectSpawner {
    gate: SpawnGate,
    /// Part the next tap spawns; `None` picks one at random.
    spawn_option: Option<PartType>,
    registry: BTreeMap<PartSlot, Entity>,
    tower_prefab: String,
}

impl ObjectSpawner {
    pub fn new(requires_button: bool) -> Self {
        Self {
            gate: SpawnGate::new(requires_button),
            spawn_option: None,
            registry: BTreeMap::new(),
            tower_prefab: DEFAULT_TOWER.to_string(),
        }
    }

    /// Forget every spawn and registered part. The build choice survives.
    pub fn reset(&mut self, requires_button: bool) {
        self.gate = SpawnGate::new(requires_button);
        self.spawn_option = None;
        self.registry.clear();
    }

    pub fn select(&mut self, part: PartType) {
        self.spawn_option = Some(part);
    }

    pub fn spawn_option(&self) -> Option<PartType> {
        self.spawn_option
    }

    pub fn set_tower_prefab(&mut self, name: impl Into<String>) {
        self.tower_prefab = name.into();
    }

    pub fn tower_prefab(&self) -> &str {
        &self.tower_prefab
    }

    pub fn count(&self, part: PartType) -> u32 {
        self.gate.count(part)
    }

    pub fn part(&self, slot: PartSlot) -> Option<Entity> {
        self.registry.get(&slot).copied()
    }

    pub fn parts(&self) -> impl Iterator<Item = (PartSlot, Entity)> + '_ {
        self.registry.iter().map(|(s, e)| (*s, *e))
    }

    /// Spawn the selected part at `point` if the gate allows it.
    pub fn try_spawn(
        &mut self,
        world: &mut World,
        ui: &mut UiState,
        point: Vec3,
        normal: Vec3,
    ) -> Result<(PartSlot, Entity), SpawnDenied> {
        let part = self.spawn_option.unwrap_or_else(random_part);
        if let Err(denied) = self.gate.check(part, ui.part_button(part)) {
            warn!("spawn denied: {}", denied);
            return Err(denied);
        }

        let slot = PartSlot::new(part, self.gate.record(part));
        let entity = prefabs::spawn_part(world, slot, point, &self.tower_prefab);
        self.registry.insert(slot, entity);
        debug!("spawned {} at {:?} (normal {:?})", slot, point, normal);

        ui.set_part_button(part, false);
        if part == PartType::Tower {
            ui.set_part_button(PartType::Motherboard, true);
            let hint = PartType::Motherboard
                .hint_name(0)
                .and_then(|name| SceneIndex::new(world).find_child(entity, name));
            if let Some(hint) = hint {
                set_active(world, hint, false);
            }
        }
        Ok((slot, entity))
    }

    /// Register an existing object as the part in `slot` and count it.
    pub fn adopt(
        &mut self,
        world: &mut World,
        slot: PartSlot,
        entity: Entity,
    ) -> Result<(), CoachError> {
        world
            .insert_one(entity, PartInstance(slot))
            .map_err(|_| CoachError::MissingObject(format!("adopted entity for {}", slot)))?;
        self.gate.record(slot.part);
        self.registry.insert(slot, entity);
        info!("adopted {:?} as {}", entity, slot);
        Ok(())
    }
}

fn random_part() -> PartType {
    let id = rand::thread_rng().gen_range(0..PartType::COUNT as u8);
    PartType::from_u8(id).unwrap_or(PartType::Tower)
}
