//! Tutorial engine - main entry point for running a coaching session

use hecs::{Entity, World};
use log::{info, warn};
use rigcoach_logic::cards::Language;
use rigcoach_logic::config::TutorialConfig;
use rigcoach_logic::parts::{PartSlot, PartType};
use rigcoach_logic::sequence::SceneContext;

use crate::components::Vec3;
use crate::error::CoachError;
use crate::input::FrameInput;
use crate::lookup::{set_active, world_position, SceneIndex, SceneLookup};
use crate::orchestrator::{GoalOrchestrator, Stage};
use crate::persistence::{self, SaveData, SaveError};
use crate::signals::Signal;
use crate::spawner::ObjectSpawner;
use crate::systems::*;
use crate::ui::UiState;

/// Step whose continue button waits for every cable.
const CABLE_STEP: &str = "cables.connect";

/// Main tutorial engine
pub struct TutorialEngine {
    /// ECS world holding every scene object
    pub world: World,
    spawner: ObjectSpawner,
    ui: UiState,
    config: TutorialConfig,
    coach: GoalOrchestrator,
    /// Seconds since the engine was created
    time: f64,
}

impl TutorialEngine {
    pub fn new(config: TutorialConfig) -> Self {
        Self {
            world: World::new(),
            spawner: ObjectSpawner::new(true),
            ui: UiState::new(0),
            config,
            coach: GoalOrchestrator::new(SceneContext::Guided),
            time: 0.0,
        }
    }

    pub fn config(&self) -> &TutorialConfig {
        &self.config
    }

    pub fn coach(&self) -> &GoalOrchestrator {
        &self.coach
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn spawner(&self) -> &ObjectSpawner {
        &self.spawner
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Start (or restart) coaching in `context`.
    pub fn start_coaching(&mut self, context: SceneContext) -> Result<(), CoachError> {
        let mut stage = Stage {
            world: &mut self.world,
            spawner: &mut self.spawner,
            ui: &mut self.ui,
            config: &self.config,
        };
        self.coach.start_coaching(&mut stage, context)
    }

    /// Advance one tick.
    ///
    /// Order: press, surface tap, sensors, signal dispatch, then timers. A
    /// press therefore always beats a timer due on the same tick.
    pub fn update(&mut self, delta_seconds: f32, input: &FrameInput) -> Result<(), CoachError> {
        self.time += delta_seconds as f64;
        let mut stage = Stage {
            world: &mut self.world,
            spawner: &mut self.spawner,
            ui: &mut self.ui,
            config: &self.config,
        };

        if input.press {
            self.coach.on_press(&mut stage)?;
        }

        if let Some(hit) = input.surface_tap {
            if let Ok((slot, entity)) =
                stage
                    .spawner
                    .try_spawn(stage.world, stage.ui, hit.point, hit.normal)
            {
                self.coach.bus_mut().emit(Signal::Spawned { slot, entity });
            }
        }

        drag_system(stage.world, input.drag, stage.config.drag_speed);
        rotate_system(stage.world, input.rotate);
        latch_system(stage.world, input.touched, self.coach.bus_mut());
        screw_system(stage.world, input.screw_turns, self.coach.bus_mut());
        snap_system(stage.world, self.coach.bus_mut());
        rotation_snap_system(stage.world, self.coach.bus_mut());

        self.coach.dispatch(&mut stage)?;

        let due = self.coach.scheduler_mut().advance(delta_seconds);
        for (id, task) in due {
            self.coach.on_timer(&mut stage, id, task)?;
        }
        Ok(())
    }

    // ── UI entry points ─────────────────────────────────────────────────

    /// Spawn the selected part at a surface point. Returns whether it spawned.
    pub fn try_spawn(&mut self, point: Vec3, normal: Vec3) -> bool {
        match self
            .spawner
            .try_spawn(&mut self.world, &mut self.ui, point, normal)
        {
            Ok((slot, entity)) => {
                self.coach.bus_mut().emit(Signal::Spawned { slot, entity });
                true
            }
            Err(_) => false,
        }
    }

    /// A part button was pressed.
    pub fn select_part(&mut self, part: PartType) {
        self.spawner.select(part);
    }

    pub fn force_complete_goal(&mut self) -> Result<(), CoachError> {
        let mut stage = Stage {
            world: &mut self.world,
            spawner: &mut self.spawner,
            ui: &mut self.ui,
            config: &self.config,
        };
        self.coach.force_complete_goal(&mut stage)
    }

    pub fn skip_step(&mut self) -> Result<(), CoachError> {
        let mut stage = Stage {
            world: &mut self.world,
            spawner: &mut self.spawner,
            ui: &mut self.ui,
            config: &self.config,
        };
        self.coach.skip_step(&mut stage)
    }

    /// The card's continue button. Refused on the cable card until every
    /// cable is connected.
    pub fn press_continue(&mut self) -> Result<(), CoachError> {
        let on_cables = self.coach.current_step().map(|s| s.name) == Some(CABLE_STEP);
        if on_cables && !self.ui.cables().continue_enabled() {
            let connected = self.ui.cables().connected_count();
            warn!("continue refused: {} cables connected", connected);
            return Err(CoachError::CablesIncomplete {
                connected,
                required: rigcoach_logic::cables::REQUIRED_CONNECTIONS,
            });
        }
        self.force_complete_goal()
    }

    /// Flip a cable on the tower. Returns whether it is now connected.
    pub fn toggle_cable(&mut self, cable: &str) -> Result<bool, CoachError> {
        let connected = self
            .ui
            .cables_mut()
            .toggle(cable)
            .ok_or_else(|| CoachError::UnknownCable(cable.to_string()))?;
        let entity = self
            .spawner
            .part(PartSlot::first(PartType::Tower))
            .and_then(|tower| SceneIndex::new(&self.world).find_child(tower, cable));
        if let Some(entity) = entity {
            set_active(&mut self.world, entity, connected);
        }
        Ok(connected)
    }

    pub fn toggle_language(&mut self) -> Language {
        self.ui.toggle_language()
    }

    /// Pick the tower build that subsequent tower spawns use.
    pub fn choose_build(&mut self, preset: &str) {
        info!("build chosen: {}", preset);
        self.spawner.set_tower_prefab(preset);
        self.ui.set_choose_build_menu(false);
    }

    // ── Scene queries ───────────────────────────────────────────────────

    pub fn part(&self, slot: PartSlot) -> Option<Entity> {
        self.spawner.part(slot)
    }

    pub fn world_position(&self, entity: Entity) -> Option<Vec3> {
        world_position(&self.world, entity)
    }

    /// The ghost for `slot` under its current host part.
    pub fn hint(&self, slot: PartSlot) -> Option<Entity> {
        let host = self.spawner.part(PartSlot::first(slot.part.hint_host()?))?;
        SceneIndex::new(&self.world).find_child(host, slot.hint_name()?)
    }

    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        SceneIndex::new(&self.world).find_by_name(name)
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Save progress to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        let data = SaveData::new(
            self.coach.finished_before(),
            self.ui.language(),
            self.coach.context(),
        );
        persistence::save_progress(writer, &data)
    }

    /// Load progress from a reader. Returns the saved context; the caller
    /// restarts coaching with it.
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<SceneContext, SaveError> {
        let data = persistence::load_progress(reader)?;
        self.coach.set_finished_before(data.all_goals_finished);
        self.ui.set_language(data.language);
        Ok(data.context)
    }
}

impl Default for TutorialEngine {
    fn default() -> Self {
        Self::new(TutorialConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcoach_logic::goals::GoalKind;

    #[test]
    fn test_engine_creation() {
        let engine = TutorialEngine::default();
        assert_eq!(engine.world.len(), 0);
        assert_eq!(engine.coach().current_kind(), None);
        assert!(!engine.coach().all_goals_finished());
    }

    #[test]
    fn test_start_shows_first_panel() {
        let mut engine = TutorialEngine::default();
        engine.start_coaching(SceneContext::Guided).unwrap();
        assert_eq!(engine.coach().current_kind(), Some(GoalKind::FindSurfaces));
        assert_eq!(engine.ui().visible_panel(), Some(0));
        assert!(engine.ui().desktop_button());
        assert!(engine.coach().armed_timer().is_some());
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut engine = TutorialEngine::default();
        engine.start_coaching(SceneContext::FreeBuild).unwrap();
        engine.force_complete_goal().unwrap();
        engine.select_part(PartType::Tower);
        assert!(engine.try_spawn(Vec3::ZERO, Vec3::UP));
        engine.update(0.1, &FrameInput::idle()).unwrap();

        engine.start_coaching(SceneContext::FreeBuild).unwrap();
        assert_eq!(engine.world.len(), 0);
        assert_eq!(engine.coach().cursor(), 0);
        assert_eq!(engine.coach().current_kind(), Some(GoalKind::ChooseBuild));
        assert_eq!(engine.spawner().count(PartType::Tower), 0);
        assert_eq!(engine.coach().scheduler().len(), 0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = TutorialEngine::default();
        engine.start_coaching(SceneContext::FreeBuild).unwrap();
        engine.toggle_language();

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let mut loaded = TutorialEngine::default();
        let context = loaded.load(&save_buffer[..]).expect("Load failed");
        assert_eq!(context, SceneContext::FreeBuild);
        assert_eq!(loaded.ui().language(), Language::Greek);
    }
}
