//! Goal orchestrator: walks the goal queue, arms the sensors each goal
//! needs and advances when they report.
//!
//! Transitions are never reentrant. Sensors only queue signals; the engine
//! calls [`GoalOrchestrator::dispatch`] once per tick after every sensor ran,
//! and each transition disarms everything its predecessor armed.

use hecs::{Entity, World};
use log::{debug, error, info, warn};
use rigcoach_logic::config::TutorialConfig;
use rigcoach_logic::goals::{Advance, Binding, GoalKind, GoalQueue};
use rigcoach_logic::parts::{PartSlot, PartType};
use rigcoach_logic::screws::{ScrewPlan, ScrewProgress, ScrewStep};
use rigcoach_logic::sequence::{SceneContext, SkipOp, SkipThen, StepEffect, StepEntry, StepTable};

use crate::components::{
    Approach, Axis, DragToMove, DragToRotate, Hint, Latch, SnapToRotation, SnapToTarget, Tag,
    Transform, Vec3, UNTAGGED,
};
use crate::error::CoachError;
use crate::lookup::{
    despawn_recursive, parent_of, reparent, set_active, set_world_position, world_position,
    SceneIndex, SceneLookup,
};
use crate::prefabs::{self, LATCH_NAME};
use crate::scheduler::{Scheduler, Task, TaskId};
use crate::signals::{Handler, Signal, SignalBus, SignalSource};
use crate::spawner::ObjectSpawner;
use crate::ui::UiState;

/// Everything a transition may touch besides the orchestrator itself.
pub struct Stage<'a> {
    pub world: &'a mut World,
    pub spawner: &'a mut ObjectSpawner,
    pub ui: &'a mut UiState,
    pub config: &'a TutorialConfig,
}

/// Counters for one coaching session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoachStats {
    /// Calls to `preprocess_goal`.
    pub arms: u32,
    /// Goals consumed, skipped or completed.
    pub completions: u32,
    pub skips: u32,
    /// Times the finished flag went from false to true.
    pub finishes: u32,
}

/// What the current goal armed.
#[derive(Debug, Default)]
struct Armed {
    sensors: Vec<Entity>,
    /// Auto-advance window or latch settle delay.
    timer: Option<TaskId>,
    tool: Option<Entity>,
    screw: Option<(ScrewProgress, Entity)>,
}

pub struct GoalOrchestrator {
    context: SceneContext,
    table: StepTable,
    queue: GoalQueue,
    cursor: usize,
    all_goals_finished: bool,
    /// Some earlier session ran to the end. Persisted; decides resume.
    finished_before: bool,
    tap_count: u32,
    bus: SignalBus,
    scheduler: Scheduler,
    armed: Armed,
    stats: CoachStats,
}

impl GoalOrchestrator {
    pub fn new(context: SceneContext) -> Self {
        Self {
            context,
            table: StepTable::for_context(context),
            queue: GoalQueue::default(),
            cursor: 0,
            all_goals_finished: false,
            finished_before: false,
            tap_count: 0,
            bus: SignalBus::new(),
            scheduler: Scheduler::new(),
            armed: Armed::default(),
            stats: CoachStats::default(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn context(&self) -> SceneContext {
        self.context
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }

    pub fn queue(&self) -> &GoalQueue {
        &self.queue
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_kind(&self) -> Option<GoalKind> {
        self.queue.current_kind()
    }

    /// Step entry the cursor points at, while a goal is current.
    pub fn current_step(&self) -> Option<&StepEntry> {
        self.queue.current()?;
        self.table.get(self.cursor)
    }

    pub fn all_goals_finished(&self) -> bool {
        self.all_goals_finished
    }

    /// Whether this or an earlier session finished. This is what gets saved.
    pub fn finished_before(&self) -> bool {
        self.finished_before
    }

    /// Restore the persisted flag. Takes effect at the next session start.
    pub fn set_finished_before(&mut self, finished: bool) {
        self.finished_before = finished;
    }

    pub fn stats(&self) -> CoachStats {
        self.stats
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn bus(&self) -> &SignalBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut SignalBus {
        &mut self.bus
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Screwdriver spawned for the current screw goal.
    pub fn tool(&self) -> Option<Entity> {
        self.armed.tool
    }

    pub fn screws_driven(&self) -> Option<usize> {
        self.armed.screw.map(|(progress, _)| progress.driven())
    }

    pub fn armed_timer(&self) -> Option<TaskId> {
        self.armed.timer
    }

    // ── Session ─────────────────────────────────────────────────────────

    /// Tear down any running session and start `context` from its first
    /// step, or past the intro when a previous session already finished.
    pub fn start_coaching(
        &mut self,
        stage: &mut Stage,
        context: SceneContext,
    ) -> Result<(), CoachError> {
        self.disarm(stage);
        self.bus.reset();
        self.scheduler.cancel_all();
        stage.world.clear();

        let resume = self.finished_before;
        self.all_goals_finished = false;
        self.context = context;
        self.table = StepTable::for_context(context);
        self.queue = GoalQueue::from_kinds(self.table.goal_kinds(resume));
        self.cursor = self.table.start_index(resume);
        self.tap_count = 0;
        self.stats = CoachStats::default();

        stage.spawner.reset(context.gates_on_buttons());
        stage.ui.reset(self.table.len());
        stage
            .ui
            .set_choose_build_menu(context == SceneContext::FreeBuild);

        info!(
            "coaching {:?}: {} goals from step {}{}",
            context,
            self.queue.enqueued_len(),
            self.cursor,
            if resume { " (resumed)" } else { "" }
        );
        if self.queue.current().is_none() {
            return Ok(());
        }
        stage.ui.show_panel(self.cursor);
        self.preprocess_goal(stage)
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Apply the current step's effects, then arm whatever completes its
    /// goal.
    pub fn preprocess_goal(&mut self, stage: &mut Stage) -> Result<(), CoachError> {
        let kind = self.queue.current_kind().ok_or(CoachError::NoCurrentGoal)?;
        self.disarm(stage);
        self.stats.arms += 1;

        let entry = self.table.get(self.cursor).cloned();
        if let Some(entry) = &entry {
            stage.ui.set_card(entry.card);
            stage.ui.set_button_text(entry.button_text);
            stage.ui.set_skip_visible(entry.include_skip_button());
        }

        debug!("arming {:?} at step {}", kind, self.cursor);
        let result = self
            .apply_effects(stage, entry.as_ref())
            .and_then(|()| self.arm(stage, kind, entry.as_ref()));
        if let Err(e) = &result {
            error!("arming {:?} at step {} aborted: {}", kind, self.cursor, e);
        }
        result
    }

    /// Consume the current goal without arming the next one.
    pub fn skip_goal(&mut self, stage: &mut Stage) -> Result<(), CoachError> {
        let kind = self.queue.current_kind().ok_or(CoachError::NoCurrentGoal)?;
        if kind == GoalKind::TapSurface {
            self.bus.unsubscribe(SignalSource::Spawner);
        }
        let advance = self.queue.advance().ok_or(CoachError::NoCurrentGoal)?;
        self.cursor = (self.cursor + 1).min(self.table.len());
        self.stats.completions += 1;

        match advance {
            Advance::Next(next) => {
                stage.ui.show_panel(self.cursor);
                let name = self.table.get(self.cursor).map(|e| e.name).unwrap_or("?");
                info!("{:?} done, step {} `{}` ({:?})", kind, self.cursor, name, next);
            }
            Advance::Finished => {
                self.disarm(stage);
                stage.ui.hide_panels();
                if !self.all_goals_finished {
                    self.all_goals_finished = true;
                    self.stats.finishes += 1;
                }
                self.finished_before = true;
                info!("{:?} done, all goals finished", kind);
            }
        }
        Ok(())
    }

    pub fn complete_goal(&mut self, stage: &mut Stage) -> Result<(), CoachError> {
        self.skip_goal(stage)?;
        if self.queue.current().is_some() {
            self.preprocess_goal(stage)
        } else {
            Ok(())
        }
    }

    /// Consume `n` goals, then arm the one landed on once.
    pub fn skip_steps(&mut self, stage: &mut Stage, n: usize) -> Result<(), CoachError> {
        if self.queue.current().is_none() {
            return Err(CoachError::NoCurrentGoal);
        }
        for _ in 0..n {
            if self.queue.current().is_none() {
                break;
            }
            self.skip_goal(stage)?;
        }
        if self.queue.current().is_some() {
            self.preprocess_goal(stage)
        } else {
            Ok(())
        }
    }

    /// Run the current step's skip action.
    pub fn skip_step(&mut self, stage: &mut Stage) -> Result<(), CoachError> {
        let kind = self.queue.current_kind().ok_or(CoachError::NoCurrentGoal)?;
        let entry = self.table.get(self.cursor).ok_or(CoachError::NoCurrentGoal)?;
        let Some(skip) = entry.skip.clone() else {
            warn!("step {} `{}` cannot be skipped", self.cursor, entry.name);
            return Err(CoachError::NoSkipHandler {
                index: self.cursor,
                name: entry.name,
                kind,
            });
        };

        self.stats.skips += 1;
        info!("skipping step {} `{}`", self.cursor, entry.name);
        for op in skip.ops {
            if let Err(e) = self.apply_skip_op(stage, op) {
                error!("skip of step {} aborted: {}", self.cursor, e);
                return Err(e);
            }
        }
        match skip.then {
            SkipThen::Advance(n) => self.skip_steps(stage, n),
            SkipThen::Complete => self.complete_goal(stage),
            SkipThen::Stay => Ok(()),
        }
    }

    pub fn force_complete_goal(&mut self, stage: &mut Stage) -> Result<(), CoachError> {
        self.complete_goal(stage)
    }

    /// Count a spawn; completes a TapSurface goal at the threshold.
    pub fn on_object_spawned(
        &mut self,
        stage: &mut Stage,
        slot: PartSlot,
        entity: Entity,
    ) -> Result<(), CoachError> {
        self.tap_count += 1;
        debug!("{} spawned as {:?}, tap count {}", slot, entity, self.tap_count);
        if self.queue.current_kind() == Some(GoalKind::TapSurface)
            && self.tap_count >= stage.config.tap_threshold
        {
            self.complete_goal(stage)
        } else {
            Ok(())
        }
    }

    /// A pointer press completes a timed goal and cancels its window.
    ///
    /// Returns whether the press was consumed.
    pub fn on_press(&mut self, stage: &mut Stage) -> Result<bool, CoachError> {
        match self.queue.current_kind() {
            Some(kind) if kind.is_timed() => {
                if let Some(id) = self.armed.timer.take() {
                    self.scheduler.cancel(id);
                }
                debug!("press completes {:?}", kind);
                self.complete_goal(stage)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Run a due scheduled task. Stale tasks are ignored.
    pub fn on_timer(
        &mut self,
        stage: &mut Stage,
        id: TaskId,
        task: Task,
    ) -> Result<(), CoachError> {
        if self.armed.timer != Some(id) {
            debug!("ignoring stale task {:?}", task);
            return Ok(());
        }
        self.armed.timer = None;
        match task {
            Task::AdvanceTimed => self.complete_goal(stage),
            Task::SettleLatch { latch } => {
                if let Ok(mut l) = stage.world.get::<&mut Latch>(latch) {
                    l.enabled = false;
                }
                self.complete_goal(stage)
            }
        }
    }

    /// Drain queued signals into their handlers.
    pub fn dispatch(&mut self, stage: &mut Stage) -> Result<(), CoachError> {
        while let Some((signal, handler)) = self.bus.next() {
            debug!("dispatch {:?} -> {:?}", signal, handler);
            match (handler, signal) {
                (Handler::CountSpawns, Signal::Spawned { slot, entity }) => {
                    self.on_object_spawned(stage, slot, entity)?
                }
                (Handler::CompleteOnSnap, Signal::Snapped(_)) => self.complete_goal(stage)?,
                (Handler::CompleteOnRotation, Signal::RotationSnapped(part)) => {
                    self.seat_on_motherboard(stage, part);
                    self.complete_goal(stage)?
                }
                (Handler::SettleLatch, Signal::Touched(latch)) => {
                    self.bus.unsubscribe(SignalSource::Latch(latch));
                    let id = self
                        .scheduler
                        .schedule(stage.config.latch_settle_secs, Task::SettleLatch { latch });
                    self.armed.timer = Some(id);
                }
                (Handler::DriveScrew, Signal::Screwed(_)) => self.drive_screw(stage)?,
                (handler, signal) => warn!("{:?} cannot handle {:?}", handler, signal),
            }
        }
        Ok(())
    }

    // ── Arming ──────────────────────────────────────────────────────────

    fn apply_effects(
        &mut self,
        stage: &mut Stage,
        entry: Option<&StepEntry>,
    ) -> Result<(), CoachError> {
        let Some(entry) = entry else {
            return Ok(());
        };
        for effect in &entry.effects {
            self.apply_effect(stage, *effect)?;
        }
        Ok(())
    }

    fn apply_effect(&mut self, stage: &mut Stage, effect: StepEffect) -> Result<(), CoachError> {
        match effect {
            StepEffect::ShowPartButton(part) => stage.ui.set_part_button(part, true),
            StepEffect::HidePartButton(part) => stage.ui.set_part_button(part, false),
            StepEffect::SelectSpawn(part) => stage.spawner.select(part),
            StepEffect::ArmDrag(slot) => {
                let part = part_entity(stage, slot)?;
                stage
                    .world
                    .insert_one(part, DragToMove { enabled: true })
                    .map_err(|_| dead_handle(slot))?;
                self.armed.sensors.push(part);
            }
            StepEffect::RevealHint(slot) => {
                let hint = hint_entity(stage, slot)?;
                set_active(stage.world, hint, true);
            }
            StepEffect::RetagHint { slot, tagged } => {
                let hint = hint_entity(stage, slot)?;
                let tag = match (tagged, slot.part.hint_tag()) {
                    (true, Some(tag)) => tag,
                    _ => UNTAGGED,
                };
                stage
                    .world
                    .insert_one(hint, Tag(tag.to_string()))
                    .map_err(|_| dead_handle(slot))?;
            }
            StepEffect::AlignHeightToHint(slot) => {
                let part = part_entity(stage, slot)?;
                let hint = hint_entity(stage, slot)?;
                if let (Some(mut pos), Some(hint_pos)) = (
                    world_position(stage.world, part),
                    world_position(stage.world, hint),
                ) {
                    pos.y = hint_pos.y;
                    set_world_position(stage.world, part, pos);
                }
            }
            StepEffect::ActivatePart(slot) => {
                let part = part_entity(stage, slot)?;
                set_active(stage.world, part, true);
            }
            StepEffect::ShowFinish => stage.ui.show_finish(),
        }
        Ok(())
    }

    fn arm(
        &mut self,
        stage: &mut Stage,
        kind: GoalKind,
        entry: Option<&StepEntry>,
    ) -> Result<(), CoachError> {
        let slot_for = |part: PartType| {
            entry
                .and_then(|e| e.target_slot())
                .unwrap_or(PartSlot::first(part))
        };

        match kind.binding() {
            Binding::Manual => {}
            Binding::Timed(window) => {
                if kind == GoalKind::FindSurfaces {
                    stage.ui.reveal_desktop_button();
                }
                let secs = stage.config.window_secs(window);
                self.armed.timer = Some(self.scheduler.schedule(secs, Task::AdvanceTimed));
            }
            Binding::SpawnCount => {
                self.tap_count = 0;
                self.bus
                    .subscribe(SignalSource::Spawner, Handler::CountSpawns);
            }
            Binding::Snap(part) => {
                let slot = slot_for(part);
                let entity = part_entity(stage, slot)?;
                let target = snap_target(stage, slot, entity)?;
                stage
                    .world
                    .insert(
                        entity,
                        (
                            DragToMove { enabled: true },
                            SnapToTarget {
                                target,
                                threshold: stage.config.snap_distance,
                                enabled: true,
                                snapped: false,
                            },
                        ),
                    )
                    .map_err(|_| dead_handle(slot))?;
                self.armed.sensors.push(entity);
                self.bus
                    .subscribe(SignalSource::Snap(entity), Handler::CompleteOnSnap);
            }
            Binding::Screw(part) => self.arm_screw(stage, part)?,
            Binding::Latch => {
                let mobo = part_entity(stage, PartSlot::first(PartType::Motherboard))?;
                let latch = SceneIndex::new(stage.world)
                    .find_child(mobo, LATCH_NAME)
                    .ok_or_else(|| CoachError::MissingObject(LATCH_NAME.to_string()))?;
                let open = stage
                    .world
                    .get::<&Latch>(latch)
                    .map(|l| l.open)
                    .unwrap_or(false);
                stage
                    .world
                    .insert_one(latch, Latch { enabled: true, open })
                    .map_err(|_| CoachError::MissingObject(LATCH_NAME.to_string()))?;
                self.armed.sensors.push(latch);
                self.bus
                    .subscribe(SignalSource::Latch(latch), Handler::SettleLatch);
            }
            Binding::Rotate(part) => {
                let slot = slot_for(part);
                let entity = part_entity(stage, slot)?;
                let axis = prefabs::rotate_axis(part).unwrap_or(Axis::Y);
                let target_deg = match hint_entity(stage, slot) {
                    Ok(hint) => stage
                        .world
                        .get::<&Transform>(hint)
                        .map(|t| axis.component(&t.rotation))
                        .unwrap_or(0.0),
                    Err(_) => 0.0,
                };
                stage
                    .world
                    .insert(
                        entity,
                        (
                            DragToRotate {
                                enabled: true,
                                axis,
                            },
                            SnapToRotation {
                                axis,
                                target_deg,
                                tolerance: stage.config.rotation_tolerance_deg,
                                enabled: true,
                                has_snapped: false,
                            },
                        ),
                    )
                    .map_err(|_| dead_handle(slot))?;
                self.armed.sensors.push(entity);
                self.bus
                    .subscribe(SignalSource::RotationSnap(entity), Handler::CompleteOnRotation);
            }
        }
        Ok(())
    }

    fn arm_screw(&mut self, stage: &mut Stage, part: PartType) -> Result<(), CoachError> {
        let plan = ScrewPlan::for_part(part)
            .ok_or_else(|| CoachError::MissingObject(format!("screw plan for {:?}", part)))?;
        let host = part_entity(stage, PartSlot::first(part))?;
        let hole = find_hole(stage.world, host, plan.first_hole())?;
        let position = tool_position(stage.world, hole, stage.config.standoffs.for_part(part))?;

        let tool = prefabs::spawn_tool(stage.world, position, stage.config.screw_turns_per_hole);
        self.armed.tool = Some(tool);
        self.armed.screw = Some((ScrewProgress::new(plan), host));
        self.bus
            .subscribe(SignalSource::Screwdriver(tool), Handler::DriveScrew);
        debug!("screwdriver {:?} at {} on {:?}", tool, plan.first_hole(), part);
        Ok(())
    }

    /// Disable every armed sensor, drop subscriptions, cancel the goal timer
    /// and remove the screwdriver.
    fn disarm(&mut self, stage: &mut Stage) {
        for entity in self.armed.sensors.drain(..) {
            disable_sensors(stage.world, entity);
        }
        if let Some(id) = self.armed.timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(tool) = self.armed.tool.take() {
            despawn_recursive(stage.world, tool);
        }
        self.armed.screw = None;
        self.bus.clear_subscriptions();
    }

    // ── Handlers ────────────────────────────────────────────────────────

    fn drive_screw(&mut self, stage: &mut Stage) -> Result<(), CoachError> {
        let (Some((mut progress, host)), Some(tool)) = (self.armed.screw, self.armed.tool) else {
            return Ok(());
        };
        let driven = progress.current_hole();
        let step = progress.on_screwed();
        self.armed.screw = Some((progress, host));

        if progress.plan.leaves_markers {
            let hole = driven.and_then(|name| SceneIndex::new(stage.world).find_child(host, name));
            if let Some(hole) = hole {
                prefabs::spawn_screw_marker(stage.world, hole);
            }
        }

        match step {
            ScrewStep::MoveTo(name) => {
                let hole = find_hole(stage.world, host, name)?;
                let standoff = stage.config.standoffs.for_part(progress.plan.part);
                let position = tool_position(stage.world, hole, standoff)?;
                set_world_position(stage.world, tool, position);
                debug!(
                    "screw {}/{} driven, tool to {}",
                    progress.driven(),
                    progress.plan.signals_required(),
                    name
                );
                Ok(())
            }
            ScrewStep::Done => {
                info!("{:?} screwed down", progress.plan.part);
                self.complete_goal(stage)
            }
        }
    }

    /// Rotated parts belong to the motherboard once they line up.
    fn seat_on_motherboard(&self, stage: &mut Stage, part: Entity) {
        let Some(mobo) = stage.spawner.part(PartSlot::first(PartType::Motherboard)) else {
            warn!("no motherboard to seat {:?} on", part);
            return;
        };
        if part != mobo && parent_of(stage.world, part) != Some(mobo) {
            reparent(stage.world, part, mobo);
        }
    }

    fn apply_skip_op(&mut self, stage: &mut Stage, op: SkipOp) -> Result<(), CoachError> {
        match op {
            SkipOp::Teleport {
                slot,
                with_rotation,
            } => {
                let part = part_entity(stage, slot)?;
                let hint = hint_entity(stage, slot)?;
                if let Some(pos) = world_position(stage.world, hint) {
                    set_world_position(stage.world, part, pos);
                }
                if with_rotation {
                    let rotation = stage
                        .world
                        .get::<&Transform>(hint)
                        .map(|t| t.rotation)
                        .unwrap_or(Vec3::ZERO);
                    if let Ok(mut t) = stage.world.get::<&mut Transform>(part) {
                        t.rotation = rotation;
                    }
                }
                if let Ok(mut drag) = stage.world.get::<&mut DragToMove>(part) {
                    drag.enabled = false;
                }
                if let Ok(mut rotate) = stage.world.get::<&mut DragToRotate>(part) {
                    rotate.enabled = false;
                }
                debug!("teleported {} onto its hint", slot);
            }
            SkipOp::Adopt(slot) => {
                let hint = hint_entity(stage, slot)?;
                disable_sensors(stage.world, hint);
                set_active(stage.world, hint, true);
                stage.spawner.adopt(stage.world, slot, hint)?;
            }
            SkipOp::SelectSpawn(part) => stage.spawner.select(part),
        }
        Ok(())
    }
}

// ── Scene helpers ───────────────────────────────────────────────────────

fn dead_handle(slot: PartSlot) -> CoachError {
    CoachError::MissingObject(format!("despawned entity for {}", slot))
}

fn part_entity(stage: &Stage, slot: PartSlot) -> Result<Entity, CoachError> {
    stage.spawner.part(slot).ok_or(CoachError::MissingPart(slot))
}

/// The ghost marking where `slot` goes, looked up under its host part.
fn hint_entity(stage: &Stage, slot: PartSlot) -> Result<Entity, CoachError> {
    let host_part = slot
        .part
        .hint_host()
        .ok_or_else(|| CoachError::MissingObject(format!("hint host for {}", slot)))?;
    let host = part_entity(stage, PartSlot::first(host_part))?;
    let name = slot
        .hint_name()
        .ok_or_else(|| CoachError::MissingObject(format!("hint for {}", slot)))?;
    SceneIndex::new(stage.world)
        .find_child(host, name)
        .ok_or_else(|| CoachError::MissingObject(name.to_string()))
}

/// Two-bay parts snap to whichever ghost carries their tag; the rest snap
/// to their own ghost. An adopted ghost is already where it belongs.
fn snap_target(stage: &Stage, slot: PartSlot, part: Entity) -> Result<Entity, CoachError> {
    let adopted = stage
        .world
        .get::<&Hint>(part)
        .map(|h| h.0 == slot)
        .unwrap_or(false);
    if adopted {
        return Ok(part);
    }
    match slot.part.hint_tag() {
        Some(tag) => SceneIndex::new(stage.world)
            .find_by_tag(tag)
            .ok_or_else(|| CoachError::MissingObject(tag.to_string())),
        None => hint_entity(stage, slot),
    }
}

fn find_hole(world: &World, host: Entity, name: &str) -> Result<Entity, CoachError> {
    SceneIndex::new(world)
        .find_child(host, name)
        .ok_or_else(|| CoachError::MissingObject(name.to_string()))
}

/// Where the screwdriver hovers over a hole.
fn tool_position(world: &World, hole: Entity, standoff: f32) -> Result<Vec3, CoachError> {
    let pos = world_position(world, hole)
        .ok_or_else(|| CoachError::MissingObject(format!("transform of hole {:?}", hole)))?;
    let approach = world
        .get::<&Approach>(hole)
        .map(|a| a.0)
        .unwrap_or(Vec3::UP);
    Ok(pos + approach * standoff)
}

fn disable_sensors(world: &mut World, entity: Entity) {
    if let Ok(mut s) = world.get::<&mut DragToMove>(entity) {
        s.enabled = false;
    }
    if let Ok(mut s) = world.get::<&mut DragToRotate>(entity) {
        s.enabled = false;
    }
    if let Ok(mut s) = world.get::<&mut SnapToTarget>(entity) {
        s.enabled = false;
    }
    if let Ok(mut s) = world.get::<&mut SnapToRotation>(entity) {
        s.enabled = false;
    }
    if let Ok(mut s) = world.get::<&mut Latch>(entity) {
        s.enabled = false;
    }
}
