//! RigCoach Headless Coaching Harness
//!
//! Scripts complete tutorial runs against the engine with a simulated
//! learner. Runs entirely in-process: no camera, no renderer, no touch screen.
//!
//! Usage:
//!   cargo run -p rigcoach-simtest
//!   cargo run -p rigcoach-simtest -- --verbose
//!   RUST_LOG=debug cargo run -p rigcoach-simtest

use hecs::Entity;
use log::info;
use rigcoach_core::components::{delta_angle, ScrewMarker, SnapToRotation, SnapToTarget, Transform};
use rigcoach_core::lookup::{SceneIndex, SceneLookup};
use rigcoach_core::prefabs::{DEFAULT_TOWER, LATCH_NAME};
use rigcoach_core::prelude::*;
use rigcoach_logic::cables::CABLES;
use rigcoach_logic::config::TutorialConfig;
use rigcoach_logic::sequence::StepTable;
use tracing_subscriber::EnvFilter;

// ── Tutorial config (same JSON the app ships) ───────────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/tutorial_config.json");

const DT: f32 = 0.5;
const MAX_ACTIONS: usize = 500;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.into(),
            passed,
            detail,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== RigCoach Coaching Harness ===\n");

    let mut results = Vec::new();

    // 1. Shipped config
    let config = validate_config(verbose, &mut results).unwrap_or_default();

    // 2. Step tables
    results.extend(validate_tables(verbose));

    // 3. Guided lesson, hands-on
    results.extend(run_guided(&config, verbose));

    // 4. Free build, hands-on then skipped
    results.extend(run_free_build(&config, verbose));
    results.extend(run_free_build_skips(&config, verbose));

    // 5. Save and resume
    results.extend(run_resume(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_config(verbose: bool, results: &mut Vec<TestResult>) -> Option<TutorialConfig> {
    println!("--- Tutorial Config ---");

    let config = match TutorialConfig::from_json(CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::check("config_parse", false, e.to_string()));
            return None;
        }
    };
    results.push(TestResult::check(
        "config_parse",
        true,
        "shipped config is valid".into(),
    ));

    // A misspelled key would silently fall back to its default.
    let known = serde_json::to_value(TutorialConfig::default()).ok();
    let shipped: Option<serde_json::Value> = serde_json::from_str(CONFIG_JSON).ok();
    let unknown: Vec<String> = match (
        known.as_ref().and_then(|v| v.as_object()),
        shipped.as_ref().and_then(|v| v.as_object()),
    ) {
        (Some(known), Some(shipped)) => shipped
            .keys()
            .filter(|k| !known.contains_key(*k))
            .cloned()
            .collect(),
        _ => vec!["<not an object>".into()],
    };
    results.push(TestResult::check(
        "config_keys_known",
        unknown.is_empty(),
        format!("unknown keys: {:?}", unknown),
    ));

    results.push(TestResult::check(
        "config_windows_ordered",
        config.latch_settle_secs < config.find_surfaces_secs
            && config.find_surfaces_secs <= config.hints_secs,
        format!(
            "latch {}s, find surfaces {}s, hints {}s",
            config.latch_settle_secs, config.find_surfaces_secs, config.hints_secs
        ),
    ));

    if verbose {
        println!("  {:?}", config);
    }
    Some(config)
}

// ── 2. Step tables ──────────────────────────────────────────────────────

fn validate_tables(verbose: bool) -> Vec<TestResult> {
    println!("--- Step Tables ---");
    let mut results = Vec::new();

    for context in [SceneContext::Guided, SceneContext::FreeBuild] {
        let table = StepTable::for_context(context);
        for resume in [false, true] {
            let kinds = table.goal_kinds(resume);
            let start = table.start_index(resume);
            let aligned = kinds
                .iter()
                .enumerate()
                .all(|(i, k)| table.get(start + i).map(|e| e.kind) == Some(*k));
            results.push(TestResult::check(
                &format!("{:?}_aligned_resume_{}", context, resume),
                aligned && start + kinds.len() == table.len(),
                format!("{} goals from step {}", kinds.len(), start),
            ));
        }

        let skippable = table.entries.iter().filter(|e| e.skip.is_some()).count();
        let expect_skips = context == SceneContext::FreeBuild;
        results.push(TestResult::check(
            &format!("{:?}_skip_actions", context),
            (skippable > 0) == expect_skips,
            format!("{} of {} steps skippable", skippable, table.len()),
        ));
        if verbose {
            println!("  {:?}: {} steps", context, table.len());
        }
    }
    results
}

// ── Simulated learner ───────────────────────────────────────────────────

struct Learner {
    engine: TutorialEngine,
    taps: u32,
    actions: usize,
}

impl Learner {
    fn new(config: &TutorialConfig, context: SceneContext) -> Result<Self, CoachError> {
        let mut engine = TutorialEngine::new(config.clone());
        engine.start_coaching(context)?;
        Ok(Self {
            engine,
            taps: 0,
            actions: 0,
        })
    }

    fn step_name(&self) -> &'static str {
        self.engine
            .coach()
            .current_step()
            .map(|s| s.name)
            .unwrap_or("<none>")
    }

    fn finished(&self) -> bool {
        self.engine.coach().queue().is_finished()
    }

    fn tick(&mut self, input: FrameInput) -> Result<(), CoachError> {
        self.engine.update(DT, &input)
    }

    fn target_part(&self) -> Option<Entity> {
        let slot = self.engine.coach().current_step()?.target_slot()?;
        self.engine.part(slot)
    }

    /// Do what the current card asks.
    fn act(&mut self) -> Result<(), String> {
        self.actions += 1;
        let step = self
            .engine
            .coach()
            .current_step()
            .cloned()
            .ok_or("no current step")?;
        let fail = |e: CoachError| format!("{}: {}", step.name, e);

        match step.kind {
            GoalKind::FindSurfaces | GoalKind::Hints | GoalKind::Scale => {
                self.tick(FrameInput::press()).map_err(fail)
            }
            GoalKind::TapSurface => {
                let part = PartType::all()
                    .into_iter()
                    .find(|p| step.name.starts_with(&p.display_name().to_lowercase()))
                    .ok_or_else(|| format!("{}: no part to tap", step.name))?;
                self.engine.select_part(part);
                self.taps += 1;
                let point = Vec3::new(2.0 * self.taps as f32, 0.0, 1.0);
                self.tick(FrameInput::tap(point)).map_err(fail)
            }
            GoalKind::Prompt | GoalKind::Empty => {
                if step.name == "cables.connect" {
                    for cable in CABLES {
                        self.engine.toggle_cable(cable).map_err(fail)?;
                    }
                }
                self.engine.press_continue().map_err(fail)
            }
            GoalKind::ChooseBuild => {
                self.engine.choose_build(DEFAULT_TOWER);
                self.engine.force_complete_goal().map_err(fail)
            }
            GoalKind::CpuLatch => {
                let latch = self
                    .engine
                    .part(PartSlot::first(PartType::Motherboard))
                    .and_then(|m| SceneIndex::new(&self.engine.world).find_child(m, LATCH_NAME))
                    .ok_or_else(|| format!("{}: no latch", step.name))?;
                self.tick(FrameInput::touch(latch)).map_err(fail)?;
                while self.engine.coach().current_kind() == Some(GoalKind::CpuLatch) {
                    self.actions += 1;
                    if self.actions >= MAX_ACTIONS {
                        return Err(format!("{}: latch never settled", step.name));
                    }
                    self.tick(FrameInput::idle()).map_err(fail)?;
                }
                Ok(())
            }
            GoalKind::RotateCpu | GoalKind::RotateRam => {
                let part = self
                    .target_part()
                    .ok_or_else(|| format!("{}: no part", step.name))?;
                let degrees = {
                    let world = &self.engine.world;
                    let snap = world
                        .get::<&SnapToRotation>(part)
                        .map_err(|e| format!("{}: {}", step.name, e))?;
                    let transform = world
                        .get::<&Transform>(part)
                        .map_err(|e| format!("{}: {}", step.name, e))?;
                    delta_angle(snap.axis.component(&transform.rotation), snap.target_deg)
                };
                self.tick(FrameInput::rotate(part, degrees)).map_err(fail)
            }
            GoalKind::ScrewMotherboard
            | GoalKind::ScrewCooler
            | GoalKind::ScrewPsu
            | GoalKind::ScrewGpu => self.tick(FrameInput::screw(1)).map_err(fail),
            _ => {
                let part = self
                    .target_part()
                    .ok_or_else(|| format!("{}: no part", step.name))?;
                let target = self
                    .engine
                    .world
                    .get::<&SnapToTarget>(part)
                    .map(|s| s.target)
                    .map_err(|e| format!("{}: {}", step.name, e))?;
                let delta = match (
                    self.engine.world_position(part),
                    self.engine.world_position(target),
                ) {
                    (Some(from), Some(to)) => to - from,
                    _ => return Err(format!("{}: part or target has no position", step.name)),
                };
                self.tick(FrameInput::drag(part, delta)).map_err(fail)
            }
        }
    }

    fn run_to_finish(&mut self) -> Result<(), String> {
        while !self.finished() {
            if self.actions >= MAX_ACTIONS {
                return Err(format!("stuck at {}", self.step_name()));
            }
            self.act()?;
        }
        Ok(())
    }
}

fn session_results(prefix: &str, learner: &Learner, outcome: Result<(), String>) -> Vec<TestResult> {
    let coach = learner.engine.coach();
    let queue = coach.queue();
    let stats = coach.stats();
    vec![
        TestResult::check(
            &format!("{}_completes", prefix),
            outcome.is_ok() && coach.all_goals_finished(),
            match outcome {
                Ok(()) => format!("{} actions", learner.actions),
                Err(e) => e,
            },
        ),
        TestResult::check(
            &format!("{}_queue_drained", prefix),
            queue.consumed().len() == queue.enqueued_len(),
            format!(
                "{} of {} goals consumed",
                queue.consumed().len(),
                queue.enqueued_len()
            ),
        ),
        TestResult::check(
            &format!("{}_finished_once", prefix),
            stats.finishes <= 1,
            format!("{:?}", stats),
        ),
    ]
}

// ── 3. Guided lesson ────────────────────────────────────────────────────

fn run_guided(config: &TutorialConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Guided Lesson ---");
    let mut learner = match Learner::new(config, SceneContext::Guided) {
        Ok(l) => l,
        Err(e) => return vec![TestResult::check("guided_start", false, e.to_string())],
    };
    let outcome = learner.run_to_finish();
    let mut results = session_results("guided", &learner, outcome);

    let markers = learner.engine.world.query::<&ScrewMarker>().iter().count();
    results.push(TestResult::check(
        "guided_screw_markers",
        markers == 14,
        format!("{} screws left in holes", markers),
    ));
    let stats = learner.engine.coach().stats();
    results.push(TestResult::check(
        "guided_arms_each_step_once",
        stats.arms as usize == learner.engine.coach().table().len(),
        format!("{} arms", stats.arms),
    ));
    if verbose {
        info!("guided run took {:.1}s of scene time", learner.engine.time());
    }
    results
}

// ── 4. Free build ───────────────────────────────────────────────────────

fn run_free_build(config: &TutorialConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Free Build ---");
    let mut learner = match Learner::new(config, SceneContext::FreeBuild) {
        Ok(l) => l,
        Err(e) => return vec![TestResult::check("free_build_start", false, e.to_string())],
    };
    let outcome = learner.run_to_finish();
    let mut results = session_results("free_build", &learner, outcome);
    results.push(TestResult::check(
        "free_build_finish_shown",
        learner.engine.ui().finish_visible(),
        "finish button after the last step".into(),
    ));
    results
}

fn run_free_build_skips(config: &TutorialConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Free Build (skipping) ---");
    let mut learner = match Learner::new(config, SceneContext::FreeBuild) {
        Ok(l) => l,
        Err(e) => return vec![TestResult::check("skips_start", false, e.to_string())],
    };

    let mut landings = Vec::new();
    let outcome = (|| {
        while !learner.finished() {
            if learner.actions >= MAX_ACTIONS {
                return Err(format!("stuck at {}", learner.step_name()));
            }
            if learner.engine.ui().skip_visible() {
                learner.actions += 1;
                learner
                    .engine
                    .skip_step()
                    .map_err(|e| format!("{}: {}", learner.step_name(), e))?;
                landings.push(learner.step_name());
                learner
                    .tick(FrameInput::idle())
                    .map_err(|e| e.to_string())?;
            } else {
                learner.act()?;
            }
        }
        Ok(())
    })();

    if verbose {
        println!("  landings: {:?}", landings);
    }
    let mut results = session_results("skips", &learner, outcome);
    let skips = learner.engine.coach().stats().skips;
    results.push(TestResult::check(
        "skips_used",
        skips as usize == landings.len() && skips >= 6,
        format!("{} skips, landed on {:?}", skips, landings),
    ));
    results
}

// ── 5. Save and resume ──────────────────────────────────────────────────

fn run_resume(config: &TutorialConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Save & Resume ---");
    let mut first = match Learner::new(config, SceneContext::Guided) {
        Ok(l) => l,
        Err(e) => return vec![TestResult::check("resume_start", false, e.to_string())],
    };
    if let Err(e) = first.run_to_finish() {
        return vec![TestResult::check("resume_first_run", false, e)];
    }

    let mut buffer = Vec::new();
    if let Err(e) = first.engine.save(&mut buffer) {
        return vec![TestResult::check("resume_save", false, e.to_string())];
    }

    let mut engine = TutorialEngine::new(config.clone());
    let resumed = engine
        .load(&buffer[..])
        .map_err(|e| e.to_string())
        .and_then(|context| engine.start_coaching(context).map_err(|e| e.to_string()));

    let coach = engine.coach();
    let mut results = vec![
        TestResult::check(
            "resume_loads",
            resumed.is_ok(),
            format!("{} byte save", buffer.len()),
        ),
        TestResult::check(
            "resume_skips_intro",
            coach.cursor() == 1 && coach.current_kind() == Some(GoalKind::TapSurface),
            format!(
                "resumed at step {} ({:?})",
                coach.cursor(),
                coach.current_kind()
            ),
        ),
        TestResult::check(
            "resume_not_yet_finished",
            !coach.all_goals_finished() && coach.finished_before(),
            "live flag cleared, saved flag kept".into(),
        ),
    ];

    let mut learner = Learner {
        engine,
        taps: 0,
        actions: 0,
    };
    let outcome = learner.run_to_finish();
    let stats = learner.engine.coach().stats();
    results.extend(session_results("resumed", &learner, outcome));
    results.push(TestResult::check(
        "resumed_finishes_once",
        stats.finishes == 1,
        format!("{:?}", stats),
    ));
    results
}
