//! Declarative step tables for the two scene contexts.
//!
//! Every step names its goal kind, the part instance it works on, the card it
//! shows, the side effects applied when it becomes current and the action the
//! skip button performs. Steps are addressed by name, so the tables can be
//! edited without renumbering anything.

use serde::{Deserialize, Serialize};

use crate::cards::{self, Bilingual, StepCard};
use crate::goals::{Binding, GoalKind};
use crate::parts::{PartSlot, PartType};

/// Which of the two fixed goal sequences a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SceneContext {
    /// Step-by-step lesson with prompts and hints between actions.
    Guided = 1,
    /// Assemble a chosen build with minimal guidance.
    FreeBuild = 2,
}

impl SceneContext {
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            1 => Some(Self::Guided),
            2 => Some(Self::FreeBuild),
            _ => None,
        }
    }

    /// Whether multi-instance parts need their place button shown to spawn.
    pub fn gates_on_buttons(self) -> bool {
        matches!(self, Self::Guided)
    }
}

/// Side effect applied when a step becomes current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEffect {
    ShowPartButton(PartType),
    HidePartButton(PartType),
    /// Choose which part the next surface tap spawns.
    SelectSpawn(PartType),
    /// Enable the move sensor on a placed part.
    ArmDrag(PartSlot),
    /// Make the slot's placement ghost visible.
    RevealHint(PartSlot),
    /// Give the slot's ghost the snap tag (or clear it) so tag-targeted
    /// snapping picks the right bay.
    RetagHint { slot: PartSlot, tagged: bool },
    /// Drop the part to the height of its ghost before dragging.
    AlignHeightToHint(PartSlot),
    /// Re-show a part a previous snap hid.
    ActivatePart(PartSlot),
    /// Swap the skip button for the finish button.
    ShowFinish,
}

/// One manual step of a skip action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipOp {
    /// Move a placed part onto its ghost, optionally matching rotation.
    Teleport { slot: PartSlot, with_rotation: bool },
    /// Turn the slot's ghost into the placed part itself.
    Adopt(PartSlot),
    SelectSpawn(PartType),
}

/// How a skip action finishes after its ops ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipThen {
    /// Skip this many goals, then arm the goal landed on once.
    Advance(usize),
    /// Complete the current goal normally.
    Complete,
    /// Do nothing more; the armed sensor fires on the next tick.
    Stay,
}

/// What the skip button does on a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipAction {
    pub ops: Vec<SkipOp>,
    pub then: SkipThen,
}

impl SkipAction {
    pub fn new(ops: Vec<SkipOp>, then: SkipThen) -> Self {
        Self { ops, then }
    }
}

/// One row of a step table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    pub name: &'static str,
    pub kind: GoalKind,
    slot: Option<PartSlot>,
    pub card: Option<StepCard>,
    pub button_text: &'static str,
    pub effects: Vec<StepEffect>,
    pub skip: Option<SkipAction>,
    /// Dropped from the goal queue when resuming a finished session.
    pub intro_only: bool,
}

impl StepEntry {
    pub fn new(name: &'static str, kind: GoalKind) -> Self {
        let button_text = match kind {
            GoalKind::Prompt => "Continue",
            GoalKind::ChooseBuild => "Start",
            _ => "",
        };
        Self {
            name,
            kind,
            slot: None,
            card: None,
            button_text,
            effects: Vec::new(),
            skip: None,
            intro_only: false,
        }
    }

    fn slot(mut self, slot: PartSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    fn card(mut self, title: Bilingual, detail: Bilingual) -> Self {
        self.card = Some(StepCard::new(title, detail));
        self
    }

    fn effects(mut self, effects: Vec<StepEffect>) -> Self {
        self.effects = effects;
        self
    }

    fn skip(mut self, ops: Vec<SkipOp>, then: SkipThen) -> Self {
        self.skip = Some(SkipAction::new(ops, then));
        self
    }

    fn intro(mut self) -> Self {
        self.intro_only = true;
        self
    }

    pub fn include_skip_button(&self) -> bool {
        self.skip.is_some()
    }

    /// Part instance the step's sensors operate on.
    ///
    /// Defaults to the first instance of the part named by the goal kind.
    pub fn target_slot(&self) -> Option<PartSlot> {
        self.slot.or_else(|| match self.kind.binding() {
            Binding::Snap(part) | Binding::Screw(part) | Binding::Rotate(part) => {
                Some(PartSlot::first(part))
            }
            Binding::Latch => Some(PartSlot::first(PartType::Motherboard)),
            _ => None,
        })
    }
}

/// Ordered steps for one scene context.
#[derive(Debug, Clone)]
pub struct StepTable {
    pub context: SceneContext,
    pub entries: Vec<StepEntry>,
}

impl StepTable {
    pub fn for_context(context: SceneContext) -> Self {
        let entries = match context {
            SceneContext::Guided => guided_steps(),
            SceneContext::FreeBuild => free_build_steps(),
        };
        Self { context, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Cursor value a session starts at.
    ///
    /// Resumed sessions start past the intro-only steps at the front.
    pub fn start_index(&self, resume: bool) -> usize {
        if !resume {
            return 0;
        }
        self.entries.iter().take_while(|e| e.intro_only).count()
    }

    /// Goal kinds to enqueue, aligned with the entries from `start_index`.
    pub fn goal_kinds(&self, resume: bool) -> Vec<GoalKind> {
        self.entries[self.start_index(resume)..]
            .iter()
            .map(|e| e.kind)
            .collect()
    }
}

fn prompts<'a>(names: &'a [&'static str]) -> impl Iterator<Item = StepEntry> + 'a {
    names.iter().map(|name| StepEntry::new(name, GoalKind::Prompt))
}

fn hint_effects(slot: PartSlot) -> Vec<StepEffect> {
    vec![StepEffect::ArmDrag(slot), StepEffect::RevealHint(slot)]
}

fn tagged_hint_effects(slot: PartSlot) -> Vec<StepEffect> {
    vec![
        StepEffect::ArmDrag(slot),
        StepEffect::RetagHint { slot, tagged: true },
        StepEffect::RevealHint(slot),
    ]
}

/// The guided lesson: prompts, hints and hands-on steps for every part.
pub fn guided_steps() -> Vec<StepEntry> {
    use GoalKind::*;
    use PartType as P;
    use StepEffect as E;

    let mobo = PartSlot::first(P::Motherboard);
    let cpu = PartSlot::first(P::Cpu);
    let cooler = PartSlot::first(P::Cooler);
    let ram1 = PartSlot::first(P::Ram);
    let ram2 = PartSlot::second(P::Ram);
    let hdd1 = PartSlot::first(P::Hdd);
    let hdd2 = PartSlot::second(P::Hdd);
    let psu = PartSlot::first(P::Psu);
    let gpu = PartSlot::first(P::Gpu);

    let mut steps = vec![
        StepEntry::new("find_surfaces", FindSurfaces).intro(),
        StepEntry::new("tower.tap", TapSurface).effects(vec![E::SelectSpawn(P::Tower)]),
        StepEntry::new("motherboard.tap", TapSurface),
    ];

    steps.extend(prompts(&[
        "motherboard.prompt.1",
        "motherboard.prompt.2",
        "motherboard.prompt.3",
        "motherboard.prompt.4",
    ]));
    steps.extend([
        StepEntry::new("motherboard.hint", Hints).effects(hint_effects(mobo)),
        StepEntry::new("motherboard.place", PlaceMotherboard),
        StepEntry::new("motherboard.screw_intro", Prompt),
        StepEntry::new("motherboard.screw", ScrewMotherboard),
        StepEntry::new("motherboard.done", Prompt),
    ]);

    steps.extend(prompts(&[
        "cpu.prompt.1",
        "cpu.prompt.2",
        "cpu.prompt.3",
        "cpu.prompt.4",
    ]));
    steps.extend([
        StepEntry::new("cpu.latch_open", CpuLatch),
        StepEntry::new("cpu.prompt.5", Prompt),
        StepEntry::new("cpu.tap", TapSurface).effects(vec![E::ShowPartButton(P::Cpu)]),
        StepEntry::new("cpu.rotate_hint", Hints),
        StepEntry::new("cpu.rotate", RotateCpu),
        StepEntry::new("cpu.move_hint", Hints).effects(hint_effects(cpu)),
        StepEntry::new("cpu.place", PlaceCpu),
        StepEntry::new("cpu.prompt.6", Prompt),
        StepEntry::new("cpu.latch_close", CpuLatch),
    ]);

    steps.extend(prompts(&[
        "cooler.prompt.1",
        "cooler.prompt.2",
        "cooler.prompt.3",
        "cooler.prompt.4",
    ]));
    steps.extend([
        StepEntry::new("cooler.tap", TapSurface).effects(vec![E::ShowPartButton(P::Cooler)]),
        StepEntry::new("cooler.hint", Hints).effects(hint_effects(cooler)),
        StepEntry::new("cooler.place", PlaceCooler),
        StepEntry::new("cooler.screw_intro", Prompt),
        StepEntry::new("cooler.screw", ScrewCooler),
        StepEntry::new("cooler.done", Prompt),
    ]);

    steps.extend(prompts(&[
        "ram.prompt.1",
        "ram.prompt.2",
        "ram.prompt.3",
        "ram.prompt.4",
        "ram.prompt.5",
    ]));
    let ram_names = [
        (
            ["ram1.tap", "ram1.rotate_hint", "ram1.rotate", "ram1.move_hint", "ram1.place"],
            ram1,
        ),
        (
            ["ram2.tap", "ram2.rotate_hint", "ram2.rotate", "ram2.move_hint", "ram2.place"],
            ram2,
        ),
    ];
    for ([tap, rotate_hint, rotate, move_hint, place], slot) in ram_names {
        steps.extend([
            StepEntry::new(tap, TapSurface).effects(vec![E::ShowPartButton(P::Ram)]),
            StepEntry::new(rotate_hint, Hints).effects(vec![E::HidePartButton(P::Ram)]),
            StepEntry::new(rotate, RotateRam).slot(slot),
            StepEntry::new(move_hint, Hints).effects(tagged_hint_effects(slot)),
            StepEntry::new(place, PlaceRam).slot(slot),
        ]);
    }
    steps.push(StepEntry::new("ram.done", Prompt));

    steps.extend(prompts(&["hdd.prompt.1", "hdd.prompt.2"]));
    steps.extend([
        StepEntry::new("hdd1.tap", TapSurface).effects(vec![E::ShowPartButton(P::Hdd)]),
        StepEntry::new("hdd1.hint", Hints).effects({
            let mut effects = tagged_hint_effects(hdd1);
            effects.push(E::HidePartButton(P::Hdd));
            effects
        }),
        StepEntry::new("hdd1.place", PlaceHdd).slot(hdd1),
        StepEntry::new("hdd2.tap", TapSurface).effects(vec![E::ShowPartButton(P::Hdd)]),
        StepEntry::new("hdd2.hint", Hints).effects({
            let mut effects = vec![E::AlignHeightToHint(hdd2)];
            effects.extend(tagged_hint_effects(hdd2));
            effects.push(E::HidePartButton(P::Hdd));
            effects
        }),
        StepEntry::new("hdd2.place", PlaceHdd).slot(hdd2),
        StepEntry::new("hdd.done", Prompt),
    ]);

    steps.extend(prompts(&[
        "psu.prompt.1",
        "psu.prompt.2",
        "psu.prompt.3",
        "psu.prompt.4",
        "psu.prompt.5",
    ]));
    steps.extend([
        StepEntry::new("psu.tap", TapSurface).effects(vec![E::ShowPartButton(P::Psu)]),
        StepEntry::new("psu.hint", Hints).effects(hint_effects(psu)),
        StepEntry::new("psu.place", PlacePsu),
        StepEntry::new("psu.screw", ScrewPsu),
        StepEntry::new("psu.done", Prompt),
    ]);

    steps.extend(prompts(&[
        "gpu.prompt.1",
        "gpu.prompt.2",
        "gpu.prompt.3",
        "gpu.prompt.4",
    ]));
    steps.extend([
        StepEntry::new("gpu.tap", TapSurface).effects(vec![E::ShowPartButton(P::Gpu)]),
        StepEntry::new("gpu.hint", Hints).effects(hint_effects(gpu)),
        StepEntry::new("gpu.place", PlaceGpu),
        StepEntry::new("gpu.screw_intro", Prompt),
        StepEntry::new("gpu.screw", ScrewGpu),
        StepEntry::new("gpu.done", Prompt),
    ]);

    steps.push(StepEntry::new("cables.connect", Prompt));
    steps
}

const RAM_FIRST: Bilingual = Bilingual::new("Tap to place (first)", "Πάτα για τοποθέτηση (πρώτη)");
const RAM_SECOND: Bilingual =
    Bilingual::new("Tap to place (second)", "Πάτα για τοποθέτηση (δεύτερη)");
const HDD_FIRST: Bilingual =
    Bilingual::new("Tap to place (first)", "Πάτα για τοποθέτηση (πρώτος)");
const HDD_SECOND: Bilingual =
    Bilingual::new("Tap to place (second)", "Πάτα για τοποθέτηση (δεύτερος)");

/// The free-build run: one hands-on step per action, each skippable.
pub fn free_build_steps() -> Vec<StepEntry> {
    use cards::*;
    use GoalKind::*;
    use PartType as P;
    use SkipOp as S;
    use SkipThen::*;
    use StepEffect as E;

    let mobo = PartSlot::first(P::Motherboard);
    let cpu = PartSlot::first(P::Cpu);
    let cooler = PartSlot::first(P::Cooler);
    let ram1 = PartSlot::first(P::Ram);
    let ram2 = PartSlot::second(P::Ram);
    let hdd1 = PartSlot::first(P::Hdd);
    let hdd2 = PartSlot::second(P::Hdd);
    let psu = PartSlot::first(P::Psu);
    let gpu = PartSlot::first(P::Gpu);

    let teleport = |slot| S::Teleport {
        slot,
        with_rotation: false,
    };
    let teleport_rotated = |slot| S::Teleport {
        slot,
        with_rotation: true,
    };
    let retag = |slot, tagged| E::RetagHint { slot, tagged };

    vec![
        StepEntry::new("build.choose", ChooseBuild),
        StepEntry::new("tower.tap", TapSurface)
            .card(TOWER, TAP_TO_PLACE)
            .effects(vec![E::SelectSpawn(P::Tower)]),
        StepEntry::new("motherboard.tap", TapSurface)
            .card(MOTHERBOARD, TAP_TO_PLACE)
            .effects(vec![E::SelectSpawn(P::Motherboard)])
            .skip(vec![S::Adopt(mobo), S::SelectSpawn(P::Tower)], Advance(3)),
        StepEntry::new("motherboard.place", PlaceMotherboard)
            .card(MOTHERBOARD, DRAG_TO_MOVE)
            .skip(vec![teleport(mobo)], Advance(0)),
        StepEntry::new("motherboard.screw", ScrewMotherboard)
            .card(MOTHERBOARD, DRAG_TO_SCREW)
            .skip(vec![], Complete),
        StepEntry::new("cpu.tap", TapSurface)
            .card(CPU, TAP_TO_PLACE)
            .effects(vec![E::ActivatePart(mobo), E::SelectSpawn(P::Cpu)])
            .skip(vec![S::Adopt(cpu), S::SelectSpawn(P::Tower)], Advance(2)),
        StepEntry::new("cpu.rotate", RotateCpu)
            .card(CPU, DRAG_TO_ROTATE)
            .skip(vec![teleport_rotated(cpu)], Stay),
        StepEntry::new("cpu.place", PlaceCpu)
            .card(CPU, DRAG_TO_MOVE)
            .skip(vec![teleport(cpu)], Stay),
        StepEntry::new("cooler.tap", TapSurface)
            .card(COOLER, TAP_TO_PLACE)
            .effects(vec![E::ActivatePart(cpu), E::SelectSpawn(P::Cooler)])
            .skip(vec![S::Adopt(cooler), S::SelectSpawn(P::Tower)], Advance(3)),
        StepEntry::new("cooler.place", PlaceCooler)
            .card(COOLER, DRAG_TO_MOVE)
            .skip(vec![teleport(cooler)], Complete),
        StepEntry::new("cooler.screw", ScrewCooler)
            .card(COOLER, DRAG_TO_SCREW)
            .skip(vec![], Complete),
        StepEntry::new("ram1.tap", TapSurface)
            .card(RAM, RAM_FIRST)
            .effects(vec![
                E::SelectSpawn(P::Ram),
                E::ActivatePart(cooler),
                retag(ram1, true),
                retag(ram2, false),
            ])
            .skip(vec![S::Adopt(ram1), S::Adopt(ram2)], Advance(6)),
        StepEntry::new("ram1.rotate", RotateRam)
            .slot(ram1)
            .card(RAM, DRAG_TO_ROTATE)
            .effects(vec![E::SelectSpawn(P::Tower)])
            .skip(vec![teleport_rotated(ram1), S::Adopt(ram2)], Advance(3)),
        StepEntry::new("ram1.place", PlaceRam)
            .slot(ram1)
            .card(RAM, DRAG_TO_MOVE)
            .skip(vec![teleport(ram1), S::Adopt(ram2)], Advance(3)),
        StepEntry::new("ram2.tap", TapSurface)
            .card(RAM, RAM_SECOND)
            .effects(vec![
                E::SelectSpawn(P::Ram),
                retag(ram1, false),
                retag(ram2, true),
            ])
            .skip(vec![S::Adopt(ram2)], Advance(3)),
        StepEntry::new("ram2.rotate", RotateRam)
            .slot(ram2)
            .card(RAM, DRAG_TO_ROTATE)
            .effects(vec![E::SelectSpawn(P::Tower)])
            .skip(vec![teleport_rotated(ram2)], Stay),
        StepEntry::new("ram2.place", PlaceRam)
            .slot(ram2)
            .card(RAM, DRAG_TO_MOVE)
            .skip(vec![teleport(ram2)], Stay),
        StepEntry::new("hdd1.tap", TapSurface)
            .card(HDD, HDD_FIRST)
            .effects(vec![
                E::ActivatePart(ram1),
                E::ActivatePart(ram2),
                E::SelectSpawn(P::Hdd),
                retag(hdd1, true),
                retag(hdd2, false),
            ])
            .skip(vec![S::Adopt(hdd1), S::Adopt(hdd2)], Advance(4)),
        StepEntry::new("hdd1.place", PlaceHdd)
            .slot(hdd1)
            .card(HDD, DRAG_TO_MOVE)
            .effects(vec![E::SelectSpawn(P::Tower)])
            .skip(vec![teleport(hdd1), S::Adopt(hdd2)], Advance(2)),
        StepEntry::new("hdd2.tap", TapSurface)
            .card(HDD, HDD_SECOND)
            .effects(vec![
                E::SelectSpawn(P::Hdd),
                retag(hdd1, false),
                retag(hdd2, true),
            ])
            .skip(vec![S::Adopt(hdd2)], Advance(2)),
        StepEntry::new("hdd2.place", PlaceHdd)
            .slot(hdd2)
            .card(HDD, DRAG_TO_MOVE)
            .effects(vec![E::SelectSpawn(P::Tower)])
            .skip(vec![teleport(hdd2)], Stay),
        StepEntry::new("psu.tap", TapSurface)
            .card(PSU, TAP_TO_PLACE)
            .effects(vec![
                E::ActivatePart(hdd1),
                E::ActivatePart(hdd2),
                E::SelectSpawn(P::Psu),
            ])
            .skip(vec![S::Adopt(psu)], Advance(3)),
        StepEntry::new("psu.place", PlacePsu)
            .card(PSU, DRAG_TO_MOVE)
            .effects(vec![E::SelectSpawn(P::Tower)])
            .skip(vec![teleport(psu)], Advance(1)),
        StepEntry::new("psu.screw", ScrewPsu)
            .card(PSU, DRAG_TO_SCREW)
            .skip(vec![], Complete),
        StepEntry::new("gpu.tap", TapSurface)
            .card(GPU, TAP_TO_PLACE)
            .effects(vec![E::ActivatePart(psu), E::SelectSpawn(P::Gpu)])
            .skip(vec![S::Adopt(gpu)], Advance(3)),
        StepEntry::new("gpu.place", PlaceGpu)
            .card(GPU, DRAG_TO_MOVE)
            .effects(vec![E::SelectSpawn(P::Tower)])
            .skip(vec![teleport(gpu)], Advance(1)),
        StepEntry::new("gpu.screw", ScrewGpu)
            .card(GPU, DRAG_TO_SCREW)
            .skip(vec![], Complete),
        StepEntry::new("build.done", ChooseBuild)
            .card(DONE, EMPTY)
            .effects(vec![
                E::SelectSpawn(P::Tower),
                E::ActivatePart(gpu),
                E::ShowFinish,
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(StepTable::for_context(SceneContext::Guided).len(), 81);
        assert_eq!(StepTable::for_context(SceneContext::FreeBuild).len(), 28);
    }

    #[test]
    fn test_resume_drops_intro() {
        let guided = StepTable::for_context(SceneContext::Guided);
        assert_eq!(guided.start_index(false), 0);
        assert_eq!(guided.start_index(true), 1);
        assert_eq!(guided.goal_kinds(true).len(), guided.len() - 1);
        assert_eq!(guided.goal_kinds(false)[0], GoalKind::FindSurfaces);
        assert_eq!(guided.goal_kinds(true)[0], GoalKind::TapSurface);

        let free = StepTable::for_context(SceneContext::FreeBuild);
        assert_eq!(free.start_index(true), 0);
        assert_eq!(free.goal_kinds(true).len(), free.len());
    }

    #[test]
    fn test_names_are_unique() {
        for context in [SceneContext::Guided, SceneContext::FreeBuild] {
            let table = StepTable::for_context(context);
            let mut names: Vec<_> = table.entries.iter().map(|e| e.name).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate step name in {:?}", context);
        }
    }

    #[test]
    fn test_target_slot_defaults() {
        let table = StepTable::for_context(SceneContext::Guided);
        let place_ram2 = &table.entries[table.position("ram2.place").unwrap()];
        assert_eq!(place_ram2.target_slot(), Some(PartSlot::second(PartType::Ram)));
        let latch = &table.entries[table.position("cpu.latch_open").unwrap()];
        assert_eq!(
            latch.target_slot(),
            Some(PartSlot::first(PartType::Motherboard))
        );
        let prompt = &table.entries[table.position("cpu.prompt.1").unwrap()];
        assert_eq!(prompt.target_slot(), None);
    }

    #[test]
    fn test_context_ids() {
        assert_eq!(SceneContext::from_u8(1), Some(SceneContext::Guided));
        assert_eq!(SceneContext::from_u8(2), Some(SceneContext::FreeBuild));
        assert_eq!(SceneContext::from_u8(0), None);
        assert!(SceneContext::Guided.gates_on_buttons());
        assert!(!SceneContext::FreeBuild.gates_on_buttons());
    }
}
