//! Onboarding goals, the FIFO goal queue and each goal kind's completion
//! contract.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::parts::PartType;

/// Closed set of onboarding goal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalKind {
    /// Nothing to do; card display only.
    Empty,
    /// Scan for AR surfaces.
    FindSurfaces,
    /// Tap a surface to spawn the selected part.
    TapSurface,
    /// Show movement hints.
    Hints,
    /// Show scale and rotate hints.
    Scale,
    /// Instruction card dismissed by the user.
    Prompt,
    PlaceMotherboard,
    ScrewMotherboard,
    CpuLatch,
    RotateCpu,
    PlaceCpu,
    PlaceCooler,
    ScrewCooler,
    RotateRam,
    PlaceRam,
    PlaceHdd,
    PlacePsu,
    ScrewPsu,
    PlaceGpu,
    ScrewGpu,
    ChooseBuild,
}

/// Which configured duration a timed goal waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedWindow {
    FindSurfaces,
    Hints,
    Scale,
}

/// What the orchestrator arms for a goal and which signal completes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Pure card; completes only through a forced completion.
    Manual,
    /// Auto-advance after a window unless a press completes it first.
    Timed(TimedWindow),
    /// Completes once the spawner reports enough spawns.
    SpawnCount,
    /// Completes on the part's snap-to-target signal.
    Snap(PartType),
    /// Completes after the part's screw plan has been driven home.
    Screw(PartType),
    /// Completes a settle delay after the latch is touched.
    Latch,
    /// Completes on the part's snap-to-rotation signal.
    Rotate(PartType),
}

impl GoalKind {
    pub fn binding(self) -> Binding {
        match self {
            Self::Empty | Self::Prompt | Self::ChooseBuild => Binding::Manual,
            Self::FindSurfaces => Binding::Timed(TimedWindow::FindSurfaces),
            Self::Hints => Binding::Timed(TimedWindow::Hints),
            Self::Scale => Binding::Timed(TimedWindow::Scale),
            Self::TapSurface => Binding::SpawnCount,
            Self::PlaceMotherboard => Binding::Snap(PartType::Motherboard),
            Self::PlaceCpu => Binding::Snap(PartType::Cpu),
            Self::PlaceCooler => Binding::Snap(PartType::Cooler),
            Self::PlaceRam => Binding::Snap(PartType::Ram),
            Self::PlaceHdd => Binding::Snap(PartType::Hdd),
            Self::PlacePsu => Binding::Snap(PartType::Psu),
            Self::PlaceGpu => Binding::Snap(PartType::Gpu),
            Self::ScrewMotherboard => Binding::Screw(PartType::Motherboard),
            Self::ScrewCooler => Binding::Screw(PartType::Cooler),
            Self::ScrewPsu => Binding::Screw(PartType::Psu),
            Self::ScrewGpu => Binding::Screw(PartType::Gpu),
            Self::CpuLatch => Binding::Latch,
            Self::RotateCpu => Binding::Rotate(PartType::Cpu),
            Self::RotateRam => Binding::Rotate(PartType::Ram),
        }
    }

    /// Timed goals also complete early on any pointer press.
    pub fn is_timed(self) -> bool {
        matches!(self.binding(), Binding::Timed(_))
    }
}

/// One unit of onboarding progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub kind: GoalKind,
    pub completed: bool,
}

impl Goal {
    pub fn new(kind: GoalKind) -> Self {
        Self {
            kind,
            completed: false,
        }
    }
}

/// Outcome of advancing the queue past its current goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The next goal is now current.
    Next(GoalKind),
    /// The queue is exhausted.
    Finished,
}

/// Strict FIFO of goals, fully materialized at construction.
///
/// Goals are never re-enqueued; skipping simply advances past them. The
/// queue keeps consumed goals so callers can check that every enqueued goal
/// was eventually consumed.
#[derive(Debug, Clone, Default)]
pub struct GoalQueue {
    pending: VecDeque<Goal>,
    current: Option<Goal>,
    consumed: Vec<Goal>,
    enqueued: usize,
}

impl GoalQueue {
    /// Build the queue and make its first goal current.
    pub fn from_kinds<I: IntoIterator<Item = GoalKind>>(kinds: I) -> Self {
        let mut pending: VecDeque<Goal> = kinds.into_iter().map(Goal::new).collect();
        let enqueued = pending.len();
        let current = pending.pop_front();
        Self {
            pending,
            current,
            consumed: Vec::with_capacity(enqueued),
            enqueued,
        }
    }

    pub fn current(&self) -> Option<&Goal> {
        self.current.as_ref()
    }

    pub fn current_kind(&self) -> Option<GoalKind> {
        self.current.map(|g| g.kind)
    }

    /// Mark the current goal completed and dequeue the next one.
    ///
    /// Returns `None` when there is no current goal.
    pub fn advance(&mut self) -> Option<Advance> {
        let mut done = self.current.take()?;
        done.completed = true;
        self.consumed.push(done);

        match self.pending.pop_front() {
            Some(next) => {
                let kind = next.kind;
                self.current = Some(next);
                Some(Advance::Next(kind))
            }
            None => Some(Advance::Finished),
        }
    }

    /// Goals still waiting behind the current one.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn enqueued_len(&self) -> usize {
        self.enqueued
    }

    pub fn consumed(&self) -> &[Goal] {
        &self.consumed
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none() && self.enqueued > 0
    }

    /// Upcoming goal kinds, current first.
    pub fn kinds(&self) -> impl Iterator<Item = GoalKind> + '_ {
        self.current
            .iter()
            .chain(self.pending.iter())
            .map(|g| g.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_consumption() {
        let mut queue = GoalQueue::from_kinds([
            GoalKind::FindSurfaces,
            GoalKind::TapSurface,
            GoalKind::Prompt,
        ]);
        assert_eq!(queue.current_kind(), Some(GoalKind::FindSurfaces));
        assert_eq!(queue.remaining(), 2);

        assert_eq!(queue.advance(), Some(Advance::Next(GoalKind::TapSurface)));
        assert_eq!(queue.advance(), Some(Advance::Next(GoalKind::Prompt)));
        assert_eq!(queue.advance(), Some(Advance::Finished));
        assert_eq!(queue.advance(), None);

        assert!(queue.is_finished());
        assert_eq!(queue.consumed().len(), queue.enqueued_len());
        assert!(queue.consumed().iter().all(|g| g.completed));
    }

    #[test]
    fn test_empty_queue_has_no_current() {
        let mut queue = GoalQueue::from_kinds(std::iter::empty());
        assert!(queue.current().is_none());
        assert!(!queue.is_finished());
        assert_eq!(queue.advance(), None);
    }

    #[test]
    fn test_bindings() {
        assert!(GoalKind::FindSurfaces.is_timed());
        assert!(GoalKind::Hints.is_timed());
        assert!(GoalKind::Scale.is_timed());
        assert!(!GoalKind::Prompt.is_timed());
        assert_eq!(GoalKind::ScrewCooler.binding(), Binding::Screw(PartType::Cooler));
        assert_eq!(GoalKind::RotateRam.binding(), Binding::Rotate(PartType::Ram));
        assert_eq!(GoalKind::ChooseBuild.binding(), Binding::Manual);
    }
}
