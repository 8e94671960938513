//! Screw plans: the ordered holes a screwdriver visits for each part.

use crate::parts::PartType;

const MOTHERBOARD_HOLES: &[&str] = &[
    "hole1", "hole2", "hole3", "hole4", "hole5", "hole6", "hole7", "hole8", "hole9",
];
/// The cooler has four holes driven in two passes.
const COOLER_HOLES: &[&str] = &[
    "hole1", "hole2", "hole3", "hole4", "hole1", "hole2", "hole3", "hole4",
];
const PSU_HOLES: &[&str] = &["hole1", "hole2", "hole3", "hole4"];
const GPU_HOLES: &[&str] = &["hole_gpu"];

/// Static description of a screwing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrewPlan {
    pub part: PartType,
    /// Hole visited for each "screwed" signal, in order.
    pub holes: &'static [&'static str],
    /// Whether a finished screw is left behind in each hole.
    pub leaves_markers: bool,
}

impl ScrewPlan {
    pub fn for_part(part: PartType) -> Option<Self> {
        let (holes, leaves_markers) = match part {
            PartType::Motherboard => (MOTHERBOARD_HOLES, true),
            PartType::Cooler => (COOLER_HOLES, false),
            PartType::Psu => (PSU_HOLES, true),
            PartType::Gpu => (GPU_HOLES, true),
            _ => return None,
        };
        Some(Self {
            part,
            holes,
            leaves_markers,
        })
    }

    /// Number of "screwed" signals needed to finish.
    pub fn signals_required(&self) -> usize {
        self.holes.len()
    }

    pub fn first_hole(&self) -> &'static str {
        self.holes[0]
    }
}

/// What to do after a "screwed" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrewStep {
    /// Move the tool to this hole and wait for the next signal.
    MoveTo(&'static str),
    /// All holes driven.
    Done,
}

/// Runtime progress through a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrewProgress {
    pub plan: ScrewPlan,
    driven: usize,
}

impl ScrewProgress {
    pub fn new(plan: ScrewPlan) -> Self {
        Self { plan, driven: 0 }
    }

    /// Hole the tool currently sits at, if any remain.
    pub fn current_hole(&self) -> Option<&'static str> {
        self.plan.holes.get(self.driven).copied()
    }

    pub fn driven(&self) -> usize {
        self.driven
    }

    /// Record one driven screw and say where the tool goes next.
    pub fn on_screwed(&mut self) -> ScrewStep {
        if self.driven < self.plan.holes.len() {
            self.driven += 1;
        }
        match self.current_hole() {
            Some(hole) => ScrewStep::MoveTo(hole),
            None => ScrewStep::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_counts() {
        let counts: Vec<_> = [
            PartType::Motherboard,
            PartType::Cooler,
            PartType::Psu,
            PartType::Gpu,
        ]
        .iter()
        .map(|p| ScrewPlan::for_part(*p).map(|plan| plan.signals_required()))
        .collect();
        assert_eq!(counts, vec![Some(9), Some(8), Some(4), Some(1)]);
        assert!(ScrewPlan::for_part(PartType::Ram).is_none());
    }

    #[test]
    fn test_cooler_revisits_holes() {
        let mut progress = ScrewProgress::new(ScrewPlan::for_part(PartType::Cooler).unwrap());
        let mut visited = vec![progress.current_hole().unwrap()];
        while let ScrewStep::MoveTo(hole) = progress.on_screwed() {
            visited.push(hole);
        }
        assert_eq!(visited, COOLER_HOLES);
        assert_eq!(progress.driven(), 8);
        assert!(!progress.plan.leaves_markers);
    }

    #[test]
    fn test_penultimate_signal_does_not_finish() {
        let mut progress = ScrewProgress::new(ScrewPlan::for_part(PartType::Psu).unwrap());
        for _ in 0..3 {
            assert!(matches!(progress.on_screwed(), ScrewStep::MoveTo(_)));
        }
        assert_eq!(progress.on_screwed(), ScrewStep::Done);
        // Extra signals stay done.
        assert_eq!(progress.on_screwed(), ScrewStep::Done);
    }
}
