//! Spawn gate: per-part placement counters and the rules that deny a spawn.
//!
//! Denial is an expected outcome, not a failure: the caller simply reports
//! `false` and raises no spawn event.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parts::PartType;

/// Why a spawn attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnDenied {
    #[error("{part:?} already spawned {cap} time(s)")]
    CapReached { part: PartType, cap: u32 },
    #[error("place button for {0:?} is not shown")]
    ButtonHidden(PartType),
}

/// Placement counters for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnGate {
    counters: [u32; PartType::COUNT],
    /// Multi-instance parts additionally need their place button visible.
    requires_button: bool,
}

impl SpawnGate {
    pub fn new(requires_button: bool) -> Self {
        Self {
            counters: [0; PartType::COUNT],
            requires_button,
        }
    }

    /// Check whether `part` may be spawned right now.
    pub fn check(&self, part: PartType, button_visible: bool) -> Result<(), SpawnDenied> {
        let cap = part.spawn_cap();
        if self.counters[part.index()] >= cap {
            return Err(SpawnDenied::CapReached { part, cap });
        }
        if self.requires_button && cap > 1 && !button_visible {
            return Err(SpawnDenied::ButtonHidden(part));
        }
        Ok(())
    }

    /// Count a successful spawn. Returns the instance number it occupies.
    pub fn record(&mut self, part: PartType) -> u8 {
        let slot = &mut self.counters[part.index()];
        let instance = *slot;
        *slot += 1;
        instance as u8
    }

    pub fn count(&self, part: PartType) -> u32 {
        self.counters[part.index()]
    }

    pub fn reset(&mut self) {
        self.counters = [0; PartType::COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cap_parts() {
        let mut gate = SpawnGate::new(false);
        assert!(gate.check(PartType::Motherboard, true).is_ok());
        assert_eq!(gate.record(PartType::Motherboard), 0);
        assert_eq!(
            gate.check(PartType::Motherboard, true),
            Err(SpawnDenied::CapReached {
                part: PartType::Motherboard,
                cap: 1
            })
        );
    }

    #[test]
    fn test_double_cap_parts() {
        let mut gate = SpawnGate::new(false);
        for expected in 0..2 {
            assert!(gate.check(PartType::Ram, true).is_ok());
            assert_eq!(gate.record(PartType::Ram), expected);
        }
        assert!(gate.check(PartType::Ram, true).is_err());
        assert_eq!(gate.count(PartType::Ram), 2);
    }

    #[test]
    fn test_button_requirement() {
        let gate = SpawnGate::new(true);
        assert_eq!(
            gate.check(PartType::Hdd, false),
            Err(SpawnDenied::ButtonHidden(PartType::Hdd))
        );
        assert!(gate.check(PartType::Hdd, true).is_ok());
        // Single-instance parts ignore the button.
        assert!(gate.check(PartType::Cpu, false).is_ok());

        let relaxed = SpawnGate::new(false);
        assert!(relaxed.check(PartType::Hdd, false).is_ok());
    }

    #[test]
    fn test_reset() {
        let mut gate = SpawnGate::new(false);
        gate.record(PartType::Gpu);
        gate.reset();
        assert_eq!(gate.count(PartType::Gpu), 0);
        assert!(gate.check(PartType::Gpu, false).is_ok());
    }
}
