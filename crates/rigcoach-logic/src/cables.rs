//! Cable checklist shown on the final guided card.

use serde::{Deserialize, Serialize};

/// Child objects of the tower, one per cable run.
pub const CABLES: [&str; 4] = ["cable_24pin", "cable_cpu", "cable_sata", "cable_pcie"];

/// Connected cables required before the continue button enables.
pub const REQUIRED_CONNECTIONS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableChecklist {
    connected: [bool; 4],
}

impl CableChecklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a cable's state. Returns the new state, or `None` for an unknown
    /// cable.
    pub fn toggle(&mut self, cable: &str) -> Option<bool> {
        let idx = CABLES.iter().position(|c| *c == cable)?;
        self.connected[idx] = !self.connected[idx];
        Some(self.connected[idx])
    }

    pub fn is_connected(&self, cable: &str) -> bool {
        CABLES
            .iter()
            .position(|c| *c == cable)
            .map(|idx| self.connected[idx])
            .unwrap_or(false)
    }

    pub fn connected_count(&self) -> usize {
        self.connected.iter().filter(|c| **c).count()
    }

    pub fn continue_enabled(&self) -> bool {
        self.connected_count() >= REQUIRED_CONNECTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_needs_all_cables() {
        let mut list = CableChecklist::new();
        for cable in &CABLES[..3] {
            assert_eq!(list.toggle(cable), Some(true));
        }
        assert!(!list.continue_enabled());
        list.toggle("cable_pcie");
        assert!(list.continue_enabled());

        // Disconnecting drops it again
        assert_eq!(list.toggle("cable_cpu"), Some(false));
        assert!(!list.continue_enabled());
        assert!(!list.is_connected("cable_cpu"));
    }

    #[test]
    fn test_unknown_cable() {
        let mut list = CableChecklist::new();
        assert_eq!(list.toggle("cable_usb"), None);
        assert_eq!(list.connected_count(), 0);
    }
}
