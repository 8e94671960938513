//! Tunable tutorial constants, loadable from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::goals::TimedWindow;
use crate::parts::PartType;

/// Configuration rejected at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed tutorial config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duration `{name}` must be positive, got {value}")]
    NonPositiveDuration { name: &'static str, value: f32 },
    #[error("tap threshold must be at least 1")]
    ZeroTapThreshold,
    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

/// Distance the screwdriver hovers above each hole, per screwed part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Standoffs {
    pub motherboard: f32,
    pub cooler: f32,
    pub psu: f32,
    pub gpu: f32,
}

impl Default for Standoffs {
    fn default() -> Self {
        Self {
            motherboard: 0.185,
            cooler: 0.175,
            psu: 0.18,
            gpu: 0.18,
        }
    }
}

impl Standoffs {
    pub fn for_part(&self, part: PartType) -> f32 {
        match part {
            PartType::Cooler => self.cooler,
            PartType::Psu => self.psu,
            PartType::Gpu => self.gpu,
            _ => self.motherboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    /// Seconds before the surface-scan card moves on by itself.
    pub find_surfaces_secs: f32,
    pub hints_secs: f32,
    pub scale_secs: f32,
    /// Pause between touching the CPU latch and completing the goal.
    pub latch_settle_secs: f32,
    /// Spawns a TapSurface goal waits for.
    pub tap_threshold: u32,
    pub snap_distance: f32,
    /// Degrees of slack a rotation snap accepts.
    pub rotation_tolerance_deg: f32,
    pub drag_speed: f32,
    /// Screwdriver turns needed to drive one screw.
    pub screw_turns_per_hole: u32,
    pub standoffs: Standoffs,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            find_surfaces_secs: 5.0,
            hints_secs: 6.0,
            scale_secs: 8.0,
            latch_settle_secs: 0.8,
            tap_threshold: 1,
            snap_distance: 0.1,
            rotation_tolerance_deg: 5.0,
            drag_speed: 1.0,
            screw_turns_per_hole: 1,
            standoffs: Standoffs::default(),
        }
    }
}

impl TutorialConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("find_surfaces_secs", self.find_surfaces_secs),
            ("hints_secs", self.hints_secs),
            ("scale_secs", self.scale_secs),
            ("latch_settle_secs", self.latch_settle_secs),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }
        if self.tap_threshold == 0 {
            return Err(ConfigError::ZeroTapThreshold);
        }
        for (name, value) in [
            ("snap_distance", self.snap_distance),
            ("rotation_tolerance_deg", self.rotation_tolerance_deg),
            ("drag_speed", self.drag_speed),
            ("screw_turns_per_hole", self.screw_turns_per_hole as f32),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }

    pub fn window_secs(&self, window: TimedWindow) -> f32 {
        match window {
            TimedWindow::FindSurfaces => self.find_surfaces_secs,
            TimedWindow::Hints => self.hints_secs,
            TimedWindow::Scale => self.scale_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let config = TutorialConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_secs(TimedWindow::Hints), 6.0);
        assert_eq!(config.standoffs.for_part(PartType::Cooler), 0.175);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TutorialConfig::from_json(r#"{ "hints_secs": 3.5 }"#).unwrap();
        assert_eq!(config.hints_secs, 3.5);
        assert_eq!(config.find_surfaces_secs, 5.0);
        assert_eq!(config.tap_threshold, 1);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            TutorialConfig::from_json(r#"{ "scale_secs": 0 }"#),
            Err(ConfigError::NonPositiveDuration { name: "scale_secs", .. })
        ));
        assert!(matches!(
            TutorialConfig::from_json(r#"{ "tap_threshold": 0 }"#),
            Err(ConfigError::ZeroTapThreshold)
        ));
        assert!(matches!(
            TutorialConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
