//! Bilingual instruction cards shown on the step panel.

use serde::{Deserialize, Serialize};

/// Display language of the step panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Greek,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Self::English => Self::Greek,
            Self::Greek => Self::English,
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::English),
            1 => Some(Self::Greek),
            _ => None,
        }
    }
}

/// The same text in both supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bilingual {
    pub english: &'static str,
    pub greek: &'static str,
}

impl Bilingual {
    pub const fn new(english: &'static str, greek: &'static str) -> Self {
        Self { english, greek }
    }

    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::Greek => self.greek,
        }
    }
}

/// Heading plus instruction line for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCard {
    pub title: Bilingual,
    pub detail: Bilingual,
}

impl StepCard {
    pub const fn new(title: Bilingual, detail: Bilingual) -> Self {
        Self { title, detail }
    }
}

pub const EMPTY: Bilingual = Bilingual::new("", "");
pub const TAP_TO_PLACE: Bilingual = Bilingual::new("Tap to place", "Πάτα για τοποθέτηση");
pub const DRAG_TO_MOVE: Bilingual = Bilingual::new("Drag to move", "Σύρε για μετακίνηση");
pub const DRAG_TO_SCREW: Bilingual = Bilingual::new("Drag to screw", "Σύρε για βίδωμα");
pub const DRAG_TO_ROTATE: Bilingual = Bilingual::new("Drag to rotate", "Σύρε για περιστροφή");

pub const TOWER: Bilingual = Bilingual::new("Tower", "Πύργος");
pub const MOTHERBOARD: Bilingual = Bilingual::new("Motherboard", "Μητρική πλακέτα");
pub const CPU: Bilingual = Bilingual::new("CPU", "Επεξεργαστής");
pub const COOLER: Bilingual = Bilingual::new("Cooler", "Ψύκτρα");
pub const RAM: Bilingual = Bilingual::new("RAM", "Μνήμη RAM");
pub const HDD: Bilingual = Bilingual::new("HDD", "Σκληρός δίσκος");
pub const PSU: Bilingual = Bilingual::new("PSU", "Τροφοδοτικό");
pub const GPU: Bilingual = Bilingual::new("GPU", "Κάρτα γραφικών");
pub const DONE: Bilingual = Bilingual::new("Done!", "Τέλος!");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_toggle() {
        assert_eq!(Language::English.toggled(), Language::Greek);
        assert_eq!(Language::Greek.toggled().toggled(), Language::Greek);
        assert_eq!(Language::from_u8(1), Some(Language::Greek));
    }

    #[test]
    fn test_bilingual_lookup() {
        assert_eq!(CPU.get(Language::English), "CPU");
        assert_eq!(CPU.get(Language::Greek), "Επεξεργαστής");
    }
}
