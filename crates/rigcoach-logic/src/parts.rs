//! PC part catalogue: part types, instance slots and their hint objects.
//!
//! Part type ids double as spawner option indices, so the order of the
//! enum is load-bearing.

use serde::{Deserialize, Serialize};

/// A spawnable PC part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PartType {
    /// Computer case. Hosts the motherboard, drive bays, PSU and GPU hints.
    Tower = 0,
    Motherboard = 1,
    Cpu = 2,
    Cooler = 3,
    Ram = 4,
    Hdd = 5,
    Psu = 6,
    Gpu = 7,
}

impl PartType {
    pub const COUNT: usize = 8;

    pub fn all() -> [PartType; Self::COUNT] {
        [
            Self::Tower,
            Self::Motherboard,
            Self::Cpu,
            Self::Cooler,
            Self::Ram,
            Self::Hdd,
            Self::Psu,
            Self::Gpu,
        ]
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Tower),
            1 => Some(Self::Motherboard),
            2 => Some(Self::Cpu),
            3 => Some(Self::Cooler),
            4 => Some(Self::Ram),
            5 => Some(Self::Hdd),
            6 => Some(Self::Psu),
            7 => Some(Self::Gpu),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// How many instances of this part may be spawned per session.
    pub fn spawn_cap(self) -> u32 {
        match self {
            Self::Ram | Self::Hdd => 2,
            _ => 1,
        }
    }

    /// Scene tag carried by spawned instances of this part.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Tower => "ComputerCase",
            Self::Motherboard => "Motherboard",
            Self::Cpu => "CPU",
            Self::Cooler => "Cooler",
            Self::Ram => "RAM",
            Self::Hdd => "HDD",
            Self::Psu => "PSU",
            Self::Gpu => "GPU",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Tower => "Tower",
            Self::Motherboard => "Motherboard",
            Self::Cpu => "CPU",
            Self::Cooler => "Cooler",
            Self::Ram => "RAM",
            Self::Hdd => "HDD",
            Self::Psu => "PSU",
            Self::Gpu => "GPU",
        }
    }

    /// The part whose body carries this part's placement hints.
    ///
    /// Socketed parts hang off the motherboard; bay parts off the tower.
    pub fn hint_host(self) -> Option<PartType> {
        match self {
            Self::Tower => None,
            Self::Cpu | Self::Cooler | Self::Ram => Some(Self::Motherboard),
            Self::Motherboard | Self::Hdd | Self::Psu | Self::Gpu => Some(Self::Tower),
        }
    }

    /// Name of the ghost object marking where instance `instance` goes.
    pub fn hint_name(self, instance: u8) -> Option<&'static str> {
        match (self, instance) {
            (Self::Motherboard, 0) => Some("hintMobo"),
            (Self::Cpu, 0) => Some("hint_cpu"),
            (Self::Cooler, 0) => Some("hint_cooler"),
            (Self::Ram, 0) => Some("hint_ram1"),
            (Self::Ram, 1) => Some("hint_ram2"),
            (Self::Hdd, 0) => Some("hint_hdd1"),
            (Self::Hdd, 1) => Some("hint_hdd2"),
            (Self::Psu, 0) => Some("hint_psu"),
            (Self::Gpu, 0) => Some("hint_gpu"),
            _ => None,
        }
    }

    /// Tag a hint must carry to be picked up by a tag-targeted snap sensor.
    ///
    /// Parts with two bays pick their target by tag so the active bay can be
    /// switched by retagging.
    pub fn hint_tag(self) -> Option<&'static str> {
        match self {
            Self::Ram => Some("hint_ram"),
            Self::Hdd => Some("hint_hdd"),
            _ => None,
        }
    }
}

/// One concrete instance of a part: the first or second RAM stick, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartSlot {
    pub part: PartType,
    pub instance: u8,
}

impl PartSlot {
    pub const fn new(part: PartType, instance: u8) -> Self {
        Self { part, instance }
    }

    pub const fn first(part: PartType) -> Self {
        Self::new(part, 0)
    }

    pub const fn second(part: PartType) -> Self {
        Self::new(part, 1)
    }

    pub fn hint_name(&self) -> Option<&'static str> {
        self.part.hint_name(self.instance)
    }
}

impl std::fmt::Display for PartSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.part.spawn_cap() > 1 {
            write!(f, "{} #{}", self.part.display_name(), self.instance + 1)
        } else {
            write!(f, "{}", self.part.display_name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip() {
        for part in PartType::all() {
            assert_eq!(PartType::from_u8(part as u8), Some(part));
        }
        assert_eq!(PartType::from_u8(8), None);
    }

    #[test]
    fn test_caps() {
        assert_eq!(PartType::Ram.spawn_cap(), 2);
        assert_eq!(PartType::Hdd.spawn_cap(), 2);
        assert_eq!(PartType::Motherboard.spawn_cap(), 1);
        assert_eq!(PartType::Tower.spawn_cap(), 1);
    }

    #[test]
    fn test_every_slot_has_a_host_and_hint() {
        for part in PartType::all().into_iter().skip(1) {
            assert!(part.hint_host().is_some(), "{:?} has no host", part);
            for instance in 0..part.spawn_cap() as u8 {
                assert!(PartSlot::new(part, instance).hint_name().is_some());
            }
        }
        assert_eq!(PartSlot::new(PartType::Cpu, 1).hint_name(), None);
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(PartSlot::second(PartType::Ram).to_string(), "RAM #2");
        assert_eq!(PartSlot::first(PartType::Gpu).to_string(), "GPU");
    }
}
