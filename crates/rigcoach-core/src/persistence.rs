//! Save/Load of tutorial progress
//!
//! Only what must survive a restart is stored: whether onboarding was
//! finished once, the display language and the last scene context. The scene
//! itself is rebuilt from scratch by the next `start_coaching`.

use std::io::{Read, Write};

use rigcoach_logic::cards::Language;
use rigcoach_logic::sequence::SceneContext;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub all_goals_finished: bool,
    pub language: Language,
    pub context: SceneContext,
}

impl SaveData {
    pub fn new(all_goals_finished: bool, language: Language, context: SceneContext) -> Self {
        Self {
            version: SAVE_VERSION,
            all_goals_finished,
            language,
            context,
        }
    }
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

pub fn save_progress<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    bincode::serialize_into(writer, data)?;
    Ok(())
}

pub fn load_progress<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_other_versions() {
        let mut data = SaveData::new(true, Language::Greek, SceneContext::FreeBuild);
        data.version = SAVE_VERSION + 1;
        let mut buffer = Vec::new();
        save_progress(&mut buffer, &data).expect("Save failed");

        match load_progress(&buffer[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_save() {
        let data = SaveData::new(false, Language::English, SceneContext::Guided);
        let mut buffer = Vec::new();
        save_progress(&mut buffer, &data).expect("Save failed");
        buffer.truncate(2);
        assert!(matches!(load_progress(&buffer[..]), Err(SaveError::Bincode(_))));
    }
}
