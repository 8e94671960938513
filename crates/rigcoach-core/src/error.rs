//! Errors raised by the orchestrator and engine entry points.

use rigcoach_logic::goals::GoalKind;
use rigcoach_logic::parts::PartSlot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoachError {
    /// A transition was requested with no goal current.
    #[error("no current goal")]
    NoCurrentGoal,
    #[error("step {index} `{name}` ({kind:?}) has no skip action")]
    NoSkipHandler {
        index: usize,
        name: &'static str,
        kind: GoalKind,
    },
    /// A named scene object an armed goal depends on does not exist.
    #[error("scene object `{0}` not found")]
    MissingObject(String),
    #[error("{0} has not been placed")]
    MissingPart(PartSlot),
    #[error("only {connected} of {required} cables connected")]
    CablesIncomplete { connected: usize, required: usize },
    #[error("unknown cable `{0}`")]
    UnknownCable(String),
}
