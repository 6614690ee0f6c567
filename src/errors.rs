//! Typed error taxonomy
//!
//! Every failure surfaces as a structured error to the caller; the
//! engine never exits the process on its own.

use thiserror::Error;

/// A strategy resource was found but could not be turned into a
/// strategy. A missing resource is not an error (the loader falls back
/// to the default random strategy); a broken one must not be allowed to
/// silently degrade to random play.
#[derive(Error, Debug)]
pub enum StrategyLoadError {
    #[error("strategy resource for player {name} is unreadable: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("strategy resource for player {name} is malformed: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StrategyLoadError {
    /// The player whose resource failed to load.
    pub fn player(&self) -> &str {
        match self {
            StrategyLoadError::Io { name, .. } | StrategyLoadError::Parse { name, .. } => name,
        }
    }
}

/// A strategy panicked while deciding a move.
///
/// Fatal to the in-progress match (no payoffs for the unfinished
/// round), non-fatal to the tournament; the offending player stays
/// flagged. The panic is never papered over with a substitute move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("strategy of player {player} failed in round {round}: {reason}")]
pub struct StrategyExecutionError {
    pub player: String,
    pub round: u32,
    pub reason: String,
}

/// Defensive: the schedule was asked for a match past the end.
/// Unreachable when the driver iterates `0..match_count(n)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule exhausted: match index {index} out of {total}")]
    Exhausted { index: usize, total: usize },
}

/// Driver-level failures of a tournament run.
#[derive(Error, Debug)]
pub enum TournamentError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
