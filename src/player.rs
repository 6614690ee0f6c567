//! Tournament participants

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::errors::StrategyExecutionError;
use crate::strategy::{Move, StrategyFn};

/// Outcome of a player's most recent decision, for external display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Cooperated,
    Defected,
}

/// A tournament participant.
///
/// Score accumulates for the whole tournament; `choices` is the move
/// history of the current match only and empties exactly when a match
/// this player took part in concludes. The strategy can be swapped
/// between matches without touching anything else.
pub struct Player {
    name: String,
    score: u32,
    choices: Vec<Move>,
    state: PlayerState,
    strategy: StrategyFn,
    flagged: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: StrategyFn) -> Self {
        Self {
            name: name.into(),
            score: 0,
            choices: Vec::new(),
            state: PlayerState::Idle,
            strategy,
            flagged: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Own move history within the current match.
    pub fn choices(&self) -> &[Move] {
        &self.choices
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Whether this player's strategy has faulted during the run.
    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Replace the current strategy. The previous one is discarded.
    /// Must only be called between matches.
    pub fn set_strategy(&mut self, strategy: StrategyFn) {
        self.strategy = strategy;
    }

    /// Decide this round's move given the opponent's history so far.
    ///
    /// The strategy sees `(own_history, opponent_history)` as they stood
    /// before this round. The move is not appended here — the match
    /// runner appends both players' moves only after both have decided,
    /// which is what keeps the decisions simultaneous. A panicking
    /// strategy flags the player and surfaces as a typed error.
    pub fn decide(&mut self, opponent_history: &[Move]) -> Result<Move, StrategyExecutionError> {
        let round = self.choices.len() as u32;
        let outcome = {
            let choices = &self.choices;
            let strategy = &mut self.strategy;
            panic::catch_unwind(AssertUnwindSafe(|| strategy(choices, opponent_history)))
        };
        match outcome {
            Ok(mv) => {
                self.state = if mv.cooperates() {
                    PlayerState::Cooperated
                } else {
                    PlayerState::Defected
                };
                Ok(mv)
            }
            Err(payload) => {
                self.flagged = true;
                Err(StrategyExecutionError {
                    player: self.name.clone(),
                    round,
                    reason: panic_text(payload),
                })
            }
        }
    }

    /// Append a decided move to this player's match history.
    /// Owned by the match runner to control ordering.
    pub(crate) fn record_move(&mut self, mv: Move) {
        self.choices.push(mv);
    }

    /// Clear match-scoped state at a match boundary.
    pub fn reset_match_state(&mut self) {
        self.choices.clear();
        self.state = PlayerState::Idle;
    }

    /// Add a payoff to the tournament score. Scores never decrease.
    pub fn apply_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("score", &self.score)
            .field("choices", &self.choices)
            .field("state", &self.state)
            .field("flagged", &self.flagged)
            .finish_non_exhaustive()
    }
}

fn panic_text(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "strategy panicked".to_string()
    }
}
