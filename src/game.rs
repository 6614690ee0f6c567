//! Match execution engine

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::cancel::CancelToken;
use crate::errors::StrategyExecutionError;
use crate::payoff;
use crate::player::{Player, PlayerState};
use crate::strategy::Move;

/// Rounds per match unless the caller configures otherwise.
pub const DEFAULT_ROUNDS_PER_MATCH: u32 = 30;

/// One completed round, for replay and display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub move_a: Move,
    pub move_b: Move,
    pub delta_a: u32,
    pub delta_b: u32,
    /// Running totals within this match.
    pub total_a: u32,
    pub total_b: u32,
}

/// Record of one match between two players.
///
/// `completed` is false when cancellation stopped the match early; the
/// payoffs of the rounds that did run are already on the players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player_a: String,
    pub player_b: String,
    pub rounds: Vec<RoundRecord>,
    pub score_a: u32,
    pub score_b: u32,
    pub completed: bool,
}

impl MatchRecord {
    fn new(player_a: &str, player_b: &str, rounds: u32) -> Self {
        Self {
            player_a: player_a.to_string(),
            player_b: player_b.to_string(),
            rounds: Vec::with_capacity(rounds as usize),
            score_a: 0,
            score_b: 0,
            completed: false,
        }
    }
}

/// Everything the rendering collaborator needs after a round.
#[derive(Clone, Copy, Debug)]
pub struct RoundView<'a> {
    pub round: u32,
    pub name_a: &'a str,
    pub name_b: &'a str,
    pub choices_a: &'a [Move],
    pub choices_b: &'a [Move],
    pub state_a: PlayerState,
    pub state_b: PlayerState,
    pub score_a: u32,
    pub score_b: u32,
}

/// Per-round notification hook, in the spirit of a match historian.
/// The engine calls it after both moves and payoffs of a round have
/// been applied.
pub trait RoundObserver {
    fn on_round(&mut self, view: &RoundView<'_>);
}

/// Observer that ignores everything.
pub struct NullObserver;

impl RoundObserver for NullObserver {
    fn on_round(&mut self, _view: &RoundView<'_>) {}
}

/// Adapter turning a closure into a [`RoundObserver`].
pub struct FnObserver<F>(pub F);

impl<F> RoundObserver for FnObserver<F>
where
    F: FnMut(&RoundView<'_>),
{
    fn on_round(&mut self, view: &RoundView<'_>) {
        (self.0)(view);
    }
}

/// Run a fixed-round match between two players.
///
/// Each round both players decide against the histories as they stood
/// before the round; only after both moves are known are the histories
/// appended and the payoffs applied, so neither side ever observes the
/// opponent's current-round move. The cancellation token is checked at
/// every round boundary; a cancelled match returns a partial record
/// with `completed == false` and accumulated scores intact.
///
/// A strategy fault aborts the match: the unfinished round pays out to
/// nobody, both players' match state is reset, and the error propagates
/// for the caller to treat as non-fatal to the rest of the tournament.
/// Either way both players leave with empty histories and `Idle` state.
pub fn run_match(
    a: &mut Player,
    b: &mut Player,
    rounds: u32,
    cancel: &CancelToken,
    observer: &mut dyn RoundObserver,
) -> Result<MatchRecord, StrategyExecutionError> {
    let mut record = MatchRecord::new(a.name(), b.name(), rounds);

    for round in 0..rounds {
        if cancel.is_cancelled() {
            event!(Level::INFO, player_a = a.name(), player_b = b.name(), round, "match cancelled");
            a.reset_match_state();
            b.reset_match_state();
            return Ok(record);
        }

        // Simultaneity: both decisions come from pre-round histories.
        let move_a = match a.decide(b.choices()) {
            Ok(mv) => mv,
            Err(err) => {
                a.reset_match_state();
                b.reset_match_state();
                return Err(err);
            }
        };
        let move_b = match b.decide(a.choices()) {
            Ok(mv) => mv,
            Err(err) => {
                a.reset_match_state();
                b.reset_match_state();
                return Err(err);
            }
        };

        a.record_move(move_a);
        b.record_move(move_b);

        let (delta_a, delta_b) = payoff(move_a, move_b);
        a.apply_score(delta_a);
        b.apply_score(delta_b);
        record.score_a += delta_a;
        record.score_b += delta_b;
        record.rounds.push(RoundRecord {
            round,
            move_a,
            move_b,
            delta_a,
            delta_b,
            total_a: record.score_a,
            total_b: record.score_b,
        });

        observer.on_round(&RoundView {
            round,
            name_a: a.name(),
            name_b: b.name(),
            choices_a: a.choices(),
            choices_b: b.choices(),
            state_a: a.state(),
            state_b: b.state(),
            score_a: a.score(),
            score_b: b.score(),
        });
    }

    a.reset_match_state();
    b.reset_match_state();
    record.completed = true;
    Ok(record)
}
