//! Tournament engine for the Iterated Prisoner's Dilemma
//!
//! A fixed roster of players, each driven by a swappable decision
//! strategy, plays every other player in a round-robin schedule.
//! The engine owns pairing, the simultaneous-move round protocol,
//! payoff accounting, and ranking; rendering and input belong to
//! the caller, which observes rounds and match boundaries through
//! the hooks in [`game`] and [`tournament`].

mod cancel;
mod errors;
mod game;
mod loader;
mod player;
mod random;
mod ranking;
mod schedule;
mod strategy;
mod tournament;

pub use cancel::CancelToken;
pub use errors::{ScheduleError, StrategyExecutionError, StrategyLoadError, TournamentError};
pub use game::{
    run_match, FnObserver, MatchRecord, NullObserver, RoundObserver, RoundRecord, RoundView,
    DEFAULT_ROUNDS_PER_MATCH,
};
pub use loader::StrategyLoader;
pub use player::{Player, PlayerState};
pub use random::SeededRng;
pub use ranking::{rank, RankEntry};
pub use schedule::{match_count, pair_at, round_robin_pairs};
pub use strategy::{Move, StrategyFn, StrategyKind};
pub use tournament::{MatchFault, Tournament, TournamentConfig, TournamentReport};

/// Payoff matrix for one round of the Prisoner's Dilemma.
/// Returns (score_a, score_b).
///
/// The exact values (mutual cooperation 3, temptation 5, sucker 0,
/// mutual defection 1) are a contract, not a tunable default.
pub fn payoff(a: Move, b: Move) -> (u32, u32) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (3, 3),
        (Move::Cooperate, Move::Defect) => (0, 5),
        (Move::Defect, Move::Cooperate) => (5, 0),
        (Move::Defect, Move::Defect) => (1, 1),
    }
}
