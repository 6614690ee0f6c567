//! Moves, the strategy capability interface, and the built-in catalogue

use serde::{Deserialize, Serialize};

use crate::payoff;
use crate::random::SeededRng;

/// A move in one round of the Prisoner's Dilemma.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    pub fn cooperates(self) -> bool {
        matches!(self, Move::Cooperate)
    }

    /// `true` means cooperate, matching the strategy resource contract.
    pub fn from_bool(cooperate: bool) -> Self {
        if cooperate {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }
}

/// The capability interface every strategy satisfies.
///
/// Called once per round with `(own_history, opponent_history)` as they
/// stood before the round; the move being decided is in neither slice.
/// The engine never cares how a strategy was authored or loaded — a
/// built-in, a closure over arbitrary state, or something parsed from a
/// resource file all look the same through this type. `FnMut` so a
/// strategy may carry its own RNG stream; it must not mutate anything
/// observable through its arguments.
pub type StrategyFn = Box<dyn FnMut(&[Move], &[Move]) -> Move + Send>;

fn default_bias() -> u8 {
    50
}

/// Built-in strategy catalogue.
///
/// This is the serialized form a strategy resource file contains, e.g.
/// `{"kind": "tit-for-tat"}` or `{"kind": "random", "cooperate_bias": 30}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Copy the opponent's last move. Start with cooperate.
    TitForTat,
    /// Never defect.
    AlwaysCooperate,
    /// Never cooperate.
    AlwaysDefect,
    /// Cooperate until the opponent defects once, then always defect.
    GrimTrigger,
    /// Win-stay, lose-switch: repeat the last move if it scored 3+.
    Pavlov,
    /// Defect only after two consecutive opponent defections.
    TitForTwoTats,
    /// Independent random choice each round.
    Random {
        #[serde(default = "default_bias")]
        cooperate_bias: u8,
    },
}

impl StrategyKind {
    /// Compile the description into a callable strategy.
    ///
    /// `rng` is the stream the Random variant draws from; deterministic
    /// variants ignore it.
    pub fn compile(self, rng: SeededRng) -> StrategyFn {
        match self {
            StrategyKind::TitForTat => Box::new(|_own, opp| tit_for_tat(opp)),
            StrategyKind::AlwaysCooperate => Box::new(|_own, _opp| Move::Cooperate),
            StrategyKind::AlwaysDefect => Box::new(|_own, _opp| Move::Defect),
            StrategyKind::GrimTrigger => Box::new(|_own, opp| grim_trigger(opp)),
            StrategyKind::Pavlov => Box::new(|own, opp| pavlov(own, opp)),
            StrategyKind::TitForTwoTats => Box::new(|_own, opp| tit_for_two_tats(opp)),
            StrategyKind::Random { cooperate_bias } => {
                let mut rng = rng;
                Box::new(move |_own, _opp| {
                    Move::from_bool(rng.next_percent() < cooperate_bias)
                })
            }
        }
    }
}

fn tit_for_tat(opponent: &[Move]) -> Move {
    match opponent.last() {
        None => Move::Cooperate,
        Some(&last) => last,
    }
}

fn grim_trigger(opponent: &[Move]) -> Move {
    if opponent.iter().any(|m| !m.cooperates()) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

fn pavlov(own: &[Move], opponent: &[Move]) -> Move {
    let (Some(&my_last), Some(&opp_last)) = (own.last(), opponent.last()) else {
        return Move::Cooperate;
    };
    let (my_score, _) = payoff(my_last, opp_last);
    if my_score >= 3 {
        my_last
    } else {
        match my_last {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }
}

fn tit_for_two_tats(opponent: &[Move]) -> Move {
    match opponent {
        [.., Move::Defect, Move::Defect] => Move::Defect,
        _ => Move::Cooperate,
    }
}
