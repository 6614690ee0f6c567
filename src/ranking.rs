//! Score ranking view

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::player::Player;

/// One line of a ranking table. `place` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub place: usize,
    pub name: String,
    pub score: u32,
}

/// Rank players by score, descending.
///
/// The sort is stable: players with equal scores keep their relative
/// roster order. Read-only; nothing on any player is touched.
pub fn rank(players: &[Player]) -> Vec<RankEntry> {
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by_key(|&i| Reverse(players[i].score()));
    order
        .into_iter()
        .enumerate()
        .map(|(pos, i)| RankEntry {
            place: pos + 1,
            name: players[i].name().to_string(),
            score: players[i].score(),
        })
        .collect()
}
