//! Round-robin tournament driver

use tracing::{event, trace_span, Level};

use crate::cancel::CancelToken;
use crate::errors::{StrategyExecutionError, TournamentError};
use crate::game::{run_match, MatchRecord, RoundObserver, DEFAULT_ROUNDS_PER_MATCH};
use crate::player::Player;
use crate::ranking::{rank, RankEntry};
use crate::schedule::{match_count, pair_at};

/// Tournament-wide knobs.
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    pub rounds_per_match: u32,
    pub cancel: CancelToken,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds_per_match: DEFAULT_ROUNDS_PER_MATCH,
            cancel: CancelToken::new(),
        }
    }
}

/// A match the driver abandoned because a strategy faulted.
#[derive(Debug)]
pub struct MatchFault {
    pub match_index: usize,
    pub error: StrategyExecutionError,
}

/// Everything a tournament run produced.
#[derive(Debug)]
pub struct TournamentReport {
    pub matches: Vec<MatchRecord>,
    pub faults: Vec<MatchFault>,
    pub ranking: Vec<RankEntry>,
    /// False when the run was cancelled before the schedule finished.
    pub completed: bool,
}

/// A roster of players plus the derived round-robin schedule.
///
/// Players live for the tournament's whole lifetime; scores accumulate
/// across matches while histories stay scoped to one match. The driver
/// owns the players exclusively — matches never overlap.
pub struct Tournament {
    players: Vec<Player>,
    config: TournamentConfig,
}

impl Tournament {
    pub fn new(players: Vec<Player>, config: TournamentConfig) -> Self {
        Self { players, config }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Current standings, mid-run or final.
    pub fn ranking(&self) -> Vec<RankEntry> {
        rank(&self.players)
    }

    /// Play the full schedule.
    ///
    /// Pairs `(i, j)` with `i < j` run in lexicographic order. After
    /// every finished match (including a faulted one) the callback
    /// receives mutable access to the roster — the point where a front
    /// end renders interim rankings or swaps a strategy via
    /// [`StrategyLoader::reload`](crate::StrategyLoader::reload).
    ///
    /// A strategy fault abandons that match only; the rest of the
    /// schedule proceeds with the offending player flagged.
    /// Cancellation is honored between rounds and between matches and
    /// yields a clean, partial report.
    pub fn run<F>(
        &mut self,
        observer: &mut dyn RoundObserver,
        mut on_match_complete: F,
    ) -> Result<TournamentReport, TournamentError>
    where
        F: FnMut(&mut [Player]),
    {
        let n = self.players.len();
        let total = match_count(n);
        let span = trace_span!("tournament", players = n, matches = total);
        let _enter = span.enter();

        let mut report = TournamentReport {
            matches: Vec::with_capacity(total),
            faults: Vec::new(),
            ranking: Vec::new(),
            completed: false,
        };

        for match_index in 0..total {
            if self.config.cancel.is_cancelled() {
                event!(Level::INFO, match_index, "tournament cancelled");
                report.ranking = rank(&self.players);
                return Ok(report);
            }

            let (i, j) = pair_at(n, match_index)?;
            // i < j always holds, so the split is safe
            let (left, right) = self.players.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];

            match run_match(a, b, self.config.rounds_per_match, &self.config.cancel, observer) {
                Ok(record) => {
                    let cancelled = !record.completed;
                    event!(
                        Level::INFO,
                        match_index,
                        player_a = record.player_a.as_str(),
                        player_b = record.player_b.as_str(),
                        score_a = record.score_a,
                        score_b = record.score_b,
                        completed = record.completed,
                        "match finished"
                    );
                    report.matches.push(record);
                    if cancelled {
                        report.ranking = rank(&self.players);
                        return Ok(report);
                    }
                }
                Err(error) => {
                    event!(Level::WARN, match_index, %error, "match abandoned");
                    report.faults.push(MatchFault { match_index, error });
                }
            }

            on_match_complete(&mut self.players);
        }

        report.ranking = rank(&self.players);
        report.completed = true;
        Ok(report)
    }

    /// Consume the tournament, handing the roster back to the caller.
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::NullObserver;
    use crate::strategy::{Move, StrategyFn, StrategyKind};
    use crate::SeededRng;

    fn builtin(name: &str, kind: StrategyKind) -> Player {
        Player::new(name, kind.compile(SeededRng::new(11, 0)))
    }

    fn roster() -> Vec<Player> {
        vec![
            builtin("coop", StrategyKind::AlwaysCooperate),
            builtin("defect", StrategyKind::AlwaysDefect),
            builtin("tft", StrategyKind::TitForTat),
        ]
    }

    #[test_log::test]
    fn test_full_round_robin_runs_every_pair_once() {
        let mut tournament = Tournament::new(roster(), TournamentConfig::default());
        let mut seen_boundaries = 0;
        let report = tournament
            .run(&mut NullObserver, |_| seen_boundaries += 1)
            .unwrap();

        assert!(report.completed);
        assert_eq!(report.matches.len(), 3);
        assert_eq!(seen_boundaries, 3);
        let pairs: Vec<_> = report
            .matches
            .iter()
            .map(|m| (m.player_a.as_str(), m.player_b.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [("coop", "defect"), ("coop", "tft"), ("defect", "tft")]
        );
    }

    #[test]
    fn test_known_scores_three_players_two_rounds() {
        // coop vs defect: (0, 10)
        // coop vs tft:    (6, 6)
        // defect vs tft:  (6, 1)  — tft loses round one, then mirrors
        let mut tournament = Tournament::new(
            roster(),
            TournamentConfig {
                rounds_per_match: 2,
                ..Default::default()
            },
        );
        let report = tournament.run(&mut NullObserver, |_| {}).unwrap();

        let names: Vec<_> = report.ranking.iter().map(|e| e.name.as_str()).collect();
        let scores: Vec<_> = report.ranking.iter().map(|e| e.score).collect();
        assert_eq!(names, ["defect", "tft", "coop"]);
        assert_eq!(scores, [16, 7, 6]);
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let run_once = || {
            let mut t = Tournament::new(roster(), TournamentConfig::default());
            t.run(&mut NullObserver, |_| {}).unwrap()
        };
        let a = run_once();
        let b = run_once();
        assert_eq!(a.matches, b.matches);
        assert_eq!(a.ranking, b.ranking);
    }

    #[test]
    fn test_scores_accumulate_monotonically() {
        let mut tournament = Tournament::new(roster(), TournamentConfig::default());
        let mut last_scores = vec![0u32; 3];
        tournament
            .run(&mut NullObserver, |players| {
                for (last, player) in last_scores.iter_mut().zip(players.iter()) {
                    assert!(player.score() >= *last, "score of {} decreased", player.name());
                    *last = player.score();
                }
            })
            .unwrap();
    }

    #[test]
    fn test_fault_is_non_fatal_to_tournament() {
        let faulty: StrategyFn = Box::new(|_: &[Move], _: &[Move]| panic!("bad strategy"));
        let players = vec![
            Player::new("broken", faulty),
            builtin("coop", StrategyKind::AlwaysCooperate),
            builtin("defect", StrategyKind::AlwaysDefect),
        ];
        let mut tournament = Tournament::new(
            players,
            TournamentConfig {
                rounds_per_match: 4,
                ..Default::default()
            },
        );
        let report = tournament.run(&mut NullObserver, |_| {}).unwrap();

        assert!(report.completed);
        // both of broken's matches abandoned, coop vs defect played out
        assert_eq!(report.faults.len(), 2);
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.faults[0].error.player, "broken");
        assert!(tournament.players()[0].is_flagged());
        assert_eq!(tournament.players()[1].score(), 0);
        assert_eq!(tournament.players()[2].score(), 20);
    }

    #[test]
    fn test_cancel_between_matches() {
        let config = TournamentConfig::default();
        let cancel = config.cancel.clone();
        let mut tournament = Tournament::new(roster(), config);
        let mut boundaries = 0;
        let report = tournament
            .run(&mut NullObserver, |_| {
                boundaries += 1;
                if boundaries == 1 {
                    cancel.cancel();
                }
            })
            .unwrap();

        assert!(!report.completed);
        assert_eq!(report.matches.len(), 1);
        // standings reflect the one match that did run
        assert_eq!(report.ranking.len(), 3);
        assert_eq!(report.ranking[0].name, "defect");
    }

    #[test]
    fn test_reload_between_matches_is_isolated() {
        // After match 1 swap coop's strategy to always-defect; the swap
        // must not touch anyone's score or the other players' behavior.
        let mut tournament = Tournament::new(
            roster(),
            TournamentConfig {
                rounds_per_match: 2,
                ..Default::default()
            },
        );
        let mut boundaries = 0;
        let report = tournament
            .run(&mut NullObserver, |players| {
                boundaries += 1;
                if boundaries == 1 {
                    let score_before = players[0].score();
                    players[0].set_strategy(
                        StrategyKind::AlwaysDefect.compile(SeededRng::new(11, 0)),
                    );
                    assert_eq!(players[0].score(), score_before);
                }
            })
            .unwrap();

        // coop defected in its second match (vs tft): rounds go
        // (D,C) then (D,D) -> 6 points there, 0 from match one.
        let coop = report.ranking.iter().find(|e| e.name == "coop").unwrap();
        assert_eq!(coop.score, 6);
        // defect's matches are unaffected: 10 + 6 = 16
        let defect = report.ranking.iter().find(|e| e.name == "defect").unwrap();
        assert_eq!(defect.score, 16);
    }

    #[test]
    fn test_single_player_roster_has_no_matches() {
        let mut tournament = Tournament::new(
            vec![builtin("alone", StrategyKind::TitForTat)],
            TournamentConfig::default(),
        );
        let report = tournament.run(&mut NullObserver, |_| {}).unwrap();
        assert!(report.completed);
        assert!(report.matches.is_empty());
        assert_eq!(report.ranking.len(), 1);
    }
}
