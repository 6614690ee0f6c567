//! File-backed strategy resolution
//!
//! A player named `alice` is driven by the resource `alice.json` in the
//! loader's directory, a serialized [`StrategyKind`]. No resource means
//! the default uniformly-random strategy; a present but broken resource
//! is a hard error so a typo never silently degrades into random play.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{event, Level};

use crate::errors::StrategyLoadError;
use crate::player::Player;
use crate::random::SeededRng;
use crate::strategy::{StrategyFn, StrategyKind};

pub struct StrategyLoader {
    dir: PathBuf,
    seed: u64,
}

impl StrategyLoader {
    /// `dir` holds the strategy resources; `seed` drives every random
    /// strategy the loader hands out, with an independent stream per
    /// player name.
    pub fn new(dir: impl Into<PathBuf>, seed: u64) -> Self {
        Self { dir: dir.into(), seed }
    }

    /// The resource a player name resolves to.
    pub fn resource_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Resolve a player name to a strategy.
    ///
    /// A missing resource falls back to the default random strategy and
    /// is never an error.
    pub fn load(&self, name: &str) -> Result<StrategyFn, StrategyLoadError> {
        let path = self.resource_path(name);
        if !path.exists() {
            event!(Level::DEBUG, player = name, "no strategy resource, using default random");
            return Ok(self.default_strategy(name));
        }
        let kind = self.parse_resource(name, &path)?;
        event!(Level::DEBUG, player = name, kind = ?kind, "strategy loaded");
        Ok(kind.compile(self.stream_for(name)))
    }

    /// Build a player whose strategy resolves from their name, as the
    /// tournament bootstrap does for each roster entry.
    pub fn load_player(&self, name: &str) -> Result<Player, StrategyLoadError> {
        Ok(Player::new(name, self.load(name)?))
    }

    /// Re-resolve and swap a player's strategy between matches.
    ///
    /// On failure the player keeps the previous strategy untouched;
    /// score and history are never affected either way.
    pub fn reload(&self, player: &mut Player) -> Result<(), StrategyLoadError> {
        let strategy = self.load(player.name())?;
        player.set_strategy(strategy);
        event!(Level::INFO, player = player.name(), "strategy reloaded");
        Ok(())
    }

    fn parse_resource(&self, name: &str, path: &Path) -> Result<StrategyKind, StrategyLoadError> {
        let text = fs::read_to_string(path).map_err(|source| StrategyLoadError::Io {
            name: name.to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| StrategyLoadError::Parse {
            name: name.to_string(),
            source,
        })
    }

    fn default_strategy(&self, name: &str) -> StrategyFn {
        StrategyKind::Random { cooperate_bias: 50 }.compile(self.stream_for(name))
    }

    fn stream_for(&self, name: &str) -> SeededRng {
        SeededRng::new(self.seed, fnv1a(name))
    }
}

/// FNV-1a over the player name, to give each player their own stream.
fn fnv1a(name: &str) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for byte in name.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
