use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use espn::{Competition, Game};
use parking_lot::Mutex;
use tracing::trace;

type Games = HashMap<String, Game>;

/// Central entity which knows the last observed state of every game.
///
/// Each competition has its own map behind its own lock. Readers only ever
/// get copies, never a reference into the live state.
#[derive(Debug, Clone)]
pub struct GameStore {
    competitions: Arc<[Mutex<Games>; Competition::ALL.len()]>,
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            competitions: Arc::new(Default::default()),
        }
    }

    fn games(&self, competition: Competition) -> &Mutex<Games> {
        &self.competitions[competition as usize]
    }

    /// Insert every game not known yet. Known games are left untouched.
    /// Returns how many games were added.
    pub fn upsert_new(&self, competition: Competition, incoming: Vec<Game>) -> usize {
        let mut games = self.games(competition).lock();
        let before = games.len();
        for game in incoming {
            games.entry(game.id.clone()).or_insert(game);
        }

        games.len() - before
    }

    /// Overwrite the game stored under `id`.
    pub fn replace(&self, competition: Competition, id: &str, game: Game) {
        trace!("Replacing {competition} game {id}");
        self.games(competition).lock().insert(id.to_string(), game);
    }

    /// A copy of all games of a competition, ordered by start.
    pub fn snapshot(&self, competition: Competition) -> Vec<Game> {
        let mut games: Vec<_> = self.games(competition).lock().values().cloned().collect();
        games.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        games
    }

    /// Look a game up by id in every competition.
    pub fn find(&self, id: &str) -> Option<Game> {
        Competition::ALL
            .into_iter()
            .find_map(|c| self.games(c).lock().get(id).cloned())
    }

    /// Drop all games that started more than `window` before `now`.
    /// Returns how many games were removed.
    pub fn evict_stale(&self, competition: Competition, now: DateTime<Utc>, window: Duration) -> usize {
        let mut games = self.games(competition).lock();
        let before = games.len();
        games.retain(|_, game| now - game.start <= window);
        before - games.len()
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
