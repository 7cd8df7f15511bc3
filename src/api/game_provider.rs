use crate::models::Game;
use std::collections::HashMap;

/// Source of game snapshots, looked up by CollegeFootballData game id
pub trait GameProvider {
    fn get_by_id(&self, id: i32) -> Option<Game>;
}

/// Games held in memory, e.g. loaded from a cached snapshot file
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameProvider {
    games: HashMap<i32, Game>,
}

impl InMemoryGameProvider {
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games: games.into_iter().map(|g| (g.id, g)).collect(),
        }
    }

    pub fn with_game(mut self, game: Game) -> Self {
        self.games.insert(game.id, game);
        self
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameProvider for InMemoryGameProvider {
    fn get_by_id(&self, id: i32) -> Option<Game> {
        self.games.get(&id).cloned()
    }
}
