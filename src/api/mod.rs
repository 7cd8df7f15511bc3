pub mod game_provider;

pub use game_provider::{GameProvider, InMemoryGameProvider};
