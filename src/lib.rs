pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use api::*;
pub use error::PickError;
pub use models::*;
pub use utils::*;

pub use utils::grading::grade_pick;
pub use utils::lock::{is_locked, is_locked_at, lock_time};
pub use utils::scoring::{potential, score_pick, score_pick_by_wager_amount, GradedPick};
