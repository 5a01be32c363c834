//! Game layer: the garden lobby, the race and two minigames on top of
//! `corelib`. Window, input backend and renderer stay outside; they meet the
//! game through [`InputSource`] and [`RenderSink`].

pub mod config;
pub mod error;
pub mod game;
pub mod garden;
pub mod input;
pub mod jump_rope;
pub mod memorize;
pub mod player;
pub mod scene;
pub mod state;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use game::Game;
pub use garden::GardenScene;
pub use input::{InputSource, Key, KeyState, RenderSink};
pub use jump_rope::JumpRopeScene;
pub use memorize::{MemoStage, MemorizeScene};
pub use player::Player;
pub use scene::Scene;
pub use state::{GameType, MatchResult};
