use std::fmt;
use std::str::FromStr;

use crate::{GameError, GameResult};

/// Which scene currently receives input and renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameType {
    #[default]
    Lobby,
    JumpRope,
    Memorize,
    Racing,
}

impl GameType {
    pub const ALL: [GameType; 4] = [
        GameType::Lobby,
        GameType::JumpRope,
        GameType::Memorize,
        GameType::Racing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameType::Lobby => "lobby",
            GameType::JumpRope => "jump-rope",
            GameType::Memorize => "memorize",
            GameType::Racing => "racing",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameType {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        let s = s.to_ascii_lowercase();
        GameType::ALL
            .into_iter()
            .find(|g| g.name() == s || g.name().replace('-', "_") == s)
            .ok_or(GameError::UnknownScene(s))
    }
}

/// Final scores of a finished two-player minigame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub scores: [u32; 2],
    /// Player 1 only wins with a strictly higher score.
    pub winner: u8,
}

impl MatchResult {
    pub fn new(scores: [u32; 2]) -> Self {
        let winner = if scores[0] > scores[1] { 1 } else { 2 };
        Self { scores, winner }
    }
}
