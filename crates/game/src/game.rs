//! Owns every scene and routes input to the active one.

use crate::config::GameConfig;
use crate::garden::GardenScene;
use crate::input::{InputSource, Key, RenderSink};
use crate::jump_rope::JumpRopeScene;
use crate::memorize::MemorizeScene;
use crate::scene::Scene;
use crate::{GameResult, GameType};

pub struct Game {
    active: GameType,
    lobby: GardenScene,
    jump_rope: JumpRopeScene,
    memorize: MemorizeScene,
    racing: GardenScene,
}

impl Game {
    /// Builds all four scenes up front and starts in the lobby.
    pub fn new(cfg: &GameConfig) -> GameResult<Self> {
        let game = Self {
            active: GameType::Lobby,
            lobby: GardenScene::new(GameType::Lobby, cfg)?,
            jump_rope: JumpRopeScene::new(cfg)?,
            memorize: MemorizeScene::new(cfg)?,
            racing: GardenScene::new(GameType::Racing, cfg)?,
        };
        log::info!("Game ready, starting in the {}", game.active);
        Ok(game)
    }

    pub fn with_scene(mut self, scene: GameType) -> Self {
        self.change_scene(scene);
        self
    }

    #[inline]
    pub fn active(&self) -> GameType {
        self.active
    }

    pub fn change_scene(&mut self, scene: GameType) {
        if scene != self.active {
            log::info!("Switching scene: {} -> {scene}", self.active);
            self.active = scene;
        }
    }

    pub fn scene(&self) -> &dyn Scene {
        match self.active {
            GameType::Lobby => &self.lobby,
            GameType::JumpRope => &self.jump_rope,
            GameType::Memorize => &self.memorize,
            GameType::Racing => &self.racing,
        }
    }

    pub fn scene_mut(&mut self) -> &mut dyn Scene {
        match self.active {
            GameType::Lobby => &mut self.lobby,
            GameType::JumpRope => &mut self.jump_rope,
            GameType::Memorize => &mut self.memorize,
            GameType::Racing => &mut self.racing,
        }
    }

    /// One frame for the active scene. A switch it asks for takes effect
    /// afterwards; `O` jumps to the race from anywhere.
    pub fn update(&mut self, dt: f32, input: &dyn InputSource) -> GameResult<()> {
        if let Some(next) = self.scene_mut().update(dt, input)? {
            self.change_scene(next);
        }
        if input.is_down(Key::O) {
            self.change_scene(GameType::Racing);
        }
        Ok(())
    }

    pub fn on_mouse_move(&mut self, x: f64, y: f64) {
        self.scene_mut().on_mouse_move(x, y);
    }

    pub fn on_mouse_scroll(&mut self, dx: f64, dy: f64) {
        self.scene_mut().on_mouse_scroll(dx, dy);
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        self.scene().render(sink);
    }

    pub fn lobby(&self) -> &GardenScene {
        &self.lobby
    }

    pub fn lobby_mut(&mut self) -> &mut GardenScene {
        &mut self.lobby
    }

    pub fn jump_rope(&self) -> &JumpRopeScene {
        &self.jump_rope
    }

    pub fn memorize(&self) -> &MemorizeScene {
        &self.memorize
    }

    pub fn racing(&self) -> &GardenScene {
        &self.racing
    }
}
