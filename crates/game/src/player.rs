//! Character controller: walking with a hop animation, turning and jumping.

use corelib::{NodeId, SceneGraph, vec3};

use crate::config::PlayerConfig;
use crate::input::{InputSource, Key};
use crate::{GameError, GameResult, GameType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlScheme {
    pub forward: Key,
    pub left: Key,
    pub right: Key,
    pub back: Key,
    pub jump: Key,
}

impl ControlScheme {
    /// Player 1 walks with WASD and jumps with Space, player 2 uses IJKL and
    /// Right Shift.
    pub fn for_player(number: u8) -> GameResult<Self> {
        match number {
            1 => Ok(Self {
                forward: Key::W,
                left: Key::A,
                right: Key::D,
                back: Key::S,
                jump: Key::Space,
            }),
            2 => Ok(Self {
                forward: Key::I,
                left: Key::J,
                right: Key::L,
                back: Key::K,
                jump: Key::RightShift,
            }),
            n => Err(GameError::InvalidPlayer(n)),
        }
    }
}

/// Drives one character node from keyboard state.
#[derive(Clone, Debug)]
pub struct Player {
    number: u8,
    node: NodeId,
    controls: ControlScheme,
    tuning: PlayerConfig,
    move_speed: f32,
    hop_phase: f32,
    jump_velocity: f32,
    jumping: bool,
    height: f32,
}

impl Player {
    pub fn new(
        number: u8,
        node: NodeId,
        tuning: &PlayerConfig,
        move_speed: f32,
    ) -> GameResult<Self> {
        Ok(Self {
            number,
            node,
            controls: ControlScheme::for_player(number)?,
            tuning: tuning.clone(),
            move_speed,
            hop_phase: 0.0,
            jump_velocity: 0.0,
            jumping: false,
            height: 0.0,
        })
    }

    #[inline]
    pub fn number(&self) -> u8 {
        self.number
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Height above the ground gained by the current jump.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn update(
        &mut self,
        graph: &mut SceneGraph,
        dt: f32,
        input: &dyn InputSource,
        mode: GameType,
    ) {
        match mode {
            GameType::Lobby | GameType::Racing => self.walk(graph, dt, input),
            GameType::JumpRope => {
                if input.is_down(self.controls.jump) {
                    self.start_jump();
                }
            }
            GameType::Memorize => {}
        }
        self.apply_jump(graph, dt);
    }

    fn walk(&mut self, graph: &mut SceneGraph, dt: f32, input: &dyn InputSource) {
        let forward = input.is_down(self.controls.forward);
        let back = input.is_down(self.controls.back);

        if forward {
            graph[self.node].translate(vec3(0.0, 0.0, -dt * self.move_speed));
            self.hop(graph, dt);
        }
        if back {
            graph[self.node].translate(vec3(0.0, 0.0, dt * self.move_speed));
            self.hop(graph, dt);
        }

        // standing still: put the character back onto the ground
        if !forward && !back && !self.jumping {
            let y = graph.world_position(self.node).y;
            graph[self.node].translate(vec3(0.0, -y, 0.0));
            self.hop_phase = 0.0;
        }

        if input.is_down(self.controls.left) {
            graph[self.node].rotate(0.0, dt * self.tuning.turn_speed, 0.0);
        }
        if input.is_down(self.controls.right) {
            graph[self.node].rotate(0.0, -dt * self.tuning.turn_speed, 0.0);
        }
        if input.is_down(self.controls.jump) {
            self.start_jump();
        }
    }

    fn hop(&mut self, graph: &mut SceneGraph, dt: f32) {
        if self.jumping {
            return;
        }
        self.hop_phase += dt * self.tuning.hop_frequency;
        let offset = self.tuning.hop_height * self.hop_phase.sin();
        graph[self.node].translate(vec3(0.0, offset, 0.0));
    }

    fn start_jump(&mut self) {
        if !self.jumping {
            self.jump_velocity = self.tuning.jump_velocity;
            self.jumping = true;
        }
    }

    fn apply_jump(&mut self, graph: &mut SceneGraph, dt: f32) {
        if !self.jumping {
            return;
        }
        let new_height = self.height + dt * self.jump_velocity;
        graph[self.node].translate(vec3(0.0, dt * self.jump_velocity, 0.0));
        self.jump_velocity -= self.tuning.gravity;
        self.height = new_height.max(0.0);
        if self.height == 0.0 {
            self.jump_velocity = 0.0;
            self.jumping = false;
        }
    }

    pub fn reset_jump(&mut self) {
        self.jump_velocity = 0.0;
        self.height = 0.0;
        self.jumping = false;
    }
}
