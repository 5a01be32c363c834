//! Two-player jump rope: the rope swings around a pivot, anyone still on the
//! ground when it passes is out.

use std::f32::consts::{FRAC_PI_2, TAU};

use corelib::{Mat4, NodeId, SceneGraph, Transform, Vec3, vec3};

use crate::config::{GameConfig, JumpRopeConfig};
use crate::input::{InputSource, Key, RenderSink};
use crate::player::Player;
use crate::scene::{FixedCamera, Scene, draw_all};
use crate::state::MatchResult;
use crate::{GameResult, GameType};

#[derive(Clone, Debug)]
struct Jumper {
    player: Player,
    score: u32,
    alive: bool,
}

pub struct JumpRopeScene {
    graph: SceneGraph,
    camera: FixedCamera,
    rope: NodeId,
    rope_rest: Mat4,
    jumpers: [Jumper; 2],
    rules: JumpRopeConfig,
    running: bool,
    /// Radians left until the rope passes the players.
    rope_angle: f32,
    rope_speed: f32,
    last_result: Option<MatchResult>,
}

impl JumpRopeScene {
    pub fn new(cfg: &GameConfig) -> GameResult<Self> {
        let mut graph = SceneGraph::new();

        let level = graph.spawn(Transform::identity());
        graph[level].translate(vec3(0.0, 0.5, 0.0));
        graph[level].scale(Vec3::splat(8.0));

        let squirrel = graph.spawn(Transform::from_trs(
            vec3(4.0, 0.0, 4.25),
            vec3(0.0, -90f32.to_radians(), 0.0),
            Vec3::ONE,
        ));
        let snail = graph.spawn(Transform::from_trs(
            vec3(1.5, 0.0, 3.9),
            vec3(0.0, 90f32.to_radians(), 0.0),
            Vec3::ONE,
        ));

        let rope = graph.spawn(Transform::identity());
        graph[rope].translate(vec3(1.0, 0.1, 3.0));
        graph[rope].rotate(0.0, 90f32.to_radians(), 90f32.to_radians());
        graph[rope].scale(Vec3::splat(0.33));
        let rope_rest = graph.world_matrix(rope);

        let cam_node = graph.spawn(Transform::identity());
        graph[cam_node].translate(vec3(5.5, 2.0, 6.5));
        graph[cam_node].rotate(-25f32.to_radians(), 45f32.to_radians(), 15f32.to_radians());
        let mut lens = cfg.camera.lens(16.0 / 9.0);
        lens.fov_y = 80f32.to_radians();

        let speed = cfg.player.lobby_move_speed;
        let jumpers = [
            Jumper {
                player: Player::new(1, squirrel, &cfg.player, speed)?,
                score: 0,
                alive: true,
            },
            Jumper {
                player: Player::new(2, snail, &cfg.player, speed)?,
                score: 0,
                alive: true,
            },
        ];

        Ok(Self {
            graph,
            camera: FixedCamera {
                node: cam_node,
                lens,
            },
            rope,
            rope_rest,
            jumpers,
            rules: cfg.jump_rope.clone(),
            running: false,
            rope_angle: TAU,
            rope_speed: cfg.jump_rope.start_speed,
            last_result: None,
        })
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn rope(&self) -> NodeId {
        self.rope
    }

    #[inline]
    pub fn rope_speed(&self) -> f32 {
        self.rope_speed
    }

    pub fn scores(&self) -> [u32; 2] {
        [self.jumpers[0].score, self.jumpers[1].score]
    }

    pub fn alive(&self) -> [bool; 2] {
        [self.jumpers[0].alive, self.jumpers[1].alive]
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.jumpers.get(index).map(|j| &j.player)
    }

    /// Result of the most recently finished game.
    #[inline]
    pub fn last_result(&self) -> Option<MatchResult> {
        self.last_result
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("Jump rope started");
            self.running = true;
        }
    }

    fn leading_score(&self) -> u32 {
        self.jumpers.iter().map(|j| j.score).max().unwrap_or(0)
    }

    fn swing(&mut self, dt: f32) {
        let step = dt * self.rope_speed;
        self.graph[self.rope].rotate_around_point(step, 0.0, 0.0, self.rules.pivot());
        self.rope_angle -= step;

        if self.rope_angle.to_degrees() <= self.rules.pass_angle_deg {
            for i in 0..self.jumpers.len() {
                self.judge(i);
            }
            self.graph.set_world_matrix(self.rope, self.rope_rest);
            self.rope_speed = self.rules.speed_for(self.leading_score());
            self.rope_angle = TAU;
        }
    }

    fn judge(&mut self, i: usize) {
        if !self.running || !self.jumpers[i].alive {
            return;
        }
        let j = &mut self.jumpers[i];
        if j.player.height() <= self.rules.clearance {
            j.alive = false;
            // knocked over
            self.graph[j.player.node()].rotate(FRAC_PI_2, 0.0, 0.0);
            log::info!("Player {} is out", j.player.number());
            if self.jumpers.iter().all(|j| !j.alive) {
                self.stop();
            }
        } else {
            j.score += 1;
        }
    }

    fn stop(&mut self) {
        self.running = false;
        for j in &mut self.jumpers {
            self.graph[j.player.node()].rotate(-FRAC_PI_2, 0.0, 0.0);
            j.alive = true;
        }

        let result = MatchResult::new(self.scores());
        log::info!(
            "Jump rope over: player 1 scored {}, player 2 scored {}; player {} wins",
            result.scores[0],
            result.scores[1],
            result.winner
        );
        self.last_result = Some(result);

        self.graph.set_world_matrix(self.rope, self.rope_rest);
        self.rope_angle = TAU;
        self.rope_speed = self.rules.start_speed;
        for j in &mut self.jumpers {
            j.score = 0;
        }
    }
}

impl Scene for JumpRopeScene {
    fn kind(&self) -> GameType {
        GameType::JumpRope
    }

    fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    fn update(&mut self, dt: f32, input: &dyn InputSource) -> GameResult<Option<GameType>> {
        for j in &mut self.jumpers {
            if j.alive {
                j.player.update(&mut self.graph, dt, input, GameType::JumpRope);
            }
        }

        if self.running {
            self.swing(dt);
        } else if input.is_down(Key::T) {
            self.start();
        }
        Ok(None)
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        sink.begin(self.camera.view(&self.graph), self.camera.lens.proj());
        draw_all(&self.graph, self.camera.node, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyState;

    const DT: f32 = 1.0 / 60.0;

    fn scene(clearance: f32) -> JumpRopeScene {
        let mut cfg = GameConfig::default();
        cfg.jump_rope.clearance = clearance;
        JumpRopeScene::new(&cfg).unwrap()
    }

    /// Step frames until `done` holds, at most two full rope turns.
    fn run_until(s: &mut JumpRopeScene, keys: &KeyState, done: impl Fn(&JumpRopeScene) -> bool) {
        for _ in 0..250 {
            s.update(DT, keys).unwrap();
            if done(s) {
                return;
            }
        }
        panic!("rope never came round");
    }

    #[test]
    fn waits_for_start_key() {
        let mut s = scene(0.5);
        let rest = s.graph().world_matrix(s.rope());
        for _ in 0..10 {
            s.update(DT, &KeyState::new()).unwrap();
        }
        assert!(!s.is_running());
        assert_eq!(s.graph().world_matrix(s.rope()), rest);

        s.update(DT, &KeyState::from([Key::T])).unwrap();
        assert!(s.is_running());
        s.update(DT, &KeyState::new()).unwrap();
        assert_ne!(s.graph().world_matrix(s.rope()), rest);
    }

    #[test]
    fn nobody_jumps_everybody_loses() {
        let mut s = scene(0.5);
        s.start();
        run_until(&mut s, &KeyState::new(), |s| !s.is_running());
        assert_eq!(
            s.last_result(),
            Some(MatchResult {
                scores: [0, 0],
                winner: 2
            })
        );
        assert_eq!(s.alive(), [true, true]);
        assert_eq!(s.rope_speed(), 3.5);
        // both players stand upright again
        let up = s.graph().world_y_axis(s.player(0).unwrap().node());
        assert!(up.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn clearing_the_rope_scores_and_speeds_up() {
        // negative clearance: standing on the ground is enough
        let mut s = scene(-1.0);
        s.start();
        run_until(&mut s, &KeyState::new(), |s| s.scores() != [0, 0]);
        assert!(s.is_running());
        assert_eq!(s.scores(), [1, 1]);
        assert!((s.rope_speed() - 3.7).abs() < 1e-5);
        assert_eq!(s.graph().world_matrix(s.rope()), s.rope_rest);
    }

    #[test]
    fn one_player_out_game_goes_on() {
        let mut s = scene(0.5);
        s.start();
        // keep player 1 in the air when the rope comes round
        s.jumpers[0].player = {
            let mut cfg = GameConfig::default();
            cfg.player.gravity = 0.0;
            Player::new(1, s.jumpers[0].player.node(), &cfg.player, 5.0).unwrap()
        };
        run_until(&mut s, &KeyState::from([Key::Space]), |s| s.alive() != [true, true]);
        assert!(s.is_running());
        assert_eq!(s.alive(), [true, false]);
        assert_eq!(s.scores(), [1, 0]);
        // the fallen player lies on its side
        let up = s.graph().world_y_axis(s.player(1).unwrap().node());
        assert!(up.y.abs() < 1e-5);
    }
}
