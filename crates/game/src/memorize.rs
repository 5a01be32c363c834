//! Memory quiz: three object setups are shown in a row and each player
//! buzzes the answer they remember. The fixed camera slides along +X from one
//! setup to the next and finally to the winner's screen.

use corelib::{Lens, Mat4, NodeId, SceneGraph, Transform, Vec3, vec3};

use crate::config::GameConfig;
use crate::input::{InputSource, Key, RenderSink};
use crate::scene::{FixedCamera, Scene, draw_all};
use crate::state::MatchResult;
use crate::{GameResult, GameType};

/// Distance between two neighbouring setups along X.
pub const SETUP_SPACING: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemoStage {
    #[default]
    Flower,
    Rake,
    Lily,
    Win,
    Done,
}

impl MemoStage {
    /// Answer keys of player 1 and player 2 for the question stages.
    pub fn answer_keys(self) -> Option<(Key, Key)> {
        match self {
            MemoStage::Flower => Some((Key::Q, Key::I)),
            MemoStage::Rake => Some((Key::A, Key::U)),
            MemoStage::Lily => Some((Key::S, Key::J)),
            MemoStage::Win | MemoStage::Done => None,
        }
    }
}

pub struct MemorizeScene {
    graph: SceneGraph,
    camera: FixedCamera,
    stage: MemoStage,
    points: [u32; 2],
    result: Option<MatchResult>,
}

impl MemorizeScene {
    pub fn new(cfg: &GameConfig) -> GameResult<Self> {
        let mut graph = SceneGraph::new();

        graph.spawn(Transform::identity());

        for x in [-15.0, -5.0, 5.0, 15.0, 25.0] {
            graph.spawn(Transform::from_matrix(Mat4::from_translation(vec3(x, 0.0, 0.0))));
        }

        let flower = graph.spawn(Transform::identity());
        graph[flower].pre_translate(vec3(-17.08, 0.78, 0.0));
        graph[flower].scale(Vec3::splat(0.18));

        let rake = graph.spawn(Transform::identity());
        graph[rake].rotate(0.0, -92f32.to_radians(), 0.0);
        graph[rake].scale(Vec3::splat(0.05));
        graph[rake].pre_translate(vec3(-7.35, 0.85, -0.053));

        let lily = graph.spawn(Transform::identity());
        graph[lily].scale(Vec3::splat(0.1));
        graph[lily].pre_translate(vec3(2.85, 0.85, -0.05));

        let cam_node = graph.spawn(Transform::identity());
        graph.look_at(cam_node, vec3(1.0, 0.0, 0.0))?;
        graph[cam_node].set_position(vec3(-24.0, 0.7, -0.05));
        // narrow lens, one setup fills the frame
        let lens = Lens::new(0.12, cfg.camera.z_near, 100.0, 16.0 / 9.0);

        Ok(Self {
            graph,
            camera: FixedCamera {
                node: cam_node,
                lens,
            },
            stage: MemoStage::default(),
            points: [0, 0],
            result: None,
        })
    }

    #[inline]
    pub fn stage(&self) -> MemoStage {
        self.stage
    }

    #[inline]
    pub fn points(&self) -> [u32; 2] {
        self.points
    }

    /// Set once the quiz reached its win screen.
    #[inline]
    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    #[inline]
    pub fn camera_node(&self) -> NodeId {
        self.camera.node
    }

    fn slide_camera(&mut self, setups: f32) {
        self.graph[self.camera.node].set_position(vec3(setups * SETUP_SPACING, 0.0, 0.0));
    }

    /// Award points for pressed answer keys. True if anyone answered.
    fn collect_answers(&mut self, input: &dyn InputSource, keys: (Key, Key)) -> bool {
        let pressed = [input.is_down(keys.0), input.is_down(keys.1)];
        for (points, hit) in self.points.iter_mut().zip(pressed) {
            if hit {
                *points += 1;
            }
        }
        pressed.contains(&true)
    }

    fn advance(&mut self, input: &dyn InputSource) {
        let Some(keys) = self.stage.answer_keys() else {
            if self.stage == MemoStage::Win {
                let result = MatchResult::new(self.points);
                log::info!(
                    "Player {} won the memory game with {} points",
                    result.winner,
                    result.scores[usize::from(result.winner - 1)]
                );
                self.result = Some(result);
                self.stage = MemoStage::Done;
            }
            return;
        };

        if !self.collect_answers(input, keys) {
            return;
        }

        self.stage = match self.stage {
            MemoStage::Flower => MemoStage::Rake,
            MemoStage::Rake => MemoStage::Lily,
            _ => MemoStage::Win,
        };

        if self.stage == MemoStage::Win {
            let [p1, p2] = self.points;
            // win screens: player 1 one setup further, player 2 two
            if p1 > p2 {
                self.slide_camera(1.0);
            } else if p2 > p1 {
                self.slide_camera(2.0);
            }
        } else {
            self.slide_camera(1.0);
        }
        log::debug!("Memory game at {:?}, points {:?}", self.stage, self.points);
    }
}

impl Scene for MemorizeScene {
    fn kind(&self) -> GameType {
        GameType::Memorize
    }

    fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    fn update(&mut self, _dt: f32, input: &dyn InputSource) -> GameResult<Option<GameType>> {
        if input.is_down(Key::Space) {
            return Ok(Some(GameType::Lobby));
        }
        self.advance(input);
        Ok(None)
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        sink.begin(self.camera.view(&self.graph), self.camera.lens.proj());
        draw_all(&self.graph, self.camera.node, sink);
    }
}
