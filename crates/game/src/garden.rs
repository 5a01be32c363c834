//! The garden hub. Used for the lobby and, with a faster walk, the race.

use corelib::{
    Aabb, BoxExtent, CollisionResolver, NodeId, OrbitCamera, SceneGraph, Transform, Vec3, vec3,
};

use crate::config::{CameraConfig, GameConfig};
use crate::input::{InputSource, Key, RenderSink};
use crate::player::Player;
use crate::scene::{Scene, draw_all};
use crate::{GameResult, GameType};

/// Box of the walking character relative to its position.
pub const HERO_EXTENT: BoxExtent = BoxExtent::new(vec3(-1.0, -1.0, -2.0), vec3(4.0, 1.0, 2.0));

/// Where the main character starts, in front of the open side of the garden.
pub const HERO_SPAWN: Vec3 = vec3(0.0, 0.0, 6.0);

/// Left, right and back wall of the garden. The front stays open.
pub fn garden_walls() -> GameResult<Vec<Aabb>> {
    Ok(vec![
        Aabb::new(vec3(-4.8, 0.0, -6.0), vec3(-4.6, 0.0, 3.0))?,
        Aabb::new(vec3(4.9, 0.0, -6.0), vec3(5.1, 0.0, 3.0))?,
        Aabb::new(vec3(-4.8, 0.0, -6.0), vec3(5.1, 0.0, -6.0))?,
    ])
}

/// Prop that starts a minigame when the character stands in it and presses E.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trigger {
    pub node: NodeId,
    pub game: GameType,
}

pub struct GardenScene {
    kind: GameType,
    graph: SceneGraph,
    garden: NodeId,
    hero: Player,
    sidekick: NodeId,
    triggers: Vec<Trigger>,
    camera: OrbitCamera,
    camera_cfg: CameraConfig,
    resolver: CollisionResolver,
    last_mouse: (f64, f64),
    near: Option<GameType>,
}

impl GardenScene {
    /// `kind` picks the walking speed; the layout is shared.
    pub fn new(kind: GameType, cfg: &GameConfig) -> GameResult<Self> {
        let mut graph = SceneGraph::new();

        let garden = graph.spawn(Transform::identity().with_boxes(garden_walls()?));

        let hose = graph.spawn_child(
            garden,
            Transform::from_trs(
                vec3(2.0, 0.2, -1.4),
                vec3(-150f32.to_radians(), 10f32.to_radians(), -17f32.to_radians()),
                Vec3::splat(0.1),
            ),
        )?;
        let shovel = graph.spawn_child(
            garden,
            Transform::from_trs(
                vec3(-3.0, 0.3, -3.0),
                vec3(-90f32.to_radians(), 0.0, 0.0),
                Vec3::splat(0.27),
            ),
        )?;
        let rake = graph.spawn_child(
            garden,
            Transform::from_trs(
                vec3(-3.2, 0.4, -2.8),
                vec3(0.0, -160f32.to_radians(), -150f32.to_radians()),
                Vec3::splat(0.1),
            ),
        )?;
        graph[rake].bounding_boxes.clear();

        let hose_box = Aabb::around(graph.world_position(hose), BoxExtent::cube(1.0))?;
        graph.set_primary_box(hose, hose_box);
        let shovel_box = Aabb::around(
            graph.world_position(shovel),
            BoxExtent::new(vec3(-2.0, -1.0, -1.0), vec3(2.0, 1.0, 1.0)),
        )?;
        graph.set_primary_box(shovel, shovel_box);

        let hero_node = graph.spawn(Transform::from_trs(
            HERO_SPAWN,
            vec3(0.0, -22f32.to_radians(), 0.0),
            Vec3::ONE,
        ));
        let sidekick = graph.spawn_child(
            hero_node,
            Transform::from_trs(
                vec3(1.0, 0.0, 0.5),
                vec3(0.0, 180f32.to_radians(), 0.0),
                Vec3::ONE,
            ),
        )?;

        let move_speed = match kind {
            GameType::Racing => cfg.player.racing_move_speed,
            _ => cfg.player.lobby_move_speed,
        };
        let hero = Player::new(1, hero_node, &cfg.player, move_speed)?;

        let mut camera = OrbitCamera::with_limits(&mut graph, hero_node, cfg.camera.limits());
        camera.set_distance(cfg.camera.distance);
        camera.set_elevation(cfg.camera.elevation);
        camera.set_azimuth(cfg.camera.azimuth);
        camera.lens = cfg.camera.lens(camera.lens.aspect);
        camera.update_camera_position(&mut graph);

        log::info!("Garden scene ready for {kind} ({} nodes)", graph.len());

        Ok(Self {
            kind,
            graph,
            garden,
            hero,
            sidekick,
            triggers: vec![
                Trigger {
                    node: hose,
                    game: GameType::JumpRope,
                },
                Trigger {
                    node: shovel,
                    game: GameType::Memorize,
                },
            ],
            camera,
            camera_cfg: cfg.camera.clone(),
            resolver: cfg.collision.resolver(kind),
            last_mouse: (0.0, 0.0),
            near: None,
        })
    }

    #[inline]
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    #[inline]
    pub fn garden(&self) -> NodeId {
        self.garden
    }

    #[inline]
    pub fn hero(&self) -> &Player {
        &self.hero
    }

    #[inline]
    pub fn sidekick(&self) -> NodeId {
        self.sidekick
    }

    #[inline]
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    #[inline]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Minigame whose trigger the character currently stands in.
    #[inline]
    pub fn near_trigger(&self) -> Option<GameType> {
        self.near
    }

    fn find_trigger(&self) -> GameResult<Option<GameType>> {
        for t in &self.triggers {
            if self.graph.overlaps(self.hero.node(), t.node)? {
                return Ok(Some(t.game));
            }
        }
        Ok(None)
    }
}

impl Scene for GardenScene {
    fn kind(&self) -> GameType {
        self.kind
    }

    fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    fn update(&mut self, dt: f32, input: &dyn InputSource) -> GameResult<Option<GameType>> {
        self.hero.update(&mut self.graph, dt, input, self.kind);

        self.resolver
            .resolve(&mut self.graph, self.hero.node(), HERO_EXTENT, &[self.garden])?;

        let near = self.find_trigger()?;
        if near != self.near {
            if let Some(game) = near {
                log::info!("Standing at the {game} game, press E to start");
            }
            self.near = near;
        }

        self.camera.update_camera_position(&mut self.graph);

        Ok(match near {
            Some(game) if input.is_down(Key::E) => Some(game),
            _ => None,
        })
    }

    fn on_mouse_move(&mut self, x: f64, y: f64) {
        let (old_x, old_y) = self.last_mouse;
        let yaw = (x - old_x) as f32 * self.camera_cfg.azimuth_rate;
        let pitch = (y - old_y) as f32 * self.camera_cfg.elevation_rate;

        self.camera.set_azimuth(self.camera.azimuth() - yaw);
        let elevation = (self.camera.elevation() - pitch).clamp(
            self.camera_cfg.mouse_min_elevation,
            self.camera_cfg.mouse_max_elevation,
        );
        self.camera.set_elevation(elevation);

        self.last_mouse = (x, y);
    }

    fn on_mouse_scroll(&mut self, _dx: f64, dy: f64) {
        let zoom = self.camera.distance() + (dy as f32).to_radians() * -10.0;
        self.camera.set_distance(zoom.min(self.camera_cfg.max_zoom));
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        let Some(view) = self.camera.view(&self.graph) else {
            return;
        };
        sink.begin(view, self.camera.lens.proj());
        draw_all(&self.graph, self.camera.node(), sink);
    }
}
