use corelib::{Mat4, NodeId, vec3};
use game::{Game, GameConfig, GameType, Key, KeyState, RenderSink, Scene};

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Recorder {
    frames: usize,
    view: Option<Mat4>,
    draws: Vec<(NodeId, Mat4)>,
}

impl RenderSink for Recorder {
    fn begin(&mut self, view: Mat4, _proj: Mat4) {
        self.frames += 1;
        self.view = Some(view);
        self.draws.clear();
    }

    fn draw(&mut self, node: NodeId, world: Mat4) {
        self.draws.push((node, world));
    }
}

fn game() -> Game {
    Game::new(&GameConfig::default()).unwrap()
}

#[test]
fn lobby_frame_draws_everything_but_the_camera() {
    let mut g = game();
    g.update(DT, &KeyState::from([Key::W])).unwrap();

    let mut rec = Recorder::default();
    g.render(&mut rec);
    assert_eq!(rec.frames, 1);

    let lobby = g.lobby();
    let cam = lobby.camera().node();
    assert_eq!(rec.draws.len(), lobby.graph().len() - 1);
    assert!(rec.draws.iter().all(|(id, _)| *id != cam));

    // view is the inverse of the camera's world matrix
    let view = rec.view.unwrap();
    let eye = view.inverse().w_axis.truncate();
    assert!(eye.abs_diff_eq(lobby.graph().world_position(cam), 1e-4));
}

#[test]
fn sidekick_is_drawn_where_its_parent_carries_it() {
    let mut g = game();
    for _ in 0..30 {
        g.update(DT, &KeyState::from([Key::W])).unwrap();
    }
    let mut rec = Recorder::default();
    g.render(&mut rec);

    let lobby = g.lobby();
    let hero = lobby.hero().node();
    let (_, sidekick_world) = rec
        .draws
        .iter()
        .find(|(id, _)| *id == lobby.sidekick())
        .copied()
        .unwrap();
    let local = lobby.graph()[lobby.sidekick()].model_matrix();
    let expected = lobby.graph().world_matrix(hero) * local;
    assert!(sidekick_world.abs_diff_eq(expected, 1e-5));
}

#[test]
fn walking_into_the_hose_and_pressing_e_starts_jump_rope() {
    let mut g = game();
    let hose = g.lobby().triggers()[0].node;
    let spot = g.lobby().graph().world_position(hose) - vec3(1.5, 0.0, 0.0);
    let hero = g.lobby().hero().node();
    g.lobby_mut().graph_mut()[hero].set_world_position(vec3(spot.x, 0.0, spot.z));

    g.update(DT, &KeyState::from([Key::E])).unwrap();
    assert_eq!(g.active(), GameType::JumpRope);

    // the lobby is frozen while the minigame runs
    let parked = g.lobby().graph().world_position(hero);
    g.update(DT, &KeyState::from([Key::T, Key::W])).unwrap();
    assert!(g.jump_rope().is_running());
    assert_eq!(g.lobby().graph().world_position(hero), parked);
}

#[test]
fn full_memory_round_then_back_to_lobby() {
    let mut g = game().with_scene(GameType::Memorize);
    for keys in [[Key::Q], [Key::A], [Key::J]] {
        g.update(DT, &KeyState::from(keys)).unwrap();
    }
    g.update(DT, &KeyState::new()).unwrap();
    let result = g.memorize().result().unwrap();
    assert_eq!(result.scores, [2, 1]);
    assert_eq!(result.winner, 1);

    g.update(DT, &KeyState::from([Key::Space])).unwrap();
    assert_eq!(g.active(), GameType::Lobby);
}

#[test]
fn walls_hold_over_many_frames() {
    let mut g = game();
    let hero = g.lobby().hero().node();
    g.lobby_mut().graph_mut()[hero].set_world_position(vec3(0.0, 0.0, 0.0));

    // quarter turn left, then walk straight at the left wall
    let turn = KeyState::from([Key::A]);
    for _ in 0..15 {
        g.update(DT, &turn).unwrap();
    }

    let walk = KeyState::from([Key::W]);
    let mut min_x = f32::MAX;
    for _ in 0..300 {
        g.update(DT, &walk).unwrap();
        let x = g.lobby().graph().world_position(hero).x;
        assert!(x > -3.7, "walked through the wall: x = {x}");
        min_x = min_x.min(x);
    }
    // it did reach the wall
    assert!(min_x < -3.5);
}

#[test]
fn mouse_only_reaches_the_active_scene() {
    let mut g = game();
    let racing_azimuth = g.racing().camera().azimuth();
    g.on_mouse_move(0.0, 0.0);
    g.on_mouse_move(50.0, 0.0);
    assert!((g.lobby().camera().azimuth() - 355.0).abs() < 1e-4);
    assert_eq!(g.racing().camera().azimuth(), racing_azimuth);

    g.on_mouse_scroll(0.0, 5.0);
    assert!(g.lobby().camera().distance() < 5.0);
    assert_eq!(g.scene().kind(), GameType::Lobby);
}
