//! Entry point for Hopgarden.
//! Runs the game headless for a fixed number of frames with scripted input
//! and logs what a renderer would receive.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use corelib::{Mat4, NodeId};
use game::{Game, GameConfig, GameType, Key, KeyState, RenderSink, Scene};

/// Hopgarden - garden minigames driven by a scripted player
#[derive(Parser)]
#[command(name = "hopgarden")]
#[command(about = "Run the garden game headless with scripted input")]
struct Cli {
    /// TOML file with tunables (default: built-in values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Scene to start in: lobby, jump-rope, memorize or racing
    #[arg(short, long, default_value = "lobby")]
    scene: String,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Render sink that only reports what it was handed.
#[derive(Default)]
struct LogSink {
    draws: usize,
}

impl RenderSink for LogSink {
    fn begin(&mut self, view: Mat4, _proj: Mat4) {
        self.draws = 0;
        log::trace!("frame begin, eye at {}", view.inverse().w_axis.truncate());
    }

    fn draw(&mut self, node: NodeId, world: Mat4) {
        self.draws += 1;
        log::trace!("draw {node:?} at {}", world.w_axis.truncate());
    }
}

/// Keys held on `frame` for a player sitting in `scene`.
fn scripted_keys(scene: GameType, frame: u32) -> KeyState {
    let mut keys = KeyState::new();
    match scene {
        GameType::Lobby | GameType::Racing => {
            keys.press(Key::W);
            if frame % 120 < 20 {
                keys.press(Key::A);
            }
            if frame % 90 == 0 {
                keys.press(Key::Space);
            }
            keys.press(Key::E);
        }
        GameType::JumpRope => {
            keys.press(Key::T);
            if frame % 100 == 80 {
                keys.press(Key::Space);
            }
            if frame % 100 == 85 {
                keys.press(Key::RightShift);
            }
        }
        GameType::Memorize => match frame % 40 {
            0 => keys.press(Key::Q),
            10 => keys.press(Key::U),
            20 => {
                keys.press(Key::S);
                keys.press(Key::J);
            }
            39 => keys.press(Key::Space),
            _ => {}
        },
    }
    keys
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    if cli.print_config {
        print!("{}", cfg.to_toml_string().context("failed to serialize config")?);
        return Ok(());
    }

    let start: GameType = cli
        .scene
        .parse()
        .with_context(|| format!("bad --scene value '{}'", cli.scene))?;

    log::info!(
        "Starting Hopgarden. scene={}, frames={}, dt={}",
        start,
        cli.frames,
        cli.dt
    );

    let mut game = Game::new(&cfg).context("failed to build scenes")?.with_scene(start);
    let mut sink = LogSink::default();

    for frame in 0..cli.frames {
        let keys = scripted_keys(game.active(), frame);
        game.on_mouse_move(f64::from(frame % 200), 0.0);
        game.update(cli.dt, &keys)
            .with_context(|| format!("frame {frame} failed"))?;
        game.render(&mut sink);

        if frame % 60 == 0 {
            let scene = game.scene();
            log::info!(
                "frame {frame}: {} with {} nodes, {} drawn",
                scene.kind(),
                scene.graph().len(),
                sink.draws
            );
        }
    }

    let hero = game.lobby().hero().node();
    log::info!(
        "Lobby hero ended at {}",
        game.lobby().graph().world_position(hero)
    );
    if let Some(r) = game.jump_rope().last_result() {
        log::info!("Last jump rope: {:?}, player {} won", r.scores, r.winner);
    }
    if let Some(r) = game.memorize().result() {
        log::info!("Memory game: {:?}, player {} won", r.scores, r.winner);
    }

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
