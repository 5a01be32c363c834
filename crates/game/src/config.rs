//! Tunables loaded from TOML. Every section and field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use corelib::{CollisionResolver, Lens, OrbitLimits, Vec3};

use crate::{GameError, GameResult, GameType};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub collision: CollisionConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub jump_rope: JumpRopeConfig,
}

impl GameConfig {
    pub fn from_toml_str(src: &str) -> GameResult<Self> {
        toml::from_str(src).map_err(|e| GameError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&src)?;
        log::info!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> GameResult<String> {
        toml::to_string_pretty(self).map_err(|e| GameError::Config(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Length of one correction step.
    pub nudge: f32,
    /// Correction step on the race track. Must exceed the distance the
    /// racer covers in one frame or the walls leak.
    pub racing_nudge: f32,
}

impl CollisionConfig {
    pub fn resolver(&self, kind: GameType) -> CollisionResolver {
        match kind {
            GameType::Racing => CollisionResolver::new(self.racing_nudge),
            GameType::Lobby | GameType::JumpRope | GameType::Memorize => {
                CollisionResolver::new(self.nudge)
            }
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            nudge: corelib::DEFAULT_NUDGE,
            racing_nudge: 0.3,
        }
    }
}

/// Orbit camera limits, start values and mouse handling. Angles in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub distance: f32,
    pub elevation: f32,
    pub azimuth: f32,
    /// Degrees of azimuth per pixel of horizontal mouse motion.
    pub azimuth_rate: f32,
    /// Degrees of elevation per pixel of vertical mouse motion.
    pub elevation_rate: f32,
    /// Window the mouse handler clamps elevation into before the camera's
    /// own limits apply.
    pub mouse_min_elevation: f32,
    pub mouse_max_elevation: f32,
    /// Scrolling never zooms out past this distance.
    pub max_zoom: f32,
    pub fov_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl CameraConfig {
    pub fn limits(&self) -> OrbitLimits {
        OrbitLimits {
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            min_elevation: self.min_elevation,
            max_elevation: self.max_elevation,
        }
    }

    pub fn lens(&self, aspect: f32) -> Lens {
        Lens::new(self.fov_deg.to_radians(), self.z_near, self.z_far, aspect)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 20.0,
            min_elevation: 2.0,
            max_elevation: 60.0,
            distance: 5.0,
            elevation: 40.0,
            azimuth: 0.0,
            azimuth_rate: 0.1,
            elevation_rate: 0.025,
            mouse_min_elevation: 10.0,
            mouse_max_elevation: 70.0,
            max_zoom: 7.0,
            fov_deg: 90.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Units per second while walking in the lobby.
    pub lobby_move_speed: f32,
    /// Units per second on the race track.
    pub racing_move_speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
    pub hop_height: f32,
    /// Hops per second while walking.
    pub hop_frequency: f32,
    pub jump_velocity: f32,
    /// Subtracted from the jump velocity once per frame.
    pub gravity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            lobby_move_speed: 5.0,
            racing_move_speed: 15.0,
            turn_speed: 2.0 * std::f32::consts::PI,
            hop_height: 0.05,
            hop_frequency: 25.0,
            jump_velocity: 15.0,
            gravity: 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpRopeConfig {
    /// Rope speed in radians per second at the start of a game.
    pub start_speed: f32,
    /// Added per point of the leading score.
    pub speed_step: f32,
    pub max_speed: f32,
    /// A player lower than this when the rope passes is out.
    pub clearance: f32,
    /// Remaining angle (degrees) at which the rope counts as having passed.
    pub pass_angle_deg: f32,
    pub pivot: [f32; 3],
}

impl JumpRopeConfig {
    pub fn pivot(&self) -> Vec3 {
        Vec3::from(self.pivot)
    }

    pub fn speed_for(&self, leading_score: u32) -> f32 {
        (self.start_speed + leading_score as f32 * self.speed_step).min(self.max_speed)
    }
}

impl Default for JumpRopeConfig {
    fn default() -> Self {
        Self {
            start_speed: 3.5,
            speed_step: 0.2,
            max_speed: 10.5,
            clearance: 0.5,
            pass_angle_deg: 5.0,
            pivot: [1.0, 1.0, 3.0],
        }
    }
}
