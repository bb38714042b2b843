//! Game state and phase transitions
//!
//! `GameState` is the single owner of everything the simulation mutates.
//! Each component's state is written only through the transitions below or
//! by `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::camera::{CameraController, CameraMode};
use super::clock::SimClock;
use super::field::{ObstacleField, ObstacleInstance, PillarRect};
use crate::config::{ConfigError, GameConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Hovering in the ready pose, waiting for the first flap
    #[default]
    Idle,
    /// Field scrolling, collisions live
    Playing,
    /// Crashed; waiting for restart
    Ended,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First flap, play clock started
    Started,
    Flapped,
    /// Body touched a pillar
    Collided {
        /// Index of the pair in the field sequence
        obstacle: usize,
        upper: bool,
        /// Contact point in the (along-track, vertical) plane
        point: Vec2,
    },
    Restarted,
    CameraChanged(CameraMode),
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Bumped for every field generation
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Move to the next stream and return an RNG for it
    pub fn next_rng(&mut self) -> Pcg32 {
        self.stream = self.stream.wrapping_add(1);
        self.to_rng()
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub rng_state: RngState,
    pub phase: GamePhase,
    pub clock: SimClock,
    pub body: Body,
    pub field: ObstacleField,
    pub camera: CameraController,
    /// Clock time of the flap that started play
    pub play_start: f32,
    /// Seconds of play; 0 while idle, frozen once ended
    pub play_elapsed: f32,
}

impl GameState {
    /// Create a new game with a field rolled from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng_state = RngState::new(seed);
        let field = ObstacleField::generate(&config.field, &mut rng_state.to_rng());
        Ok(Self::assemble(config, rng_state, field))
    }

    /// Create a new game over a fixed field
    pub fn with_field(config: GameConfig, field: ObstacleField) -> Result<Self, ConfigError> {
        config.validate()?;
        if field.is_empty() {
            return Err(ConfigError::NoObstacles);
        }
        let (min, max) = (config.field.length_min, config.field.length_max);
        if let Some(bad) = field.obstacles().iter().find(|o| !(min..=max).contains(&o.length)) {
            return Err(ConfigError::LengthOutOfRange {
                length: bad.length,
                min,
                max,
            });
        }
        Ok(Self::assemble(config, RngState::new(0), field))
    }

    fn assemble(config: GameConfig, rng_state: RngState, field: ObstacleField) -> Self {
        Self {
            body: Body::new(&config.body),
            camera: CameraController::new(&config.camera),
            config,
            rng_state,
            phase: GamePhase::Idle,
            clock: SimClock::new(),
            field,
            play_start: 0.0,
            play_elapsed: 0.0,
        }
    }

    /// Player flap. Starts play from `Idle`; ignored once ended.
    pub fn flap(&mut self, now: f32) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Idle => {
                self.body.impulse(now, &self.config.body);
                self.play_start = now;
                self.play_elapsed = 0.0;
                self.phase = GamePhase::Playing;
                log::info!("Play started at t={:.3}", now);
                Some(GameEvent::Started)
            }
            GamePhase::Playing => {
                self.body.impulse(now, &self.config.body);
                Some(GameEvent::Flapped)
            }
            GamePhase::Ended => {
                log::debug!("Flap ignored: game ended");
                None
            }
        }
    }

    /// Back to `Idle` from `Ended`; ignored in any other phase
    pub fn restart(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Ended {
            log::debug!("Restart ignored in {:?}", self.phase);
            return None;
        }

        self.body.reset(&self.config.body);
        self.play_start = 0.0;
        self.play_elapsed = 0.0;
        if self.config.field.regenerate_on_restart {
            let mut rng = self.rng_state.next_rng();
            self.field.regenerate(&self.config.field, &mut rng);
        }
        self.phase = GamePhase::Idle;
        log::info!("Restarted (stream {})", self.rng_state.stream);
        Some(GameEvent::Restarted)
    }

    /// Freeze play after a crash
    pub fn end(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Ended;
            log::info!(
                "Game over after {:.2}s, score {}",
                self.play_elapsed,
                self.score()
            );
        }
    }

    pub fn toggle_camera(&mut self) -> GameEvent {
        GameEvent::CameraChanged(self.camera.toggle())
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) -> Option<GameEvent> {
        if self.camera.mode == mode {
            return None;
        }
        self.camera.set_mode(mode);
        Some(GameEvent::CameraChanged(mode))
    }

    /// Visible obstacle instances at the current play time
    pub fn obstacles(&self) -> Vec<ObstacleInstance> {
        self.field.positions_at(self.play_elapsed, &self.config.field)
    }

    /// Visible pillars at the current play time
    pub fn pillars(&self) -> Vec<PillarRect> {
        self.field.pillars_at(self.play_elapsed, &self.config.field)
    }

    /// Pairs cleared this run
    pub fn score(&self) -> u32 {
        match self.phase {
            GamePhase::Idle => 0,
            _ => self.field.cleared_at(self.play_elapsed, &self.config.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.field.pipe_gap = 0.0;
        assert!(GameState::new(config, 1).is_err());
    }

    #[test]
    fn test_with_field_rejects_empty() {
        let field = ObstacleField::from_lengths(Vec::new());
        assert!(matches!(
            GameState::with_field(GameConfig::default(), field),
            Err(ConfigError::NoObstacles)
        ));
    }

    #[test]
    fn test_with_field_rejects_lengths_outside_range() {
        let field = ObstacleField::from_lengths([3, 12]);
        assert!(matches!(
            GameState::with_field(GameConfig::default(), field),
            Err(ConfigError::LengthOutOfRange { length: 12, min: 2, max: 7 })
        ));

        let field = ObstacleField::from_lengths([1]);
        assert!(matches!(
            GameState::with_field(GameConfig::default(), field),
            Err(ConfigError::LengthOutOfRange { length: 1, .. })
        ));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameState::new(GameConfig::default(), 99).unwrap();
        let b = GameState::new(GameConfig::default(), 99).unwrap();
        assert_eq!(a.field, b.field);
        assert_eq!(a.field.len(), 100);
    }

    #[test]
    fn test_flap_transitions() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.flap(2.0), Some(GameEvent::Started));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.play_start, 2.0);
        assert_eq!(state.flap(2.5), Some(GameEvent::Flapped));

        state.end();
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.flap(3.0), None);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_restart_only_from_ended() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        assert_eq!(state.restart(), None);
        state.flap(1.0);
        assert_eq!(state.restart(), None);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_keeps_field_by_default() {
        let mut state = GameState::new(GameConfig::default(), 5).unwrap();
        let before = state.field.clone();
        state.flap(1.0);
        state.end();
        assert_eq!(state.restart(), Some(GameEvent::Restarted));
        assert_eq!(state.field, before);
        assert_eq!(state.body, Body::new(&state.config.body));
        assert_eq!(state.play_elapsed, 0.0);
    }

    #[test]
    fn test_restart_can_regenerate_field() {
        let mut config = GameConfig::default();
        config.field.regenerate_on_restart = true;
        let mut state = GameState::new(config, 5).unwrap();
        let before = state.field.clone();
        state.flap(1.0);
        state.end();
        state.restart();
        assert_ne!(state.field, before);
        assert_eq!(state.rng_state.stream, 1);
    }

    #[test]
    fn test_set_camera_mode_only_reports_changes() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        assert_eq!(state.set_camera_mode(CameraMode::Side), None);
        assert_eq!(
            state.set_camera_mode(CameraMode::Chase),
            Some(GameEvent::CameraChanged(CameraMode::Chase))
        );
        assert_eq!(
            state.toggle_camera(),
            GameEvent::CameraChanged(CameraMode::Side)
        );
    }
}
