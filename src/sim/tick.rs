//! Per-frame simulation step
//!
//! One call per host animation frame. Ordering inside a frame is fixed:
//! clock, inputs, body, field, collision, camera.

use super::body::Body;
use super::camera::CameraMode;
use super::collision::{CollisionResult, circle_rect_contact};
use super::field::PillarRect;
use super::state::{GameEvent, GamePhase, GameState};

/// Inputs dispatched by the host since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap / start
    pub flap: bool,
    /// Restart after a crash
    pub restart: bool,
    /// Switch between side and chase camera
    pub toggle_camera: bool,
    /// Select a camera directly
    pub camera_mode: Option<CameraMode>,
}

/// Advance the game to host time `timestamp` (seconds)
pub fn tick(state: &mut GameState, input: &TickInput, timestamp: f32) -> Vec<GameEvent> {
    let now = state.clock.advance(timestamp);
    let mut events = Vec::new();

    if input.toggle_camera {
        events.push(state.toggle_camera());
    }
    if let Some(mode) = input.camera_mode {
        events.extend(state.set_camera_mode(mode));
    }
    if input.restart {
        events.extend(state.restart());
    }
    if input.flap {
        events.extend(state.flap(now));
    }

    match state.phase {
        GamePhase::Idle => {
            state.body.update(now, &state.config.body);
        }
        GamePhase::Playing => {
            state.play_elapsed = (now - state.play_start).max(0.0);
            let body = state.body.update(now, &state.config.body);
            let pillars = state.pillars();
            if let Some((pillar, contact)) =
                first_hit(&body, &pillars, state.config.field.collision_band)
            {
                log::info!(
                    "Hit {} pillar of pair {} at ({:.2}, {:.2})",
                    if pillar.upper { "upper" } else { "lower" },
                    pillar.instance.index,
                    contact.point.x,
                    contact.point.y
                );
                events.push(GameEvent::Collided {
                    obstacle: pillar.instance.index,
                    upper: pillar.upper,
                    point: contact.point,
                });
                state.end();
            }
        }
        GamePhase::Ended => {}
    }

    state.camera.update(&state.config.camera);
    events
}

/// First pillar near enough along the track that the body touches
pub fn first_hit<'a>(
    body: &Body,
    pillars: &'a [PillarRect],
    band: f32,
) -> Option<(&'a PillarRect, CollisionResult)> {
    let center = body.center();
    pillars
        .iter()
        .filter(|p| p.instance.offset.abs() <= band)
        .map(|p| (p, circle_rect_contact(center, body.radius, &p.rect)))
        .find(|(_, contact)| contact.hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::field::ObstacleField;

    const DT: f32 = 1.0 / 60.0;

    fn flap() -> TickInput {
        TickInput {
            flap: true,
            ..Default::default()
        }
    }

    fn restart() -> TickInput {
        TickInput {
            restart: true,
            ..Default::default()
        }
    }

    /// Run frames until the phase leaves `Playing` or `limit` seconds pass
    fn run_until_crash(state: &mut GameState, from: f32, limit: f32) -> (f32, Vec<GameEvent>) {
        let mut t = from;
        let mut events = Vec::new();
        while t < limit && state.phase == GamePhase::Playing {
            t += DT;
            events.extend(tick(state, &TickInput::default(), t));
        }
        (t, events)
    }

    #[test]
    fn test_tick_idle_to_playing() {
        let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.body.position, state.config.body.rest_height);

        let events = tick(&mut state, &flap(), 1.0);
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.play_start, 1.0);
    }

    #[test]
    fn test_idle_field_is_static() {
        let mut state = GameState::new(GameConfig::default(), 3).unwrap();
        tick(&mut state, &TickInput::default(), 1.0);
        let first = state.obstacles();
        tick(&mut state, &TickInput::default(), 7.5);
        assert_eq!(state.obstacles(), first);
        assert_eq!(state.play_elapsed, 0.0);
    }

    #[test]
    fn test_falling_into_low_pillar_ends_game() {
        // Every lower pillar is the tallest allowed, the body drops onto one
        let field = ObstacleField::from_lengths(vec![7; 10]);
        let mut state = GameState::with_field(GameConfig::default(), field).unwrap();
        tick(&mut state, &flap(), 0.0);
        let (_, events) = run_until_crash(&mut state, 0.0, 30.0);

        assert_eq!(state.phase, GamePhase::Ended);
        let hit = events
            .iter()
            .find(|e| matches!(e, GameEvent::Collided { .. }))
            .copied();
        assert!(matches!(hit, Some(GameEvent::Collided { upper: false, .. })));
    }

    #[test]
    fn test_flapping_into_upper_pillar_ends_game() {
        // Narrow gap: the upper pillar hangs from 12 to 19
        let mut config = GameConfig::default();
        config.field.pipe_gap = 10.0;
        let field = ObstacleField::from_lengths(vec![2; 10]);
        let mut state = GameState::with_field(config, field).unwrap();

        let mut t = 0.0;
        let mut events = tick(&mut state, &flap(), t);
        while t < 5.0 && state.phase == GamePhase::Playing {
            t += DT;
            events.extend(tick(&mut state, &flap(), t));
        }

        assert_eq!(state.phase, GamePhase::Ended);
        let hit = events
            .iter()
            .find(|e| matches!(e, GameEvent::Collided { .. }))
            .copied();
        assert!(matches!(
            hit,
            Some(GameEvent::Collided {
                obstacle: 0,
                upper: true,
                ..
            })
        ));
    }

    #[test]
    fn test_contact_at_full_reach_is_detected() {
        let field = ObstacleField::from_lengths(vec![7; 10]);
        let mut state = GameState::with_field(GameConfig::default(), field).unwrap();
        tick(&mut state, &flap(), 0.0);
        state.body.position = 5.0;

        let field = &state.config.field;
        // Pair 0 touching from ahead, just passed, and touching from behind
        for (travel, offset) in [(8.0, 2.0), (11.0, -1.0), (12.0, -2.0)] {
            state.play_elapsed = travel / field.scroll_speed;
            let pillars = state.pillars();
            let (pillar, _) = first_hit(&state.body, &pillars, field.collision_band).unwrap();
            assert_eq!(pillar.instance.index, 0);
            assert_eq!(pillar.instance.offset, offset);
            assert!(!pillar.upper);
        }
    }

    #[test]
    fn test_ended_freezes_simulation() {
        let field = ObstacleField::from_lengths(vec![7; 10]);
        let mut state = GameState::with_field(GameConfig::default(), field).unwrap();
        tick(&mut state, &flap(), 0.0);
        let (t, _) = run_until_crash(&mut state, 0.0, 30.0);
        assert_eq!(state.phase, GamePhase::Ended);

        let body = state.body;
        let elapsed = state.play_elapsed;
        let obstacles = state.obstacles();
        let events = tick(&mut state, &flap(), t + 2.0);
        assert!(events.is_empty());
        assert_eq!(state.body, body);
        assert_eq!(state.play_elapsed, elapsed);
        assert_eq!(state.obstacles(), obstacles);
    }

    #[test]
    fn test_restart_returns_to_idle() {
        let field = ObstacleField::from_lengths(vec![7; 10]);
        let mut state = GameState::with_field(GameConfig::default(), field).unwrap();
        tick(&mut state, &flap(), 0.0);
        let (t, _) = run_until_crash(&mut state, 0.0, 30.0);

        let events = tick(&mut state, &restart(), t + 1.0);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.body.position, state.config.body.rest_height);
        assert_eq!(state.body.tilt, 0.0);
        assert_eq!(state.score(), 0);

        // A fresh run starts its own play clock
        tick(&mut state, &flap(), t + 2.0);
        assert_eq!(state.play_start, t + 2.0);
        tick(&mut state, &TickInput::default(), t + 2.0 + DT);
        assert!(state.play_elapsed < 2.0 * DT);
    }

    #[test]
    fn test_clock_regression_is_tolerated() {
        let mut state = GameState::new(GameConfig::default(), 8).unwrap();
        tick(&mut state, &flap(), 5.0);
        tick(&mut state, &TickInput::default(), 5.1);
        let elapsed = state.play_elapsed;
        tick(&mut state, &TickInput::default(), 4.0);
        assert_eq!(state.clock.now(), 5.1);
        assert_eq!(state.play_elapsed, elapsed);
    }

    #[test]
    fn test_far_pillars_are_not_tested() {
        let field = ObstacleField::from_lengths(vec![7; 4]);
        let mut state = GameState::with_field(GameConfig::default(), field).unwrap();
        // Body resting on the floor, pillars far along the track
        state.body.position = 0.0;
        let pillars = state.pillars();
        assert!(!pillars.is_empty());
        assert!(first_hit(&state.body, &pillars, 3.0).is_none());
        // With an unbounded band the tall pillar 10 units ahead still misses,
        // the band only prunes candidates
        assert!(first_hit(&state.body, &pillars, f32::MAX).is_none());
    }

    #[test]
    fn test_camera_toggle_event() {
        let mut state = GameState::new(GameConfig::default(), 8).unwrap();
        let input = TickInput {
            toggle_camera: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, 0.1);
        assert_eq!(events, vec![GameEvent::CameraChanged(CameraMode::Chase)]);
        assert_ne!(state.camera.view, state.config.camera.chase_view);
    }
}
