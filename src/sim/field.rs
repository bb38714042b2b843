//! Procedural obstacle field with seamless infinite scrolling
//!
//! The field is a finite sequence of pipe pairs laid out along the track at a
//! fixed spacing. Once scrolling starts the sequence repeats with period
//! `count * pipe_distance`. Only a bounded set of translated copies ("windows")
//! of the sequence is ever materialized:
//! - the primary window, the scroll offset reduced by whole periods
//! - the window one period ahead, so the next repetition is already in place
//! - the window one period behind, once at least one full period has scrolled
//!   past, so pairs the body just cleared do not pop out
//!
//! Positions are a pure function of elapsed play time.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::FieldConfig;

/// One pipe pair: a lower pillar of `length` units and an upper pillar of
/// `max_span - length` units, separated by the configured gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub length: u32,
}

impl Obstacle {
    #[inline]
    pub fn lower_height(&self) -> f32 {
        self.length as f32
    }

    #[inline]
    pub fn upper_height(&self, max_span: u32) -> f32 {
        max_span.saturating_sub(self.length) as f32
    }
}

/// An obstacle placed in the world at query time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleInstance {
    /// Index into the field's sequence
    pub index: usize,
    /// Which copy of the sequence: -1 behind, 0 primary, 1 ahead
    pub window: i32,
    /// Along-track position relative to the body (positive = ahead)
    pub offset: f32,
    pub obstacle: Obstacle,
}

/// A single pillar as a world rectangle in the (along-track, vertical) plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarRect {
    pub instance: ObstacleInstance,
    /// Hanging from above rather than standing on the floor
    pub upper: bool,
    pub rect: Rect,
}

/// Generate `count` obstacles with uniformly random lengths in `lengths`
pub fn generate<R: Rng + ?Sized>(
    count: u32,
    lengths: RangeInclusive<u32>,
    rng: &mut R,
) -> Vec<Obstacle> {
    (0..count)
        .map(|_| Obstacle {
            length: rng.random_range(lengths.clone()),
        })
        .collect()
}

/// The obstacle sequence for one field lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Roll a new field from the configured distribution
    pub fn generate<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> Self {
        let obstacles = generate(
            config.pipe_count,
            config.length_min..=config.length_max,
            rng,
        );
        log::info!(
            "Generated {} obstacles (lengths {}..={})",
            obstacles.len(),
            config.length_min,
            config.length_max
        );
        Self { obstacles }
    }

    /// Field with a fixed sequence of lengths
    pub fn from_lengths(lengths: impl IntoIterator<Item = u32>) -> Self {
        Self {
            obstacles: lengths.into_iter().map(|length| Obstacle { length }).collect(),
        }
    }

    /// Replace the sequence with a fresh roll
    pub fn regenerate<R: Rng + ?Sized>(&mut self, config: &FieldConfig, rng: &mut R) {
        *self = Self::generate(config, rng);
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Along-track length after which the sequence repeats
    #[inline]
    pub fn period(&self, config: &FieldConfig) -> f32 {
        self.obstacles.len() as f32 * config.pipe_distance
    }

    /// Obstacle instances within the visibility margins after `elapsed` seconds of play
    pub fn positions_at(&self, elapsed: f32, config: &FieldConfig) -> Vec<ObstacleInstance> {
        if self.obstacles.is_empty() {
            return Vec::new();
        }

        let travelled = elapsed.max(0.0) * config.scroll_speed;
        let period = self.period(config);
        let base = config.starting_distance - travelled;
        let cycles = (travelled / period).floor();
        let primary = base + cycles * period;

        let mut windows = Vec::with_capacity(3);
        // Nothing lies behind the start until a full period has gone by
        if cycles >= 1.0 {
            windows.push((-1, primary - period));
        }
        windows.push((0, primary));
        windows.push((1, primary + period));

        let behind = -config.view_behind;
        let ahead = config.view_ahead;
        let mut instances = Vec::new();
        for (window, start) in windows {
            for (index, obstacle) in self.obstacles.iter().enumerate() {
                let offset = start + index as f32 * config.pipe_distance;
                if offset >= behind && offset <= ahead {
                    instances.push(ObstacleInstance {
                        index,
                        window,
                        offset,
                        obstacle: *obstacle,
                    });
                }
            }
        }
        instances
    }

    /// Lower and upper pillar rectangles of every visible instance
    pub fn pillars_at(&self, elapsed: f32, config: &FieldConfig) -> Vec<PillarRect> {
        self.positions_at(elapsed, config)
            .into_iter()
            .flat_map(|instance| pillar_rects(instance, config))
            .collect()
    }

    /// Number of pairs whose trailing edge has passed the body
    pub fn cleared_at(&self, elapsed: f32, config: &FieldConfig) -> u32 {
        let travelled = elapsed.max(0.0) * config.scroll_speed;
        let past = travelled - config.starting_distance - config.pillar_half_width;
        if past <= 0.0 {
            0
        } else {
            (past / config.pipe_distance).ceil() as u32
        }
    }
}

/// Lower pillar stands on the floor; upper pillar starts `pipe_gap` above it
pub fn pillar_rects(instance: ObstacleInstance, config: &FieldConfig) -> [PillarRect; 2] {
    let hw = config.pillar_half_width;
    let x = instance.offset - hw;
    let lower_h = instance.obstacle.lower_height();
    let upper_h = instance.obstacle.upper_height(config.max_span);

    [
        PillarRect {
            instance,
            upper: false,
            rect: Rect::new(x, 0.0, 2.0 * hw, lower_h),
        },
        PillarRect {
            instance,
            upper: true,
            rect: Rect::new(x, lower_h + config.pipe_gap, 2.0 * hw, upper_h),
        },
    ]
}
