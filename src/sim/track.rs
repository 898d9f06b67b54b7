//! Platform track
//!
//! Bounded queue of platforms. Each new platform is offset from the latest
//! one by a random whole-unit gap along a randomly chosen axis; the oldest
//! platform is evicted once the track grows past its capacity.

use std::collections::VecDeque;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Platform;
use crate::consts::*;
use crate::error::GameError;
use crate::scene::{Scene, SceneObject};
use crate::settings::Settings;
use crate::{Direction, axis_for};

/// Result of placing a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub created: Platform,
    pub evicted: Option<Platform>,
}

#[derive(Debug, Clone)]
pub struct PlatformTrack {
    platforms: VecDeque<Platform>,
    /// Direction from the second-newest to the newest platform
    direction: Direction,
    rng: Pcg32,
    capacity: usize,
    size: Vec3,
    color: u32,
    next_id: u32,
}

impl PlatformTrack {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            platforms: VecDeque::with_capacity(settings.max_platforms + 1),
            direction: Direction::default(),
            rng: Pcg32::seed_from_u64(seed),
            capacity: settings.max_platforms,
            size: Vec3::new(
                settings.platform_width,
                settings.platform_height,
                settings.platform_depth,
            ),
            color: settings.platform_color,
            next_id: 1,
        }
    }

    /// Generate the next platform. The first one sits at the origin; every
    /// later one copies the latest position and steps 6..=10 units toward
    /// -x (Left) or -z (Right).
    pub fn create_next(&mut self, scene: &mut dyn Scene) -> Spawn {
        let (position, direction) = match self.platforms.back() {
            None => (Vec3::ZERO, self.direction),
            Some(latest) => {
                let direction = if self.rng.random::<f32>() > 0.5 {
                    Direction::Left
                } else {
                    Direction::Right
                };
                let gap = (self.rng.random::<f32>() * (MAX_PLATFORM_GAP - MIN_PLATFORM_GAP)
                    + MIN_PLATFORM_GAP)
                    .round();
                let mut position = latest.position;
                *axis_for(direction).of_mut(&mut position) -= gap;
                (position, direction)
            }
        };
        self.place(position, direction, scene)
    }

    /// Append a platform at a fixed position, evicting the oldest if the
    /// track is over capacity
    pub(crate) fn place(
        &mut self,
        position: Vec3,
        direction: Direction,
        scene: &mut dyn Scene,
    ) -> Spawn {
        let created = Platform {
            id: self.next_id,
            position,
            size: self.size,
        };
        self.next_id += 1;
        self.direction = direction;

        self.platforms.push_back(created);
        scene.add(
            created.object_id(),
            SceneObject::Platform {
                platform: created,
                color: self.color,
            },
        );
        log::debug!(
            "platform {} at ({}, {}) heading {:?}",
            created.id,
            position.x,
            position.z,
            direction
        );

        let evicted = if self.platforms.len() > self.capacity {
            self.platforms.pop_front().inspect(|old| {
                scene.remove(old.object_id());
                log::debug!("evicted platform {}", old.id);
            })
        } else {
            None
        };

        Spawn { created, evicted }
    }

    /// The platform the actor jumps from and the one it aims for
    pub fn latest_two(&self) -> Result<(&Platform, &Platform), GameError> {
        let n = self.platforms.len();
        if n < 2 {
            return Err(GameError::InsufficientPlatforms { found: n });
        }
        Ok((&self.platforms[n - 2], &self.platforms[n - 1]))
    }

    /// Remove every platform from the track and the scene
    pub fn clear(&mut self, scene: &mut dyn Scene) {
        for platform in self.platforms.drain(..) {
            scene.remove(platform.object_id());
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }
}
