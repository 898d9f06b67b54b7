//! Camera follow and viewport projection
//!
//! The camera eye never moves; only its look-at point glides toward the
//! midpoint of the two newest platforms, a fixed step per tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::Platform;
use crate::consts::*;

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Orthographic frustum bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    /// Bounds of ±size/divisor around the look-at point
    pub fn from_viewport(viewport: Viewport, divisor: f32) -> Self {
        Self {
            left: -viewport.width / divisor,
            right: viewport.width / divisor,
            top: viewport.height / divisor,
            bottom: -viewport.height / divisor,
            near: 0.0,
            far: 5000.0,
        }
    }
}

/// What the scene is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub frustum: Frustum,
}

impl Camera {
    pub fn new(eye: Vec3, viewport: Viewport, divisor: f32) -> Self {
        Self {
            eye,
            look_at: Vec3::ZERO,
            frustum: Frustum::from_viewport(viewport, divisor),
        }
    }
}

/// Smoothed look-at target
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraFollower {
    pub current: Vec3,
    pub next: Vec3,
}

impl CameraFollower {
    /// Aim at the midpoint of two platforms (ground plane, y = 0)
    pub fn retarget(&mut self, a: &Platform, b: &Platform) {
        self.next = Vec3::new(
            (a.position.x + b.position.x) / 2.0,
            0.0,
            (a.position.z + b.position.z) / 2.0,
        );
    }

    /// Move `current` one step toward `next` on x and z. Each axis snaps to
    /// its target once the gap drops under the snap distance. Returns true
    /// if anything moved.
    pub fn step(&mut self) -> bool {
        let before = self.current;
        step_axis(&mut self.current.x, self.next.x);
        step_axis(&mut self.current.z, self.next.z);
        self.current != before
    }

    pub fn is_settled(&self) -> bool {
        self.current.x == self.next.x && self.current.z == self.next.z
    }

    /// Point the camera looks at this tick
    pub fn look_at(&self) -> Vec3 {
        Vec3::new(self.current.x, 0.0, self.current.z)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn step_axis(current: &mut f32, target: f32) {
    let gap = *current - target;
    if gap == 0.0 {
        return;
    }
    *current -= CAMERA_STEP.copysign(gap);
    if (*current - target).abs() < CAMERA_SNAP {
        *current = target;
    }
}
