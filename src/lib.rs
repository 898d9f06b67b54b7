//! Hop Block - a charge-and-hop platform arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (charge, flight, landing, topple, camera)
//! - `scene`: Drawable scene adapter the simulation reports into
//! - `settings`: Data-driven game configuration
//! - `error`: Error taxonomy for invariant violations and bad configuration

pub mod error;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use scene::{Scene, SceneLog, SceneObject};
pub use settings::Settings;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Y-scale lost per charge tick (the block "squats")
    pub const CHARGE_SCALE_STEP: f32 = 0.01;
    /// Horizontal launch speed gained per charge tick
    pub const CHARGE_X_SPEED_STEP: f32 = 0.004;
    /// Vertical launch speed gained per charge tick
    pub const CHARGE_Y_SPEED_STEP: f32 = 0.008;
    /// Lowest y-scale the block can be squashed to
    pub const MIN_ACTOR_SCALE: f32 = 0.02;
    /// Charge ticks until the scale floor is reached: (1 - 0.02) / 0.01
    pub const MAX_CHARGE_TICKS: u32 = 98;

    /// Y-scale regained per airborne tick
    pub const LAUNCH_SCALE_STEP: f32 = 0.1;
    /// Vertical speed lost per airborne tick
    pub const LAUNCH_GRAVITY: f32 = 0.01;
    /// Resting height of the actor on top of a platform
    pub const ACTOR_REST_Y: f32 = 1.0;

    /// Rotation applied per topple tick (radians)
    pub const TOPPLE_STEP: f32 = 0.1;
    /// Descent per tick once toppling is done
    pub const FALL_SPEED: f32 = 0.2;

    /// Camera look-at movement per tick, per axis
    pub const CAMERA_STEP: f32 = 0.1;
    /// Camera snaps to its target once the gap is below this
    pub const CAMERA_SNAP: f32 = 0.05;

    /// Platform offset range (inclusive, world units)
    pub const MIN_PLATFORM_GAP: f32 = 6.0;
    pub const MAX_PLATFORM_GAP: f32 = 10.0;
}

/// World axis a direction moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }

    /// Mutable component of `v` along this axis
    #[inline]
    pub fn of_mut(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Z => &mut v.z,
        }
    }
}

/// Which way the next platform lies from the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Next platform is offset along -x
    #[default]
    Left,
    /// Next platform is offset along -z
    Right,
}

impl Direction {
    /// Axis the actor travels along (and platforms are offset along)
    #[inline]
    pub fn axis(self) -> Axis {
        axis_for(self)
    }

    /// Axis the actor rotates about when it topples off an edge
    #[inline]
    pub fn rotation_axis(self) -> Axis {
        match self {
            Direction::Left => Axis::Z,
            Direction::Right => Axis::X,
        }
    }
}

/// Travel axis for a direction. Every component that branches on direction
/// goes through here.
#[inline]
pub fn axis_for(direction: Direction) -> Axis {
    match direction {
        Direction::Left => Axis::X,
        Direction::Right => Axis::Z,
    }
}
