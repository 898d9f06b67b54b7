//! Game state and core simulation types
//!
//! Plain data owned by the game: platforms, the jump actor, charge and fall
//! bookkeeping, and the events a round produces.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::Axis;
use crate::consts::*;
use crate::scene::ObjectId;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Standing on a platform, waiting for a press
    #[default]
    Idle,
    /// Input held, actor squatting
    Charging,
    /// Input released, actor in flight
    Airborne,
    /// Actor touched down, classifying the landing
    Resolving,
    /// Centered landing on the next platform
    Scoring,
    /// Toppling or dropping off
    Falling,
    /// Fall settled, waiting for restart
    GameOver,
}

/// A static landing block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Centre of the block
    pub position: Vec3,
    /// Width (x), height (y), depth (z)
    pub size: Vec3,
}

impl Platform {
    pub fn object_id(&self) -> ObjectId {
        ObjectId::Platform(self.id)
    }
}

/// The player-controlled block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpActor {
    pub id: u32,
    pub position: Vec3,
    /// Non-uniform scale; `scale.y` is the squat compression
    pub scale: Vec3,
    /// Euler rotation; only one axis is ever non-zero
    pub rotation: Vec3,
}

impl JumpActor {
    /// A fresh actor resting on the origin platform
    pub fn new(id: u32) -> Self {
        Self {
            id,
            position: Vec3::new(0.0, ACTOR_REST_Y, 0.0),
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId::Actor(self.id)
    }

    /// Squat one tick while charging. Returns false once the scale floor is
    /// reached and nothing was changed.
    pub fn charge_step(&mut self, charge: &mut ChargeState) -> bool {
        if charge.ready || charge.ticks >= MAX_CHARGE_TICKS {
            return false;
        }
        self.scale.y = (self.scale.y - CHARGE_SCALE_STEP).max(MIN_ACTOR_SCALE);
        charge.x_speed += CHARGE_X_SPEED_STEP;
        charge.y_speed += CHARGE_Y_SPEED_STEP;
        charge.ticks += 1;
        true
    }

    /// Advance one airborne tick along `axis`. Returns false (without moving)
    /// once the actor has dropped below its resting height.
    pub fn flight_step(&mut self, charge: &mut ChargeState, axis: Axis) -> bool {
        if self.position.y < ACTOR_REST_Y {
            return false;
        }
        if self.scale.y < 1.0 {
            self.scale.y = (self.scale.y + LAUNCH_SCALE_STEP).min(1.0);
        }
        *axis.of_mut(&mut self.position) -= charge.x_speed;
        self.position.y += charge.y_speed;
        charge.y_speed -= LAUNCH_GRAVITY;
        true
    }

    /// Snap back onto a platform surface after a flight
    pub fn touch_down(&mut self, charge: &mut ChargeState) {
        self.position.y = ACTOR_REST_Y;
        self.scale.y = 1.0;
        charge.reset();
    }
}

/// Launch velocity accumulated while the input is held
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChargeState {
    /// Set on release; blocks further charging until touch-down
    pub ready: bool,
    pub x_speed: f32,
    pub y_speed: f32,
    /// Charge ticks applied this round
    pub ticks: u32,
}

impl ChargeState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Progress of the post-fail topple/descent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallState {
    pub settled: bool,
    /// Descent per tick once rotation is done
    pub fall_speed: f32,
}

impl Default for FallState {
    fn default() -> Self {
        Self {
            settled: false,
            fall_speed: FALL_SPEED,
        }
    }
}

/// Observable game transitions, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlatformCreated { id: u32, position: Vec3 },
    PlatformEvicted { id: u32 },
    /// Centered landing on the next platform
    Scored { score: u32 },
    /// Centered landing back on the platform jumped from
    StableLanding,
    /// Fall animation settled
    Fell { score: u32 },
    Restarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_charge_accumulates_and_squashes() {
        let mut actor = JumpActor::new(1);
        let mut charge = ChargeState::default();
        for _ in 0..10 {
            assert!(actor.charge_step(&mut charge));
        }
        assert_eq!(charge.ticks, 10);
        assert!((charge.x_speed - 0.04).abs() < EPS);
        assert!((charge.y_speed - 0.08).abs() < EPS);
        assert!((actor.scale.y - 0.9).abs() < EPS);
    }

    #[test]
    fn test_charge_stops_at_scale_floor() {
        let mut actor = JumpActor::new(1);
        let mut charge = ChargeState::default();
        let mut steps = 0;
        while actor.charge_step(&mut charge) {
            steps += 1;
        }
        assert_eq!(steps, MAX_CHARGE_TICKS);
        assert!(actor.scale.y >= MIN_ACTOR_SCALE);
        assert!((actor.scale.y - MIN_ACTOR_SCALE).abs() < EPS);
    }

    #[test]
    fn test_ready_blocks_charging() {
        let mut actor = JumpActor::new(1);
        let mut charge = ChargeState {
            ready: true,
            ..Default::default()
        };
        assert!(!actor.charge_step(&mut charge));
        assert_eq!(actor.scale.y, 1.0);
    }

    #[test]
    fn test_flight_moves_toward_negative_axis() {
        let mut actor = JumpActor::new(1);
        actor.scale.y = 0.5;
        let mut charge = ChargeState {
            ready: true,
            x_speed: 0.2,
            y_speed: 0.3,
            ticks: 0,
        };
        assert!(actor.flight_step(&mut charge, Axis::Z));
        assert!((actor.position.z + 0.2).abs() < EPS);
        assert_eq!(actor.position.x, 0.0);
        assert!((actor.position.y - 1.3).abs() < EPS);
        assert!((actor.scale.y - 0.6).abs() < EPS);
        assert!((charge.y_speed - 0.29).abs() < EPS);
    }

    #[test]
    fn test_flight_scale_never_exceeds_one() {
        let mut actor = JumpActor::new(1);
        actor.scale.y = 0.95;
        let mut charge = ChargeState {
            ready: true,
            x_speed: 0.1,
            y_speed: 0.5,
            ticks: 0,
        };
        actor.flight_step(&mut charge, Axis::X);
        assert_eq!(actor.scale.y, 1.0);
    }

    #[test]
    fn test_uncharged_jump_lands_quickly() {
        let mut actor = JumpActor::new(1);
        let mut charge = ChargeState {
            ready: true,
            ..Default::default()
        };
        let mut ticks = 0;
        while actor.flight_step(&mut charge, Axis::X) {
            ticks += 1;
            assert!(ticks < 10);
        }
        assert_eq!(ticks, 2);
        actor.touch_down(&mut charge);
        assert_eq!(actor.position.y, ACTOR_REST_Y);
        assert_eq!(charge, ChargeState::default());
    }
}
