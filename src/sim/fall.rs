//! Topple and drop animation after a bad landing
//!
//! Toppling modes first tip the actor a quarter turn over the edge, then
//! lower it until it rests against the platform side. A straight drop skips
//! the rotation and sinks to the ground.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use super::landing::FallMode;
use super::state::{FallState, JumpActor};
use crate::consts::TOPPLE_STEP;
use crate::settings::Settings;

/// What one fall tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallProgress {
    Rotated,
    Descended,
    Settled,
}

/// Height the actor comes to rest at
pub fn ground_target(mode: FallMode, edge_distance: f32, settings: &Settings) -> f32 {
    if mode.topples() {
        let overhang = edge_distance - settings.edge_bound();
        settings.ground + settings.jumper_width / 2.0 + overhang
    } else {
        settings.ground
    }
}

/// Whether the actor still has rotation left before it lies on its side
fn within_rotation_limit(mode: FallMode, rotation: f32) -> bool {
    let sign = mode.rotation_sign();
    if sign > 0.0 {
        rotation < FRAC_PI_2
    } else if sign < 0.0 {
        rotation > -FRAC_PI_2
    } else {
        false
    }
}

/// Advance the fall by one tick
pub fn fall_step(
    actor: &mut JumpActor,
    fall: &mut FallState,
    mode: FallMode,
    edge_distance: f32,
    settings: &Settings,
) -> FallProgress {
    if fall.settled {
        return FallProgress::Settled;
    }

    if let Some(axis) = mode.rotation_axis() {
        let rotation = axis.of_mut(&mut actor.rotation);
        if within_rotation_limit(mode, *rotation) {
            *rotation = (*rotation + TOPPLE_STEP * mode.rotation_sign())
                .clamp(-FRAC_PI_2, FRAC_PI_2);
            return FallProgress::Rotated;
        }
    }

    if actor.position.y > ground_target(mode, edge_distance, settings) {
        actor.position.y -= fall.fall_speed;
        FallProgress::Descended
    } else {
        fall.settled = true;
        FallProgress::Settled
    }
}
