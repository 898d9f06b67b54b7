//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame steps only
//! - Seeded RNG only
//! - No rendering; drawing goes through the `Scene` adapter

pub mod autoplay;
pub mod camera;
pub mod fall;
pub mod landing;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod track;

pub use autoplay::{Autopilot, flight_distance, plan_charge};
pub use camera::{Camera, CameraFollower, Frustum, Viewport};
pub use fall::{FallProgress, fall_step, ground_target};
pub use landing::{FallMode, Landing, LandingOutcome, classify, fall_mode};
pub use schedule::{FrameScheduler, Step, Task};
pub use state::{ChargeState, FallState, GameEvent, GamePhase, JumpActor, Platform};
pub use tick::{EventTarget, Game, PointerEvent, PressKind};
pub use track::{PlatformTrack, Spawn};
