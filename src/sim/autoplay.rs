//! Demo autopilot
//!
//! Plays the game by predicting how far a jump carries for every possible
//! charge and holding the input for the one that lands nearest the centre
//! of the target platform.

use glam::Vec3;

use super::state::{ChargeState, GamePhase, JumpActor, Platform};
use super::tick::{Game, PointerEvent};
use crate::consts::MAX_CHARGE_TICKS;
use crate::{Axis, Direction, axis_for};

/// Distance travelled along the jump axis after charging for `charge_ticks`
pub fn flight_distance(charge_ticks: u32) -> f32 {
    let mut actor = JumpActor::new(0);
    let mut charge = ChargeState::default();
    for _ in 0..charge_ticks {
        if !actor.charge_step(&mut charge) {
            break;
        }
    }
    charge.ready = true;
    let start = actor.position.x;
    while actor.flight_step(&mut charge, Axis::X) {}
    start - actor.position.x
}

/// Charge ticks whose jump lands closest to the centre of `target`
pub fn plan_charge(actor: Vec3, target: &Platform, direction: Direction) -> u32 {
    let axis = axis_for(direction);
    let wanted = axis.of(actor) - axis.of(target.position);
    (0..=MAX_CHARGE_TICKS)
        .min_by(|a, b| {
            let da = (flight_distance(*a) - wanted).abs();
            let db = (flight_distance(*b) - wanted).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(0)
}

/// Feeds press/release events into a game
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    planned: Option<u32>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input to send before the next frame, if any
    pub fn input(&mut self, game: &Game) -> Option<PointerEvent> {
        match game.phase() {
            GamePhase::Idle => {
                let (_, next) = game.track().latest_two().ok()?;
                let ticks = plan_charge(game.actor().position, next, game.track().direction());
                log::debug!("autopilot charging {} ticks", ticks);
                self.planned = Some(ticks);
                Some(PointerEvent::press())
            }
            GamePhase::Charging => {
                let planned = self.planned?;
                if game.charge().ticks >= planned {
                    self.planned = None;
                    Some(PointerEvent::release())
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneLog;
    use crate::sim::camera::Viewport;
    use crate::sim::state::GameEvent;

    #[test]
    fn test_flight_distance_grows_with_charge() {
        assert!(flight_distance(0).abs() < 1e-6);
        let mut last = 0.0;
        for ticks in 1..=MAX_CHARGE_TICKS {
            let distance = flight_distance(ticks);
            assert!(distance > last);
            last = distance;
        }
        // Longest jump clears the widest gap with room to spare
        assert!(last > 12.0);
    }

    #[test]
    fn test_plan_reaches_target() {
        let target = Platform {
            id: 2,
            position: Vec3::new(-8.0, 0.0, 0.0),
            size: Vec3::new(4.0, 2.0, 4.0),
        };
        let ticks = plan_charge(Vec3::new(0.0, 1.0, 0.0), &target, Direction::Left);
        assert!((flight_distance(ticks) - 8.0).abs() < 0.5);
    }

    #[test]
    fn test_autopilot_keeps_scoring() {
        let mut scene = SceneLog::new();
        let mut game = Game::new(7);
        game.init(Viewport::new(800.0, 600.0), &mut scene).unwrap();
        let mut pilot = Autopilot::new();

        for _ in 0..20_000 {
            if game.score() >= 20 {
                break;
            }
            if let Some(event) = pilot.input(&game) {
                game.handle_pointer(event);
            }
            game.tick(&mut scene).unwrap();
            assert!(game.track().len() <= 5);
            assert_ne!(game.phase(), GamePhase::GameOver);
        }

        assert_eq!(game.score(), 20);
        let scored = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .count();
        assert_eq!(scored, 20);
    }
}
