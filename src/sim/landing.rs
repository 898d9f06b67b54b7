//! Landing classification
//!
//! Decides where the actor came down relative to the platform it jumped
//! from and the platform it aimed for, measured along the travel axis only.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::Platform;
use crate::error::GameError;
use crate::settings::Settings;
use crate::{Axis, Direction, axis_for};

/// Landing zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingOutcome {
    /// Centered back on the platform jumped from; no progress
    OnCurrent,
    /// Hanging over the edge of the platform jumped from
    OnCurrentEdge,
    /// Centered on the target platform; scores
    OnNext,
    /// Hanging over the edge of the target platform
    OnNextEdge,
    /// Came down in the gap
    Missed,
}

impl LandingOutcome {
    /// Whether the actor rests without falling
    pub fn is_stable(self) -> bool {
        matches!(self, LandingOutcome::OnCurrent | LandingOutcome::OnNext)
    }
}

/// A classified landing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landing {
    pub outcome: LandingOutcome,
    /// Distance from the centre of the platform the actor came down on (or,
    /// when missed, of the target platform), along the travel axis
    pub distance: f32,
}

/// Classify a landing. Pure in its inputs.
pub fn classify(
    actor: Vec3,
    current: &Platform,
    next: &Platform,
    direction: Direction,
    settings: &Settings,
) -> Landing {
    let axis = axis_for(direction);
    let distance_current = (axis.of(actor) - axis.of(current.position)).abs();
    let distance_next = (axis.of(actor) - axis.of(next.position)).abs();
    let thresh = settings.landing_threshold();
    let edge = settings.edge_bound();

    if distance_current < thresh {
        Landing {
            outcome: if distance_current < edge {
                LandingOutcome::OnCurrent
            } else {
                LandingOutcome::OnCurrentEdge
            },
            distance: distance_current,
        }
    } else if distance_next < thresh {
        Landing {
            outcome: if distance_next < edge {
                LandingOutcome::OnNext
            } else {
                LandingOutcome::OnNextEdge
            },
            distance: distance_next,
        }
    } else {
        Landing {
            outcome: LandingOutcome::Missed,
            distance: distance_next,
        }
    }
}

/// How the actor leaves the track after a bad landing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallMode {
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
    /// Straight drop, no topple
    None,
}

impl FallMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallMode::LeftTop => "leftTop",
            FallMode::LeftBottom => "leftBottom",
            FallMode::RightTop => "rightTop",
            FallMode::RightBottom => "rightBottom",
            FallMode::None => "none",
        }
    }

    /// Axis the topple rotates about; `None` for a straight drop
    pub fn rotation_axis(&self) -> Option<Axis> {
        match self {
            FallMode::LeftTop | FallMode::LeftBottom => Some(Direction::Left.rotation_axis()),
            FallMode::RightTop | FallMode::RightBottom => Some(Direction::Right.rotation_axis()),
            FallMode::None => None,
        }
    }

    /// Rotation sign per tick
    pub fn rotation_sign(&self) -> f32 {
        match self {
            FallMode::LeftTop | FallMode::RightBottom => 1.0,
            FallMode::LeftBottom | FallMode::RightTop => -1.0,
            FallMode::None => 0.0,
        }
    }

    pub fn topples(&self) -> bool {
        *self != FallMode::None
    }
}

impl fmt::Display for FallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leftTop" => Ok(FallMode::LeftTop),
            "leftBottom" => Ok(FallMode::LeftBottom),
            "rightTop" => Ok(FallMode::RightTop),
            "rightBottom" => Ok(FallMode::RightBottom),
            "none" => Ok(FallMode::None),
            other => Err(GameError::InvalidFallMode(other.to_string())),
        }
    }
}

/// Fall mode for a landing, or `None` (the Option) when the actor stays put.
///
/// Off the target's edge, the side of its centre the actor stopped on decides
/// the topple direction;
/// off the jumped-from platform it always topples forward.
pub fn fall_mode(
    landing: &Landing,
    direction: Direction,
    actor: Vec3,
    next: &Platform,
) -> Option<FallMode> {
    let axis = axis_for(direction);
    let short_of_target = axis.of(actor) > axis.of(next.position);
    match (landing.outcome, direction) {
        (LandingOutcome::OnCurrent | LandingOutcome::OnNext, _) => None,
        (LandingOutcome::OnNextEdge, Direction::Left) if short_of_target => {
            Some(FallMode::LeftBottom)
        }
        (LandingOutcome::OnNextEdge, Direction::Left) => Some(FallMode::LeftTop),
        (LandingOutcome::OnNextEdge, Direction::Right) if short_of_target => {
            Some(FallMode::RightBottom)
        }
        (LandingOutcome::OnNextEdge, Direction::Right) => Some(FallMode::RightTop),
        (LandingOutcome::OnCurrentEdge, Direction::Left) => Some(FallMode::LeftTop),
        (LandingOutcome::OnCurrentEdge, Direction::Right) => Some(FallMode::RightTop),
        (LandingOutcome::Missed, _) => Some(FallMode::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn platform_at(position: Vec3) -> Platform {
        Platform {
            id: 0,
            position,
            size: Vec3::new(4.0, 2.0, 4.0),
        }
    }

    fn left_pair() -> (Platform, Platform) {
        (
            platform_at(Vec3::ZERO),
            platform_at(Vec3::new(-8.0, 0.0, 0.0)),
        )
    }

    #[test]
    fn test_centered_on_next_scores() {
        let (current, next) = left_pair();
        let actor = Vec3::new(-9.0, 1.0, 0.0);
        let landing = classify(actor, &current, &next, Direction::Left, &Settings::default());
        assert_eq!(landing.outcome, LandingOutcome::OnNext);
        assert_eq!(landing.distance, 1.0);
        assert_eq!(fall_mode(&landing, Direction::Left, actor, &next), None);
    }

    #[test]
    fn test_next_edge_topples_by_side() {
        let (current, next) = left_pair();
        let settings = Settings::default();

        let short = Vec3::new(-6.0, 1.0, 0.0);
        let landing = classify(short, &current, &next, Direction::Left, &settings);
        assert_eq!(landing.outcome, LandingOutcome::OnNextEdge);
        assert_eq!(landing.distance, 2.0);
        assert_eq!(
            fall_mode(&landing, Direction::Left, short, &next),
            Some(FallMode::LeftBottom)
        );

        let long = Vec3::new(-10.0, 1.0, 0.0);
        let landing = classify(long, &current, &next, Direction::Left, &settings);
        assert_eq!(landing.outcome, LandingOutcome::OnNextEdge);
        assert_eq!(
            fall_mode(&landing, Direction::Left, long, &next),
            Some(FallMode::LeftTop)
        );
    }

    #[test]
    fn test_current_platform_zones() {
        let (current, next) = left_pair();
        let settings = Settings::default();

        let landing = classify(Vec3::new(-1.0, 1.0, 0.0), &current, &next, Direction::Left, &settings);
        assert_eq!(landing.outcome, LandingOutcome::OnCurrent);
        assert!(landing.outcome.is_stable());

        let edge = Vec3::new(-2.2, 1.0, 0.0);
        let landing = classify(edge, &current, &next, Direction::Left, &settings);
        assert_eq!(landing.outcome, LandingOutcome::OnCurrentEdge);
        assert_eq!(
            fall_mode(&landing, Direction::Left, edge, &next),
            Some(FallMode::LeftTop)
        );
    }

    #[test]
    fn test_gap_is_missed() {
        let current = platform_at(Vec3::ZERO);
        let next = platform_at(Vec3::new(0.0, 0.0, -6.0));
        let actor = Vec3::new(0.0, 1.0, -3.0);
        let landing = classify(actor, &current, &next, Direction::Right, &Settings::default());
        assert_eq!(landing.outcome, LandingOutcome::Missed);
        assert_eq!(
            fall_mode(&landing, Direction::Right, actor, &next),
            Some(FallMode::None)
        );
    }

    #[test]
    fn test_only_travel_axis_counts() {
        let (current, next) = left_pair();
        // Way off on z, but travel is along x
        let actor = Vec3::new(-8.0, 1.0, 30.0);
        let landing = classify(actor, &current, &next, Direction::Left, &Settings::default());
        assert_eq!(landing.outcome, LandingOutcome::OnNext);
    }

    #[test]
    fn test_fall_mode_tags() {
        for mode in [
            FallMode::LeftTop,
            FallMode::LeftBottom,
            FallMode::RightTop,
            FallMode::RightBottom,
            FallMode::None,
        ] {
            assert_eq!(mode.as_str().parse::<FallMode>().unwrap(), mode);
        }
        assert!(matches!(
            "sideways".parse::<FallMode>(),
            Err(GameError::InvalidFallMode(tag)) if tag == "sideways"
        ));
    }

    #[test]
    fn test_rotation_table() {
        assert_eq!(FallMode::LeftTop.rotation_axis(), Some(Axis::Z));
        assert_eq!(FallMode::RightBottom.rotation_axis(), Some(Axis::X));
        assert_eq!(FallMode::None.rotation_axis(), None);
        assert_eq!(FallMode::LeftTop.rotation_sign(), 1.0);
        assert_eq!(FallMode::LeftBottom.rotation_sign(), -1.0);
        assert_eq!(FallMode::RightTop.rotation_sign(), -1.0);
        assert_eq!(FallMode::RightBottom.rotation_sign(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_centered_next_always_scores(offset in -1.99f32..1.99, gap in 6u32..=10) {
            let current = platform_at(Vec3::ZERO);
            let next = platform_at(Vec3::new(0.0, 0.0, -(gap as f32)));
            let actor = Vec3::new(0.0, 1.0, -(gap as f32) + offset);
            let landing = classify(actor, &current, &next, Direction::Right, &Settings::default());
            prop_assert_eq!(landing.outcome, LandingOutcome::OnNext);
        }

        #[test]
        fn prop_classification_is_pure(x in -20.0f32..5.0) {
            let (current, next) = left_pair();
            let actor = Vec3::new(x, 1.0, 0.0);
            let settings = Settings::default();
            let a = classify(actor, &current, &next, Direction::Left, &settings);
            let b = classify(actor, &current, &next, Direction::Left, &settings);
            prop_assert_eq!(a, b);
        }
    }
}
