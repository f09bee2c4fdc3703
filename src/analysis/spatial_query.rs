// src/analysis/spatial_query.rs
//
// Player ↔ ball relations for one frame.
//
// Produces per-player distances and closest points so a possession policy
// can decide who has the ball. The decision itself is not made here.

use crate::detection::{Detection, TrackerId};
use crate::entities::{Ball, Entity, Player, PossessionContext, Referee};
use crate::motion::CoordinateTransform;
use crate::types::Point;
use serde::Serialize;
use tracing::debug;

/// Relations between one player and the frame's ball
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PossessionCandidate {
    /// Position in the `players` slice the candidate was built from
    pub index: usize,
    pub tracker_id: Option<TrackerId>,
    pub team: Option<String>,
    /// Player anchor to ball center, pixel space
    pub distance: Option<f32>,
    /// Same, falling back to the last ball position seen
    pub distance_to_last_known: Option<f32>,
    pub closest_foot: Option<Point>,
    pub closest_foot_abs: Option<Point>,
    pub closest_center_abs: Option<Point>,
}

/// First referee detection in input order, or an empty referee
pub fn main_referee(detections: &[Detection]) -> Referee {
    Referee::new(detections.first().cloned())
}

/// First ball detection in input order, or an empty ball. When a
/// possession context is given the ball takes the possessing team's color.
pub fn main_ball(detections: &[Detection], possession: Option<&dyn PossessionContext>) -> Ball {
    let mut ball = Ball::new(detections.first().cloned());
    if let Some(context) = possession {
        ball.set_color(context);
    }
    ball
}

/// One candidate per player, in player order. Absolute-space fields are
/// only filled when this frame's transform is supplied.
pub fn possession_candidates(
    players: &[Player],
    ball: &Ball,
    transform: Option<&dyn CoordinateTransform>,
) -> Vec<PossessionCandidate> {
    let candidates: Vec<PossessionCandidate> = players
        .iter()
        .enumerate()
        .map(|(index, player)| PossessionCandidate {
            index,
            tracker_id: player.tracker_id(),
            team: player.team.as_ref().map(|t| t.name.clone()),
            distance: player.distance_to(ball),
            distance_to_last_known: player.distance_to_last_known(ball),
            closest_foot: player.closest_foot_to(ball),
            closest_foot_abs: transform.and_then(|t| player.closest_foot_to_abs(ball, t)),
            closest_center_abs: transform.and_then(|t| player.closest_center_abs(ball, t)),
        })
        .collect();

    debug!(
        "{} possession candidates, {} with a distance",
        candidates.len(),
        candidates.iter().filter(|c| c.distance.is_some()).count()
    );
    candidates
}

/// Candidate nearest the ball by `distance_to_last_known`. Equal distances
/// go to the later candidate, matching the foot tie-break.
pub fn closest_candidate(candidates: &[PossessionCandidate]) -> Option<&PossessionCandidate> {
    let mut best: Option<(&PossessionCandidate, f32)> = None;
    for candidate in candidates {
        let Some(d) = candidate.distance_to_last_known else {
            continue;
        };
        match best {
            Some((_, best_d)) if best_d < d => {}
            _ => best = Some((candidate, d)),
        }
    }
    best.map(|(c, _)| c)
}

/// Cache each player's transformed anchor for this frame
pub fn annotate_transformed(players: &mut [Player], transform: &dyn CoordinateTransform) {
    for player in players.iter_mut() {
        player.cache_transformed(transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ObjectClass;
    use crate::entities::{build_players, Team, TeamRef};
    use crate::motion::{HomographyTransform, TranslationTransform};
    use crate::types::Rgb;

    fn roster() -> Vec<TeamRef> {
        vec![
            Team::new(1, "TeamRed", Rgb(220, 30, 30)),
            Team::new(2, "TeamBlue", Rgb(30, 30, 220)),
        ]
    }

    fn reference_players() -> Vec<Player> {
        let a = Detection::from_bbox([0.0, 0.0, 2.0, 4.0], ObjectClass::Player)
            .with_id(1)
            .with_classification("TeamRed");
        let b = Detection::from_bbox([10.0, 0.0, 12.0, 4.0], ObjectClass::Player)
            .with_id(2)
            .with_classification("TeamBlue");
        build_players(vec![Some(a), Some(b)], &roster())
    }

    fn ball_det(x: f32, y: f32) -> Detection {
        Detection::from_bbox([x, y, x, y], ObjectClass::Ball).with_id(50)
    }

    #[test]
    fn test_reference_scene_candidates() {
        let players = reference_players();
        let ball = main_ball(&[ball_det(1.0, 4.0)], None);

        let candidates = possession_candidates(&players, &ball, None);
        assert_eq!(candidates.len(), 2);

        assert_eq!(candidates[0].distance, Some(0.0));
        assert_eq!(candidates[0].closest_foot, Some(Point::new(2.0, 4.0)));
        assert_eq!(candidates[0].team.as_deref(), Some("TeamRed"));
        assert_eq!(candidates[1].distance, Some(10.0));
        assert!(candidates[1].closest_center_abs.is_none());

        let nearest = closest_candidate(&candidates).unwrap();
        assert_eq!(nearest.tracker_id, Some(TrackerId(1)));
    }

    #[test]
    fn test_candidates_with_transform() {
        let players = reference_players();
        let ball = main_ball(&[ball_det(1.0, 4.0)], None);
        let shift = TranslationTransform::new(100.0, 0.0);

        let candidates = possession_candidates(&players, &ball, Some(&shift));
        assert_eq!(candidates[0].closest_foot_abs, Some(Point::new(102.0, 4.0)));
        assert_eq!(candidates[0].closest_center_abs, Some(Point::new(1.0, 2.0)));

        let zoom =
            HomographyTransform::new([[3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 1.0]]);
        let candidates = possession_candidates(&players, &ball, Some(&zoom));
        assert!(candidates[0].closest_center_abs.is_none());
    }

    #[test]
    fn test_missing_ball_uses_last_known_only() {
        let players = reference_players();
        let ball = Ball::with_last_known(None, Some(ball_det(11.0, 4.0)));

        let candidates = possession_candidates(&players, &ball, None);
        assert!(candidates.iter().all(|c| c.distance.is_none()));
        assert!(candidates.iter().all(|c| c.closest_foot.is_none()));
        assert_eq!(candidates[1].distance_to_last_known, Some(0.0));
        assert_eq!(
            closest_candidate(&candidates).unwrap().tracker_id,
            Some(TrackerId(2))
        );
    }

    #[test]
    fn test_closest_candidate_tie_goes_to_later() {
        let players = reference_players();
        let ball = main_ball(&[ball_det(6.0, 4.0)], None);

        let candidates = possession_candidates(&players, &ball, None);
        assert_eq!(candidates[0].distance, candidates[1].distance);
        assert_eq!(closest_candidate(&candidates).unwrap().index, 1);
        assert!(closest_candidate(&[]).is_none());
    }

    #[test]
    fn test_main_referee_first_or_empty() {
        let refs = vec![
            Detection::from_bbox([0.0, 0.0, 1.0, 2.0], ObjectClass::Referee).with_id(8),
            Detection::from_bbox([5.0, 0.0, 6.0, 2.0], ObjectClass::Referee).with_id(9),
        ];
        assert_eq!(main_referee(&refs).tracker_id(), Some(TrackerId(8)));

        let empty = main_referee(&[]);
        assert!(empty.detection.is_none());
        assert!(empty.center().is_none());
        assert!(empty.feet().is_none());
    }

    #[test]
    fn test_main_ball_colored_by_possession() {
        let roster = roster();
        let possession: Option<TeamRef> = Some(roster[1].clone());

        let ball = main_ball(&[ball_det(1.0, 1.0), ball_det(9.0, 9.0)], Some(&possession));
        assert_eq!(ball.center(), Some(Point::new(1.0, 1.0)));
        assert_eq!(ball.color, Rgb(30, 30, 220));

        let ball = main_ball(&[], Some(&possession));
        assert!(ball.detection.is_none());
        assert_eq!(ball.color, Rgb(30, 30, 220));
    }

    #[test]
    fn test_annotate_transformed() {
        let mut players = reference_players();
        players.push(Player::new(None));
        annotate_transformed(&mut players, &TranslationTransform::new(0.0, 10.0));

        assert_eq!(players[0].txy, Some(Point::new(1.0, 14.0)));
        assert_eq!(players[1].txy, Some(Point::new(11.0, 14.0)));
        assert!(players[2].txy.is_none());
    }
}
