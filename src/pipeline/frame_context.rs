// src/pipeline/frame_context.rs
//
// Everything computed for one frame. Consumers (drawing, possession
// policy) read from here; the transform inside is valid for this frame only
// and is dropped with the context.

use crate::analysis::spatial_query::{closest_candidate, PossessionCandidate};
use crate::detection::TrackerId;
use crate::entities::{Ball, Player, Referee};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct FrameContext<T> {
    pub frame_id: u64,
    pub timestamp_ms: f64,

    // Entities
    pub players: Vec<Player>,
    pub referee: Referee,
    pub ball: Ball,

    // Camera motion
    pub transform: T,

    // Relations
    pub candidates: Vec<PossessionCandidate>,
}

impl<T> FrameContext<T> {
    pub fn has_ball(&self) -> bool {
        self.ball.detection.is_some()
    }

    pub fn nearest_candidate(&self) -> Option<&PossessionCandidate> {
        closest_candidate(&self.candidates)
    }

    pub fn summary(&self) -> FrameSummary {
        let nearest = self.nearest_candidate();
        FrameSummary {
            frame_id: self.frame_id,
            timestamp_ms: self.timestamp_ms,
            players: self.players.len(),
            players_with_team: self.players.iter().filter(|p| p.team.is_some()).count(),
            referee_visible: self.referee.detection.is_some(),
            ball_visible: self.has_ball(),
            ball_coasting: self.ball.is_coasting(),
            nearest_player: nearest.and_then(|c| c.tracker_id),
            nearest_distance: nearest.and_then(|c| c.distance_to_last_known),
        }
    }
}

/// Flat per-frame digest for logs and downstream consumers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSummary {
    pub frame_id: u64,
    pub timestamp_ms: f64,
    pub players: usize,
    pub players_with_team: usize,
    pub referee_visible: bool,
    pub ball_visible: bool,
    pub ball_coasting: bool,
    pub nearest_player: Option<TrackerId>,
    pub nearest_distance: Option<f32>,
}

impl FrameSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
