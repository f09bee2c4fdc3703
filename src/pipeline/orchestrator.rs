// src/pipeline/orchestrator.rs
//
// Frame-synchronous driver:
//
//   detections → split by class → players (+ roster) / referee / ball
//              → exclusion mask from the same detections → estimator → transform
//              → transformed anchors + possession candidates → FrameContext
//
// The only state carried between frames is the ball's last-known detection.
// Transforms are never kept: each frame gets a fresh one.

use super::frame_context::FrameContext;
use super::metrics::PipelineMetrics;
use crate::analysis::spatial_query::{
    annotate_transformed, main_ball, main_referee, possession_candidates,
};
use crate::detection::Detection;
use crate::entities::{build_players, split_by_class, PossessionContext, TeamRef};
use crate::error::Result;
use crate::motion::{MotionCompensator, MotionEstimator};
use crate::types::{Frame, SceneConfig};
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct ScenePipeline<E: MotionEstimator> {
    compensator: MotionCompensator,
    estimator: E,
    roster: Vec<TeamRef>,
    last_ball: Option<Detection>,
    metrics: PipelineMetrics,
    frame_count: u64,
}

impl<E: MotionEstimator> ScenePipeline<E> {
    pub fn new(config: &SceneConfig, estimator: E, roster: Vec<TeamRef>) -> Self {
        info!(
            "Scene pipeline ready: {} teams, margin {}px, {} overlays",
            roster.len(),
            config.motion.margin_px,
            config.motion.overlays.iter().filter(|o| o.enabled).count()
        );
        Self {
            compensator: MotionCompensator::new(config.motion.clone()),
            estimator,
            roster,
            last_ball: None,
            metrics: PipelineMetrics::new(),
            frame_count: 0,
        }
    }

    /// Run one frame through the whole scene layer.
    ///
    /// `possession` is the caller's current possession verdict, used only to
    /// color the ball. Estimator failures abort the frame and are returned
    /// unchanged; the ball's last-known detection is still updated.
    pub fn process_frame(
        &mut self,
        frame: &Frame,
        detections: Vec<Detection>,
        possession: Option<&dyn PossessionContext>,
    ) -> Result<FrameContext<E::Transform>> {
        let started = Instant::now();
        let frame_id = self.frame_count;
        self.frame_count += 1;
        self.metrics.inc(&self.metrics.total_frames);

        // ── ENTITIES ────────────────────────────────────────────
        let mut batches = split_by_class(detections);
        let mut players = build_players(
            std::mem::take(&mut batches.players).into_iter().map(Some),
            &self.roster,
        );
        let referee = main_referee(&batches.referees);

        let mut ball = main_ball(&batches.balls, possession);
        ball.last_detection = ball.last_detection.take().or_else(|| self.last_ball.clone());
        self.last_ball = ball.last_detection.clone();

        if ball.detection.is_some() {
            self.metrics.inc(&self.metrics.frames_with_ball);
        } else if ball.is_coasting() {
            self.metrics.inc(&self.metrics.ball_dropouts);
            debug!("Frame {}: ball not detected, holding last known position", frame_id);
        }

        self.metrics.add(&self.metrics.players_seen, players.len() as u64);
        self.metrics.add(
            &self.metrics.unassigned_players,
            players.iter().filter(|p| p.team.is_none()).count() as u64,
        );

        // ── CAMERA MOTION ───────────────────────────────────────
        let foreground = players
            .iter()
            .filter_map(|p| p.detection.as_ref())
            .chain(batches.balls.iter())
            .chain(batches.referees.iter())
            .chain(batches.unknown.iter());

        let transform = match self
            .compensator
            .update(&mut self.estimator, foreground, frame)
        {
            Ok(t) => t,
            Err(e) => {
                self.metrics.inc(&self.metrics.motion_failures);
                warn!("Frame {}: motion compensation failed: {}", frame_id, e);
                return Err(e);
            }
        };

        // ── RELATIONS ───────────────────────────────────────────
        annotate_transformed(&mut players, &transform);
        let candidates = possession_candidates(&players, &ball, Some(&transform));

        let rejected = candidates
            .iter()
            .filter(|c| c.distance.is_some() && c.closest_center_abs.is_none())
            .count();
        self.metrics.add(&self.metrics.rejected_abs_centers, rejected as u64);

        self.metrics.set_timing(
            &self.metrics.frame_time_us,
            started.elapsed().as_micros() as u64,
        );

        let context = FrameContext {
            frame_id,
            timestamp_ms: frame.timestamp_ms,
            players,
            referee,
            ball,
            transform,
            candidates,
        };

        debug!(
            "Frame {}: {} players, ball {}, nearest {:?}",
            frame_id,
            context.players.len(),
            if context.has_ball() { "seen" } else { "missing" },
            context.nearest_candidate().and_then(|c| c.tracker_id)
        );

        Ok(context)
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    pub fn roster(&self) -> &[TeamRef] {
        &self.roster
    }

    pub fn last_known_ball(&self) -> Option<&Detection> {
        self.last_ball.as_ref()
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Forget cross-frame state, e.g. on a scene cut
    pub fn reset(&mut self) {
        self.last_ball = None;
        self.frame_count = 0;
    }
}
