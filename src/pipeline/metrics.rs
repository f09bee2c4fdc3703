// src/pipeline/metrics.rs
//
// Running counters over a video. Cheap to clone and share with a reporter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct PipelineMetrics {
    pub total_frames: Arc<AtomicU64>,
    pub frames_with_ball: Arc<AtomicU64>,
    pub ball_dropouts: Arc<AtomicU64>,
    pub players_seen: Arc<AtomicU64>,
    pub unassigned_players: Arc<AtomicU64>,
    pub rejected_abs_centers: Arc<AtomicU64>,
    pub motion_failures: Arc<AtomicU64>,
    pub frame_time_us: Arc<AtomicU64>,
    pub started_at: Instant,
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self {
            total_frames: Arc::new(AtomicU64::new(0)),
            frames_with_ball: Arc::new(AtomicU64::new(0)),
            ball_dropouts: Arc::new(AtomicU64::new(0)),
            players_seen: Arc::new(AtomicU64::new(0)),
            unassigned_players: Arc::new(AtomicU64::new(0)),
            rejected_abs_centers: Arc::new(AtomicU64::new(0)),
            motion_failures: Arc::new(AtomicU64::new(0)),
            frame_time_us: Arc::new(AtomicU64::new(0)),
            started_at: Instant::now(),
        }
    }

    pub fn inc(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(&self, counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub fn set_timing(&self, counter: &AtomicU64, duration_us: u64) {
        counter.store(duration_us, Ordering::Relaxed);
    }

    pub fn fps(&self) -> f64 {
        let frames = self.total_frames.load(Ordering::Relaxed);
        let elapsed = self.started_at.elapsed().as_secs_f64();
        if elapsed > 0.01 {
            frames as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_frames: self.total_frames.load(Ordering::Relaxed),
            fps: self.fps(),
            frames_with_ball: self.frames_with_ball.load(Ordering::Relaxed),
            ball_dropouts: self.ball_dropouts.load(Ordering::Relaxed),
            players_seen: self.players_seen.load(Ordering::Relaxed),
            unassigned_players: self.unassigned_players.load(Ordering::Relaxed),
            rejected_abs_centers: self.rejected_abs_centers.load(Ordering::Relaxed),
            motion_failures: self.motion_failures.load(Ordering::Relaxed),
            last_frame_us: self.frame_time_us.load(Ordering::Relaxed),
            elapsed_secs: self.started_at.elapsed().as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSummary {
    pub total_frames: u64,
    pub fps: f64,
    pub frames_with_ball: u64,
    pub ball_dropouts: u64,
    pub players_seen: u64,
    pub unassigned_players: u64,
    pub rejected_abs_centers: u64,
    pub motion_failures: u64,
    pub last_frame_us: u64,
    pub elapsed_secs: f64,
}
