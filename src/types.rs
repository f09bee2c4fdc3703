// src/types.rs

use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub motion: MotionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Pixels added on every side of a detection footprint before it is
    /// excluded from motion estimation
    pub margin_px: usize,
    /// Camera-fixed graphics that must never feed the motion estimator
    pub overlays: Vec<OverlayRegion>,
}

/// Rectangle in pixel coordinates, half-open: `[x1, x2) × [y1, y2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRegion {
    pub name: String,
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            margin_px: 40,
            overlays: vec![OverlayRegion::scoreboard(), OverlayRegion::broadcaster_logo()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl OverlayRegion {
    pub fn new(name: &str, x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self {
            name: name.to_string(),
            x1,
            y1,
            x2,
            y2,
            enabled: true,
        }
    }

    /// Goal counter in the top-left corner of a 1920x1080 broadcast
    pub fn scoreboard() -> Self {
        Self::new("scoreboard", 363, 64, 856, 118)
    }

    /// Broadcaster logo in the top-right corner of a 1920x1080 broadcast
    pub fn broadcaster_logo() -> Self {
        Self::new("broadcaster_logo", 1589, 95, 1805, 143)
    }

    pub fn is_inverted(&self) -> bool {
        self.x2 < self.x1 || self.y2 < self.y1
    }

    pub fn area(&self) -> usize {
        self.x2.saturating_sub(self.x1) * self.y2.saturating_sub(self.y1)
    }
}

// ============================================================================
// FRAME & GEOMETRY PRIMITIVES
// ============================================================================

/// Raw decoded video frame, row-major, `channels` bytes per pixel.
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub timestamp_ms: f64,
}

impl Frame {
    /// Buffer length is not checked here; consumers that index pixels
    /// reject a mismatch with `ShapeMismatch`.
    pub fn new(data: Vec<u8>, width: usize, height: usize, channels: usize) -> Self {
        Self {
            data,
            width,
            height,
            channels,
            timestamp_ms: 0.0,
        }
    }

    /// Black frame, handy for callers that only need a shape
    pub fn blank(width: usize, height: usize, channels: usize) -> Self {
        Self::new(vec![0; width * height * channels], width, height, channels)
    }

    pub fn with_timestamp(mut self, timestamp_ms: f64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// (height, width), matching the layout of the exclusion mask
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Display color used by downstream drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}
