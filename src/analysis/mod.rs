// src/analysis/mod.rs
//
// Spatial reasoning over one frame's entities.
//
//   Players + Ball (+ this frame's transform) → spatial_query → PossessionCandidate
//
// Who actually holds the ball is decided by the caller.

pub mod spatial_query;

pub use spatial_query::{
    annotate_transformed, closest_candidate, main_ball, main_referee, possession_candidates,
    PossessionCandidate,
};
