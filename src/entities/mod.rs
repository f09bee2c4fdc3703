// src/entities/mod.rs
//
// Per-frame scene entities wrapping tracked detections.
//
//   Detections ─→ factory (+ team roster) ─→ Player / Referee / Ball
//
// Entities live for one frame. Continuity across frames rides on the
// tracker id inside each detection, plus the ball's last-known detection.

pub mod ball;
pub mod entity;
pub mod factory;
pub mod player;
pub mod referee;
pub mod team;

pub use ball::{Ball, PossessionContext};
pub use entity::{Entity, EntityKind};
pub use factory::{build_players, split_by_class, ClassBatches};
pub use player::Player;
pub use referee::Referee;
pub use team::{Team, TeamRef, TeamRegistry};
