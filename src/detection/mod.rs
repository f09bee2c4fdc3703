// src/detection/mod.rs
//
// Read-only view of what the external detector/tracker hands us per frame.

mod types;

pub use types::*;
