// src/entities/team.rs

use crate::types::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub color: Rgb,
}

/// Teams are shared by reference between detections and entities
pub type TeamRef = Arc<Team>;

impl Team {
    pub fn new(id: u32, name: &str, color: Rgb) -> TeamRef {
        Arc::new(Self {
            id,
            name: name.to_string(),
            color,
        })
    }

    /// Exact, case-sensitive name match. No fallback to any other roster entry.
    pub fn from_name(roster: &[TeamRef], name: &str) -> Option<TeamRef> {
        roster.iter().find(|team| team.name == name).cloned()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// Name lookup over a roster supplied per match. Holds nothing else.
#[derive(Debug, Clone, Copy)]
pub struct TeamRegistry<'a> {
    roster: &'a [TeamRef],
}

impl<'a> TeamRegistry<'a> {
    pub fn new(roster: &'a [TeamRef]) -> Self {
        Self { roster }
    }

    pub fn lookup(&self, name: &str) -> Option<TeamRef> {
        Team::from_name(self.roster, name)
    }
}
