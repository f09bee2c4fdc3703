// src/entities/referee.rs

use super::entity::{Entity, EntityKind};
use crate::detection::Detection;

/// Referees never carry a team.
#[derive(Debug, Clone, Default)]
pub struct Referee {
    pub detection: Option<Detection>,
}

impl Referee {
    pub fn new(detection: Option<Detection>) -> Self {
        Self { detection }
    }
}

impl Entity for Referee {
    fn kind(&self) -> EntityKind {
        EntityKind::Referee
    }

    fn detection(&self) -> Option<&Detection> {
        self.detection.as_ref()
    }
}

impl PartialEq for Referee {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_as(other)
    }
}
