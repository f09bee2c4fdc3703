// src/entities/factory.rs
//
// Turns one frame's detector output into entities.

use super::player::Player;
use super::team::{TeamRef, TeamRegistry};
use crate::detection::{Detection, ObjectClass};
use tracing::debug;

/// One frame's detections split by class, input order kept within each list
#[derive(Debug, Clone, Default)]
pub struct ClassBatches {
    pub players: Vec<Detection>,
    pub balls: Vec<Detection>,
    pub referees: Vec<Detection>,
    pub unknown: Vec<Detection>,
}

impl ClassBatches {
    /// Everything that moves on the pitch, for foreground masking
    pub fn all(&self) -> impl Iterator<Item = &Detection> {
        self.players
            .iter()
            .chain(self.balls.iter())
            .chain(self.referees.iter())
            .chain(self.unknown.iter())
    }

    pub fn len(&self) -> usize {
        self.players.len() + self.balls.len() + self.referees.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Goalkeepers are players for every purpose here.
pub fn split_by_class(detections: Vec<Detection>) -> ClassBatches {
    let mut batches = ClassBatches::default();
    for det in detections {
        match det.class {
            ObjectClass::Player | ObjectClass::Goalkeeper => batches.players.push(det),
            ObjectClass::Ball => batches.balls.push(det),
            ObjectClass::Referee => batches.referees.push(det),
            ObjectClass::Unknown => batches.unknown.push(det),
        }
    }
    batches
}

/// Wrap detections into players, resolving team labels first.
///
/// Empty slots are skipped. The resolved team is written onto the
/// detection before the player is built, so the detection alone is
/// enough to recover it later. Order is preserved; duplicate tracker ids
/// pass through untouched.
pub fn build_players<I>(detections: I, roster: &[TeamRef]) -> Vec<Player>
where
    I: IntoIterator<Item = Option<Detection>>,
{
    let registry = TeamRegistry::new(roster);
    let mut players = Vec::new();
    let mut skipped = 0usize;

    for slot in detections {
        let Some(mut det) = slot else {
            skipped += 1;
            continue;
        };

        if let Some(label) = det.data.classification.as_deref() {
            let team = registry.lookup(label);
            match &team {
                Some(t) => debug!("Detection {:?} assigned to {}", det.id, t),
                None => debug!("No team named '{}' in roster of {}", label, roster.len()),
            }
            det.data.team = team;
        }

        players.push(Player::new(Some(det)));
    }

    debug!("Built {} players ({} empty slots)", players.len(), skipped);
    players
}
