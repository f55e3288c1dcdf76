use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{BreakAssignment, BreakKind, Minute, Roster};

/// Réglages de l'optimisation de couverture. Immuables pendant un calcul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// Avance maximale d'une pause par rapport à l'heure idéale (minutes).
    pub max_early: Minute,
    /// Retard maximal d'une pause (minutes).
    pub max_delay: Minute,
    /// Poids de la couverture du rayon exact face à celle du groupe.
    pub dept_weight_multiplier: i32,
    /// Poids du bonus de proximité à l'heure idéale.
    pub proximity_weight: i32,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            max_early: 15,
            max_delay: 30,
            dept_weight_multiplier: 4,
            proximity_weight: 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("invalid time: {0}")]
    InvalidTime(String),
}

/// Table des pauses, indexée par position de l'employé dans le planning.
///
/// C'est le seul état partagé mutable du calcul : chaque essai de l'optimiseur
/// travaille sur une copie, jamais sur la table vivante.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakTable {
    assignments: Vec<BreakAssignment>,
}

impl BreakTable {
    /// Table vide, un emplacement par employé du planning.
    pub fn for_roster(roster: &Roster) -> Self {
        Self {
            assignments: vec![BreakAssignment::default(); roster.len()],
        }
    }

    pub fn get(&self, employee: usize) -> &BreakAssignment {
        &self.assignments[employee]
    }

    pub fn set(&mut self, employee: usize, kind: BreakKind, start: Minute) {
        self.assignments[employee].set(kind, start);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreakAssignment> {
        self.assignments.iter()
    }
}
