mod coverage;
mod placement;
mod swap;
mod types;

pub use coverage::{CoverageMap, Presence};
pub use types::{AdvancedSettings, BreakTable, SchedError};

use tracing::debug;

use crate::io::minutes_to_time;
use crate::model::{find_group_containing, BreakKind, CoverageGroup, Minute, OperatingHours, Roster};
use crate::policy;

/// Moteur de placement des pauses d'une journée.
///
/// Le calcul est une fonction pure de (planning, groupes, horaires, réglages)
/// vers une table de pauses : relançable sans effet de bord, déterministe.
/// Les employés sont traités dans l'ordre du planning, chaque placement lisant
/// la table en cours via la carte de couverture.
#[derive(Debug)]
pub struct BreakScheduler {
    roster: Roster,
    groups: Vec<CoverageGroup>,
    hours: OperatingHours,
    settings: AdvancedSettings,
}

impl BreakScheduler {
    pub fn new(
        roster: Roster,
        groups: Vec<CoverageGroup>,
        hours: OperatingHours,
        settings: AdvancedSettings,
    ) -> Self {
        Self {
            roster,
            groups,
            hours,
            settings,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn hours(&self) -> OperatingHours {
        self.hours
    }

    pub fn groups(&self) -> &[CoverageGroup] {
        &self.groups
    }

    /// Passe repas, passes repos, puis échange d'ordre. Rend la table finale.
    pub fn schedule(&self) -> BreakTable {
        let mut table = BreakTable::for_roster(&self.roster);
        self.assign_meals(&mut table);
        self.assign_rests(&mut table);
        swap::preserve_roster_order(self, &mut table);
        table
    }

    /// Repas : heure idéale +4h00, optimisée par couverture quand le rayon est
    /// groupé. Une coupure repas préexistante occupe l'emplacement et exclut
    /// tout nouveau placement. Le second repas des très longs shifts est posé
    /// sans recherche ; il partage l'emplacement du second repos, qu'un second
    /// repos éventuel remplacera.
    fn assign_meals(&self, table: &mut BreakTable) {
        for (idx, emp) in self.roster.employees.iter().enumerate() {
            let duration = emp.shift.duration_minutes();
            let meals = policy::meals_needed(duration);
            if meals == 0 {
                continue;
            }

            if let Some(start) = emp.preexisting_meal {
                table.set(idx, BreakKind::Meal, start);
                debug!(
                    employee = %emp.name,
                    meal = %minutes_to_time(start),
                    "meal already present in source schedule"
                );
            } else {
                let ideal = emp.shift.start + policy::IDEAL_MEAL_OFFSET;
                self.place(table, idx, BreakKind::Meal, ideal);
            }

            if meals >= 2 {
                table.set(
                    idx,
                    BreakKind::SecondRest,
                    emp.shift.start + policy::SECOND_MEAL_OFFSET,
                );
            }
        }
    }

    /// Repos de 15 min, selon les heures travaillées (repas déduit). Le second
    /// repos n'est posé que si un repas l'est ; le troisième est fixé 2h00
    /// après la fin du second, sans recherche.
    fn assign_rests(&self, table: &mut BreakTable) {
        for (idx, emp) in self.roster.employees.iter().enumerate() {
            let duration = emp.shift.duration_minutes();
            let has_meal = table.get(idx).get(BreakKind::Meal).is_some();
            let rests = policy::rests_needed(policy::hours_worked(duration, has_meal));

            if rests >= 1 {
                let ideal = emp.shift.start + policy::IDEAL_FIRST_REST_OFFSET;
                self.place(table, idx, BreakKind::FirstRest, ideal);
            }

            if rests >= 2 && has_meal {
                let ideal = emp.shift.start + policy::IDEAL_SECOND_REST_OFFSET;
                self.place(table, idx, BreakKind::SecondRest, ideal);
            }

            if rests >= 3 {
                if let Some(second) = table.get(idx).get(BreakKind::SecondRest) {
                    let third =
                        second + BreakKind::SecondRest.duration() + policy::THIRD_REST_GAP;
                    table.set(idx, BreakKind::ThirdRest, third);
                }
            }
        }
    }

    /// Pose une pause : à l'heure idéale sans recherche pour un rayon non
    /// groupé, sinon au meilleur candidat trouvé par l'optimiseur.
    fn place(&self, table: &mut BreakTable, idx: usize, kind: BreakKind, ideal: Minute) {
        let emp = &self.roster.employees[idx];
        match find_group_containing(&self.groups, emp.dept()) {
            None => table.set(idx, kind, ideal),
            Some(group) => {
                let placement = placement::find_best_time(
                    &self.roster,
                    table,
                    idx,
                    kind,
                    ideal,
                    group,
                    self.hours,
                    &self.settings,
                );
                table.set(idx, kind, placement.time);
                if placement.time != ideal {
                    debug!(
                        employee = %emp.name,
                        kind = kind.label(),
                        ideal = %minutes_to_time(ideal),
                        chosen = %minutes_to_time(placement.time),
                        score = placement.score,
                        "break moved for coverage"
                    );
                }
            }
        }
    }
}
