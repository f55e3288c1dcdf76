use super::BreakTable;
use crate::model::{
    find_group_containing, CoverageGroup, DeptRef, Minute, OperatingHours, Roster, TICK,
};

/// Un employé présent à un tick donné, rattaché au rayon du segment travaillé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    /// Position de l'employé dans le planning.
    pub employee: usize,
    pub dept: DeptRef,
}

/// Qui travaille (et n'est pas en pause) à chaque tick de 15 min des heures
/// d'ouverture. Purement dérivée : recalculée à la demande depuis les segments
/// et une table de pauses candidate, jamais stockée comme état de référence.
#[derive(Debug, Clone)]
pub struct CoverageMap {
    hours: OperatingHours,
    ticks: Vec<Vec<Presence>>,
}

impl CoverageMap {
    pub fn compute(roster: &Roster, table: &BreakTable, hours: OperatingHours) -> Self {
        let mut ticks: Vec<Vec<Presence>> = hours.ticks().map(|_| Vec::new()).collect();

        for (idx, emp) in roster.employees.iter().enumerate() {
            let assignment = table.get(idx);
            for segment in &emp.segments {
                for (slot, tick) in hours.ticks().enumerate() {
                    if tick < segment.start || tick >= segment.end {
                        continue;
                    }
                    if assignment.on_break_at(tick) {
                        continue;
                    }
                    ticks[slot].push(Presence {
                        employee: idx,
                        dept: segment.dept.clone(),
                    });
                }
            }
        }

        Self { hours, ticks }
    }

    /// Présents au tick `t` ; vide hors des heures d'ouverture ou hors grille.
    pub fn present_at(&self, t: Minute) -> &[Presence] {
        if t < self.hours.start || t >= self.hours.end || (t - self.hours.start) % TICK != 0 {
            return &[];
        }
        let slot = ((t - self.hours.start) / TICK) as usize;
        &self.ticks[slot]
    }

    /// Nombre de collègues du rayon au tick `t`. Si le rayon appartient à un
    /// groupe de couverture, tout présent d'un rayon du groupe compte ;
    /// sinon seuls les présents du rayon exact.
    pub fn coworkers_at(&self, t: Minute, dept: &DeptRef, groups: &[CoverageGroup]) -> usize {
        let present = self.present_at(t);
        match find_group_containing(groups, dept) {
            Some(group) => present.iter().filter(|p| group.contains(&p.dept)).count(),
            None => present.iter().filter(|p| p.dept == *dept).count(),
        }
    }
}
