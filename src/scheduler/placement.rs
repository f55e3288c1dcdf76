use tracing::debug;

use super::{AdvancedSettings, BreakTable, CoverageMap};
use crate::io::minutes_to_time;
use crate::model::{BreakKind, CoverageGroup, Minute, OperatingHours, Roster, TICK};

/// Résultat de la recherche : heure retenue et score associé.
#[derive(Debug, Clone, Copy)]
pub(super) struct Placement {
    pub time: Minute,
    pub score: i32,
}

/// Cherche la meilleure heure pour une pause autour de l'heure idéale.
///
/// Candidats : l'heure idéale d'abord, puis les retards par pas de 15 min,
/// puis les avances, filtrés à la fenêtre de présence de l'employé. Chaque
/// candidat est évalué sur une copie de la table ; l'égalité de score garde le
/// premier évalué, donc l'heure idéale. Aucun candidat valide : l'heure idéale
/// est rendue telle quelle (hors heures d'ouverture possibles, jamais hors shift).
pub(super) fn find_best_time(
    roster: &Roster,
    table: &BreakTable,
    employee: usize,
    kind: BreakKind,
    ideal: Minute,
    group: &CoverageGroup,
    hours: OperatingHours,
    settings: &AdvancedSettings,
) -> Placement {
    let emp = &roster.employees[employee];
    let dept = emp.dept();
    let duration = kind.duration();

    let mut candidates = vec![ideal];
    let mut delay = TICK;
    while delay <= settings.max_delay {
        candidates.push(ideal + delay);
        delay += TICK;
    }
    let mut early = TICK;
    while early <= settings.max_early {
        candidates.push(ideal - early);
        early += TICK;
    }

    let max_offset_intervals = settings.max_early.max(settings.max_delay) / TICK;

    let mut best_time = ideal;
    let mut best_score = i32::MIN;

    for candidate in candidates {
        if !emp.shift.fits(candidate, duration) {
            continue;
        }

        let mut trial = table.clone();
        trial.set(employee, kind, candidate);
        let map = CoverageMap::compute(roster, &trial, hours);

        // Couverture minimale sur les ticks couverts par la pause.
        let mut min_dept = i32::MAX;
        let mut min_group = i32::MAX;
        let mut tick = candidate;
        while tick < candidate + duration {
            let present = map.present_at(tick);
            let dept_cov = present.iter().filter(|p| p.dept == *dept).count() as i32;
            let group_cov = present.iter().filter(|p| group.contains(&p.dept)).count() as i32;
            min_dept = min_dept.min(dept_cov);
            min_group = min_group.min(group_cov);
            tick += TICK;
        }

        let coverage_score = min_dept * settings.dept_weight_multiplier + min_group;
        let intervals_away = (candidate - ideal).abs() / TICK;
        let proximity_bonus =
            (settings.proximity_weight * (max_offset_intervals - intervals_away)).max(0);
        let score = coverage_score + proximity_bonus;

        debug!(
            employee = %emp.name,
            candidate = %minutes_to_time(candidate),
            min_dept,
            min_group,
            score,
            "candidate evaluated"
        );

        if score > best_score {
            best_score = score;
            best_time = candidate;
        }
    }

    if best_score == i32::MIN {
        debug!(
            employee = %emp.name,
            ideal = %minutes_to_time(ideal),
            "no candidate fits the shift, keeping ideal time"
        );
    }

    Placement {
        time: best_time,
        score: best_score,
    }
}
