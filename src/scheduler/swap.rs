use tracing::debug;

use super::{BreakScheduler, BreakTable, CoverageMap};
use crate::io::minutes_to_time;
use crate::model::{find_group_containing, BreakKind, DeptRef};

/// Passe de correction : l'optimisation peut inverser l'ordre du planning
/// (un employé listé avant se retrouve avec une pause plus tardive), ce qui
/// paraît faux sur un planning imprimé. Pour chaque rayon groupé et chaque
/// repos (indices 0 et 2), les heures de deux employés sont échangées quand
/// l'échange rétablit l'ordre sans changer la couverture. On n'explore jamais
/// d'autres heures que celles déjà posées.
pub(super) fn preserve_roster_order(scheduler: &BreakScheduler, table: &mut BreakTable) {
    let roster = scheduler.roster();
    let groups = scheduler.groups();
    let hours = scheduler.hours();

    // Employés par rayon de rattachement, dans l'ordre du planning.
    let mut by_dept: Vec<(DeptRef, Vec<usize>)> = Vec::new();
    for (idx, emp) in roster.employees.iter().enumerate() {
        let dept = emp.dept().clone();
        match by_dept.iter_mut().find(|(d, _)| *d == dept) {
            Some((_, members)) => members.push(idx),
            None => by_dept.push((dept, vec![idx])),
        }
    }

    for (dept, members) in &by_dept {
        if find_group_containing(groups, dept).is_none() {
            continue;
        }

        for kind in [BreakKind::FirstRest, BreakKind::SecondRest] {
            for i in 0..members.len() {
                for j in i + 1..members.len() {
                    let (a, b) = (members[i], members[j]);
                    let (Some(time_a), Some(time_b)) =
                        (table.get(a).get(kind), table.get(b).get(kind))
                    else {
                        continue;
                    };
                    if time_a <= time_b {
                        continue;
                    }

                    // L'échange doit laisser chaque pause dans le shift de
                    // son nouveau porteur.
                    let duration = kind.duration();
                    if !roster.employees[a].shift.fits(time_b, duration)
                        || !roster.employees[b].shift.fits(time_a, duration)
                    {
                        continue;
                    }

                    let before = CoverageMap::compute(roster, table, hours);
                    table.set(a, kind, time_b);
                    table.set(b, kind, time_a);
                    let after = CoverageMap::compute(roster, table, hours);

                    let identical = hours
                        .ticks()
                        .all(|t| before.coworkers_at(t, dept, groups)
                            == after.coworkers_at(t, dept, groups));

                    if identical {
                        debug!(
                            first = %roster.employees[a].name,
                            second = %roster.employees[b].name,
                            kind = kind.label(),
                            swapped = %format!("{} <-> {}", minutes_to_time(time_a), minutes_to_time(time_b)),
                            "breaks swapped to preserve schedule order"
                        );
                    } else {
                        table.set(a, kind, time_a);
                        table.set(b, kind, time_b);
                        debug!(
                            first = %roster.employees[a].name,
                            second = %roster.employees[b].name,
                            kind = kind.label(),
                            "swap would change coverage, reverted"
                        );
                    }
                }
            }
        }
    }
}
