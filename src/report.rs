use crate::io::minutes_to_time;
use crate::model::Roster;
use crate::scheduler::BreakTable;
use anyhow::{Context, Result};

/// Permet de customiser le rendu du planning de pauses (texte, mail, etc.).
pub trait ReportRenderer {
    fn render(&self, roster: &Roster, table: &BreakTable) -> String;
}

/// Rendu texte simple, une ligne par employé, dans l'ordre du planning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl ReportRenderer for TextReport {
    fn render(&self, roster: &Roster, table: &BreakTable) -> String {
        let mut out = String::new();
        for (idx, emp) in roster.employees.iter().enumerate() {
            let assignment = table.get(idx);
            let mut line = format!(
                "{} ({}) | {} - {}",
                emp.name,
                emp.dept(),
                minutes_to_time(emp.shift.start),
                minutes_to_time(emp.shift.end)
            );
            for (kind, start) in assignment.iter() {
                line.push_str(&format!(" | {} {}", kind.label(), minutes_to_time(start)));
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// Résumé d'un seul employé, pour affichage ou vérification ponctuelle.
pub fn employee_summary(roster: &Roster, table: &BreakTable, name: &str) -> Result<String> {
    let idx = roster
        .employees
        .iter()
        .position(|e| e.name == name)
        .with_context(|| format!("unknown employee: {name}"))?;
    let emp = &roster.employees[idx];

    let mut lines = vec![format!(
        "{} | shift {} - {}",
        emp.name,
        minutes_to_time(emp.shift.start),
        minutes_to_time(emp.shift.end)
    )];
    for (kind, start) in table.get(idx).iter() {
        lines.push(format!(
            "  {} {} - {}",
            kind.label(),
            minutes_to_time(start),
            minutes_to_time(start + kind.duration())
        ));
    }
    Ok(lines.join("\n"))
}
