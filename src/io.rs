use crate::model::{BreakKind, DeptRef, Minute, Roster, ScheduleRow};
use crate::scheduler::{BreakTable, SchedError};
use anyhow::Context;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Parse "2:30PM" ou "14:30" en minutes depuis minuit.
pub fn parse_time(raw: &str) -> Result<Minute, SchedError> {
    let upper = raw.trim().to_ascii_uppercase();
    let bad = || SchedError::InvalidTime(raw.trim().to_string());

    let (body, meridiem) = if let Some(body) = upper.strip_suffix("PM") {
        (body.trim_end(), Some(720))
    } else if let Some(body) = upper.strip_suffix("AM") {
        (body.trim_end(), Some(0))
    } else {
        (upper.as_str(), None)
    };

    let (h_raw, m_raw) = body.split_once(':').ok_or_else(&bad)?;
    let h: Minute = h_raw.trim().parse().map_err(|_| bad())?;
    let m: Minute = m_raw.trim().parse().map_err(|_| bad())?;
    if !(0..60).contains(&m) {
        return Err(bad());
    }

    match meridiem {
        Some(offset) => {
            if !(1..=12).contains(&h) {
                return Err(bad());
            }
            Ok((h % 12) * 60 + m + offset)
        }
        None => {
            if !(0..24).contains(&h) {
                return Err(bad());
            }
            Ok(h * 60 + m)
        }
    }
}

/// Parse un intervalle "9:00AM-5:00PM" en bornes (début, fin).
pub fn parse_interval(raw: &str) -> Result<(Minute, Minute), SchedError> {
    let (start_raw, end_raw) = raw
        .split_once('-')
        .ok_or_else(|| SchedError::InvalidTime(raw.trim().to_string()))?;
    let start = parse_time(start_raw)?;
    let end = parse_time(end_raw)?;
    if end <= start {
        return Err(SchedError::InvalidTimeRange);
    }
    Ok((start, end))
}

/// Formate des minutes depuis minuit en "2:30PM" (cadran 12h, comme la grille).
pub fn minutes_to_time(minutes: Minute) -> String {
    let mut h = (minutes / 60) % 12;
    if h == 0 {
        h = 12;
    }
    let m = minutes % 60;
    let suffix = if minutes >= 720 { "PM" } else { "AM" };
    format!("{h}:{m:02}{suffix}")
}

/// Normalise "Nom, Prénom" en "Prénom Nom" ; les autres formes sont rendues telles quelles.
pub fn format_name(raw: &str) -> String {
    match raw.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => raw.trim().to_string(),
    }
}

/// Import des lignes de planning depuis CSV.
/// Header attendu : `dept,subdept,name,shift` avec shift "9:00AM-5:00PM".
///
/// Une ligne malformée (nom manquant, intervalle illisible) est ignorée avec
/// un avertissement, jamais fatale.
pub fn import_rows_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ScheduleRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row_index = i + 1; // le header occupe la ligne 0

        let main = rec.get(0).unwrap_or("").trim();
        let sub = rec.get(1).unwrap_or("").trim();
        let name = rec.get(2).unwrap_or("").trim();
        let shift = rec.get(3).unwrap_or("").trim();

        if name.is_empty() {
            warn!(row = row_index, "row without employee name skipped");
            continue;
        }
        let (start, end) = match parse_interval(shift) {
            Ok(bounds) => bounds,
            Err(err) => {
                warn!(row = row_index, name, %err, "row with unparsable shift skipped");
                continue;
            }
        };

        out.push(ScheduleRow {
            dept: DeptRef::new(main, sub),
            employee: format_name(name),
            start,
            end,
            row_index,
        });
    }
    Ok(out)
}

/// Une ligne de résultat, prête à être reportée dans la grille d'origine.
/// Les pauses ne figurent que sur la première ligne de chaque employé ;
/// les lignes de continuation restent vides.
#[derive(Debug, Clone, Serialize)]
pub struct BreakRecord {
    pub row: usize,
    pub dept: String,
    pub subdept: String,
    pub name: String,
    pub shift: String,
    pub first_rest: Option<String>,
    pub meal: Option<String>,
    pub second_rest: Option<String>,
    pub third_rest: Option<String>,
}

/// Construit les lignes de résultat dans l'ordre du planning source.
pub fn break_records(roster: &Roster, table: &BreakTable) -> Vec<BreakRecord> {
    let mut out = Vec::new();
    for (idx, emp) in roster.employees.iter().enumerate() {
        let assignment = table.get(idx);
        for (seg_idx, seg) in emp.segments.iter().enumerate() {
            let first = seg_idx == 0;
            let slot = |kind: BreakKind| {
                first
                    .then(|| assignment.get(kind).map(minutes_to_time))
                    .flatten()
            };
            out.push(BreakRecord {
                row: seg.row_index,
                dept: seg.dept.main.clone(),
                subdept: seg.dept.sub.clone(),
                name: emp.name.clone(),
                shift: format!("{}-{}", minutes_to_time(seg.start), minutes_to_time(seg.end)),
                first_rest: slot(BreakKind::FirstRest),
                meal: slot(BreakKind::Meal),
                second_rest: slot(BreakKind::SecondRest),
                third_rest: slot(BreakKind::ThirdRest),
            });
        }
    }
    out.sort_by_key(|r| r.row);
    out
}

/// Export CSV des pauses : header `row,dept,subdept,name,shift,rest1,meal,rest2,rest3`.
pub fn export_breaks_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    table: &BreakTable,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "row", "dept", "subdept", "name", "shift", "rest1", "meal", "rest2", "rest3",
    ])?;
    for rec in break_records(roster, table) {
        let row = rec.row.to_string();
        w.write_record([
            row.as_str(),
            rec.dept.as_str(),
            rec.subdept.as_str(),
            rec.name.as_str(),
            rec.shift.as_str(),
            rec.first_rest.as_deref().unwrap_or(""),
            rec.meal.as_deref().unwrap_or(""),
            rec.second_rest.as_deref().unwrap_or(""),
            rec.third_rest.as_deref().unwrap_or(""),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON des pauses (jolie mise en forme).
pub fn export_breaks_json<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    table: &BreakTable,
) -> anyhow::Result<()> {
    let records = break_records(roster, table);
    let s = serde_json::to_string_pretty(&records)?;
    fs::write(&path, s).with_context(|| "writing breaks json")?;
    Ok(())
}
