use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::policy;

/// Minutes depuis minuit. La journée est échantillonnée par pas de 15 min.
pub type Minute = i32;

/// Pas d'échantillonnage de la couverture.
pub const TICK: Minute = 15;

/// Rayon / sous-rayon (ex: "Frontline" / "Cashier Bldg 2").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeptRef {
    pub main: String,
    pub sub: String,
}

impl DeptRef {
    pub fn new<M: Into<String>, S: Into<String>>(main: M, sub: S) -> Self {
        Self {
            main: main.into(),
            sub: sub.into(),
        }
    }
}

impl std::fmt::Display for DeptRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.main, self.sub)
    }
}

/// Ligne brute du planning, déjà extraite du tableur par le collaborateur amont.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub dept: DeptRef,
    pub employee: String,
    pub start: Minute,
    pub end: Minute,
    /// Index de la ligne d'origine, pour réécrire les résultats dans la grille.
    pub row_index: usize,
}

/// Bloc de travail contigu d'un employé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSegment {
    pub dept: DeptRef,
    pub start: Minute,
    pub end: Minute,
    pub row_index: usize,
}

/// Fenêtre de présence d'un employé : min des débuts, max des fins de segments.
/// Toujours recalculée depuis les segments, jamais modifiée directement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub start: Minute,
    pub end: Minute,
}

impl Shift {
    pub fn duration_minutes(&self) -> Minute {
        self.end - self.start
    }

    /// Une pause [t, t + duration) tient-elle entièrement dans la fenêtre ?
    pub fn fits(&self, t: Minute, duration: Minute) -> bool {
        t >= self.start && t + duration <= self.end
    }
}

/// Employé agrégé : segments triés par heure de début.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub segments: Vec<ShiftSegment>,
    pub shift: Shift,
    /// Coupure repas déjà présente dans le planning source (début, en minutes).
    pub preexisting_meal: Option<Minute>,
}

impl Employee {
    /// Rayon de rattachement : celui du premier segment (ordre du planning).
    pub fn dept(&self) -> &DeptRef {
        &self.segments[0].dept
    }
}

/// Planning agrégé, dans l'ordre d'apparition des employés dans les lignes source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub employees: Vec<Employee>,
}

impl Roster {
    /// Regroupe les lignes par employé en préservant l'ordre du planning,
    /// calcule la fenêtre de présence et détecte une coupure repas préexistante.
    pub fn from_rows(rows: Vec<ScheduleRow>) -> Self {
        let mut employees: Vec<Employee> = Vec::new();

        for row in rows {
            if row.end <= row.start {
                warn!(employee = %row.employee, "segment with end <= start skipped");
                continue;
            }
            let segment = ShiftSegment {
                dept: row.dept,
                start: row.start,
                end: row.end,
                row_index: row.row_index,
            };
            match employees.iter_mut().find(|e| e.name == row.employee) {
                Some(emp) => emp.segments.push(segment),
                None => employees.push(Employee {
                    name: row.employee,
                    segments: vec![segment],
                    shift: Shift { start: 0, end: 0 },
                    preexisting_meal: None,
                }),
            }
        }

        for emp in &mut employees {
            emp.segments.sort_by_key(|s| s.start);
            emp.shift = Shift {
                start: emp.segments.iter().map(|s| s.start).min().unwrap_or(0),
                end: emp.segments.iter().map(|s| s.end).max().unwrap_or(0),
            };
            emp.preexisting_meal = detect_preexisting_meal(&emp.segments, emp.shift.start);
        }

        Self { employees }
    }

    pub fn find_employee(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// Un trou de 30 min exactement entre deux segments consécutifs, commençant au
/// plus tôt à l'heure idéale du repas (moins une tolérance), est une coupure
/// repas déjà posée par le planning source. Un seul segment : jamais de détection.
fn detect_preexisting_meal(segments: &[ShiftSegment], shift_start: Minute) -> Option<Minute> {
    let earliest = shift_start + policy::IDEAL_MEAL_OFFSET - policy::MEAL_GAP_TOLERANCE;
    segments.windows(2).find_map(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        (b.start == a.end + BreakKind::Meal.duration() && a.end >= earliest).then_some(a.end)
    })
}

/// Groupe de couverture : rayons interchangeables pour le comptage de présence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGroup {
    pub id: u32,
    pub name: String,
    pub departments: Vec<DeptRef>,
}

impl CoverageGroup {
    pub fn contains(&self, dept: &DeptRef) -> bool {
        self.departments.iter().any(|d| d == dept)
    }
}

/// Groupe contenant ce rayon, ou `None` s'il n'est dans aucun groupe.
/// Un rayon listé dans plusieurs groupes est une incohérence de configuration :
/// il est traité comme non groupé (pas d'optimisation) plutôt que de lever.
/// L'incohérence est signalée une fois, à la validation de la configuration.
pub fn find_group_containing<'a>(
    groups: &'a [CoverageGroup],
    dept: &DeptRef,
) -> Option<&'a CoverageGroup> {
    let mut matches = groups.iter().filter(|g| g.contains(dept));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first)
}

/// Plage horaire d'ouverture sur laquelle la couverture est évaluée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub start: Minute,
    pub end: Minute,
}

impl OperatingHours {
    /// Valide que `end > start`.
    pub fn new(start: Minute, end: Minute) -> Result<Self, String> {
        if end <= start {
            return Err("operating hours end must be after start".to_string());
        }
        Ok(Self { start, end })
    }

    /// Ticks de 15 min dans [start, end).
    pub fn ticks(&self) -> impl Iterator<Item = Minute> {
        (self.start..self.end).step_by(TICK as usize)
    }
}

impl Default for OperatingHours {
    fn default() -> Self {
        // 9:00 - 21:00
        Self {
            start: 9 * 60,
            end: 21 * 60,
        }
    }
}

/// Type de pause, indexé dans l'ordre d'affichage du planning imprimé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    FirstRest,
    Meal,
    SecondRest,
    ThirdRest,
}

impl BreakKind {
    pub const ALL: [BreakKind; 4] = [
        BreakKind::FirstRest,
        BreakKind::Meal,
        BreakKind::SecondRest,
        BreakKind::ThirdRest,
    ];

    pub fn index(self) -> usize {
        match self {
            BreakKind::FirstRest => 0,
            BreakKind::Meal => 1,
            BreakKind::SecondRest => 2,
            BreakKind::ThirdRest => 3,
        }
    }

    /// Durée fixe : 15 min pour les repos, 30 min pour le repas.
    pub fn duration(self) -> Minute {
        match self {
            BreakKind::Meal => 30,
            _ => 15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BreakKind::FirstRest => "first rest",
            BreakKind::Meal => "meal",
            BreakKind::SecondRest => "second rest",
            BreakKind::ThirdRest => "third rest",
        }
    }
}

/// Pauses d'un employé : jusqu'à quatre créneaux épars, indexés par type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakAssignment {
    slots: [Option<Minute>; 4],
}

impl BreakAssignment {
    pub fn get(&self, kind: BreakKind) -> Option<Minute> {
        self.slots[kind.index()]
    }

    pub fn set(&mut self, kind: BreakKind, start: Minute) {
        self.slots[kind.index()] = Some(start);
    }

    /// Pauses posées, dans l'ordre des index.
    pub fn iter(&self) -> impl Iterator<Item = (BreakKind, Minute)> + '_ {
        BreakKind::ALL
            .iter()
            .filter_map(|&k| self.get(k).map(|t| (k, t)))
    }

    /// L'employé est-il en pause pendant le tick [tick, tick + 15) ?
    pub fn on_break_at(&self, tick: Minute) -> bool {
        self.iter()
            .any(|(kind, start)| tick < start + kind.duration() && tick + TICK > start)
    }
}
