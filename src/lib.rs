#![forbid(unsafe_code)]
//! Pausier — placement des pauses légales d'une journée de magasin.
//!
//! - Règles Californie : repas selon la durée du shift, repos selon les heures travaillées.
//! - Lissage de couverture par rayon ou groupe de rayons interchangeables.
//! - Recherche bornée autour de l'heure idéale, déterministe et traçable.
//! - Échange final des heures pour préserver l'ordre du planning imprimé.
//! - Tout en minutes depuis minuit ; parsing "2:30PM"/"14:30" ; CSV/JSON en périphérie.

pub mod config;
pub mod io;
pub mod model;
pub mod policy;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use config::{load_config_from_file, Config, DayHours, WeeklyHours};
pub use model::{
    find_group_containing, BreakAssignment, BreakKind, CoverageGroup, DeptRef, Employee, Minute,
    OperatingHours, Roster, ScheduleRow, Shift, ShiftSegment,
};
pub use report::{employee_summary, ReportRenderer, TextReport};
pub use scheduler::{
    AdvancedSettings, BreakScheduler, BreakTable, CoverageMap, Presence, SchedError,
};
pub use storage::{JsonStorage, Storage};
