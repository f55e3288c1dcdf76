use crate::model::{CoverageGroup, DeptRef, Minute, OperatingHours};
use crate::scheduler::AdvancedSettings;
use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Document de configuration complet d'un site : groupes de couverture,
/// horaires d'ouverture par jour de semaine, réglages d'optimisation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub groups: Vec<CoverageGroup>,
    #[serde(default)]
    pub hours: WeeklyHours,
    #[serde(default)]
    pub settings: AdvancedSettings,
}

impl Config {
    /// Valide la structure. Un rayon présent dans deux groupes n'est pas
    /// fatal (il sera traité comme non groupé), mais il est signalé.
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut warnings = Vec::new();
        let mut seen_ids = Vec::new();

        for group in &self.groups {
            if group.name.trim().is_empty() {
                bail!("group {} has an empty name", group.id);
            }
            if group.departments.is_empty() {
                bail!("group '{}' has no departments", group.name);
            }
            if seen_ids.contains(&group.id) {
                bail!("duplicate group id {}", group.id);
            }
            seen_ids.push(group.id);
        }

        let mut owners: HashMap<&DeptRef, &str> = HashMap::new();
        for group in &self.groups {
            for dept in &group.departments {
                if let Some(other) = owners.insert(dept, group.name.as_str()) {
                    warnings.push(format!(
                        "{dept} listed in both '{other}' and '{}': treated as ungrouped",
                        group.name
                    ));
                }
            }
        }

        Ok(warnings)
    }
}

/// Horaires d'ouverture d'un jour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for DayHours {
    fn default() -> Self {
        // 9:00 - 21:00
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        }
    }
}

/// Horaires d'ouverture par jour de semaine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl WeeklyHours {
    /// Horaires applicables à une date donnée.
    pub fn for_date(&self, date: NaiveDate) -> OperatingHours {
        let day = match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        };
        let start = minute_of_day(day.start);
        let end = minute_of_day(day.end);
        OperatingHours::new(start, end).unwrap_or_default()
    }
}

fn minute_of_day(t: NaiveTime) -> Minute {
    (t.num_seconds_from_midnight() / 60) as Minute
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let data = fs::read(&path)
        .with_context(|| format!("reading config {}", path.as_ref().display()))?;
    let config: Config = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.as_ref().display()))?;
    for warning in config.validate()? {
        warn!("{warning}");
    }
    Ok(config)
}

pub fn export_config_json<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json)
        .with_context(|| format!("writing config {}", path.as_ref().display()))?;
    Ok(())
}
