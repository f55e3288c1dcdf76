//! Règles légales (Californie) : nombre de repas et de repos dus pour un shift.
//!
//! Fonctions pures, sans état. Les seuils intègrent la tolérance de pointage
//! anticipé de 7 minutes, d'où 285 min (4h45) au lieu de 300.

use crate::model::Minute;

/// Début idéal du repas : +4h00 après le début du shift.
pub const IDEAL_MEAL_OFFSET: Minute = 240;

/// Début idéal du premier repos : +2h00.
pub const IDEAL_FIRST_REST_OFFSET: Minute = 120;

/// Début idéal du second repos : +6h30 (coupe la seconde moitié de journée).
pub const IDEAL_SECOND_REST_OFFSET: Minute = 390;

/// Second repas des très longs shifts : +8h00, posé sans optimisation.
pub const SECOND_MEAL_OFFSET: Minute = 480;

/// Troisième repos : 2h00 après la fin du second repos, posé sans optimisation.
pub const THIRD_REST_GAP: Minute = 120;

/// Marge acceptée en amont de l'heure idéale pour reconnaître une coupure repas
/// déjà présente dans le planning source.
pub const MEAL_GAP_TOLERANCE: Minute = 0;

/// Repas dus selon la durée du shift (pauses repas non déduites).
///
/// 0:00-4:45 → 0, 4:46-9:45 → 1, 9:46+ → 2. Durée négative : 0.
pub fn meals_needed(shift_duration: Minute) -> u8 {
    if shift_duration > 585 {
        2
    } else if shift_duration > 285 {
        1
    } else {
        0
    }
}

/// Repos dus selon les heures *travaillées* (durée du shift moins le repas,
/// non payé, quand il existe).
///
/// 0:00-3:29 → 0, 3:30-6:00 → 1, 6:01-9:59 → 2, 10:00+ → 3. Négatif : 0.
pub fn rests_needed(hours_worked: Minute) -> u8 {
    if hours_worked >= 600 {
        3
    } else if hours_worked > 360 {
        2
    } else if hours_worked >= 210 {
        1
    } else {
        0
    }
}

/// Heures travaillées : le repas de 30 min, non payé, ne compte pas.
pub fn hours_worked(shift_duration: Minute, has_meal: bool) -> Minute {
    if has_meal {
        shift_duration - 30
    } else {
        shift_duration
    }
}
