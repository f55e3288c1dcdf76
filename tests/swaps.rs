#![forbid(unsafe_code)]
use pausier::{
    AdvancedSettings, BreakKind, BreakScheduler, BreakTable, CoverageGroup, CoverageMap, DeptRef,
    OperatingHours, Roster, ScheduleRow,
};

#[test]
fn rests_are_swapped_back_into_roster_order() {
    // Ana figure avant Bo sur la grille mais commence plus tard : sans
    // échange, ses repos tomberaient après ceux de Bo.
    let scheduler = scheduler_for(vec![
        row("Ana Lopez", 540, 1020, 1),
        row("Bo Reed", 480, 960, 2),
    ]);
    let table = scheduler.schedule();

    let ana = table.get(0);
    assert_eq!(ana.get(BreakKind::FirstRest), Some(600));
    assert_eq!(ana.get(BreakKind::Meal), Some(780));
    assert_eq!(ana.get(BreakKind::SecondRest), Some(870));

    let bo = table.get(1);
    assert_eq!(bo.get(BreakKind::FirstRest), Some(660));
    assert_eq!(bo.get(BreakKind::Meal), Some(720));
    assert_eq!(bo.get(BreakKind::SecondRest), Some(930));
}

#[test]
fn meals_are_never_swapped() {
    let scheduler = scheduler_for(vec![
        row("Ana Lopez", 540, 1020, 1),
        row("Bo Reed", 480, 960, 2),
    ]);
    let table = scheduler.schedule();

    // Les repas restent à leur heure calculée, même désordonnés.
    assert!(table.get(0).get(BreakKind::Meal) > table.get(1).get(BreakKind::Meal));
}

#[test]
fn swap_is_skipped_when_the_time_escapes_the_shift() {
    // Bo finit à 15:40 : prendre le second repos d'Ana (15:30) déborderait
    // de son shift de 5 minutes, l'échange est abandonné.
    let scheduler = scheduler_for(vec![
        row("Ana Lopez", 540, 1020, 1),
        row("Bo Reed", 480, 940, 2),
    ]);
    let table = scheduler.schedule();

    assert_eq!(table.get(0).get(BreakKind::FirstRest), Some(600));
    assert_eq!(table.get(1).get(BreakKind::FirstRest), Some(660));

    assert_eq!(table.get(0).get(BreakKind::SecondRest), Some(930));
    assert_eq!(table.get(1).get(BreakKind::SecondRest), Some(870));
}

#[test]
fn swaps_leave_group_coverage_untouched() {
    let scheduler = scheduler_for(vec![
        row("Ana Lopez", 540, 1020, 1),
        row("Bo Reed", 480, 960, 2),
    ]);
    let swapped = scheduler.schedule();

    // Même table, sans l'échange d'ordre : les heures calculées brutes.
    let mut raw = BreakTable::for_roster(scheduler.roster());
    raw.set(0, BreakKind::FirstRest, 660);
    raw.set(0, BreakKind::Meal, 780);
    raw.set(0, BreakKind::SecondRest, 930);
    raw.set(1, BreakKind::FirstRest, 600);
    raw.set(1, BreakKind::Meal, 720);
    raw.set(1, BreakKind::SecondRest, 870);

    let before = CoverageMap::compute(scheduler.roster(), &raw, scheduler.hours());
    let after = CoverageMap::compute(scheduler.roster(), &swapped, scheduler.hours());

    let dept = DeptRef::new("Frontline", "Cashier");
    for t in scheduler.hours().ticks() {
        assert_eq!(
            before.coworkers_at(t, &dept, scheduler.groups()),
            after.coworkers_at(t, &dept, scheduler.groups()),
            "coverage changed at {t}"
        );
    }
}

#[test]
fn ungrouped_depts_are_left_alone() {
    // Hors groupe, pas d'échange : les heures idéales restent telles quelles,
    // même quand l'ordre du planning et l'ordre des pauses divergent.
    let roster = Roster::from_rows(vec![
        ScheduleRow {
            dept: DeptRef::new("Office", "Banker"),
            employee: "Ana Lopez".into(),
            start: 600,
            end: 1080,
            row_index: 1,
        },
        ScheduleRow {
            dept: DeptRef::new("Office", "Banker"),
            employee: "Bo Reed".into(),
            start: 540,
            end: 1020,
            row_index: 2,
        },
    ]);
    let scheduler = BreakScheduler::new(
        roster,
        vec![cashier_group()],
        OperatingHours::default(),
        AdvancedSettings::default(),
    );
    let table = scheduler.schedule();

    assert_eq!(table.get(0).get(BreakKind::FirstRest), Some(720));
    assert_eq!(table.get(1).get(BreakKind::FirstRest), Some(660));
}

fn row(name: &str, start: i32, end: i32, row_index: usize) -> ScheduleRow {
    ScheduleRow {
        dept: DeptRef::new("Frontline", "Cashier"),
        employee: name.to_string(),
        start,
        end,
        row_index,
    }
}

fn cashier_group() -> CoverageGroup {
    CoverageGroup {
        id: 1,
        name: "Cashier".into(),
        departments: vec![DeptRef::new("Frontline", "Cashier")],
    }
}

fn scheduler_for(rows: Vec<ScheduleRow>) -> BreakScheduler {
    BreakScheduler::new(
        Roster::from_rows(rows),
        vec![cashier_group()],
        OperatingHours::default(),
        AdvancedSettings::default(),
    )
}
