#![forbid(unsafe_code)]
use pausier::io::{
    export_breaks_csv, format_name, import_rows_csv, minutes_to_time, parse_interval, parse_time,
};
use pausier::{
    AdvancedSettings, BreakScheduler, Config, CoverageGroup, DeptRef, JsonStorage, OperatingHours,
    Roster, Storage,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn parses_both_clock_formats() {
    assert_eq!(parse_time("9:00AM").unwrap(), 540);
    assert_eq!(parse_time("2:30PM").unwrap(), 870);
    assert_eq!(parse_time("12:00AM").unwrap(), 0);
    assert_eq!(parse_time("12:15PM").unwrap(), 735);
    assert_eq!(parse_time("14:30").unwrap(), 870);
    assert_eq!(parse_time("0:05").unwrap(), 5);
    assert_eq!(parse_time(" 11:45 pm ").unwrap(), 1425);
}

#[test]
fn rejects_malformed_times() {
    assert!(parse_time("garbage").is_err());
    assert!(parse_time("25:00").is_err());
    assert!(parse_time("9:70AM").is_err());
    assert!(parse_time("13:00PM").is_err());
    assert!(parse_time("0:00AM").is_err());
}

#[test]
fn interval_must_end_after_it_starts() {
    assert_eq!(parse_interval("9:00AM-5:00PM").unwrap(), (540, 1020));
    assert!(parse_interval("5:00PM-9:00AM").is_err());
    assert!(parse_interval("9:00AM").is_err());
}

#[test]
fn formats_on_a_twelve_hour_clock() {
    assert_eq!(minutes_to_time(0), "12:00AM");
    assert_eq!(minutes_to_time(540), "9:00AM");
    assert_eq!(minutes_to_time(719), "11:59AM");
    assert_eq!(minutes_to_time(720), "12:00PM");
    assert_eq!(minutes_to_time(870), "2:30PM");
    assert_eq!(minutes_to_time(1439), "11:59PM");
}

#[test]
fn last_comma_first_names_are_reordered() {
    assert_eq!(format_name("Lopez, Ana"), "Ana Lopez");
    assert_eq!(format_name(" Reed ,  Bo "), "Bo Reed");
    assert_eq!(format_name("Ana Lopez"), "Ana Lopez");
}

#[test]
fn csv_import_keeps_good_rows_and_skips_bad_ones() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.csv");
    fs::write(
        &path,
        "dept,subdept,name,shift\n\
         Frontline,Cashier,\"Lopez, Ana\",9:00AM-5:00PM\n\
         Frontline,Cashier,,9:00AM-5:00PM\n\
         Hardgoods,Camping,Bo Reed,not-a-shift\n\
         Hardgoods,Camping,Bo Reed,10:00AM-6:00PM\n",
    )
    .unwrap();

    let rows = import_rows_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].employee, "Ana Lopez");
    assert_eq!(rows[0].dept, DeptRef::new("Frontline", "Cashier"));
    assert_eq!((rows[0].start, rows[0].end), (540, 1020));
    assert_eq!(rows[0].row_index, 1);

    assert_eq!(rows[1].employee, "Bo Reed");
    assert_eq!(rows[1].row_index, 4);
}

#[test]
fn exported_breaks_land_on_the_source_rows() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("breaks.csv");

    let roster = Roster::from_rows(vec![pausier::ScheduleRow {
        dept: DeptRef::new("Frontline", "Cashier"),
        employee: "Ana Lopez".into(),
        start: 540,
        end: 1020,
        row_index: 3,
    }]);
    let scheduler = BreakScheduler::new(
        roster,
        vec![],
        OperatingHours::default(),
        AdvancedSettings::default(),
    );
    let table = scheduler.schedule();
    export_breaks_csv(&out, scheduler.roster(), &table).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "row,dept,subdept,name,shift,rest1,meal,rest2,rest3"
    );
    assert_eq!(
        lines.next().unwrap(),
        "3,Frontline,Cashier,Ana Lopez,9:00AM-5:00PM,11:00AM,1:00PM,3:30PM,"
    );
}

#[test]
fn config_round_trips_through_json_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pausier.json");
    let storage = JsonStorage::open(&path).unwrap();

    let config = Config {
        groups: vec![CoverageGroup {
            id: 7,
            name: "Cashier".into(),
            departments: vec![DeptRef::new("Frontline", "Cashier")],
        }],
        ..Config::default()
    };
    storage.save(&config).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.groups.len(), 1);
    assert_eq!(loaded.groups[0].id, 7);
    assert_eq!(loaded.settings, AdvancedSettings::default());
}

#[test]
fn config_export_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("exported.json");

    let config = Config {
        groups: vec![CoverageGroup {
            id: 3,
            name: "Registers".into(),
            departments: vec![DeptRef::new("Frontline", "Cashier")],
        }],
        ..Config::default()
    };
    pausier::config::export_config_json(&path, &config).unwrap();

    let loaded = pausier::load_config_from_file(&path).unwrap();
    assert_eq!(loaded.groups[0].name, "Registers");
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    let config = storage.load_or_default();
    assert!(config.groups.is_empty());
}

#[test]
fn duplicate_department_across_groups_is_a_warning() {
    let dept = DeptRef::new("Frontline", "Cashier");
    let config = Config {
        groups: vec![
            CoverageGroup {
                id: 1,
                name: "Front".into(),
                departments: vec![dept.clone()],
            },
            CoverageGroup {
                id: 2,
                name: "Registers".into(),
                departments: vec![dept],
            },
        ],
        ..Config::default()
    };
    let warnings = config.validate().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("ungrouped"));
}

#[test]
fn duplicate_group_id_is_fatal() {
    let config = Config {
        groups: vec![
            CoverageGroup {
                id: 1,
                name: "Front".into(),
                departments: vec![DeptRef::new("Frontline", "Cashier")],
            },
            CoverageGroup {
                id: 1,
                name: "Back".into(),
                departments: vec![DeptRef::new("Hardgoods", "Camping")],
            },
        ],
        ..Config::default()
    };
    assert!(config.validate().is_err());
}
