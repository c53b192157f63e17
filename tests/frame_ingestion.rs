use std::fs::File;
use std::io::Cursor;

use gridframe::frame::DataFrame;
use gridframe::grid::{TimeVaryingGrid, Vec3};
use gridframe::ingestion::{
    read_frame, read_frame_from_path, ColumnSelection, CsvTable, CsvTableOptions,
    FrameReadOptions,
};
use gridframe::IngestError;

type Frame = DataFrame<String, TimeVaryingGrid<f64, f64>>;

fn open_fixture(name: &str) -> CsvTable<File> {
    CsvTable::open(format!("tests/fixtures/{name}")).unwrap()
}

#[test]
fn named_and_positional_selection_read_the_same_frame() {
    let by_name: Frame = read_frame(
        open_fixture("readings.csv"),
        &ColumnSelection::by_name("t", ["x", "y", "z"]),
    )
    .unwrap();
    let by_index: Frame =
        read_frame(open_fixture("readings.csv"), &ColumnSelection::default()).unwrap();

    assert_eq!(by_name, by_index);
}

#[test]
fn every_non_reserved_column_becomes_a_field() {
    let frame: Frame =
        read_frame(open_fixture("readings.csv"), &ColumnSelection::default()).unwrap();

    assert_eq!(frame.len(), 2);
    assert!(frame.contains(&"temp".to_string()));
    assert!(frame.contains(&"wind".to_string()));
}

#[test]
fn duplicate_header_names_keep_the_rightmost_column() {
    let frame: Frame = read_frame(
        open_fixture("duplicate_header.csv"),
        &ColumnSelection::default(),
    )
    .unwrap();

    assert_eq!(frame.len(), 1);
    let temp = frame.get(&"temp".to_string()).unwrap();
    assert_eq!(temp.sample_count(), 2);
    assert_eq!(temp.value_at(&0.0, Vec3::default()), Some(&99.0));
    assert_eq!(temp.value_at(&1.0, Vec3::default()), Some(&88.0));
}

#[test]
fn a_stored_sample_reads_back_exactly() {
    let csv = "t,x,y,z,temp\n3.5,1.0,2.0,3.0,42.25\n";
    let table =
        CsvTable::from_reader(Cursor::new(csv), "single.csv", &CsvTableOptions::default())
            .unwrap();
    let frame: Frame = read_frame(table, &ColumnSelection::default()).unwrap();

    let temp = frame.get(&"temp".to_string()).unwrap();
    assert_eq!(temp.sample_count(), 1);
    assert_eq!(temp.value_at(&3.5, Vec3::new(1.0, 2.0, 3.0)), Some(&42.25));
}

#[test]
fn queries_step_to_the_session_at_or_before_the_time() {
    let frame: Frame =
        read_frame(open_fixture("readings.csv"), &ColumnSelection::default()).unwrap();
    let temp = frame.get(&"temp".to_string()).unwrap();

    assert_eq!(temp.session_count(), 3);
    // Nothing to answer with before the first session.
    assert_eq!(temp.value_at(&-0.5, Vec3::default()), None);
    // Mid-window queries hold the preceding session's values.
    assert_eq!(temp.value_at(&1.9, Vec3::new(0.9, 0.0, 0.0)), Some(&21.5));
    // Past the last session the final values persist.
    assert_eq!(temp.value_at(&10.0, Vec3::default()), Some(&22.0));
}

#[test]
fn headerless_sources_synthesize_positional_keys() {
    let options = FrameReadOptions {
        csv: CsvTableOptions {
            has_header: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let frame: Frame = read_frame_from_path("tests/fixtures/headerless.csv", &options).unwrap();

    assert_eq!(frame.len(), 1);
    assert_eq!(frame.get(&"var4".to_string()).unwrap().sample_count(), 2);
}

#[test]
fn missing_named_columns_are_reported_by_name() {
    let err = read_frame::<String, f64, f64, _>(
        open_fixture("readings.csv"),
        &ColumnSelection::by_name("t", ["x", "y", "altitude"]),
    )
    .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("readings.csv"));
    assert!(msg.contains("has no 'altitude' column"));
}

#[test]
fn by_name_selection_needs_a_header() {
    let table = CsvTable::from_reader(
        Cursor::new("0.0,0.0,0.0,0.0,1.0\n"),
        "raw.csv",
        &CsvTableOptions {
            has_header: false,
            ..Default::default()
        },
    )
    .unwrap();
    let err = read_frame::<String, f64, f64, _>(
        table,
        &ColumnSelection::by_name("t", ["x", "y", "z"]),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "raw.csv has no header");
}

#[test]
fn out_of_range_indices_are_reported_with_the_column_count() {
    let err = read_frame::<String, f64, f64, _>(
        open_fixture("readings.csv"),
        &ColumnSelection::by_index(0, [1, 2, 9]),
    )
    .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("column index 9 is out of range"));
    assert!(msg.contains("6 columns"));
}

#[test]
fn a_column_cannot_play_two_reserved_roles() {
    let err = read_frame::<String, f64, f64, _>(
        open_fixture("readings.csv"),
        &ColumnSelection::by_index(0, [1, 1, 3]),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        IngestError::OverlappingColumns { index: 1, .. }
    ));
}

#[test]
fn a_bad_cell_fails_the_whole_read() {
    let err = read_frame::<String, f64, f64, _>(
        open_fixture("bad_cell.csv"),
        &ColumnSelection::default(),
    )
    .unwrap_err();

    match err {
        IngestError::ParseError {
            row, column, raw, ..
        } => {
            assert_eq!(row, 3);
            assert_eq!(column, "temp");
            assert_eq!(raw, "warm");
        }
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn a_header_only_source_reads_into_empty_fields() {
    let table = CsvTable::from_reader(
        Cursor::new("t,x,y,z,temp,wind\n"),
        "empty.csv",
        &CsvTableOptions::default(),
    )
    .unwrap();
    let frame: Frame = read_frame(table, &ColumnSelection::default()).unwrap();

    assert_eq!(frame.len(), 2);
    let temp = frame.get(&"temp".to_string()).unwrap();
    assert!(temp.is_empty());
    assert_eq!(temp.value_at(&0.0, Vec3::default()), None);
}

#[test]
fn lookups_of_unknown_fields_fail_without_inserting() {
    let frame: Frame =
        read_frame(open_fixture("readings.csv"), &ColumnSelection::default()).unwrap();

    let err = frame.get(&"pressure".to_string()).unwrap_err();
    assert_eq!(err.to_string(), "no field named 'pressure' in frame");
    assert_eq!(frame.len(), 2);
}
