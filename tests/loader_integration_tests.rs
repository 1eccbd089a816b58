//! Integration tests for CSV loading.

mod common;

use common::{TestFixture, SAMPLE_CSV};
use health_scatter::data::{DataLoader, LoaderError, Metric};

#[test]
fn loads_sample_csv() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("data.csv", SAMPLE_CSV);

    let mut loader = DataLoader::new();
    let records = loader.load_csv(&path).unwrap();

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].abbr, "AL");
    assert_eq!(records[0].state, "Alabama");
    assert_eq!(records[1].value(Metric::Income), 71583.0);
    assert_eq!(loader.get_row_count(), 5);
    assert_eq!(loader.get_file_path(), Some(&path));
}

#[test]
fn malformed_values_become_nan() {
    let fixture = TestFixture::new();
    let path = fixture.create_file(
        "data.csv",
        "state,abbr,poverty,age,income,healthcare,obesity,smokes\n\
         Alabama,AL,n/a,38.6,42830,13.9,,21.1\n",
    );

    let records = DataLoader::read_records(&path).unwrap();

    assert!(records[0].value(Metric::Poverty).is_nan());
    assert!(records[0].value(Metric::Obesity).is_nan());
    assert_eq!(records[0].value(Metric::Age), 38.6);
}

#[test]
fn missing_abbr_column_is_an_error() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("data.csv", "state,poverty\nAlabama,19.3\n");

    let err = DataLoader::read_records(&path).unwrap_err();
    assert!(matches!(err, LoaderError::MissingColumn("abbr")));
}

#[test]
fn missing_file_is_an_error() {
    let fixture = TestFixture::new();
    let missing = fixture.create_file("data.csv", SAMPLE_CSV).with_file_name("nope.csv");
    assert!(DataLoader::read_records(&missing).is_err());
}
