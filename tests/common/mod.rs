//! Shared fixtures for integration tests.
#![allow(dead_code)]

use health_scatter::data::{Metric, Record};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A few rows in the column layout the application reads.
pub const SAMPLE_CSV: &str = "\
id,state,abbr,poverty,age,income,healthcare,obesity,smokes
1,Alabama,AL,19.3,38.6,42830,13.9,33.5,21.1
2,Alaska,AK,11.2,33.3,71583,15,29.7,19.9
3,Arizona,AZ,18.2,35.9,50068,14.4,28.9,16.3
4,Arkansas,AR,18.9,37.8,41262,16.3,35.9,22.5
5,California,CA,16.4,36.2,61933,14.8,24.7,12.7
";

pub struct TestFixture {
    dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }
}

/// Records for every metric, built in memory.
pub fn sample_records() -> Vec<Record> {
    let rows: [(&str, &str, [f64; 6]); 5] = [
        ("AL", "Alabama", [19.3, 38.6, 42830.0, 33.5, 21.1, 13.9]),
        ("AK", "Alaska", [11.2, 33.3, 71583.0, 29.7, 19.9, 15.0]),
        ("AZ", "Arizona", [18.2, 35.9, 50068.0, 28.9, 16.3, 14.4]),
        ("AR", "Arkansas", [18.9, 37.8, 41262.0, 35.9, 22.5, 16.3]),
        ("CA", "California", [16.4, 36.2, 61933.0, 24.7, 12.7, 14.8]),
    ];
    rows.iter()
        .map(|(abbr, state, values)| {
            Metric::ALL
                .iter()
                .zip(values)
                .fold(Record::new(*abbr, *state), |r, (m, v)| r.with(*m, *v))
        })
        .collect()
}
