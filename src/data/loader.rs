use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::domain::{GeoPoint, Report};

/// Columns the loader reads from the dataset. Any extra columns are
/// ignored; a missing one aborts the load.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "OFFENSE_DESCRIPTION",
    "YEAR",
    "MONTH",
    "DAY_OF_WEEK",
    "STREET",
    "Lat",
    "Long",
];

/// Errors that can occur while loading the report dataset.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {0}")]
    MissingColumns(String),
}

/// Resolved header positions for the required columns.
struct ColumnIndices {
    description: usize,
    year: usize,
    month: usize,
    day_of_week: usize,
    street: usize,
    lat: usize,
    lon: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord) -> Result<Self, DataLoadError> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !positions.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns(missing.join(", ")));
        }

        Ok(Self {
            description: positions["OFFENSE_DESCRIPTION"],
            year: positions["YEAR"],
            month: positions["MONTH"],
            day_of_week: positions["DAY_OF_WEEK"],
            street: positions["STREET"],
            lat: positions["Lat"],
            lon: positions["Long"],
        })
    }
}

/// Load geotagged reports from a CSV dataset.
///
/// Row policy:
/// - rows with an empty or unparseable required field are dropped
/// - rows whose location is the (0, 0) sentinel are dropped
/// - exact duplicates across all loaded columns are dropped, first kept
/// - with `year` set, only reports from that year are kept
///
/// Input order is preserved for the surviving rows.
///
/// # Errors
///
/// Returns `DataLoadError` if the file cannot be opened, is not valid
/// CSV, or lacks a required column. No partial result is produced.
pub fn load_reports(
    path: impl AsRef<Path>,
    year: Option<i32>,
) -> Result<Vec<Report>, DataLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let columns = ColumnIndices::resolve(&reader.headers()?.clone())?;

    let mut seen = HashSet::new();
    let mut reports = Vec::new();

    for result in reader.records() {
        let record = result?;

        let Some(report) = parse_row(&record, &columns) else {
            continue;
        };
        if let Some(wanted) = year
            && report.year() != wanted
        {
            continue;
        }
        if !seen.insert(dedup_key(&report)) {
            continue;
        }

        reports.push(report);
    }

    Ok(reports)
}

/// Extract a report from one CSV row, or `None` if the row should be
/// dropped (missing field, unparseable number, invalid or sentinel
/// location).
fn parse_row(record: &StringRecord, columns: &ColumnIndices) -> Option<Report> {
    let description = non_empty(record.get(columns.description)?)?;
    let year: i32 = non_empty(record.get(columns.year)?)?.parse().ok()?;
    let month: u32 = non_empty(record.get(columns.month)?)?.parse().ok()?;
    let day_of_week = non_empty(record.get(columns.day_of_week)?)?;
    let street = non_empty(record.get(columns.street)?)?;
    let lat: f64 = non_empty(record.get(columns.lat)?)?.parse().ok()?;
    let lon: f64 = non_empty(record.get(columns.lon)?)?.parse().ok()?;

    let location = GeoPoint::new(lat, lon).ok()?;
    Report::new(
        description.to_string(),
        year,
        month,
        day_of_week.to_string(),
        street.to_string(),
        location,
    )
    .ok()
}

fn non_empty(field: &str) -> Option<&str> {
    let trimmed = field.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Exact-value equality over all loaded columns; floats compare by bit
/// pattern so distinct encodings of the same cell never collapse.
fn dedup_key(report: &Report) -> (String, i32, u32, String, String, u64, u64) {
    (
        report.description().to_string(),
        report.year(),
        report.month(),
        report.day_of_week().to_string(),
        report.street().to_string(),
        report.location().lat().to_bits(),
        report.location().lon().to_bits(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "INCIDENT_NUMBER,OFFENSE_DESCRIPTION,YEAR,MONTH,DAY_OF_WEEK,STREET,Lat,Long";

    fn dataset(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_reports() {
        let file = dataset(&[
            "I1,LARCENY,2019,6,Friday,WASHINGTON ST,42.3601,-71.0589",
            "I2,VANDALISM,2018,3,Monday,MAIN ST,42.3700,-71.0600",
        ]);

        let reports = load_reports(file.path(), None).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].description(), "LARCENY");
        assert_eq!(reports[0].year(), 2019);
        assert_eq!(reports[1].street(), "MAIN ST");
        assert_eq!(reports[1].location().lat(), 42.3700);
    }

    #[test]
    fn test_duplicates_dropped_first_kept() {
        let file = dataset(&[
            "I1,LARCENY,2019,6,Friday,WASHINGTON ST,42.3601,-71.0589",
            "I2,LARCENY,2019,6,Friday,WASHINGTON ST,42.3601,-71.0589",
            "I3,LARCENY,2019,6,Friday,WASHINGTON ST,42.3602,-71.0589",
        ]);

        let reports = load_reports(file.path(), None).unwrap();
        // First two rows are identical across the loaded columns (the
        // unloaded INCIDENT_NUMBER does not participate)
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].location().lat(), 42.3601);
        assert_eq!(reports[1].location().lat(), 42.3602);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let file = dataset(&[
            "I1,LARCENY,2019,6,Friday,WASHINGTON ST,42.3601,-71.0589",
            "I2,LARCENY,2019,6,Friday,WASHINGTON ST,42.3601,-71.0589",
        ]);

        let once = load_reports(file.path(), None).unwrap();
        let twice = load_reports(file.path(), None).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
    }

    #[test]
    fn test_sentinel_location_dropped() {
        let file = dataset(&[
            "I1,LARCENY,2019,6,Friday,WASHINGTON ST,0,0",
            "I2,VANDALISM,2019,3,Monday,MAIN ST,42.3700,-71.0600",
        ]);

        let reports = load_reports(file.path(), None).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].description(), "VANDALISM");
    }

    #[test]
    fn test_rows_with_missing_fields_dropped() {
        let file = dataset(&[
            "I1,LARCENY,2019,6,Friday,,42.3601,-71.0589",
            "I2,VANDALISM,2019,3,Monday,MAIN ST,,-71.0600",
            "I3,THEFT,not-a-year,3,Monday,MAIN ST,42.3700,-71.0600",
            "I4,ASSAULT,2019,3,Monday,MAIN ST,42.3700,-71.0600",
        ]);

        let reports = load_reports(file.path(), None).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].description(), "ASSAULT");
    }

    #[test]
    fn test_year_restriction() {
        let file = dataset(&[
            "I1,LARCENY,2019,6,Friday,WASHINGTON ST,42.3601,-71.0589",
            "I2,VANDALISM,2018,3,Monday,MAIN ST,42.3700,-71.0600",
            "I3,THEFT,2019,1,Sunday,PARK ST,42.3650,-71.0620",
        ]);

        let reports = load_reports(file.path(), Some(2019)).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.year() == 2019));
    }

    #[test]
    fn test_missing_column_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "OFFENSE_DESCRIPTION,YEAR,MONTH,DAY_OF_WEEK,STREET").unwrap();
        writeln!(file, "LARCENY,2019,6,Friday,WASHINGTON ST").unwrap();
        file.flush().unwrap();

        let err = load_reports(file.path(), None).unwrap_err();
        match err {
            DataLoadError::MissingColumns(cols) => {
                assert!(cols.contains("Lat"));
                assert!(cols.contains("Long"));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_nonexistent_file_fails() {
        let err = load_reports("definitely/not/here.csv", None).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn test_short_rows_dropped() {
        let file = dataset(&[
            "I1,LARCENY,2019",
            "I2,VANDALISM,2019,3,Monday,MAIN ST,42.3700,-71.0600",
        ]);

        let reports = load_reports(file.path(), None).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].description(), "VANDALISM");
    }
}
