//! CSV interchange for meetings and buildings.
//!
//! `meetings.csv` carries the normalized meeting table with columns
//! `meeting_id,course_id,title,dept,days,start_min,end_min,building_code,
//! room,term`; `buildings.csv` carries `code,name,lat,lon`. Building rows
//! with an empty code are skipped (the code is the lookup key).

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::error::StorageError;
use crate::model::{Building, Meeting};

/// Load the meeting table from a CSV file with headers.
pub fn load_meetings_csv(path: &Path) -> Result<Vec<Meeting>, StorageError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for result in reader.deserialize() {
        let meeting: Meeting = result?;
        out.push(meeting);
    }
    Ok(out)
}

/// Write the meeting table to a CSV file, header first.
pub fn write_meetings_csv(path: &Path, meetings: &[Meeting]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for meeting in meetings {
        writer.serialize(meeting)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load buildings keyed by code. Rows with an empty code are dropped.
pub fn load_buildings_csv(path: &Path) -> Result<HashMap<String, Building>, StorageError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut out = HashMap::new();
    for result in reader.deserialize() {
        let building: Building = result?;
        if building.code.trim().is_empty() {
            continue;
        }
        let code = building.code.trim().to_string();
        out.insert(code, building);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_meeting() -> Meeting {
        Meeting {
            meeting_id: "WRITING_250A-33800-Sem-A".to_string(),
            course_id: "WRITING 250A".to_string(),
            title: "Advanced Composition".to_string(),
            dept: "Writing".to_string(),
            days: "TuTh".to_string(),
            start_min: 840,
            end_min: 1010,
            building_code: "HIB".to_string(),
            room: "411".to_string(),
            term: "2025 Fall".to_string(),
        }
    }

    #[test]
    fn meetings_survive_a_write_read_cycle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meetings.csv");
        let meetings = vec![sample_meeting()];

        write_meetings_csv(&path, &meetings).unwrap();
        let loaded = load_meetings_csv(&path).unwrap();
        assert_eq!(loaded, meetings);

        // Header row is present and in the agreed column order.
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(
            "meeting_id,course_id,title,dept,days,start_min,end_min,building_code,room,term"
        ));
    }

    #[test]
    fn buildings_are_keyed_by_code_and_blank_codes_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("buildings.csv");
        std::fs::write(
            &path,
            "code,name,lat,lon\nHIB,Humanities Instructional Building,33.6430,-117.8419\n,Unnamed,0.0,0.0\n",
        )
        .unwrap();

        let buildings = load_buildings_csv(&path).unwrap();
        assert_eq!(buildings.len(), 1);
        let hib = &buildings["HIB"];
        assert_eq!(hib.name, "Humanities Instructional Building");
        assert!((hib.lat - 33.6430).abs() < 1e-9);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_meetings_csv(Path::new("/nonexistent/meetings.csv")).is_err());
    }
}
