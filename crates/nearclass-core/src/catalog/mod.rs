//! Catalog integration: terms, raw session records, and the remote client.
//!
//! The catalog side of the system only produces *raw* data. Everything it
//! emits flows through the `normalize` module before the ranking core ever
//! sees it.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

pub mod client;

pub use client::{CatalogClient, CatalogClientConfig, SearchOptions};

/// Academic quarter within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quarter {
    Fall,
    Winter,
    Spring,
    Summer1,
    Summer2,
    Summer10wk,
}

impl Quarter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Fall => "Fall",
            Quarter::Winter => "Winter",
            Quarter::Spring => "Spring",
            Quarter::Summer1 => "Summer1",
            Quarter::Summer2 => "Summer2",
            Quarter::Summer10wk => "Summer10wk",
        }
    }
}

/// An academic term such as "2025 Fall".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub year: i32,
    pub quarter: Quarter,
}

impl Term {
    /// The term the local date falls in: Jan-Mar is Winter, Apr-Jun Spring,
    /// Jul-Sep Summer1, Oct-Dec Fall.
    pub fn current() -> Self {
        let now = Local::now();
        let quarter = match now.month() {
            1..=3 => Quarter::Winter,
            4..=6 => Quarter::Spring,
            7..=9 => Quarter::Summer1,
            _ => Quarter::Fall,
        };
        Term {
            year: now.year(),
            quarter,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, self.quarter.as_str())
    }
}

impl FromStr for Term {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split_whitespace();
        let (Some(year_str), Some(quarter_str), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(CatalogError::InvalidTerm(s.to_string()));
        };
        let year: i32 = year_str
            .parse()
            .map_err(|_| CatalogError::InvalidTerm(s.to_string()))?;
        if year_str.len() != 4 {
            return Err(CatalogError::InvalidTerm(s.to_string()));
        }
        let quarter = match quarter_str.to_ascii_lowercase().as_str() {
            "fall" => Quarter::Fall,
            "winter" => Quarter::Winter,
            "spring" => Quarter::Spring,
            "summer1" => Quarter::Summer1,
            "summer2" => Quarter::Summer2,
            "summer10wk" => Quarter::Summer10wk,
            _ => return Err(CatalogError::InvalidTerm(s.to_string())),
        };
        Ok(Term { year, quarter })
    }
}

/// One raw class session as the catalog reports it: one row per section
/// meeting, every field free text and possibly absent. This is the contract
/// boundary the normalization pipeline consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSession {
    pub course_code: Option<String>,
    pub course_title: Option<String>,
    pub department_name: Option<String>,
    pub section_code: Option<String>,
    pub section_type: Option<String>,
    pub section_num: Option<String>,
    pub term: Option<String>,
    pub days: Option<String>,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
}

// Wire shapes for the websoc response tree. Only the fields we flatten are
// declared; serde drops the rest.

#[derive(Debug, Deserialize)]
pub(crate) struct SchoolsEnvelope {
    #[serde(default)]
    pub schools: Vec<School>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct School {
    #[serde(default)]
    pub departments: Vec<Department>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Department {
    #[serde(rename = "deptCode", default)]
    pub dept_code: String,
    #[serde(rename = "deptName", default)]
    pub dept_name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Course {
    #[serde(rename = "courseNumber", default)]
    pub course_number: String,
    #[serde(rename = "courseTitle", default)]
    pub course_title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Section {
    #[serde(rename = "sectionCode", default)]
    pub section_code: String,
    #[serde(rename = "sectionType", default)]
    pub section_type: String,
    #[serde(rename = "sectionNum", default)]
    pub section_num: String,
    #[serde(default)]
    pub meetings: Vec<SectionMeeting>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SectionMeeting {
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub bldg: Option<BuildingField>,
}

/// Some feeds report `bldg` as a string, others as a list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BuildingField {
    One(String),
    Many(Vec<String>),
}

impl BuildingField {
    fn joined(&self) -> String {
        match self {
            BuildingField::One(s) => s.trim().to_string(),
            BuildingField::Many(v) => v
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Flatten the websoc school/department/course/section tree into one raw
/// session per meeting. Sections without meetings still yield one record,
/// with TBA days, so they show up in the drop counts instead of vanishing.
pub(crate) fn flatten_schools(envelope: SchoolsEnvelope, term: &str) -> Vec<RawSession> {
    let mut sessions = Vec::new();
    for school in envelope.schools {
        for dept in school.departments {
            for course in dept.courses {
                let course_code = format!("{} {}", dept.dept_code, course.course_number)
                    .trim()
                    .to_string();
                for section in course.sections {
                    let base = RawSession {
                        course_code: Some(course_code.clone()),
                        course_title: Some(course.course_title.clone()),
                        department_name: Some(dept.dept_name.clone()),
                        section_code: Some(section.section_code.clone()),
                        section_type: Some(section.section_type.clone()),
                        section_num: Some(section.section_num.clone()),
                        term: Some(term.to_string()),
                        ..Default::default()
                    };
                    if section.meetings.is_empty() {
                        sessions.push(RawSession {
                            days: Some("TBA".to_string()),
                            ..base
                        });
                        continue;
                    }
                    for meeting in &section.meetings {
                        sessions.push(RawSession {
                            days: Some(
                                meeting
                                    .days
                                    .clone()
                                    .filter(|d| !d.trim().is_empty())
                                    .unwrap_or_else(|| "TBA".to_string()),
                            ),
                            meeting_time: meeting.time.clone(),
                            location: meeting.bldg.as_ref().map(|b| b.joined()),
                            ..base.clone()
                        });
                    }
                }
            }
        }
    }
    sessions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_parses_and_formats() {
        let term: Term = "2025 Fall".parse().unwrap();
        assert_eq!(term.year, 2025);
        assert_eq!(term.quarter, Quarter::Fall);
        assert_eq!(term.to_string(), "2025 Fall");

        let term: Term = "2026 winter".parse().unwrap();
        assert_eq!(term.quarter, Quarter::Winter);
    }

    #[test]
    fn bad_terms_are_rejected() {
        for raw in ["", "Fall", "2025", "2025 Autumn", "25 Fall", "2025 Fall Extra"] {
            assert!(raw.parse::<Term>().is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn flatten_emits_one_session_per_meeting() {
        let json = serde_json::json!({
            "schools": [{
                "departments": [{
                    "deptCode": "I&C SCI",
                    "deptName": "Information and Computer Science",
                    "courses": [{
                        "courseNumber": "33",
                        "courseTitle": "Intermediate Programming",
                        "sections": [{
                            "sectionCode": "36000",
                            "sectionType": "Lec",
                            "sectionNum": "A",
                            "meetings": [
                                {"days": "MWF", "time": "9:00-9:50", "bldg": "HSLH 100A"},
                                {"days": "TuTh", "time": "2:00- 3:20p", "bldg": ["DBH", "1100"]}
                            ]
                        }, {
                            "sectionCode": "36010",
                            "sectionType": "Dis",
                            "sectionNum": "1",
                            "meetings": []
                        }]
                    }]
                }]
            }]
        });
        let envelope: SchoolsEnvelope = serde_json::from_value(json).unwrap();
        let sessions = flatten_schools(envelope, "2025 Fall");

        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].course_code.as_deref(), Some("I&C SCI 33"));
        assert_eq!(sessions[0].days.as_deref(), Some("MWF"));
        assert_eq!(sessions[1].location.as_deref(), Some("DBH 1100"));
        // The meeting-less discussion section surfaces as TBA, not nothing.
        assert_eq!(sessions[2].days.as_deref(), Some("TBA"));
        assert_eq!(sessions[2].meeting_time, None);
    }
}
