//! Normalization: raw catalog sessions to canonical `Meeting`s.
//!
//! Every per-record anomaly is absorbed here and counted; nothing in this
//! module raises for bad data. The only error surface is structural: a raw
//! catalog document whose root is not a list of session records.

use serde::Serialize;

use crate::catalog::RawSession;
use crate::error::CatalogError;
use crate::model::Meeting;

mod days;
mod location;
mod time_range;

pub use days::{normalize_days, DAY_TOKENS};
pub use location::{is_sentinel, parse_location};
pub use time_range::parse_meeting_time;

/// Why a raw session was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingCourse,
    TbaOrOnline,
    MissingDays,
    BadTime,
    BadLocation,
}

/// Per-category counts of dropped sessions. Silent loss during
/// normalization is a first-class concern, so every skip lands here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DropCounts {
    pub missing_course: u64,
    pub tba_or_online: u64,
    pub missing_days: u64,
    pub bad_time: u64,
    pub bad_location: u64,
}

impl DropCounts {
    pub fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::MissingCourse => self.missing_course += 1,
            DropReason::TbaOrOnline => self.tba_or_online += 1,
            DropReason::MissingDays => self.missing_days += 1,
            DropReason::BadTime => self.bad_time += 1,
            DropReason::BadLocation => self.bad_location += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.missing_course + self.tba_or_online + self.missing_days + self.bad_time
            + self.bad_location
    }
}

/// Result of a normalization pass: the meetings that survived plus the
/// accounting for everything that did not.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    pub meetings: Vec<Meeting>,
    pub counts: DropCounts,
}

fn field<'a>(value: &'a Option<String>) -> &'a str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// Normalize one raw session, or say why it cannot be.
pub fn normalize_session(raw: &RawSession) -> Result<Meeting, DropReason> {
    let course_code = field(&raw.course_code);
    if course_code.is_empty() {
        return Err(DropReason::MissingCourse);
    }

    let days_raw = field(&raw.days);
    let time_raw = field(&raw.meeting_time);
    let loc_raw = field(&raw.location);

    // An explicit sentinel anywhere outranks the per-field categories.
    if is_sentinel(days_raw) || is_sentinel(time_raw) || is_sentinel(loc_raw) {
        return Err(DropReason::TbaOrOnline);
    }

    let days = normalize_days(days_raw);
    if days.is_empty() {
        return Err(DropReason::MissingDays);
    }

    let (start_min, end_min) = parse_meeting_time(time_raw).ok_or(DropReason::BadTime)?;

    let (building_code, room) = parse_location(loc_raw);
    if building_code.is_empty() {
        return Err(DropReason::BadLocation);
    }

    let section_code = field(&raw.section_code);
    let section_type = field(&raw.section_type);
    let section_num = field(&raw.section_num);
    let mut meeting_id = format!("{}-{}", course_code.replace(' ', "_"), section_code);
    if !section_type.is_empty() || !section_num.is_empty() {
        meeting_id.push_str(&format!("-{}-{}", section_type, section_num));
    }

    Ok(Meeting {
        meeting_id,
        course_id: course_code.to_string(),
        title: field(&raw.course_title).to_string(),
        dept: field(&raw.department_name).to_string(),
        days,
        start_min,
        end_min,
        building_code,
        room,
        term: field(&raw.term).to_string(),
    })
}

/// Normalize a batch of raw sessions, accumulating drop counts.
pub fn normalize_sessions(sessions: &[RawSession]) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();
    for raw in sessions {
        match normalize_session(raw) {
            Ok(meeting) => outcome.meetings.push(meeting),
            Err(reason) => outcome.counts.record(reason),
        }
    }
    outcome
}

/// Deserialize a raw catalog document. The root must be a list of session
/// records; anything else is a contract breach with the producer.
pub fn sessions_from_json(text: &str) -> Result<Vec<RawSession>, CatalogError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|_| CatalogError::NotAList)?;
    let serde_json::Value::Array(_) = value else {
        return Err(CatalogError::NotAList);
    };
    serde_json::from_value(value).map_err(|_| CatalogError::NotAList)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(days: &str, time: &str, location: &str) -> RawSession {
        RawSession {
            course_code: Some("WRITING 250A".to_string()),
            course_title: Some("Advanced Composition".to_string()),
            department_name: Some("Writing".to_string()),
            section_code: Some("33800".to_string()),
            section_type: Some("Sem".to_string()),
            section_num: Some("A".to_string()),
            term: Some("2025 Fall".to_string()),
            days: Some(days.to_string()),
            meeting_time: Some(time.to_string()),
            location: Some(location.to_string()),
        }
    }

    #[test]
    fn normalizes_a_full_session() {
        let meeting = normalize_session(&raw("TR", "2:00- 4:50p", "HIB 411")).unwrap();
        assert_eq!(meeting.meeting_id, "WRITING_250A-33800-Sem-A");
        assert_eq!(meeting.days, "TuTh");
        assert_eq!(meeting.start_min, 14 * 60);
        assert_eq!(meeting.end_min, 16 * 60 + 50);
        assert_eq!(meeting.building_code, "HIB");
        assert_eq!(meeting.room, "411");
    }

    #[test]
    fn meeting_id_omits_empty_section_suffix() {
        let mut session = raw("MWF", "9:00-9:50", "DBH 1100");
        session.section_type = None;
        session.section_num = None;
        let meeting = normalize_session(&session).unwrap();
        assert_eq!(meeting.meeting_id, "WRITING_250A-33800");
    }

    #[test]
    fn drop_reasons_cover_the_taxonomy() {
        let mut no_course = raw("MWF", "9:00-9:50", "DBH 1100");
        no_course.course_code = None;
        assert_eq!(
            normalize_session(&no_course),
            Err(DropReason::MissingCourse)
        );

        assert_eq!(
            normalize_session(&raw("TBA", "9:00-9:50", "DBH 1100")),
            Err(DropReason::TbaOrOnline)
        );
        assert_eq!(
            normalize_session(&raw("MWF", "9:00-9:50", "ONLINE")),
            Err(DropReason::TbaOrOnline)
        );
        assert_eq!(
            normalize_session(&raw("??", "9:00-9:50", "DBH 1100")),
            Err(DropReason::MissingDays)
        );
        assert_eq!(
            normalize_session(&raw("MWF", "noonish", "DBH 1100")),
            Err(DropReason::BadTime)
        );
        assert_eq!(
            normalize_session(&raw("MWF", "9:00-9:50", "")),
            Err(DropReason::BadLocation)
        );
    }

    #[test]
    fn batch_accumulates_counts() {
        let sessions = vec![
            raw("MWF", "9:00-9:50", "DBH 1100"),
            raw("TBA", "9:00-9:50", "DBH 1100"),
            raw("MWF", "garbage", "DBH 1100"),
            raw("MWF", "9:00-9:50", ""),
        ];
        let outcome = normalize_sessions(&sessions);
        assert_eq!(outcome.meetings.len(), 1);
        assert_eq!(outcome.counts.tba_or_online, 1);
        assert_eq!(outcome.counts.bad_time, 1);
        assert_eq!(outcome.counts.bad_location, 1);
        assert_eq!(outcome.counts.total(), 3);
    }

    #[test]
    fn root_must_be_a_list() {
        assert!(sessions_from_json("[]").unwrap().is_empty());
        assert!(matches!(
            sessions_from_json(r#"{"schools": []}"#),
            Err(CatalogError::NotAList)
        ));
        assert!(matches!(
            sessions_from_json("not json"),
            Err(CatalogError::NotAList)
        ));

        let sessions =
            sessions_from_json(r#"[{"courseCode": "I&C SCI 46", "days": "MWF"}]"#).unwrap();
        assert_eq!(sessions[0].course_code.as_deref(), Some("I&C SCI 46"));
    }
}
