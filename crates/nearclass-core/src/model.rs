//! Value types shared across the library.
//!
//! `Building` and `Meeting` are constructed once at load time (catalog
//! normalization, CSV, or the SQLite store) and never mutated afterwards.
//! `RankedResult` is produced fresh by every ranking call and borrows the
//! meeting it scores.

use serde::{Deserialize, Serialize};

/// A campus building with known coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Unique building code, e.g. "HIB". Never empty.
    pub code: String,
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// One scheduled occurrence of a course section: a recurring day pattern
/// with a fixed time range and location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique id derived from course and section identifiers,
    /// e.g. "WRITING_250A-33800-Sem-A".
    pub meeting_id: String,
    pub course_id: String,
    pub title: String,
    pub dept: String,
    /// Canonical compact day string such as "MWF" or "TuTh".
    pub days: String,
    /// Minutes since midnight. Always `start_min < end_min`.
    pub start_min: u16,
    pub end_min: u16,
    /// May reference a building absent from the loaded set; such a meeting
    /// cannot be geo-ranked.
    pub building_code: String,
    pub room: String,
    pub term: String,
}

impl Meeting {
    /// Whether this meeting occurs on the given canonical day token
    /// (`M`, `Tu`, `W`, `Th`, `F`, `Sa`, `Su`).
    ///
    /// This is literal substring containment against the compact `days`
    /// string, exactly as the catalog data has always been matched. It is
    /// only sound because the canonical tokens are prefix-disjoint; revisit
    /// before ever extending the token set.
    pub fn occurs_on(&self, day_token: &str) -> bool {
        self.days.contains(day_token)
    }

    /// Signed minutes until start. Negative once the meeting has begun.
    pub fn minutes_until_start(&self, now_min: u16) -> i32 {
        self.start_min as i32 - now_min as i32
    }
}

/// One scored meeting from a ranking call.
///
/// `time_score` and `dist_score` are each in `[0, 1]`; `score` is their
/// weighted sum and is not renormalized if the configured weights do not
/// sum to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult<'a> {
    pub meeting: &'a Meeting,
    pub score: f64,
    /// Negative when the meeting is already ongoing.
    pub minutes_until_start: i32,
    pub distance_m: f64,
    pub time_score: f64,
    pub dist_score: f64,
}

/// Render minutes since midnight as a 12-hour clock time like "2:05pm".
pub fn fmt_time(mins: u16) -> String {
    let h24 = mins / 60;
    let m = mins % 60;
    let ampm = if h24 < 12 { "am" } else { "pm" };
    let mut h12 = h24 % 12;
    if h12 == 0 {
        h12 = 12;
    }
    format!("{}:{:02}{}", h12, m, ampm)
}
