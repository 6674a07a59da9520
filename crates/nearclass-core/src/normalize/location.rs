//! Location parsing: split "HIB 411" into a building code and room.

/// Catalog values meaning "no physical location exists", as opposed to a
/// location we failed to parse.
const NO_LOCATION_SENTINELS: [&str; 5] = ["TBA", "ONLINE", "REMOTE", "WEB", "ARR"];

/// Whether a raw catalog value is a TBA-like sentinel (case-insensitive).
pub fn is_sentinel(raw: &str) -> bool {
    let s = raw.trim();
    NO_LOCATION_SENTINELS
        .iter()
        .any(|sentinel| s.eq_ignore_ascii_case(sentinel))
}

/// Split a raw location into `(building_code, room)`.
///
/// Sentinels and empty input yield `("", "")`, meaning no physical location;
/// such meetings are excluded from geo-ranking. A single token is a bare
/// building code; with more tokens, the first is the code and the rest join
/// into the room.
pub fn parse_location(raw: &str) -> (String, String) {
    let s = raw.trim();
    if s.is_empty() || is_sentinel(s) {
        return (String::new(), String::new());
    }

    let mut parts = s.split_whitespace();
    let building = parts.next().unwrap_or_default().to_string();
    let room = parts.collect::<Vec<_>>().join(" ");
    (building, room)
}
