//! Day-code normalization.
//!
//! Catalog feeds encode weekdays in two dialects: single letters where `T`
//! is Tuesday and `R` is Thursday, and two-letter tokens (`Tu`, `Th`, `Sa`,
//! `Su`). Both are folded into one canonical compact string like "MWF" or
//! "TuTh".

/// Canonical weekday tokens, in week order.
pub const DAY_TOKENS: [&str; 7] = ["M", "Tu", "W", "Th", "F", "Sa", "Su"];

/// Normalize a raw day encoding into a canonical compact day string.
///
/// Distinct tokens keep their first-seen order, duplicates are dropped, and
/// unrecognized characters are silently skipped. Empty or whitespace-only
/// input yields an empty string, which callers must treat as "no valid day".
///
/// ```
/// use nearclass_core::normalize::normalize_days;
/// assert_eq!(normalize_days("TR"), "TuTh");
/// assert_eq!(normalize_days("MWF"), "MWF");
/// ```
pub fn normalize_days(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    // Compact Tue/Thu pairs would misparse left-to-right (the trailing R of
    // "TR" is Thursday, not a stray token), so special-case them up front.
    if s == "TR" || s == "TTh" {
        return "TuTh".to_string();
    }

    // Byte-wise scan; every recognized token is ASCII, anything else is
    // skipped one byte at a time.
    let bytes = s.as_bytes();
    let mut tokens: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        // Prefer two-character tokens.
        let pair = match (bytes[i], bytes.get(i + 1)) {
            (b'T', Some(b'u')) => Some("Tu"),
            (b'T', Some(b'h')) => Some("Th"),
            (b'S', Some(b'a')) => Some("Sa"),
            (b'S', Some(b'u')) => Some("Su"),
            _ => None,
        };
        if let Some(t) = pair {
            tokens.push(t);
            i += 2;
            continue;
        }
        match bytes[i] {
            b'M' => tokens.push("M"),
            b'W' => tokens.push("W"),
            b'F' => tokens.push("F"),
            b'T' => tokens.push("Tu"),
            b'R' => tokens.push("Th"),
            _ => {}
        }
        i += 1;
    }

    let mut out = String::new();
    let mut seen: Vec<&str> = Vec::new();
    for t in tokens {
        if !seen.contains(&t) {
            seen.push(t);
            out.push_str(t);
        }
    }
    out
}
