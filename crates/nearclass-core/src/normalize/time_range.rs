//! Free-text meeting-time parsing.
//!
//! Catalog time ranges look like `2:00- 4:50p`, `2:00 - 4:50pm`, or
//! `9:00-9:50`, with the AM/PM marker often given only once or not at all.
//! The parser recognizes the `H:MM[a/p/am/pm]? <dash> H:MM[a/p/am/pm]?`
//! shape and then disambiguates missing markers:
//!
//! 1. both ends marked: convert each directly
//! 2. one end marked: pick the unmarked side's meridiem that lands closest
//!    to the marked side on the clock
//! 3. neither marked: an hour-based default (8-11 reads as AM, 12 and 1-7
//!    as PM), falling back to the shortest valid AM/PM combination
//!
//! Every path requires `end > start`; anything else is reported as "no
//! value", never as an error.

use std::sync::LazyLock;

use regex::Regex;

static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})([ap]m?)?\s*[-\u{2013}\u{2014}]\s*(\d{1,2}):(\d{2})([ap]m?)?\s*$")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// 12-hour clock to minutes since midnight. 12am wraps to 0, pm hours other
/// than 12 gain 12 hours. Hour/minute values beyond the clock are passed
/// through untouched; the regex is the only bounds check.
fn to_minutes(hour: u16, minute: u16, meridiem: Meridiem) -> u16 {
    let h = match meridiem {
        Meridiem::Am => {
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        Meridiem::Pm => {
            if hour != 12 {
                hour + 12
            } else {
                hour
            }
        }
    };
    h * 60 + minute
}

/// Hour-based default when no marker is present anywhere: hours 8-11 read
/// as AM, hour 12 and hours 1-7 as PM. This models a daytime academic
/// catalog where a bare "7" is almost always 7pm; it is a domain policy,
/// not a general time-parsing rule.
fn default_meridiem_for_hour(hour: u16) -> Meridiem {
    match hour {
        8..=11 => Meridiem::Am,
        12 | 1..=7 => Meridiem::Pm,
        _ => Meridiem::Am,
    }
}

/// For an unmarked clock reading, pick the meridiem whose minute value lands
/// closest to the marked side. Ties keep AM.
fn closest_to(hour: u16, minute: u16, marked_min: u16) -> u16 {
    let mut best: Option<(u16, u16)> = None;
    for meridiem in [Meridiem::Am, Meridiem::Pm] {
        let candidate = to_minutes(hour, minute, meridiem);
        let delta = candidate.abs_diff(marked_min);
        if best.map_or(true, |(d, _)| delta < d) {
            best = Some((delta, candidate));
        }
    }
    best.map(|(_, m)| m).unwrap_or_default()
}

fn parse_suffix(raw: &str) -> Option<Meridiem> {
    match raw.to_ascii_lowercase().as_str() {
        "a" | "am" => Some(Meridiem::Am),
        "p" | "pm" => Some(Meridiem::Pm),
        _ => None,
    }
}

struct RawRange {
    start_h: u16,
    start_m: u16,
    start_suffix: Option<Meridiem>,
    end_h: u16,
    end_m: u16,
    end_suffix: Option<Meridiem>,
}

fn match_range(s: &str) -> Option<RawRange> {
    let caps = TIME_RANGE_RE.captures(s)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u16>().ok());
    Some(RawRange {
        start_h: num(1)?,
        start_m: num(2)?,
        start_suffix: caps.get(3).and_then(|m| parse_suffix(m.as_str())),
        end_h: num(4)?,
        end_m: num(5)?,
        end_suffix: caps.get(6).and_then(|m| parse_suffix(m.as_str())),
    })
}

/// Parse a raw catalog meeting time into `(start_min, end_min)`.
///
/// Returns `None` for empty input, the `TBA` sentinel, anything that does
/// not match the range pattern, and any marker combination that cannot
/// produce `end > start`. "None" means unusable, not an error.
pub fn parse_meeting_time(raw: &str) -> Option<(u16, u16)> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("TBA") {
        return None;
    }

    // Spacing around the dash is inconsistent in the feed; try the fully
    // squashed form first, then the string as given.
    let squashed: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let range = match_range(&squashed).or_else(|| match_range(s))?;

    let RawRange {
        start_h,
        start_m,
        start_suffix,
        end_h,
        end_m,
        end_suffix,
    } = range;

    match (start_suffix, end_suffix) {
        // Both ends marked: convert each independently.
        (Some(sa), Some(ea)) => {
            let start = to_minutes(start_h, start_m, sa);
            let end = to_minutes(end_h, end_m, ea);
            (end > start).then_some((start, end))
        }
        // Only the end marked: pull the start toward it.
        (None, Some(ea)) => {
            let end = to_minutes(end_h, end_m, ea);
            let start = closest_to(start_h, start_m, end);
            (start < end).then_some((start, end))
        }
        // Only the start marked: pull the end toward it.
        (Some(sa), None) => {
            let start = to_minutes(start_h, start_m, sa);
            let end = closest_to(end_h, end_m, start);
            (end > start).then_some((start, end))
        }
        // Neither marked: hour-based default, then shortest valid combination.
        (None, None) => {
            let start = to_minutes(start_h, start_m, default_meridiem_for_hour(start_h));
            let end = to_minutes(end_h, end_m, default_meridiem_for_hour(end_h));
            if end > start {
                return Some((start, end));
            }

            let mut candidates: Vec<(u16, u16)> = Vec::new();
            for sa in [Meridiem::Am, Meridiem::Pm] {
                for ea in [Meridiem::Am, Meridiem::Pm] {
                    let sm = to_minutes(start_h, start_m, sa);
                    let em = to_minutes(end_h, end_m, ea);
                    if em > sm && em - sm <= 12 * 60 {
                        candidates.push((sm, em));
                    }
                }
            }
            // Stable: equal durations keep enumeration order.
            candidates.sort_by_key(|&(sm, em)| em - sm);
            candidates.first().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn both_ends_marked() {
        assert_eq!(
            parse_meeting_time("2:00pm-4:50pm"),
            Some((14 * 60, 16 * 60 + 50))
        );
        assert_eq!(
            parse_meeting_time("11:00am - 12:15pm"),
            Some((11 * 60, 12 * 60 + 15))
        );
        // Marked but out of order is unusable.
        assert_eq!(parse_meeting_time("4:00pm-2:00pm"), None);
    }

    #[test]
    fn end_marked_pulls_start_to_pm() {
        // 2:00 is closer to 4:50pm as 2:00pm than as 2:00am.
        assert_eq!(
            parse_meeting_time("2:00- 4:50p"),
            Some((14 * 60, 16 * 60 + 50))
        );
        assert_eq!(
            parse_meeting_time("2:00 - 4:50pm"),
            Some((14 * 60, 16 * 60 + 50))
        );
    }

    #[test]
    fn end_marked_pulls_start_to_am() {
        // 11:00 is closer to 12:15pm as 11:00am.
        assert_eq!(
            parse_meeting_time("11:00-12:15pm"),
            Some((11 * 60, 12 * 60 + 15))
        );
    }

    #[test]
    fn start_marked_pulls_end() {
        assert_eq!(
            parse_meeting_time("9:00am-10:50"),
            Some((9 * 60, 10 * 60 + 50))
        );
        assert_eq!(
            parse_meeting_time("11:30a-1:20"),
            Some((11 * 60 + 30, 13 * 60 + 20))
        );
    }

    #[test]
    fn unmarked_uses_default_hours() {
        // 8-11 read as AM.
        assert_eq!(parse_meeting_time("9:00-9:50"), Some((9 * 60, 9 * 60 + 50)));
        assert_eq!(
            parse_meeting_time("8:00-10:50"),
            Some((8 * 60, 10 * 60 + 50))
        );
        // 12 and 1-7 read as PM.
        assert_eq!(
            parse_meeting_time("1:00-2:50"),
            Some((13 * 60, 14 * 60 + 50))
        );
        assert_eq!(
            parse_meeting_time("12:00-12:50"),
            Some((12 * 60, 12 * 60 + 50))
        );
    }

    #[test]
    fn unmarked_inverted_default_falls_back_to_shortest_combination() {
        // The default maps both 7 and 1 to PM, which inverts the order, so
        // the fallback enumerates combinations and keeps the shortest valid
        // one: 7:00am-1:30pm.
        assert_eq!(
            parse_meeting_time("7:00-1:30"),
            Some((7 * 60, 13 * 60 + 30))
        );
    }

    #[test]
    fn sentinels_and_garbage_are_none() {
        assert_eq!(parse_meeting_time(""), None);
        assert_eq!(parse_meeting_time("   "), None);
        assert_eq!(parse_meeting_time("TBA"), None);
        assert_eq!(parse_meeting_time("tba"), None);
        assert_eq!(parse_meeting_time("noonish"), None);
        assert_eq!(parse_meeting_time("2:00"), None);
    }

    #[test]
    fn dash_variants_are_accepted() {
        assert_eq!(
            parse_meeting_time("2:00pm\u{2013}4:50pm"),
            Some((14 * 60, 16 * 60 + 50))
        );
        assert_eq!(
            parse_meeting_time("2:00pm \u{2014} 4:50pm"),
            Some((14 * 60, 16 * 60 + 50))
        );
    }

    proptest! {
        /// Any accepted range is strictly ordered.
        #[test]
        fn parsed_ranges_are_ordered(
            sh in 1u16..=12, sm in 0u16..60, eh in 1u16..=12, em in 0u16..60,
            ssuf in prop::sample::select(vec!["", "a", "p", "am", "pm"]),
            esuf in prop::sample::select(vec!["", "a", "p", "am", "pm"]),
        ) {
            let raw = format!("{sh}:{sm:02}{ssuf}-{eh}:{em:02}{esuf}");
            if let Some((start, end)) = parse_meeting_time(&raw) {
                prop_assert!(end > start);
                prop_assert!(end <= 1439);
            }
        }
    }
}
