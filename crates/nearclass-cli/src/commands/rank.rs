use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{Datelike, Local, Timelike, Weekday};
use clap::Args;
use nearclass_core::normalize::DAY_TOKENS;
use nearclass_core::storage::csv_io;
use nearclass_core::{fmt_time, rank_meetings, Building, Config, Meeting, MeetingDb, RankConfig};

#[derive(Args)]
pub struct RankArgs {
    /// Meeting table CSV (defaults to the SQLite store)
    #[arg(long)]
    meetings: Option<PathBuf>,
    /// Building table CSV (defaults to the SQLite store)
    #[arg(long)]
    buildings: Option<PathBuf>,
    /// Term to load from the store, e.g. "2025 Fall"
    #[arg(long)]
    term: Option<String>,
    /// User latitude (defaults to the configured campus)
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// User longitude
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
    /// Day token: M, Tu, W, Th, F, Sa, Su (defaults to today)
    #[arg(long)]
    day: Option<String>,
    /// Clock time as 24-hour "H:MM" (defaults to now)
    #[arg(long)]
    at: Option<String>,
    /// Time window in minutes
    #[arg(long)]
    window: Option<u32>,
    /// Distance cap in meters
    #[arg(long)]
    max_distance: Option<f64>,
    /// Number of results
    #[arg(long)]
    top: Option<usize>,
    /// Exclude meetings that already started
    #[arg(long)]
    no_ongoing: bool,
    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn day_token(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "M",
        Weekday::Tue => "Tu",
        Weekday::Wed => "W",
        Weekday::Thu => "Th",
        Weekday::Fri => "F",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

// The ranker matches days by substring, so anything outside the canonical
// token set must be rejected here ("T" would match every "TuTh" meeting).
fn canonical_day(raw: &str) -> Result<String, String> {
    let token = raw.trim();
    if DAY_TOKENS.contains(&token) {
        Ok(token.to_string())
    } else {
        Err(format!(
            "bad day '{raw}': expected one of {}",
            DAY_TOKENS.join(", ")
        ))
    }
}

fn parse_clock(raw: &str) -> Result<u16, String> {
    let (h, m) = raw
        .split_once(':')
        .ok_or_else(|| format!("bad time '{raw}': expected 24-hour H:MM"))?;
    let h: u16 = h.parse().map_err(|_| format!("bad hour in '{raw}'"))?;
    let m: u16 = m.parse().map_err(|_| format!("bad minute in '{raw}'"))?;
    if h > 23 || m > 59 {
        return Err(format!("bad time '{raw}': out of range"));
    }
    Ok(h * 60 + m)
}

fn load_inputs(
    args: &RankArgs,
    config: &Config,
) -> Result<(Vec<Meeting>, HashMap<String, Building>), Box<dyn std::error::Error>> {
    // Explicit flags win, then configured CSV paths, then the SQLite store.
    let meetings_csv = args.meetings.clone().or_else(|| {
        (!config.data.meetings_csv.is_empty()).then(|| PathBuf::from(&config.data.meetings_csv))
    });
    let buildings_csv = args.buildings.clone().or_else(|| {
        (!config.data.buildings_csv.is_empty()).then(|| PathBuf::from(&config.data.buildings_csv))
    });

    match (meetings_csv, buildings_csv) {
        (Some(m), Some(b)) => Ok((csv_io::load_meetings_csv(&m)?, csv_io::load_buildings_csv(&b)?)),
        (meetings_csv, buildings_csv) => {
            let db = MeetingDb::open()?;
            let meetings = match meetings_csv {
                Some(m) => csv_io::load_meetings_csv(&m)?,
                None => {
                    let term = args
                        .term
                        .clone()
                        .unwrap_or_else(|| nearclass_core::Term::current().to_string());
                    db.meetings_for_term(&term)?
                }
            };
            let buildings = match buildings_csv {
                Some(b) => csv_io::load_buildings_csv(&b)?,
                None => db.buildings()?,
            };
            Ok((meetings, buildings))
        }
    }
}

pub fn run(args: RankArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let (meetings, buildings) = load_inputs(&args, &config)?;

    let now = Local::now();
    let day = match &args.day {
        Some(raw) => canonical_day(raw)?,
        None => day_token(now.weekday()).to_string(),
    };
    let now_min = match &args.at {
        Some(raw) => parse_clock(raw)?,
        None => (now.hour() * 60 + now.minute()) as u16,
    };

    let cfg = RankConfig {
        time_window_min: args.window.unwrap_or(config.ranking.time_window_min),
        max_distance_m: args.max_distance.unwrap_or(config.ranking.max_distance_m),
        w_time: config.ranking.w_time,
        w_dist: config.ranking.w_dist,
    };
    let user_latlon = (
        args.lat.unwrap_or(config.campus.lat),
        args.lon.unwrap_or(config.campus.lon),
    );
    let top_k = args.top.unwrap_or(config.ranking.top_k);
    let include_ongoing = if args.no_ongoing {
        false
    } else {
        config.ranking.include_ongoing
    };

    let results = rank_meetings(
        &meetings,
        &buildings,
        user_latlon,
        &day,
        now_min,
        &cfg,
        top_k,
        include_ongoing,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("nothing happening on {day} around {}", fmt_time(now_min));
        return Ok(());
    }

    for r in &results {
        let m = r.meeting;
        let when = if r.minutes_until_start < 0 {
            format!("ongoing, ends {}", fmt_time(m.end_min))
        } else {
            format!("in {:>3} min", r.minutes_until_start)
        };
        println!(
            "{:<14} {:<6} {}-{} {:<5} {:<8} {:>7.0}m  {}  score={:.3} (t={:.3}, d={:.3})",
            m.course_id,
            m.days,
            fmt_time(m.start_min),
            fmt_time(m.end_min),
            m.building_code,
            m.room,
            r.distance_m,
            when,
            r.score,
            r.time_score,
            r.dist_score,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_parsing() {
        assert_eq!(parse_clock("13:10"), Ok(790));
        assert_eq!(parse_clock("0:00"), Ok(0));
        assert!(parse_clock("24:00").is_err());
        assert!(parse_clock("noon").is_err());
    }

    #[test]
    fn day_flag_must_be_a_canonical_token() {
        assert_eq!(canonical_day("Tu"), Ok("Tu".to_string()));
        assert_eq!(canonical_day(" W "), Ok("W".to_string()));
        // "T" is a single-letter dialect code, not a canonical token; letting
        // it through would substring-match every "TuTh" meeting.
        assert!(canonical_day("T").is_err());
        assert!(canonical_day("R").is_err());
        assert!(canonical_day("").is_err());
        assert!(canonical_day("MW").is_err());
    }

    #[test]
    fn weekday_tokens_are_canonical() {
        assert_eq!(day_token(Weekday::Mon), "M");
        assert_eq!(day_token(Weekday::Thu), "Th");
        assert_eq!(day_token(Weekday::Sun), "Su");
    }
}
