//! Proximity ranking: filter, score, and order meetings by how soon they
//! start and how close their building is.
//!
//! The whole pipeline is a pure function over its inputs. A candidate either
//! fully qualifies or is dropped; nothing here retries, blocks, or reports
//! per-candidate errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::haversine_m;
use crate::model::{Building, Meeting, RankedResult};

/// Filtering and scoring knobs for a ranking call.
///
/// No invariant ties `w_time + w_dist` to 1.0; the final score is whatever
/// the weighted sum says, and keeping the weights sensible is on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    /// Consider meetings starting within this many minutes.
    pub time_window_min: u32,
    /// Consider meetings within this many meters.
    pub max_distance_m: f64,
    /// Weight of the temporal-urgency score.
    pub w_time: f64,
    /// Weight of the spatial-closeness score.
    pub w_dist: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            time_window_min: 60,
            max_distance_m: 1200.0,
            w_time: 0.6,
            w_dist: 0.4,
        }
    }
}

/// Score one surviving candidate. Returns `(final_score, time_score,
/// dist_score)`; the component scores are each clamped to `[0, 1]`, the
/// weighted sum is not.
///
/// A negative `min_until` (already ongoing) saturates the time score at 1.0:
/// "starting now or already happening" is the best temporal case.
pub fn score_candidate(min_until: i32, dist_m: f64, cfg: &RankConfig) -> (f64, f64, f64) {
    let time_score = if cfg.time_window_min > 0 {
        (1.0 - min_until as f64 / cfg.time_window_min as f64).clamp(0.0, 1.0)
    } else if min_until <= 0 {
        1.0
    } else {
        0.0
    };

    let dist_score = if cfg.max_distance_m > 0.0 {
        (1.0 - dist_m / cfg.max_distance_m).clamp(0.0, 1.0)
    } else if dist_m == 0.0 {
        1.0
    } else {
        0.0
    };

    let final_score = cfg.w_time * time_score + cfg.w_dist * dist_score;
    (final_score, time_score, dist_score)
}

/// One filtered candidate: the meeting plus its measured offsets.
struct Candidate<'a> {
    meeting: &'a Meeting,
    minutes_until_start: i32,
    distance_m: f64,
}

fn filter_candidates<'a>(
    meetings: &'a [Meeting],
    buildings: &HashMap<String, Building>,
    user_latlon: (f64, f64),
    day_token: &str,
    now_min: u16,
    cfg: &RankConfig,
    include_ongoing: bool,
) -> Vec<Candidate<'a>> {
    let (user_lat, user_lon) = user_latlon;
    let mut out = Vec::new();

    for meeting in meetings {
        if !meeting.occurs_on(day_token) {
            continue;
        }

        // No coordinates, no geo-ranking.
        let Some(building) = buildings.get(&meeting.building_code) else {
            continue;
        };

        let mins_until = meeting.minutes_until_start(now_min);
        if mins_until < 0 {
            // Already started: only keep it while it is still running.
            if !(include_ongoing && now_min < meeting.end_min) {
                continue;
            }
        } else if mins_until as u32 > cfg.time_window_min {
            continue;
        }

        let distance_m = haversine_m(user_lat, user_lon, building.lat, building.lon);
        if distance_m > cfg.max_distance_m {
            continue;
        }

        out.push(Candidate {
            meeting,
            minutes_until_start: mins_until,
            distance_m,
        });
    }

    out
}

/// Rank meetings for a user at `user_latlon` on `day_token` at `now_min`
/// minutes since midnight: filter by day, building, time window, and
/// distance, score the survivors, and return at most `top_k` results in
/// descending score order. The sort is stable, so equal scores keep input
/// order.
#[allow(clippy::too_many_arguments)]
pub fn rank_meetings<'a>(
    meetings: &'a [Meeting],
    buildings: &HashMap<String, Building>,
    user_latlon: (f64, f64),
    day_token: &str,
    now_min: u16,
    cfg: &RankConfig,
    top_k: usize,
    include_ongoing: bool,
) -> Vec<RankedResult<'a>> {
    let candidates = filter_candidates(
        meetings,
        buildings,
        user_latlon,
        day_token,
        now_min,
        cfg,
        include_ongoing,
    );

    let mut ranked: Vec<RankedResult<'a>> = candidates
        .into_iter()
        .map(|c| {
            let (score, time_score, dist_score) =
                score_candidate(c.minutes_until_start, c.distance_m, cfg);
            RankedResult {
                meeting: c.meeting,
                score,
                minutes_until_start: c.minutes_until_start,
                distance_m: c.distance_m,
                time_score,
                dist_score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_k);
    ranked
}
