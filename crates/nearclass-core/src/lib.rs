//! # nearclass Core Library
//!
//! Business logic for nearclass: turn raw, inconsistently formatted class
//! schedule data into canonical meetings, then rank them by "happening soon,
//! near me". The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: async client for the remote course catalog, producing raw
//!   session records
//! - **Normalize**: day-code, time-range, and location parsing into
//!   canonical `Meeting`s, with per-reason drop accounting
//! - **Ranker**: pure filter/score/rank pipeline over meetings, buildings,
//!   and a user location and clock time
//! - **Storage**: CSV interchange, a SQLite store, and TOML configuration
//!
//! The ranking path is synchronous and side-effect free; meetings and
//! buildings are read-only snapshots for the duration of a call and safe to
//! share across concurrent callers.

pub mod catalog;
pub mod error;
pub mod geo;
pub mod model;
pub mod normalize;
pub mod ranker;
pub mod storage;

pub use catalog::{CatalogClient, CatalogClientConfig, Quarter, RawSession, SearchOptions, Term};
pub use error::{CatalogError, ConfigError, CoreError, StorageError};
pub use geo::haversine_m;
pub use model::{fmt_time, Building, Meeting, RankedResult};
pub use normalize::{
    normalize_days, normalize_session, normalize_sessions, parse_location, parse_meeting_time,
    sessions_from_json, DropCounts, DropReason, NormalizeOutcome,
};
pub use ranker::{rank_meetings, score_candidate, RankConfig};
pub use storage::{Config, MeetingDb};
