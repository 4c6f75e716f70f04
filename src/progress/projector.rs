use crate::catalog::MediaKind;
use serde::Deserialize;

/// Maximum continue-watching cards shown in the home row. Applied by callers
/// at the presentation boundary; [`project`] itself takes an explicit limit.
pub const MAX_VISIBLE: usize = 8;

// ============================================================================
// Raw Progress Entries
// ============================================================================

/// Progress fields nested under the `__progress` subobject (current schema).
/// These take precedence over the flat fields below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressFields {
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default, rename = "watchedDuration")]
    pub watched_duration: Option<f64>,
    #[serde(default, rename = "fullDuration")]
    pub full_duration: Option<f64>,
}

/// A raw playback-progress record, read-only to the feed core.
///
/// Entries were written by different schema versions, so every logical value
/// may live under several field names: the `__progress` subobject, flat
/// snake_case fields, or flat camelCase fields. The `resolve_*` functions
/// below normalize them in a fixed precedence order; nothing else in the
/// crate reads these fields directly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressEntry {
    pub id: i64,
    /// Explicit kind, camelCase variant.
    #[serde(default, rename = "mediaType")]
    pub media_type_camel: Option<String>,
    /// Explicit kind, snake_case variant.
    #[serde(default)]
    pub media_type: Option<String>,
    /// Movie display title; its presence infers the kind when neither
    /// explicit field is set.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, rename = "__progress")]
    pub progress: Option<ProgressFields>,
    #[serde(default)]
    pub season_number: Option<u32>,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode_number: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default)]
    pub watched_duration: Option<f64>,
    #[serde(default, rename = "watchedDuration")]
    pub watched_duration_camel: Option<f64>,
    #[serde(default)]
    pub full_duration: Option<f64>,
    #[serde(default, rename = "fullDuration")]
    pub full_duration_camel: Option<f64>,
}

// ============================================================================
// Field Resolution
// ============================================================================

pub fn resolve_kind(entry: &ProgressEntry) -> MediaKind {
    let explicit = entry
        .media_type_camel
        .as_deref()
        .or(entry.media_type.as_deref())
        .map(str::to_ascii_lowercase);
    match explicit.as_deref() {
        Some("movie") => MediaKind::Movie,
        Some("tv") | Some("series") => MediaKind::Series,
        _ => {
            if entry.title.is_some() {
                MediaKind::Movie
            } else {
                MediaKind::Series
            }
        }
    }
}

/// `__progress.season` → `season_number` → `season` → 1, floored at 1.
pub fn resolve_season(entry: &ProgressEntry) -> u32 {
    entry
        .progress
        .as_ref()
        .and_then(|progress| progress.season)
        .or(entry.season_number)
        .or(entry.season)
        .unwrap_or(1)
        .max(1)
}

/// `__progress.episode` → `episode_number` → `episode` → 1, floored at 1.
pub fn resolve_episode(entry: &ProgressEntry) -> u32 {
    entry
        .progress
        .as_ref()
        .and_then(|progress| progress.episode)
        .or(entry.episode_number)
        .or(entry.episode)
        .unwrap_or(1)
        .max(1)
}

/// `__progress.watchedDuration` → `watched_duration` → `watchedDuration` → 0.
pub fn resolve_watched_duration(entry: &ProgressEntry) -> f64 {
    entry
        .progress
        .as_ref()
        .and_then(|progress| progress.watched_duration)
        .or(entry.watched_duration)
        .or(entry.watched_duration_camel)
        .unwrap_or(0.0)
}

/// `__progress.fullDuration` → `full_duration` → `fullDuration` → 0.
pub fn resolve_full_duration(entry: &ProgressEntry) -> f64 {
    entry
        .progress
        .as_ref()
        .and_then(|progress| progress.full_duration)
        .or(entry.full_duration)
        .or(entry.full_duration_camel)
        .unwrap_or(0.0)
}

// ============================================================================
// Derived Values
// ============================================================================

/// Completion percentage, `round(watched/full*100)` clamped to [0, 100].
/// A zero or missing full duration yields 0, never a division error.
pub fn completion_percent(watched: f64, full: f64) -> u8 {
    if full > 0.0 {
        (watched / full * 100.0).round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Human remaining-time label.
///
/// No full duration → `"0 left"`. Otherwise the remaining seconds are
/// rounded to minutes; an hour or more renders as `"<h>h<m>m left"`.
pub fn remaining_label(watched: f64, full: f64) -> String {
    if full <= 0.0 {
        return "0 left".to_string();
    }
    let remaining = (full - watched).max(0.0);
    let minutes = (remaining / 60.0).round() as u64;
    if minutes >= 60 {
        format!("{}h{}m left", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m left")
    }
}

// ============================================================================
// Cards
// ============================================================================

/// Render-ready continue-watching card: a raw progress entry joined with the
/// catalog metadata it carries. Recomputed on every projection pass, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueWatchingCard {
    pub id: i64,
    pub kind: MediaKind,
    pub season: u32,
    pub episode: u32,
    /// Navigation target, e.g. `/tv/1396?watch=1&season=2&episode=4`.
    pub path: String,
    /// Completion percentage, always within [0, 100].
    pub percent: u8,
    /// Row label, e.g. `"S2 • E4 • 43m left"` or `"Movie • 12m left"`.
    pub label: String,
    /// Backdrop path, falling back to the poster path.
    pub image: Option<String>,
    pub title: String,
}

/// Project one raw entry into a card.
///
/// Movies always navigate to season 1, episode 1, whatever season/episode
/// fields the raw entry carries.
pub fn card_for(entry: &ProgressEntry) -> ContinueWatchingCard {
    let kind = resolve_kind(entry);
    let (season, episode) = match kind {
        MediaKind::Movie => (1, 1),
        MediaKind::Series => (resolve_season(entry), resolve_episode(entry)),
    };
    let watched = resolve_watched_duration(entry);
    let full = resolve_full_duration(entry);
    let remaining = remaining_label(watched, full);

    let label = match kind {
        MediaKind::Movie => format!("Movie • {remaining}"),
        MediaKind::Series => format!("S{season} • E{episode} • {remaining}"),
    };

    ContinueWatchingCard {
        id: entry.id,
        kind,
        season,
        episode,
        path: format!(
            "/{}/{}?watch=1&season={}&episode={}",
            kind.route_segment(),
            entry.id,
            season,
            episode
        ),
        percent: completion_percent(watched, full),
        label,
        image: entry
            .backdrop_path
            .clone()
            .or_else(|| entry.poster_path.clone()),
        title: entry
            .title
            .clone()
            .or_else(|| entry.name.clone())
            .unwrap_or_else(|| "Untitled".to_string()),
    }
}

/// Project raw progress entries into at most `limit` cards, preserving
/// input order. Accepts unbounded input; the display cap ([`MAX_VISIBLE`])
/// is the caller's policy, not this function's.
pub fn project(entries: &[ProgressEntry], limit: usize) -> Vec<ContinueWatchingCard> {
    entries.iter().take(limit).map(card_for).collect()
}
