use chrono::{DateTime, Duration, Utc};

use crate::video::NormalizedVideo;

/// Upper bound on videos returned per request, whatever `count` asked for.
pub const MAX_RECENT_VIDEOS: usize = 2;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 1;

pub fn filter_recent(videos: Vec<NormalizedVideo>, lookback_days: u32) -> Vec<NormalizedVideo> {
    filter_recent_at(videos, lookback_days, Utc::now())
}

/// Keeps videos created within `lookback_days` of `now`, in their original
/// order, then truncates to [`MAX_RECENT_VIDEOS`].
pub fn filter_recent_at(
    videos: Vec<NormalizedVideo>,
    lookback_days: u32,
    now: DateTime<Utc>,
) -> Vec<NormalizedVideo> {
    // A window reaching past the representable range keeps everything.
    let cutoff = now
        .checked_sub_signed(Duration::days(i64::from(lookback_days)))
        .map_or(i64::MIN, |t| t.timestamp());

    videos
        .into_iter()
        .filter(|video| video.created_at >= cutoff)
        .take(MAX_RECENT_VIDEOS)
        .collect()
}
