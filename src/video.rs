//! Raw video records as the scraping engine reports them, and the fixed
//! schema this service answers with.
//!
//! Raw records are decoded leniently: a field that is missing, `null` or of
//! an unexpected type is simply absent. [`normalize`] then fills every gap
//! with its zero value, so nothing past the decode step deals with optional
//! data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub create_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub video: Option<RawVideoMedia>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub music: Option<RawMusic>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub stats: Option<RawStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoMedia {
    #[serde(default, deserialize_with = "lenient::string")]
    pub play_addr: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub download_addr: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMusic {
    #[serde(default, deserialize_with = "lenient::string")]
    pub play_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    #[serde(default, deserialize_with = "lenient::int")]
    pub play_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub share_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub comment_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub digg_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedVideo {
    pub id: String,
    #[serde(rename = "desc")]
    pub description: String,
    /// Epoch seconds.
    #[serde(rename = "createTime")]
    pub created_at: i64,
    pub video: VideoMedia,
    pub music: Music,
    pub stats: Stats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoMedia {
    #[serde(rename = "playAddr")]
    pub play_url: String,
    #[serde(rename = "downloadAddr")]
    pub download_url: String,
    #[serde(rename = "duration")]
    pub duration_seconds: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Music {
    #[serde(rename = "playUrl")]
    pub play_url: String,
    #[serde(rename = "duration")]
    pub duration_seconds: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    #[serde(rename = "playCount")]
    pub play_count: i64,
    #[serde(rename = "shareCount")]
    pub share_count: i64,
    #[serde(rename = "commentCount")]
    pub comment_count: i64,
    #[serde(rename = "diggCount")]
    pub like_count: i64,
}

pub fn normalize(raw: RawVideoRecord) -> NormalizedVideo {
    let video = raw.video.unwrap_or_default();
    let music = raw.music.unwrap_or_default();
    let stats = raw.stats.unwrap_or_default();

    NormalizedVideo {
        id: raw.id.unwrap_or_default(),
        description: raw.desc.unwrap_or_default(),
        created_at: raw.create_time.unwrap_or_default(),
        video: VideoMedia {
            play_url: video.play_addr.unwrap_or_default(),
            download_url: video.download_addr.unwrap_or_default(),
            duration_seconds: video.duration.unwrap_or_default(),
        },
        music: Music {
            play_url: music.play_url.unwrap_or_default(),
            duration_seconds: music.duration.unwrap_or_default(),
        },
        stats: Stats {
            play_count: stats.play_count.unwrap_or_default(),
            share_count: stats.share_count.unwrap_or_default(),
            comment_count: stats.comment_count.unwrap_or_default(),
            like_count: stats.digg_count.unwrap_or_default(),
        },
    }
}

pub(crate) mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
    }

    /// A list of records. `null` or a non-array is an empty list; elements
    /// that are not objects are dropped.
    pub fn records<'de, D>(deserializer: D) -> Result<Vec<super::RawVideoRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(Vec::new());
        };
        let total = items.len();
        let records: Vec<_> = items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        if records.len() < total {
            tracing::warn!(dropped = total - records.len(), "skipped non-object video records");
        }
        Ok(records)
    }

    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Ok(None);
        }
        Ok(serde_json::from_value(value).ok())
    }
}
