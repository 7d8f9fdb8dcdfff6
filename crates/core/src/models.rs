//! Row record of an exported game library

use chrono::NaiveDateTime;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::categories::{CategoryRow, CategorySet};
use crate::relative_time::parse_sql_timestamp;

/// One game of the exported library
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRow {
    pub title: String,
    /// Comma-separated platform keys (`steam,gog`)
    #[serde(default)]
    pub platforms: String,
    /// `None` when the exporter found no category data (written as `false`)
    #[serde(default, deserialize_with = "categories_or_false")]
    pub categories: Option<CategorySet>,
    /// Total playtime in minutes. Exports may write it as a float.
    #[serde(default, deserialize_with = "minutes")]
    pub game_time: Option<f64>,
    /// SQL-style local timestamp, `None` if never played
    #[serde(default, deserialize_with = "lenient")]
    pub last_played: Option<String>,
    /// Stars, 0 to 5
    #[serde(default, deserialize_with = "stars")]
    pub rating: u8,
    /// Ids of friends owning the game, keys of the export's friend table
    #[serde(default, deserialize_with = "lenient_list")]
    pub friends: Vec<String>,
}

/// Entry of the export's friend table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FriendInfo {
    pub name: String,
}

impl GameRow {
    /// Parsed last-played time. A value that does not parse counts as never played.
    pub fn last_played_at(&self) -> Option<NaiveDateTime> {
        let raw = self.last_played.as_deref()?;
        match parse_sql_timestamp(raw) {
            Ok(ts) => Some(ts),
            Err(e) => {
                tracing::debug!(title = %self.title, "ignoring last played: {}", e);
                None
            }
        }
    }

    pub fn playtime_hours(&self) -> Option<f64> {
        self.game_time.filter(|&m| m > 0.0).map(|m| m / 60.0)
    }
}

impl CategoryRow for GameRow {
    fn categories(&self) -> Option<&CategorySet> {
        self.categories.as_ref()
    }
}

fn categories_or_false<'de, D>(deserializer: D) -> Result<Option<CategorySet>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Set(CategorySet),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Set(set)) => Some(set),
        Some(Raw::Other(_)) | None => None,
    })
}

/// A value of type `T`, or anything else
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

/// Read an optional field, treating a value of the wrong type as missing
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Value(value)) => Some(value),
        Some(Lenient::Other(_)) | None => None,
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

fn minutes<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, f64>(deserializer)?.filter(|m| m.is_finite() && *m >= 0.0))
}

fn stars<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, f64>(deserializer)?
        .filter(|r| r.is_finite())
        .map_or(0, |r| r.round().clamp(0.0, 5.0) as u8))
}
