//! Song data model
//!
//! JSON field names follow the public API (`group`, `song`, `releaseDate`,
//! `text`, `link`). Release dates render as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Release date wire format
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored song record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Store-assigned identifier, immutable after creation
    pub id: i64,
    /// Performing act's name
    pub group: String,
    /// Song title
    #[serde(rename = "song")]
    pub title: String,
    #[serde(
        rename = "releaseDate",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_release_date"
    )]
    pub release_date: Option<NaiveDate>,
    /// Full lyric body, stanzas separated by a blank line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// External reference URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Song fields supplied by a client on create or update
///
/// Any `id` in the request body is ignored; the store or the request path
/// decides it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewSong {
    pub group: String,
    #[serde(rename = "song")]
    pub title: String,
    #[serde(
        rename = "releaseDate",
        default,
        deserialize_with = "deserialize_release_date"
    )]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl NewSong {
    pub fn new(group: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            title: title.into(),
            release_date: None,
            text: None,
            link: None,
        }
    }

    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Check required fields are present and non-blank
    pub fn validate(&self) -> Result<()> {
        if self.group.trim().is_empty() {
            return Err(Error::InvalidInput("group is required".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("song is required".to_string()));
        }
        Ok(())
    }

    /// Attach an id, producing a full record
    pub fn into_song(self, id: i64) -> Song {
        Song {
            id,
            group: self.group,
            title: self.title,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
        }
    }
}

/// Details returned by the (group, title) lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongInfo {
    #[serde(rename = "releaseDate")]
    pub release_date: Option<NaiveDate>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl From<Song> for SongInfo {
    fn from(song: Song) -> Self {
        Self {
            release_date: song.release_date,
            text: song.text,
            link: song.link,
        }
    }
}

/// Exact-match filters for listing songs
///
/// Unset fields do not constrain the result; set fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl SongFilter {
    /// Build a filter from raw query values; empty strings mean "no filter"
    pub fn from_params(
        group: Option<&str>,
        title: Option<&str>,
        release_date: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            group: non_empty(group),
            title: non_empty(title),
            release_date: parse_release_date(release_date.unwrap_or_default())?,
        })
    }

    /// In-process equivalent of the SQL predicate
    pub fn matches(&self, song: &Song) -> bool {
        self.group.as_ref().map_or(true, |g| *g == song.group)
            && self.title.as_ref().map_or(true, |t| *t == song.title)
            && self
                .release_date
                .map_or(true, |d| song.release_date == Some(d))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Parse a release date
///
/// Accepts `YYYY-MM-DD`, and RFC 3339 timestamps for older clients that
/// send a full time value. An empty string yields `None`.
pub fn parse_release_date(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT) {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| Error::InvalidInput(format!("invalid release date: {}", raw)))
}

fn deserialize_release_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_release_date(&s).map_err(serde::de::Error::custom),
    }
}
