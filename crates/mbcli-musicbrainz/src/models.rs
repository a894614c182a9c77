// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum page size accepted by the MusicBrainz API.
pub const MAX_LIMIT: u32 = 100;

/// Outcome of a request that may legitimately find nothing.
///
/// The client returns `NotFound` for an HTTP 404 instead of failing, so
/// callers have to decide what a missing entity means for them.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Artist information from MusicBrainz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// MusicBrainz artist ID (MBID).
    pub id: Uuid,
    /// Artist name.
    #[serde(default)]
    pub name: Option<String>,
    /// Artist sort name (for sorting).
    #[serde(rename = "sort-name", default)]
    pub sort_name: Option<String>,
    /// Disambiguation comment (e.g., "US hip hop artist").
    #[serde(default)]
    pub disambiguation: Option<String>,
    /// Artist type (e.g., "Person", "Group").
    #[serde(rename = "type", default)]
    pub artist_type: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "life-span", default)]
    pub life_span: Option<LifeSpan>,
    /// Only present when requested with `inc=tags`.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Only present when requested with `inc=genres`.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Only present when requested with `inc=aliases`.
    #[serde(default)]
    pub aliases: Vec<Alias>,
    /// Search score (only present in search results).
    #[serde(default)]
    pub score: Option<u32>,
}

/// Active period of an artist or label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LifeSpan {
    #[serde(default)]
    pub begin: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub ended: Option<bool>,
}

impl LifeSpan {
    pub fn is_empty(&self) -> bool {
        self.begin.is_none() && self.end.is_none() && self.ended.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub count: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub count: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alias {
    pub name: String,
    #[serde(rename = "sort-name", default)]
    pub sort_name: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub primary: Option<bool>,
}

/// Release (a concrete album edition) from MusicBrainz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Release {
    /// MusicBrainz release ID (MBID).
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    /// e.g. "Official", "Bootleg".
    #[serde(default)]
    pub status: Option<String>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD).
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    /// Artist credit for the release.
    #[serde(rename = "artist-credit", default)]
    pub artist_credit: Vec<ArtistCredit>,
    #[serde(rename = "label-info", default)]
    pub label_info: Vec<LabelInfo>,
    /// Discs/sides; only present with `inc=recordings` or `inc=media`.
    #[serde(default)]
    pub media: Vec<Medium>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Search score (only present in search results).
    #[serde(default)]
    pub score: Option<u32>,
}

impl Release {
    /// Credited artist names joined with `", "`.
    pub fn credited_artists(&self) -> String {
        credited_names(&self.artist_credit)
    }
}

/// Artist credit entry (artist contribution to a release or recording).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistCredit {
    /// Name as credited.
    #[serde(default)]
    pub name: Option<String>,
    /// Artist details.
    #[serde(default)]
    pub artist: Option<ArtistRef>,
    /// Join phrase (e.g., " & ", " feat. ").
    #[serde(default)]
    pub joinphrase: Option<String>,
}

/// Reference to an artist (minimal info).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    /// MusicBrainz artist ID.
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "sort-name", default)]
    pub sort_name: Option<String>,
}

pub(crate) fn credited_names(credits: &[ArtistCredit]) -> String {
    credits
        .iter()
        .map(|credit| credit.name.as_deref().unwrap_or("Unknown"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelInfo {
    #[serde(rename = "catalog-number", default)]
    pub catalog_number: Option<String>,
    #[serde(default)]
    pub label: Option<LabelRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelRef {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
}

/// One disc or side of a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medium {
    #[serde(default)]
    pub position: Option<u32>,
    /// e.g. "CD", "12\" Vinyl".
    #[serde(default)]
    pub format: Option<String>,
    #[serde(rename = "track-count", default)]
    pub track_count: Option<u32>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Ordinal on the medium.
    #[serde(default)]
    pub position: Option<u32>,
    /// Printed track number (e.g. "A1").
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Length in milliseconds.
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub recording: Option<RecordingRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordingRef {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub length: Option<i64>,
}

/// Recording (a distinct audio track) from MusicBrainz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recording {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    /// Length in milliseconds.
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    #[serde(rename = "artist-credit", default)]
    pub artist_credit: Vec<ArtistCredit>,
    #[serde(default)]
    pub releases: Vec<ReleaseRef>,
    #[serde(default)]
    pub score: Option<u32>,
}

impl Recording {
    pub fn credited_artists(&self) -> String {
        credited_names(&self.artist_credit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseRef {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Record label from MusicBrainz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Label {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub label_type: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "label-code", default)]
    pub label_code: Option<u32>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    #[serde(rename = "life-span", default)]
    pub life_span: Option<LifeSpan>,
    #[serde(default)]
    pub score: Option<u32>,
}

/// Search query parameters.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Lucene query string.
    pub query: String,
    /// Maximum number of results (clamped to 100).
    pub limit: u32,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Query matching entities tagged with `tag` (e.g. "jazz").
    pub fn by_tag(tag: &str) -> Self {
        Self {
            query: format!("tag:{}", tag),
            limit: 25,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn clamped_limit(&self) -> u32 {
        self.limit.min(MAX_LIMIT)
    }
}

/// Filters for browsing releases linked to an artist or label.
#[derive(Debug, Clone)]
pub struct ReleaseFilter {
    /// Maximum number of results (clamped to 100).
    pub limit: u32,
    /// Release group type, e.g. "album", "single", "ep".
    pub release_type: Option<String>,
    /// Release status, e.g. "official", "bootleg".
    pub status: Option<String>,
}

impl Default for ReleaseFilter {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            release_type: None,
            status: None,
        }
    }
}

impl ReleaseFilter {
    pub const DEFAULT_LIMIT: u32 = 25;

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn release_type(mut self, release_type: impl Into<String>) -> Self {
        self.release_type = Some(release_type.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub(crate) fn clamped_limit(&self) -> u32 {
        self.limit.min(MAX_LIMIT)
    }
}

/// Generic search response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<String>,
    /// Total number of matches on the server.
    #[serde(default)]
    pub count: u32,
    /// Offset used for this page.
    #[serde(default)]
    pub offset: u32,
    /// Results for this page.
    #[serde(flatten)]
    pub results: T,
}

/// Artist search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResult {
    #[serde(default)]
    pub artists: Vec<Artist>,
}

/// Release search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseSearchResult {
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// Recording search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSearchResult {
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// Label search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSearchResult {
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Response of `GET /release?artist=..` or `GET /release?label=..`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseBrowse {
    /// Total number of releases linked to the entity.
    #[serde(rename = "release-count", default)]
    pub release_count: Option<u32>,
    #[serde(rename = "release-offset", default)]
    pub release_offset: Option<u32>,
    #[serde(default)]
    pub releases: Vec<Release>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_missing_fields_default() {
        let release: Release = serde_json::from_value(serde_json::json!({
            "id": "0b6b4ba0-d36f-47bd-b4ea-6a5b91842d29"
        }))
        .unwrap();

        assert_eq!(release.title, None);
        assert!(release.artist_credit.is_empty());
        assert!(release.media.is_empty());
        assert_eq!(release.credited_artists(), "");
    }

    #[test]
    fn test_release_with_media() {
        let release: Release = serde_json::from_value(serde_json::json!({
            "id": "0b6b4ba0-d36f-47bd-b4ea-6a5b91842d29",
            "title": "OK Computer",
            "artist-credit": [
                {"name": "Radiohead", "joinphrase": ""}
            ],
            "label-info": [
                {"catalog-number": "NODATA 02", "label": {"id": "df7d1c7f-ef95-425f-8eef-445b3d7bcbd9", "name": "Parlophone"}}
            ],
            "media": [{
                "position": 1,
                "format": "CD",
                "track-count": 2,
                "tracks": [
                    {"position": 1, "number": "1", "title": "Airbag", "length": 285000},
                    {"position": 2, "number": "2", "title": "Paranoid Android", "length": null}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(release.credited_artists(), "Radiohead");
        assert_eq!(
            release.label_info[0].label.as_ref().unwrap().name.as_deref(),
            Some("Parlophone")
        );
        let medium = &release.media[0];
        assert_eq!(medium.track_count, Some(2));
        assert_eq!(medium.tracks[0].length, Some(285000));
        assert_eq!(medium.tracks[1].length, None);
    }

    #[test]
    fn test_artist_life_span() {
        let artist: Artist = serde_json::from_value(serde_json::json!({
            "id": "a74b1b7f-71a5-4011-9441-d0b5e4122711",
            "name": "Radiohead",
            "type": "Group",
            "life-span": {"begin": "1991", "end": null, "ended": false},
            "tags": [{"name": "rock", "count": 10}]
        }))
        .unwrap();

        let span = artist.life_span.unwrap();
        assert_eq!(span.begin.as_deref(), Some("1991"));
        assert_eq!(span.ended, Some(false));
        assert!(!span.is_empty());
        assert_eq!(artist.tags[0].name, "rock");
        assert!(artist.genres.is_empty());
    }

    #[test]
    fn test_limits_are_clamped() {
        assert_eq!(SearchQuery::new("x").limit(500).clamped_limit(), 100);
        assert_eq!(SearchQuery::new("x").clamped_limit(), 10);
        assert_eq!(SearchQuery::by_tag("jazz").query, "tag:jazz");
        assert_eq!(SearchQuery::by_tag("jazz").clamped_limit(), 25);
        assert_eq!(ReleaseFilter::default().limit(101).clamped_limit(), 100);
        assert_eq!(ReleaseFilter::default().clamped_limit(), 25);
    }

    #[test]
    fn test_lookup_helpers() {
        let found = Lookup::Found(3);
        assert!(found.is_found());
        assert_eq!(found.found(), Some(3));

        let missing: Lookup<i32> = Lookup::NotFound;
        assert!(!missing.is_found());
        assert_eq!(missing.found(), None);
    }
}
