// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns user input into MusicBrainz identifiers.
//!
//! Input that already looks like an MBID is returned as-is. Anything else is
//! searched for once and the first hit wins; there is no ranking beyond the
//! order the service returns.

use crate::client::MusicBrainzClient;
use crate::error::MusicBrainzError;
use crate::mbid::Mbid;
use crate::models::SearchQuery;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Entity types that can be resolved by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Artist,
    Release,
    Recording,
    Label,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Artist => "Artist",
            EntityKind::Release => "Release",
            EntityKind::Recording => "Recording",
            EntityKind::Label => "Label",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{}", not_found_message(.kind, .query, .disambiguator.as_deref()))]
    NotFound {
        kind: EntityKind,
        query: String,
        disambiguator: Option<String>,
    },

    #[error(transparent)]
    Service(#[from] MusicBrainzError),
}

fn not_found_message(kind: &EntityKind, query: &str, disambiguator: Option<&str>) -> String {
    match disambiguator {
        Some(artist) => format!("{} '{}' by '{}' not found", kind, query, artist),
        None => format!("{} '{}' not found", kind, query),
    }
}

/// Resolve `query` to an identifier of the given kind.
///
/// `disambiguator` is an artist name and only narrows release searches. At
/// most one request is made.
pub async fn resolve(
    client: &MusicBrainzClient,
    kind: EntityKind,
    query: &str,
    disambiguator: Option<&str>,
) -> Result<Mbid, ResolveError> {
    if let Some(mbid) = Mbid::parse(query) {
        debug!(target: "resolver", "{} query is already an MBID", kind);
        return Ok(mbid);
    }

    let disambiguator = match kind {
        EntityKind::Release => disambiguator.filter(|artist| !artist.is_empty()),
        _ => None,
    };
    let search = SearchQuery::new(search_text(query, disambiguator)).limit(1);
    debug!(target: "resolver", "searching {} for {:?}", kind, search.query);

    let first = match kind {
        EntityKind::Artist => client
            .search_artists(search)
            .await?
            .found()
            .and_then(|page| page.results.artists.into_iter().next())
            .map(|artist| artist.id),
        EntityKind::Release => client
            .search_releases(search)
            .await?
            .found()
            .and_then(|page| page.results.releases.into_iter().next())
            .map(|release| release.id),
        EntityKind::Recording => client
            .search_recordings(search)
            .await?
            .found()
            .and_then(|page| page.results.recordings.into_iter().next())
            .map(|recording| recording.id),
        EntityKind::Label => client
            .search_labels(search)
            .await?
            .found()
            .and_then(|page| page.results.labels.into_iter().next())
            .map(|label| label.id),
    };

    first.map(Mbid::from).ok_or_else(|| ResolveError::NotFound {
        kind,
        query: query.to_string(),
        disambiguator: disambiguator.map(str::to_string),
    })
}

pub async fn resolve_artist(client: &MusicBrainzClient, query: &str) -> Result<Mbid, ResolveError> {
    resolve(client, EntityKind::Artist, query, None).await
}

pub async fn resolve_release(
    client: &MusicBrainzClient,
    query: &str,
    artist: Option<&str>,
) -> Result<Mbid, ResolveError> {
    resolve(client, EntityKind::Release, query, artist).await
}

/// Plain text, or `release:"<title>" AND artist:"<artist>"` when an artist is given.
fn search_text(query: &str, artist: Option<&str>) -> String {
    match artist {
        Some(artist) => format!(
            "release:\"{}\" AND artist:\"{}\"",
            escape_phrase(query),
            escape_phrase(artist)
        ),
        None => query.to_string(),
    }
}

fn escape_phrase(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
