// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handlers: resolve the query, fetch the entity, print it.

use crate::cli::Command;
use crate::error::CommandError;
use crate::format::{format_duration, format_list, UNKNOWN};
use mbcli_musicbrainz::{
    resolve_artist, resolve_release, Artist, Mbid, MusicBrainzClient, Release, ReleaseFilter,
};
use std::io::Write;
use tracing::info;

pub type Result<T> = std::result::Result<T, CommandError>;

const RULE_WIDTH: usize = 60;
const MAX_TAGS: usize = 10;
const MAX_LABELS: usize = 3;

const ARTIST_INFO_INC: &[&str] = &["tags", "genres", "aliases"];
const ALBUM_INFO_INC: &[&str] = &["artist-credits", "labels", "tags", "genres"];
const ALBUM_TRACKS_INC: &[&str] = &["recordings", "artist-credits"];

/// Dispatch a parsed command.
pub async fn run<W: Write>(client: &MusicBrainzClient, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::ArtistInfo { query } => artist_info(client, &query, out).await,
        Command::ArtistReleases {
            query,
            limit,
            release_type,
            status,
        } => {
            let mut filter = ReleaseFilter::default().limit(limit);
            if let Some(release_type) = release_type {
                filter = filter.release_type(release_type.as_str());
            }
            if let Some(status) = status {
                filter = filter.status(status.as_str());
            }
            artist_releases(client, &query, &filter, out).await
        }
        Command::AlbumInfo { query, artist } => {
            album_info(client, &query, artist.as_deref(), out).await
        }
        Command::AlbumTracks { query, artist } => {
            album_tracks(client, &query, artist.as_deref(), out).await
        }
    }
}

/// Name, MBID, type, country, active period, tags and genres of an artist.
pub async fn artist_info<W: Write>(
    client: &MusicBrainzClient,
    query: &str,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Searching for '{}'...", query)?;
    let mbid = resolve_artist(client, query).await?;
    let artist = fetch_artist(client, &mbid, ARTIST_INFO_INC).await?;

    banner(out, &[artist.name.as_deref().unwrap_or(UNKNOWN)])?;

    writeln!(out, "MBID:    {}", artist.id)?;
    writeln!(out, "Type:    {}", or_unknown(&artist.artist_type))?;
    writeln!(out, "Country: {}", or_unknown(&artist.country))?;

    if let Some(span) = artist.life_span.as_ref().filter(|span| !span.is_empty()) {
        let begin = span.begin.as_deref().unwrap_or("?");
        if span.ended == Some(true) {
            let end = span.end.as_deref().unwrap_or("?");
            writeln!(out, "Active:  {} - {}", begin, end)?;
        } else {
            writeln!(out, "Active:  {} - present", begin)?;
        }
    }

    if let Some(note) = non_empty(&artist.disambiguation) {
        writeln!(out, "Note:    {}", note)?;
    }

    if !artist.tags.is_empty() {
        let names: Vec<&str> = artist.tags.iter().map(|tag| tag.name.as_str()).collect();
        writeln!(out, "\nTags:    {}", format_list(&names, MAX_TAGS))?;
    }

    if !artist.genres.is_empty() {
        let names: Vec<&str> = artist.genres.iter().map(|genre| genre.name.as_str()).collect();
        writeln!(out, "Genres:  {}", format_list(&names, MAX_TAGS))?;
    }

    writeln!(out)?;
    Ok(())
}

/// Numbered list of an artist's releases, optionally filtered.
pub async fn artist_releases<W: Write>(
    client: &MusicBrainzClient,
    query: &str,
    filter: &ReleaseFilter,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Searching for '{}'...", query)?;
    let mbid = resolve_artist(client, query).await?;
    let artist = fetch_artist(client, &mbid, &[]).await?;
    let artist_name = artist.name.as_deref().unwrap_or(UNKNOWN);
    writeln!(out, "Found: {}\n", artist_name)?;

    writeln!(out, "Fetching releases...")?;
    let browse = client
        .browse_releases_by_artist(&mbid, filter)
        .await?
        .found();
    let (releases, total) = match browse {
        Some(page) => {
            let total = page.release_count.unwrap_or(page.releases.len() as u32);
            (page.releases, total)
        }
        None => (Vec::new(), 0),
    };
    info!(target: "cli", "fetched {} of {} releases", releases.len(), total);

    if releases.is_empty() {
        writeln!(out, "\nNo releases found for {}.", artist_name)?;
        return Ok(());
    }

    let heading = format!("Releases by {}", artist_name);
    banner(out, &[heading.as_str()])?;
    writeln!(
        out,
        "Showing {} of {} total releases\n",
        releases.len(),
        total
    )?;

    for (i, release) in releases.iter().enumerate() {
        writeln!(out, "{:3}. {}", i + 1, or_unknown(&release.title))?;
        writeln!(
            out,
            "      {} | {}",
            release.date.as_deref().unwrap_or("Unknown date"),
            or_unknown(&release.status)
        )?;
        writeln!(out, "      MBID: {}", release.id)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Title, artist, date, status, country, labels, barcode and tags of a release.
pub async fn album_info<W: Write>(
    client: &MusicBrainzClient,
    query: &str,
    artist: Option<&str>,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Searching for '{}'...", query)?;
    let mbid = resolve_release(client, query, artist).await?;
    let release = fetch_release(client, &mbid, ALBUM_INFO_INC).await?;

    banner(out, &[or_unknown(&release.title)])?;

    writeln!(out, "MBID:   {}", release.id)?;
    if !release.artist_credit.is_empty() {
        writeln!(out, "Artist: {}", release.credited_artists())?;
    }
    writeln!(out, "Date:   {}", or_unknown(&release.date))?;
    writeln!(out, "Status: {}", or_unknown(&release.status))?;
    writeln!(out, "Country: {}", or_unknown(&release.country))?;

    if !release.label_info.is_empty() {
        let labels: Vec<&str> = release
            .label_info
            .iter()
            .map(|info| {
                info.label
                    .as_ref()
                    .and_then(|label| label.name.as_deref())
                    .unwrap_or(UNKNOWN)
            })
            .collect();
        writeln!(out, "Labels: {}", format_list(&labels, MAX_LABELS))?;
    }

    if let Some(barcode) = non_empty(&release.barcode) {
        writeln!(out, "Barcode: {}", barcode)?;
    }

    if !release.tags.is_empty() {
        let names: Vec<&str> = release.tags.iter().map(|tag| tag.name.as_str()).collect();
        writeln!(out, "\nTags: {}", format_list(&names, MAX_TAGS))?;
    }

    writeln!(out)?;
    Ok(())
}

/// Track list of a release, grouped by medium.
pub async fn album_tracks<W: Write>(
    client: &MusicBrainzClient,
    query: &str,
    artist: Option<&str>,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Searching for '{}'...", query)?;
    let mbid = resolve_release(client, query, artist).await?;
    let release = fetch_release(client, &mbid, ALBUM_TRACKS_INC).await?;

    let byline = format!("by {}", release.credited_artists());
    banner(out, &[or_unknown(&release.title), byline.as_str()])?;

    if release.media.is_empty() {
        writeln!(out, "No track information available.")?;
        return Ok(());
    }

    for medium in &release.media {
        writeln!(
            out,
            "{} {} ({} tracks):",
            medium.format.as_deref().unwrap_or("Medium"),
            medium.position.unwrap_or(1),
            medium.track_count.unwrap_or(medium.tracks.len() as u32)
        )?;
        writeln!(out)?;

        for track in &medium.tracks {
            let position = track
                .position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "?".to_string());
            let duration = match track.length {
                Some(ms) if ms != 0 => format_duration(Some(ms)),
                _ => "?".to_string(),
            };
            writeln!(
                out,
                "  {:>2}. {} ({})",
                position,
                or_unknown(&track.title),
                duration
            )?;
        }

        writeln!(out)?;
    }

    Ok(())
}

async fn fetch_artist(client: &MusicBrainzClient, mbid: &Mbid, inc: &[&str]) -> Result<Artist> {
    client
        .lookup_artist(mbid, inc)
        .await?
        .found()
        .ok_or_else(|| CommandError::NotFound(format!("Artist '{}' not found", mbid)))
}

async fn fetch_release(client: &MusicBrainzClient, mbid: &Mbid, inc: &[&str]) -> Result<Release> {
    client
        .lookup_release(mbid, inc)
        .await?
        .found()
        .ok_or_else(|| CommandError::NotFound(format!("Release '{}' not found", mbid)))
}

/// Heading lines framed by rules, preceded and followed by a blank line.
fn banner<W: Write>(out: &mut W, lines: &[&str]) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{}", rule)?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "{}\n", rule)
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNKNOWN)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
