// SPDX-License-Identifier: GPL-3.0-or-later

use clap::{Parser, Subcommand, ValueEnum};

const EXAMPLES: &str = "\
Examples:
  musicbrainz-cli artist-info \"Radiohead\"
  musicbrainz-cli artist-releases \"Miles Davis\" --limit 20 --type album
  musicbrainz-cli album-info \"OK Computer\" --artist \"Radiohead\"
  musicbrainz-cli album-tracks \"Abbey Road\" --artist \"The Beatles\"

For more information, visit: https://musicbrainz.org";

#[derive(Debug, Parser)]
#[command(
    name = "musicbrainz-cli",
    version,
    about = "MusicBrainz CLI - Explore music metadata from the terminal",
    after_help = EXAMPLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Display detailed information about an artist
    ArtistInfo {
        /// Artist name or MBID
        query: String,
    },
    /// List all releases by an artist
    ArtistReleases {
        /// Artist name or MBID
        query: String,
        /// Maximum results (capped at 100 by the service)
        #[arg(long, default_value_t = 25)]
        limit: u32,
        /// Filter by release type
        #[arg(long = "type", value_enum)]
        release_type: Option<ReleaseType>,
        /// Filter by release status
        #[arg(long, value_enum)]
        status: Option<ReleaseStatus>,
    },
    /// Display detailed information about an album
    AlbumInfo {
        /// Album name or MBID
        query: String,
        /// Artist name to narrow search
        #[arg(long)]
        artist: Option<String>,
    },
    /// Show tracklist for an album
    AlbumTracks {
        /// Album name or MBID
        query: String,
        /// Artist name to narrow search
        #[arg(long)]
        artist: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReleaseType {
    Album,
    Single,
    Ep,
    Broadcast,
    Other,
}

impl ReleaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Album => "album",
            ReleaseType::Single => "single",
            ReleaseType::Ep => "ep",
            ReleaseType::Broadcast => "broadcast",
            ReleaseType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReleaseStatus {
    Official,
    Promotion,
    Bootleg,
    PseudoRelease,
}

impl ReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Official => "official",
            ReleaseStatus::Promotion => "promotion",
            ReleaseStatus::Bootleg => "bootleg",
            ReleaseStatus::PseudoRelease => "pseudo-release",
        }
    }
}
