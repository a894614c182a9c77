// SPDX-License-Identifier: GPL-3.0-or-later

//! MusicBrainz web service client for the command line.
//!
//! This crate provides a rate-limited client for the MusicBrainz `/ws/2` API
//! (search, lookup and browse endpoints), typed entity models, and a resolver
//! that turns free-text queries into MusicBrainz identifiers.

pub mod client;
pub mod error;
pub mod mbid;
pub mod models;
pub mod rate_limiter;
pub mod resolver;

pub use client::{MusicBrainzClient, MusicBrainzClientBuilder};
pub use error::{MusicBrainzError, Result};
pub use mbid::{InvalidMbid, Mbid};
pub use models::{
    Alias, Artist, ArtistCredit, ArtistRef, ArtistSearchResult, Genre, Label, LabelInfo,
    LabelRef, LabelSearchResult, LifeSpan, Lookup, Medium, Recording, RecordingRef,
    RecordingSearchResult, Release, ReleaseBrowse, ReleaseFilter, ReleaseRef,
    ReleaseSearchResult, SearchQuery, SearchResponse, Tag, Track,
};
pub use rate_limiter::RateLimiter;
pub use resolver::{resolve, resolve_artist, resolve_release, EntityKind, ResolveError};
