// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the hyphenated 8-4-4-4-12 form.
const HYPHENATED_LEN: usize = 36;

/// MusicBrainz identifier.
///
/// Keeps the exact text it was created from, so an identifier typed by the
/// user is passed back out unchanged (including letter case).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mbid(String);

impl Mbid {
    /// Parse `s` if it has the identifier shape: 32 hex digits grouped
    /// 8-4-4-4-12, any case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::is_valid(s).then(|| Self(s.to_string()))
    }

    /// Shape check only; nothing is looked up.
    pub fn is_valid(s: &str) -> bool {
        // `Uuid` also accepts simple, braced and urn forms, all of which
        // differ in length from the hyphenated one.
        s.len() == HYPHENATED_LEN && Uuid::parse_str(s).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_uuid(&self) -> Uuid {
        // Shape was checked on construction.
        Uuid::parse_str(&self.0).unwrap_or_default()
    }
}

impl From<Uuid> for Mbid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }
}

impl FromStr for Mbid {
    type Err = InvalidMbid;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidMbid(s.to_string()))
    }
}

impl fmt::Display for Mbid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Mbid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a MusicBrainz identifier")]
pub struct InvalidMbid(pub String);
