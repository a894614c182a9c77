// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{MusicBrainzError, Result};
use crate::mbid::Mbid;
use crate::models::{
    Artist, ArtistSearchResult, Label, LabelSearchResult, Lookup, Recording,
    RecordingSearchResult, Release, ReleaseBrowse, ReleaseFilter, ReleaseSearchResult,
    SearchQuery, SearchResponse,
};
use crate::rate_limiter::RateLimiter;
use reqwest::header::{ACCEPT, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

pub const MUSICBRAINZ_API_BASE: &str = "https://musicbrainz.org/ws/2";
pub const USER_AGENT: &str = concat!(
    "MusicBrainzCLI/",
    env!("CARGO_PKG_VERSION"),
    " (educational-project)"
);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// MusicBrainz API client with rate limiting.
///
/// Every request goes through [`MusicBrainzClient::call`], which waits on the
/// client's [`RateLimiter`], forces JSON output and maps failures onto
/// [`MusicBrainzError`]. A 404 comes back as [`Lookup::NotFound`].
#[derive(Debug, Clone)]
pub struct MusicBrainzClient {
    client: Client,
    base_url: String,
    user_agent: String,
    rate_limiter: RateLimiter,
}

impl MusicBrainzClient {
    /// Create a new MusicBrainz client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> MusicBrainzClientBuilder {
        MusicBrainzClientBuilder::default()
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Search for artists.
    ///
    /// # Example
    /// ```no_run
    /// # use mbcli_musicbrainz::{MusicBrainzClient, SearchQuery};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let query = SearchQuery::new("Radiohead").limit(1);
    /// if let Some(page) = client.search_artists(query).await?.found() {
    ///     println!("{} matches", page.count);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_artists(
        &self,
        query: SearchQuery,
    ) -> Result<Lookup<SearchResponse<ArtistSearchResult>>> {
        self.search("artist", &query).await
    }

    /// Search for releases. The query may be a Lucene expression such as
    /// `release:"OK Computer" AND artist:"Radiohead"`.
    pub async fn search_releases(
        &self,
        query: SearchQuery,
    ) -> Result<Lookup<SearchResponse<ReleaseSearchResult>>> {
        self.search("release", &query).await
    }

    pub async fn search_recordings(
        &self,
        query: SearchQuery,
    ) -> Result<Lookup<SearchResponse<RecordingSearchResult>>> {
        self.search("recording", &query).await
    }

    pub async fn search_labels(
        &self,
        query: SearchQuery,
    ) -> Result<Lookup<SearchResponse<LabelSearchResult>>> {
        self.search("label", &query).await
    }

    /// Look up an artist by MBID.
    ///
    /// `inc` names sub-resources to embed, e.g. `["tags", "genres", "aliases"]`.
    ///
    /// # Example
    /// ```no_run
    /// # use mbcli_musicbrainz::{Mbid, MusicBrainzClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let mbid: Mbid = "a74b1b7f-71a5-4011-9441-d0b5e4122711".parse()?; // Radiohead
    /// let artist = client.lookup_artist(&mbid, &["tags", "genres"]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lookup_artist(&self, mbid: &Mbid, inc: &[&str]) -> Result<Lookup<Artist>> {
        self.lookup("artist", mbid, inc).await
    }

    /// Look up a release by MBID, e.g. with `["recordings", "artist-credits"]`.
    pub async fn lookup_release(&self, mbid: &Mbid, inc: &[&str]) -> Result<Lookup<Release>> {
        self.lookup("release", mbid, inc).await
    }

    pub async fn lookup_recording(
        &self,
        mbid: &Mbid,
        inc: &[&str],
    ) -> Result<Lookup<Recording>> {
        self.lookup("recording", mbid, inc).await
    }

    pub async fn lookup_label(&self, mbid: &Mbid, inc: &[&str]) -> Result<Lookup<Label>> {
        self.lookup("label", mbid, inc).await
    }

    /// Browse the releases credited to an artist.
    pub async fn browse_releases_by_artist(
        &self,
        artist: &Mbid,
        filter: &ReleaseFilter,
    ) -> Result<Lookup<ReleaseBrowse>> {
        self.browse_releases("artist", artist, filter).await
    }

    /// Browse the releases issued on a label.
    pub async fn browse_releases_by_label(
        &self,
        label: &Mbid,
        filter: &ReleaseFilter,
    ) -> Result<Lookup<ReleaseBrowse>> {
        self.browse_releases("label", label, filter).await
    }

    async fn search<T: DeserializeOwned>(
        &self,
        entity: &str,
        query: &SearchQuery,
    ) -> Result<Lookup<T>> {
        let params = [
            ("query", query.query.clone()),
            ("limit", query.clamped_limit().to_string()),
        ];
        self.call(entity, &params).await
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        entity: &str,
        mbid: &Mbid,
        inc: &[&str],
    ) -> Result<Lookup<T>> {
        let endpoint = format!("{}/{}", entity, mbid);
        let mut params = Vec::new();
        if !inc.is_empty() {
            // Serialized as `inc=a+b+c`.
            params.push(("inc", inc.join(" ")));
        }
        self.call(&endpoint, &params).await
    }

    async fn browse_releases(
        &self,
        link: &str,
        mbid: &Mbid,
        filter: &ReleaseFilter,
    ) -> Result<Lookup<ReleaseBrowse>> {
        let mut params = vec![
            (link, mbid.to_string()),
            ("limit", filter.clamped_limit().to_string()),
        ];
        if let Some(release_type) = &filter.release_type {
            params.push(("type", release_type.clone()));
        }
        if let Some(status) = &filter.status {
            params.push(("status", status.clone()));
        }
        self.call("release", &params).await
    }

    /// Perform one rate-limited GET against `<base>/<endpoint>`.
    ///
    /// `fmt=json` is always appended. A 404 yields `Lookup::NotFound`; every
    /// other failure is a [`MusicBrainzError`].
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Lookup<T>> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint
        ))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("fmt", "json");
        }

        self.rate_limiter.acquire().await;

        trace!(target: "musicbrainz", "GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(USER_AGENT_HEADER, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(target: "musicbrainz", "response status: {}", status);

        match status {
            StatusCode::NOT_FOUND => return Ok(Lookup::NotFound),
            StatusCode::SERVICE_UNAVAILABLE => return Err(MusicBrainzError::ServiceUnavailable),
            StatusCode::BAD_REQUEST => return Err(MusicBrainzError::BadRequest),
            s if !s.is_success() => {
                return Err(MusicBrainzError::Http {
                    status: s.as_u16(),
                    reason: s.canonical_reason().unwrap_or("Unknown error").to_string(),
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        trace!(target: "musicbrainz", "response body: {}", body);

        Ok(Lookup::Found(serde_json::from_str(&body)?))
    }
}

/// Builder for configuring a MusicBrainz client.
#[derive(Debug)]
pub struct MusicBrainzClientBuilder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    rate_limiter: Option<RateLimiter>,
    rate_limit_interval: Duration,
}

impl Default for MusicBrainzClientBuilder {
    fn default() -> Self {
        Self {
            base_url: MUSICBRAINZ_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_limiter: None,
            rate_limit_interval: Duration::from_secs(1),
        }
    }
}

impl MusicBrainzClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set rate limit interval between requests.
    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.rate_limit_interval = interval;
        self
    }

    /// Use an existing limiter; takes precedence over `rate_limit_interval`.
    pub fn rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Build the MusicBrainz client.
    pub fn build(self) -> Result<MusicBrainzClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| MusicBrainzError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        let rate_limiter = self
            .rate_limiter
            .unwrap_or_else(|| RateLimiter::new(self.rate_limit_interval));

        Ok(MusicBrainzClient {
            client,
            base_url: self.base_url,
            user_agent: self.user_agent,
            rate_limiter,
        })
    }
}
