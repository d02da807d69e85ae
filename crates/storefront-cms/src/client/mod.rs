//! HTTP client for the content delivery API.

mod redact;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use storefront_core::{AppConfig, CmsCredentials};

use crate::error::CmsError;
use crate::pagination::EntriesQuery;
use crate::types::{AssetRecord, EntriesResponse, RawEntry};

pub use redact::redacted_url;

/// Read-only client for one space/environment of the content delivery API.
///
/// Every request carries the access token as a query parameter. A 404 maps
/// to [`CmsError::NotFound`] and any other non-2xx status to
/// [`CmsError::UnexpectedStatus`]. Requests are never retried.
pub struct CmsClient {
    client: Client,
    credentials: CmsCredentials,
    base_url: Url,
    content_type: String,
}

impl CmsClient {
    /// Creates a client.
    ///
    /// `timeout_secs` bounds both connecting and the whole request. `None`
    /// leaves requests without any client-side timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`CmsError::InvalidBaseUrl`] if `base_url` cannot
    /// carry path segments.
    pub fn new(
        credentials: CmsCredentials,
        base_url: &str,
        content_type: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, CmsError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            let timeout = Duration::from_secs(secs);
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        let client = builder.build()?;

        // Exactly one trailing slash so appended segments land under the
        // configured path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| CmsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(CmsError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            credentials,
            base_url: parsed,
            content_type: content_type.to_owned(),
        })
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`CmsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CmsError> {
        Self::new(
            config.cms.clone(),
            &config.cms_base_url,
            &config.content_type,
            config.cms_request_timeout_secs,
            &config.cms_user_agent,
        )
    }

    /// Fetches one page of product entries with their linked assets inlined.
    ///
    /// # Errors
    ///
    /// - [`CmsError::NotFound`] / [`CmsError::UnexpectedStatus`] for non-2xx responses.
    /// - [`CmsError::Http`] on network or TLS failure.
    /// - [`CmsError::Deserialize`] if the body is not an entries collection.
    pub async fn fetch_entries(&self, query: &EntriesQuery) -> Result<EntriesResponse, CmsError> {
        let url = self.entries_url(query);
        self.get_json(url, "entries collection").await
    }

    /// Fetches a single entry by id. Linked assets are not inlined.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::NotFound`] when no entry has this id; otherwise as
    /// [`CmsClient::fetch_entries`].
    pub async fn fetch_entry(&self, id: &str) -> Result<RawEntry, CmsError> {
        let url = self.space_url(&["entries", id]);
        self.get_json(url, &format!("entry {id}")).await
    }

    /// Fetches a single asset by id.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::NotFound`] when no asset has this id; otherwise as
    /// [`CmsClient::fetch_entries`].
    pub async fn fetch_asset(&self, id: &str) -> Result<AssetRecord, CmsError> {
        let url = self.space_url(&["assets", id]);
        self.get_json(url, &format!("asset {id}")).await
    }

    /// Builds the collection URL: content type first, then paging and filter
    /// parameters.
    fn entries_url(&self, query: &EntriesQuery) -> Url {
        let mut url = self.space_url(&["entries"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("content_type", &self.content_type);
            for (key, value) in query.to_pairs() {
                pairs.append_pair(key, &value);
            }
        }
        url
    }

    /// Builds `{base}/spaces/{space}/environments/{env}/{segments...}` with
    /// the access token attached. Segments are percent-encoded.
    fn space_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend([
                    "spaces",
                    self.credentials.space_id.as_str(),
                    "environments",
                    self.credentials.environment.as_str(),
                ])
                .extend(segments);
        }
        url.query_pairs_mut()
            .append_pair(redact::ACCESS_TOKEN_PARAM, &self.credentials.access_token);
        url
    }

    /// Sends a GET request, maps non-2xx statuses to typed errors, and parses
    /// the body as `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, CmsError> {
        let logged_url = redacted_url(&url);
        tracing::debug!(url = %logged_url, "requesting CMS resource");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CmsError::Http(e.without_url()))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CmsError::NotFound { url: logged_url });
        }

        if !status.is_success() {
            return Err(CmsError::UnexpectedStatus {
                status: status.as_u16(),
                url: logged_url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CmsError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| CmsError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
