//! GitHub release API client.
//!
//! Async HTTP client using `reqwest` with Bearer token authentication.
//! Reads and deletes go to the API host; uploads go to the separate
//! upload host.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::types::{ApiErrorBody, Release, UploadedAsset};

/// Default REST API host.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default host for release asset uploads.
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
const OCTET_STREAM: &str = "application/octet-stream";

/// Longest raw error body echoed back when it is not JSON.
const MAX_RAW_BODY_CHARS: usize = 200;

/// Path-segment escaping that leaves tag-friendly characters alone.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Errors from the release API client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status} {reason}: {body}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid API token")]
    InvalidToken,
}

/// Human-readable detail extracted from an error response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    /// The `message` field of a JSON error body.
    Message(String),
    /// Raw body, truncated, when the body is not JSON.
    Raw(String),
}

impl Error {
    /// HTTP status of an API error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Reason phrase of an API error response.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Error::Api { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Detail from the error response body, if there was one.
    ///
    /// JSON bodies yield their `message` (or `"Unknown error"` when the
    /// field is absent); anything else yields up to 200 characters of the
    /// raw body.
    pub fn detail(&self) -> Option<ErrorDetail> {
        let Error::Api { body, .. } = self else {
            return None;
        };
        if body.is_empty() {
            return None;
        }
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => Some(ErrorDetail::Message(
                parsed.message.unwrap_or_else(|| "Unknown error".into()),
            )),
            Err(_) => Some(ErrorDetail::Raw(
                body.chars().take(MAX_RAW_BODY_CHARS).collect(),
            )),
        }
    }
}

/// GitHub release API client.
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    upload_url: String,
}

impl Client {
    /// Creates a new client authenticated with `token`.
    pub fn new(token: &str) -> Result<Self, Error> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("msi-relay/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url: DEFAULT_API_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
        })
    }

    /// Points the client at different API and upload hosts.
    pub fn with_base_urls(mut self, api_url: &str, upload_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self.upload_url = upload_url.trim_end_matches('/').to_string();
        self
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Vec<u8>, Error> {
        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Looks up a release by its tag.
    pub async fn get_release_by_tag(&self, repo: &str, tag: &str) -> Result<Release, Error> {
        let tag = utf8_percent_encode(tag, PATH_SEGMENT);
        let url = format!("{}/repos/{repo}/releases/tags/{tag}", self.api_url);
        debug!(%url, "fetching release");

        let body = self.send(self.http.get(&url)).await?;
        let release: Release = serde_json::from_slice(&body)?;
        debug!(release_id = release.id, assets = release.assets.len(), "release fetched");
        Ok(release)
    }

    /// Deletes a release asset.
    pub async fn delete_release_asset(&self, repo: &str, asset_id: u64) -> Result<(), Error> {
        let url = format!("{}/repos/{repo}/releases/assets/{asset_id}", self.api_url);
        debug!(%url, "deleting asset");

        self.send(self.http.delete(&url)).await?;
        Ok(())
    }

    /// Uploads raw bytes as a new release asset.
    pub async fn upload_release_asset(
        &self,
        repo: &str,
        release_id: u64,
        name: &str,
        data: Vec<u8>,
    ) -> Result<UploadedAsset, Error> {
        let url = format!(
            "{}/repos/{repo}/releases/{release_id}/assets",
            self.upload_url
        );
        debug!(%url, name, bytes = data.len(), "uploading asset");

        let req = self
            .http
            .post(&url)
            .query(&[("name", name)])
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(data);
        let body = self.send(req).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
