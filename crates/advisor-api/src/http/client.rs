//! HTTP client struct, header building, and response checking.

use std::fmt;
use std::time::Duration;

use advisor_config::ApiConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::credentials::Credentials;
use crate::ApiError;

/// Longest slice of an error body kept in [`ApiError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

/// Question-answering service client.
pub struct HttpChatApi {
    pub(crate) base_url: String,
    pub(crate) auth: HeaderValue,
    pub(crate) http: reqwest::Client,
}

impl fmt::Debug for HttpChatApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpChatApi")
            .field("base_url", &self.base_url)
            .field("auth", &"[REDACTED]")
            .finish()
    }
}

impl HttpChatApi {
    pub fn new(config: &ApiConfig, credentials: &Credentials) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!(
            "{} {}",
            config.auth_scheme.trim(),
            credentials.token
        ))
        .map_err(|e| ApiError::Config(format!("invalid authorization header: {e}")))?;
        auth.set_sensitive(true);

        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_secs)));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(u64::from(secs)));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a route such as `history/abc/`.
    pub(crate) fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }

    /// URL for `history/{session_id}/` plus an optional trailing action.
    ///
    /// The id is pushed as one percent-encoded path segment, so ids holding
    /// `/` or `?` cannot reach another route.
    pub(crate) fn session_url(
        &self,
        session_id: &str,
        action: Option<&str>,
    ) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::Config("base URL cannot hold a path".into()))?;
            segments.pop_if_empty().push("history").push(session_id);
            if let Some(action) = action {
                segments.push(action);
            }
            segments.push("");
        }
        Ok(url)
    }

    /// Headers for authenticated JSON calls.
    pub(crate) fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Send a request, check the status, and decode the JSON body.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        op: &str,
    ) -> Result<T, ApiError> {
        let response = self.send_checked(request, op).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(format!("{op}: {e}")))
    }

    /// Send a request and turn any non-2xx status into an error.
    pub(crate) async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
        op: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let cid = advisor_common::new_correlation_id();
        debug!(%cid, op, "API request");

        let response = request.send().await.map_err(map_send_error)?;
        let status = response.status();
        debug!(%cid, op, status = status.as_u16(), "API response");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ApiError::Unauthorized(status.as_u16()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = text.chars().take(ERROR_BODY_LIMIT).collect::<String>();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(e.to_string())
    }
}
