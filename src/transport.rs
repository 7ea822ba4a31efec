//! Single-request HTTP primitive shared by every resource client.
//!
//! A [`Request`] names the method, path, query, body and the exact set of
//! status codes the operation accepts. [`Transport::execute`] sends it and
//! either decodes the body or maps the response to a [`ClientError`].

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub const API_KEY_HEADER: &str = "X-Meili-API-Key";

/// Description of one outbound call.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Raw path segments. Each is percent-encoded on its own by
    /// [`Transport::url`], so a segment never spans more than one level.
    pub path: Vec<String>,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
    pub accepted_status_codes: &'static [u16],
    /// Name of the public operation, used in errors, logs and metrics.
    pub function: &'static str,
}

impl Request {
    pub fn new<P>(
        method: Method,
        path: P,
        accepted_status_codes: &'static [u16],
        function: &'static str,
    ) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            method,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            accepted_status_codes,
            function,
        }
    }

    pub fn get<P>(path: P, function: &'static str) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::new(Method::GET, path, &[200], function)
    }

    /// Unencoded path for logs and errors, e.g. `/indexes/books`.
    pub fn endpoint(&self) -> String {
        format!("/{}", self.path.join("/"))
    }

    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }
}

/// Error payload the service attaches to non-2xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "code")]
    error_code: Option<String>,
}

/// HTTP transport holding the connection configuration. Stateless apart from
/// the pooled `reqwest::Client`, so it is shared freely across calls.
#[derive(Debug, Clone)]
pub struct Transport {
    base_url: String,
    http: reqwest::Client,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(ref key) = config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| ClientError::Config(format!("invalid api key: {e}")))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: config.host.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for `path`, appending `query` when non-empty.
    ///
    /// Segments are percent-encoded individually (`/`, `?`, `#` and `%`
    /// included). Empty, `.` and `..` segments cannot be expressed as a
    /// single segment and are rejected with `InvalidArgument`.
    pub fn url<S>(&self, path: &[S], query: &[(&'static str, String)]) -> Result<Url>
    where
        S: AsRef<str>,
    {
        if let Some(segment) = path
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|s| matches!(*s, "" | "." | ".."))
        {
            return Err(ClientError::InvalidArgument(format!(
                "invalid path segment '{segment}'"
            )));
        }

        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::Config(format!("host '{}' cannot be a base url", self.base_url))
            })?
            .pop_if_empty()
            .extend(path);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Send the request and decode a JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let body = self.send(&request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send the request and discard whatever body comes back.
    pub async fn execute_no_content(&self, request: Request) -> Result<()> {
        self.send(&request).await.map(|_| ())
    }

    #[instrument(
        skip(self, request),
        fields(
            function = request.function,
            method = %request.method,
            endpoint = %request.endpoint()
        )
    )]
    async fn send(&self, request: &Request) -> Result<Vec<u8>> {
        let url = self.url(&request.path, &request.query)?;
        let start = Instant::now();

        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                crate::metrics::REQUESTS_TOTAL
                    .with_label_values(&[request.function, "error"])
                    .inc();
                return Err(e.into());
            }
        };

        let status = resp.status();
        let body = resp.bytes().await?.to_vec();
        let elapsed = start.elapsed();

        crate::metrics::REQUESTS_TOTAL
            .with_label_values(&[request.function, status.as_str()])
            .inc();
        crate::metrics::REQUEST_DURATION
            .with_label_values(&[request.function])
            .observe(elapsed.as_secs_f64());

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = elapsed.as_millis(),
            "request complete"
        );

        if request.accepted_status_codes.contains(&status.as_u16()) {
            return Ok(body);
        }

        Err(status_error(request, status, &body))
    }
}

/// Map a response whose status is outside the accepted set to an error.
fn status_error(request: &Request, status: StatusCode, body: &[u8]) -> ClientError {
    let parsed: ApiErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    if status == StatusCode::NOT_FOUND {
        return ClientError::NotFound {
            endpoint: request.endpoint(),
            message,
        };
    }
    if status == StatusCode::CONFLICT
        || parsed.error_code.as_deref() == Some("index_already_exists")
    {
        return ClientError::AlreadyExists { message };
    }

    ClientError::UnexpectedStatus {
        function: request.function,
        method: request.method.to_string(),
        endpoint: request.endpoint(),
        status: status.as_u16(),
        expected: request.accepted_status_codes.to_vec(),
        message,
        code: parsed.error_code,
    }
}
