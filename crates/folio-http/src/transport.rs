//! reqwest-backed transport.

use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use folio_core::error::TransportError;
use folio_core::{ApiError, ApiRequest, ApiResponse, ApiUrl, Method, Transport};

use crate::config::ClientConfig;

/// Sends [`ApiRequest`]s over HTTP with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    api_url: ApiUrl,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// Build a transport for the configured base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(map_reqwest_error(0))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            timeout_ms: config
                .request_timeout
                .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
                .unwrap_or_default(),
        })
    }

    /// Returns the base URL this transport sends to.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.api_url.endpoint_url(request.path());
        debug!(%url, "HTTP request");
        trace!(query = ?request.query(), "query parameters");

        let mut builder = self.client.request(to_reqwest_method(request.method()), &url);
        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(upload) = request.upload() {
            let part = reqwest::multipart::Part::bytes(upload.bytes().to_vec())
                .file_name(upload.file_name().to_string())
                .mime_str(upload.content_type())
                .map_err(map_reqwest_error(self.timeout_ms))?;
            trace!(field = upload.field(), len = upload.bytes().len(), "multipart body");
            builder = builder.multipart(
                reqwest::multipart::Form::new().part(upload.field().to_string(), part),
            );
        } else if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(map_reqwest_error(self.timeout_ms))?;

        let status = response.status().as_u16();
        trace!(status, "HTTP response");

        let body = response
            .bytes()
            .await
            .map_err(map_reqwest_error(self.timeout_ms))?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn map_reqwest_error(timeout_ms: u64) -> impl Fn(reqwest::Error) -> TransportError {
    move |err| {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: timeout_ms,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}
