use crate::config::OptimizerConfig;
use crate::constants::{FILE_FIELD, QUALITY_FIELD};
use crate::error::{OptimizerError, Result};
use crate::request::Payload;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

const USER_AGENT: &str = concat!("img-optimizer/", env!("CARGO_PKG_VERSION"));

/// Status and body of the submit round-trip, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP collaborator used by [`ImageOptimizer`](crate::ImageOptimizer).
///
/// Implementations must report every failure as [`OptimizerError::Transport`];
/// nothing from the underlying HTTP library may escape with its own error type.
pub trait Transport {
    /// POST the payload to the service endpoint.
    fn submit(&self, payload: Payload) -> Result<RawResponse>;

    /// GET the compressed artifact. Non-2xx statuses are transport failures.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn submit(&self, payload: Payload) -> Result<RawResponse> {
        (**self).submit(payload)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn submit(&self, payload: Payload) -> Result<RawResponse> {
        (**self).submit(payload)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// Blocking `reqwest` transport bound to one endpoint and one timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &OptimizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OptimizerError::transport("building HTTP client", e))?;

        Ok(Self {
            client,
            endpoint: config.endpoint().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn submit(&self, payload: Payload) -> Result<RawResponse> {
        let request = self.client.post(&self.endpoint);
        let request = match payload {
            Payload::Multipart {
                file_name,
                mime_type,
                contents,
                quality,
            } => {
                let part = Part::bytes(contents)
                    .file_name(file_name)
                    .mime_str(mime_type)
                    .map_err(|e| OptimizerError::transport("building multipart body", e))?;
                let form = Form::new()
                    .part(FILE_FIELD, part)
                    .text(QUALITY_FIELD, quality);
                request.multipart(form)
            }
            Payload::Form { fields } => request.form(&fields),
        };

        let response = request.send().map_err(|e| {
            OptimizerError::transport(format!("submitting image to {}", self.endpoint), e)
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| OptimizerError::transport("reading service response", e))?;

        tracing::debug!(status, bytes = body.len(), "service responded");

        Ok(RawResponse::new(status, body.to_vec()))
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| OptimizerError::transport(format!("fetching {}", url), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OptimizerError::transport(
                format!("fetching {}", url),
                format!("server status {}", status),
            ));
        }

        let bytes = response
            .bytes()
            .map_err(|e| OptimizerError::transport(format!("reading {}", url), e))?;

        tracing::debug!(%url, bytes = bytes.len(), "fetched artifact");

        Ok(bytes.to_vec())
    }
}
