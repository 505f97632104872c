//! Dispatch request/response types and the dispatcher trait.

use std::path::Path;

use http::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{BucketKey, DispatchError};
use crate::id::Snowflake;

/// A fully shaped request handed to a [`Dispatcher`].
///
/// Besides the HTTP parts it carries the rate-limit [`BucketKey`] and the
/// id of the resource the request targets, which together let the
/// dispatcher queue requests against the right limit.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Rate-limit bucket this endpoint belongs to
    pub bucket: BucketKey,
    /// Major resource id (webhook or interaction), if any
    pub resource_id: Option<Snowflake>,
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<RequestBody>,
}

impl DispatchRequest {
    /// Creates a request with no resource id, headers or body.
    #[must_use]
    pub fn new(bucket: BucketKey, method: http::Method, url: url::Url) -> Self {
        Self {
            bucket,
            resource_id: None,
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Sets the major resource id.
    #[must_use]
    pub const fn with_resource(mut self, id: Snowflake) -> Self {
        self.resource_id = Some(id);
        self
    }

    /// Sets the request body.
    ///
    /// JSON bodies also get `Content-Type: application/json`. Multipart
    /// bodies get no content type here; the transport writes the framing
    /// header together with its boundary.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        if let Some(content_type) = body.content_type() {
            self.headers.insert(CONTENT_TYPE, content_type);
        }
        self.body = Some(body);
        self
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// A standalone JSON document.
    Json(Vec<u8>),
    /// JSON metadata plus a file.
    Multipart(MultipartBody),
}

impl RequestBody {
    /// Encodes `value` as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(Self::Json)
    }

    /// Encodes `value` as JSON, or as multipart metadata when a file is
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be encoded.
    pub fn with_attachment<T: Serialize + ?Sized>(
        value: &T,
        file: Option<Attachment>,
    ) -> Result<Self, serde_json::Error> {
        match file {
            Some(file) => Ok(Self::Multipart(MultipartBody {
                payload_json: serde_json::to_string(value)?,
                file,
            })),
            None => Self::json(value),
        }
    }

    /// Content type to declare for this body, if the caller must set one.
    #[must_use]
    pub fn content_type(&self) -> Option<HeaderValue> {
        match self {
            Self::Json(_) => Some(HeaderValue::from_static("application/json")),
            Self::Multipart(_) => None,
        }
    }

    /// Returns the JSON document carried by the body, wherever it lives.
    #[must_use]
    pub fn json_bytes(&self) -> &[u8] {
        match self {
            Self::Json(bytes) => bytes,
            Self::Multipart(multipart) => multipart.payload_json.as_bytes(),
        }
    }
}

/// Multipart body: a `payload_json` part and a `file` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    /// JSON metadata, sent as the `payload_json` part
    pub payload_json: String,
    /// The attached file
    pub file: Attachment,
}

impl MultipartBody {
    /// Part name for the JSON metadata.
    pub const PAYLOAD_PART: &'static str = "payload_json";

    /// Part name for the attached file.
    pub const FILE_PART: &'static str = "file";
}

/// A file uploaded alongside a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name reported to the remote API
    pub filename: String,
    /// MIME type, if known
    pub content_type: Option<String>,
    /// File contents
    pub data: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from in-memory contents.
    #[must_use]
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads an attachment from disk, naming it after the file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map_or_else(|| "file".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self::new(filename, data))
    }
}

/// An HTTP response received from the remote API.
///
/// Contains the status code, headers, and body of the response.
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Decodes the body as JSON.
    ///
    /// `204 No Content` responses (for example `wait=false` executions)
    /// have an empty body and will fail to decode into most types.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Sends shaped requests to the remote API.
///
/// # Design
///
/// This trait is the seam between request shaping and transport:
/// - The webhook client only builds [`DispatchRequest`]s
/// - Implementations own connection pooling, bucket queueing and retries
/// - Tests substitute a capturing mock
///
/// # Example
///
/// ```ignore
/// use hookwire::dispatch::{DispatchError, DispatchRequest, Dispatcher, HttpResponse};
///
/// struct MockDispatcher {
///     response: HttpResponse,
/// }
///
/// impl Dispatcher for MockDispatcher {
///     async fn dispatch(&self, _req: DispatchRequest) -> Result<HttpResponse, DispatchError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
pub trait Dispatcher: Send + Sync {
    /// Sends a request and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when:
    /// - The network fails ([`DispatchError::Transport`], [`DispatchError::Timeout`])
    /// - The request cannot be built ([`DispatchError::InvalidRequest`])
    /// - The remote API answers with a non-2xx status ([`DispatchError::Request`])
    fn dispatch(
        &self,
        req: DispatchRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, DispatchError>> + Send;
}
