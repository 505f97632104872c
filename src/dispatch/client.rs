//! Production dispatcher implementation using reqwest.

use reqwest::multipart::{Form, Part};

use super::{
    DispatchError, DispatchRequest, Dispatcher, HttpResponse, MultipartBody, RequestBody,
    RequestError,
};

/// Production dispatcher using reqwest.
///
/// This is a thin wrapper around `reqwest::Client` that implements
/// the [`Dispatcher`] trait. It sends each request as soon as it is
/// handed over: it does not queue per bucket and does not retry on 429.
/// Wrap it in a scheduling dispatcher where rate-limit compliance matters.
///
/// # Example
///
/// ```no_run
/// use hookwire::dispatch::ReqwestDispatcher;
/// use hookwire::webhook::{ClientConfig, WebhookClient};
///
/// let client = WebhookClient::new(ClientConfig::default(), ReqwestDispatcher::new());
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    inner: reqwest::Client,
}

impl ReqwestDispatcher {
    /// Creates a dispatcher with reqwest's default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates a dispatcher from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (timeouts, user agent, TLS).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for ReqwestDispatcher {
    async fn dispatch(&self, req: DispatchRequest) -> Result<HttpResponse, DispatchError> {
        tracing::trace!(
            bucket = %req.bucket,
            resource = ?req.resource_id.map(|id| id.get()),
            method = %req.method,
            "Sending request"
        );

        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        builder = match req.body {
            Some(RequestBody::Json(bytes)) => builder.body(bytes),
            Some(RequestBody::Multipart(multipart)) => builder.multipart(multipart_form(multipart)?),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                DispatchError::Timeout
            } else if e.is_builder() {
                DispatchError::InvalidRequest(e.to_string())
            } else {
                DispatchError::Transport(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| DispatchError::Transport(Box::new(e)))?
            .to_vec();

        if !status.is_success() {
            tracing::trace!(%status, "Request rejected");
            return Err(RequestError::new(status, body).into());
        }

        Ok(HttpResponse::new(status, headers, body))
    }
}

/// Frames a multipart body as a `payload_json` text part plus a `file` part.
fn multipart_form(body: MultipartBody) -> Result<Form, DispatchError> {
    let MultipartBody { payload_json, file } = body;

    let mut part = Part::bytes(file.data).file_name(file.filename);
    if let Some(content_type) = file.content_type {
        part = part
            .mime_str(&content_type)
            .map_err(|e| DispatchError::InvalidRequest(e.to_string()))?;
    }

    Ok(Form::new()
        .text(MultipartBody::PAYLOAD_PART, payload_json)
        .part(MultipartBody::FILE_PART, part))
}
