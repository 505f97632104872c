//! The webhook resource client.

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use serde::Serialize;
use url::Url;

use super::{
    ApiError, EncodingError, ExecutePayload, InteractionResponse, InteractionResponseData,
    InteractionResponseType, MessageEdit, Operation, OwnerToken, WebhookAuth, WebhookToken,
};
use crate::dispatch::{
    Attachment, BucketKey, DispatchRequest, Dispatcher, HttpResponse, RequestBody,
};
use crate::id::{MessageId, Snowflake};

/// Header carrying the audit-log justification for a mutating call.
pub const AUDIT_LOG_REASON: HeaderName = HeaderName::from_static("x-audit-log-reason");

/// Explicit client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: Url,
}

impl ClientConfig {
    /// Default API base URL.
    pub const DEFAULT_API_BASE: &'static str = "https://discord.com/api/v9";

    /// Creates a configuration targeting `api_base`
    /// (for example a mock server in tests).
    #[must_use]
    pub const fn new(api_base: Url) -> Self {
        Self { api_base }
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Url::parse(Self::DEFAULT_API_BASE).expect("default API base is a valid URL"))
    }
}

/// Client for the webhook and interaction-response REST resources.
///
/// Every operation shapes exactly one [`DispatchRequest`] (URL, auth,
/// body encoding, bucket key) and hands it to the dispatcher. The
/// dispatcher's response is returned unchanged; failures are only tagged
/// with the [`Operation`] that produced them. The client holds no mutable
/// state, so it can be shared freely between tasks.
///
/// Operation names prefixed with `token_` authenticate with the webhook
/// token in the URL; the others authenticate with the owner's bot token.
///
/// # Example
///
/// ```no_run
/// use hookwire::dispatch::ReqwestDispatcher;
/// use hookwire::webhook::{ClientConfig, ExecutePayload, WebhookClient, WebhookCredentials};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WebhookClient::new(ClientConfig::default(), ReqwestDispatcher::new());
/// let creds: WebhookCredentials = "https://discord.com/api/webhooks/1/token".parse()?;
///
/// let response = client
///     .token_execute_webhook(&creds.token, creds.id, true, &ExecutePayload::content("hi"), None)
///     .await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebhookClient<D> {
    config: ClientConfig,
    dispatcher: D,
}

impl<D> WebhookClient<D> {
    /// Creates a client sending through `dispatcher`.
    #[must_use]
    pub const fn new(config: ClientConfig, dispatcher: D) -> Self {
        Self { config, dispatcher }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &D {
        &self.dispatcher
    }
}

impl<D: Dispatcher> WebhookClient<D> {
    /// Gets a webhook using the owner's bot token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn webhook(
        &self,
        token: &OwnerToken,
        webhook_id: Snowflake,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.get_webhook_request(token, webhook_id);
        self.send(Operation::GetWebhook, request).await
    }

    /// Gets a webhook using its token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn token_webhook(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.get_webhook_request(token, webhook_id);
        self.send(Operation::TokenGetWebhook, request).await
    }

    /// Executes a webhook, optionally uploading a file.
    ///
    /// With `wait` the response carries the created message; without it
    /// the API answers `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn token_execute_webhook(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        wait: bool,
        payload: &ExecutePayload,
        file: Option<Attachment>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.execute_webhook_request(token, webhook_id, wait, payload, file);
        self.send(Operation::TokenExecuteWebhook, request).await
    }

    /// Modifies a webhook using the owner's bot token.
    ///
    /// `data` is sent verbatim as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn update_webhook<T: Serialize + ?Sized>(
        &self,
        token: &OwnerToken,
        webhook_id: Snowflake,
        data: &T,
        reason: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.update_webhook_request(token, webhook_id, data, reason);
        self.send(Operation::UpdateWebhook, request).await
    }

    /// Modifies a webhook using its token.
    ///
    /// `data` is sent verbatim as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn token_update_webhook<T: Serialize + ?Sized>(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        data: &T,
        reason: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.update_webhook_request(token, webhook_id, data, reason);
        self.send(Operation::TokenUpdateWebhook, request).await
    }

    /// Deletes a webhook using the owner's bot token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn delete_webhook(
        &self,
        token: &OwnerToken,
        webhook_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.delete_webhook_request(token, webhook_id, reason);
        self.send(Operation::DeleteWebhook, request).await
    }

    /// Deletes a webhook using its token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn token_delete_webhook(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.delete_webhook_request(token, webhook_id, reason);
        self.send(Operation::TokenDeleteWebhook, request).await
    }

    /// Gets a message previously sent by the webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn token_get_message(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        message_id: MessageId,
    ) -> Result<HttpResponse, ApiError> {
        let request = self
            .message_endpoint(token, webhook_id, message_id)
            .map(|url| {
                DispatchRequest::new(BucketKey::WebhooksWidMessagesMid, Method::GET, url)
                    .with_resource(webhook_id)
            });
        self.send(Operation::TokenGetMessage, request).await
    }

    /// Edits a message previously sent by the webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn token_edit_message(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        message_id: MessageId,
        edit: &MessageEdit,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.edit_message_request(
            BucketKey::WebhooksWidMessages,
            token,
            webhook_id,
            message_id,
            edit,
        );
        self.send(Operation::TokenEditMessage, request).await
    }

    /// Deletes a message previously sent by the webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn token_delete_message(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        message_id: MessageId,
    ) -> Result<HttpResponse, ApiError> {
        let request = self
            .message_endpoint(token, webhook_id, message_id)
            .map(|url| {
                DispatchRequest::new(BucketKey::WebhooksWidMessages, Method::DELETE, url)
                    .with_resource(webhook_id)
            });
        self.send(Operation::TokenDeleteMessage, request).await
    }

    /// Edits a message created by a specific webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn edit_webhook_message(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        message_id: MessageId,
        edit: &MessageEdit,
    ) -> Result<HttpResponse, ApiError> {
        let request =
            self.edit_message_request(BucketKey::WebhooksWid, token, webhook_id, message_id, edit);
        self.send(Operation::EditWebhookMessage, request).await
    }

    /// Deletes a message created by a specific webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn delete_webhook_message(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        message_id: MessageId,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.delete_webhook_message_request(token, webhook_id, message_id);
        self.send(Operation::DeleteWebhookMessage, request).await
    }

    /// Responds to an interaction.
    ///
    /// `data` is dropped from the envelope (sent as `null`) when none of
    /// its fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn create_interaction_response(
        &self,
        interaction_token: &WebhookToken,
        interaction_id: Snowflake,
        kind: InteractionResponseType,
        data: InteractionResponseData,
    ) -> Result<HttpResponse, ApiError> {
        let request =
            self.interaction_callback_request(interaction_token, interaction_id, kind, data);
        self.send(Operation::CreateInteractionResponse, request).await
    }

    /// Edits the original response to an interaction.
    ///
    /// Same request as [`edit_webhook_message`](Self::edit_webhook_message)
    /// with the interaction token, the application id and
    /// [`MessageId::Original`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn edit_original_interaction_response(
        &self,
        interaction_token: &WebhookToken,
        application_id: Snowflake,
        edit: &MessageEdit,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.edit_message_request(
            BucketKey::WebhooksWid,
            interaction_token,
            application_id,
            MessageId::Original,
            edit,
        );
        self.send(Operation::EditOriginalInteractionResponse, request)
            .await
    }

    /// Deletes the original response to an interaction.
    ///
    /// Same request as
    /// [`delete_webhook_message`](Self::delete_webhook_message) with the
    /// interaction token, the application id and [`MessageId::Original`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if encoding or dispatch fails.
    pub async fn delete_original_interaction_response(
        &self,
        interaction_token: &WebhookToken,
        application_id: Snowflake,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.delete_webhook_message_request(
            interaction_token,
            application_id,
            MessageId::Original,
        );
        self.send(Operation::DeleteOriginalInteractionResponse, request)
            .await
    }

    /// Forwards a shaped request, tagging any failure with `operation`.
    async fn send(
        &self,
        operation: Operation,
        request: Result<DispatchRequest, EncodingError>,
    ) -> Result<HttpResponse, ApiError> {
        let request = request.map_err(|source| ApiError::Encoding { operation, source })?;

        // The URL is not logged: token-authenticated paths embed the token.
        tracing::debug!(
            %operation,
            bucket = %request.bucket,
            method = %request.method,
            "Dispatching request"
        );

        self.dispatcher.dispatch(request).await.map_err(|source| {
            tracing::debug!(%operation, error = %source, "Request failed");
            ApiError::Dispatch { operation, source }
        })
    }
}

// Request shaping

impl<D> WebhookClient<D> {
    /// Appends `segments` to the API base, percent-encoding each one so a
    /// token can never add path segments, a query or a fragment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, EncodingError> {
        if segments.iter().any(|s| matches!(*s, "" | "." | "..")) {
            return Err(EncodingError::PathSegment);
        }

        let mut url = self.config.api_base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn webhook_endpoint(
        &self,
        auth: &impl WebhookAuth,
        webhook_id: Snowflake,
    ) -> Result<Url, EncodingError> {
        let id = webhook_id.to_string();
        match auth.path_token() {
            Some(token) => self.endpoint(&["webhooks", &id, token]),
            None => self.endpoint(&["webhooks", &id]),
        }
    }

    fn message_endpoint(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        message_id: MessageId,
    ) -> Result<Url, EncodingError> {
        self.endpoint(&[
            "webhooks",
            &webhook_id.to_string(),
            token.as_str(),
            "messages",
            &message_id.to_string(),
        ])
    }

    fn get_webhook_request(
        &self,
        auth: &impl WebhookAuth,
        webhook_id: Snowflake,
    ) -> Result<DispatchRequest, EncodingError> {
        let url = self.webhook_endpoint(auth, webhook_id)?;
        let mut request = DispatchRequest::new(BucketKey::WebhooksWid, Method::GET, url);
        auth.authorize(&mut request.headers)?;
        Ok(request)
    }

    fn execute_webhook_request(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        wait: bool,
        payload: &ExecutePayload,
        file: Option<Attachment>,
    ) -> Result<DispatchRequest, EncodingError> {
        let mut url = self.endpoint(&["webhooks", &webhook_id.to_string(), token.as_str()])?;
        url.set_query(Some(&format!("wait={wait}")));
        let body = RequestBody::with_attachment(payload, file)?;
        Ok(DispatchRequest::new(BucketKey::WebhooksWid, Method::POST, url)
            .with_resource(webhook_id)
            .with_body(body))
    }

    fn update_webhook_request<T: Serialize + ?Sized>(
        &self,
        auth: &impl WebhookAuth,
        webhook_id: Snowflake,
        data: &T,
        reason: Option<&str>,
    ) -> Result<DispatchRequest, EncodingError> {
        let url = self.webhook_endpoint(auth, webhook_id)?;
        let body = RequestBody::json(data)?;
        let mut request = DispatchRequest::new(BucketKey::WebhooksWid, Method::PATCH, url)
            .with_resource(webhook_id)
            .with_body(body);
        auth.authorize(&mut request.headers)?;
        apply_reason(&mut request.headers, reason)?;
        Ok(request)
    }

    fn delete_webhook_request(
        &self,
        auth: &impl WebhookAuth,
        webhook_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<DispatchRequest, EncodingError> {
        let url = self.webhook_endpoint(auth, webhook_id)?;
        let mut request = DispatchRequest::new(BucketKey::WebhooksWid, Method::DELETE, url)
            .with_resource(webhook_id);
        auth.authorize(&mut request.headers)?;
        apply_reason(&mut request.headers, reason)?;
        Ok(request)
    }

    fn edit_message_request(
        &self,
        bucket: BucketKey,
        token: &WebhookToken,
        webhook_id: Snowflake,
        message_id: MessageId,
        edit: &MessageEdit,
    ) -> Result<DispatchRequest, EncodingError> {
        let url = self.message_endpoint(token, webhook_id, message_id)?;
        let body = RequestBody::json(edit)?;
        Ok(DispatchRequest::new(bucket, Method::PATCH, url)
            .with_resource(webhook_id)
            .with_body(body))
    }

    /// Sends an empty JSON object: this route expects a body on DELETE.
    fn delete_webhook_message_request(
        &self,
        token: &WebhookToken,
        webhook_id: Snowflake,
        message_id: MessageId,
    ) -> Result<DispatchRequest, EncodingError> {
        let url = self.message_endpoint(token, webhook_id, message_id)?;
        Ok(DispatchRequest::new(BucketKey::WebhooksId, Method::DELETE, url)
            .with_resource(webhook_id)
            .with_body(RequestBody::Json(b"{}".to_vec())))
    }

    fn interaction_callback_request(
        &self,
        interaction_token: &WebhookToken,
        interaction_id: Snowflake,
        kind: InteractionResponseType,
        data: InteractionResponseData,
    ) -> Result<DispatchRequest, EncodingError> {
        let url = self.endpoint(&[
            "interactions",
            &interaction_id.to_string(),
            interaction_token.as_str(),
            "callback",
        ])?;
        let body = RequestBody::json(&InteractionResponse::new(kind, data))?;
        Ok(
            DispatchRequest::new(BucketKey::InteractionsIidTokenCallback, Method::POST, url)
                .with_resource(interaction_id)
                .with_body(body),
        )
    }
}

/// Adds the audit-log reason header, percent-encoded so any UTF-8 text is
/// a valid header value. Absent or empty reasons add nothing.
fn apply_reason(headers: &mut HeaderMap, reason: Option<&str>) -> Result<(), EncodingError> {
    let Some(reason) = reason.filter(|r| !r.is_empty()) else {
        return Ok(());
    };

    let value = HeaderValue::from_str(&urlencoding::encode(reason)).map_err(|e| {
        EncodingError::HeaderValue {
            name: "x-audit-log-reason",
            reason: e.to_string(),
        }
    })?;
    headers.insert(AUDIT_LOG_REASON, value);
    Ok(())
}
