//! Tests for `WebhookClient` request shaping.

use std::sync::Mutex;

use super::{
    AUDIT_LOG_REASON, AllowedMentions, ApiError, ClientConfig, Embed, EncodingError, ExecutePayload,
    InteractionResponseData, InteractionResponseType, MentionType, MessageEdit, Operation,
    OwnerToken, WebhookClient, WebhookCredentials, WebhookToken, WebhookUpdate,
};
use crate::dispatch::{
    Attachment, BucketKey, DispatchError, DispatchRequest, Dispatcher, HttpResponse,
    RequestBody, RequestError,
};
use crate::id::{MessageId, Snowflake};

/// Mock dispatcher that records requests and replays a fixed outcome.
#[derive(Debug)]
struct MockDispatcher {
    requests: Mutex<Vec<DispatchRequest>>,
    failure: Option<(http::StatusCode, &'static str)>,
}

impl MockDispatcher {
    fn success() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    fn rejecting(status: http::StatusCode, body: &'static str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: Some((status, body)),
        }
    }

    fn captured_requests(&self) -> Vec<DispatchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Dispatcher for MockDispatcher {
    async fn dispatch(&self, req: DispatchRequest) -> Result<HttpResponse, DispatchError> {
        self.requests.lock().unwrap().push(req);
        match self.failure {
            Some((status, body)) => Err(RequestError::new(status, body.as_bytes().to_vec()).into()),
            None => Ok(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                br#"{"id":"1"}"#.to_vec(),
            )),
        }
    }
}

const WEBHOOK_ID: Snowflake = Snowflake::new(111);
const MESSAGE_ID: Snowflake = Snowflake::new(333);

fn client() -> WebhookClient<MockDispatcher> {
    client_with(MockDispatcher::success())
}

fn client_with(dispatcher: MockDispatcher) -> WebhookClient<MockDispatcher> {
    let base = url::Url::parse("https://discord.com/api/v9").unwrap();
    WebhookClient::new(ClientConfig::new(base), dispatcher)
}

fn owner() -> OwnerToken {
    OwnerToken::new("Bot owner-secret")
}

fn token() -> WebhookToken {
    WebhookToken::new("hook-token")
}

/// Returns the single request the client dispatched.
fn only_request(client: &WebhookClient<MockDispatcher>) -> DispatchRequest {
    let mut requests = client.dispatcher().captured_requests();
    assert_eq!(requests.len(), 1, "expected exactly one dispatch");
    requests.remove(0)
}

fn json_body(req: &DispatchRequest) -> serde_json::Value {
    let body = req.body.as_ref().expect("request has a body");
    serde_json::from_slice(body.json_bytes()).unwrap()
}

fn content_type(req: &DispatchRequest) -> Option<&str> {
    req.headers
        .get(http::header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap())
}

mod client_config {
    use super::*;

    #[test]
    fn default_targets_public_api() {
        assert_eq!(
            ClientConfig::default().api_base().as_str(),
            "https://discord.com/api/v9"
        );
    }

    #[tokio::test]
    async fn trailing_slash_in_base_does_not_double_up() {
        let base = url::Url::parse("http://127.0.0.1:8080/api/").unwrap();
        let client = WebhookClient::new(ClientConfig::new(base), MockDispatcher::success());

        client.token_webhook(&token(), WEBHOOK_ID).await.unwrap();

        assert_eq!(
            only_request(&client).url.as_str(),
            "http://127.0.0.1:8080/api/webhooks/111/hook-token"
        );
    }
}

mod webhook_reads {
    use super::*;

    #[tokio::test]
    async fn webhook_uses_owner_header_and_bare_path() {
        let client = client();

        client.webhook(&owner(), WEBHOOK_ID).await.unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::GET);
        assert_eq!(req.url.as_str(), "https://discord.com/api/v9/webhooks/111");
        assert_eq!(req.bucket, BucketKey::WebhooksWid);
        assert!(req.resource_id.is_none());
        assert_eq!(
            req.headers.get(http::header::AUTHORIZATION).unwrap(),
            "Bot owner-secret"
        );
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn token_webhook_embeds_token_without_header() {
        let client = client();

        client.token_webhook(&token(), WEBHOOK_ID).await.unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::GET);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/webhooks/111/hook-token"
        );
        assert_eq!(req.bucket, BucketKey::WebhooksWid);
        assert!(req.resource_id.is_none());
        assert!(req.headers.is_empty());
    }

    #[tokio::test]
    async fn token_get_message_uses_message_bucket() {
        let client = client();

        client
            .token_get_message(&token(), WEBHOOK_ID, MESSAGE_ID.into())
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::GET);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/webhooks/111/hook-token/messages/333"
        );
        assert_eq!(req.bucket, BucketKey::WebhooksWidMessagesMid);
        assert_eq!(req.resource_id, Some(WEBHOOK_ID));
        assert!(req.headers.is_empty());
    }

    #[tokio::test]
    async fn response_is_returned_unchanged() {
        let client = client();

        let resp = client.token_webhook(&token(), WEBHOOK_ID).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::OK);
        assert_eq!(resp.body, br#"{"id":"1"}"#);
    }
}

mod execute {
    use super::*;

    #[tokio::test]
    async fn without_file_sends_json_with_content_type() {
        let client = client();
        let payload = ExecutePayload::content("hello").with_username("bot");

        client
            .token_execute_webhook(&token(), WEBHOOK_ID, true, &payload, None)
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/webhooks/111/hook-token?wait=true"
        );
        assert_eq!(req.bucket, BucketKey::WebhooksWid);
        assert_eq!(req.resource_id, Some(WEBHOOK_ID));
        assert_eq!(content_type(&req), Some("application/json"));
        assert!(matches!(req.body, Some(RequestBody::Json(_))));
        assert!(!req.headers.contains_key(http::header::AUTHORIZATION));
    }

    #[tokio::test]
    async fn with_file_sends_multipart_without_content_type() {
        let client = client();
        let payload = ExecutePayload::content("see attached");
        let file = Attachment::new("report.txt", b"data".to_vec());

        client
            .token_execute_webhook(&token(), WEBHOOK_ID, false, &payload, Some(file.clone()))
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/webhooks/111/hook-token?wait=false"
        );
        assert!(content_type(&req).is_none());

        let Some(RequestBody::Multipart(multipart)) = &req.body else {
            panic!("expected multipart body");
        };
        assert_eq!(multipart.file, file);
        let payload_json: serde_json::Value =
            serde_json::from_str(&multipart.payload_json).unwrap();
        assert_eq!(payload_json, serde_json::json!({"content": "see attached"}));
    }

    #[tokio::test]
    async fn unset_fields_are_omitted() {
        let client = client();

        client
            .token_execute_webhook(
                &token(),
                WEBHOOK_ID,
                true,
                &ExecutePayload::content("only content"),
                None,
            )
            .await
            .unwrap();

        let body = json_body(&only_request(&client));
        assert_eq!(body, serde_json::json!({"content": "only content"}));
    }

    #[tokio::test]
    async fn full_payload_is_encoded() {
        let client = client();
        let payload = ExecutePayload::content("all")
            .with_username("name")
            .with_avatar_url("https://cdn.example.com/a.png")
            .with_tts(true)
            .with_embed(Embed::new().with_title("title"))
            .with_allowed_mentions(AllowedMentions::parse([MentionType::Users]))
            .with_flags(4);

        client
            .token_execute_webhook(&token(), WEBHOOK_ID, true, &payload, None)
            .await
            .unwrap();

        let body = json_body(&only_request(&client));
        assert_eq!(
            body,
            serde_json::json!({
                "content": "all",
                "username": "name",
                "avatar_url": "https://cdn.example.com/a.png",
                "tts": true,
                "embeds": [{"title": "title"}],
                "allowed_mentions": {"parse": ["users"]},
                "flags": 4
            })
        );
    }
}

mod updates {
    use super::*;

    #[tokio::test]
    async fn update_webhook_sends_document_verbatim_with_owner_auth() {
        let client = client();
        let data = serde_json::json!({"name": "renamed", "avatar": null});

        client
            .update_webhook(&owner(), WEBHOOK_ID, &data, None)
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::PATCH);
        assert_eq!(req.url.as_str(), "https://discord.com/api/v9/webhooks/111");
        assert_eq!(req.bucket, BucketKey::WebhooksWid);
        assert_eq!(req.resource_id, Some(WEBHOOK_ID));
        assert!(req.headers.contains_key(http::header::AUTHORIZATION));
        assert_eq!(content_type(&req), Some("application/json"));
        assert_eq!(json_body(&req), data);
    }

    #[tokio::test]
    async fn token_update_webhook_has_no_authorization_header() {
        let client = client();
        let data = WebhookUpdate {
            name: Some("renamed".to_string()),
            ..WebhookUpdate::default()
        };

        client
            .token_update_webhook(&token(), WEBHOOK_ID, &data, None)
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/webhooks/111/hook-token"
        );
        assert!(!req.headers.contains_key(http::header::AUTHORIZATION));
        assert_eq!(json_body(&req), serde_json::json!({"name": "renamed"}));
    }

    #[tokio::test]
    async fn reason_header_present_only_when_supplied() {
        let client = client();
        let data = serde_json::json!({});

        client
            .update_webhook(&owner(), WEBHOOK_ID, &data, Some("cleanup"))
            .await
            .unwrap();
        client
            .update_webhook(&owner(), WEBHOOK_ID, &data, None)
            .await
            .unwrap();

        let requests = client.dispatcher().captured_requests();
        assert_eq!(requests[0].headers.get(AUDIT_LOG_REASON).unwrap(), "cleanup");
        assert!(!requests[1].headers.contains_key(AUDIT_LOG_REASON));
    }

    #[tokio::test]
    async fn reason_is_percent_encoded() {
        let client = client();

        client
            .token_update_webhook(&token(), WEBHOOK_ID, &serde_json::json!({}), Some("spam bot ✓"))
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(
            req.headers.get(AUDIT_LOG_REASON).unwrap(),
            "spam%20bot%20%E2%9C%93"
        );
    }

    #[tokio::test]
    async fn empty_reason_adds_no_header() {
        let client = client();

        client
            .delete_webhook(&owner(), WEBHOOK_ID, Some(""))
            .await
            .unwrap();

        assert!(!only_request(&client).headers.contains_key(AUDIT_LOG_REASON));
    }

    #[tokio::test]
    async fn unserializable_document_fails_before_dispatch() {
        let client = client();
        let mut data = std::collections::HashMap::new();
        data.insert((1, 2), "tuple keys cannot become JSON object keys");

        let err = client
            .update_webhook(&owner(), WEBHOOK_ID, &data, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Encoding {
                operation: Operation::UpdateWebhook,
                source: EncodingError::Json(_),
            }
        ));
        assert!(client.dispatcher().captured_requests().is_empty());
    }

    #[tokio::test]
    async fn invalid_owner_token_fails_before_dispatch() {
        let client = client();

        let err = client
            .webhook(&OwnerToken::new("Bot bad\r\ntoken"), WEBHOOK_ID)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Encoding {
                source: EncodingError::HeaderValue { .. },
                ..
            }
        ));
        assert!(client.dispatcher().captured_requests().is_empty());
    }
}

mod deletes {
    use super::*;

    #[tokio::test]
    async fn delete_webhook_uses_owner_auth_without_body() {
        let client = client();

        client
            .delete_webhook(&owner(), WEBHOOK_ID, Some("gone"))
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::DELETE);
        assert_eq!(req.url.as_str(), "https://discord.com/api/v9/webhooks/111");
        assert_eq!(req.bucket, BucketKey::WebhooksWid);
        assert_eq!(req.resource_id, Some(WEBHOOK_ID));
        assert!(req.headers.contains_key(http::header::AUTHORIZATION));
        assert_eq!(req.headers.get(AUDIT_LOG_REASON).unwrap(), "gone");
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn token_delete_webhook_uses_token_path() {
        let client = client();

        client
            .token_delete_webhook(&token(), WEBHOOK_ID, None)
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/webhooks/111/hook-token"
        );
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn token_delete_message_sends_no_body() {
        let client = client();

        client
            .token_delete_message(&token(), WEBHOOK_ID, MESSAGE_ID.into())
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::DELETE);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/webhooks/111/hook-token/messages/333"
        );
        assert_eq!(req.bucket, BucketKey::WebhooksWidMessages);
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn delete_webhook_message_sends_empty_json_object() {
        let client = client();

        client
            .delete_webhook_message(&token(), WEBHOOK_ID, MESSAGE_ID.into())
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::DELETE);
        assert_eq!(req.bucket, BucketKey::WebhooksId);
        assert_eq!(req.resource_id, Some(WEBHOOK_ID));
        assert_eq!(req.body, Some(RequestBody::Json(b"{}".to_vec())));
        assert_eq!(content_type(&req), Some("application/json"));
    }
}

mod message_edits {
    use super::*;

    #[tokio::test]
    async fn edit_webhook_message_sends_explicit_nulls() {
        let client = client();

        client
            .edit_webhook_message(
                &token(),
                WEBHOOK_ID,
                MESSAGE_ID.into(),
                &MessageEdit::content("edited"),
            )
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::PATCH);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/webhooks/111/hook-token/messages/333"
        );
        assert_eq!(req.bucket, BucketKey::WebhooksWid);
        assert_eq!(
            json_body(&req),
            serde_json::json!({"content": "edited", "embeds": null, "allowed_mentions": null})
        );
    }

    #[tokio::test]
    async fn token_edit_message_uses_messages_bucket() {
        let client = client();

        client
            .token_edit_message(&token(), WEBHOOK_ID, MESSAGE_ID.into(), &MessageEdit::default())
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.bucket, BucketKey::WebhooksWidMessages);
        assert_eq!(req.resource_id, Some(WEBHOOK_ID));
        assert_eq!(
            json_body(&req),
            serde_json::json!({"content": null, "embeds": null, "allowed_mentions": null})
        );
    }
}

mod interactions {
    use super::*;

    const INTERACTION_ID: Snowflake = Snowflake::new(777);
    const APPLICATION_ID: Snowflake = Snowflake::new(888);

    fn interaction_token() -> WebhookToken {
        WebhookToken::new("interaction-token")
    }

    #[tokio::test]
    async fn create_response_posts_to_callback() {
        let client = client();

        client
            .create_interaction_response(
                &interaction_token(),
                INTERACTION_ID,
                InteractionResponseType::CHANNEL_MESSAGE_WITH_SOURCE,
                InteractionResponseData::content("pong").with_flags(64),
            )
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(
            req.url.as_str(),
            "https://discord.com/api/v9/interactions/777/interaction-token/callback"
        );
        assert_eq!(req.bucket, BucketKey::InteractionsIidTokenCallback);
        assert_eq!(req.resource_id, Some(INTERACTION_ID));
        assert_eq!(content_type(&req), Some("application/json"));
        assert_eq!(
            json_body(&req),
            serde_json::json!({"type": 4, "data": {"content": "pong", "flags": 64}})
        );
    }

    #[tokio::test]
    async fn create_response_without_data_sends_null() {
        let client = client();

        client
            .create_interaction_response(
                &interaction_token(),
                INTERACTION_ID,
                InteractionResponseType::DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE,
                InteractionResponseData::default(),
            )
            .await
            .unwrap();

        assert_eq!(
            json_body(&only_request(&client)),
            serde_json::json!({"type": 5, "data": null})
        );
    }

    #[tokio::test]
    async fn edit_original_matches_edit_webhook_message() {
        let original = client();
        let direct = client();
        let edit = MessageEdit::content("hi");

        original
            .edit_original_interaction_response(&interaction_token(), APPLICATION_ID, &edit)
            .await
            .unwrap();
        direct
            .edit_webhook_message(
                &interaction_token(),
                APPLICATION_ID,
                MessageId::Original,
                &edit,
            )
            .await
            .unwrap();

        let a = only_request(&original);
        let b = only_request(&direct);
        assert_eq!(
            a.url.as_str(),
            "https://discord.com/api/v9/webhooks/888/interaction-token/messages/@original"
        );
        assert_eq!(a.url, b.url);
        assert_eq!(a.method, b.method);
        assert_eq!(a.bucket, b.bucket);
        assert_eq!(a.resource_id, b.resource_id);
        assert_eq!(a.headers, b.headers);
        assert_eq!(a.body, b.body);
    }

    #[tokio::test]
    async fn delete_original_matches_delete_webhook_message() {
        let original = client();
        let direct = client();

        original
            .delete_original_interaction_response(&interaction_token(), APPLICATION_ID)
            .await
            .unwrap();
        direct
            .delete_webhook_message(&interaction_token(), APPLICATION_ID, MessageId::Original)
            .await
            .unwrap();

        let a = only_request(&original);
        let b = only_request(&direct);
        assert_eq!(a.url, b.url);
        assert_eq!(a.method, http::Method::DELETE);
        assert_eq!(a.bucket, b.bucket);
        assert_eq!(a.body, b.body);
    }
}

mod path_segments {
    use super::*;

    #[tokio::test]
    async fn slash_in_token_stays_one_segment() {
        let client = client();

        client
            .token_webhook(&WebhookToken::new("a/b"), WEBHOOK_ID)
            .await
            .unwrap();

        assert_eq!(
            only_request(&client).url.as_str(),
            "https://discord.com/api/v9/webhooks/111/a%2Fb"
        );
    }

    #[tokio::test]
    async fn slash_in_token_keeps_message_route() {
        let client = client();

        client
            .token_get_message(&WebhookToken::new("a/b"), WEBHOOK_ID, MESSAGE_ID.into())
            .await
            .unwrap();

        assert_eq!(
            only_request(&client).url.path(),
            "/api/v9/webhooks/111/a%2Fb/messages/333"
        );
    }

    #[tokio::test]
    async fn question_mark_in_token_cannot_replace_wait_query() {
        let client = client();

        client
            .token_execute_webhook(
                &WebhookToken::new("x?wait=false&"),
                WEBHOOK_ID,
                true,
                &ExecutePayload::content("hi"),
                None,
            )
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.url.path(), "/api/v9/webhooks/111/x%3Fwait=false&");
        assert_eq!(req.url.query(), Some("wait=true"));
    }

    #[tokio::test]
    async fn hash_in_token_is_not_a_fragment() {
        let client = client();

        client
            .create_interaction_response(
                &WebhookToken::new("t#frag"),
                Snowflake::new(777),
                InteractionResponseType::PONG,
                InteractionResponseData::default(),
            )
            .await
            .unwrap();

        let req = only_request(&client);
        assert_eq!(req.url.path(), "/api/v9/interactions/777/t%23frag/callback");
        assert_eq!(req.url.fragment(), None);
    }

    #[tokio::test]
    async fn dot_segments_are_rejected_before_dispatch() {
        for raw in [".", "..", ""] {
            let client = client();

            let err = client
                .token_webhook(&WebhookToken::new(raw), WEBHOOK_ID)
                .await
                .unwrap_err();

            assert!(
                matches!(
                    err,
                    ApiError::Encoding {
                        operation: Operation::TokenGetWebhook,
                        source: EncodingError::PathSegment,
                    }
                ),
                "token {raw:?} was not rejected"
            );
            assert!(client.dispatcher().captured_requests().is_empty());
        }
    }

    #[tokio::test]
    async fn url_credentials_are_not_encoded_twice() {
        let client = client();
        let creds: WebhookCredentials =
            "https://discord.com/api/webhooks/111/a%2Fb".parse().unwrap();

        client.token_webhook(&creds.token, creds.id).await.unwrap();

        assert_eq!(
            only_request(&client).url.as_str(),
            "https://discord.com/api/v9/webhooks/111/a%2Fb"
        );
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn remote_rejection_is_tagged_with_operation() {
        let client = client_with(MockDispatcher::rejecting(
            http::StatusCode::NOT_FOUND,
            r#"{"message": "Unknown Webhook", "code": 10015}"#,
        ));

        let err = client
            .token_delete_webhook(&token(), WEBHOOK_ID, None)
            .await
            .unwrap_err();

        assert_eq!(err.operation(), Operation::TokenDeleteWebhook);
        assert_eq!(err.status(), Some(http::StatusCode::NOT_FOUND));
        assert_eq!(err.request_error().unwrap().payload().unwrap().code, 10015);
        assert!(err.to_string().starts_with("token_delete_webhook failed:"));
    }

    #[tokio::test]
    async fn invalid_payload_rejection_keeps_remote_body() {
        let body = r#"{"message": "Invalid Form Body", "code": 50035, "errors": {"content": {}}}"#;
        let client = client_with(MockDispatcher::rejecting(http::StatusCode::BAD_REQUEST, body));

        let err = client
            .token_execute_webhook(&token(), WEBHOOK_ID, true, &ExecutePayload::default(), None)
            .await
            .unwrap_err();

        let rejected = err.request_error().unwrap();
        assert_eq!(rejected.status, http::StatusCode::BAD_REQUEST);
        assert_eq!(rejected.body_text(), Some(body));
        assert!(rejected.payload().unwrap().errors.is_some());
    }

    #[tokio::test]
    async fn each_call_dispatches_exactly_once() {
        let client = client_with(MockDispatcher::rejecting(
            http::StatusCode::INTERNAL_SERVER_ERROR,
            "",
        ));

        let _ = client.token_webhook(&token(), WEBHOOK_ID).await;

        assert_eq!(client.dispatcher().captured_requests().len(), 1);
    }
}

#[test]
fn client_is_send_sync_with_send_sync_dispatcher() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookClient<MockDispatcher>>();
}
