//! Application execution logic.
//!
//! This module turns a resolved [`Action`] into one webhook client call and
//! prints the response.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use hookwire::config::{Action, ValidatedConfig, WebhookTarget};
use hookwire::dispatch::{Attachment, Dispatcher, HttpResponse, ReqwestDispatcher};
use hookwire::webhook::{ApiError, WebhookClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Failed to read the file to upload.
    #[error("Failed to read attachment '{}': {source}", path.display())]
    Attachment {
        /// Path given with `--file`
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Failed to write the response to stdout.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Executes one action against the configured API and prints the response.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the attachment
/// cannot be read, the call fails, or stdout is closed.
///
/// Excluded from coverage - performs real network I/O.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, action: Action) -> Result<(), RunError> {
    let client = create_client(&config)?;
    let response = run_action(&client, action).await?;

    let mut stdout = std::io::stdout().lock();
    write_response(&response, &mut stdout)
}

/// Creates the webhook client from configuration.
fn create_client(config: &ValidatedConfig) -> Result<WebhookClient<ReqwestDispatcher>, RunError> {
    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(RunError::HttpClient)?;

    Ok(WebhookClient::new(
        config.client.clone(),
        ReqwestDispatcher::from_client(http),
    ))
}

/// Performs the client call matching `action`.
async fn run_action<D: Dispatcher>(
    client: &WebhookClient<D>,
    action: Action,
) -> Result<HttpResponse, RunError> {
    let response = match action {
        Action::Get(WebhookTarget::Token(creds)) => {
            client.token_webhook(&creds.token, creds.id).await?
        }
        Action::Get(WebhookTarget::Owner { id, token }) => client.webhook(&token, id).await?,
        Action::Execute {
            credentials,
            wait,
            payload,
            file,
        } => {
            let attachment = match file {
                Some(path) => Some(load_attachment(path).await?),
                None => None,
            };
            client
                .token_execute_webhook(&credentials.token, credentials.id, wait, &payload, attachment)
                .await?
        }
        Action::Modify {
            target,
            update,
            reason,
        } => match target {
            WebhookTarget::Token(creds) => {
                client
                    .token_update_webhook(&creds.token, creds.id, &update, reason.as_deref())
                    .await?
            }
            WebhookTarget::Owner { id, token } => {
                client
                    .update_webhook(&token, id, &update, reason.as_deref())
                    .await?
            }
        },
        Action::Delete { target, reason } => match target {
            WebhookTarget::Token(creds) => {
                client
                    .token_delete_webhook(&creds.token, creds.id, reason.as_deref())
                    .await?
            }
            WebhookTarget::Owner { id, token } => {
                client.delete_webhook(&token, id, reason.as_deref()).await?
            }
        },
        Action::GetMessage {
            credentials,
            message_id,
        } => {
            client
                .token_get_message(&credentials.token, credentials.id, message_id)
                .await?
        }
        Action::EditMessage {
            credentials,
            message_id,
            edit,
        } => {
            client
                .token_edit_message(&credentials.token, credentials.id, message_id, &edit)
                .await?
        }
        Action::DeleteMessage {
            credentials,
            message_id,
        } => {
            client
                .token_delete_message(&credentials.token, credentials.id, message_id)
                .await?
        }
    };

    tracing::debug!(status = %response.status, "Request succeeded");
    Ok(response)
}

async fn load_attachment(path: PathBuf) -> Result<Attachment, RunError> {
    match Attachment::from_path(&path).await {
        Ok(attachment) => Ok(attachment),
        Err(source) => Err(RunError::Attachment { path, source }),
    }
}

/// Writes the response body to `out`.
///
/// JSON bodies are pretty-printed; other bodies are written as-is. Empty
/// bodies (`204 No Content`) produce no output.
fn write_response(response: &HttpResponse, out: &mut impl Write) -> Result<(), RunError> {
    if response.body.is_empty() {
        return Ok(());
    }

    match response.json::<serde_json::Value>() {
        Ok(value) => {
            serde_json::to_writer_pretty(&mut *out, &value)
                .map_err(|e| RunError::Output(e.into()))?;
            writeln!(out).map_err(RunError::Output)
        }
        Err(_) => out.write_all(&response.body).map_err(RunError::Output),
    }
}
