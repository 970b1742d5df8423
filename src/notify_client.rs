use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::NewSubmission;

/// Endpoint path, fixed; only the base URL is configurable.
pub const NOTIFY_PATH: &str = "/api/v1/notify-me";

/// Error code the API answers with when the address is already on the list.
const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";

/// Shown when an error response carries no usable message of its own.
const GENERIC_REJECTION: &str = "Submission failed. Please try again.";

/// The three ways a delivery can fail. `Transport` is constructed only when
/// the HTTP exchange itself failed (connect/DNS/timeout); any response with
/// an error status, however unreadable its body, is an application-level
/// rejection. Callers can rely on that split instead of inspecting messages.
#[derive(thiserror::Error, Debug)]
pub enum NotifyError {
    /// Benign: the address is already subscribed.
    #[error("email is already subscribed")]
    Duplicate,
    /// The API rejected the submission; `message` is ready to display.
    #[error("the notify API rejected the submission ({status}): {message}")]
    Api { status: StatusCode, message: String },
    /// The API could not be reached at all.
    #[error("could not reach the notify API")]
    Transport(#[source] reqwest::Error),
}

pub struct NotifyClient {
    http_client: Client,
    base_url: String,
}

// establishing a HTTP connection is expensive; one `Client` is built at
// startup and reused for every submission

#[derive(Serialize)]
struct NotifyBody<'a> {
    email: &'a str,
}

/// Error envelope the API may answer with: `{error: {type|code, message},
/// message}`. Every field is optional in practice.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

impl NotifyClient {
    /// reqwest ships without a request timeout, so the configured one is the
    /// only bound on a hanging exchange.
    pub fn new(
        base_url: String,
        timeout: Duration,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("could not build HTTP client");
        Self {
            http_client,
            base_url,
        }
    }

    #[tracing::instrument(name = "Delivering submission to notify API", skip(self, submission))]
    pub async fn notify(
        &self,
        submission: &NewSubmission,
    ) -> Result<(), NotifyError> {
        let url = format!("{}{NOTIFY_PATH}", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("Accept", "application/json")
            .json(&NotifyBody {
                email: submission.email.as_ref(),
            })
            .send()
            .await
            .map_err(NotifyError::Transport)?;

        let status = response.status();
        if status.is_success() {
            // the body is allowed to be anything, including empty
            tracing::info!(%status, "notify API accepted the submission");
            return Ok(());
        }

        let body = response.json::<ApiErrorBody>().await.ok();
        Err(classify_rejection(status, body))
    }
}

/// Map an error response onto the taxonomy. HTTP 409 and the
/// `DUPLICATE_EMAIL` type/code are the duplicate signal; everything else
/// surfaces the server's own message when it sent one.
fn classify_rejection(
    status: StatusCode,
    body: Option<ApiErrorBody>,
) -> NotifyError {
    let (code, detail_message, top_message) = match body {
        Some(body) => {
            let (code, detail_message) = match body.error {
                Some(detail) => (detail.kind.or(detail.code), detail.message),
                None => (None, None),
            };
            (code, detail_message, body.message)
        }
        None => (None, None, None),
    };

    if status == StatusCode::CONFLICT || code.as_deref() == Some(DUPLICATE_EMAIL) {
        return NotifyError::Duplicate;
    }

    let message = detail_message
        .or(top_message)
        .unwrap_or_else(|| GENERIC_REJECTION.to_owned());
    NotifyError::Api { status, message }
}
