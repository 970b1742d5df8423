use crate::domain::NewSubmission;
use crate::domain::SubscriberEmail;
use crate::fallback::FallbackStore;
use crate::notify_client::NotifyClient;
use crate::notify_client::NotifyError;
use crate::status::StatusMessage;

/// Every way a submission attempt can end. `submit` always returns one of
/// these; it never panics and never propagates an error to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Accepted by the API.
    Subscribed,
    /// The API already knows this address.
    AlreadySubscribed,
    /// The API refused; `message` is what it said (or a stock line).
    Rejected { message: String },
    /// The API was unreachable, the submission is queued on disk.
    SavedLocally,
    /// The input never left the machine.
    Invalid,
    /// The API was unreachable and the fallback store failed too.
    Failed,
}

impl SubmitOutcome {
    /// The transient message to show for this outcome.
    pub fn status(&self) -> StatusMessage {
        match self {
            Self::Subscribed => StatusMessage::success("Thank you! We'll notify you soon."),
            Self::AlreadySubscribed => StatusMessage::error(
                "This email is already subscribed. We'll notify you when we launch!",
            ),
            Self::Rejected { message } => StatusMessage::error(message.clone()),
            Self::SavedLocally => StatusMessage::success("Thank you! We'll notify you soon."),
            Self::Invalid => StatusMessage::error("Please enter a valid email address"),
            Self::Failed => StatusMessage::error("Something went wrong. Please try again later."),
        }
    }

    /// Whether the input field should be wiped. True exactly when the
    /// submission was recorded somewhere, remotely or on disk.
    pub fn clears_input(&self) -> bool {
        matches!(
            self,
            Self::Subscribed | Self::AlreadySubscribed | Self::SavedLocally
        )
    }
}

pub struct SubmissionController {
    notify_client: NotifyClient,
    fallback: FallbackStore,
}

impl SubmissionController {
    pub fn new(
        notify_client: NotifyClient,
        fallback: FallbackStore,
    ) -> Self {
        Self {
            notify_client,
            fallback,
        }
    }

    /// Validate, deliver, and fall back, in that order. Only a transport
    /// failure reaches the fallback store; an API rejection means the server
    /// heard us and said no, so queueing a retry would be wrong.
    #[tracing::instrument(
        name = "Handling notify-me submission",
        skip(self, raw_email),
        fields(subscriber_email=tracing::field::Empty)
    )]
    pub async fn submit(
        &self,
        raw_email: &str,
    ) -> SubmitOutcome {
        let email = match SubscriberEmail::parse(raw_email.trim().to_owned()) {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!(error = %e, "rejected submission before delivery");
                return SubmitOutcome::Invalid;
            }
        };
        tracing::Span::current().record("subscriber_email", tracing::field::display(&email));
        let submission = NewSubmission { email };

        match self.notify_client.notify(&submission).await {
            Ok(()) => SubmitOutcome::Subscribed,
            Err(NotifyError::Duplicate) => SubmitOutcome::AlreadySubscribed,
            Err(NotifyError::Api { status, message }) => {
                tracing::error!(%status, %message, "notify API rejected the submission");
                SubmitOutcome::Rejected { message }
            }
            Err(NotifyError::Transport(e)) => {
                tracing::warn!(
                    e.cause_chain=?e,
                    "notify API unreachable, queueing locally"
                );
                self.save_locally(&submission)
            }
        }
    }

    fn save_locally(
        &self,
        submission: &NewSubmission,
    ) -> SubmitOutcome {
        match self.fallback.append(submission) {
            Ok(()) => {
                tracing::info!("submission queued in the fallback store");
                SubmitOutcome::SavedLocally
            }
            Err(e) => {
                tracing::error!(
                    e.cause_chain=?e,
                    "failed to queue the submission locally"
                );
                SubmitOutcome::Failed
            }
        }
    }
}
