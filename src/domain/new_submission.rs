use super::SubscriberEmail;

/// One notify-me request: created when the form is submitted, delivered (or
/// queued) exactly as-is, never mutated. The email is the entire payload.
#[derive(Debug)]
pub struct NewSubmission {
    pub email: SubscriberEmail,
}
