mod new_submission;
mod subscriber_email;

// allow external `use` statements to skip the submodule names
pub use new_submission::NewSubmission;
pub use subscriber_email::SubscriberEmail;
