use validator::ValidateEmail;

/// A syntactically valid email address.
///
/// Must be instantiated with `SubscriberEmail::parse`; the field is left
/// private so a value in hand is always one that already passed the check.
#[derive(Debug)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Expects pre-trimmed input; surrounding whitespace fails validation
    /// like any other syntax error.
    pub fn parse(email: String) -> Result<Self, String> {
        match ValidateEmail::validate_email(&email) {
            true => Ok(Self(email)),
            false => Err(format!("Invalid email: {email:?}")),
        }
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
