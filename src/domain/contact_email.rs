use serde::{Deserialize, Serialize};
use validator::validate_email;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Returns an instance of `ContactEmail` if the input is a
    /// syntactically valid email address.
    pub fn parse(email: String) -> Result<ContactEmail, String> {
        if validate_email(&email) {
            Ok(Self(email))
        } else {
            Err(format!("{} is not a valid email address", email))
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
