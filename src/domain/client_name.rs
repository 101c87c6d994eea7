use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientName(String);

impl ClientName {
    /// Returns an instance of `ClientName` if the input satisfies all
    /// our validation constraints on caller-supplied names.
    /// Names are free text, so punctuation is allowed; only empty input
    /// and unbounded length are rejected.
    pub fn parse(name: String) -> Result<ClientName, String> {
        let is_empty_or_whitespace = name.trim().is_empty();
        let is_too_long = name.graphemes(true).count() > 256;

        if is_empty_or_whitespace || is_too_long {
            return Err(format!("{} is not a valid name", name));
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
