use serde::Deserialize;

use super::{ClientName, ContactEmail};

/// Raw contact-form payload as received on the wire.
#[derive(Debug, Deserialize)]
pub struct ContactFormRequest {
    pub name: String,
    pub email: String,
    pub reason: String,
    pub service: String,
}

/// A contact-form submission that passed validation.
#[derive(Debug)]
pub struct NewContactSubmission {
    pub name: ClientName,
    pub email: ContactEmail,
    pub reason: String,
    pub service: String,
}

impl TryFrom<ContactFormRequest> for NewContactSubmission {
    type Error = String;

    fn try_from(form: ContactFormRequest) -> Result<Self, Self::Error> {
        let name = ClientName::parse(form.name)?;
        let email = ContactEmail::parse(form.email)?;
        let reason = require_non_empty(form.reason, "reason")?;
        let service = require_non_empty(form.service, "service")?;

        Ok(Self {
            name,
            email,
            reason,
            service,
        })
    }
}

fn require_non_empty(value: String, field: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    Ok(value)
}
