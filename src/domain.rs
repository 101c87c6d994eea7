mod client_name;
mod contact_email;
mod contact_submission;
mod new_contact_submission;
mod status_check;

pub use client_name::ClientName;
pub use contact_email::ContactEmail;
pub use contact_submission::ContactSubmission;
pub use new_contact_submission::{ContactFormRequest, NewContactSubmission};
pub use status_check::StatusCheck;
