use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, ResponseError};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{ContactEmail, ContactFormRequest, ContactSubmission, NewContactSubmission};
use crate::email_client::EmailClient;
use crate::routes::MAX_LISTED_RECORDS;
use crate::startup::NotificationRecipients;

const EMAIL_SENT_MESSAGE: &str = "Thank you for contacting us! We will get back to you soon.";
const EMAIL_SKIPPED_MESSAGE: &str = "Form submitted successfully. Our team will contact you soon.";

#[derive(Debug, serde::Serialize)]
pub struct ContactFormResponse {
    pub id: Uuid,
    pub status: String,
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),
    #[error("Failed to store the contact submission")]
    Storage(#[from] sqlx::Error),
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(form, pool, email_client, recipients),
    fields(
        contact_email = %form.email,
        contact_name = %form.name
    )
)]
#[post("/contact")]
pub async fn submit_contact_form(
    form: web::Json<ContactFormRequest>,
    pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
    recipients: web::Data<NotificationRecipients>,
) -> Result<HttpResponse, ContactError> {
    let new_submission: NewContactSubmission =
        form.0.try_into().map_err(ContactError::Validation)?;
    let submission = ContactSubmission {
        id: Uuid::new_v4(),
        name: new_submission.name.as_ref().to_string(),
        email: new_submission.email.as_ref().to_string(),
        reason: new_submission.reason,
        service: new_submission.service,
        created_at: Utc::now(),
    };

    insert_submission(&pool, &submission).await?;

    // The record is durable at this point. The notification is best effort:
    // its failure is logged and the submitter still gets an acknowledgment.
    let email_sent = match send_notification(&email_client, &recipients.0, &submission).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Failed to send the notification email: {:?}", e);
            false
        }
    };

    Ok(HttpResponse::Ok().json(ContactFormResponse {
        id: submission.id,
        status: "success".to_string(),
        message: if email_sent {
            EMAIL_SENT_MESSAGE
        } else {
            EMAIL_SKIPPED_MESSAGE
        }
        .to_string(),
    }))
}

#[tracing::instrument(name = "Listing contact submissions", skip(pool))]
#[get("/contacts")]
pub async fn list_contact_submissions(
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ContactError> {
    let submissions = fetch_submissions(&pool).await?;
    Ok(HttpResponse::Ok().json(submissions))
}

#[tracing::instrument(
    name = "Saving a contact submission in the database",
    skip(pool, submission)
)]
pub async fn insert_submission(
    pool: &PgPool,
    submission: &ContactSubmission,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO contact_submissions (id, name, email, reason, service, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(submission.id)
    .bind(&submission.name)
    .bind(&submission.email)
    .bind(&submission.reason)
    .bind(&submission.service)
    .bind(submission.created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        e
    })?;
    Ok(())
}

#[tracing::instrument(name = "Fetching contact submissions from the database", skip(pool))]
pub async fn fetch_submissions(pool: &PgPool) -> Result<Vec<ContactSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ContactSubmission>(
        r#"
        SELECT id, name, email, reason, service, created_at
        FROM contact_submissions
        ORDER BY row_id
        LIMIT $1
        "#,
    )
    .bind(MAX_LISTED_RECORDS)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        e
    })
}

#[tracing::instrument(
    name = "Sending the inquiry notification email",
    skip(email_client, recipients, submission)
)]
pub async fn send_notification(
    email_client: &EmailClient,
    recipients: &[ContactEmail],
    submission: &ContactSubmission,
) -> Result<(), reqwest::Error> {
    let subject = format!(
        "New Inquiry: {} - {}",
        submission.service, submission.name
    );
    let html_body = render_notification_body(submission);
    email_client
        .send_email(recipients, &subject, &html_body)
        .await
}

fn render_notification_body(submission: &ContactSubmission) -> String {
    let submitted_on = submission.created_at.format("%B %d, %Y at %I:%M %p UTC");
    format!(
        r#"<html>
<body>
    <h2>New Contact Form Submission</h2>
    <table>
        <tr><td><strong>Name:</strong></td><td>{}</td></tr>
        <tr><td><strong>Email:</strong></td><td>{}</td></tr>
        <tr><td><strong>Service:</strong></td><td>{}</td></tr>
        <tr><td><strong>Reason:</strong></td><td>{}</td></tr>
    </table>
    <p>Submitted on: {}</p>
</body>
</html>"#,
        submission.name, submission.email, submission.service, submission.reason, submitted_on
    )
}
