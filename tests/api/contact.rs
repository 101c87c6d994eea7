use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

fn valid_body() -> String {
    json!({
        "name": "Test User",
        "email": "test@example.com",
        "reason": "Testing the contact form API endpoint",
        "service": "GST Services"
    })
    .to_string()
}

#[tokio::test]
async fn contact_returns_success_and_thank_you_when_the_email_goes_out() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let res = app.post_contact(valid_body()).await;

    // Assert
    assert_eq!(res.status().as_u16(), 200);
    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["message"],
        "Thank you for contacting us! We will get back to you soon."
    );
    let id = body["id"].as_str().expect("Response did not contain an id");
    assert_eq!(id.len(), 36);
    id.parse::<Uuid>().expect("id is not a valid UUID");
}

#[tokio::test]
async fn contact_persists_the_submission() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_contact(valid_body()).await;
    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    let returned_id: Uuid = body["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("Response did not contain a valid id");

    let saved = sqlx::query_as::<_, (Uuid, String, String, String, String)>(
        "SELECT id, name, email, reason, service FROM contact_submissions",
    )
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to fetch saved submission");

    assert_eq!(saved.0, returned_id);
    assert_eq!(saved.1, "Test User");
    assert_eq!(saved.2, "test@example.com");
    assert_eq!(saved.3, "Testing the contact form API endpoint");
    assert_eq!(saved.4, "GST Services");
}

#[tokio::test]
async fn contact_still_succeeds_when_the_notifier_is_down() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_contact(valid_body()).await;

    assert_eq!(res.status().as_u16(), 200);
    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["message"],
        "Form submitted successfully. Our team will contact you soon."
    );

    // The record is durable even though the notification failed
    sqlx::query("SELECT id FROM contact_submissions")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch saved submission");
}

#[tokio::test]
async fn contact_submissions_are_listed_in_insertion_order() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app.post_contact(valid_body()).await;
    let submitted: serde_json::Value = res.json().await.expect("Failed to parse response body");
    app.post_contact(
        json!({
            "name": "Second User",
            "email": "second@example.com",
            "reason": "Following up on an earlier inquiry",
            "service": "Audit Services"
        })
        .to_string(),
    )
    .await;

    let res = app.get_contacts().await;

    assert_eq!(res.status().as_u16(), 200);
    let listed: Vec<serde_json::Value> = res.json().await.expect("Failed to parse response body");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], submitted["id"]);
    assert_eq!(listed[0]["name"], "Test User");
    assert_eq!(listed[0]["email"], "test@example.com");
    assert_eq!(listed[0]["reason"], "Testing the contact form API endpoint");
    assert_eq!(listed[0]["service"], "GST Services");
    listed[0]["created_at"]
        .as_str()
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
        .expect("Listing did not contain a valid created_at");
    // Storage-internal fields never reach the wire
    assert!(listed[0].get("row_id").is_none());
    assert_eq!(listed[1]["name"], "Second User");
    assert_eq!(listed[1]["service"], "Audit Services");
}

#[tokio::test]
async fn contact_listing_is_capped_at_1000_records() {
    let app = spawn_app().await;

    sqlx::query(
        r#"INSERT INTO contact_submissions (id, name, email, reason, service, created_at)
        SELECT md5(n::text)::uuid, 'user-' || n, 'user-' || n || '@example.com',
               'Inquiry ' || n, 'GST Services', now()
        FROM generate_series(1, 1001) AS n"#,
    )
    .execute(&app.db_pool)
    .await
    .expect("Failed to seed contact submissions");

    let res = app.get_contacts().await;

    assert_eq!(res.status().as_u16(), 200);
    let listed: Vec<serde_json::Value> = res.json().await.expect("Failed to parse response body");
    assert_eq!(listed.len(), 1000);
    assert_eq!(listed[0]["name"], "user-1");
    assert_eq!(listed[999]["name"], "user-1000");
}

#[tokio::test]
async fn contact_returns_400_when_data_is_invalid() {
    let app = spawn_app().await;

    // No store write and no notification attempt for rejected payloads
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            json!({
                "name": "Test User",
                "email": "not-an-email",
                "reason": "Testing",
                "service": "GST Services"
            })
            .to_string(),
            "Invalid email",
        ),
        (
            json!({
                "name": "",
                "email": "test@example.com",
                "reason": "Testing",
                "service": "GST Services"
            })
            .to_string(),
            "Empty name",
        ),
        (
            json!({
                "name": "Test User",
                "email": "test@example.com",
                "reason": "",
                "service": "GST Services"
            })
            .to_string(),
            "Empty reason",
        ),
        (
            json!({
                "name": "Test User",
                "email": "test@example.com",
                "reason": "Testing",
                "service": ""
            })
            .to_string(),
            "Empty service",
        ),
        (json!({ "name": "Test User" }).to_string(), "Missing fields"),
    ];
    for (body, description) in test_cases {
        let res = app.post_contact(body).await;
        assert_eq!(
            res.status().as_u16(),
            400,
            "Test Failed for: {}",
            description
        );
    }

    let saved = sqlx::query("SELECT id FROM contact_submissions")
        .fetch_optional(&app.db_pool)
        .await
        .expect("Failed to query submissions");
    assert!(saved.is_none());
}

#[tokio::test]
async fn contact_returns_500_and_skips_notification_when_storage_fails() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // Sabotage the database
    sqlx::query("ALTER TABLE contact_submissions DROP COLUMN email;")
        .execute(&app.db_pool)
        .await
        .expect("Failed to sabotage the database");

    let res = app.post_contact(valid_body()).await;

    assert_eq!(res.status().as_u16(), 500);
}
