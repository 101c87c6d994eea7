use actix_cors::Cors;
use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::configuration::{DatabaseSettings, Settings};
use crate::domain::ContactEmail;
use crate::email_client::EmailClient;
use crate::routes::{
    create_status_check, health_check, list_contact_submissions, list_status_checks,
    submit_contact_form,
};

/// The fixed set of addresses notified about new inquiries,
/// resolved from configuration at startup.
pub struct NotificationRecipients(pub Vec<ContactEmail>);

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(configuration.with_db())
}

/// Wraps the actix `dev::Server` together with the port it bound,
/// so tests can spawn the application on a random port.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);

        let sender = configuration
            .email_client
            .sender()
            .map_err(anyhow::Error::msg)?;
        let recipients = configuration
            .email_client
            .recipient_list()
            .map_err(anyhow::Error::msg)?;
        let timeout = configuration.email_client.timeout();
        let email_client = EmailClient::new(
            configuration.email_client.base_url.clone(),
            sender,
            configuration.email_client.authorization_token.clone(),
            timeout,
        );

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(
            listener,
            connection_pool,
            email_client,
            NotificationRecipients(recipients),
            configuration.application.cors_origins(),
        )?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Only returns when the application is stopped. The connection pool
    /// is dropped, and with it its connections, once the server exits.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    connection_pool: PgPool,
    email_client: EmailClient,
    recipients: NotificationRecipients,
    allowed_origins: Option<Vec<String>>,
) -> Result<Server, std::io::Error> {
    let connection = Data::new(connection_pool);
    let email_client = Data::new(email_client);
    let recipients = Data::new(recipients);
    let server = HttpServer::new(move || {
        // Credentialed requests cannot be combined with a wildcard origin
        let cors = match &allowed_origins {
            None => Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header(),
            Some(origins) => {
                let mut cors = Cors::default()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials();
                for origin in origins {
                    cors = cors.allowed_origin(origin);
                }
                cors
            }
        };
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .service(
                web::scope("/api")
                    .service(health_check)
                    .service(create_status_check)
                    .service(list_status_checks)
                    .service(submit_contact_form)
                    .service(list_contact_submissions),
            )
            .app_data(connection.clone())
            .app_data(email_client.clone())
            .app_data(recipients.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
