//! Billing HTTP server.
//!
//! Exposes the ledger lookups over actix-web.
//!
//! ## Routes
//!
//! - `GET /health`: database liveness
//! - `GET /api/organizations/debt?account=`: current debt of one account
//! - `GET /api/organizations/account?account=`: full billing record
mod handlers;

pub use handlers::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use billing_core::Settings;
use billing_ledger::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Lookup state shared by every worker.
pub struct API<S = Arc<Client>> {
    ledger: Ledger<S>,
    expose: bool,
}

impl<S> API<S> {
    /// `expose` puts raw database text into 500 responses.
    pub fn new(ledger: Ledger<S>, expose: bool) -> Self {
        Self { ledger, expose }
    }
    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }
    pub fn expose(&self) -> bool {
        self.expose
    }
}

/// Registers every route against a ledger backed by `S`.
pub fn routes<S: Store + Check + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(rejected))
        .route("/health", web::get().to(health::<S>))
        .service(
            web::scope("/api/organizations")
                .route("/debt", web::get().to(debt::<S>))
                .route("/account", web::get().to(account::<S>)),
        );
}

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let schema = Schema::try_from(settings.schema.as_str()).map_err(anyhow::Error::msg)?;
    let client = db(&settings).await?;
    let version = client
        .version()
        .await
        .inspect_err(|e| log::error!("database connectivity check failed: {}", e))?;
    log::info!("connected to {}", version);
    let ledger = Ledger::new(client, schema, settings.privacy);
    let api = web::Data::new(API::new(ledger, settings.expose_errors));
    log::info!("starting billing server on {}", settings.bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(api.clone())
            .configure(routes::<Arc<Client>>)
    })
    .workers(settings.workers)
    .bind(settings.bind_addr.as_str())?
    .run()
    .await?;
    Ok(())
}
