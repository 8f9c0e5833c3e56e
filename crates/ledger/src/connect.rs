use super::*;
use billing_core::Settings;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::NoTls;

/// Establishes a database connection.
///
/// Connects to PostgreSQL using `settings.db_url` and returns an
/// `Arc<Client>` suitable for sharing across async tasks.
///
/// # Deadlines
///
/// `connect_timeout` bounds the handshake. `statement_timeout` is passed as
/// a startup option so the server cancels any statement that overruns it;
/// the cancellation surfaces as [`QueryError::Timeout`].
pub async fn db(settings: &Settings) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let mut config = settings.db_url.parse::<tokio_postgres::Config>()?;
    let timeout = format!(
        "-c statement_timeout={}",
        settings.statement_timeout.as_millis()
    );
    let options = match config.get_options() {
        Some(existing) => format!("{} {}", existing, timeout),
        None => timeout,
    };
    config
        .connect_timeout(settings.connect_timeout)
        .options(&options);
    let (client, connection) = config.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

impl Ledger<Arc<Client>> {
    /// Connects and builds a ledger for the configured schema.
    pub async fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let schema = Schema::try_from(settings.schema.as_str()).map_err(anyhow::Error::msg)?;
        let client = db(settings).await?;
        Ok(Self::new(client, schema, settings.privacy))
    }
}
