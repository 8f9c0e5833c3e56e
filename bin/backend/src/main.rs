//! Billing Backend Binary
//!
//! Serves debt and account lookups over HTTP.
//! Reads DB_URL and BIND_ADDR (e.g. 0.0.0.0:8080) from the environment.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    billing_core::log()?;
    billing_core::kys();
    billing_server::run(billing_core::Settings::from_env()?).await
}
