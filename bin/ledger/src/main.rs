//! Ledger Binary
//!
//! Interactive lookups against the latest billing partition.
//!
//! Commands: latest, columns, debt <account>, info <account>, quit

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    billing_core::log()?;
    billing_core::kys();
    billing_ledger::CLI::run(&billing_core::Settings::from_env()?).await
}
