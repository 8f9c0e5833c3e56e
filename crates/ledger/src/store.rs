use super::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio_postgres::Client;

/// Store defines the read interface between the ledger and PostgreSQL.
/// Catalog scans and keyed lookups are consolidated here.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Every table name in `schema`, unfiltered.
    async fn tables(&self, schema: &Schema) -> Result<Vec<String>, QueryError>;
    /// Column names the catalog reports for `table`.
    async fn columns(&self, table: &Table) -> Result<BTreeSet<String>, QueryError>;
    /// Rows of `select` for one account, bound as `$1`.
    async fn select(&self, select: &Select, account: &str) -> Result<Vec<Record>, QueryError>;
}

/// Check defines liveness queries used by startup and health probes.
#[async_trait::async_trait]
pub trait Check: Send + Sync {
    async fn ping(&self) -> Result<(), QueryError>;
    async fn version(&self) -> Result<String, QueryError>;
}

#[rustfmt::skip]
#[async_trait::async_trait]
impl Store for Client {
    async fn tables(&self, schema: &Schema) -> Result<Vec<String>, QueryError> {
        const SQL: &str = concat!(
            "SELECT table_name::text ",
            "FROM   information_schema.tables ",
            "WHERE  table_schema = $1::text"
        );
        Ok(self
            .query(SQL, &[&schema.name()])
            .await?
            .iter()
            .map(|row| row.get::<_, String>(0))
            .collect())
    }
    async fn columns(&self, table: &Table) -> Result<BTreeSet<String>, QueryError> {
        const SQL: &str = concat!(
            "SELECT column_name::text ",
            "FROM   information_schema.columns ",
            "WHERE  table_schema = $1::text ",
            "AND    table_name   = $2::text"
        );
        Ok(self
            .query(SQL, &[&table.schema().name(), &table.name()])
            .await?
            .iter()
            .map(|row| row.get::<_, String>(0))
            .collect())
    }
    async fn select(&self, select: &Select, account: &str) -> Result<Vec<Record>, QueryError> {
        self.query(&select.sql(), &[&account])
            .await?
            .iter()
            .map(Record::try_from)
            .collect()
    }
}

#[async_trait::async_trait]
impl Store for Arc<Client> {
    async fn tables(&self, schema: &Schema) -> Result<Vec<String>, QueryError> {
        self.as_ref().tables(schema).await
    }
    async fn columns(&self, table: &Table) -> Result<BTreeSet<String>, QueryError> {
        self.as_ref().columns(table).await
    }
    async fn select(&self, select: &Select, account: &str) -> Result<Vec<Record>, QueryError> {
        self.as_ref().select(select, account).await
    }
}

#[async_trait::async_trait]
impl Check for Client {
    async fn ping(&self) -> Result<(), QueryError> {
        self.execute("SELECT 1", &[]).await.map(|_| ()).map_err(QueryError::from)
    }
    async fn version(&self) -> Result<String, QueryError> {
        Ok(self
            .query_one("SELECT version()", &[])
            .await?
            .get::<_, String>(0))
    }
}

#[async_trait::async_trait]
impl Check for Arc<Client> {
    async fn ping(&self) -> Result<(), QueryError> {
        self.as_ref().ping().await
    }
    async fn version(&self) -> Result<String, QueryError> {
        self.as_ref().version().await
    }
}
