use super::*;
use billing_core::DEBT;
use billing_core::Privacy;
use std::sync::Arc;
use tokio_postgres::Client;

/// Account lookups against the newest partition of one schema.
///
/// Holds no mutable state: every call re-reads the catalog, so a partition
/// created between two requests is picked up by the second one.
pub struct Ledger<S = Arc<Client>> {
    store: S,
    schema: Schema,
    privacy: Privacy,
}

impl<S> Ledger<S> {
    pub fn new(store: S, schema: Schema, privacy: Privacy) -> Self {
        Self {
            store,
            schema,
            privacy,
        }
    }
    pub fn store(&self) -> &S {
        &self.store
    }
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

// resolution and validation
impl<S: Store> Ledger<S> {
    /// Newest `t_<schema>_<n>` partition, or `None` before the first one exists.
    pub async fn resolve_latest_table(&self) -> Result<Option<Table>, QueryError> {
        log::info!("using schema {}", self.schema);
        let names = self
            .store
            .tables(&self.schema)
            .await
            .inspect_err(|e| log::error!("catalog scan of schema {} failed: {}", self.schema, e))?;
        let table = latest(&self.schema, names)?;
        match table {
            Some(ref table) => log::info!("using table {}", table),
            None => log::warn!("no partitions found in schema {}", self.schema),
        }
        Ok(table)
    }

    /// Whether every `required` column exists in `table`. Presence only.
    pub async fn has_required_columns<'a, I>(&self, table: &Table, required: I) -> Result<bool, QueryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.missing(table, required)
            .await
            .map(|missing| missing.is_empty())
    }

    async fn missing<'a, I>(&self, table: &Table, required: I) -> Result<Vec<String>, QueryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let actual = self.store.columns(table).await?;
        Ok(required
            .into_iter()
            .filter(|column| !actual.contains(*column))
            .map(String::from)
            .collect())
    }

    async fn prepare(&self, columns: &'static [&'static str]) -> Result<Select, QueryError> {
        let table = self
            .resolve_latest_table()
            .await?
            .ok_or_else(|| QueryError::NoSuitableTable {
                schema: self.schema.name().to_string(),
            })?;
        let select = Select::new(table, columns);
        let missing = self.missing(select.table(), select.required()).await?;
        if !missing.is_empty() {
            return Err(QueryError::SchemaMismatch {
                table: select.table().name().to_string(),
                missing,
            });
        }
        Ok(select)
    }

    async fn fetch(&self, select: &Select, account: &str) -> Result<Record, QueryError> {
        log::info!("executing query: {}", select.sql());
        let mut rows = self.store.select(select, account).await?;
        match rows.len() {
            0 => Err(QueryError::AccountNotFound),
            1 => Ok(rows.remove(0)),
            n => Err(QueryError::QueryFailed(format!(
                "account {} matches {} rows in {}",
                self.privacy.mask(account),
                n,
                select.table()
            ))),
        }
    }

    fn report(&self, lookup: &str, account: &str, e: &QueryError) {
        let account = self.privacy.mask(account);
        match e {
            QueryError::AccountNotFound | QueryError::NoSuitableTable { .. } => {
                log::warn!("{} lookup for account {}: {}", lookup, account, e)
            }
            _ => log::error!("{} lookup for account {} failed: {}", lookup, account, e),
        }
    }
}

// account lookups
impl<S: Store> Ledger<S> {
    /// Current debt of `account` as an exact decimal string.
    pub async fn get_debt(&self, account: &str) -> Result<String, QueryError> {
        log::debug!("debt lookup for account {}", self.privacy.mask(account));
        let record = match self.prepare(DEBT_PROJECTION).await {
            Ok(select) => self.fetch(&select, account).await,
            Err(e) => Err(e),
        };
        record
            .and_then(|record| {
                record
                    .get(DEBT)
                    .and_then(Value::decimal)
                    .ok_or_else(|| QueryError::QueryFailed("debt is not an exact numeric value".into()))
            })
            .inspect_err(|e| self.report("debt", account, e))
    }

    /// Full billing record of `account`, in projection order.
    pub async fn get_account_info(&self, account: &str) -> Result<Record, QueryError> {
        log::debug!("account lookup for account {}", self.privacy.mask(account));
        let record = match self.prepare(ACCOUNT_PROJECTION).await {
            Ok(select) => self.fetch(&select, account).await,
            Err(e) => Err(e),
        };
        record.inspect_err(|e| self.report("account", account, e))
    }
}
