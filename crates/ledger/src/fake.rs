//! In-memory catalog standing in for PostgreSQL in tests.
use super::*;
use billing_core::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

#[derive(Default)]
struct Partition {
    columns: BTreeSet<String>,
    rows: Vec<Vec<(String, Value)>>,
}

/// Counts catalog scans and data lookups so tests can assert on traffic.
#[derive(Default)]
pub struct Fake {
    partitions: Mutex<BTreeMap<String, Partition>>,
    failure: Mutex<Option<QueryError>>,
    scans: AtomicUsize,
    lookups: AtomicUsize,
}

impl Fake {
    pub fn table(self, name: &str, columns: &[&str]) -> Self {
        self.create(name, columns);
        self
    }
    pub fn row(self, table: &str, values: &[(&str, Value)]) -> Self {
        self.insert(table, values);
        self
    }
    pub fn debt(self, table: &str, account: &str, debt: &str) -> Self {
        self.insert_debt(table, account, debt);
        self
    }
    #[allow(clippy::too_many_arguments)]
    pub fn account(
        self,
        table: &str,
        account: &str,
        name: &str,
        address: &str,
        year: i64,
        month: i64,
        meter: &str,
        debt: &str,
    ) -> Self {
        self.insert(
            table,
            &[
                (ACCOUNT_NUMBER, Value::Text(account.into())),
                (FULL_NAME, Value::Text(name.into())),
                (ADDRESS, Value::Text(address.into())),
                (PERIOD_YEAR, Value::Int(year)),
                (PERIOD_MONTH, Value::Int(month)),
                (METER_READING, Value::Text(meter.into())),
                (DEBT, decimal(debt)),
            ],
        );
        self
    }
    /// Every subsequent data lookup fails with `e`.
    pub fn failing(self, e: QueryError) -> Self {
        *self.failure.lock().unwrap() = Some(e);
        self
    }

    pub fn create(&self, name: &str, columns: &[&str]) -> &Self {
        self.partitions.lock().unwrap().insert(
            name.to_string(),
            Partition {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows: Vec::new(),
            },
        );
        self
    }
    pub fn insert(&self, table: &str, values: &[(&str, Value)]) -> &Self {
        self.partitions
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .rows
            .push(values.iter().map(|(k, v)| (k.to_string(), v.clone())).collect());
        self
    }
    pub fn insert_debt(&self, table: &str, account: &str, debt: &str) -> &Self {
        self.insert(
            table,
            &[
                (ACCOUNT_NUMBER, Value::Text(account.into())),
                (DEBT, decimal(debt)),
            ],
        )
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

fn decimal(s: &str) -> Value {
    Value::Decimal(Decimal::from_str(s).unwrap())
}

#[async_trait::async_trait]
impl Store for Fake {
    async fn tables(&self, _: &Schema) -> Result<Vec<String>, QueryError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        Ok(self.partitions.lock().unwrap().keys().cloned().collect())
    }
    async fn columns(&self, table: &Table) -> Result<BTreeSet<String>, QueryError> {
        Ok(self
            .partitions
            .lock()
            .unwrap()
            .get(table.name())
            .map(|p| p.columns.clone())
            .unwrap_or_default())
    }
    async fn select(&self, select: &Select, account: &str) -> Result<Vec<Record>, QueryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.failure.lock().unwrap().clone() {
            return Err(e);
        }
        let key = Value::Text(account.to_string());
        let partitions = self.partitions.lock().unwrap();
        let partition = partitions
            .get(select.table().name())
            .ok_or_else(|| QueryError::QueryFailed(format!("relation {} does not exist", select.table())))?;
        partition
            .rows
            .iter()
            .filter(|row| row.iter().any(|(k, v)| k == ACCOUNT_NUMBER && *v == key))
            .map(|row| {
                select
                    .columns()
                    .iter()
                    .map(|column| {
                        row.iter()
                            .find(|(k, _)| k == column)
                            .map(|(k, v)| (k.clone(), v.clone()))
                            .ok_or_else(|| {
                                QueryError::QueryFailed(format!("column {} does not exist", column))
                            })
                    })
                    .collect::<Result<Record, QueryError>>()
            })
            .collect()
    }
}
