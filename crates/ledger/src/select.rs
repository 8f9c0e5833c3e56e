use super::*;
use billing_core::*;
use const_format::concatcp;

/// Columns read by the debt lookup.
#[rustfmt::skip]
pub const DEBT_PROJECTION:    &[&str] = &[DEBT];
/// Columns read by the account lookup, in response order.
#[rustfmt::skip]
pub const ACCOUNT_PROJECTION: &[&str] = &[
    ACCOUNT_NUMBER,
    FULL_NAME,
    ADDRESS,
    PERIOD_YEAR,
    PERIOD_MONTH,
    METER_READING,
    DEBT,
];

#[rustfmt::skip]
const PREDICATE: &str = concatcp!(" WHERE ", ACCOUNT_NUMBER, " = $1");

/// A keyed lookup against one resolved partition.
///
/// The table comes from the catalog and the projection is a compile-time
/// constant; the account number is only ever bound as `$1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    table: Table,
    columns: &'static [&'static str],
}

impl Select {
    pub fn new(table: Table, columns: &'static [&'static str]) -> Self {
        Self { table, columns }
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }
    /// Every column this statement touches, key included.
    pub fn required(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(ACCOUNT_NUMBER).chain(
            self.columns
                .iter()
                .copied()
                .filter(|column| *column != ACCOUNT_NUMBER),
        )
    }
    pub fn sql(&self) -> String {
        format!(
            "SELECT {} FROM {}{}",
            self.columns.join(", "),
            self.table.qualified(),
            PREDICATE
        )
    }
}
