use tokio_postgres::error::SqlState;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Every way a ledger lookup can fail.
///
/// Callers branch on the variant, never on the message text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("no table matching t_{schema}_<n> in schema {schema}")]
    NoSuitableTable { schema: String },
    #[error("table {table} is missing columns: {}", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },
    #[error("account not found")]
    AccountNotFound,
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("query timed out")]
    Timeout,
    #[error("table {table} has a numeric suffix too large to order")]
    SuffixOverflow { table: String },
}

impl QueryError {
    /// Stable machine-readable identifier for this failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSuitableTable { .. } => "no_suitable_table",
            Self::SchemaMismatch { .. } => "schema_mismatch",
            Self::AccountNotFound => "account_not_found",
            Self::QueryFailed(_) => "query_failed",
            Self::Timeout => "timeout",
            Self::SuffixOverflow { .. } => "suffix_overflow",
        }
    }
}

impl From<PgErr> for QueryError {
    fn from(e: PgErr) -> Self {
        if e.code() == Some(&SqlState::QUERY_CANCELED) {
            return Self::Timeout;
        }
        let timed_out = std::error::Error::source(&e)
            .and_then(|source| source.downcast_ref::<std::io::Error>())
            .is_some_and(|io| io.kind() == std::io::ErrorKind::TimedOut);
        match timed_out {
            true => Self::Timeout,
            false => Self::QueryFailed(describe(&e)),
        }
    }
}

/// Server-reported message and SQLSTATE, or the client-side cause chain.
fn describe(e: &PgErr) -> String {
    match e.as_db_error() {
        Some(db) => rejection(db.code().code(), db.message(), db.detail()),
        None => chain(e),
    }
}

fn rejection(code: &str, message: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{} (SQLSTATE {}): {}", message, code, detail),
        None => format!("{} (SQLSTATE {})", message, code),
    }
}

fn chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text = format!("{}: {}", text, cause_text);
        }
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("error communicating with the server")]
    struct Communication(#[source] std::io::Error);

    #[test]
    fn rejections_keep_server_text() {
        assert_eq!(
            rejection("22021", "invalid byte sequence for encoding \"UTF8\": 0x00", None),
            "invalid byte sequence for encoding \"UTF8\": 0x00 (SQLSTATE 22021)"
        );
        assert_eq!(
            rejection("42P01", "relation \"t_PPI_9\" does not exist", Some("dropped during load")),
            "relation \"t_PPI_9\" does not exist (SQLSTATE 42P01): dropped during load"
        );
    }

    #[test]
    fn client_failures_keep_their_causes() {
        let e = Communication(std::io::Error::other("connection reset by peer"));
        assert_eq!(
            chain(&e),
            "error communicating with the server: connection reset by peer"
        );
        let io = std::io::Error::other("broken pipe");
        assert_eq!(chain(&io), "broken pipe");
    }

    #[test]
    fn codes_are_distinct() {
        let errors = [
            QueryError::NoSuitableTable { schema: "PPI".into() },
            QueryError::SchemaMismatch { table: "t_PPI_1".into(), missing: vec!["debt".into()] },
            QueryError::AccountNotFound,
            QueryError::QueryFailed("boom".into()),
            QueryError::Timeout,
            QueryError::SuffixOverflow { table: "t_PPI_99999999999999999999".into() },
        ];
        let codes = errors
            .iter()
            .map(QueryError::code)
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn mismatch_lists_missing_columns() {
        let e = QueryError::SchemaMismatch {
            table: "t_PPI_2".into(),
            missing: vec!["full_name".into(), "address".into()],
        };
        assert_eq!(e.to_string(), "table t_PPI_2 is missing columns: full_name, address");
    }
}
