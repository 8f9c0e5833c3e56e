use serde::{Deserialize, Serialize};

/// `?account=<number>` on both lookup routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountQuery {
    pub account: String,
}
