//! Core settings, constants, and runtime utilities for the billing service.
//!
//! Everything here is shared by the ledger, the HTTP server, and the CLI.
//!
//! - [`Settings`]: environment-driven configuration
//! - [`Privacy`]: how account numbers appear in logs
//! - [`log()`] / [`kys()`]: process bootstrap (behind the `server` feature)
mod settings;

pub use settings::*;

// ============================================================================
// PARTITION NAMING
// ============================================================================
/// Prefix shared by every billing partition: `t_<SCHEMA>_<n>`.
pub const TABLE_PREFIX: &str = "t_";
/// Schema used when `BILLING_SCHEMA` is unset.
pub const DEFAULT_SCHEMA: &str = "PPI";
/// PostgreSQL truncates identifiers beyond NAMEDATALEN - 1.
pub const MAX_IDENTIFIER_LEN: usize = 63;

// ============================================================================
// ACCOUNT COLUMNS
// ============================================================================
#[rustfmt::skip]
pub const ACCOUNT_NUMBER: &str = "account_number";
#[rustfmt::skip]
pub const FULL_NAME:      &str = "full_name";
#[rustfmt::skip]
pub const ADDRESS:        &str = "address";
#[rustfmt::skip]
pub const PERIOD_YEAR:    &str = "period_year";
#[rustfmt::skip]
pub const PERIOD_MONTH:   &str = "period_month";
#[rustfmt::skip]
pub const METER_READING:  &str = "meter_reading";
#[rustfmt::skip]
pub const DEBT:           &str = "debt";

/// Longest account number accepted from callers.
pub const MAX_ACCOUNT_LEN: usize = 64;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}

/// Parse duration string like "250ms", "30s", "5m", "2h", "1d" into Duration.
pub fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    if let Some(num) = s.strip_suffix("ms") {
        return num.parse().ok().map(std::time::Duration::from_millis);
    }
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(std::time::Duration::from_secs(value)),
        "m" => Some(std::time::Duration::from_secs(value.checked_mul(60)?)),
        "h" => Some(std::time::Duration::from_secs(value.checked_mul(3600)?)),
        "d" => Some(std::time::Duration::from_secs(value.checked_mul(86400)?)),
        _ => None,
    }
}
