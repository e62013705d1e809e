//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;

use coupons::coupons::CouponUuid;

/// Coupon engine command line
#[derive(Debug, Parser)]
#[command(name = "coupons", about = "Evaluate coupons against a cart", long_about = None)]
pub struct CliConfig {
    /// Directory holding `catalogs/` and `carts/` fixtures
    #[arg(long, env = "COUPONS_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Catalog fixture name
    #[arg(long, env = "COUPONS_CATALOG", default_value = "default")]
    pub catalog: String,

    /// Cart fixture name
    #[arg(long, env = "COUPONS_CART", default_value = "default")]
    pub cart: String,

    /// Evaluation time (RFC 3339); defaults to now
    #[arg(long, env = "COUPONS_AT")]
    pub at: Option<Timestamp>,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Action to run
    #[command(subcommand)]
    pub command: Command,
}

/// Actions
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the coupons that give a discount on the cart
    Applicable,

    /// Price the cart with one coupon
    Apply {
        /// Coupon id
        coupon_id: CouponUuid,
    },
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
