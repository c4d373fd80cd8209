//! Record the outcome of a manual payment screenshot check.
//!
//! The web flow only ever writes `initiated`; this is how a record becomes
//! `completed` and unlocks the registration form.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use clap::Parser;
use matrimony::config::DATABASE_URL_ENV;
use matrimony::domain::{PaymentReconciliationService, PaymentStatus, UserId};
use matrimony::outbound::persistence::{DbPool, DieselPaymentRepository, PoolConfig};
use tokio::runtime::Builder;

/// `reconcile-payment` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reconcile-payment",
    about = "Set the stored payment status for a user after checking their screenshot",
    version
)]
struct CliArgs {
    /// Identity id whose payment record is updated.
    #[arg(long = "user-id", value_name = "uid")]
    user_id: String,
    /// New status. Anything other than `completed` keeps the form locked.
    #[arg(long, value_name = "status", default_value = "completed")]
    status: String,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let user_id = UserId::new(args.user_id)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;
    let status = parse_status(&args.status)?;

    let database_url = resolve_database_url(args.database_url, env::var(DATABASE_URL_ENV).ok())?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let service = PaymentReconciliationService::new(Arc::new(DieselPaymentRepository::new(pool)));

    let record = service
        .set_status(&user_id, status)
        .await
        .map_err(|error| io::Error::other(format!("reconcile failed: {error}")))?;

    println!("user_id={}", record.user_id);
    println!("status={}", record.status);
    println!("method={}", record.method);
    println!("amount={}", record.amount);
    println!("initiated_at={}", record.timestamp.to_rfc3339());
    Ok(())
}

fn parse_status(raw: &str) -> io::Result<PaymentStatus> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "--status must not be empty",
        ));
    }
    Ok(PaymentStatus::from(trimmed))
}

fn resolve_database_url(explicit: Option<String>, from_env: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    from_env
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "database URL missing: set --database-url or DATABASE_URL",
            )
        })
}
