//! Backend entry-point: applies migrations and runs the first-run bootstrap.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;

use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use userstory_backend::domain::BootstrapOutcome;
use userstory_backend::startup::{BootstrapSettings, connect_database, run_bootstrap_on_startup};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let settings = BootstrapSettings::load_from_iter(env::args_os())
        .map_err(|err| eyre!("load bootstrap settings: {err}"))?;

    let Some(database_url) = resolve_database_url(settings.database_url.as_deref()) else {
        warn!("no database URL configured (APP_DATABASE_URL or DATABASE_URL); skipping bootstrap");
        return Ok(());
    };

    let pool = connect_database(&settings, &database_url)
        .await
        .wrap_err("prepare database")?;

    match run_bootstrap_on_startup(&settings, &pool).await {
        Ok(BootstrapOutcome::AlreadyInitialized) => Ok(()),
        Ok(BootstrapOutcome::Initialized(summary)) => {
            let complete = summary
                .application_permissions
                .as_ref()
                .is_ok_and(|report| report.is_complete())
                && summary
                    .auth_permissions
                    .as_ref()
                    .is_ok_and(|report| report.is_complete())
                && summary.seeding.as_ref().is_none_or(|report| report.is_complete());
            if complete {
                info!("first-run bootstrap completed");
            } else {
                warn!("first-run bootstrap completed with failures");
            }
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "first-run bootstrap failed");
            Err(err).wrap_err("run first-run bootstrap")
        }
    }
}

fn resolve_database_url(explicit: Option<&str>) -> Option<String> {
    explicit
        .map(str::to_owned)
        .or_else(|| env::var("DATABASE_URL").ok())
        .filter(|value| !value.trim().is_empty())
}
