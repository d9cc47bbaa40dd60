//! Startup wiring for the first-run bootstrap.

mod config;
mod run;

pub use config::BootstrapSettings;
pub use run::{
    StartupError, connect_database, load_seed_document, run_bootstrap,
    run_bootstrap_on_startup,
};
