pub mod cli;
pub mod dispatch;

use anyhow::{Result, anyhow};
use caseflow_app::App;
use caseflow_core::config::{CaseflowConfig, load_config, resolve_config_path};
use caseflow_core::storage::open_default_storage;
use caseflow_core::store::SessionStore;
use clap::Parser;

use crate::cli::Cli;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = load_optional_config()?;
    let storage = open_default_storage(config.as_ref());
    let mut app = App::new(SessionStore::open(storage));
    if let Some(config) = &config {
        app.set_currency(config.currency());
    }

    dispatch::run_with_deps(cli, &mut app)
}

/// Missing config is fine (defaults); a present but invalid config is
/// an actionable error.
fn load_optional_config() -> Result<Option<CaseflowConfig>> {
    let Ok(config_path) = resolve_config_path() else {
        return Ok(None);
    };
    if !config_path.exists() {
        return Ok(None);
    }

    load_config(&config_path)
        .map(Some)
        .map_err(|error| {
            anyhow!(
                "invalid config at {}: {error}\nFix the config and retry. See README.md for setup instructions.",
                config_path.display()
            )
        })
}
