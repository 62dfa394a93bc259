use freightdesk_core::config::{AppConfig, ConfigError};
use freightdesk_core::{CatalogError, LoadCatalog};
use thiserror::Error;
use tracing::{info, warn};

use crate::state::AppState;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("load catalog could not be opened: {0}")]
    Catalog(#[from] CatalogError),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = LoadCatalog::from_path(&config.catalog.path)?;
    if catalog.is_empty() {
        warn!(
            event_name = "system.bootstrap.catalog_empty",
            correlation_id = "bootstrap",
            path = %config.catalog.path.display(),
            "load catalog is empty; searches will return no loads"
        );
    } else {
        info!(
            event_name = "system.bootstrap.catalog_loaded",
            correlation_id = "bootstrap",
            loads = catalog.len(),
            "load catalog loaded"
        );
    }

    let state = AppState::new(catalog, config.auth.api_key.clone());
    Ok(Application { config, state })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use freightdesk_core::config::{AppConfig, ConfigOverrides, LoadOptions};

    use crate::bootstrap::{bootstrap_with_config, Application, BootstrapError};

    fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
        bootstrap_with_config(AppConfig::load(options)?)
    }

    fn options(api_key: Option<&str>, catalog: &Path) -> LoadOptions {
        LoadOptions {
            config_path: Some(catalog.with_file_name("absent-freightdesk.toml")),
            overrides: ConfigOverrides {
                api_key: api_key.map(str::to_string),
                catalog_path: Some(catalog.to_path_buf()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[test]
    fn bootstrap_fails_fast_without_api_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = bootstrap(options(Some("   "), &dir.path().join("loads.json")));

        let error = result.err().expect("missing key must fail");
        assert!(matches!(error, BootstrapError::Config(_)));
        assert!(error.to_string().contains("auth.api_key"));
    }

    #[test]
    fn bootstrap_tolerates_missing_catalog_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = bootstrap(options(Some("bootstrap-key"), &dir.path().join("loads.json")))
            .expect("bootstrap should succeed");

        assert!(app.state.catalog.is_empty());
        assert!(app.state.ledger.is_empty());
    }

    #[test]
    fn bootstrap_rejects_malformed_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("loads.json");
        fs::write(&path, "{ not json").expect("write catalog");

        let error = bootstrap(options(Some("bootstrap-key"), &path)).err().expect("must fail");
        assert!(matches!(error, BootstrapError::Catalog(_)));
    }
}
