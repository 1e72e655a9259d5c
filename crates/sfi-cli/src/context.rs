//! Per-invocation state shared by every command.

use std::path::Path;

use anyhow::{Context, Result};
use sfi::{MatchMode, SfiEngine};
use sfi_config::SfiConfig;
use sfi_store::JsonFileStore;

pub struct AppContext {
    pub config: SfiConfig,
    pub engine: SfiEngine,
    pub json: bool,
}

impl AppContext {
    /// Loads layered configuration for `project` and builds the engine.
    /// `--strict` overrides the configured matching mode.
    pub fn load(project: &Path, json: bool, strict: bool) -> Result<Self> {
        let config = SfiConfig::load_from_dir(project)
            .with_context(|| format!("Failed to load configuration for {}", project.display()))?;

        let mode = if strict {
            MatchMode::Strict
        } else {
            config.matching.mode
        };

        let engine = SfiEngine::for_catalog(config.build_catalog()?)?.with_mode(mode);

        Ok(Self {
            config,
            engine,
            json,
        })
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.config.dataset.path.clone())
    }
}
