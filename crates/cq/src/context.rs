//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: global flags,
//! the resolved configuration and the dataset to rank.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cqql_config::{CqqlConfig, find_config_dir, load_config, load_with_defaults};
use cqql_core::ScoredObject;
use cqql_core::object::read_all;
use cqql_query::NormalizeOptions;
use serde::Serialize;
use tracing::debug;

use crate::cli::{GlobalArgs, PipelineArgs};
use crate::demo;

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum ConfigSource {
    /// A `config.yaml` file.
    File(PathBuf),
    /// No file was found; the apartment demo profile is in use.
    Demo,
}

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit config file from `--config`.
    pub config_path: Option<PathBuf>,

    /// Explicit dataset from `--data`.
    pub data_path: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            config_path: global.config.clone(),
            data_path: global.data.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Resolve the configuration.
    ///
    /// Priority: `--config` file > `.cqql/config.yaml` found from the current
    /// directory > the built-in demo profile. Environment overrides apply in
    /// every case.
    pub fn load_config(&self) -> Result<(CqqlConfig, ConfigSource)> {
        if let Some(path) = &self.config_path {
            let config = load_with_defaults(CqqlConfig::default(), Some(path))
                .with_context(|| format!("failed to load config {}", path.display()))?;
            return Ok((config, ConfigSource::File(path.clone())));
        }

        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        if let Some(dir) = find_config_dir(&cwd) {
            debug!(dir = %dir.display(), "using config directory");
            let config = load_config(&dir)
                .with_context(|| format!("failed to load config from {}", dir.display()))?;
            return Ok((config, ConfigSource::File(dir.join(cqql_config::config::CONFIG_FILE))));
        }

        debug!("no config found, using demo profile");
        let config = load_with_defaults(demo::demo_config(), None)?;
        Ok((config, ConfigSource::Demo))
    }

    /// Load the objects to rank.
    ///
    /// Priority: `--data` > `data` from the config > the demo apartments.
    pub fn load_objects(&self, config: &CqqlConfig) -> Result<Vec<ScoredObject>> {
        match self.data_path.as_ref().or(config.data.as_ref()) {
            Some(path) => load_dataset(path),
            None => Ok(demo::demo_objects()),
        }
    }
}

fn load_dataset(path: &Path) -> Result<Vec<ScoredObject>> {
    let file =
        File::open(path).with_context(|| format!("failed to open dataset {}", path.display()))?;
    let objects = read_all(BufReader::new(file))
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    debug!(path = %path.display(), count = objects.len(), "loaded dataset");
    Ok(objects)
}

/// Normalizer options from the config, overridden by command-line flags.
pub fn normalize_options(config: &CqqlConfig, args: &PipelineArgs) -> NormalizeOptions {
    let ordinal = if args.ordinal.is_empty() {
        config.ordinal_attrs()
    } else {
        args.ordinal
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    };

    NormalizeOptions {
        ordinal_attrs: ordinal,
        max_depth: args.max_depth.unwrap_or(config.max_depth),
    }
}

/// Returns the formula text, reading one from stdin when `arg` is `-`.
pub fn read_formula(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut text = String::new();
    io::stdin()
        .lock()
        .read_line(&mut text)
        .context("failed to read formula from stdin")?;
    let text = text.trim();
    if text.is_empty() {
        bail!("no formula given on stdin");
    }
    Ok(text.to_string())
}
