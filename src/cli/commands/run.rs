// src/cli/commands/run.rs

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::Path, path::PathBuf};

use crate::{
    core::{
        config::{ConfigOverrides, RunConfig},
        pipeline::Pipeline,
    },
    infra::{
        bundle,
        command::{ProcessRunner, StdioMode},
        fs::expand_path,
        t,
    },
    reporting::{print_failure_details, print_summary},
};

/// Everything the `run` command needs from the command line.
#[derive(Debug, Default)]
pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub resources_dir: Option<PathBuf>,
    /// Language given with `--lang`, which beats the config file's `language`.
    pub language: Option<String>,
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };
    args.overrides.apply_to(&mut config);
    expand_config_paths(&mut config)?;

    let locale = match args.language.as_ref().or(config.language.as_ref()) {
        Some(lang) => {
            crate::set_locale(lang);
            lang.clone()
        }
        None => rust_i18n::locale().to_string(),
    };

    let resources_dir = args
        .resources_dir
        .as_deref()
        .map(expand_path)
        .transpose()?;
    if let Some(dir) = &resources_dir {
        println!("{}", t!("run.using_resources_dir", path = dir.display()).cyan());
    }

    let source = bundle::source_for(resources_dir.as_deref());
    let mut pipeline = Pipeline::new(config, source, ProcessRunner::new(StdioMode::Inherit));
    let report = pipeline.run().await;

    print_summary(&report, &locale);

    match report.failure {
        Some(failure) => {
            print_failure_details(&failure, &locale);
            Err(anyhow::Error::new(failure).context(t!("run.pipeline_failed").to_string()))
        }
        None => {
            println!("\n{}", t!("run.pipeline_passed").green().bold());
            Ok(())
        }
    }
}

/// Reads and parses a TOML run configuration.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| t!("run.config_read_failed", path = path.display()).to_string())?;
    let config: RunConfig = toml::from_str(&content)
        .with_context(|| t!("run.config_parse_failed", path = path.display()).to_string())?;
    Ok(config)
}

fn expand_config_paths(config: &mut RunConfig) -> Result<()> {
    config.output_directory = expand_path(&config.output_directory)?;
    if let Some(root) = &config.install_root {
        config.install_root = Some(expand_path(root)?);
    }
    Ok(())
}
