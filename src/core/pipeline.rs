//! # Pipeline Module / 流水线模块
//!
//! Drives a run through its ordered stages:
//! configure, install `lib`, `npm install`, install the adapter, `karma start`.
//! The first failing stage ends the run; later stages never execute.
//!
//! 按顺序驱动运行的各个阶段：
//! 配置、安装 `lib`、`npm install`、安装适配器、`karma start`。
//! 第一个失败的阶段会结束运行，后续阶段不会执行。

use chrono::{DateTime, Local};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::config::{ResolvedConfig, RunConfig};
use crate::core::install::{self, LIB_BUNDLE};
use crate::core::models::{MainConfigRef, PipelineError, Stage, StageFailure, StageRecord};
use crate::core::template::Substitutions;
use crate::infra::bundle::BundleSource;
use crate::infra::command::{CommandSpec, Launcher};
use crate::infra::fs::absolute_path;
use crate::infra::t;
use crate::reporting::print_resolved_config;

/// Path of the test runner executable installed by the dependency installer.
pub fn runner_executable(install_root: &Path, runner: &str) -> PathBuf {
    let name = if cfg!(windows) {
        format!("{runner}.cmd")
    } else {
        runner.to_string()
    };
    install_root.join("node_modules").join(".bin").join(name)
}

/// What happened during one pipeline run.
/// 一次流水线运行的结果。
#[derive(Debug)]
pub struct PipelineReport {
    pub started_at: DateTime<Local>,
    /// Executed stages, in order. The last one is the failed stage, if any.
    /// 已执行的阶段（按顺序）。如有失败，最后一个即为失败的阶段。
    pub records: Vec<StageRecord>,
    pub failure: Option<StageFailure>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn executed(&self, stage: Stage) -> bool {
        self.records.iter().any(|record| record.stage == stage)
    }
}

/// A single run of the stage pipeline.
///
/// Generic over where bundles come from and how processes are launched, so
/// tests can substitute a directory of fixtures and a recording launcher.
///
/// 阶段流水线的一次运行。对资源包来源和进程启动方式是泛型的，
/// 因此测试可以替换为固定目录和记录型启动器。
pub struct Pipeline<S, L> {
    config: RunConfig,
    source: S,
    launcher: L,
    resolved: Option<ResolvedConfig>,
    main_config: MainConfigRef,
}

impl<S: BundleSource, L: Launcher> Pipeline<S, L> {
    pub fn new(config: RunConfig, source: S, launcher: L) -> Self {
        Self {
            config,
            source,
            launcher,
            resolved: None,
            main_config: MainConfigRef::new(),
        }
    }

    /// Values resolved by the configure stage, once it has run.
    pub fn resolved(&self) -> Option<&ResolvedConfig> {
        self.resolved.as_ref()
    }

    /// Installed path of `karma.conf.js`, once the `lib` bundle is installed.
    pub fn main_config(&self) -> Option<&Path> {
        self.main_config.get()
    }

    /// Runs every stage in order, stopping at the first failure.
    pub async fn run(&mut self) -> PipelineReport {
        let started_at = Local::now();
        let mut records = Vec::with_capacity(Stage::ALL.len());

        for stage in Stage::ALL {
            println!(
                "{}",
                t!("pipeline.stage_started", stage = stage.display_name()).blue()
            );
            let start = Instant::now();
            let result = self.run_stage(stage).await;
            let duration = start.elapsed();

            match result {
                Ok(()) => {
                    println!(
                        "{}",
                        t!(
                            "pipeline.stage_passed",
                            stage = stage.display_name(),
                            duration = format!("{:.2?}", duration)
                        )
                        .green()
                    );
                    records.push(StageRecord {
                        stage,
                        duration,
                        passed: true,
                    });
                }
                Err(error) => {
                    eprintln!(
                        "{}",
                        t!(
                            "pipeline.stage_failed",
                            stage = stage.display_name(),
                            error = &error
                        )
                        .red()
                    );
                    records.push(StageRecord {
                        stage,
                        duration,
                        passed: false,
                    });
                    return PipelineReport {
                        started_at,
                        records,
                        failure: Some(StageFailure { stage, error }),
                    };
                }
            }
        }

        PipelineReport {
            started_at,
            records,
            failure: None,
        }
    }

    async fn run_stage(&mut self, stage: Stage) -> Result<(), PipelineError> {
        match stage {
            Stage::Configure => self.configure(),
            Stage::InstallLib => self.install_lib(),
            Stage::InstallDependencies => self.install_dependencies().await,
            Stage::InstallAdapter => self.install_adapter(),
            Stage::RunTests => self.run_tests().await,
        }
    }

    fn configure(&mut self) -> Result<(), PipelineError> {
        let resolved = self.config.resolve()?;
        print_resolved_config(&resolved);
        self.resolved = Some(resolved);
        Ok(())
    }

    fn install_lib(&mut self) -> Result<(), PipelineError> {
        let resolved = require_resolved(&self.resolved)?;
        let subs = Substitutions {
            base_path: &resolved.base_path,
            quoted_modules: &resolved.quoted_modules,
        };
        install::install_templates(
            &self.source,
            &resolved.install_root,
            subs,
            &mut self.main_config,
        )?;
        self.main_config.require(LIB_BUNDLE)?;
        Ok(())
    }

    async fn install_dependencies(&mut self) -> Result<(), PipelineError> {
        let resolved = require_resolved(&self.resolved)?;
        let (program, args) = resolved.install_command.split_first().ok_or_else(|| {
            PipelineError::Configuration("install command is empty".to_string())
        })?;
        let spec = CommandSpec::new(program.clone(), args.to_vec(), &resolved.install_root);
        self.run_checked(&spec).await
    }

    fn install_adapter(&mut self) -> Result<(), PipelineError> {
        let resolved = require_resolved(&self.resolved)?;
        install::install_assets(&self.source, &resolved.install_root)?;
        Ok(())
    }

    async fn run_tests(&mut self) -> Result<(), PipelineError> {
        let resolved = require_resolved(&self.resolved)?;
        let karma = absolute_path(&runner_executable(&resolved.install_root, &resolved.runner))?;
        let karma_config = absolute_path(self.main_config.require(LIB_BUNDLE)?)?;
        let spec = CommandSpec::new(
            karma.to_string_lossy(),
            vec![
                "start".to_string(),
                karma_config.to_string_lossy().into_owned(),
            ],
            &resolved.install_root,
        );
        self.run_checked(&spec).await
    }

    /// Launches `spec` and turns a non-zero exit into `PipelineError::Process`.
    async fn run_checked(&self, spec: &CommandSpec) -> Result<(), PipelineError> {
        println!("{} {}", t!("pipeline.command_prefix").blue(), spec);
        let outcome = self.launcher.launch(spec).await?;
        if outcome.success() {
            Ok(())
        } else {
            Err(PipelineError::Process {
                program: spec.program.clone(),
                code: outcome.code,
            })
        }
    }
}

fn require_resolved(resolved: &Option<ResolvedConfig>) -> Result<&ResolvedConfig, PipelineError> {
    resolved
        .as_ref()
        .ok_or_else(|| PipelineError::Configuration("pipeline has not been configured".to_string()))
}
