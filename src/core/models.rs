//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the runner:
//! pipeline stages, error kinds, process outcomes and the slot that carries
//! the installed `karma.conf.js` path from the template stage to the test stage.
//!
//! 此模块定义了整个运行器中使用的核心数据结构：
//! 流水线阶段、错误类型、进程结果，以及将已安装的 `karma.conf.js` 路径
//! 从模板阶段传递到测试阶段的槽位。

use crate::infra::t;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Enumerates the kinds of failure a pipeline stage can report.
/// 枚举流水线阶段可能报告的失败类型。
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// A required input was missing or invalid.
    /// 必需的输入缺失或无效。
    Configuration,
    /// A resource could not be read, written or copied.
    /// 资源无法读取、写入或复制。
    Io,
    /// An external process could not be started or waited on.
    /// 外部进程无法启动或等待。
    Launch,
    /// An external process ran but exited unsuccessfully.
    /// 外部进程已运行但退出失败。
    Process,
}

/// Errors produced by the pipeline stages.
/// 流水线各阶段产生的错误。
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O failure on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("resource bundle '{0}' not found")]
    BundleNotFound(String),

    #[error("distinguished config entry '{entry}' missing from bundle '{bundle}'")]
    MissingMainConfig { entry: String, bundle: String },

    #[error(
        "config entry recorded twice: '{}' and '{}'",
        .first.display(),
        .second.display()
    )]
    DuplicateMainConfig { first: PathBuf, second: PathBuf },

    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited unsuccessfully ({})", exit_code_label(.code))]
    Process { program: String, code: Option<i32> },
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl PipelineError {
    /// Builds an `Io` error for the given path.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        PipelineError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Configuration(_) => ErrorKind::Configuration,
            PipelineError::Io { .. }
            | PipelineError::BundleNotFound(_)
            | PipelineError::MissingMainConfig { .. }
            | PipelineError::DuplicateMainConfig { .. } => ErrorKind::Io,
            PipelineError::Launch { .. } => ErrorKind::Launch,
            PipelineError::Process { .. } => ErrorKind::Process,
        }
    }
}

/// The ordered stages of a pipeline run.
/// 流水线运行的有序阶段。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Stage {
    /// Resolve install root, base path and module list.
    /// 解析安装根目录、基础路径和模块列表。
    Configure,
    /// Rewrite the `lib` bundle into the install root.
    /// 将 `lib` 资源包重写到安装根目录。
    InstallLib,
    /// Run the dependency installer (`npm install`).
    /// 运行依赖安装器（`npm install`）。
    InstallDependencies,
    /// Copy the `karmaGWT` bundle into `node_modules/karma-gwt`.
    /// 将 `karmaGWT` 资源包复制到 `node_modules/karma-gwt`。
    InstallAdapter,
    /// Run `karma start` against the installed config.
    /// 使用已安装的配置运行 `karma start`。
    RunTests,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::Configure,
        Stage::InstallLib,
        Stage::InstallDependencies,
        Stage::InstallAdapter,
        Stage::RunTests,
    ];

    /// Stable identifier used in logs and tests.
    pub fn id(&self) -> &'static str {
        match self {
            Stage::Configure => "configure",
            Stage::InstallLib => "install-lib",
            Stage::InstallDependencies => "install-dependencies",
            Stage::InstallAdapter => "install-adapter",
            Stage::RunTests => "run-tests",
        }
    }

    /// Localized, human-readable stage name.
    /// 本地化的、可读的阶段名称。
    pub fn display_name(&self) -> String {
        self.display_name_in(&rust_i18n::locale())
    }

    /// Stage name in the given locale.
    pub fn display_name_in(&self, locale: &str) -> String {
        match self {
            Stage::Configure => t!("stage.configure", locale = locale).to_string(),
            Stage::InstallLib => t!("stage.install_lib", locale = locale).to_string(),
            Stage::InstallDependencies => {
                t!("stage.install_dependencies", locale = locale).to_string()
            }
            Stage::InstallAdapter => t!("stage.install_adapter", locale = locale).to_string(),
            Stage::RunTests => t!("stage.run_tests", locale = locale).to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The first failure of a pipeline run, tagged with the stage that produced it.
/// 流水线运行的第一个失败，标记了产生它的阶段。
#[derive(Debug, Error)]
#[error("stage '{stage}' failed")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub error: PipelineError,
}

/// The outcome of a single executed stage.
#[derive(Debug)]
pub struct StageRecord {
    pub stage: Stage,
    pub duration: Duration,
    pub passed: bool,
}

/// The result of waiting on an external process.
/// 等待外部进程的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// `None` when the process was terminated by a signal.
    /// 进程被信号终止时为 `None`。
    pub code: Option<i32>,
}

impl ProcessOutcome {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessOutcome {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Single-assignment slot for the installed path of `karma.conf.js`.
///
/// Set once while the template bundle is installed and read once before the
/// test runner is started. Reading it before it was set is an error, so a
/// bundle without the config entry can never reach the test stage.
///
/// 已安装 `karma.conf.js` 路径的单次赋值槽位。
/// 在安装模板资源包时设置一次，在启动测试运行器之前读取一次。
#[derive(Debug, Default, Clone)]
pub struct MainConfigRef {
    path: Option<PathBuf>,
}

impl MainConfigRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the path.
    ///
    /// Recording the same path again is a no-op. A different path is rejected
    /// with `DuplicateMainConfig` and the first one is kept.
    pub fn set(&mut self, path: PathBuf) -> Result<(), PipelineError> {
        if let Some(first) = &self.path {
            if *first == path {
                return Ok(());
            }
            return Err(PipelineError::DuplicateMainConfig {
                first: first.clone(),
                second: path,
            });
        }
        self.path = Some(path);
        Ok(())
    }

    pub fn is_set(&self) -> bool {
        self.path.is_some()
    }

    pub fn get(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the recorded path or a `MissingMainConfig` error.
    pub fn require(&self, bundle: &str) -> Result<&Path, PipelineError> {
        self.get().ok_or_else(|| PipelineError::MissingMainConfig {
            entry: crate::core::install::MAIN_CONFIG_FILE.to_string(),
            bundle: bundle.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_config_ref_rejects_a_second_path() {
        let mut slot = MainConfigRef::new();
        slot.set(PathBuf::from("/a/karma.conf.js")).unwrap();
        let err = slot.set(PathBuf::from("/b/karma.conf.js")).unwrap_err();
        assert!(matches!(err, PipelineError::DuplicateMainConfig { .. }));
        assert_eq!(slot.get(), Some(Path::new("/a/karma.conf.js")));
    }

    #[test]
    fn main_config_ref_accepts_the_same_path_again() {
        let mut slot = MainConfigRef::new();
        slot.set(PathBuf::from("/a/karma.conf.js")).unwrap();
        slot.set(PathBuf::from("/a/karma.conf.js")).unwrap();
        assert_eq!(slot.get(), Some(Path::new("/a/karma.conf.js")));
    }

    #[test]
    fn unset_main_config_ref_is_an_io_error() {
        let slot = MainConfigRef::new();
        let err = slot.require("lib").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("karma.conf.js"));
    }

    #[test]
    fn stage_names_follow_the_requested_locale() {
        assert_eq!(Stage::Configure.display_name_in("en"), "Configure");
        assert_eq!(Stage::Configure.display_name_in("zh-CN"), "配置");
        assert_eq!(Stage::RunTests.display_name_in("en"), "Run tests");
    }

    #[test]
    fn process_outcome_success_only_on_zero() {
        assert!(ProcessOutcome::from_code(0).success());
        assert!(!ProcessOutcome::from_code(1).success());
        assert!(!ProcessOutcome { code: None }.success());
    }
}
