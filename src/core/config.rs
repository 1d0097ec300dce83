//! # Configuration Module / 配置模块
//!
//! Defines the run configuration, loaded from an optional TOML file and
//! overridden by command-line flags, and resolves it into the values the
//! installers and process stages need.
//!
//! 定义运行配置（从可选的 TOML 文件加载并由命令行参数覆盖），
//! 并将其解析为安装器和进程阶段所需的值。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::models::PipelineError;

/// Dependency installer run in the install root when none is configured.
pub const DEFAULT_INSTALL_COMMAND: &str = "npm install";

/// Test runner executable looked up under `node_modules/.bin`.
pub const DEFAULT_RUNNER: &str = "karma";

/// Represents the run configuration as supplied by the build.
/// Every field may come from the config file; CLI flags take precedence.
///
/// 代表构建提供的运行配置。
/// 每个字段都可以来自配置文件；命令行参数优先。
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    pub language: Option<String>,
    /// The build output directory. Its parent is the default install root.
    /// 构建输出目录。其父目录是默认的安装根目录。
    pub output_directory: PathBuf,
    /// Project artifact id, used with `version` to derive the base path.
    /// 项目 artifact id，与 `version` 一起用于推导基础路径。
    pub artifact_id: Option<String>,
    /// Project version.
    /// 项目版本。
    pub version: Option<String>,
    /// Name of the compiled test runner module. When set, the base path is
    /// `<output_directory>/<test_runner>`.
    /// 编译后的测试运行器模块名称。设置后，基础路径为 `<output_directory>/<test_runner>`。
    pub test_runner: Option<String>,
    /// Test module identifiers, in the order they must appear in `karma.conf.js`.
    /// 测试模块标识符，按其在 `karma.conf.js` 中出现的顺序排列。
    pub test_modules: Vec<String>,
    /// Explicit base path; overrides any derivation.
    /// 显式基础路径；覆盖任何推导。
    pub base_path: Option<String>,
    /// Explicit install root; defaults to the parent of `output_directory`.
    /// 显式安装根目录；默认为 `output_directory` 的父目录。
    pub install_root: Option<PathBuf>,
    /// Dependency installer command line, split with shell-word rules.
    /// 依赖安装器命令行，按 shell 单词规则拆分。
    pub install_command: String,
    /// Test runner executable name under `node_modules/.bin`.
    /// `node_modules/.bin` 下的测试运行器可执行文件名。
    pub runner: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            language: None,
            output_directory: PathBuf::from("target"),
            artifact_id: None,
            version: None,
            test_runner: None,
            test_modules: vec![],
            base_path: None,
            install_root: None,
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
            runner: DEFAULT_RUNNER.to_string(),
        }
    }
}

/// Values given on the command line. Each `Some` replaces the config file's value.
/// 命令行给出的值。每个 `Some` 都会替换配置文件中的值。
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_directory: Option<PathBuf>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub test_runner: Option<String>,
    pub test_modules: Option<Vec<String>>,
    pub base_path: Option<String>,
    pub install_root: Option<PathBuf>,
    pub install_command: Option<String>,
    pub runner: Option<String>,
}

impl ConfigOverrides {
    pub fn apply_to(self, config: &mut RunConfig) {
        if let Some(output_directory) = self.output_directory {
            config.output_directory = output_directory;
        }
        if self.artifact_id.is_some() {
            config.artifact_id = self.artifact_id;
        }
        if self.version.is_some() {
            config.version = self.version;
        }
        if self.test_runner.is_some() {
            config.test_runner = self.test_runner;
        }
        if let Some(test_modules) = self.test_modules {
            config.test_modules = test_modules;
        }
        if self.base_path.is_some() {
            config.base_path = self.base_path;
        }
        if self.install_root.is_some() {
            config.install_root = self.install_root;
        }
        if let Some(install_command) = self.install_command {
            config.install_command = install_command;
        }
        if let Some(runner) = self.runner {
            config.runner = runner;
        }
    }
}

/// The values derived from a `RunConfig` that the rest of the pipeline consumes.
/// 从 `RunConfig` 推导出的、供流水线其余部分使用的值。
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub output_directory: PathBuf,
    /// Parent of every installed file.
    /// 所有已安装文件的父目录。
    pub install_root: PathBuf,
    pub base_path: String,
    /// Test modules, each single-quoted, comma-joined.
    /// 测试模块，每个都用单引号包裹并以逗号连接。
    pub quoted_modules: String,
    /// Program followed by its arguments.
    /// 程序及其参数。
    pub install_command: Vec<String>,
    pub runner: String,
}

impl RunConfig {
    /// Resolves install root, base path, module list and install command.
    ///
    /// # Errors
    /// Returns `PipelineError::Configuration` when the module list is empty,
    /// when no base path can be derived, or when the install command or
    /// runner name is empty or contains a NUL byte.
    ///
    /// 解析安装根目录、基础路径、模块列表和安装命令。
    pub fn resolve(&self) -> Result<ResolvedConfig, PipelineError> {
        let quoted_modules = quote_modules(&self.test_modules)?;
        let base_path = self.resolve_base_path()?;
        let install_root = match &self.install_root {
            Some(root) => root.clone(),
            None => default_install_root(&self.output_directory),
        };

        if self.install_command.contains('\0') || self.runner.contains('\0') {
            return Err(PipelineError::Configuration(
                "install command and runner name must not contain NUL bytes".to_string(),
            ));
        }

        let install_command = shlex::split(&self.install_command)
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| {
                PipelineError::Configuration(format!(
                    "install command '{}' is empty or malformed",
                    self.install_command
                ))
            })?;

        if self.runner.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "test runner executable name is empty".to_string(),
            ));
        }

        Ok(ResolvedConfig {
            output_directory: self.output_directory.clone(),
            install_root,
            base_path,
            quoted_modules,
            install_command,
            runner: self.runner.clone(),
        })
    }

    fn resolve_base_path(&self) -> Result<String, PipelineError> {
        if let Some(base_path) = &self.base_path {
            return Ok(base_path.clone());
        }
        if let Some(test_runner) = &self.test_runner {
            return Ok(path_string(&self.output_directory.join(test_runner)));
        }
        match (&self.artifact_id, &self.version) {
            (Some(artifact_id), Some(version)) => Ok(path_string(
                &self
                    .output_directory
                    .join(format!("{artifact_id}-{version}")),
            )),
            _ => Err(PipelineError::Configuration(
                "cannot derive the base path: set base_path, test_runner, or both artifact_id and version"
                    .to_string(),
            )),
        }
    }
}

/// Wraps each module in single quotes and joins them with commas, keeping input order.
///
/// # Errors
/// An empty list is rejected: it would leave `karma.conf.js` with an empty module list.
///
/// 将每个模块用单引号包裹并以逗号连接，保持输入顺序。空列表会被拒绝。
pub fn quote_modules(modules: &[String]) -> Result<String, PipelineError> {
    if modules.is_empty() {
        return Err(PipelineError::Configuration(
            "at least one test module is required".to_string(),
        ));
    }
    Ok(modules
        .iter()
        .map(|module| format!("'{module}'"))
        .collect::<Vec<_>>()
        .join(","))
}

/// Parent of the output directory, or `<output>/..` when it has no usable parent.
pub fn default_install_root(output_directory: &Path) -> PathBuf {
    match output_directory.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => output_directory.join(".."),
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
