//! # Command Execution Module / 命令执行模块
//!
//! Launches external commands (`npm install`, `karma start`) and waits for them.
//! The child's console output goes straight to the terminal; nothing is captured.
//!
//! 启动外部命令（`npm install`、`karma start`）并等待其结束。
//! 子进程的控制台输出直接写到终端，不做任何捕获。

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use crate::core::models::{PipelineError, ProcessOutcome};

/// How the child's standard streams are wired.
/// 子进程标准流的连接方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Share the caller's stdin, stdout and stderr.
    /// 共享调用方的 stdin、stdout 和 stderr。
    #[default]
    Inherit,
    /// Discard all three streams.
    /// 丢弃全部三个流。
    Null,
}

impl StdioMode {
    fn stdio(&self) -> Stdio {
        match self {
            StdioMode::Inherit => Stdio::inherit(),
            StdioMode::Null => Stdio::null(),
        }
    }
}

/// A command line together with the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            cwd: cwd.into(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = || std::iter::once(&self.program).chain(&self.args).map(String::as_str);
        match shlex::try_join(words()) {
            Ok(line) => f.write_str(&line),
            // Words with NUL bytes cannot be quoted; show them unquoted.
            Err(_) => f.write_str(&words().collect::<Vec<_>>().join(" ")),
        }
    }
}

/// Runs a command to completion.
///
/// Implementations must block until the process exits. A non-zero exit is
/// reported through `ProcessOutcome`; only spawn or wait errors are `Err`.
///
/// 运行命令直至结束。非零退出通过 `ProcessOutcome` 报告；只有启动或等待错误才返回 `Err`。
#[allow(async_fn_in_trait)]
pub trait Launcher {
    async fn launch(&self, spec: &CommandSpec) -> Result<ProcessOutcome, PipelineError>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    async fn launch(&self, spec: &CommandSpec) -> Result<ProcessOutcome, PipelineError> {
        (**self).launch(spec).await
    }
}

/// Launches real processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    stdio: StdioMode,
}

impl ProcessRunner {
    pub fn new(stdio: StdioMode) -> Self {
        Self { stdio }
    }

    pub fn stdio(&self) -> StdioMode {
        self.stdio
    }
}

impl Launcher for ProcessRunner {
    async fn launch(&self, spec: &CommandSpec) -> Result<ProcessOutcome, PipelineError> {
        let mut cmd = tokio::process::Command::new(&spec.program);
        cmd.args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(self.stdio.stdio())
            .stdout(self.stdio.stdio())
            .stderr(self.stdio.stdio())
            .kill_on_drop(true);

        let status = cmd.status().await.map_err(|source| PipelineError::Launch {
            program: spec.program.clone(),
            source,
        })?;

        Ok(ProcessOutcome::from(status))
    }
}
