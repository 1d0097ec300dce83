//! # Command Module Unit Tests / Command 模块单元测试
//!
//! This module contains unit tests for `ProcessRunner` and `CommandSpec`.
//! Streams are discarded with `StdioMode::Null` so test output stays clean.
//!
//! 此模块包含 `ProcessRunner` 和 `CommandSpec` 的单元测试。
//! 使用 `StdioMode::Null` 丢弃输出流，以保持测试输出整洁。

use karma_runner::infra::command::{CommandSpec, Launcher, ProcessRunner, StdioMode};
use karma_runner::models::{ErrorKind, PipelineError};
use tempfile::TempDir;

fn quiet_runner() -> ProcessRunner {
    ProcessRunner::new(StdioMode::Null)
}

#[cfg(test)]
mod command_spec_tests {
    use super::*;

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let spec = CommandSpec::new(
            "/opt/node_modules/.bin/karma",
            vec!["start".to_string(), "/my dir/karma.conf.js".to_string()],
            "/opt",
        );
        let line = spec.to_string();
        assert!(line.starts_with("/opt/node_modules/.bin/karma start "));
        assert_eq!(
            shlex::split(&line).unwrap(),
            vec!["/opt/node_modules/.bin/karma", "start", "/my dir/karma.conf.js"]
        );
    }

    #[test]
    fn test_display_of_unquotable_words_does_not_fail() {
        let spec = CommandSpec::new("npm\u{0}x", vec!["install".to_string()], "/opt");
        assert_eq!(spec.to_string(), "npm\u{0}x install");
    }

    #[test]
    fn test_default_stdio_is_inherit() {
        assert_eq!(ProcessRunner::default().stdio(), StdioMode::Inherit);
    }
}

#[cfg(all(test, unix))]
mod process_runner_tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let temp_dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("true", vec![], temp_dir.path());

        let outcome = quiet_runner().launch(&spec).await.unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.code, Some(0));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_an_ordinary_failure() {
        let temp_dir = TempDir::new().unwrap();
        let spec = CommandSpec::new(
            "sh",
            vec!["-c".to_string(), "exit 3".to_string()],
            temp_dir.path(),
        );

        let outcome = quiet_runner().launch(&spec).await.unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.code, Some(3));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_launch_failure() {
        let temp_dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("this_command_definitely_does_not_exist_12345", vec![], temp_dir.path());

        let err = quiet_runner().launch(&spec).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Launch);
        assert!(matches!(err, PipelineError::Launch { ref program, .. } if program.contains("12345")));
    }

    #[tokio::test]
    async fn test_runs_in_the_given_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker"), "").unwrap();
        let spec = CommandSpec::new(
            "sh",
            vec!["-c".to_string(), "test -f marker".to_string()],
            temp_dir.path(),
        );

        assert!(quiet_runner().launch(&spec).await.unwrap().success());
    }

    #[tokio::test]
    async fn test_missing_working_directory_is_a_launch_failure() {
        let temp_dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("true", vec![], temp_dir.path().join("absent"));

        let err = quiet_runner().launch(&spec).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Launch);
    }
}
