//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as expanding user-supplied paths and preparing install directories.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如展开用户提供的路径和准备安装目录。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::PipelineError;

/// Expands `~` and environment variables in a user-supplied path.
///
/// # Arguments
/// * `path` - Path as written in the config file or on the command line
///
/// # Returns
/// The expanded path, or an error naming the variable that could not be resolved
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Creates a directory and all of its parents. Succeeds if it already exists.
pub fn ensure_dir(path: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(path).map_err(|e| PipelineError::io(path, e))
}

/// Checks if a path exists and is a directory.
///
/// # Arguments
/// * `path` - Path to check
///
/// # Returns
/// `true` if the path exists and is a directory, `false` otherwise
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Makes a path absolute against the current directory without touching the file system.
pub fn absolute_path(path: &Path) -> Result<PathBuf, PipelineError> {
    std::path::absolute(path).map_err(|e| PipelineError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_path_leaves_plain_paths_alone() {
        let path = expand_path(Path::new("/build/out")).unwrap();
        assert_eq!(path, PathBuf::from("/build/out"));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_path_keeps_absolute_input() {
        let path = absolute_path(Path::new("/build/karma.conf.js")).unwrap();
        assert_eq!(path, PathBuf::from("/build/karma.conf.js"));
    }
}
