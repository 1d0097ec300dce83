//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which writes a starter
//! run configuration file.
//!
//! 此模块实现了 `init` 命令，用于写入初始运行配置文件。

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::PathBuf};
use crate::infra::t;

pub const DEFAULT_CONFIG: &str = r#"# Karma Runner Configuration / Karma Runner 配置

# Language for messages / 消息语言
language = "en"

# Build output directory; its parent is where Karma gets installed
# 构建输出目录；其父目录是 Karma 的安装位置
output_directory = "target"

# Used to derive the base path as <output_directory>/<artifact_id>-<version>
# 用于推导基础路径 <output_directory>/<artifact_id>-<version>
artifact_id = "my-app"
version = "1.0-SNAPSHOT"

# Compiled test modules, in load order / 编译后的测试模块，按加载顺序
test_modules = ["myapp.Tests"]

# Optional overrides / 可选的覆盖项
# test_runner = "testRunner"
# base_path = "/absolute/path/to/compiled/js"
# install_root = "/path/to/install/root"
# install_command = "npm install"
# runner = "karma"
"#;

/// Executes the init command with the provided arguments.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
///
/// # Returns
/// A Result indicating success or failure of the command execution
pub fn execute(output: PathBuf, force: bool) -> Result<()> {
    // Check if file already exists
    if output.exists() && !force {
        println!(
            "{}",
            t!("init.file_exists", path = output.display()).red()
        );
        println!("{}", t!("init.use_force").yellow());
        return Ok(());
    }

    // Create parent directories if needed
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init.create_parent_dir_failed", path = parent.display()).to_string()
            })?;
        }
    }

    fs::write(&output, DEFAULT_CONFIG)
        .with_context(|| t!("init.write_failed", path = output.display()).to_string())?;

    println!(
        "{}",
        t!("init.success", path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", path = output.display()));

    Ok(())
}
