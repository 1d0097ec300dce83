//! # CLI Commands / 命令行命令
//!
//! - `run` - Install the Karma setup and run the tests
//! - `init` - Write a starter configuration file
//!
//! - `run` - 安装 Karma 配置并运行测试
//! - `init` - 写入初始配置文件

pub mod init;
pub mod run;
