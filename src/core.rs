//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Karma Runner: configuration
//! resolution, placeholder rewriting, the two installers and the stage pipeline
//! that drives them.
//!
//! 此模块包含 Karma Runner 的核心功能：
//! 配置解析、占位符重写、两个安装器以及驱动它们的阶段流水线。

pub mod config;
pub mod install;
pub mod models;
pub mod pipeline;
pub mod template;

// Re-exports
pub use config::{ResolvedConfig, RunConfig};
pub use models::{PipelineError, Stage, StageFailure};
pub use pipeline::{Pipeline, PipelineReport};
