//! # Reporting Module / 报告模块
//!
//! This module handles the display of pipeline progress and results in the console,
//! with colorful output and internationalization support.
//!
//! 此模块处理流水线进度和结果在控制台中的显示，支持彩色输出和国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{print_failure_details, print_resolved_config, print_summary};
