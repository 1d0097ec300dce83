//! # Karma Runner Library / Karma Runner 库
//!
//! This library provides the core functionality for the Karma Runner tool,
//! which materializes a bundled Karma setup into a build directory and then
//! drives `npm` and `karma` to run JavaScript tests as a build step.
//!
//! 此库为 Karma Runner 工具提供核心功能，
//! 它将内置的 Karma 配置写入构建目录，然后驱动 `npm` 和 `karma` 作为构建步骤运行 JavaScript 测试。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration resolution, template rewriting, installers and the stage pipeline
//! - `infra` - Infrastructure services like resource bundles and process launching
//! - `reporting` - Console summaries of a pipeline run
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 配置解析、模板重写、安装器和阶段流水线
//! - `infra` - 基础设施服务，如资源包和进程启动
//! - `reporting` - 流水线运行的控制台摘要
//! - `cli` - 命令行接口和命令

pub mod core;
pub mod infra;
pub mod reporting;
pub mod cli;

// Re-export commonly used items
pub use core::config;
pub use core::models;
pub use core::pipeline;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    set_locale(&locale);
}

/// Sets the active locale, matching the full tag first, then its language part,
/// and falling back to "en".
pub fn set_locale(locale: &str) {
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&locale) {
        locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
