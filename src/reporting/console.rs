//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the resolved configuration at the start of a run and a
//! colored stage summary at its end, with internationalization support.
//!
//! 此模块在运行开始时打印解析后的配置，并在结束时打印彩色的阶段摘要，支持国际化。

use colored::*;
use crate::core::config::ResolvedConfig;
use crate::core::models::{Stage, StageFailure};
use crate::core::pipeline::PipelineReport;
use crate::infra::t;

/// Prints the values every later stage depends on.
///
/// 打印后续各阶段所依赖的值。
pub fn print_resolved_config(resolved: &ResolvedConfig) {
    println!("  basePath        = {}", resolved.base_path);
    println!("  karmaSetupPath  = {}", resolved.install_root.display());
    println!("  testModules     = {}", resolved.quoted_modules);
}

/// Prints a formatted summary of a pipeline run to the console.
/// Stages that never ran because an earlier one failed are listed as skipped.
///
/// 在控制台打印流水线运行的格式化摘要。因前面阶段失败而未运行的阶段会被标记为跳过。
///
/// # Output Format / 输出格式
/// ```text
/// --- Pipeline Summary (2026-01-01 12:00:00) ---
///   - Passed   | Configure                      |    120.00µs
///   - Failed   | Install dependencies           |      3.21s
///   - Skipped  | Install adapter                |        N/A
/// ```
pub fn print_summary(report: &PipelineReport, locale: &str) {
    println!(
        "\n{}",
        t!(
            "report.summary_banner",
            locale = locale,
            started = report.started_at.format("%Y-%m-%d %H:%M:%S")
        )
        .bold()
    );

    for stage in Stage::ALL {
        let record = report.records.iter().find(|record| record.stage == stage);
        let (status, duration_str) = match record {
            Some(record) if record.passed => (
                t!("report.status_passed", locale = locale).green(),
                format!("{:.2?}", record.duration),
            ),
            Some(record) => (
                t!("report.status_failed", locale = locale).red(),
                format!("{:.2?}", record.duration),
            ),
            None => (
                t!("report.status_skipped", locale = locale).dimmed(),
                "N/A".to_string(),
            ),
        };

        println!(
            "  - {:<10} | {:<30} | {:>10}",
            status,
            stage.display_name_in(locale),
            duration_str
        );
    }
}

/// Prints the failing stage and its error.
///
/// 打印失败的阶段及其错误。
pub fn print_failure_details(failure: &StageFailure, locale: &str) {
    println!("\n{}", t!("report.failure_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));
    println!(
        "{} '{}'",
        t!("report.failed_stage", locale = locale).red(),
        failure.stage.display_name_in(locale).cyan()
    );
    println!("  {}", failure.error);
    println!("{}", "-".repeat(80));
}
