//! # Installers Module / 安装器模块
//!
//! Materializes the two bundles onto disk:
//! - the `lib` bundle is rewritten line by line into the install root,
//! - the `karmaGWT` bundle is copied verbatim into `node_modules/karma-gwt`.
//!
//! Each call opens its bundle, walks every entry and drops the bundle before
//! returning. Files written before a failure are left in place.
//!
//! 将两个资源包写入磁盘：
//! - `lib` 资源包逐行重写到安装根目录，
//! - `karmaGWT` 资源包原样复制到 `node_modules/karma-gwt`。
//!
//! 每次调用都会打开资源包、遍历所有条目，并在返回前释放资源包。失败前已写入的文件会保留。

use colored::*;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::models::{MainConfigRef, PipelineError};
use crate::core::template::Substitutions;
use crate::infra::bundle::BundleSource;
use crate::infra::fs::ensure_dir;
use crate::infra::t;

/// Bundle holding the templated Karma setup.
pub const LIB_BUNDLE: &str = "lib";

/// Bundle holding the GWT adapter plugin.
pub const ADAPTER_BUNDLE: &str = "karmaGWT";

/// Directory name of the adapter under `node_modules`.
pub const ADAPTER_INSTALL_NAME: &str = "karma-gwt";

/// The `lib` entry whose installed path is handed to `karma start`.
pub const MAIN_CONFIG_FILE: &str = "karma.conf.js";

/// Where the adapter bundle is installed for a given install root.
pub fn adapter_dir(install_root: &Path) -> PathBuf {
    install_root.join("node_modules").join(ADAPTER_INSTALL_NAME)
}

/// Rewrites every entry of the `lib` bundle into `install_root`.
///
/// Each entry is read fully as UTF-8 lines, every line goes through
/// `subs`, and the result replaces `install_root/<file name>`. The
/// destination of `karma.conf.js` is recorded in `main_config`.
///
/// # Returns
/// The written paths, in bundle order.
///
/// # Errors
/// The first read or write error, tagged with the offending path.
pub fn install_templates<S: BundleSource + ?Sized>(
    source: &S,
    install_root: &Path,
    subs: Substitutions<'_>,
    main_config: &mut MainConfigRef,
) -> Result<Vec<PathBuf>, PipelineError> {
    ensure_dir(install_root)?;
    let bundle = source.open(LIB_BUNDLE)?;
    let mut written = Vec::with_capacity(bundle.entries().len());

    for entry in bundle.entries() {
        let reader = BufReader::new(bundle.open_entry(entry)?);
        let lines = reader
            .lines()
            .map(|line| line.map(|line| subs.apply(&line)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PipelineError::io(entry.locator(), e))?;

        let dest = install_root.join(&entry.file_name);
        write_lines(&dest, &lines)?;

        if entry.file_name == MAIN_CONFIG_FILE {
            main_config.set(dest.clone())?;
        }
        println!("  {}", t!("install.file_written", path = dest.display()).dimmed());
        written.push(dest);
    }

    Ok(written)
}

/// Copies every entry of the `karmaGWT` bundle, byte for byte, into
/// `install_root/node_modules/karma-gwt/`, replacing existing files.
///
/// # Returns
/// The written paths, in bundle order.
pub fn install_assets<S: BundleSource + ?Sized>(
    source: &S,
    install_root: &Path,
) -> Result<Vec<PathBuf>, PipelineError> {
    let target_dir = adapter_dir(install_root);
    ensure_dir(&target_dir)?;
    let bundle = source.open(ADAPTER_BUNDLE)?;
    let mut written = Vec::with_capacity(bundle.entries().len());

    for entry in bundle.entries() {
        let dest = target_dir.join(&entry.file_name);
        bundle.copy_entry(entry, &dest)?;
        println!("  {}", t!("install.file_copied", path = dest.display()).dimmed());
        written.push(dest);
    }

    Ok(written)
}

fn write_lines(dest: &Path, lines: &[String]) -> Result<(), PipelineError> {
    let file = fs::File::create(dest).map_err(|e| PipelineError::io(dest, e))?;
    let mut out = BufWriter::new(file);
    for line in lines {
        writeln!(out, "{line}").map_err(|e| PipelineError::io(dest, e))?;
    }
    out.flush().map_err(|e| PipelineError::io(dest, e))
}
