//! # Resource Bundle Module / 资源包模块
//!
//! A bundle is a named, read-only set of flat files shipped with the tool.
//! Bundles are compiled into the binary from `resources/<name>/` with
//! `rust-embed`, or read from a directory on disk when one is configured.
//!
//! 资源包是随工具一起提供的、命名的只读扁平文件集合。
//! 资源包通过 `rust-embed` 从 `resources/<name>/` 编译进二进制文件，
//! 或在配置了目录时从磁盘读取。

use fs_extra::file::{self, CopyOptions};
use rust_embed::RustEmbed;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::core::models::PipelineError;
use crate::infra::fs::is_directory;

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Resources;

/// One file of a bundle.
/// 资源包中的一个文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    /// Bare file name, used as the destination name on install.
    /// 纯文件名，安装时用作目标文件名。
    pub file_name: String,
    locator: PathBuf,
}

impl BundleEntry {
    /// Where the entry lives inside its source: an embedded key or a file path.
    pub fn locator(&self) -> &Path {
        &self.locator
    }
}

/// An opened bundle. Entries are listed once, in file-name order.
/// A bundle always has at least one entry: sources report a missing or
/// empty bundle as `PipelineError::BundleNotFound`.
///
/// 已打开的资源包。条目只列出一次，按文件名排序。
/// 资源包至少包含一个条目：缺失或为空的资源包均报告为 `PipelineError::BundleNotFound`。
pub trait ResourceBundle {
    fn name(&self) -> &str;

    fn entries(&self) -> &[BundleEntry];

    /// Opens an entry for streaming reads.
    fn open_entry(&self, entry: &BundleEntry) -> Result<Box<dyn Read + '_>, PipelineError>;

    /// Copies an entry's bytes to `dest`, replacing any existing file.
    /// Returns the number of bytes written.
    ///
    /// 将条目的字节复制到 `dest`，替换任何已存在的文件。返回写入的字节数。
    fn copy_entry(&self, entry: &BundleEntry, dest: &Path) -> Result<u64, PipelineError> {
        let mut reader = self.open_entry(entry)?;
        let mut out = fs::File::create(dest).map_err(|e| PipelineError::io(dest, e))?;
        io::copy(&mut reader, &mut out).map_err(|e| PipelineError::io(dest, e))
    }
}

/// Something that can open bundles by logical name.
/// 可以按逻辑名称打开资源包的来源。
pub trait BundleSource {
    fn open(&self, name: &str) -> Result<Box<dyn ResourceBundle>, PipelineError>;
}

/// Bundles compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSource;

struct EmbeddedBundle {
    name: String,
    entries: Vec<BundleEntry>,
}

impl BundleSource for EmbeddedSource {
    fn open(&self, name: &str) -> Result<Box<dyn ResourceBundle>, PipelineError> {
        let prefix = format!("{name}/");
        let mut entries: Vec<BundleEntry> = Resources::iter()
            .filter_map(|key| {
                let file_name = key.strip_prefix(&prefix)?;
                // Only direct children belong to the bundle.
                if file_name.is_empty() || file_name.contains('/') {
                    return None;
                }
                Some(BundleEntry {
                    file_name: file_name.to_string(),
                    locator: PathBuf::from(key.as_ref()),
                })
            })
            .collect();

        if entries.is_empty() {
            return Err(PipelineError::BundleNotFound(name.to_string()));
        }
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        Ok(Box::new(EmbeddedBundle {
            name: name.to_string(),
            entries,
        }))
    }
}

impl ResourceBundle for EmbeddedBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    fn open_entry(&self, entry: &BundleEntry) -> Result<Box<dyn Read + '_>, PipelineError> {
        let key = entry.locator.to_string_lossy();
        let embedded = Resources::get(&key).ok_or_else(|| {
            PipelineError::io(
                &entry.locator,
                io::Error::new(io::ErrorKind::NotFound, "embedded resource missing"),
            )
        })?;
        Ok(Box::new(Cursor::new(embedded.data)))
    }
}

/// Bundles read from `<root>/<name>/` on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

struct DirectoryBundle {
    name: String,
    entries: Vec<BundleEntry>,
}

impl BundleSource for DirectorySource {
    fn open(&self, name: &str) -> Result<Box<dyn ResourceBundle>, PipelineError> {
        let dir = self.root.join(name);
        if !is_directory(&dir) {
            return Err(PipelineError::BundleNotFound(name.to_string()));
        }

        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&dir).map_err(|e| PipelineError::io(&dir, e))? {
            let dir_entry = dir_entry.map_err(|e| PipelineError::io(&dir, e))?;
            let path = dir_entry.path();
            // Follows symlinks, so linked files count as entries.
            if !path.is_file() {
                continue;
            }
            entries.push(BundleEntry {
                file_name: dir_entry.file_name().to_string_lossy().into_owned(),
                locator: path,
            });
        }

        if entries.is_empty() {
            return Err(PipelineError::BundleNotFound(name.to_string()));
        }
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        Ok(Box::new(DirectoryBundle {
            name: name.to_string(),
            entries,
        }))
    }
}

impl ResourceBundle for DirectoryBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    fn open_entry(&self, entry: &BundleEntry) -> Result<Box<dyn Read + '_>, PipelineError> {
        let reader = fs::File::open(&entry.locator).map_err(|e| PipelineError::io(&entry.locator, e))?;
        Ok(Box::new(reader))
    }

    fn copy_entry(&self, entry: &BundleEntry, dest: &Path) -> Result<u64, PipelineError> {
        let mut options = CopyOptions::new();
        options.overwrite = true;
        file::copy(&entry.locator, dest, &options)
            .map_err(|e| PipelineError::io(dest, io::Error::other(e.to_string())))
    }
}

/// Chooses the on-disk source when a directory is given, the embedded one otherwise.
pub fn source_for(resources_dir: Option<&Path>) -> Box<dyn BundleSource> {
    match resources_dir {
        Some(dir) => Box::new(DirectorySource::new(dir)),
        None => Box::new(EmbeddedSource),
    }
}

impl<S: BundleSource + ?Sized> BundleSource for Box<S> {
    fn open(&self, name: &str) -> Result<Box<dyn ResourceBundle>, PipelineError> {
        (**self).open(name)
    }
}
