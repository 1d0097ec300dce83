// Shared test helpers for integration tests
#![allow(dead_code)]

use karma_runner::config::RunConfig;
use karma_runner::infra::command::{CommandSpec, Launcher};
use karma_runner::models::{PipelineError, ProcessOutcome};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const KARMA_CONF: &str = r#"module.exports = function (config) {
  config.set({
    basePath: '%BASE_PATH%',
    client: { gwt: { testModules: ['%TEST_MODULE%'] } },
    singleRun: true
  });
};
"#;

pub const PACKAGE_JSON: &str = r#"{ "name": "fixture", "private": true }
"#;

/// Bytes that are not valid UTF-8, to prove adapter files are copied verbatim.
pub const ADAPTER_BYTES: &[u8] = &[0x00, 0xff, 0xfe, b'%', b'B', b'A', b'S', b'E', 0x0a, 0x80];

/// Creates `<root>/lib` and `<root>/karmaGWT` bundles for a `DirectorySource`.
///
/// Directory layout:
/// root/
/// ├── lib/
/// │   ├── karma.conf.js
/// │   └── package.json
/// └── karmaGWT/
///     ├── adapter.bin
///     └── index.js
pub fn create_bundle_fixture(root: &Path) -> PathBuf {
    let lib = root.join("lib");
    let adapter = root.join("karmaGWT");
    fs::create_dir_all(&lib).expect("Failed to create lib bundle");
    fs::create_dir_all(&adapter).expect("Failed to create karmaGWT bundle");

    fs::write(lib.join("karma.conf.js"), KARMA_CONF).unwrap();
    fs::write(lib.join("package.json"), PACKAGE_JSON).unwrap();
    fs::write(adapter.join("adapter.bin"), ADAPTER_BYTES).unwrap();
    fs::write(adapter.join("index.js"), "module.exports = {};\n").unwrap();

    root.to_path_buf()
}

/// Same as `create_bundle_fixture`, but the `lib` bundle has no `karma.conf.js`.
pub fn create_bundle_fixture_without_main_config(root: &Path) -> PathBuf {
    create_bundle_fixture(root);
    fs::remove_file(root.join("lib").join("karma.conf.js")).unwrap();
    root.to_path_buf()
}

/// A run configuration installing into `<work>/install` with output `<work>/build`.
pub fn base_config(work: &Path) -> RunConfig {
    RunConfig {
        output_directory: work.join("build"),
        artifact_id: Some("proj".to_string()),
        version: Some("1.0".to_string()),
        test_modules: vec!["myapp.Tests".to_string()],
        install_root: Some(work.join("install")),
        ..RunConfig::default()
    }
}

/// What a scripted launch should do.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    Exit(i32),
    LaunchError,
}

/// A launcher that records every command and answers from a script.
/// Commands beyond the end of the script exit with 0.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    script: RefCell<VecDeque<Script>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl RecordingLauncher {
    pub fn new(script: impl IntoIterator<Item = Script>) -> Self {
        Self {
            script: RefCell::new(script.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    async fn launch(&self, spec: &CommandSpec) -> Result<ProcessOutcome, PipelineError> {
        self.calls.borrow_mut().push(spec.clone());
        match self.script.borrow_mut().pop_front().unwrap_or(Script::Exit(0)) {
            Script::Exit(code) => Ok(ProcessOutcome::from_code(code)),
            Script::LaunchError => Err(PipelineError::Launch {
                program: spec.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
            }),
        }
    }
}
