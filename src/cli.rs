// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::core::config::ConfigOverrides;
use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

fn path_arg(id: &'static str, long: &'static str, value_name: &'static str, help: String) -> Arg {
    Arg::new(id)
        .long(long)
        .help(help)
        .value_name(value_name)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn string_arg(id: &'static str, long: &'static str, value_name: &'static str, help: String) -> Arg {
    Arg::new(id)
        .long(long)
        .help(help)
        .value_name(value_name)
        .action(ArgAction::Set)
}

pub fn build_cli() -> Command {
    Command::new("karma-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about").to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang").to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cli.run_about").to_string())
                .arg(
                    path_arg("config", "config", "CONFIG", t!("arg.config").to_string())
                        .short('c'),
                )
                .arg(
                    path_arg("output-dir", "output-dir", "OUTPUT_DIR", t!("arg.output_dir").to_string())
                        .short('o'),
                )
                .arg(string_arg(
                    "artifact-id",
                    "artifact-id",
                    "ARTIFACT_ID",
                    t!("arg.artifact_id").to_string(),
                ))
                .arg(string_arg(
                    "project-version",
                    "project-version",
                    "VERSION",
                    t!("arg.project_version").to_string(),
                ))
                .arg(string_arg(
                    "test-runner",
                    "test-runner",
                    "TEST_RUNNER",
                    t!("arg.test_runner").to_string(),
                ))
                .arg(
                    Arg::new("test-module")
                        .short('m')
                        .long("test-module")
                        .help(t!("arg.test_module").to_string())
                        .value_name("MODULE")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(string_arg(
                    "base-path",
                    "base-path",
                    "BASE_PATH",
                    t!("arg.base_path").to_string(),
                ))
                .arg(path_arg(
                    "install-root",
                    "install-root",
                    "INSTALL_ROOT",
                    t!("arg.install_root").to_string(),
                ))
                .arg(string_arg(
                    "install-command",
                    "install-command",
                    "COMMAND",
                    t!("arg.install_command").to_string(),
                ))
                .arg(string_arg(
                    "runner",
                    "runner",
                    "RUNNER",
                    t!("arg.runner").to_string(),
                ))
                .arg(path_arg(
                    "resources-dir",
                    "resources-dir",
                    "RESOURCES_DIR",
                    t!("arg.resources_dir").to_string(),
                )),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cli.init_about").to_string())
                .arg(
                    path_arg("output", "output", "OUTPUT", t!("arg.init_output").to_string())
                        .default_value("KarmaRun.toml"),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg.force").to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    match &language {
        Some(lang) => crate::set_locale(lang),
        None => crate::init(),
    }

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let overrides = ConfigOverrides {
                output_directory: run_matches.get_one::<PathBuf>("output-dir").cloned(),
                artifact_id: run_matches.get_one::<String>("artifact-id").cloned(),
                version: run_matches.get_one::<String>("project-version").cloned(),
                test_runner: run_matches.get_one::<String>("test-runner").cloned(),
                test_modules: run_matches
                    .get_many::<String>("test-module")
                    .map(|values| values.cloned().collect()),
                base_path: run_matches.get_one::<String>("base-path").cloned(),
                install_root: run_matches.get_one::<PathBuf>("install-root").cloned(),
                install_command: run_matches.get_one::<String>("install-command").cloned(),
                runner: run_matches.get_one::<String>("runner").cloned(),
            };

            commands::run::execute(commands::run::RunArgs {
                config: run_matches.get_one::<PathBuf>("config").cloned(),
                overrides,
                resources_dir: run_matches.get_one::<PathBuf>("resources-dir").cloned(),
                language,
            })
            .await?;
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("KarmaRun.toml"));
            let force = init_matches.get_flag("force");
            commands::init::execute(output, force)?;
        }
        _ => {
            // No subcommand: print help and exit successfully.
            build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
