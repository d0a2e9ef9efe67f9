//! Tests for argument parsing and command dispatch

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tempfile::TempDir;

use orgchart::cli::args::{Cli, Commands, ConfigCommands};
use orgchart::cli::commands::execute_command;
use orgchart::exitcode;

fn resource(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
        .display()
        .to_string()
}

fn run(args: &[&str]) -> Result<(), i32> {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    execute_command(&cli).map_err(|e| e.exit_code())
}

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn given_repeated_flags_when_parsing_then_collects_toggles_and_verbosity() {
    let cli = Cli::try_parse_from([
        "orgchart", "-dd", "view", "chart.json", "-t", "2", "--toggle", "3",
    ])
    .unwrap();

    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::View {
            file,
            toggles,
            expand_all,
        }) => {
            assert_eq!(file, PathBuf::from("chart.json"));
            assert_eq!(toggles, vec!["2", "3"]);
            assert!(!expand_all);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn given_simulate_without_toggles_when_parsing_then_rejected() {
    assert!(Cli::try_parse_from(["orgchart", "simulate", "chart.json"]).is_err());
}

#[test]
fn given_simulate_when_parsing_then_interval_defaults() {
    let cli = Cli::try_parse_from(["orgchart", "simulate", "chart.json", "-t", "1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Simulate {
            interval_ms: 250,
            ..
        })
    ));
}

#[test]
fn given_config_path_when_parsing_then_subcommand_is_recognised() {
    let cli = Cli::try_parse_from(["orgchart", "config", "path"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Path
        })
    ));
}

#[test]
fn given_valid_records_when_checking_then_succeeds() {
    assert_eq!(run(&["orgchart", "check", &resource("records.json")]), Ok(()));
}

#[test]
fn given_valid_records_when_viewing_with_toggle_then_succeeds() {
    let file = resource("org_tiers.json");
    assert_eq!(run(&["orgchart", "view", &file, "-t", "b1"]), Ok(()));
}

#[test]
fn given_toggles_when_simulating_then_succeeds() {
    let file = resource("records.json");
    assert_eq!(
        run(&["orgchart", "simulate", &file, "-t", "2", "-t", "2", "-i", "100"]),
        Ok(())
    );
}

#[test]
fn given_dangling_parent_when_checking_then_dataerr() {
    assert_eq!(
        run(&["orgchart", "check", &resource("dangling.json")]),
        Err(exitcode::DATAERR)
    );
}

#[test]
fn given_missing_file_when_viewing_then_noinput() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.json").display().to_string();
    assert_eq!(run(&["orgchart", "view", &missing]), Err(exitcode::NOINPUT));
}

#[test]
fn given_account_toggle_when_viewing_then_usage_error() {
    let file = resource("records.json");
    assert_eq!(
        run(&["orgchart", "view", &file, "-t", "3"]),
        Err(exitcode::USAGE)
    );
}

#[test]
fn given_missing_config_file_when_running_then_config_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("absent.toml").display().to_string();
    assert_eq!(
        run(&["orgchart", "--config", &config, "tree", &resource("records.json")]),
        Err(exitcode::CONFIG)
    );
}

#[test]
fn given_no_command_when_running_then_usage_error() {
    assert_eq!(run(&["orgchart"]), Err(exitcode::USAGE));
}
