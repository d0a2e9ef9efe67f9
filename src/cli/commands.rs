//! Command dispatch

use std::io;
use std::path::Path;
use std::time::Duration;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{HighlightCleared, TreeNodeConvert, HIGHLIGHT_DURATION};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::Viewport;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { file }) => _tree(cli, file),
        Some(Commands::View {
            file,
            toggles,
            expand_all,
        }) => _view(cli, file, toggles, *expand_all),
        Some(Commands::Simulate {
            file,
            toggles,
            interval_ms,
        }) => _simulate(cli, file, toggles, *interval_ms),
        Some(Commands::Check { file }) => _check(cli, file),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `orgchart --help`".to_string(),
        )),
    }
}

fn container(cli: &Cli, file: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(ServiceContainer::new(settings, file))
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, file: &Path) -> CliResult<()> {
    let container = container(cli, file)?;
    let controller = container.open_controller()?;
    output::info(&controller.tree().to_tree_string(&container.settings.display));
    Ok(())
}

#[instrument(skip(cli))]
fn _view(cli: &Cli, file: &Path, toggles: &[String], expand_all: bool) -> CliResult<()> {
    let container = container(cli, file)?;
    let mut session = container.open_session()?;
    let controller = session
        .controller_mut()
        .ok_or_else(|| CliError::Usage("chart is not ready".to_string()))?;

    if expand_all {
        controller.expand_all()?;
    }
    for id in toggles {
        let outcome = controller.toggle(id)?;
        debug!("{} collapsed={}", outcome.node_id, outcome.collapsed);
    }

    output::info(&controller.render().to_tree_string(&container.settings.display));
    Ok(())
}

#[instrument(skip(cli))]
fn _simulate(cli: &Cli, file: &Path, toggles: &[String], interval_ms: u64) -> CliResult<()> {
    let container = container(cli, file)?;
    let mut session = container.open_session()?;
    let controller = session
        .controller_mut()
        .ok_or_else(|| CliError::Usage("chart is not ready".to_string()))?;
    let mut viewport = container.viewport();
    let interval = Duration::from_millis(interval_ms);

    let print_cleared = |cleared: Vec<HighlightCleared>| {
        for c in cleared {
            output::event(c.at.as_millis(), "normal", &c.node_id);
        }
    };

    for (i, id) in toggles.iter().enumerate() {
        if i > 0 {
            print_cleared(controller.advance(interval));
        }
        let outcome = controller.toggle(id)?;
        output::event(
            controller.now().as_millis(),
            if outcome.collapsed { "collapse" } else { "expand" },
            &format!(
                "{} (highlighted until {}ms)",
                outcome.node_id,
                outcome.highlight_until.as_millis()
            ),
        );

        let layout = container.layout(&controller.render(), &viewport);
        for command in controller.run_frame(&layout, &mut viewport) {
            output::event(
                controller.now().as_millis(),
                "scroll",
                &format!(
                    "{} -> ({:.0}, {:.0}) {:?}",
                    command.node_id, command.left, command.top, command.behavior
                ),
            );
        }
    }

    // drain remaining highlight timers
    while let Some(deadline) = controller.next_deadline() {
        let elapsed = deadline.saturating_sub(controller.now());
        print_cleared(controller.advance(elapsed));
    }
    debug!(
        "settled at {}ms, highlight window {}ms",
        controller.now().as_millis(),
        HIGHLIGHT_DURATION.as_millis()
    );

    let (left, top) = viewport.scroll_position();
    output::header("Final chart");
    output::info(&controller.render().to_tree_string(&container.settings.display));
    output::detail(&format!("viewport scrolled to ({left:.0}, {top:.0})"));
    Ok(())
}

#[instrument(skip(cli))]
fn _check(cli: &Cli, file: &Path) -> CliResult<()> {
    let container = container(cli, file)?;
    let controller = container.open_controller()?;
    let stats = controller.tree().stats();
    output::success(&format!("{} is a valid hierarchy", file.display()));
    output::detail(&format!("organizations: {}", stats.organizations));
    output::detail(&format!("accounts:      {}", stats.accounts));
    output::detail(&format!("depth:         {}", stats.depth));
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!(
                    "global: {} ({})",
                    path.display(),
                    existence(&path)
                )),
                None => output::warning("no home directory, global config disabled"),
            }
            let local = cli.config.clone().unwrap_or_else(local_config_path);
            output::info(&format!("local:  {} ({})", local.display(), existence(&local)));
        }
    }
    Ok(())
}

fn existence(path: &Path) -> &'static str {
    if path.exists() {
        "exists"
    } else {
        "not found"
    }
}
