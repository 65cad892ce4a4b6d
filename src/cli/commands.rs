use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::cli::parse::{parse_expression, split_values};
use crate::config::{global_config_path, OutputFormat, Settings};
use crate::domain::ExpressionTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_with(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Runs `cli` writing results to `out`.
///
/// Settings are loaded only by the commands that use them, so a broken config
/// file does not block `config path` or `completion`.
pub fn execute_command_with(cli: &Cli, out: &mut impl Write) -> CliResult<()> {
    match &cli.command {
        Commands::Build { tokens } => _build(tokens, &effective_settings(cli)?, out),
        Commands::All { values } => _all(values, &effective_settings(cli)?, out),
        Commands::Any { values } => _any(values, &effective_settings(cli)?, out),
        Commands::Config { command } => match command {
            ConfigCommands::Show => _config_show(&effective_settings(cli)?, out),
            ConfigCommands::Path => _config_path(out),
        },
        Commands::Completion { shell } => _completion(*shell, out),
    }
}

/// Loaded settings with command-line flags applied on top.
pub fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        settings.output.format = format;
    }
    if cli.no_color {
        settings.output.color = false;
    }
    if !settings.output.color {
        output::disable_color();
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

/// Formats `tree` according to `settings.output.format`.
pub fn format_tree(tree: &ExpressionTree<String>, settings: &Settings) -> CliResult<String> {
    let formatted = match settings.output.format {
        OutputFormat::Infix => settings.style()?.render(tree),
        OutputFormat::Tree => settings.style()?.to_tree(tree).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(tree)?,
    };
    Ok(formatted)
}

#[instrument(skip(settings, out))]
fn _build(tokens: &[String], settings: &Settings, out: &mut impl Write) -> CliResult<()> {
    let tree = parse_expression(tokens)?;
    output::info(out, format_tree(&tree, settings)?.trim_end())?;
    Ok(())
}

#[instrument(skip(settings, out))]
fn _all(values: &[String], settings: &Settings, out: &mut impl Write) -> CliResult<()> {
    let tree = ExpressionTree::and_operator(split_values(values))?;
    output::info(out, format_tree(&tree, settings)?.trim_end())?;
    Ok(())
}

#[instrument(skip(settings, out))]
fn _any(values: &[String], settings: &Settings, out: &mut impl Write) -> CliResult<()> {
    let tree = ExpressionTree::or_operator(split_values(values))?;
    output::info(out, format_tree(&tree, settings)?.trim_end())?;
    Ok(())
}

fn _config_show(settings: &Settings, out: &mut impl Write) -> CliResult<()> {
    output::header(out, "# effective settings")?;
    output::info(out, settings.to_toml()?.trim_end())?;
    Ok(())
}

fn _config_path(out: &mut impl Write) -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::info(out, &path.display())?,
        None => output::info(out, "no config directory available")?,
    }
    Ok(())
}

fn _completion(shell: Shell, out: &mut impl Write) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    // generate() cannot report write failures, so render into memory first
    let mut script = Vec::new();
    generate(shell, &mut cmd, name, &mut script);
    out.write_all(&script)?;
    Ok(())
}
