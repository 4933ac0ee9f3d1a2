//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::render::RendererKind;
use crate::application::services::SourceService;
use crate::application::{ApplicationError, MenuBuilder};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::menu_tree_string;
use crate::infrastructure::di::ServiceContainer;
use crate::util::path::{expand_path, source_dir};

pub fn execute(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Render {
            source,
            menu,
            format,
            active,
            options,
        }) => render(cli, source, menu.as_deref(), *format, active, options),
        Some(Commands::Tree { source, menu }) => tree(cli, source, menu.as_deref()),
        Some(Commands::Check { source }) => check(cli, source),
        Some(Commands::Export {
            source,
            menu,
            output,
        }) => export(cli, source, menu.as_deref(), output.as_deref()),
        Some(Commands::Config { command }) => config(cli, command),
        Some(Commands::Completion { shell }) => completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see 'navmenu --help'".to_string(),
        )),
    }
}

/// Directory searched for `.navmenu.toml`.
fn config_dir(cli: &Cli, source: Option<&Path>) -> PathBuf {
    match (&cli.config_dir, source) {
        (Some(dir), _) => expand_path(dir),
        (None, Some(source)) => source_dir(source),
        (None, None) => PathBuf::from("."),
    }
}

fn container(cli: &Cli, source: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(&config_dir(cli, Some(source))))?;
    Ok(ServiceContainer::new(settings))
}

/// Import the source into a fresh builder; with `menu`, only that menu.
fn load_menu(
    container: &ServiceContainer,
    source: &Path,
    menu: Option<&str>,
    format: Option<RendererKind>,
) -> CliResult<MenuBuilder> {
    let value = container.source_service.load(source)?;
    let mut builder = container.menu_builder(format);
    builder.import_source(&value, menu, &[])?;
    debug!(menu = builder.current_id(), "menu loaded");
    Ok(builder)
}

#[instrument(skip(cli))]
fn render(
    cli: &Cli,
    source: &Path,
    menu: Option<&str>,
    format: Option<RendererKind>,
    active: &[String],
    options: &[(String, String)],
) -> CliResult<()> {
    let source = expand_path(source);
    let container = container(cli, &source)?;
    let mut builder = load_menu(&container, &source, menu, format)?;
    for key in active {
        builder.activate(key)?;
    }

    let overrides = if options.is_empty() {
        None
    } else {
        Some(builder.parse_render_options(options)?)
    };
    let rendered = builder.render(overrides.as_ref(), None)?;
    output::info(rendered.to_string().trim_end());
    Ok(())
}

#[instrument(skip(cli))]
fn tree(cli: &Cli, source: &Path, menu: Option<&str>) -> CliResult<()> {
    let source = expand_path(source);
    let container = container(cli, &source)?;
    let builder = load_menu(&container, &source, menu, None)?;
    output::info(&menu_tree_string(builder.current_id(), &builder.build()));
    Ok(())
}

#[instrument(skip(cli))]
fn check(cli: &Cli, source: &Path) -> CliResult<()> {
    let source = expand_path(source);
    let container = container(cli, &source)?;
    let builder = load_menu(&container, &source, None, None)?;

    output::success(&format!("{} is valid", source.display()));
    for (id, records) in builder.export_all() {
        if records.is_empty() {
            output::warning(&format!("menu '{id}' has no items"));
        } else {
            output::success_detail(&format!("{id}: {} items", records.len()));
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn export(cli: &Cli, source: &Path, menu: Option<&str>, target: Option<&Path>) -> CliResult<()> {
    let source = expand_path(source);
    let container = container(cli, &source)?;
    let builder = load_menu(&container, &source, menu, None)?;

    let exported = match menu {
        Some(id) => serde_json::to_value(builder.export_source(id).cloned().unwrap_or_default()),
        None => serde_json::to_value(builder.export_all()),
    }
    .map_err(|e| ApplicationError::OperationFailed {
        context: "serialize menu source".to_string(),
        source: Box::new(e),
    })?;

    match target {
        Some(path) => {
            let path = expand_path(path);
            container.source_service.write_json(&path, &exported)?;
            output::action("Exported", &path.display());
        }
        None => output::info(&SourceService::to_json(&exported)?),
    }
    Ok(())
}

fn config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    let dir = config_dir(cli, None);
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(&dir))?;
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence)");
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<no config directory>".to_string());
            output::detail(&format!("global: {global}"));
            output::detail(&format!("local:  {}", local_config_path(&dir).display()));
            output::detail("env:    NAVMENU_*");
        }
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
