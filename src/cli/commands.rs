//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings, Variant};
use crate::domain::{Arguments, MenuDemand};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::Catalog;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Filter {
            catalog,
            query,
            json,
        }) => cmd_filter(cli.config.as_deref(), catalog, query, *json),
        Some(Commands::Paginate {
            total,
            query,
            variant,
            json,
        }) => cmd_paginate(cli.config.as_deref(), *total, query, *variant, *json),
        Some(Commands::Config { command }) => cmd_config(cli.config.as_deref(), command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".into(),
        )),
    }
}

fn print_json(value: &impl Serialize) -> CliResult<()> {
    output::info(&serde_json::to_string_pretty(value)?);
    Ok(())
}

#[instrument]
fn cmd_filter(config: Option<&Path>, catalog: &Path, query: &str, json: bool) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let catalog = Arc::new(Catalog::load(catalog)?);
    let container = ServiceContainer::new(settings, catalog.clone())?.with_potential_checker(catalog);

    let arguments = Arguments::from_query(query);
    let demand = MenuDemand::from_arguments(&arguments);
    debug!("demand: {:?}", demand);

    let service = container.filter_service();
    let Some(filter) = service.build(&arguments, Some(&demand))? else {
        output::warning("filter is inactive or has no categories configured");
        return Ok(());
    };

    if json {
        return print_json(&filter);
    }
    let titles = service.active_category_titles(&arguments)?;
    if !titles.is_empty() {
        output::action("Selected", &titles.join(", "));
    }
    print!("{}", output::render_filter(&filter));
    Ok(())
}

#[instrument]
fn cmd_paginate(
    config: Option<&Path>,
    total: usize,
    query: &str,
    variant: Option<Variant>,
    json: bool,
) -> CliResult<()> {
    let mut settings = Settings::load(config)?;
    if let Some(variant) = variant {
        settings.pagination.variant = variant;
    }
    let container = ServiceContainer::new(settings, Arc::new(Catalog::default()))?;
    let service = container.pagination_service();

    let arguments = Arguments::from_query(query);
    let pagination = service.build(total, &arguments);
    let head = service.head_links(total, &arguments);

    if json {
        return print_json(&serde_json::json!({
            "pagination": pagination,
            "headLinks": head,
        }));
    }
    let window = service.window(total, &arguments);
    output::header(&format!(
        "page {} of {} ({} items)",
        window.current_page, window.number_of_pages, total
    ));
    print!("{}", output::render_pagination(&pagination, &head));
    Ok(())
}

#[instrument]
fn cmd_config(config: Option<&Path>, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(config)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) if path.exists() => output::action("global", &path.display()),
                Some(path) => output::detail(&format!("global: {} (not found)", path.display())),
                None => output::detail(&"global: (no config directory)"),
            }
            if let Some(path) = config {
                output::action("local", &path.display());
            }
        }
    }
    Ok(())
}
