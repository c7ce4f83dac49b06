//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use tracing::instrument;

use crate::application::{install_base_tree, ApplicationError};
use crate::cli::args::{Cli, Commands, ConfigCommands, TreeArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{
    parse_selection, propagate, BaseTree, BuildRequest, LiveTree, SelectionId, Topic, TopicNode,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

/// JSON shape of a build result.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildOutput<'a> {
    tree: &'a TopicNode,
    checked_ids: &'a [String],
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    // Commands that need no settings
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("get current directory", e))?,
    };
    let settings = Settings::load(Some(config_dir.as_path()))?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Build { tree, json } => cmd_build(&container, cli, tree, *json),
        Commands::Flatten { json } => cmd_flatten(&container, cli, *json),
        Commands::Selection { ids } => cmd_selection(ids),
        Commands::Canonical { names } => cmd_canonical(&container, names),
        Commands::Visibility { tree, hidden } => cmd_visibility(&container, cli, tree, hidden),
        Commands::Config { command } => cmd_config(&container, &config_dir, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn base_tree(container: &ServiceContainer, cli: &Cli) -> CliResult<&'static BaseTree> {
    let root = match &cli.base_tree {
        Some(path) => container.topic_tree.load_base_tree(path)?,
        None => container
            .topic_tree
            .load_configured_base_tree(&container.settings)?,
    };
    Ok(install_base_tree(root)?)
}

fn available_topics(container: &ServiceContainer, args: &TreeArgs) -> CliResult<Vec<Topic>> {
    let mut topics = match &args.topics {
        Some(path) => container.topic_tree.load_topics(path)?,
        None => Vec::new(),
    };
    topics.extend(args.topic.iter().map(|name| Topic::from(name.as_str())));
    Ok(topics)
}

#[instrument(level = "debug", skip(container, cli))]
fn cmd_build(
    container: &ServiceContainer,
    cli: &Cli,
    args: &TreeArgs,
    json: bool,
) -> CliResult<()> {
    let base = base_tree(container, cli)?;
    let topics = available_topics(container, args)?;
    let builder = container.topic_tree.builder(base, &container.settings);

    let mode = args.mode.unwrap_or(container.settings.display_mode);
    let built = builder.build(BuildRequest {
        checked_ids: &args.checked,
        display_mode: mode,
        available_topics: &topics,
    });

    if json {
        let out = BuildOutput {
            tree: &built.tree,
            checked_ids: &built.checked_ids,
        };
        output::info(&serde_json::to_string_pretty(&out).map_err(InfraError::from)?);
        return Ok(());
    }

    output::header(&format!("{} ({mode})", mode.label()));
    output::info(&built.tree.to_tree_string());
    if built.checked_ids_changed() {
        output::header("Checked ids");
        for id in built.checked_ids.iter() {
            if args.checked.contains(id) {
                output::detail(id);
            } else {
                output::diff_add(id);
            }
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip(container, cli))]
fn cmd_flatten(container: &ServiceContainer, cli: &Cli, json: bool) -> CliResult<()> {
    let base = base_tree(container, cli)?;
    let flat = base.flattened();

    if json {
        output::info(&serde_json::to_string_pretty(flat).map_err(InfraError::from)?);
        return Ok(());
    }
    for node in flat {
        match (&node.topic, &node.extension) {
            (Some(topic), _) => output::info(&format!("{}\t{}", node.name, topic)),
            (None, Some(extension)) => output::info(&format!("{}\tx:{}", node.name, extension)),
            (None, None) => output::info(&node.name),
        }
    }
    Ok(())
}

fn cmd_selection(ids: &[String]) -> CliResult<()> {
    if ids.is_empty() {
        return Err(CliError::InvalidArgs("no selection ids given".into()));
    }
    for id in ids {
        if SelectionId::parse(id).is_none() {
            output::warning(&format!("ignoring unrecognized selection id '{id}'"));
        }
    }
    let selection = parse_selection(ids);

    output::header("Topics");
    for topic in &selection.selected_topics {
        output::detail(topic);
    }
    output::header("Extensions");
    for extension in &selection.selected_extensions {
        output::detail(extension);
    }
    Ok(())
}

fn cmd_canonical(container: &ServiceContainer, names: &[String]) -> CliResult<()> {
    let prefix = container.settings.source_groups().prefix;
    for name in prefix.strip_source_prefix(names) {
        output::info(&name);
    }
    Ok(())
}

#[instrument(level = "debug", skip(container, cli))]
fn cmd_visibility(
    container: &ServiceContainer,
    cli: &Cli,
    args: &TreeArgs,
    hidden: &[String],
) -> CliResult<()> {
    let base = base_tree(container, cli)?;
    let topics = available_topics(container, args)?;
    let builder = container.topic_tree.builder(base, &container.settings);

    let built = builder.build(BuildRequest {
        checked_ids: &args.checked,
        display_mode: args.mode.unwrap_or(container.settings.display_mode),
        available_topics: &topics,
    });

    let mut live = LiveTree::from_topic_node(&built.tree);
    propagate(&mut live, hidden);

    output::info(&live.to_tree_string());
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    config_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path().ok_or_else(|| ApplicationError::Config {
                message: "cannot determine config directory".into(),
            })?;
            print_config_path(container, "Global", &global);
            print_config_path(container, "Local", &local_config_path(config_dir));
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
    }
    Ok(())
}

fn print_config_path(container: &ServiceContainer, label: &str, path: &Path) {
    let status = if container.fs.exists(path) {
        "exists"
    } else {
        "not found"
    };
    output::action(label, &format!("{} ({})", path.display(), status));
}
