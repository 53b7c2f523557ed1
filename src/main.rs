mod cli;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use orgtree::model::OrgNode;
use orgtree::{load, output, query, tui};

fn default_org_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".orgtree").join("org.json"))
}

fn resolve_org_path(cli_file: Option<String>) -> Result<String> {
    match cli_file {
        Some(p) => Ok(p),
        None => {
            let path = default_org_path()?;
            Ok(path
                .to_str()
                .context("default dataset path is not valid UTF-8")?
                .to_string())
        }
    }
}

/// Dispatch a single parsed read command against a loaded tree.
fn dispatch(org: &OrgNode, command: Command) -> Result<()> {
    match command {
        Command::Show { id, json } => {
            let node = match id.as_deref() {
                Some(id) => {
                    query::find(org, id).with_context(|| format!("no node with id '{id}'"))?
                }
                None => org,
            };
            let detail = output::NodeDetail::new(org, node);
            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print!("{}", output::format_node_detail(&detail));
            }
        }

        Command::List {
            tree,
            role,
            depth,
            json,
        } => {
            if tree {
                if json {
                    println!("{}", serde_json::to_string_pretty(org)?);
                } else {
                    print!("{}", output::format_org_tree(org, depth));
                }
            } else {
                let mut nodes = query::directory(org);
                if let Some(role) = &role {
                    let role = role.to_lowercase();
                    nodes.retain(|n| n.role.to_lowercase().contains(&role));
                }
                let entries: Vec<output::DirectoryEntry> = nodes
                    .iter()
                    .map(|n| output::DirectoryEntry::new(org, n))
                    .collect();
                if json {
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else {
                    print!("{}", output::format_directory(&entries));
                }
            }
        }

        Command::Search { query: q, json } => {
            let matches = query::search(org, &q);
            if json {
                let entries: Vec<output::DirectoryEntry> = matches
                    .iter()
                    .map(|n| output::DirectoryEntry::new(org, n))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", output::format_search_results(org, &matches));
            }
        }

        Command::Watch { .. } => bail!("watch is interactive and dispatched separately"),
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let org_path = resolve_org_path(cli.file)?;

    match cli.command {
        Command::Watch {
            root,
            poll_interval,
        } => {
            let org = load::load(&org_path)?;
            tui::run(&org_path, org, root.as_deref(), poll_interval)?;
        }

        other => {
            let org = load::load(&org_path)?;
            dispatch(&org, other)?;
        }
    }

    Ok(())
}
