use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use crate::store::{JsonProject, ProjectStore, add_files};

#[derive(Debug, Parser)]
#[command(
    name = "projadd",
    version,
    about = "Append file references to a project manifest"
)]
pub struct Cli {
    /// Path to the project manifest
    manifest_path: PathBuf,
    /// File paths to register, in input order
    files: Vec<PathBuf>,
    /// Group to receive the new references (defaults to the manifest's default group)
    #[arg(long)]
    group: Option<String>,
    /// Emit the summary as compact JSON instead of a human line
    #[arg(long)]
    raw: bool,
}

#[derive(Debug, Serialize)]
struct MutationSummary {
    manifest: String,
    group: String,
    added: Vec<String>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut store = JsonProject::load(&cli.manifest_path)
        .with_context(|| format!("loading manifest from {}", cli.manifest_path.display()))?;

    let group = cli
        .group
        .clone()
        .unwrap_or_else(|| store.project().default_group.clone());
    let added = add_files(&mut store, &cli.files, Some(&group));

    store
        .save()
        .with_context(|| format!("saving manifest to {}", cli.manifest_path.display()))?;

    let summary = MutationSummary {
        manifest: cli.manifest_path.display().to_string(),
        group,
        added,
    };

    if cli.raw {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "Added {} file reference(s) to group '{}' in {}",
            summary.added.len(),
            summary.group,
            summary.manifest
        );
    }

    Ok(())
}
