use std::path::PathBuf;

use clap::Parser;
use migration::chain::RevisionChain;
use migration::generate::{generate_revision, DEFAULT_REVISION_DIR};
use migration::naming::{assign_name, Identifier};
use migration::revisions;
use migration::schema_change::SchemaChange;
use migration::Migrator;
use sea_orm_migration::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Create a new revision file named `NN_description.rs`.
#[derive(Parser, Debug)]
#[command(name = "migration revision")]
struct RevisionArgs {
    /// Free-text description, normalized into the file name
    #[arg(short = 'm', long = "message")]
    message: Option<String>,

    /// Directory holding the revision scripts
    #[arg(long, default_value = DEFAULT_REVISION_DIR)]
    dir: PathBuf,
}

/// Print the steps between two revisions without touching a database.
#[derive(Parser, Debug)]
#[command(name = "migration plan")]
struct PlanArgs {
    /// Revision currently applied; omit for an empty database
    #[arg(long)]
    from: Option<Identifier>,

    /// Target revision; defaults to the head
    #[arg(long)]
    to: Option<Identifier>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn revision(args: &[String]) -> anyhow::Result<()> {
    let parsed = RevisionArgs::parse_from(&args[1..]);
    tracing::debug!(message = ?parsed.message, "Generating revision");

    let generated = generate_revision(&parsed.dir, args, assign_name)?;
    println!("{}", generated.path.display());
    Ok(())
}

fn plan(args: &[String]) -> anyhow::Result<()> {
    let parsed = PlanArgs::parse_from(&args[1..]);
    let chain: RevisionChain = revisions::chain()?;
    let to = parsed.to.or(chain.head());

    let steps = chain.path(parsed.from, to)?;
    if steps.is_empty() {
        println!("Nothing to do");
    }
    for step in steps {
        let kinds: Vec<_> = step.changes().iter().map(SchemaChange::kind).collect();
        println!("{step}: {}", kinds.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("revision") => {
            init_tracing();
            revision(&args)
        }
        Some("plan") => plan(&args),
        _ => {
            cli::run_cli(Migrator).await;
            Ok(())
        }
    }
}
