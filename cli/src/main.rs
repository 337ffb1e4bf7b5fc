//! CLI for the repository metadata migrator.
//!
//! Copies milestones, labels, collaborators, issues, pull requests, and
//! releases (with their comment threads) from one GitHub repository to
//! another, optionally across installations.

use clap::Parser;
use repo_migrator::{EntitySelection, MigrationOptions, RunSummary, Runner, RunnerError};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Migrate milestones, labels, collaborators, issues, pull requests, and
/// releases between two GitHub repositories. With no entity toggles, all
/// six kinds are migrated.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub (public or enterprise) username.
    user_name: String,

    /// GitHub (public or enterprise) personal access token.
    token: String,

    /// Repository to migrate from: <owner>/<repo>.
    source_repo: String,

    /// Repository to migrate to: <owner>/<repo>.
    destination_repo: String,

    /// Personal access token for the destination account, required when
    /// migrating between installations.
    #[arg(long)]
    destination_token: Option<String>,

    /// Username for the destination account, when migrating between
    /// installations.
    #[arg(long)]
    destination_user_name: Option<String>,

    /// Host root to migrate from. Defaults to the public GitHub API.
    #[arg(long)]
    source_root: Option<String>,

    /// Host root to migrate to. Defaults to the public GitHub API.
    #[arg(long)]
    destination_root: Option<String>,

    /// Toggle on milestone migration.
    #[arg(long, short = 'm')]
    milestones: bool,

    /// Toggle on label migration.
    #[arg(long, short = 'l')]
    labels: bool,

    /// Toggle on collaborator migration.
    #[arg(long, short = 'c')]
    collaborators: bool,

    /// Toggle on issue migration.
    #[arg(long, short = 'i')]
    issues: bool,

    /// Toggle on pull request migration.
    #[arg(long, short = 'p')]
    prs: bool,

    /// Toggle on release migration.
    #[arg(long, short = 'r')]
    releases: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the migration
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.all_success() {
                ExitCode::from(0)
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // Use compact formatting without module target paths for cleaner output
        .with(fmt::layer().compact().with_target(false))
        // Allow runtime log filtering via RUST_LOG env var (e.g., RUST_LOG=debug)
        // Falls back to "info" level if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // Register as the global default subscriber
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let options = MigrationOptions {
        username: args.user_name,
        token: args.token,
        source_repo: args.source_repo,
        destination_repo: args.destination_repo,
        destination_username: args.destination_user_name,
        destination_token: args.destination_token,
        source_root: args.source_root,
        destination_root: args.destination_root,
        entities: EntitySelection {
            milestones: args.milestones,
            labels: args.labels,
            collaborators: args.collaborators,
            issues: args.issues,
            pull_requests: args.prs,
            releases: args.releases,
        },
    };
    let runner = Runner::from_options(options)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Milestones: {} created, {} failed",
        summary.milestones_created, summary.milestones_failed
    );
    println!(
        "  Labels: {} created, {} skipped, {} failed",
        summary.labels_created, summary.labels_skipped, summary.labels_failed
    );
    println!(
        "  Collaborators: {} granted, {} skipped, {} failed",
        summary.collaborators_granted, summary.collaborators_skipped, summary.collaborators_failed
    );
    println!(
        "  Issues: {} created, {} failed",
        summary.issues_created, summary.issues_failed
    );
    println!(
        "  Pull requests: {} created, {} failed ({} follow-up updates failed)",
        summary.prs_created, summary.prs_failed, summary.pr_updates_failed
    );
    println!(
        "  Releases: {} created, {} skipped, {} failed",
        summary.releases_created, summary.releases_skipped, summary.releases_failed
    );
    println!(
        "  Comments: {} replayed, {} failed",
        summary.comments_replayed, summary.comments_failed
    );
}
