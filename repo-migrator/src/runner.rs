//! Orchestrates a full metadata migration run.
//!
//! Stages execute in a fixed dependency order: milestones first (they
//! populate the number remapping that issues and pull requests consume),
//! then labels, collaborators, issues, pull requests, and releases. Each
//! stage fetches its source collection, skips creation when the
//! collection is empty, and otherwise runs the matching creator. A failed
//! fetch aborts the whole run; per-record creation failures only mark the
//! summary.

use crate::api;
use crate::collaborators::create_collaborators;
use crate::config::{ConfigError, MigrationConfig, MigrationOptions};
use crate::fetch::{
    fetch_collaborators, fetch_issues, fetch_labels, fetch_milestones, fetch_pull_requests,
    fetch_releases, FetchError,
};
use crate::issues::create_issues;
use crate::labels::create_labels;
use crate::milestones::{create_milestones, MilestoneMap};
use crate::pull_requests::create_pull_requests;
use crate::releases::create_releases;
use crate::summary::RunSummary;
use octocrab::Octocrab;
use thiserror::Error;
use tracing::info;

/// Errors that abort a migration run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Operator input could not be resolved into a configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A source listing failed; the run stops rather than migrating
    /// partial data.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// An API client could not be constructed.
    #[error("Failed to build API client: {0}")]
    Client(#[from] octocrab::Error),
}

/// Executes migration runs for one validated configuration.
pub struct Runner {
    config: MigrationConfig,
    source: Octocrab,
    destination: Octocrab,
}

impl Runner {
    /// Builds a runner and its two API clients from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if either client cannot be built.
    pub fn new(config: MigrationConfig) -> Result<Self, RunnerError> {
        let source = api::build_client(&config.source_root, &config.source_credentials)?;
        let destination =
            api::build_client(&config.destination_root, &config.destination_credentials)?;
        Ok(Self {
            config,
            source,
            destination,
        })
    }

    /// Convenience constructor from raw operator input.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] on invalid input, before any
    /// network activity.
    pub fn from_options(options: MigrationOptions) -> Result<Self, RunnerError> {
        Self::new(options.resolve()?)
    }

    /// Executes the full migration in the fixed stage order.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Fetch`] when any selected stage fails to
    /// list its source collection. The destination may already hold
    /// records created by earlier stages; there is no rollback.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new();
        let entities = self.config.entities;
        let same_installation = self.config.same_installation();
        let mut milestone_map: Option<MilestoneMap> = None;

        info!(
            source = %self.config.source,
            destination = %self.config.destination,
            same_installation,
            "Starting migration"
        );

        if entities.milestones {
            let milestones = fetch_milestones(&self.source, &self.config.source).await?;
            if milestones.is_empty() {
                info!("No milestones found, none migrated");
            } else {
                info!(count = milestones.len(), "Migrating milestones");
                let outcome =
                    create_milestones(&self.destination, &self.config.destination, &milestones)
                        .await;
                summary.record_milestones(&outcome);
                milestone_map = Some(outcome.map);
            }
        }

        if entities.labels {
            let labels = fetch_labels(&self.source, &self.config.source).await?;
            if labels.is_empty() {
                info!("No labels found, none migrated");
            } else {
                info!(count = labels.len(), "Migrating labels");
                let outcome =
                    create_labels(&self.destination, &self.config.destination, &labels).await;
                summary.record_labels(&outcome);
            }
        }

        if entities.collaborators {
            let collaborators = fetch_collaborators(&self.source, &self.config.source).await?;
            if collaborators.is_empty() {
                info!("No collaborators found, none migrated");
            } else {
                info!(count = collaborators.len(), "Migrating collaborators");
                let outcome = create_collaborators(
                    &self.destination,
                    &self.config.destination,
                    &self.config.destination_credentials.username,
                    &collaborators,
                )
                .await;
                summary.record_collaborators(&outcome);
            }
        }

        if entities.issues {
            let issues = fetch_issues(&self.source, &self.config.source).await?;
            if issues.is_empty() {
                info!("No issues found, none migrated");
            } else {
                info!(count = issues.len(), "Migrating issues");
                let outcome = create_issues(
                    &self.source,
                    &self.destination,
                    &self.config.destination,
                    &issues,
                    milestone_map.as_ref(),
                    entities.labels,
                    same_installation,
                )
                .await;
                summary.record_issues(&outcome);
            }
        }

        if entities.pull_requests {
            let pull_requests = fetch_pull_requests(&self.source, &self.config.source).await?;
            if pull_requests.is_empty() {
                info!("No pull requests found, none migrated");
            } else {
                info!(count = pull_requests.len(), "Migrating pull requests");
                let outcome = create_pull_requests(
                    &self.source,
                    &self.destination,
                    &self.config.destination,
                    &pull_requests,
                    milestone_map.as_ref(),
                    entities.labels,
                    same_installation,
                )
                .await;
                summary.record_pull_requests(&outcome);
            }
        }

        if entities.releases {
            let releases = fetch_releases(&self.source, &self.config.source).await?;
            if releases.is_empty() {
                info!("No releases found, none migrated");
            } else {
                info!(count = releases.len(), "Migrating releases");
                let outcome =
                    create_releases(&self.destination, &self.config.destination, &releases).await;
                summary.record_releases(&outcome);
            }
        }

        info!("Migration finished");
        Ok(summary)
    }
}
