#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod api;
pub mod collaborators;
pub mod comments;
pub mod config;
pub mod fetch;
pub mod issues;
pub mod labels;
pub mod milestones;
pub mod models;
pub mod pull_requests;
pub mod releases;
pub mod runner;
pub mod summary;

pub use api::build_client;
pub use collaborators::{create_collaborators, CollaboratorOutcome};
pub use comments::CommentReplay;
pub use config::{
    ConfigError, Credentials, EntitySelection, MigrationConfig, MigrationOptions, RepoRef,
    PUBLIC_API_ROOT,
};
pub use fetch::{
    fetch_collaborators, fetch_issues, fetch_labels, fetch_milestones, fetch_pull_requests,
    fetch_releases, FetchError,
};
pub use issues::{create_issues, IssueOutcome, IssuePayload};
pub use labels::{create_labels, LabelOutcome};
pub use milestones::{create_milestones, MilestoneMap, MilestoneOutcome};
pub use pull_requests::{
    create_pull_requests, IssueUpdatePayload, PullRequestOutcome, PullRequestPayload,
};
pub use releases::{create_releases, ReleaseOutcome};
pub use runner::{Runner, RunnerError};
pub use summary::RunSummary;
